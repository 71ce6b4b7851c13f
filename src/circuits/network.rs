use std::sync::Arc;

use num_complex::Complex;

use crate::math::Scalar;

use super::component::Component;

/// Components connected in parallel, e.g. a resistor with its bypass
/// capacitor.
#[derive(Clone, Default)]
pub struct ParallelNetwork {
    members: Vec<Arc<dyn Component + Send + Sync>>,
}

impl ParallelNetwork {
    /// Creates an empty network.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a component to the network.
    pub fn add_component<C>(&mut self, component: C)
    where
        C: Component + Send + Sync + 'static,
    {
        self.members.push(Arc::new(component));
    }

    /// Builder-style variant of [`ParallelNetwork::add_component`].
    #[must_use]
    pub fn with_component<C>(mut self, component: C) -> Self
    where
        C: Component + Send + Sync + 'static,
    {
        self.add_component(component);
        self
    }

    /// Returns the aggregate impedance at angular frequency `omega`.
    ///
    /// Open (infinite-impedance) members carry no current and are skipped;
    /// a shorted member shorts the whole network. A network with no
    /// conducting member is open.
    #[must_use]
    pub fn impedance(&self, omega: Scalar) -> Complex<Scalar> {
        let mut admittance = Complex::<Scalar>::default();
        for component in &self.members {
            let z = component.impedance(omega);
            if z.is_infinite() {
                continue;
            }
            if z.norm() <= Scalar::EPSILON {
                return Complex::new(0.0, 0.0);
            }
            admittance += z.inv();
        }

        if admittance.norm() <= Scalar::EPSILON {
            Complex::new(Scalar::INFINITY, 0.0)
        } else {
            admittance.inv()
        }
    }

    /// Returns the impedance magnitude at angular frequency `omega`.
    #[must_use]
    pub fn impedance_magnitude(&self, omega: Scalar) -> Scalar {
        let z = self.impedance(omega);
        if z.is_infinite() {
            Scalar::INFINITY
        } else {
            z.norm()
        }
    }
}

impl std::fmt::Debug for ParallelNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.members.iter().map(|m| m.name()).collect();
        f.debug_struct("ParallelNetwork")
            .field("members", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::circuits::component::{Capacitor, Resistor};
    use crate::constants::angular_frequency;

    #[test]
    fn parallel_network_combines_admittance() {
        let network = ParallelNetwork::new()
            .with_component(Resistor::new("R1", 100.0))
            .with_component(Resistor::new("R2", 100.0));
        assert_relative_eq!(network.impedance(1.0).re, 50.0);
    }

    #[test]
    fn bypassed_resistor_matches_closed_form_magnitude() {
        let re = 1.0e3;
        let ce = 10.0e-6;
        let network = ParallelNetwork::new()
            .with_component(Resistor::new("RE", re))
            .with_component(Capacitor::new("CE", ce));
        let omega = angular_frequency(50.0);
        let xc = 1.0 / (omega * ce);
        let expected = re * xc / (re * re + xc * xc).sqrt();
        assert_relative_eq!(network.impedance_magnitude(omega), expected, max_relative = 1.0e-12);
    }

    #[test]
    fn open_capacitor_leaves_resistor_at_dc() {
        let network = ParallelNetwork::new()
            .with_component(Resistor::new("RE", 1.0e3))
            .with_component(Capacitor::new("CE", 100.0e-6));
        assert_relative_eq!(network.impedance_magnitude(0.0), 1.0e3);
    }

    #[test]
    fn all_open_parallel_network_is_open() {
        let network = ParallelNetwork::new().with_component(Capacitor::new("C", 1.0e-6));
        assert!(network.impedance_magnitude(0.0).is_infinite());
        assert!(ParallelNetwork::new().impedance_magnitude(1.0).is_infinite());
    }

    #[test]
    fn debug_lists_member_names() {
        let network = ParallelNetwork::new()
            .with_component(Resistor::new("RE", 1.0e3))
            .with_component(Capacitor::new("CE", 1.0e-6));
        let text = format!("{network:?}");
        assert!(text.contains("RE") && text.contains("CE"));
    }
}
