use num_complex::Complex;

use crate::math::Scalar;
use crate::units::{Capacitance, Impedance, Quantity};

/// Trait implemented by lumped elements that expose a frequency-domain impedance.
pub trait Component {
    /// Returns the element's impedance for an angular frequency `omega` (rad/s).
    fn impedance(&self, omega: Scalar) -> Complex<Scalar>;

    /// Human-readable identifier (e.g. `RE`).
    fn name(&self) -> &str;
}

/// Ideal resistor.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Resistor {
    name: String,
    resistance: Impedance<Scalar>,
}

impl Resistor {
    /// Creates a resistor.
    #[must_use]
    pub fn new(name: impl Into<String>, resistance_ohms: Scalar) -> Self {
        Self {
            name: name.into(),
            resistance: Quantity::new(resistance_ohms),
        }
    }

    /// Resistance in ohms.
    #[must_use]
    pub fn resistance(&self) -> Scalar {
        self.resistance.value()
    }
}

impl Component for Resistor {
    fn impedance(&self, _omega: Scalar) -> Complex<Scalar> {
        Complex::new(self.resistance(), 0.0)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Ideal capacitor. Open circuit at DC.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Capacitor {
    name: String,
    capacitance: Capacitance<Scalar>,
}

impl Capacitor {
    /// Creates a capacitor.
    #[must_use]
    pub fn new(name: impl Into<String>, capacitance_f: Scalar) -> Self {
        Self {
            name: name.into(),
            capacitance: Quantity::new(capacitance_f),
        }
    }

    /// Capacitance in farads.
    #[must_use]
    pub fn capacitance(&self) -> Scalar {
        self.capacitance.value()
    }

    /// Reactance magnitude `1 / (ωC)` in ohms; infinite at DC.
    #[must_use]
    pub fn reactance(&self, omega: Scalar) -> Scalar {
        let wc = omega.abs() * self.capacitance();
        if wc < Scalar::MIN_POSITIVE {
            Scalar::INFINITY
        } else {
            1.0 / wc
        }
    }
}

impl Component for Capacitor {
    fn impedance(&self, omega: Scalar) -> Complex<Scalar> {
        let x = self.reactance(omega);
        if x.is_infinite() {
            Complex::new(Scalar::INFINITY, 0.0)
        } else {
            Complex::new(0.0, -x)
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
