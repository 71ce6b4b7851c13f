//! Power delivered from a Thevenin source into a resistive load.

use crate::errors::{AmpError, Result};
use crate::math::{checked_denominator, Scalar};
use crate::sweep::logspace;

/// Ideal voltage source behind a series resistance.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TheveninSource {
    /// Open-circuit voltage V_th (V).
    pub voltage: Scalar,
    /// Source resistance R_th (Ω).
    pub resistance: Scalar,
}

/// Load power at one load resistance.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerPoint {
    /// Load resistance R_L (Ω).
    pub load: Scalar,
    /// Power dissipated in the load (W).
    pub power: Scalar,
}

impl Default for TheveninSource {
    fn default() -> Self {
        Self {
            voltage: 10.0,
            resistance: 50.0,
        }
    }
}

impl TheveninSource {
    /// Creates a source; the resistance must be non-negative and finite.
    pub fn new(voltage: Scalar, resistance: Scalar) -> Result<Self> {
        if !voltage.is_finite() || !resistance.is_finite() || resistance < 0.0 {
            return Err(AmpError::Domain(format!(
                "invalid Thevenin source: {voltage} V behind {resistance} Ω"
            )));
        }
        Ok(Self {
            voltage,
            resistance,
        })
    }

    /// `P = V_th² · R_L / (R_th + R_L)²`.
    pub fn load_power(&self, load: Scalar) -> Result<Scalar> {
        if !load.is_finite() || load < 0.0 {
            return Err(AmpError::Domain(format!("invalid load resistance {load} Ω")));
        }
        let total = checked_denominator(self.resistance + load, "R_th + R_L")?;
        Ok(self.voltage * self.voltage * load / (total * total))
    }

    /// Theoretical maximum `V_th² / (4·R_th)`, reached at R_L = R_th.
    pub fn max_power(&self) -> Result<Scalar> {
        let r = checked_denominator(self.resistance, "R_th")?;
        Ok(self.voltage * self.voltage / (4.0 * r))
    }

    /// Evaluates the load power at every resistance in `loads`.
    pub fn sweep_load(&self, loads: &[Scalar]) -> Result<Vec<PowerPoint>> {
        loads
            .iter()
            .map(|&load| {
                Ok(PowerPoint {
                    load,
                    power: self.load_power(load)?,
                })
            })
            .collect()
    }

    /// Sweeps `points` log-spaced loads from 0.1 Ω to 10 kΩ.
    pub fn default_sweep(&self, points: usize) -> Result<Vec<PowerPoint>> {
        self.sweep_load(&logspace(0.1, 1.0e4, points)?)
    }
}

/// Sample with the greatest power; the first one wins ties.
#[must_use]
pub fn peak(points: &[PowerPoint]) -> Option<PowerPoint> {
    points.iter().copied().fold(None, |best, p| match best {
        Some(b) if b.power >= p.power => Some(b),
        _ => Some(p),
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn matched_load_receives_half_watt() {
        let source = TheveninSource::new(10.0, 50.0).unwrap();
        assert_relative_eq!(source.load_power(50.0).unwrap(), 0.5);
        assert_relative_eq!(source.max_power().unwrap(), 0.5);
        let matched = source.load_power(50.0).unwrap();
        assert!(matched > source.load_power(10.0).unwrap());
        assert!(matched > source.load_power(500.0).unwrap());
    }

    #[test]
    fn sweep_peaks_near_source_resistance() {
        let source = TheveninSource::default();
        let points = source.default_sweep(800).unwrap();
        assert_eq!(points.len(), 800);
        let best = peak(&points).unwrap();
        assert_relative_eq!(best.load, 50.0, max_relative = 0.02);
        assert!(best.power <= source.max_power().unwrap());
        assert_relative_eq!(best.power, 0.5, max_relative = 1.0e-4);
    }

    #[test]
    fn degenerate_inputs_are_rejected() {
        assert!(TheveninSource::new(10.0, -1.0).is_err());
        let shorted = TheveninSource::new(10.0, 0.0).unwrap();
        assert!(matches!(shorted.load_power(0.0), Err(AmpError::Domain(_))));
        assert!(shorted.max_power().is_err());
        assert!(TheveninSource::default().load_power(-5.0).is_err());
        assert!(peak(&[]).is_none());
    }
}
