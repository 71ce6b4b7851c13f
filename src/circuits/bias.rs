//! DC operating point of a voltage-divider-biased stage.
//!
//! The base is fed from the unloaded divider voltage, the emitter sits one
//! junction drop below it, and the collector current is taken equal to the
//! emitter current (high-β approximation). Common-emitter and common-base
//! stages share the same DC network, so a single solver serves both.

use crate::circuits::parameters::CircuitParameters;
use crate::constants::VBE;
use crate::errors::{AmpError, Result};
use crate::math::{checked_denominator, Scalar};

/// DC node voltages and branch currents of the transistor.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiasPoint {
    /// Base voltage (V).
    pub vb: Scalar,
    /// Emitter voltage (V).
    pub ve: Scalar,
    /// Emitter current (A).
    pub ie: Scalar,
    /// Collector current (A).
    pub ic: Scalar,
    /// Base current (A).
    pub ib: Scalar,
    /// Collector voltage (V).
    pub vc: Scalar,
    /// Collector-emitter voltage (V).
    pub vce: Scalar,
}

/// Solves the operating point by direct substitution.
///
/// Fails with [`AmpError::Domain`] when a denominator (RB1 + RB2, RE, β)
/// vanishes and with [`AmpError::NonPhysicalBias`] when the emitter current
/// or VCE is not positive.
pub fn solve_bias(params: &CircuitParameters) -> Result<BiasPoint> {
    let divider = checked_denominator(params.rb1 + params.rb2, "RB1 + RB2")?;
    let re = checked_denominator(params.re, "RE")?;
    if !(params.beta > 0.0) || !params.beta.is_finite() {
        return Err(AmpError::Domain(format!(
            "beta must be positive and finite, got {}",
            params.beta
        )));
    }

    let vb = params.vcc * params.rb2 / divider;
    let ve = vb - VBE;
    let ie = ve / re;
    let ic = ie;
    let ib = ic / params.beta;
    let vc = params.vcc - ic * params.rc;
    let vce = vc - ve;

    if !(ie > 0.0) || !(vce > 0.0) {
        log::debug!("rejecting bias point: IE = {ie:e} A, VCE = {vce} V");
        return Err(AmpError::NonPhysicalBias {
            emitter_current: ie,
            vce,
        });
    }

    Ok(BiasPoint {
        vb,
        ve,
        ie,
        ic,
        ib,
        vc,
        vce,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn reference_stage() -> CircuitParameters {
        CircuitParameters {
            rc: 4.7e3,
            rb1: 47.0e3,
            rb2: 10.0e3,
            re: 1.0e3,
            rl: 10.0e3,
            vcc: 12.0,
            beta: 150.0,
            cin: 10.0e-6,
            cout: 10.0e-6,
            c_bypass: 100.0e-6,
            ..CircuitParameters::default()
        }
    }

    #[test]
    fn reference_stage_operating_point() {
        let q = solve_bias(&reference_stage()).unwrap();
        let vb = 12.0 * 10.0 / 57.0;
        assert_relative_eq!(q.vb, vb, max_relative = 1.0e-12);
        assert_relative_eq!(q.ve, vb - 0.7, max_relative = 1.0e-12);
        assert_relative_eq!(q.ie, 1.405e-3, max_relative = 1.0e-3);
        assert_relative_eq!(q.ic, q.ie);
        assert_relative_eq!(q.ib, 9.368e-6, max_relative = 1.0e-3);
        assert_relative_eq!(q.vc, 5.395, max_relative = 1.0e-3);
        assert_relative_eq!(q.vce, 3.990, max_relative = 1.0e-3);
    }

    #[test]
    fn derived_quantities_are_consistent() {
        for beta in [50.0, 100.0, 300.0] {
            for rb1 in [20.0e3, 47.0e3, 120.0e3] {
                let params = CircuitParameters {
                    beta,
                    rb1,
                    rc: 1.0e3,
                    ..CircuitParameters::default()
                };
                let q = solve_bias(&params).unwrap();
                assert_relative_eq!(q.vce, q.vc - q.ve, epsilon = 1.0e-12);
                assert_relative_eq!(q.ib * beta, q.ic, max_relative = 1.0e-12);
                assert_relative_eq!(q.ie, q.ve / params.re, max_relative = 1.0e-12);
            }
        }
    }

    #[test]
    fn base_below_junction_drop_is_non_physical() {
        let params = CircuitParameters {
            rb1: 200.0e3,
            rb2: 5.0e3,
            vcc: 5.0,
            ..CircuitParameters::default()
        };
        assert!(matches!(
            solve_bias(&params),
            Err(AmpError::NonPhysicalBias { .. })
        ));
    }

    #[test]
    fn saturated_collector_is_non_physical() {
        let params = CircuitParameters {
            rc: 10.0e3,
            re: 100.0,
            ..CircuitParameters::default()
        };
        match solve_bias(&params) {
            Err(AmpError::NonPhysicalBias { vce, .. }) => assert!(vce <= 0.0),
            other => panic!("expected saturation, got {other:?}"),
        }
    }

    #[test]
    fn zero_denominators_are_domain_errors() {
        let no_re = CircuitParameters {
            re: 0.0,
            ..CircuitParameters::default()
        };
        assert!(matches!(solve_bias(&no_re), Err(AmpError::Domain(_))));

        let no_divider = CircuitParameters {
            rb1: 0.0,
            rb2: 0.0,
            ..CircuitParameters::default()
        };
        assert!(matches!(solve_bias(&no_divider), Err(AmpError::Domain(_))));

        let no_beta = CircuitParameters {
            beta: 0.0,
            ..CircuitParameters::default()
        };
        assert!(matches!(solve_bias(&no_beta), Err(AmpError::Domain(_))));
    }
}
