//! Device constants, numeric guards, and default sweep settings.
//!
//! ## Device model
//!
//! The bias and small-signal formulas use a fixed silicon junction drop and
//! the room-temperature thermal voltage. Both are textbook approximations:
//! - `V_BE ≈ 0.7 V` for a forward-biased silicon base-emitter junction.
//! - `V_T = kT/q ≈ 25.85 mV` at 300 K, rounded to 26 mV as is customary for
//!   hand analysis.

use std::f64::consts::PI;

use crate::math::Scalar;

/// Forward base-emitter drop in volts (V).
pub const VBE: Scalar = 0.7;
/// Thermal voltage at room temperature in volts (V).
pub const VT: Scalar = 0.026;

/// Ratio RB1 / RB2 maintained by slider-driven parameter sets.
pub const RB_DIVIDER_RATIO: Scalar = 4.7;

/// Linear gain magnitudes at or below this value have no meaningful dB value.
pub const MAGNITUDE_FLOOR: Scalar = 1.0e-10;
/// dB value substituted for undefined gain conversions.
pub const DB_FLOOR: Scalar = -100.0;
/// Denominators whose magnitude falls below this are rejected as domain errors.
pub const MIN_DENOMINATOR: Scalar = 1.0e-12;

/// Lower edge of the default frequency sweep in hertz.
pub const DEFAULT_SWEEP_START_HZ: Scalar = 1.0;
/// Upper edge of the default frequency sweep in hertz.
pub const DEFAULT_SWEEP_STOP_HZ: Scalar = 1.0e6;
/// Number of log-spaced points in the default frequency sweep.
pub const DEFAULT_SWEEP_POINTS: usize = 500;
/// Frequency used for the detailed single-point breakdown.
pub const DEFAULT_SELECTED_FREQUENCY_HZ: Scalar = 1.0e3;

/// Returns the angular frequency corresponding to a linear frequency `hz`.
#[inline]
#[must_use]
pub fn angular_frequency(hz: Scalar) -> Scalar {
    2.0 * PI * hz
}
