//! Shared numerical primitives: resistor combinations, dB conversion, and
//! first-order response shapes.

use crate::constants::{MAGNITUDE_FLOOR, MIN_DENOMINATOR};
use crate::errors::{AmpError, Result};

/// Primary scalar type used across the crate.
pub type Scalar = f64;

/// Rejects denominators that are zero, nearly zero, or non-finite.
pub(crate) fn checked_denominator(value: Scalar, what: &str) -> Result<Scalar> {
    if !value.is_finite() || value.abs() < MIN_DENOMINATOR {
        return Err(AmpError::Domain(format!("{what} is zero or not finite ({value})")));
    }
    Ok(value)
}

/// Parallel combination `a·b / (a + b)` of two resistances.
pub fn parallel(a: Scalar, b: Scalar) -> Result<Scalar> {
    let sum = checked_denominator(a + b, "parallel resistance sum")?;
    Ok(a * b / sum)
}

/// Converts an amplitude ratio to decibels (`20·log10|x|`).
pub fn amplitude_db(magnitude: Scalar) -> Result<Scalar> {
    log_ratio(magnitude).map(|l| 20.0 * l)
}

/// Converts a power ratio to decibels (`10·log10|x|`).
pub fn power_db(magnitude: Scalar) -> Result<Scalar> {
    log_ratio(magnitude).map(|l| 10.0 * l)
}

fn log_ratio(magnitude: Scalar) -> Result<Scalar> {
    if !magnitude.is_finite() || magnitude <= MAGNITUDE_FLOOR {
        return Err(AmpError::ArithmeticUndefined { magnitude });
    }
    Ok(magnitude.log10())
}

/// Magnitude response of a first-order high-pass section, `x / √(1 + x²)`
/// with `x = f / fc`.
#[inline]
#[must_use]
pub fn high_pass_response(normalized_frequency: Scalar) -> Scalar {
    let x = normalized_frequency;
    x / (1.0 + x * x).sqrt()
}
