//! Shared error types used across submodules.

use thiserror::Error;

use crate::math::Scalar;

/// Convenience alias for results produced by this crate.
pub type Result<T, E = AmpError> = std::result::Result<T, E>;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum AmpError {
    /// The bias network does not leave the transistor in its active region.
    #[error("non-physical bias point: IE = {emitter_current:e} A, VCE = {vce} V")]
    NonPhysicalBias {
        /// Emitter current in amperes.
        emitter_current: Scalar,
        /// Collector-emitter voltage in volts.
        vce: Scalar,
    },
    /// An input or intermediate value lies outside the model's domain.
    #[error("domain error: {0}")]
    Domain(String),
    /// A gain magnitude has no logarithm.
    #[error("dB conversion undefined for magnitude {magnitude:e}")]
    ArithmeticUndefined {
        /// Offending linear magnitude.
        magnitude: Scalar,
    },
    /// Failure while writing exported data.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
