#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Device constants and default sweep settings.
pub mod constants;
/// Strongly typed unit helpers and quantity abstractions.
pub mod units;
/// Shared numerical helpers (parallel combination, dB conversion).
pub mod math;
/// Circuit components, parameters, and bias / small-signal models.
pub mod circuits;
/// Frequency grids and the sweep map.
pub mod sweep;
/// End-to-end amplifier analysis.
pub mod analysis;
/// CSV export for plotting front ends.
pub mod io;
/// Error types shared between modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
