//! I/O helpers for exporting analysis data.

pub mod csv;

pub use csv::*;
