//! Lightweight unit-tagged quantities.

use std::fmt;
use std::marker::PhantomData;

use crate::math::Scalar;

/// Marker trait for physical units.
pub trait Unit {
    /// SI symbol used when formatting.
    const SYMBOL: &'static str;
}

/// Resistance / impedance magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ohm;
/// Capacitance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Farad;

impl Unit for Ohm {
    const SYMBOL: &'static str = "Ω";
}
impl Unit for Farad {
    const SYMBOL: &'static str = "F";
}

/// A value tagged with its physical unit.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        transparent,
        bound(serialize = "T: serde::Serialize", deserialize = "T: serde::Deserialize<'de>")
    )
)]
pub struct Quantity<T, U> {
    value: T,
    #[cfg_attr(feature = "serde", serde(skip))]
    unit: PhantomData<U>,
}

impl<T: Copy, U> Quantity<T, U> {
    /// Wraps a raw value.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self {
            value,
            unit: PhantomData,
        }
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(&self) -> T {
        self.value
    }
}

// Manual impls so that `U` needs no bounds.
impl<T: Copy, U> Clone for Quantity<T, U> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T: Copy, U> Copy for Quantity<T, U> {}

impl<T: PartialEq, U> PartialEq for Quantity<T, U> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: fmt::Debug, U: Unit> fmt::Debug for Quantity<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.value, U::SYMBOL)
    }
}

impl<U: Unit> fmt::Display for Quantity<Scalar, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, U::SYMBOL)
    }
}

/// Resistance in ohms.
pub type Impedance<T> = Quantity<T, Ohm>;
/// Capacitance in farads.
pub type Capacitance<T> = Quantity<T, Farad>;
