//! User-adjustable component values for a voltage-divider-biased BJT stage.

use crate::constants::RB_DIVIDER_RATIO;
use crate::errors::{AmpError, Result};
use crate::math::Scalar;

/// Which terminal is common to input and output.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Configuration {
    /// Input at the base, emitter resistor bypassed by a capacitor.
    #[default]
    CommonEmitter,
    /// Input at the emitter, base divider bypassed by a capacitor.
    CommonBase,
}

/// Immutable snapshot of a stage's component values (SI units).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircuitParameters {
    /// Amplifier configuration.
    pub configuration: Configuration,
    /// Collector resistor RC (Ω).
    pub rc: Scalar,
    /// Upper base divider resistor RB1 (Ω).
    pub rb1: Scalar,
    /// Lower base divider resistor RB2 (Ω).
    pub rb2: Scalar,
    /// Emitter resistor RE (Ω).
    pub re: Scalar,
    /// Load resistor RL (Ω).
    pub rl: Scalar,
    /// Supply voltage VCC (V).
    pub vcc: Scalar,
    /// Forward current gain β (hFE).
    pub beta: Scalar,
    /// Input coupling capacitor (F).
    pub cin: Scalar,
    /// Output coupling capacitor (F).
    pub cout: Scalar,
    /// Bypass capacitor (F): CE across RE for common emitter, CB from base
    /// to ground for common base.
    pub c_bypass: Scalar,
}

impl Default for CircuitParameters {
    fn default() -> Self {
        Self {
            configuration: Configuration::CommonEmitter,
            rc: 2.2e3,
            rb1: 47.0e3,
            rb2: 10.0e3,
            re: 1.0e3,
            rl: 10.0e3,
            vcc: 12.0,
            beta: 100.0,
            cin: 10.0e-6,
            cout: 10.0e-6,
            c_bypass: 100.0e-6,
        }
    }
}

impl CircuitParameters {
    /// Default common-emitter component set.
    #[must_use]
    pub fn common_emitter() -> Self {
        Self::default()
    }

    /// Default common-base component set.
    #[must_use]
    pub fn common_base() -> Self {
        Self {
            configuration: Configuration::CommonBase,
            ..Self::default()
        }
    }

    /// Returns a copy with a different configuration, keeping component values.
    #[must_use]
    pub fn with_configuration(self, configuration: Configuration) -> Self {
        Self {
            configuration,
            ..self
        }
    }

    /// Checks that every value is finite and strictly positive.
    ///
    /// Slider ranges are not enforced here; see [`ParameterRanges::clamp`].
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("RC", self.rc),
            ("RB1", self.rb1),
            ("RB2", self.rb2),
            ("RE", self.re),
            ("RL", self.rl),
            ("VCC", self.vcc),
            ("beta", self.beta),
            ("Cin", self.cin),
            ("Cout", self.cout),
            ("bypass capacitor", self.c_bypass),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(AmpError::Domain(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Closed interval `[min, max]` declared for one control.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Lower bound.
    pub min: Scalar,
    /// Upper bound.
    pub max: Scalar,
}

impl Range {
    /// Creates a range; bounds are reordered if given backwards.
    #[must_use]
    pub fn new(a: Scalar, b: Scalar) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    fn ordered(&self) -> (Scalar, Scalar) {
        (self.min.min(self.max), self.min.max(self.max))
    }

    /// Clamps `value` into the range. NaN maps to the lower bound, and
    /// backwards bounds are treated as if given in order.
    #[must_use]
    pub fn clamp(&self, value: Scalar) -> Scalar {
        let (lo, hi) = self.ordered();
        if value.is_nan() {
            lo
        } else {
            value.max(lo).min(hi)
        }
    }

    /// True when `value` lies inside the range.
    #[must_use]
    pub fn contains(&self, value: Scalar) -> bool {
        let (lo, hi) = self.ordered();
        (lo..=hi).contains(&value)
    }
}

/// Control ranges declared by the interactive front end, in SI units.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRanges {
    /// RC (Ω).
    pub rc: Range,
    /// RB1 (Ω).
    pub rb1: Range,
    /// RE (Ω).
    pub re: Range,
    /// RL (Ω).
    pub rl: Range,
    /// VCC (V).
    pub vcc: Range,
    /// β.
    pub beta: Range,
    /// Cin (F).
    pub cin: Range,
    /// Cout (F).
    pub cout: Range,
    /// Bypass capacitor (F).
    pub c_bypass: Range,
}

impl Default for ParameterRanges {
    fn default() -> Self {
        Self {
            rc: Range::new(1.0e3, 10.0e3),
            rb1: Range::new(10.0e3, 200.0e3),
            re: Range::new(0.1e3, 5.0e3),
            rl: Range::new(1.0e3, 20.0e3),
            vcc: Range::new(5.0, 24.0),
            beta: Range::new(50.0, 300.0),
            cin: Range::new(0.1e-6, 100.0e-6),
            cout: Range::new(0.1e-6, 100.0e-6),
            c_bypass: Range::new(1.0e-6, 1000.0e-6),
        }
    }
}

impl ParameterRanges {
    /// Clamps every ranged value of `params`. RB2 has no control of its own
    /// and is only clamped to stay positive.
    #[must_use]
    pub fn clamp(&self, params: &CircuitParameters) -> CircuitParameters {
        CircuitParameters {
            configuration: params.configuration,
            rc: self.rc.clamp(params.rc),
            rb1: self.rb1.clamp(params.rb1),
            rb2: if params.rb2.is_finite() && params.rb2 > 0.0 {
                params.rb2
            } else {
                self.rb1.min / RB_DIVIDER_RATIO
            },
            re: self.re.clamp(params.re),
            rl: self.rl.clamp(params.rl),
            vcc: self.vcc.clamp(params.vcc),
            beta: self.beta.clamp(params.beta),
            cin: self.cin.clamp(params.cin),
            cout: self.cout.clamp(params.cout),
            c_bypass: self.c_bypass.clamp(params.c_bypass),
        }
    }

    /// True when every ranged value of `params` lies within its control range.
    #[must_use]
    pub fn contains(&self, params: &CircuitParameters) -> bool {
        self.rc.contains(params.rc)
            && self.rb1.contains(params.rb1)
            && self.re.contains(params.re)
            && self.rl.contains(params.rl)
            && self.vcc.contains(params.vcc)
            && self.beta.contains(params.beta)
            && self.cin.contains(params.cin)
            && self.cout.contains(params.cout)
            && self.c_bypass.contains(params.c_bypass)
    }
}

/// Raw control positions as shown to a user: kΩ, μF, V and integer β.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderSettings {
    /// Collector resistor (kΩ).
    pub rc_kohm: Scalar,
    /// Upper divider resistor (kΩ). RB2 follows it.
    pub rb1_kohm: Scalar,
    /// Emitter resistor (kΩ).
    pub re_kohm: Scalar,
    /// Load resistor (kΩ).
    pub rl_kohm: Scalar,
    /// Supply voltage (V).
    pub vcc: Scalar,
    /// Current gain, stepped in whole units.
    pub beta: Scalar,
    /// Input coupling capacitor (µF).
    pub cin_uf: Scalar,
    /// Output coupling capacitor (µF).
    pub cout_uf: Scalar,
    /// Bypass capacitor (µF).
    pub c_bypass_uf: Scalar,
}

impl Default for SliderSettings {
    fn default() -> Self {
        Self {
            rc_kohm: 2.2,
            rb1_kohm: 47.0,
            re_kohm: 1.0,
            rl_kohm: 10.0,
            vcc: 12.0,
            beta: 100.0,
            cin_uf: 10.0,
            cout_uf: 10.0,
            c_bypass_uf: 100.0,
        }
    }
}

impl SliderSettings {
    /// Converts to SI parameters. RB2 tracks RB1 at a fixed divider ratio
    /// and β is truncated to an integer, as the controls step in whole units.
    #[must_use]
    pub fn to_parameters(&self, configuration: Configuration) -> CircuitParameters {
        let rb1 = self.rb1_kohm * 1.0e3;
        CircuitParameters {
            configuration,
            rc: self.rc_kohm * 1.0e3,
            rb1,
            rb2: rb1 / RB_DIVIDER_RATIO,
            re: self.re_kohm * 1.0e3,
            rl: self.rl_kohm * 1.0e3,
            vcc: self.vcc,
            beta: self.beta.trunc(),
            cin: self.cin_uf * 1.0e-6,
            cout: self.cout_uf * 1.0e-6,
            c_bypass: self.c_bypass_uf * 1.0e-6,
        }
    }
}
