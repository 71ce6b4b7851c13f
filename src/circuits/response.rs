//! Small-signal gain of a biased stage across frequency.
//!
//! Each frequency point is evaluated independently from the operating point
//! and component values; nothing is carried between points. Gains are
//! magnitudes (the common-emitter phase inversion is dropped).
//!
//! Low-frequency rolloff comes from two sources: the bypass capacitor
//! un-shorting its resistor, and the input coupling capacitor forming a
//! high-pass with the stage input resistance. The input corner is recomputed
//! at every point from the input resistance seen at that frequency. The
//! output coupling capacitor is reported but does not shape the response.

use std::f64::consts::PI;

use crate::circuits::bias::BiasPoint;
use crate::circuits::component::{Capacitor, Resistor};
use crate::circuits::network::ParallelNetwork;
use crate::circuits::parameters::{CircuitParameters, Configuration};
use crate::constants::{angular_frequency, DB_FLOOR, VT};
use crate::errors::{AmpError, Result};
use crate::math::{amplitude_db, checked_denominator, high_pass_response, parallel, power_db, Scalar};
use crate::sweep::{sweep_map_with, FrequencyGrid, ParallelConfig};

/// Every intermediate quantity of a single-frequency evaluation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointBreakdown {
    /// Evaluation frequency (Hz).
    pub frequency: Scalar,
    /// Intrinsic emitter resistance `re = VT / IE` (Ω).
    pub re_ac: Scalar,
    /// AC collector load `RC ∥ RL` (Ω).
    pub rc_eff: Scalar,
    /// Base divider resistance `RB1 ∥ RB2` (Ω).
    pub rb_parallel: Scalar,
    /// Input coupling capacitor reactance (Ω).
    pub zc_in: Scalar,
    /// Output coupling capacitor reactance (Ω).
    pub zc_out: Scalar,
    /// Bypass capacitor reactance (Ω).
    pub zc_bypass: Scalar,
    /// Magnitude of the bypassed node impedance: `|RE ∥ CE|` for common
    /// emitter, `|RB ∥ CB|` for common base (Ω).
    pub z_bypassed: Scalar,
    /// Impedance looking into the transistor: `β(re + Ze)` at the base for
    /// common emitter, `re + Zb/(β+1)` at the emitter for common base (Ω).
    pub z_device: Scalar,
    /// Total input resistance seen by the coupling capacitor (Ω).
    pub rin: Scalar,
    /// Input coupling corner frequency (Hz).
    pub fc_in: Scalar,
    /// Input coupling high-pass magnitude, 0..1.
    pub cin_response: Scalar,
    /// Voltage gain before the input coupling rolloff.
    pub av_base: Scalar,
    /// Fraction of input current reaching the transistor.
    pub input_division: Scalar,
    /// Fraction of collector current reaching the load, `RC / (RC + RL)`.
    pub output_division: Scalar,
    /// Voltage gain magnitude.
    pub av: Scalar,
    /// Current gain magnitude.
    pub ai: Scalar,
    /// Power gain `Av · Ai`.
    pub ap: Scalar,
}

impl PointBreakdown {
    /// Converts the linear gains to dB, flooring undefined conversions.
    #[must_use]
    pub fn gains(&self) -> GainPoint {
        GainPoint::from_linear(self.frequency, self.av, self.ai, self.ap)
    }
}

/// Voltage, current and power gain in dB at one frequency.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainPoint {
    /// Frequency (Hz).
    pub frequency: Scalar,
    /// `20·log10|Av|`.
    pub av_db: Scalar,
    /// `20·log10|Ai|`.
    pub ai_db: Scalar,
    /// `10·log10|Ap|`.
    pub ap_db: Scalar,
    /// True when at least one value was replaced by [`DB_FLOOR`].
    pub floored: bool,
}

impl GainPoint {
    /// Builds a point from linear magnitudes. Undefined conversions and
    /// values below [`DB_FLOOR`] are reported as [`DB_FLOOR`].
    #[must_use]
    pub fn from_linear(frequency: Scalar, av: Scalar, ai: Scalar, ap: Scalar) -> Self {
        let mut floored = false;
        let mut recover = |value: Result<Scalar>| match value {
            Ok(db) if db >= DB_FLOOR => db,
            _ => {
                floored = true;
                DB_FLOOR
            }
        };
        let av_db = recover(amplitude_db(av));
        let ai_db = recover(amplitude_db(ai));
        let ap_db = recover(power_db(ap));
        Self {
            frequency,
            av_db,
            ai_db,
            ap_db,
            floored,
        }
    }

    /// A point whose evaluation failed outright.
    #[must_use]
    pub fn floor(frequency: Scalar) -> Self {
        Self {
            frequency,
            av_db: DB_FLOOR,
            ai_db: DB_FLOOR,
            ap_db: DB_FLOOR,
            floored: true,
        }
    }
}

/// A frequency-dependent small-signal model of one amplifier configuration.
pub trait SmallSignalModel: Send + Sync {
    /// Configuration this model describes.
    fn configuration(&self) -> Configuration;

    /// Evaluates every intermediate quantity at `frequency` (Hz).
    fn breakdown(&self, frequency: Scalar) -> Result<PointBreakdown>;
}

/// Values shared by both configurations, fixed for a given parameter set.
#[derive(Debug, Clone)]
struct StageCommon {
    re_ac: Scalar,
    rc_eff: Scalar,
    rb_parallel: Scalar,
    output_division: Scalar,
    beta: Scalar,
    cin: Capacitor,
    cout: Capacitor,
    bypass_cap: Capacitor,
}

impl StageCommon {
    fn new(params: &CircuitParameters, bias: &BiasPoint) -> Result<Self> {
        let re_ac = VT / checked_denominator(bias.ie, "emitter current")?;
        let load_sum = checked_denominator(params.rc + params.rl, "RC + RL")?;
        Ok(Self {
            re_ac,
            rc_eff: parallel(params.rc, params.rl)?,
            rb_parallel: parallel(params.rb1, params.rb2)?,
            output_division: params.rc / load_sum,
            beta: params.beta,
            cin: Capacitor::new("Cin", params.cin),
            cout: Capacitor::new("Cout", params.cout),
            bypass_cap: Capacitor::new("Cbypass", params.c_bypass),
        })
    }

    /// Input coupling corner and response for input resistance `rin`.
    fn input_coupling(&self, frequency: Scalar, rin: Scalar) -> Result<(Scalar, Scalar)> {
        let rin = checked_denominator(rin, "input resistance")?;
        let cin = self.cin.capacitance();
        if !cin.is_finite() || cin <= 0.0 {
            return Err(AmpError::Domain(format!("input coupling capacitor {cin} F")));
        }
        let fc_in = 1.0 / (2.0 * PI * rin * cin);
        Ok((fc_in, high_pass_response(frequency / fc_in)))
    }
}

fn check_frequency(frequency: Scalar) -> Result<Scalar> {
    if !frequency.is_finite() || frequency < 0.0 {
        return Err(AmpError::Domain(format!("invalid frequency {frequency} Hz")));
    }
    Ok(frequency)
}

/// Common-emitter stage with RE bypassed by CE.
#[derive(Debug, Clone)]
pub struct CommonEmitterStage {
    common: StageCommon,
    emitter: ParallelNetwork,
}

impl CommonEmitterStage {
    /// Prepares the model for a solved operating point.
    pub fn new(params: &CircuitParameters, bias: &BiasPoint) -> Result<Self> {
        let common = StageCommon::new(params, bias)?;
        let emitter = ParallelNetwork::new()
            .with_component(Resistor::new("RE", params.re))
            .with_component(common.bypass_cap.clone());
        Ok(Self { common, emitter })
    }
}

impl SmallSignalModel for CommonEmitterStage {
    fn configuration(&self) -> Configuration {
        Configuration::CommonEmitter
    }

    fn breakdown(&self, frequency: Scalar) -> Result<PointBreakdown> {
        let frequency = check_frequency(frequency)?;
        let omega = angular_frequency(frequency);
        let c = &self.common;

        let ze_eff = self.emitter.impedance_magnitude(omega);
        let emitter_path = checked_denominator(c.re_ac + ze_eff, "re + Ze")?;
        let rin_base = c.beta * emitter_path;
        let rin = parallel(c.rb_parallel, rin_base)?;
        let (fc_in, cin_response) = c.input_coupling(frequency, rin)?;

        let av_base = c.rc_eff / emitter_path;
        let av = av_base * cin_response;

        let input_division = rin_base / checked_denominator(c.rb_parallel + rin_base, "Rb + Rin_base")?;
        let ai = c.beta * input_division * c.output_division * cin_response;

        Ok(PointBreakdown {
            frequency,
            re_ac: c.re_ac,
            rc_eff: c.rc_eff,
            rb_parallel: c.rb_parallel,
            zc_in: c.cin.reactance(omega),
            zc_out: c.cout.reactance(omega),
            zc_bypass: c.bypass_cap.reactance(omega),
            z_bypassed: ze_eff,
            z_device: rin_base,
            rin,
            fc_in,
            cin_response,
            av_base,
            input_division,
            output_division: c.output_division,
            av,
            ai,
            ap: av * ai,
        })
    }
}

/// Common-base stage with the base divider bypassed by CB.
#[derive(Debug, Clone)]
pub struct CommonBaseStage {
    common: StageCommon,
    base: ParallelNetwork,
    re: Scalar,
}

impl CommonBaseStage {
    /// Prepares the model for a solved operating point.
    pub fn new(params: &CircuitParameters, bias: &BiasPoint) -> Result<Self> {
        let common = StageCommon::new(params, bias)?;
        let base = ParallelNetwork::new()
            .with_component(Resistor::new("RB", common.rb_parallel))
            .with_component(common.bypass_cap.clone());
        Ok(Self {
            common,
            base,
            re: params.re,
        })
    }

    fn alpha(&self) -> Scalar {
        self.common.beta / (self.common.beta + 1.0)
    }
}

impl SmallSignalModel for CommonBaseStage {
    fn configuration(&self) -> Configuration {
        Configuration::CommonBase
    }

    fn breakdown(&self, frequency: Scalar) -> Result<PointBreakdown> {
        let frequency = check_frequency(frequency)?;
        let omega = angular_frequency(frequency);
        let c = &self.common;

        let zb_eff = self.base.impedance_magnitude(omega);
        let zin_emitter = checked_denominator(
            c.re_ac + zb_eff / (c.beta + 1.0),
            "emitter input impedance",
        )?;
        let rin = parallel(self.re, zin_emitter)?;
        let (fc_in, cin_response) = c.input_coupling(frequency, rin)?;

        let av_base = c.rc_eff / zin_emitter;
        let av = av_base * cin_response;

        let input_division = self.re / checked_denominator(self.re + zin_emitter, "RE + Zin")?;
        let ai = self.alpha() * input_division * c.output_division * cin_response;

        Ok(PointBreakdown {
            frequency,
            re_ac: c.re_ac,
            rc_eff: c.rc_eff,
            rb_parallel: c.rb_parallel,
            zc_in: c.cin.reactance(omega),
            zc_out: c.cout.reactance(omega),
            zc_bypass: c.bypass_cap.reactance(omega),
            z_bypassed: zb_eff,
            z_device: zin_emitter,
            rin,
            fc_in,
            cin_response,
            av_base,
            input_division,
            output_division: c.output_division,
            av,
            ai,
            ap: av * ai,
        })
    }
}

/// Gain curves aligned with a frequency grid.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrequencyResponse {
    /// Frequency axis (Hz).
    pub frequencies: Vec<Scalar>,
    /// Voltage gain (dB) per frequency.
    pub av_db: Vec<Scalar>,
    /// Current gain (dB) per frequency.
    pub ai_db: Vec<Scalar>,
    /// Power gain (dB) per frequency.
    pub ap_db: Vec<Scalar>,
    /// Number of points holding at least one floored value.
    pub floored_points: usize,
}

impl FrequencyResponse {
    /// Number of frequency points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// True when the response holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Iterates points in grid order.
    pub fn points(&self) -> impl Iterator<Item = GainPoint> + '_ {
        (0..self.len()).map(move |i| {
            let (av_db, ai_db, ap_db) = (self.av_db[i], self.ai_db[i], self.ap_db[i]);
            GainPoint {
                frequency: self.frequencies[i],
                av_db,
                ai_db,
                ap_db,
                floored: av_db == DB_FLOOR || ai_db == DB_FLOOR || ap_db == DB_FLOOR,
            }
        })
    }

    /// Highest voltage gain on the grid and its frequency.
    #[must_use]
    pub fn peak_voltage_gain(&self) -> Option<(Scalar, Scalar)> {
        self.frequencies
            .iter()
            .zip(&self.av_db)
            .fold(None, |best: Option<(Scalar, Scalar)>, (&f, &g)| match best {
                Some((_, b)) if b >= g => best,
                _ => Some((f, g)),
            })
    }

    /// Lowest grid frequency at which the voltage gain is within 3 dB of its
    /// peak, i.e. the lower −3 dB corner resolved to the grid.
    #[must_use]
    pub fn lower_corner(&self) -> Option<Scalar> {
        let (_, peak) = self.peak_voltage_gain()?;
        self.frequencies
            .iter()
            .zip(&self.av_db)
            .find(|(_, g)| **g >= peak - 3.0)
            .map(|(&f, _)| f)
    }
}

/// Sweeps a [`SmallSignalModel`] built from a parameter set and its bias point.
pub struct FrequencyResponseEvaluator {
    model: Box<dyn SmallSignalModel>,
}

impl FrequencyResponseEvaluator {
    /// Selects the model matching `params.configuration`.
    pub fn new(params: &CircuitParameters, bias: &BiasPoint) -> Result<Self> {
        let model: Box<dyn SmallSignalModel> = match params.configuration {
            Configuration::CommonEmitter => Box::new(CommonEmitterStage::new(params, bias)?),
            Configuration::CommonBase => Box::new(CommonBaseStage::new(params, bias)?),
        };
        Ok(Self { model })
    }

    /// Wraps an explicit model.
    #[must_use]
    pub fn from_model(model: Box<dyn SmallSignalModel>) -> Self {
        Self { model }
    }

    /// Underlying model.
    #[must_use]
    pub fn model(&self) -> &dyn SmallSignalModel {
        self.model.as_ref()
    }

    /// Full breakdown at one frequency.
    pub fn breakdown(&self, frequency: Scalar) -> Result<PointBreakdown> {
        self.model.breakdown(frequency)
    }

    /// Gains at one frequency. Failures are recovered as a floored point.
    #[must_use]
    pub fn gain_at(&self, frequency: Scalar) -> GainPoint {
        match self.model.breakdown(frequency) {
            Ok(b) => b.gains(),
            Err(err) => {
                log::trace!("floored point at {frequency} Hz: {err}");
                GainPoint::floor(frequency)
            }
        }
    }

    /// Evaluates every grid frequency.
    #[must_use]
    pub fn sweep(&self, grid: &FrequencyGrid, parallel: &ParallelConfig) -> FrequencyResponse {
        let points = sweep_map_with(grid.as_slice(), parallel, |f| self.gain_at(f));

        let mut response = FrequencyResponse {
            frequencies: Vec::with_capacity(points.len()),
            av_db: Vec::with_capacity(points.len()),
            ai_db: Vec::with_capacity(points.len()),
            ap_db: Vec::with_capacity(points.len()),
            floored_points: 0,
        };
        for p in points {
            response.frequencies.push(p.frequency);
            response.av_db.push(p.av_db);
            response.ai_db.push(p.ai_db);
            response.ap_db.push(p.ap_db);
            response.floored_points += usize::from(p.floored);
        }
        if response.floored_points > 0 {
            log::debug!(
                "{} of {} sweep points fell back to {DB_FLOOR} dB",
                response.floored_points,
                response.len()
            );
        }
        response
    }
}

impl std::fmt::Debug for FrequencyResponseEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrequencyResponseEvaluator")
            .field("configuration", &self.model.configuration())
            .finish()
    }
}
