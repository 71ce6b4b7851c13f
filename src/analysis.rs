//! One-shot amplifier analysis: operating point, gain curves, and a detailed
//! breakdown at a selected frequency.
//!
//! Every call starts from a fresh [`CircuitParameters`] snapshot and keeps no
//! state between calls; an interactive front end re-runs [`analyze`] on each
//! control change.

use crate::circuits::bias::{solve_bias, BiasPoint};
use crate::circuits::parameters::CircuitParameters;
use crate::circuits::response::{FrequencyResponse, FrequencyResponseEvaluator, PointBreakdown};
use crate::constants::{
    DEFAULT_SELECTED_FREQUENCY_HZ, DEFAULT_SWEEP_POINTS, DEFAULT_SWEEP_START_HZ,
    DEFAULT_SWEEP_STOP_HZ,
};
use crate::errors::{AmpError, Result};
use crate::math::Scalar;
use crate::sweep::{FrequencyGrid, ParallelConfig};

/// Sweep and breakdown settings.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    /// Lowest swept frequency (Hz).
    pub start_hz: Scalar,
    /// Highest swept frequency (Hz).
    pub stop_hz: Scalar,
    /// Number of log-spaced sweep points.
    pub points: usize,
    /// Frequency of the detailed breakdown (Hz).
    pub selected_hz: Scalar,
    /// Sweep parallelism.
    pub parallel: ParallelConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            start_hz: DEFAULT_SWEEP_START_HZ,
            stop_hz: DEFAULT_SWEEP_STOP_HZ,
            points: DEFAULT_SWEEP_POINTS,
            selected_hz: DEFAULT_SELECTED_FREQUENCY_HZ,
            parallel: ParallelConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Sets the sweep bounds and resolution.
    #[must_use]
    pub fn with_sweep(mut self, start_hz: Scalar, stop_hz: Scalar, points: usize) -> Self {
        self.start_hz = start_hz;
        self.stop_hz = stop_hz;
        self.points = points;
        self
    }

    /// Sets the breakdown frequency directly.
    #[must_use]
    pub fn with_selected_hz(mut self, selected_hz: Scalar) -> Self {
        self.selected_hz = selected_hz;
        self
    }

    /// Sets the breakdown frequency from a decade position, `10^exponent`,
    /// limited to the swept decades. Invalid sweep bounds leave the exponent
    /// unclamped; [`AnalysisConfig::validate`] reports them.
    #[must_use]
    pub fn with_selected_exponent(mut self, exponent: Scalar) -> Self {
        let a = self.start_hz.log10();
        let b = self.stop_hz.log10();
        let exponent = if a.is_finite() && b.is_finite() {
            let (lo, hi) = (a.min(b), a.max(b));
            if exponent.is_nan() {
                lo
            } else {
                exponent.max(lo).min(hi)
            }
        } else {
            exponent
        };
        self.selected_hz = 10f64.powf(exponent);
        self
    }

    /// Sets sweep parallelism.
    #[must_use]
    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks the sweep bounds and selected frequency.
    pub fn validate(&self) -> Result<()> {
        if !(self.start_hz > 0.0) || !self.stop_hz.is_finite() || self.stop_hz < self.start_hz {
            return Err(AmpError::Domain(format!(
                "sweep must satisfy 0 < start <= stop, got [{}, {}] Hz",
                self.start_hz, self.stop_hz
            )));
        }
        if self.points == 0 {
            return Err(AmpError::Domain("sweep needs at least one point".into()));
        }
        if !self.selected_hz.is_finite() || self.selected_hz < 0.0 {
            return Err(AmpError::Domain(format!(
                "selected frequency {} Hz is invalid",
                self.selected_hz
            )));
        }
        Ok(())
    }

    /// Builds the sweep grid.
    pub fn grid(&self) -> Result<FrequencyGrid> {
        self.validate()?;
        FrequencyGrid::log(self.start_hz, self.stop_hz, self.points)
    }
}

/// Everything a front end needs to redraw after one control change.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct AmplifierAnalysis {
    /// Parameters the analysis was run with.
    pub parameters: CircuitParameters,
    /// DC operating point.
    pub bias: BiasPoint,
    /// Gain curves over the configured grid.
    pub response: FrequencyResponse,
    /// Intermediate values at the selected frequency.
    pub selected: PointBreakdown,
}

/// Runs the full pipeline: validate, bias, sweep, breakdown.
///
/// A non-physical or degenerate operating point aborts the analysis. Single
/// sweep points that cannot be converted to dB are floored instead.
pub fn analyze(params: &CircuitParameters, config: &AnalysisConfig) -> Result<AmplifierAnalysis> {
    params.validate()?;
    let grid = config.grid()?;

    let bias = solve_bias(params)?;
    log::debug!(
        "{:?} bias: IC = {:.3} mA, VCE = {:.2} V",
        params.configuration,
        bias.ic * 1.0e3,
        bias.vce
    );

    let evaluator = FrequencyResponseEvaluator::new(params, &bias)?;
    let response = evaluator.sweep(&grid, &config.parallel);
    if response.floored_points == response.len() {
        log::warn!("every sweep point is below the dB floor");
    }
    let selected = evaluator.breakdown(config.selected_hz)?;

    Ok(AmplifierAnalysis {
        parameters: *params,
        bias,
        response,
        selected,
    })
}
