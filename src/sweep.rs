//! Sweep axes and the map that evaluates a function across them.
//!
//! Sweep points are independent, so evaluation may run on a rayon pool when
//! the `parallel` feature is enabled. Output order always follows input order.

use crate::errors::{AmpError, Result};
use crate::math::Scalar;

/// Generates `n` linearly spaced samples in [start, stop].
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n).map(|i| start + step * i as Scalar).collect()
        }
    }
}

/// Generates `n` logarithmically spaced samples between `start` and `stop`.
/// Both endpoints must be positive and finite.
pub fn logspace(start: Scalar, stop: Scalar, n: usize) -> Result<Vec<Scalar>> {
    if !(start > 0.0 && stop > 0.0) || !start.is_finite() || !stop.is_finite() {
        return Err(AmpError::Domain(format!(
            "log-spaced axis needs positive finite endpoints, got [{start}, {stop}]"
        )));
    }
    let grid = match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let log_start = start.log10();
            let log_stop = stop.log10();
            let step = (log_stop - log_start) / (n as Scalar - 1.0);
            let mut values: Vec<Scalar> = (0..n)
                .map(|i| 10f64.powf(log_start + step * i as Scalar))
                .collect();
            // Pin the endpoints so callers see exactly what they asked for.
            values[0] = start;
            values[n - 1] = stop;
            values
        }
    };
    Ok(grid)
}

/// Read-only log-spaced frequency axis in hertz.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyGrid {
    hz: Vec<Scalar>,
}

impl FrequencyGrid {
    /// Builds a log-spaced grid of `points` frequencies from `start_hz` to `stop_hz`.
    pub fn log(start_hz: Scalar, stop_hz: Scalar, points: usize) -> Result<Self> {
        if points == 0 {
            return Err(AmpError::Domain("frequency grid needs at least one point".into()));
        }
        if stop_hz < start_hz {
            return Err(AmpError::Domain(format!(
                "frequency grid stop {stop_hz} Hz is below start {start_hz} Hz"
            )));
        }
        Ok(Self {
            hz: logspace(start_hz, stop_hz, points)?,
        })
    }

    /// Wraps explicit frequencies. They must be finite and non-negative;
    /// 0 Hz is accepted as the DC limit.
    pub fn from_hz(hz: Vec<Scalar>) -> Result<Self> {
        if let Some(bad) = hz.iter().find(|f| !f.is_finite() || **f < 0.0) {
            return Err(AmpError::Domain(format!("invalid grid frequency {bad}")));
        }
        Ok(Self { hz })
    }

    /// Frequencies in hertz.
    #[must_use]
    pub fn as_slice(&self) -> &[Scalar] {
        &self.hz
    }

    /// Number of grid points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hz.len()
    }

    /// True when the grid holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hz.is_empty()
    }
}

/// Controls whether sweeps fan out over a thread pool.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Allow parallel evaluation when the `parallel` feature is compiled in.
    pub enabled: bool,
    /// Minimum points to use parallel execution (below this, sequential is faster).
    pub min_points_for_parallel: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_points_for_parallel: 256,
        }
    }
}

impl ParallelConfig {
    /// Always evaluate sequentially.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Sets the minimum point count for parallel execution.
    #[must_use]
    pub fn with_min_parallel(mut self, min: usize) -> Self {
        self.min_points_for_parallel = min;
        self
    }
}

/// Applies `f` to each input and collects results in input order.
#[must_use]
pub fn sweep_map<I, F, T>(inputs: I, mut f: F) -> Vec<T>
where
    I: IntoIterator<Item = Scalar>,
    F: FnMut(Scalar) -> T,
{
    inputs.into_iter().map(|x| f(x)).collect()
}

/// Like [`sweep_map`], but may evaluate on the rayon pool.
#[cfg(feature = "parallel")]
#[must_use]
pub fn sweep_map_with<F, T>(inputs: &[Scalar], config: &ParallelConfig, f: F) -> Vec<T>
where
    F: Fn(Scalar) -> T + Send + Sync,
    T: Send,
{
    use rayon::prelude::*;

    let use_parallel = config.enabled
        && inputs.len() >= config.min_points_for_parallel
        && rayon::current_num_threads() > 1;
    if use_parallel {
        log::debug!(
            "parallel sweep: {} points on {} threads",
            inputs.len(),
            rayon::current_num_threads()
        );
        inputs.par_iter().map(|&x| f(x)).collect()
    } else {
        sweep_map(inputs.iter().copied(), f)
    }
}

/// Like [`sweep_map`]; sequential because the `parallel` feature is off.
#[cfg(not(feature = "parallel"))]
#[must_use]
pub fn sweep_map_with<F, T>(inputs: &[Scalar], _config: &ParallelConfig, f: F) -> Vec<T>
where
    F: Fn(Scalar) -> T + Send + Sync,
    T: Send,
{
    sweep_map(inputs.iter().copied(), f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linspace_basic() {
        let v = linspace(0.0, 1.0, 5);
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn log_grid_covers_decades() {
        let grid = FrequencyGrid::log(1.0, 1.0e6, 7).unwrap();
        let expected = [1.0, 1.0e1, 1.0e2, 1.0e3, 1.0e4, 1.0e5, 1.0e6];
        for (got, want) in grid.as_slice().iter().zip(expected) {
            assert_relative_eq!(*got, want, max_relative = 1.0e-12);
        }
        assert_eq!(grid.len(), 7);
    }

    #[test]
    fn log_grid_rejects_bad_bounds() {
        assert!(FrequencyGrid::log(0.0, 1.0e3, 10).is_err());
        assert!(FrequencyGrid::log(1.0e3, 1.0, 10).is_err());
        assert!(FrequencyGrid::log(1.0, 1.0e3, 0).is_err());
        assert!(FrequencyGrid::from_hz(vec![1.0, -2.0]).is_err());
        assert!(FrequencyGrid::from_hz(vec![0.0, 1.0]).is_ok());
    }

    #[test]
    fn sweep_map_runs_function() {
        let out = sweep_map(vec![1.0, 2.0, 3.0], |w| w * 2.0);
        assert_eq!(out, vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn sweep_map_with_preserves_order() {
        let inputs = linspace(0.0, 999.0, 1000);
        let config = ParallelConfig::default().with_min_parallel(1);
        let out = sweep_map_with(&inputs, &config, |x| x * x);
        let expected: Vec<Scalar> = inputs.iter().map(|x| x * x).collect();
        assert_eq!(out, expected);
    }
}
