//! Bootstrap Resampling
//!
//! Percentile bootstrap confidence interval for the median. Resamples are
//! drawn from an explicit, caller-supplied generator so the same input and
//! seed always reproduce the same interval.

use crate::percentiles::{compute_quantile_sorted, sort_samples};
use crate::{DEFAULT_BOOTSTRAP_ROUNDS, DEFAULT_CONFIDENCE_LEVEL};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Bootstrap configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BootstrapConfig {
    /// Number of resamples to draw (default: 5,000)
    pub rounds: usize,
    /// Confidence level (default: 0.95 for 95% CI)
    pub confidence_level: f64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_BOOTSTRAP_ROUNDS,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
        }
    }
}

impl BootstrapConfig {
    /// Check that the configuration describes a usable bootstrap
    pub fn validate(&self) -> Result<(), BootstrapError> {
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(BootstrapError::InvalidConfidenceLevel(
                self.confidence_level,
            ));
        }
        if self.rounds == 0 {
            return Err(BootstrapError::NoRounds);
        }
        Ok(())
    }
}

/// Confidence interval bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    pub level: f64,
}

impl ConfidenceInterval {
    fn point(value: f64, level: f64) -> Self {
        Self {
            lower: value,
            upper: value,
            level,
        }
    }

    /// Whether `value` lies inside the closed interval
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Errors that can occur during bootstrap
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BootstrapError {
    #[error("Invalid confidence level: {0} (must be between 0 and 1)")]
    InvalidConfidenceLevel(f64),

    #[error("Bootstrap needs at least one resampling round")]
    NoRounds,
}

/// Compute a bootstrap confidence interval for the median
///
/// Draws `config.rounds` resamples of size `n` with replacement from `rng`,
/// takes the median of each, and returns the `alpha/2` and `1 - alpha/2`
/// quantiles of the sorted medians. Empty input yields `(0, 0)`; a single
/// sample yields `(x, x)` without consuming any randomness.
pub fn bootstrap_median_ci<R: Rng + ?Sized>(
    samples: &[f64],
    config: &BootstrapConfig,
    rng: &mut R,
) -> Result<ConfidenceInterval, BootstrapError> {
    config.validate()?;

    match samples {
        [] => return Ok(ConfidenceInterval::point(0.0, config.confidence_level)),
        [only] => return Ok(ConfidenceInterval::point(*only, config.confidence_level)),
        _ => {}
    }

    let mut medians = resample_medians(samples, config.rounds, rng);
    sort_samples(&mut medians);

    let alpha = 1.0 - config.confidence_level;
    Ok(ConfidenceInterval {
        lower: compute_quantile_sorted(&medians, alpha / 2.0),
        upper: compute_quantile_sorted(&medians, 1.0 - alpha / 2.0),
        level: config.confidence_level,
    })
}

/// Same as [`bootstrap_median_ci`] with a fresh `StdRng` seeded from `seed`
pub fn bootstrap_median_ci_seeded(
    samples: &[f64],
    config: &BootstrapConfig,
    seed: u64,
) -> Result<ConfidenceInterval, BootstrapError> {
    let mut rng = StdRng::seed_from_u64(seed);
    bootstrap_median_ci(samples, config, &mut rng)
}

/// Median of each of `rounds` resamples, in draw order
fn resample_medians<R: Rng + ?Sized>(samples: &[f64], rounds: usize, rng: &mut R) -> Vec<f64> {
    let n = samples.len();
    let mut resample = Vec::with_capacity(n);
    (0..rounds)
        .map(|_| {
            resample.clear();
            resample.extend((0..n).map(|_| samples[rng.gen_range(0..n)]));
            sort_samples(&mut resample);
            compute_quantile_sorted(&resample, 0.5)
        })
        .collect()
}
