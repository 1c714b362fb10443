//! Summary Statistics
//!
//! Robust per-metric summary: count, mean, median and quartiles. Unlike
//! timing benchmarks, load-test artifacts are already aggregates, so no
//! outlier trimming is applied: every observation counts.

use crate::percentiles::{compute_quantile_sorted, sort_samples};

/// Summary statistics of one sample population
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStatistics {
    pub sample_count: usize,
    pub mean: f64,
    pub median: f64,
    /// 25th percentile
    pub q1: f64,
    /// 75th percentile
    pub q3: f64,
}

impl SummaryStatistics {
    /// Interquartile range `q3 - q1`
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Compute summary statistics; empty input yields all zeros
pub fn compute_summary(samples: &[f64]) -> SummaryStatistics {
    if samples.is_empty() {
        return SummaryStatistics {
            sample_count: 0,
            mean: 0.0,
            median: 0.0,
            q1: 0.0,
            q3: 0.0,
        };
    }

    let mut sorted = samples.to_vec();
    sort_samples(&mut sorted);

    SummaryStatistics {
        sample_count: sorted.len(),
        mean: running_mean(&sorted),
        median: compute_quantile_sorted(&sorted, 0.5),
        q1: compute_quantile_sorted(&sorted, 0.25),
        q3: compute_quantile_sorted(&sorted, 0.75),
    }
}

/// Incremental mean; stays finite for finite inputs near `f64::MAX`
fn running_mean(samples: &[f64]) -> f64 {
    samples
        .iter()
        .enumerate()
        .fold(0.0, |acc, (i, x)| acc + (x - acc) / (i + 1) as f64)
}
