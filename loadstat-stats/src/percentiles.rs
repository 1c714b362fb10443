//! Percentile Computation
//!
//! Linear interpolation between order statistics (the "linear" method):
//! the fractional rank of quantile `q` is `(n - 1) * q`, and the result is
//! interpolated between the floor and ceiling order statistics.

use std::cmp::Ordering;

/// Compute a single quantile from unsorted samples
///
/// `q` is a fraction in `[0, 1]` (0.5 is the median). Empty input yields
/// `0.0`, a single sample yields that sample.
///
/// # Examples
///
/// ```
/// # use loadstat_stats::compute_quantile;
/// let samples = vec![4.0, 1.0, 3.0, 2.0];
/// assert_eq!(compute_quantile(&samples, 0.5), 2.5);
/// assert_eq!(compute_quantile(&samples, 0.25), 1.75);
/// ```
pub fn compute_quantile(samples: &[f64], q: f64) -> f64 {
    if samples.len() < 2 {
        return samples.first().copied().unwrap_or(0.0);
    }

    let mut sorted = samples.to_vec();
    sort_samples(&mut sorted);
    compute_quantile_sorted(&sorted, q)
}

/// Compute a quantile from samples that are already sorted ascending
///
/// Skips the copy and sort; used on hot paths such as bootstrap resampling.
pub fn compute_quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = (n - 1) as f64 * q.clamp(0.0, 1.0);
            let lower_idx = rank.floor() as usize;
            let upper_idx = rank.ceil() as usize;
            if lower_idx == upper_idx {
                return sorted[lower_idx];
            }
            let fraction = rank - lower_idx as f64;
            sorted[lower_idx] * (1.0 - fraction) + sorted[upper_idx] * fraction
        }
    }
}

/// Conventional median: middle element, or mean of the two middle elements
pub fn compute_median(samples: &[f64]) -> f64 {
    compute_quantile(samples, 0.5)
}

/// Sort samples ascending; incomparable values keep their relative order
pub(crate) fn sort_samples(samples: &mut [f64]) {
    samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
}
