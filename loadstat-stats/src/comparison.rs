//! Baseline Comparison
//!
//! Combines the rank-sum test and Cliff's delta into one comparison of a
//! current sample against a baseline sample.

use crate::effect::{EffectInterpretation, cliffs_delta};
use crate::ranksum::mann_whitney_u;

/// Result of comparing a current sample against its baseline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonResult {
    /// Mann-Whitney U statistic
    pub mann_whitney_u: f64,
    /// Two-sided p-value
    pub p_value: f64,
    /// Cliff's delta of current vs baseline (positive: current tends larger)
    pub cliffs_delta: f64,
    /// Magnitude bucket of `cliffs_delta`
    pub effect: EffectInterpretation,
}

/// Compare `current` against `baseline`
///
/// Returns `None` when the baseline has no observations, so callers can
/// report the comparison as absent rather than as a sentinel value.
pub fn compare_distributions(current: &[f64], baseline: &[f64]) -> Option<ComparisonResult> {
    if baseline.is_empty() {
        return None;
    }

    let test = mann_whitney_u(current, baseline);
    let delta = cliffs_delta(current, baseline);

    Some(ComparisonResult {
        mann_whitney_u: test.u,
        p_value: test.p_value,
        cliffs_delta: delta,
        effect: EffectInterpretation::from_delta(delta),
    })
}
