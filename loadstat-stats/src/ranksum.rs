//! Mann-Whitney U Test
//!
//! Two-sided rank-sum test using the normal approximation with tie
//! correction and a 0.5 continuity correction. Ties receive average ranks.

use std::cmp::Ordering;

/// Result of a Mann-Whitney U test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MannWhitneyResult {
    /// `min(U1, n1*n2 - U1)`
    pub u: f64,
    /// Two-sided p-value, clamped to `[0, 1]`
    pub p_value: f64,
}

impl MannWhitneyResult {
    const NO_EVIDENCE: Self = Self {
        u: 0.0,
        p_value: 1.0,
    };
}

/// Run a two-sided Mann-Whitney U test between `x` and `y`
///
/// `U1 = R1 - n1(n1+1)/2` where `R1` is the rank sum of `x` in the pooled
/// sample. The variance is tie corrected:
/// `σ² = (n1*n2/12) * ((n+1) - Σ(c³-c) / (n(n-1)))`.
///
/// Either sample empty gives `U = 0, p = 1`. A non-positive variance (every
/// pooled value identical) reports the computed `U` with `p = 1`.
pub fn mann_whitney_u(x: &[f64], y: &[f64]) -> MannWhitneyResult {
    if x.is_empty() || y.is_empty() {
        return MannWhitneyResult::NO_EVIDENCE;
    }

    let n1 = x.len() as f64;
    let n2 = y.len() as f64;
    let pooled: Vec<f64> = x.iter().chain(y).copied().collect();
    let RankedSample { ranks, tie_term } = rank_with_ties(&pooled);

    let r1: f64 = ranks[..x.len()].iter().sum();
    let u1 = r1 - n1 * (n1 + 1.0) / 2.0;
    let u = u1.min(n1 * n2 - u1);

    let n = n1 + n2;
    let denom = n * (n - 1.0);
    if denom <= 0.0 {
        return MannWhitneyResult { u, p_value: 1.0 };
    }
    let sigma_sq = (n1 * n2 / 12.0) * ((n + 1.0) - tie_term / denom);
    if sigma_sq <= 0.0 {
        return MannWhitneyResult { u, p_value: 1.0 };
    }

    let sigma = sigma_sq.sqrt();
    let mu = n1 * n2 / 2.0;
    // Continuity correction toward the mean
    let z = if u > mu {
        (u - mu - 0.5) / sigma
    } else {
        (u - mu + 0.5) / sigma
    };

    let p_value = 2.0 * (1.0 - normal_cdf(z.abs()));
    MannWhitneyResult {
        u,
        p_value: p_value.clamp(0.0, 1.0),
    }
}

/// 1-based average ranks in input order, plus `Σ(c³ - c)` over tie groups
struct RankedSample {
    ranks: Vec<f64>,
    tie_term: f64,
}

fn rank_with_ties(values: &[f64]) -> RankedSample {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(Ordering::Equal)
    });

    let mut ranks = vec![0.0; values.len()];
    let mut tie_term = 0.0;
    let mut i = 0;
    while i < order.len() {
        let mut j = i + 1;
        while j < order.len() && values[order[j]] == values[order[i]] {
            j += 1;
        }

        // Positions i..j hold ranks (i+1)..=j
        let avg_rank = (i + 1 + j) as f64 / 2.0;
        for &idx in &order[i..j] {
            ranks[idx] = avg_rank;
        }

        let c = (j - i) as f64;
        tie_term += c * c * c - c;
        i = j;
    }

    RankedSample { ranks, tie_term }
}

/// Standard normal CDF
fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

/// Error function approximation
fn erf(x: f64) -> f64 {
    // Abramowitz and Stegun approximation (7.1.26)
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let sign = if x >= 0.0 { 1.0 } else { -1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();

    sign * y
}
