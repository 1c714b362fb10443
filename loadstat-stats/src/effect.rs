//! Cliff's Delta
//!
//! Nonparametric effect size: the probability that a value from one sample
//! exceeds a value from the other, minus the reverse.

use std::cmp::Ordering;
use std::fmt;

/// Magnitude classification of a Cliff's delta value
///
/// Thresholds follow the commonly cited convention (Romano et al.):
/// `|δ| < 0.147` negligible, `< 0.33` small, `< 0.474` medium, else large.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectInterpretation {
    /// |δ| < 0.147
    Negligible,
    /// 0.147 <= |δ| < 0.33
    Small,
    /// 0.33 <= |δ| < 0.474
    Medium,
    /// |δ| >= 0.474
    Large,
}

impl EffectInterpretation {
    /// Upper bound (exclusive) of |δ| for a negligible effect
    pub const NEGLIGIBLE_BELOW: f64 = 0.147;
    /// Upper bound (exclusive) of |δ| for a small effect
    pub const SMALL_BELOW: f64 = 0.33;
    /// Upper bound (exclusive) of |δ| for a medium effect
    pub const MEDIUM_BELOW: f64 = 0.474;

    /// Bucket a delta value by its magnitude
    pub fn from_delta(delta: f64) -> Self {
        let magnitude = delta.abs();
        if magnitude < Self::NEGLIGIBLE_BELOW {
            EffectInterpretation::Negligible
        } else if magnitude < Self::SMALL_BELOW {
            EffectInterpretation::Small
        } else if magnitude < Self::MEDIUM_BELOW {
            EffectInterpretation::Medium
        } else {
            EffectInterpretation::Large
        }
    }

    /// Lowercase label used in reports
    pub fn as_str(self) -> &'static str {
        match self {
            EffectInterpretation::Negligible => "negligible",
            EffectInterpretation::Small => "small",
            EffectInterpretation::Medium => "medium",
            EffectInterpretation::Large => "large",
        }
    }
}

impl fmt::Display for EffectInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cliff's delta between `x` and `y`
///
/// `(#{xi > yj} - #{xi < yj}) / (|x| * |y|)`, in `[-1, 1]`. Ties count toward
/// neither side. Returns `0.0` if either sample is empty.
pub fn cliffs_delta(x: &[f64], y: &[f64]) -> f64 {
    if x.is_empty() || y.is_empty() {
        return 0.0;
    }

    let (mut greater, mut less) = (0_u64, 0_u64);
    for xv in x {
        for yv in y {
            match xv.partial_cmp(yv) {
                Some(Ordering::Greater) => greater += 1,
                Some(Ordering::Less) => less += 1,
                _ => {}
            }
        }
    }

    (greater as f64 - less as f64) / (x.len() as f64 * y.len() as f64)
}
