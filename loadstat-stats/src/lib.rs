#![warn(missing_docs)]
//! LoadStat Statistical Engine
//!
//! Pure, deterministic statistics over sequences of floats:
//! - Linear-interpolation percentiles and robust summaries (median, IQR)
//! - Seeded percentile-bootstrap confidence interval for the median
//! - Tie-corrected two-sided Mann-Whitney U test
//! - Cliff's delta with its qualitative effect-size bucket
//!
//! No function here performs I/O or touches global state; randomness is
//! always supplied by the caller as an explicit generator or seed.

mod bootstrap;
mod comparison;
mod effect;
mod percentiles;
mod ranksum;
mod summary;

pub use bootstrap::{
    BootstrapConfig, BootstrapError, ConfidenceInterval, bootstrap_median_ci,
    bootstrap_median_ci_seeded,
};
pub use comparison::{ComparisonResult, compare_distributions};
pub use effect::{EffectInterpretation, cliffs_delta};
pub use percentiles::{compute_median, compute_quantile, compute_quantile_sorted};
pub use ranksum::{MannWhitneyResult, mann_whitney_u};
pub use summary::{SummaryStatistics, compute_summary};

/// Default number of bootstrap resamples
pub const DEFAULT_BOOTSTRAP_ROUNDS: usize = 5_000;

/// Default confidence level (95%)
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Default bootstrap seed
pub const DEFAULT_SEED: u64 = 42;
