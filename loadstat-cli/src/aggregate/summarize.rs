//! Per-Key Statistics
//!
//! Computes one [`SummaryRow`] per metric key of the current store. Keys
//! are processed in parallel with Rayon; each key draws its bootstrap
//! resamples from its own generator so rows do not depend on scheduling.

use loadstat_core::{MetricKey, MetricStore};
use loadstat_report::{BaselineComparison, Methodology, SummaryRow};
use loadstat_stats::{
    BootstrapConfig, BootstrapError, bootstrap_median_ci_seeded, compare_distributions,
    compute_summary,
};
use rayon::prelude::*;

/// Statistical parameters shared by every row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregationConfig {
    pub bootstrap: BootstrapConfig,
    pub seed: u64,
}

impl AggregationConfig {
    /// Parameters as recorded in the report
    pub fn methodology(&self) -> Methodology {
        Methodology {
            bootstrap_rounds: self.bootstrap.rounds,
            confidence_level: self.bootstrap.confidence_level,
            seed: self.seed,
        }
    }
}

/// Bootstrap seed for `key`, derived from the configured base seed
pub fn derive_seed(seed: u64, key: &MetricKey) -> u64 {
    seed ^ key.stable_hash()
}

/// Summarize every key of `current`, ordered by key
///
/// With a baseline store, each row also carries the baseline sample count
/// and, when the baseline has observations for the key, the rank-sum test
/// and Cliff's delta of current against baseline. Keys present only in the
/// baseline produce no row.
pub fn build_rows(
    current: &MetricStore,
    baseline: Option<&MetricStore>,
    config: &AggregationConfig,
) -> Result<Vec<SummaryRow>, BootstrapError> {
    config.bootstrap.validate()?;

    let keys: Vec<(&MetricKey, &[f64])> = current.iter().collect();
    keys.par_iter()
        .map(|(key, samples)| summarize_key(key, samples, baseline, config))
        .collect()
}

fn summarize_key(
    key: &MetricKey,
    samples: &[f64],
    baseline: Option<&MetricStore>,
    config: &AggregationConfig,
) -> Result<SummaryRow, BootstrapError> {
    let stats = compute_summary(samples);
    let ci = bootstrap_median_ci_seeded(samples, &config.bootstrap, derive_seed(config.seed, key))?;

    let comparison = baseline.map(|store| {
        let reference = store.get(key);
        BaselineComparison::new(
            reference.len(),
            compare_distributions(samples, reference).as_ref(),
        )
    });

    Ok(SummaryRow::new(key, &stats, &ci, comparison))
}
