//! Report Data Structures

use chrono::{DateTime, Utc};
use loadstat_core::MetricKey;
use loadstat_stats::{ComparisonResult, ConfidenceInterval, SummaryStatistics};
use serde::{Deserialize, Serialize};

/// Methodology notes attached to every report
pub const METHODOLOGY_NOTES: [&str; 2] = [
    "Reported statistics: median, IQR, bootstrap 95% CI for the median.",
    "If baseline_root is provided: Mann-Whitney U p-value and Cliff's delta are included.",
];

/// Complete comparison report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Generation time (UTC, RFC 3339)
    pub generated_at_utc: DateTime<Utc>,
    pub tool_version: String,
    /// Absolute path of the results tree
    pub results_root: String,
    /// Absolute path of the baseline tree, if any
    pub baseline_root: Option<String>,
    pub methodology: Methodology,
    /// Always `rows.len()`
    pub row_count: usize,
    /// Rows ordered by (suite, scenario, metric)
    pub rows: Vec<SummaryRow>,
    pub notes: Vec<String>,
}

impl Report {
    /// Assemble a report; `row_count` and notes are derived here
    pub fn new(meta: ReportMeta, methodology: Methodology, rows: Vec<SummaryRow>) -> Self {
        Self {
            generated_at_utc: meta.generated_at_utc,
            tool_version: meta.tool_version,
            results_root: meta.results_root,
            baseline_root: meta.baseline_root,
            methodology,
            row_count: rows.len(),
            rows,
            notes: METHODOLOGY_NOTES.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Provenance of a report
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub generated_at_utc: DateTime<Utc>,
    pub tool_version: String,
    pub results_root: String,
    pub baseline_root: Option<String>,
}

/// Parameters needed to reproduce the reported intervals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Methodology {
    pub bootstrap_rounds: usize,
    pub confidence_level: f64,
    pub seed: u64,
}

/// Statistics for one `(suite, scenario, metric)` population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub suite: String,
    pub scenario: String,
    pub metric: String,
    pub n: usize,
    pub mean: f64,
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub ci95_low: f64,
    pub ci95_high: f64,
    /// Present only when a baseline was supplied
    #[serde(flatten)]
    pub baseline: Option<BaselineComparison>,
}

impl SummaryRow {
    /// Build a row from the statistics computed for `key`
    pub fn new(
        key: &MetricKey,
        stats: &SummaryStatistics,
        ci: &ConfidenceInterval,
        baseline: Option<BaselineComparison>,
    ) -> Self {
        Self {
            suite: key.suite.clone(),
            scenario: key.scenario.clone(),
            metric: key.metric.clone(),
            n: stats.sample_count,
            mean: stats.mean,
            median: stats.median,
            q1: stats.q1,
            q3: stats.q3,
            iqr: stats.iqr(),
            ci95_low: ci.lower,
            ci95_high: ci.upper,
            baseline,
        }
    }
}

/// Significance fields of a row in baseline mode
///
/// All fields except `baseline_n` are `None` (serialized as `null`) when the
/// baseline has no observations for the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineComparison {
    pub baseline_n: usize,
    pub mann_whitney_u: Option<f64>,
    pub p_value: Option<f64>,
    pub cliffs_delta: Option<f64>,
    pub effect_size: Option<String>,
}

impl BaselineComparison {
    /// Combine a baseline sample count with its (possibly absent) comparison
    pub fn new(baseline_n: usize, comparison: Option<&ComparisonResult>) -> Self {
        Self {
            baseline_n,
            mann_whitney_u: comparison.map(|c| c.mann_whitney_u),
            p_value: comparison.map(|c| c.p_value),
            cliffs_delta: comparison.map(|c| c.cliffs_delta),
            effect_size: comparison.map(|c| c.effect.to_string()),
        }
    }
}
