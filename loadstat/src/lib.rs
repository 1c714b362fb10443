#![warn(missing_docs)]
//! # LoadStat
//!
//! Statistically defensible comparison reports from heterogeneous load-test
//! artifacts.
//!
//! LoadStat walks a results tree, recognizes each JSON artifact by its
//! directory or its shape, and reduces every `(suite, scenario, metric)`
//! series to:
//! - **Summary statistics**: sample count, mean, median, quartiles, IQR
//! - **Bootstrap CI**: seeded percentile interval for the median
//! - **Baseline tests**: Mann-Whitney U p-value and Cliff's delta effect size
//!
//! Results are written as a JSON report and a fixed-column CSV table.
//!
//! ## Quick Start
//!
//! ```ignore
//! use loadstat::prelude::*;
//! use std::path::Path;
//!
//! let outcome = load_metrics(Path::new("bench-results"), &DiscoveryOptions::default())?;
//! let config = AggregationConfig { bootstrap: BootstrapConfig::default(), seed: 42 };
//! let rows = build_rows(&outcome.store, None, &config)?;
//! write_csv_report(Path::new("paper-stats.csv"), &rows)?;
//! ```

// Re-export core types
pub use loadstat_core::{
    ArtifactKind, DiscoveryOptions, DispatchRule, LoadError, LoadOutcome, LoadSummary, MetricKey,
    MetricStore, load_metrics, resolve_rule,
};

// Re-export stats
pub use loadstat_stats::{
    BootstrapConfig, ComparisonResult, ConfidenceInterval, EffectInterpretation,
    MannWhitneyResult, SummaryStatistics, bootstrap_median_ci, bootstrap_median_ci_seeded,
    cliffs_delta, compare_distributions, compute_quantile, compute_summary, mann_whitney_u,
};

// Re-export report types
pub use loadstat_report::{
    BaselineComparison, CSV_COLUMNS, Methodology, Report, SummaryRow, WriteError,
    generate_csv_report, generate_json_report, write_csv_report, write_json_report,
};

// Re-export the pipeline
pub use loadstat_cli::{
    AggregationConfig, Cli, Commands, LoadstatConfig, RunOutput, build_report, build_rows,
    run, run_aggregation, run_with_cli,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        AggregationConfig, BootstrapConfig, DiscoveryOptions, MetricKey, MetricStore, Report,
        SummaryRow, build_rows, load_metrics, write_csv_report, write_json_report,
    };
}
