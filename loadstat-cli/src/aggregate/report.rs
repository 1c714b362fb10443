//! Report Building
//!
//! Wraps summary rows with provenance: generation time, tool version,
//! the roots that were read, and the parameters used for the intervals.

use super::summarize::AggregationConfig;
use chrono::Utc;
use loadstat_report::{Report, ReportMeta, SummaryRow};
use std::path::Path;

/// Inputs recorded alongside the rows
#[derive(Debug, Clone, Copy)]
pub struct ReportInputs<'a> {
    pub results_root: &'a Path,
    pub baseline_root: Option<&'a Path>,
    pub config: &'a AggregationConfig,
}

/// Build a complete Report from summary rows
pub fn build_report(rows: Vec<SummaryRow>, inputs: &ReportInputs<'_>) -> Report {
    let meta = ReportMeta {
        generated_at_utc: Utc::now(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        results_root: inputs.results_root.display().to_string(),
        baseline_root: inputs.baseline_root.map(|p| p.display().to_string()),
    };
    Report::new(meta, inputs.config.methodology(), rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadstat_stats::BootstrapConfig;

    #[test]
    fn test_report_provenance() {
        let config = AggregationConfig {
            bootstrap: BootstrapConfig::default(),
            seed: 7,
        };
        let inputs = ReportInputs {
            results_root: Path::new("/runs/current"),
            baseline_root: Some(Path::new("/runs/base")),
            config: &config,
        };
        let report = build_report(Vec::new(), &inputs);

        assert_eq!(report.results_root, "/runs/current");
        assert_eq!(report.baseline_root.as_deref(), Some("/runs/base"));
        assert_eq!(report.row_count, 0);
        assert_eq!(report.methodology.seed, 7);
        assert_eq!(report.tool_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(report.notes.len(), 2);
    }
}
