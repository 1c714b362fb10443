//! Output Formatting
//!
//! Human-readable summary of a report, grouped by suite.

use loadstat_report::{Report, SummaryRow};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Format a report for human-readable terminal display
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("LoadStat Results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    let mut suites: BTreeMap<&str, Vec<&SummaryRow>> = BTreeMap::new();
    for row in &report.rows {
        suites.entry(&row.suite).or_default().push(row);
    }

    for (suite, rows) in suites {
        let _ = writeln!(output, "Suite: {suite}");
        output.push_str(&"-".repeat(60));
        output.push('\n');

        let mut scenario = None;
        for row in rows {
            if scenario != Some(row.scenario.as_str()) {
                scenario = Some(row.scenario.as_str());
                let _ = writeln!(output, "  {}", row.scenario);
            }
            let _ = writeln!(
                output,
                "    {:<24} n={:<4} median: {:.3}  IQR: {:.3}  CI: [{:.3}, {:.3}]",
                row.metric, row.n, row.median, row.iqr, row.ci95_low, row.ci95_high
            );
            if let Some(baseline) = &row.baseline {
                match (baseline.p_value, baseline.cliffs_delta, &baseline.effect_size) {
                    (Some(p), Some(delta), Some(effect)) => {
                        let _ = writeln!(
                            output,
                            "    {:<24} vs baseline (n={}): p={:.4}  delta={:+.3} ({})",
                            "", baseline.baseline_n, p, delta, effect
                        );
                    }
                    _ => {
                        let _ = writeln!(output, "    {:<24} no baseline samples", "");
                    }
                }
            }
        }
        output.push('\n');
    }

    output.push_str(&"=".repeat(60));
    output.push('\n');
    let _ = writeln!(output, "{} rows", report.row_count);
    if let Some(baseline_root) = &report.baseline_root {
        let _ = writeln!(output, "baseline: {baseline_root}");
    }

    output
}
