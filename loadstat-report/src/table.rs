//! CSV Output
//!
//! One row per [`SummaryRow`] with a fixed column order. Baseline columns
//! are always present and left empty when there is no comparison.

use crate::WriteError;
use crate::report::SummaryRow;
use std::io;
use std::path::Path;

/// Column order of the tabular output
pub const CSV_COLUMNS: [&str; 16] = [
    "suite",
    "scenario",
    "metric",
    "n",
    "mean",
    "median",
    "q1",
    "q3",
    "iqr",
    "ci95_low",
    "ci95_high",
    "baseline_n",
    "mann_whitney_u",
    "p_value",
    "cliffs_delta",
    "effect_size",
];

/// Write rows as CSV (header included) to any writer
pub fn write_csv<W: io::Write>(rows: &[SummaryRow], writer: W) -> Result<(), WriteError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(CSV_COLUMNS)?;
    for row in rows {
        csv.write_record(&record(row))?;
    }
    csv.flush()?;
    Ok(())
}

/// Render rows as a CSV string
pub fn generate_csv_report(rows: &[SummaryRow]) -> Result<String, WriteError> {
    let mut buffer = Vec::new();
    write_csv(rows, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write the CSV report to `path`, creating parent directories as needed
pub fn write_csv_report(path: &Path, rows: &[SummaryRow]) -> Result<(), WriteError> {
    crate::ensure_parent_dir(path)?;
    let file = std::fs::File::create(path)?;
    write_csv(rows, io::BufWriter::new(file))
}

fn record(row: &SummaryRow) -> [String; 16] {
    let baseline = row.baseline.as_ref();
    [
        row.suite.clone(),
        row.scenario.clone(),
        row.metric.clone(),
        row.n.to_string(),
        float(row.mean),
        float(row.median),
        float(row.q1),
        float(row.q3),
        float(row.iqr),
        float(row.ci95_low),
        float(row.ci95_high),
        baseline.map(|b| b.baseline_n.to_string()).unwrap_or_default(),
        optional_float(baseline.and_then(|b| b.mann_whitney_u)),
        optional_float(baseline.and_then(|b| b.p_value)),
        optional_float(baseline.and_then(|b| b.cliffs_delta)),
        baseline
            .and_then(|b| b.effect_size.clone())
            .unwrap_or_default(),
    ]
}

/// Shortest round-trip spelling, always with a fractional part (`15.0`)
fn float(value: f64) -> String {
    format!("{value:?}")
}

fn optional_float(value: Option<f64>) -> String {
    value.map(float).unwrap_or_default()
}
