#![warn(missing_docs)]
//! LoadStat Report - Output Formats
//!
//! Report data structures and their serializers:
//! - JSON (the full report document)
//! - CSV (flat table, fixed column order, consumed by chart renderers)

mod json;
mod report;
mod table;

pub use json::{generate_json_report, write_json_report};
pub use report::{
    BaselineComparison, METHODOLOGY_NOTES, Methodology, Report, ReportMeta, SummaryRow,
};
pub use table::{CSV_COLUMNS, generate_csv_report, write_csv, write_csv_report};

use std::path::Path;
use thiserror::Error;

/// Errors raised while writing report files
#[derive(Debug, Error)]
pub enum WriteError {
    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON serialization failure
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    /// CSV serialization failure
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),
}

fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
