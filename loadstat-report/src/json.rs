//! JSON Output

use crate::WriteError;
use crate::report::Report;
use std::path::Path;

/// Generate a prettified JSON report.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Write the JSON report to `path`, creating parent directories as needed
pub fn write_json_report(path: &Path, report: &Report) -> Result<(), WriteError> {
    let json = generate_json_report(report)?;
    crate::ensure_parent_dir(path)?;
    std::fs::write(path, json)?;
    Ok(())
}
