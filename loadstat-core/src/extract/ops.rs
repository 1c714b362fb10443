//! Operational-task artifacts
//!
//! Three independent sections that may appear together:
//! - `upload`: latency percentiles and success rate per (label, concurrency)
//! - `backup`: export/inspect/restore timings and archive size per dataset
//! - `codeserver`: workspace provisioning timings
//!
//! A section that is missing or not an object is skipped on its own.

use super::{entries, label};
use crate::store::{MetricStore, as_number};
use serde_json::Value;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Code-server durations; a percentile object contributes its p95 only
const CODESERVER_DURATIONS: [&str; 6] = [
    "create_codeserver_ms",
    "download_workspace_ms",
    "create_branch_ms",
    "update_branch_ms",
    "create_folder_ms",
    "update_folder_ms",
];

pub(super) fn extract(doc: &Value, store: &mut MetricStore) {
    if let Some(upload) = section(doc, "upload") {
        extract_upload(upload, store);
    }
    if let Some(backup) = section(doc, "backup") {
        extract_backup(backup, store);
    }
    if let Some(codeserver) = section(doc, "codeserver") {
        extract_codeserver(codeserver, store);
    }
}

fn section<'a>(doc: &'a Value, name: &str) -> Option<&'a Value> {
    doc.get(name).filter(|value| value.is_object())
}

fn extract_upload(upload: &Value, store: &mut MetricStore) {
    for case in entries(upload, "cases") {
        let case_label = label(case.get("label"), "upload");
        let concurrency = label(case.get("concurrency"), "na");
        let mut out = store.scope("ops.upload", format!("{case_label}|c{concurrency}"));

        let latency = case.get("latency_ms");
        out.record("latency_p50_ms", latency.and_then(|l| l.get("p50")));
        out.record("latency_p95_ms", latency.and_then(|l| l.get("p95")));
        out.record("latency_p99_ms", latency.and_then(|l| l.get("p99")));

        let requests = case.get("requests").and_then(as_number);
        let succeeded = case.get("success_2xx").and_then(as_number);
        if let (Some(requests), Some(succeeded)) = (requests, succeeded)
            && requests > 0.0
        {
            out.record_number("success_rate", succeeded / requests);
        }
    }
}

fn extract_backup(backup: &Value, store: &mut MetricStore) {
    for dataset in entries(backup, "datasets") {
        let name = label(dataset.get("dataset"), "dataset");
        let mut out = store.scope("ops.backup", name);

        out.record("export_ms", dataset.get("export_ms"));
        out.record("inspect_ms", dataset.get("inspect_ms"));
        out.record("restore_ms", dataset.get("restore_ms"));
        if let Some(bytes) = dataset.get("backup_size_bytes").and_then(as_number) {
            out.record_number("backup_size_mb", bytes / BYTES_PER_MB);
        }
    }
}

fn extract_codeserver(codeserver: &Value, store: &mut MetricStore) {
    let mut out = store.scope("ops.codeserver", "codeserver");

    for name in CODESERVER_DURATIONS {
        match codeserver.get(name) {
            Some(summary) if summary.is_object() => {
                out.record(&format!("{name}_p95"), summary.get("p95"));
            }
            value => out.record(name, value),
        }
    }

    if let Some(bytes) = codeserver.get("download_size_bytes").and_then(as_number) {
        out.record_number("download_size_mb", bytes / BYTES_PER_MB);
    }
}
