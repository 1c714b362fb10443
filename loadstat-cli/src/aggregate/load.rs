//! Store Loading
//!
//! Wraps the artifact loader with CLI concerns: fatal errors gain context,
//! discovery counts are logged, and the optional key filter is applied.

use anyhow::Context;
use loadstat_core::{DiscoveryOptions, MetricKey, MetricStore, load_metrics};
use regex::Regex;
use std::path::Path;
use tracing::info;

/// Keeps keys whose `suite/scenario/metric` path matches a pattern
#[derive(Debug, Clone)]
pub struct KeyFilter {
    pattern: Regex,
}

impl KeyFilter {
    /// Compile a filter from a regular expression
    pub fn new(pattern: &str) -> anyhow::Result<Self> {
        let pattern =
            Regex::new(pattern).with_context(|| format!("invalid filter pattern '{pattern}'"))?;
        Ok(Self { pattern })
    }

    /// Whether `key` passes the filter
    pub fn matches(&self, key: &MetricKey) -> bool {
        self.pattern.is_match(&key.to_string())
    }
}

/// Load every artifact under `root` into a store
///
/// `role` names the tree in log output ("results" or "baseline").
pub fn load_store(
    root: &Path,
    options: &DiscoveryOptions,
    filter: Option<&KeyFilter>,
    role: &str,
) -> anyhow::Result<MetricStore> {
    let outcome = load_metrics(root, options)
        .with_context(|| format!("failed to load {role} root {}", root.display()))?;
    let summary = outcome.summary;
    let mut store = outcome.store;

    info!(
        role,
        scanned = summary.files_scanned,
        extracted = summary.files_extracted(),
        skipped_by_name = summary.skipped_by_name,
        unreadable = summary.skipped_unreadable,
        unparsable = summary.skipped_unparsable,
        unrecognized = summary.skipped_unrecognized,
        "Loaded artifacts"
    );
    for (kind, count) in &summary.extracted {
        info!(role, suite = %kind, files = count, "Extracted");
    }

    if let Some(filter) = filter {
        let before = store.len();
        store.retain(|key| filter.matches(key));
        info!(role, kept = store.len(), dropped = before - store.len(), "Applied key filter");
    }

    Ok(store)
}
