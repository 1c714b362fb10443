//! Metric Store
//!
//! Mapping from [`MetricKey`] to the observations collected for it, in
//! discovery order. Iteration is always in key order.

use crate::key::MetricKey;
use serde_json::Value;
use std::collections::BTreeMap;

/// Observations grouped by metric key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricStore {
    samples: BTreeMap<MetricKey, Vec<f64>>,
}

impl MetricStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one observation
    pub fn push(&mut self, key: MetricKey, value: f64) {
        self.samples.entry(key).or_default().push(value);
    }

    /// Observations for `key`; empty if the key was never seen
    pub fn get(&self, key: &MetricKey) -> &[f64] {
        self.samples.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Keys with their observations, in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (&MetricKey, &[f64])> {
        self.samples
            .iter()
            .map(|(key, values)| (key, values.as_slice()))
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no observation was recorded
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Total observations across all keys
    pub fn observation_count(&self) -> usize {
        self.samples.values().map(Vec::len).sum()
    }

    /// Keep only keys matching `keep`
    pub fn retain(&mut self, mut keep: impl FnMut(&MetricKey) -> bool) {
        self.samples.retain(|key, _| keep(key));
    }

    /// Recorder bound to one `(suite, scenario)` pair
    pub fn scope<'a>(
        &'a mut self,
        suite: &'a str,
        scenario: impl Into<String>,
    ) -> ScopedRecorder<'a> {
        ScopedRecorder {
            store: self,
            suite,
            scenario: scenario.into(),
        }
    }
}

/// Writes observations for a fixed suite and scenario
///
/// Values that are not JSON numbers are dropped without a trace, so a
/// missing or mistyped field never produces a placeholder observation.
pub struct ScopedRecorder<'a> {
    store: &'a mut MetricStore,
    suite: &'a str,
    scenario: String,
}

impl ScopedRecorder<'_> {
    /// Record `value` under `metric` if it is a JSON number
    pub fn record(&mut self, metric: &str, value: Option<&Value>) {
        if let Some(number) = value.and_then(as_number) {
            self.record_number(metric, number);
        }
    }

    /// Record an already-derived numeric observation
    pub fn record_number(&mut self, metric: &str, value: f64) {
        let key = MetricKey::new(self.suite, self.scenario.clone(), metric);
        self.store.push(key, value);
    }
}

/// Numeric coercion: only JSON numbers qualify (booleans and numeric
/// strings do not)
pub fn as_number(value: &Value) -> Option<f64> {
    // The producing tools' bool-as-int coercion is not carried over
    value.as_f64().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_only_numbers() {
        let mut store = MetricStore::new();
        let doc = json!({"a": 1, "b": 2.5, "c": "3", "d": true, "e": null});
        {
            let mut out = store.scope("rest", "login");
            for field in ["a", "b", "c", "d", "e", "missing"] {
                out.record("value", doc.get(field));
            }
        }

        let key = MetricKey::new("rest", "login", "value");
        assert_eq!(store.get(&key), &[1.0, 2.5]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_non_numeric_only_never_creates_key() {
        let mut store = MetricStore::new();
        store.scope("ws", "users_5").record("ws_errors", Some(&json!("n/a")));
        assert!(store.is_empty());
    }

    #[test]
    fn test_insertion_order_preserved_per_key() {
        let mut store = MetricStore::new();
        let key = MetricKey::new("s", "c", "m");
        for v in [3.0, 1.0, 2.0] {
            store.push(key.clone(), v);
        }
        assert_eq!(store.get(&key), &[3.0, 1.0, 2.0]);
        assert_eq!(store.observation_count(), 3);
    }

    #[test]
    fn test_iteration_sorted_by_key() {
        let mut store = MetricStore::new();
        store.push(MetricKey::new("ws", "a", "m"), 1.0);
        store.push(MetricKey::new("frontend", "b", "m"), 1.0);
        store.push(MetricKey::new("frontend", "a", "z"), 1.0);

        let suites: Vec<String> = store.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(suites, vec!["frontend/a/z", "frontend/b/m", "ws/a/m"]);
    }

    #[test]
    fn test_retain() {
        let mut store = MetricStore::new();
        store.push(MetricKey::new("rest", "a", "rps"), 1.0);
        store.push(MetricKey::new("ws", "a", "rps"), 1.0);
        store.retain(|key| key.suite == "ws");
        assert_eq!(store.len(), 1);
        assert!(store.get(&MetricKey::new("rest", "a", "rps")).is_empty());
    }
}
