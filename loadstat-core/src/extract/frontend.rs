//! Frontend route load artifacts: one case per (route, concurrency)

use super::{entries, label};
use crate::store::MetricStore;
use serde_json::Value;

const SUITE: &str = "frontend";

pub(super) fn extract(doc: &Value, store: &mut MetricStore) {
    for case in entries(doc, "cases") {
        let route = label(case.get("route"), "/");
        let concurrency = label(case.get("concurrency"), "na");
        let mut out = store.scope(SUITE, format!("{route}|c{concurrency}"));

        let latency = case.get("latency_ms");
        out.record("latency_p50_ms", latency.and_then(|l| l.get("p50")));
        out.record("latency_p95_ms", latency.and_then(|l| l.get("p95")));
        out.record("latency_p99_ms", latency.and_then(|l| l.get("p99")));
        out.record("rps", case.get("requests_per_second"));
        out.record("error_rate", case.get("error_rate"));
    }
}
