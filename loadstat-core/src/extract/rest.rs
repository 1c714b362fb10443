//! Request/response load test artifacts
//!
//! ```json
//! {"config": {"attendees": 50, "read_requests": 400, ...},
//!  "scenarios": [{"name": "login", "latency_ms": {"p50": 10.0, ...},
//!                 "requests_per_second": 180.0, "error_rate": 0.0}]}
//! ```

use super::{entries, label};
use crate::store::MetricStore;
use serde_json::Value;

const SUITE: &str = "rest";

/// Load configuration fields encoded into every scenario label
const CONFIG_FIELDS: [(&str, &str); 5] = [
    ("a", "attendees"),
    ("rr", "read_requests"),
    ("wr", "write_requests"),
    ("rc", "read_concurrency"),
    ("wc", "write_concurrency"),
];

pub(super) fn extract(doc: &Value, store: &mut MetricStore) {
    let (Some(_), Some(config)) = (doc.get("scenarios"), doc.get("config")) else {
        return;
    };
    let suffix = config_suffix(config);

    for scenario in entries(doc, "scenarios") {
        let name = label(scenario.get("name"), "unknown");
        let mut out = store.scope(SUITE, format!("{name}|{suffix}"));

        let latency = scenario.get("latency_ms");
        out.record("latency_p50_ms", latency.and_then(|l| l.get("p50")));
        out.record("latency_p95_ms", latency.and_then(|l| l.get("p95")));
        out.record("latency_p99_ms", latency.and_then(|l| l.get("p99")));
        out.record("rps", scenario.get("requests_per_second"));
        out.record("error_rate", scenario.get("error_rate"));
    }
}

/// `a<attendees>_rr<reads>_wr<writes>_rc<read conc>_wc<write conc>`
fn config_suffix(config: &Value) -> String {
    CONFIG_FIELDS
        .iter()
        .map(|(prefix, field)| format!("{prefix}{}", label(config.get(*field), "na")))
        .collect::<Vec<_>>()
        .join("_")
}
