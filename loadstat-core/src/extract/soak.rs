//! Soak/stability artifacts
//!
//! Everything lands in the single synthetic scenario `soak` of suite
//! `stability`. Recovery time is only present when a restart event with a
//! readiness probe was recorded.

use crate::store::MetricStore;
use serde_json::Value;

const SUITE: &str = "stability";
const SCENARIO: &str = "soak";

pub(super) fn extract(doc: &Value, store: &mut MetricStore) {
    let Some(summary) = doc.get("summary").filter(|s| s.is_object()) else {
        return;
    };
    let mut out = store.scope(SUITE, SCENARIO);

    out.record("cycle_success_rate", summary.get("cycle_success_rate"));

    let duration = summary.get("cycle_duration_ms");
    out.record("cycle_p95_ms", duration.and_then(|d| d.get("p95")));
    out.record("cycle_p99_ms", duration.and_then(|d| d.get("p99")));

    let recovery = summary
        .get("restart_event")
        .and_then(|event| event.get("ready_result"))
        .and_then(|ready| ready.get("recovery_ms"));
    out.record("restart_recovery_ms", recovery);
}
