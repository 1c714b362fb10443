//! Realtime (websocket) load test artifacts
//!
//! One case per simulated user count; the scenario label is `users_<N>`.

use super::{entries, label};
use crate::store::MetricStore;
use serde_json::Value;

const SUITE: &str = "ws";

pub(super) fn extract(doc: &Value, store: &mut MetricStore) {
    for case in entries(doc, "cases") {
        let users = label(case.get("users"), "na");
        let mut out = store.scope(SUITE, format!("users_{users}"));

        let latency = case.get("e2e_latency_ms");
        out.record("e2e_p50_ms", latency.and_then(|l| l.get("p50")));
        out.record("e2e_p95_ms", latency.and_then(|l| l.get("p95")));
        out.record("e2e_p99_ms", latency.and_then(|l| l.get("p99")));

        let throughput = case.get("throughput");
        out.record(
            "sent_chat_per_sec",
            throughput.and_then(|t| t.get("sent_chat_per_sec")),
        );
        out.record(
            "recv_chat_per_sec",
            throughput.and_then(|t| t.get("recv_chat_per_sec")),
        );

        out.record("ws_disconnects", case.get("ws_disconnects"));
        out.record("ws_errors", case.get("ws_errors"));
    }
}
