//! Metric identity

use fnv::FnvHasher;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hasher;

/// Identity of one sample population: `(suite, scenario, metric)`
///
/// Ordering is lexicographic on the triple, which is also the order rows
/// are emitted in reports.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MetricKey {
    /// Benchmark category, e.g. `rest` or `ops.backup`
    pub suite: String,
    /// Configuration or run label within the suite
    pub scenario: String,
    /// Measurement name, e.g. `latency_p95_ms`
    pub metric: String,
}

impl MetricKey {
    /// Create a key from its three parts
    pub fn new(
        suite: impl Into<String>,
        scenario: impl Into<String>,
        metric: impl Into<String>,
    ) -> Self {
        Self {
            suite: suite.into(),
            scenario: scenario.into(),
            metric: metric.into(),
        }
    }

    /// Hash of the key that is stable across processes, platforms and
    /// toolchain versions (FNV-1a over the three parts)
    pub fn stable_hash(&self) -> u64 {
        let mut hasher = FnvHasher::default();
        for part in [&self.suite, &self.scenario, &self.metric] {
            hasher.write(part.as_bytes());
            // 0xff never occurs in UTF-8, so part boundaries are unambiguous
            hasher.write_u8(0xff);
        }
        hasher.finish()
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.suite, self.scenario, self.metric)
    }
}
