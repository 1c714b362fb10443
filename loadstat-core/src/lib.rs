#![warn(missing_docs)]
//! LoadStat Core - Artifact Discovery and Metric Extraction
//!
//! Turns a tree of heterogeneous load-test JSON artifacts into a
//! [`MetricStore`]: one ordered sample sequence per
//! `(suite, scenario, metric)` key.
//!
//! ```text
//! results/ ──▶ dispatch (directory name, then shape) ──▶ extractor ──▶ MetricStore
//! ```

mod dispatch;
mod extract;
mod key;
mod store;

pub use dispatch::{
    DiscoveryOptions, DispatchRule, LoadError, LoadOutcome, LoadSummary, RUN_METADATA_FILE,
    load_metrics, resolve_rule,
};
pub use extract::{ArtifactKind, SHAPE_RULES, ShapeRule};
pub use key::MetricKey;
pub use store::{MetricStore, ScopedRecorder, as_number};
