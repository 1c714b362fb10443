//! Artifact Extractors
//!
//! One extractor per known producer shape. Each maps a parsed JSON document
//! to observations in a [`MetricStore`]; absent or mistyped fields are
//! skipped individually so sibling fields still contribute.
//!
//! Shape recognition is a data table: [`SHAPE_RULES`] is tried top to bottom
//! when a file's directory does not name its producer.

mod frontend;
mod ops;
mod rest;
mod soak;
mod ws;

use crate::store::MetricStore;
use serde_json::{Map, Value};
use std::fmt;

/// The producer shapes this crate understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArtifactKind {
    /// Request/response load test
    Rest,
    /// Realtime (websocket) load test
    Ws,
    /// Operational tasks: upload, backup/restore, code-server workspace
    Ops,
    /// Frontend route load test
    Frontend,
    /// Long-running soak/stability cycles
    Soak,
}

impl ArtifactKind {
    /// All kinds, in directory-convention order
    pub const ALL: [ArtifactKind; 5] = [
        ArtifactKind::Rest,
        ArtifactKind::Ws,
        ArtifactKind::Ops,
        ArtifactKind::Frontend,
        ArtifactKind::Soak,
    ];

    /// Directory name that designates this kind (compared case-insensitively)
    pub fn dir_name(self) -> &'static str {
        match self {
            ArtifactKind::Rest => "rest",
            ArtifactKind::Ws => "ws",
            ArtifactKind::Ops => "ops",
            ArtifactKind::Frontend => "frontend",
            ArtifactKind::Soak => "soak",
        }
    }

    /// Kind designated by a directory name, if any
    pub fn from_dir_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.dir_name().eq_ignore_ascii_case(name))
    }

    /// Kind whose shape signature `doc` matches first, if any
    pub fn sniff(doc: &Value) -> Option<Self> {
        let obj = doc.as_object()?;
        SHAPE_RULES
            .iter()
            .find(|rule| (rule.matches)(obj))
            .map(|rule| rule.kind)
    }

    /// Extract every recognizable observation from `doc` into `store`
    pub fn extract(self, doc: &Value, store: &mut MetricStore) {
        match self {
            ArtifactKind::Rest => rest::extract(doc, store),
            ArtifactKind::Ws => ws::extract(doc, store),
            ArtifactKind::Ops => ops::extract(doc, store),
            ArtifactKind::Frontend => frontend::extract(doc, store),
            ArtifactKind::Soak => soak::extract(doc, store),
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// A top-level key signature identifying one producer shape
pub struct ShapeRule {
    /// Kind recognized by this rule
    pub kind: ArtifactKind,
    /// Predicate over the document's top-level object
    pub matches: fn(&Map<String, Value>) -> bool,
}

/// Shape signatures in priority order; the first match wins
pub const SHAPE_RULES: &[ShapeRule] = &[
    ShapeRule {
        kind: ArtifactKind::Rest,
        matches: |obj| obj.contains_key("scenarios") && obj.contains_key("config"),
    },
    ShapeRule {
        kind: ArtifactKind::Ws,
        matches: |obj| {
            obj.contains_key("cases") && obj.contains_key("notes") && has_config_field(obj, "users")
        },
    },
    ShapeRule {
        kind: ArtifactKind::Ops,
        matches: |obj| ["upload", "backup", "codeserver"].iter().any(|k| obj.contains_key(*k)),
    },
    ShapeRule {
        kind: ArtifactKind::Frontend,
        matches: |obj| has_config_field(obj, "routes") && obj.contains_key("cases"),
    },
    ShapeRule {
        kind: ArtifactKind::Soak,
        matches: |obj| obj.contains_key("cycles") && obj.contains_key("summary"),
    },
];

/// `config.<field>` is present and not null
fn has_config_field(obj: &Map<String, Value>, field: &str) -> bool {
    obj.get("config")
        .and_then(|config| config.get(field))
        .is_some_and(|value| !value.is_null())
}

/// Render a field as a scenario-label fragment
///
/// Missing or null fields render as `default`; strings render verbatim;
/// numbers keep their JSON spelling (`10`, `2.5`).
fn label(value: Option<&Value>, default: &str) -> String {
    match value {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Elements of `doc[field]` if it is an array, otherwise nothing
fn entries<'a>(doc: &'a Value, field: &str) -> impl Iterator<Item = &'a Value> {
    doc.get(field)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}
