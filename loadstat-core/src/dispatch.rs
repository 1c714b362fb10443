//! Extractor Dispatcher
//!
//! Walks a results tree and routes every `*.json` file to an extractor:
//!
//! 1. the immediate parent directory names the producer (`rest/`, `ws/`,
//!    `ops/`, `frontend/`, `soak/`, any case), otherwise
//! 2. the document's top-level keys are matched against
//!    [`SHAPE_RULES`](crate::SHAPE_RULES) in order.
//!
//! Files that cannot be read, do not parse, or match nothing are skipped
//! and counted; only a missing or unreadable root is an error.

use crate::extract::ArtifactKind;
use crate::store::MetricStore;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Run-metadata file written next to artifacts by the orchestrator
pub const RUN_METADATA_FILE: &str = "run-metadata.json";

/// Discovery options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// File names that are never treated as artifacts (case-insensitive)
    pub skip_files: Vec<String>,
    /// Follow symbolic links while walking
    pub follow_symlinks: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            skip_files: vec![RUN_METADATA_FILE.to_string()],
            follow_symlinks: false,
        }
    }
}

/// How a file's extractor was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchRule {
    /// Parent directory name
    Directory(ArtifactKind),
    /// Top-level key signature
    Shape(ArtifactKind),
}

impl DispatchRule {
    /// The extractor selected by this rule
    pub fn kind(self) -> ArtifactKind {
        match self {
            DispatchRule::Directory(kind) | DispatchRule::Shape(kind) => kind,
        }
    }
}

/// Per-pass discovery counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// `*.json` files encountered
    pub files_scanned: usize,
    /// Files handed to an extractor, per kind
    pub extracted: BTreeMap<ArtifactKind, usize>,
    /// Files skipped because of their name
    pub skipped_by_name: usize,
    /// Files or directories that could not be read
    pub skipped_unreadable: usize,
    /// Files that are not valid JSON
    pub skipped_unparsable: usize,
    /// Valid JSON that matches no directory convention or shape
    pub skipped_unrecognized: usize,
}

impl LoadSummary {
    /// Total files handed to an extractor
    pub fn files_extracted(&self) -> usize {
        self.extracted.values().sum()
    }
}

/// Result of loading one results tree
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    /// Extracted observations
    pub store: MetricStore,
    /// Discovery counters
    pub summary: LoadSummary,
}

/// Fatal loading errors
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("results root does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("results root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot read results root {}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Load every recognizable artifact under `root` into a fresh store
pub fn load_metrics(root: &Path, options: &DiscoveryOptions) -> Result<LoadOutcome, LoadError> {
    if !root.exists() {
        return Err(LoadError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(LoadError::NotADirectory(root.to_path_buf()));
    }

    let mut outcome = LoadOutcome::default();
    let walker = WalkDir::new(root)
        .follow_links(options.follow_symlinks)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(LoadError::Walk {
                    path: root.to_path_buf(),
                    source: err,
                });
            }
            Err(err) => {
                warn!("Skipping unreadable entry: {err}");
                outcome.summary.skipped_unreadable += 1;
                continue;
            }
        };

        if is_artifact_file(&entry) {
            load_file(&entry, options, &mut outcome);
        }
    }

    info!(
        root = %root.display(),
        scanned = outcome.summary.files_scanned,
        extracted = outcome.summary.files_extracted(),
        keys = outcome.store.len(),
        "Loaded metrics"
    );
    Ok(outcome)
}

fn load_file(entry: &DirEntry, options: &DiscoveryOptions, outcome: &mut LoadOutcome) {
    let path = entry.path();
    let summary = &mut outcome.summary;
    summary.files_scanned += 1;

    let file_name = entry.file_name().to_string_lossy();
    if options
        .skip_files
        .iter()
        .any(|skip| skip.eq_ignore_ascii_case(&file_name))
    {
        debug!(path = %path.display(), "Skipping by name");
        summary.skipped_by_name += 1;
        return;
    }

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(path = %path.display(), "Skipping unreadable file: {err}");
            summary.skipped_unreadable += 1;
            return;
        }
    };
    let doc: Value = match serde_json::from_slice(&bytes) {
        Ok(doc) => doc,
        Err(err) => {
            debug!(path = %path.display(), "Skipping invalid JSON: {err}");
            summary.skipped_unparsable += 1;
            return;
        }
    };

    match resolve_rule(path, &doc) {
        Some(rule) => {
            debug!(path = %path.display(), ?rule, "Extracting");
            rule.kind().extract(&doc, &mut outcome.store);
            *summary.extracted.entry(rule.kind()).or_default() += 1;
        }
        None => {
            debug!(path = %path.display(), "Skipping unrecognized artifact");
            summary.skipped_unrecognized += 1;
        }
    }
}

/// Pick the extractor for a parsed file: directory convention first, then shape
pub fn resolve_rule(path: &Path, doc: &Value) -> Option<DispatchRule> {
    let parent = path
        .parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str());

    if let Some(kind) = parent.and_then(ArtifactKind::from_dir_name) {
        return Some(DispatchRule::Directory(kind));
    }
    ArtifactKind::sniff(doc).map(DispatchRule::Shape)
}

/// Regular `.json` file, or a symlink resolving to one
///
/// Symlinked files are read even when directory links are not followed.
fn is_artifact_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    let is_file = file_type.is_file() || (file_type.is_symlink() && entry.path().is_file());
    is_file && has_json_extension(entry)
}

fn has_json_extension(entry: &DirEntry) -> bool {
    entry
        .path()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MetricKey;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_resolve_rule_prefers_directory() {
        let doc = json!({"cycles": [], "summary": {}});
        assert_eq!(
            resolve_rule(Path::new("/r/WS/a.json"), &doc),
            Some(DispatchRule::Directory(ArtifactKind::Ws))
        );
        assert_eq!(
            resolve_rule(Path::new("/r/nightly/a.json"), &doc),
            Some(DispatchRule::Shape(ArtifactKind::Soak))
        );
        assert_eq!(resolve_rule(Path::new("/r/nightly/a.json"), &json!({})), None);
    }

    #[test]
    fn test_load_tree() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(
            root,
            "run1/ops/ops.json",
            r#"{"backup": {"datasets": [{"dataset": "d1", "export_ms": 100}]}}"#,
        );
        write(
            root,
            "run2/custom/soak-result.json",
            r#"{"cycles": [], "summary": {"cycle_success_rate": 1.0}}"#,
        );
        write(root, "run1/ops/broken.json", "{ not json");
        write(root, "run1/unknown.json", r#"{"hello": 1}"#);
        write(root, "run1/rest/run-metadata.json", r#"{"scenarios": [], "config": {}}"#);
        write(root, "run1/rest/notes.txt", "ignored");

        let outcome = load_metrics(root, &DiscoveryOptions::default()).unwrap();
        let summary = &outcome.summary;

        assert_eq!(summary.files_scanned, 5);
        assert_eq!(summary.files_extracted(), 2);
        assert_eq!(summary.extracted.get(&ArtifactKind::Ops), Some(&1));
        assert_eq!(summary.extracted.get(&ArtifactKind::Soak), Some(&1));
        assert_eq!(summary.skipped_by_name, 1);
        assert_eq!(summary.skipped_unparsable, 1);
        assert_eq!(summary.skipped_unrecognized, 1);

        assert_eq!(
            outcome.store.get(&MetricKey::new("ops.backup", "d1", "export_ms")),
            &[100.0]
        );
        assert_eq!(
            outcome.store.get(&MetricKey::new("stability", "soak", "cycle_success_rate")),
            &[1.0]
        );
    }

    #[test]
    fn test_directory_wins_over_shape() {
        let dir = TempDir::new().unwrap();
        // Looks like a soak artifact but lives under ws/
        write(
            dir.path(),
            "ws/odd.json",
            r#"{"cycles": [], "summary": {"cycle_success_rate": 1.0}, "cases": [{"users": 3, "ws_errors": 0}]}"#,
        );

        let outcome = load_metrics(dir.path(), &DiscoveryOptions::default()).unwrap();
        assert_eq!(outcome.store.len(), 1);
        assert_eq!(
            outcome.store.get(&MetricKey::new("ws", "users_3", "ws_errors")),
            &[0.0]
        );
    }

    #[test]
    fn test_custom_skip_list() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "soak/baseline.json", r#"{"summary": {"cycle_success_rate": 0.5}}"#);

        let options = DiscoveryOptions {
            skip_files: vec!["BASELINE.json".to_string()],
            ..Default::default()
        };
        let outcome = load_metrics(dir.path(), &options).unwrap();
        assert!(outcome.store.is_empty());
        assert_eq!(outcome.summary.skipped_by_name, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_artifact_is_loaded() {
        let archive = TempDir::new().unwrap();
        write(
            archive.path(),
            "run.json",
            r#"{"config": {}, "scenarios": [{"name": "s", "requests_per_second": 5.0}]}"#,
        );
        let tree = TempDir::new().unwrap();
        fs::create_dir_all(tree.path().join("rest")).unwrap();
        std::os::unix::fs::symlink(
            archive.path().join("run.json"),
            tree.path().join("rest/run.json"),
        )
        .unwrap();

        let outcome = load_metrics(tree.path(), &DiscoveryOptions::default()).unwrap();
        assert_eq!(outcome.summary.files_scanned, 1);
        assert_eq!(outcome.summary.files_extracted(), 1);
        let key = MetricKey::new("rest", "s|ana_rrna_wrna_rcna_wcna", "rps");
        assert_eq!(outcome.store.get(&key), &[5.0]);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_ignored() {
        let tree = TempDir::new().unwrap();
        fs::create_dir_all(tree.path().join("rest")).unwrap();
        std::os::unix::fs::symlink(
            tree.path().join("gone.json"),
            tree.path().join("rest/run.json"),
        )
        .unwrap();

        let outcome = load_metrics(tree.path(), &DiscoveryOptions::default()).unwrap();
        assert_eq!(outcome.summary.files_scanned, 0);
        assert!(outcome.store.is_empty());
    }

    #[test]
    fn test_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            load_metrics(&missing, &DiscoveryOptions::default()),
            Err(LoadError::RootNotFound(_))
        ));
    }

    #[test]
    fn test_root_is_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "file.json", "{}");
        assert!(matches!(
            load_metrics(&dir.path().join("file.json"), &DiscoveryOptions::default()),
            Err(LoadError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_empty_root() {
        let dir = TempDir::new().unwrap();
        let outcome = load_metrics(dir.path(), &DiscoveryOptions::default()).unwrap();
        assert!(outcome.store.is_empty());
        assert_eq!(outcome.summary, LoadSummary::default());
    }
}
