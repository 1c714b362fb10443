//! Integration tests for LoadStat
//!
//! These tests build artifact trees on disk and run the whole pipeline.

use loadstat::{
    AggregationConfig, BootstrapConfig, CSV_COLUMNS, Cli, DiscoveryOptions, MetricKey,
    RunOutput, build_rows, load_metrics, run_aggregation,
};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_json(root: &Path, relative: &str, value: &Value) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
}

fn rest_run(p50: f64) -> Value {
    json!({
        "config": {
            "attendees": 10, "read_requests": 100, "write_requests": 20,
            "read_concurrency": 5, "write_concurrency": 2
        },
        "scenarios": [{
            "name": "login",
            "latency_ms": {"p50": p50, "p95": p50 * 2.0, "p99": p50 * 3.0},
            "requests_per_second": 150.0,
            "error_rate": 0.0
        }]
    })
}

/// CLI arguments for a hermetic run writing into `out`
fn cli(results: &Path, baseline: Option<&Path>, out: &Path) -> Cli {
    let config = out.join("loadstat.toml");
    std::fs::create_dir_all(out).unwrap();
    std::fs::write(&config, "[statistics]\nbootstrap_rounds = 400\n").unwrap();

    Cli {
        command: None,
        results_root: Some(results.to_path_buf()),
        baseline_root: baseline.map(Path::to_path_buf),
        output: Some(out.join("reports/paper-stats.json")),
        csv: Some(out.join("reports/paper-stats.csv")),
        config: Some(config),
        filter: None,
        rounds: None,
        confidence: None,
        seed: None,
        threads: 0,
        summary: false,
        verbose: false,
    }
}

fn read_json(path: &PathBuf) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn find_row<'a>(report: &'a Value, suite: &str, metric: &str) -> &'a Value {
    report["rows"]
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["suite"] == suite && row["metric"] == metric)
        .unwrap_or_else(|| panic!("no row {suite}/{metric}"))
}

/// Two rest runs of the same scenario pool into one key
#[test]
fn test_rest_runs_pool_into_one_key() {
    let results = TempDir::new().unwrap();
    write_json(results.path(), "rest/run-1.json", &rest_run(10.0));
    write_json(results.path(), "rest/run-2.json", &rest_run(20.0));

    let outcome = load_metrics(results.path(), &DiscoveryOptions::default()).unwrap();
    let key = MetricKey::new("rest", "login|a10_rr100_wr20_rc5_wc2", "latency_p50_ms");
    assert_eq!(outcome.store.get(&key), &[10.0, 20.0]);

    let out = TempDir::new().unwrap();
    let RunOutput { json_path, .. } =
        run_aggregation(&cli(results.path(), None, out.path())).unwrap();
    let report = read_json(&json_path);

    let row = find_row(&report, "rest", "latency_p50_ms");
    assert_eq!(row["scenario"], "login|a10_rr100_wr20_rc5_wc2");
    assert_eq!(row["n"], 2);
    assert_eq!(row["median"], 15.0);
    assert_eq!(row["mean"], 15.0);
    assert!(row.get("baseline_n").is_none());
    assert_eq!(report["baseline_root"], Value::Null);
}

/// A key absent from the baseline gets null comparison fields
#[test]
fn test_baseline_missing_key() {
    let results = TempDir::new().unwrap();
    let baseline = TempDir::new().unwrap();
    write_json(results.path(), "rest/run-1.json", &rest_run(10.0));
    write_json(results.path(), "rest/run-2.json", &rest_run(12.0));
    write_json(
        results.path(),
        "soak/soak.json",
        &json!({"summary": {"cycle_success_rate": 0.99}}),
    );
    write_json(baseline.path(), "rest/run-1.json", &rest_run(30.0));
    write_json(baseline.path(), "rest/run-2.json", &rest_run(31.0));

    let out = TempDir::new().unwrap();
    let output = run_aggregation(&cli(results.path(), Some(baseline.path()), out.path())).unwrap();
    let report = read_json(&output.json_path);

    let soak = find_row(&report, "stability", "cycle_success_rate");
    assert_eq!(soak["baseline_n"], 0);
    assert_eq!(soak["mann_whitney_u"], Value::Null);
    assert_eq!(soak["p_value"], Value::Null);
    assert_eq!(soak["cliffs_delta"], Value::Null);
    assert_eq!(soak["effect_size"], Value::Null);

    let latency = find_row(&report, "rest", "latency_p50_ms");
    assert_eq!(latency["baseline_n"], 2);
    assert_eq!(latency["mann_whitney_u"], 0.0);
    assert_eq!(latency["cliffs_delta"], -1.0);
    assert_eq!(latency["effect_size"], "large");
    assert!(report["baseline_root"].is_string());
}

/// Backup datasets under ops/ produce durations and sizes in MiB
#[test]
fn test_ops_backup_dataset() {
    let results = TempDir::new().unwrap();
    write_json(
        results.path(),
        "ops/ops-run.json",
        &json!({"backup": {"datasets": [
            {"dataset": "d1", "export_ms": 100, "backup_size_bytes": 1048576}
        ]}}),
    );

    let outcome = load_metrics(results.path(), &DiscoveryOptions::default()).unwrap();
    let store = &outcome.store;
    assert_eq!(store.get(&MetricKey::new("ops.backup", "d1", "export_ms")), &[100.0]);
    assert_eq!(
        store.get(&MetricKey::new("ops.backup", "d1", "backup_size_mb")),
        &[1.0]
    );
}

/// Malformed files are skipped without failing the run
#[test]
fn test_malformed_file_is_skipped() {
    let results = TempDir::new().unwrap();
    write_json(results.path(), "rest/run-1.json", &rest_run(10.0));
    std::fs::create_dir_all(results.path().join("deep/nested")).unwrap();
    std::fs::write(results.path().join("deep/nested/broken.json"), "{\"cases\": [").unwrap();
    std::fs::write(results.path().join("rest/truncated.json"), "{").unwrap();

    let outcome = load_metrics(results.path(), &DiscoveryOptions::default()).unwrap();
    assert_eq!(outcome.summary.skipped_unparsable, 2);
    assert_eq!(outcome.summary.files_extracted(), 1);

    let out = TempDir::new().unwrap();
    let output = run_aggregation(&cli(results.path(), None, out.path())).unwrap();
    assert_eq!(output.report.row_count, 5);
}

/// Files outside named directories are recognized by their shape
#[test]
fn test_shape_fallback_and_metadata_skip() {
    let results = TempDir::new().unwrap();
    write_json(
        results.path(),
        "2024-05-01/ws-users.json",
        &json!({
            "config": {"users": 50},
            "notes": [],
            "cases": [{"users": 50, "e2e_latency_ms": {"p50": 4, "p95": 9, "p99": 15}}]
        }),
    );
    write_json(
        results.path(),
        "2024-05-01/run-metadata.json",
        &json!({"scenarios": [], "config": {}}),
    );

    let outcome = load_metrics(results.path(), &DiscoveryOptions::default()).unwrap();
    assert_eq!(outcome.summary.skipped_by_name, 1);
    assert_eq!(
        outcome
            .store
            .get(&MetricKey::new("ws", "users_50", "e2e_p95_ms")),
        &[9.0]
    );
    assert!(outcome.store.iter().all(|(key, _)| key.suite == "ws"));
}

/// The CSV table mirrors the JSON rows in order and column layout
#[test]
fn test_csv_matches_json_rows() {
    let results = TempDir::new().unwrap();
    write_json(results.path(), "rest/run-1.json", &rest_run(10.0));
    write_json(
        results.path(),
        "frontend/fe.json",
        &json!({
            "config": {"routes": ["/"]},
            "cases": [
                {"route": "/", "concurrency": 10, "latency_ms": {"p50": 5}, "requests_per_second": 90},
                {"route": "/admin", "concurrency": 10, "latency_ms": {"p50": 7}}
            ]
        }),
    );

    let out = TempDir::new().unwrap();
    let output = run_aggregation(&cli(results.path(), None, out.path())).unwrap();
    let report = read_json(&output.json_path);
    let csv = std::fs::read_to_string(&output.csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], CSV_COLUMNS.join(","));
    assert_eq!(lines.len() - 1, report["row_count"].as_u64().unwrap() as usize);
    for (line, row) in lines[1..].iter().zip(report["rows"].as_array().unwrap()) {
        let prefix = format!(
            "{},{},{},",
            row["suite"].as_str().unwrap(),
            row["scenario"].as_str().unwrap(),
            row["metric"].as_str().unwrap()
        );
        assert!(line.starts_with(&prefix), "{line} vs {prefix}");
    }
}

/// Same inputs and seed give identical rows, regardless of thread count
#[test]
fn test_rows_are_deterministic() {
    let results = TempDir::new().unwrap();
    for (i, p50) in [10.0, 14.0, 11.0, 19.0, 13.0].iter().enumerate() {
        write_json(results.path(), &format!("rest/run-{i}.json"), &rest_run(*p50));
    }
    let outcome = load_metrics(results.path(), &DiscoveryOptions::default()).unwrap();
    let config = AggregationConfig {
        bootstrap: BootstrapConfig {
            rounds: 1000,
            confidence_level: 0.95,
        },
        seed: 42,
    };

    let parallel = build_rows(&outcome.store, None, &config).unwrap();
    let single = rayon_single_thread(|| build_rows(&outcome.store, None, &config).unwrap());
    assert_eq!(parallel, single);

    let row = parallel
        .iter()
        .find(|r| r.metric == "latency_p50_ms")
        .unwrap();
    assert_eq!(row.median, 13.0);
    assert!(row.ci95_low <= row.median && row.median <= row.ci95_high);
}

fn rayon_single_thread<T: Send>(f: impl FnOnce() -> T + Send) -> T {
    rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap()
        .install(f)
}

/// A missing results root is fatal
#[test]
fn test_missing_results_root() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let err = run_aggregation(&cli(&dir.path().join("absent"), None, out.path())).unwrap_err();
    assert!(format!("{err:#}").contains("results root"));
}
