#![warn(missing_docs)]
//! LoadStat CLI Library
//!
//! Command-line front end of the aggregator: option parsing, configuration
//! layering, logging setup, and the load → summarize → write pipeline.
//! The `loadstat` binary calls [`run`]; embedders and tests can drive the
//! same pipeline through [`run_with_cli`] or [`run_aggregation`].

mod aggregate;
mod config;

pub use aggregate::{
    AggregationConfig, KeyFilter, ReportInputs, build_report, build_rows, derive_seed,
    format_human_output, load_store,
};
pub use config::*;

use anyhow::Context;
use clap::{Parser, Subcommand};
use loadstat_core::DiscoveryOptions;
use loadstat_report::{Report, write_csv_report, write_json_report};
use rayon::ThreadPoolBuilder;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// LoadStat CLI arguments
#[derive(Parser, Debug)]
#[command(name = "loadstat")]
#[command(
    author,
    version,
    about = "LoadStat - aggregate load-test artifacts into comparison reports"
)]
pub struct Cli {
    /// Optional subcommand (Run, InitConfig); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory containing benchmark outputs
    #[arg(long, global = true)]
    pub results_root: Option<PathBuf>,

    /// Optional baseline directory for significance testing
    #[arg(long, global = true)]
    pub baseline_root: Option<PathBuf>,

    /// Output JSON path (default: config or bench-results/paper-stats.json)
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,

    /// Output CSV path (default: config or bench-results/paper-stats.csv)
    #[arg(long, global = true)]
    pub csv: Option<PathBuf>,

    /// Configuration file (default: discover loadstat.toml upwards)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Keep only metrics whose suite/scenario/metric path matches this regex
    #[arg(long, global = true)]
    pub filter: Option<String>,

    /// Bootstrap resamples per metric
    #[arg(long, global = true)]
    pub rounds: Option<usize>,

    /// Confidence level of the median interval
    #[arg(long, global = true)]
    pub confidence: Option<f64>,

    /// Base seed for bootstrap resampling
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Number of threads for parallel statistics computation
    /// 0 = use all available cores (default), 1 = single-threaded
    #[arg(long, short = 'j', default_value = "0", global = true)]
    pub threads: usize,

    /// Print a human-readable summary of the rows
    #[arg(long, global = true)]
    pub summary: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate a results tree (default)
    Run,
    /// Print a default loadstat.toml
    InitConfig,
}

/// Files written by a run, plus the report they hold
#[derive(Debug)]
pub struct RunOutput {
    /// Absolute path of the JSON report
    pub json_path: PathBuf,
    /// Absolute path of the CSV report
    pub csv_path: PathBuf,
    /// The report that was written
    pub report: Report,
}

/// Run the LoadStat CLI with the process arguments.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if something goes wrong.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the LoadStat CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::InitConfig) => {
            print!("{}", LoadstatConfig::default_toml());
        }
        Some(Commands::Run) | None => {
            let output = run_aggregation(&cli)?;
            if cli.summary {
                print!("{}", format_human_output(&output.report));
            }
            println!("Stats JSON: {}", output.json_path.display());
            println!("Stats CSV:  {}", output.csv_path.display());
        }
    }

    Ok(())
}

/// Initialize logging to stderr; `RUST_LOG` takes precedence over `verbose`
fn init_logging(verbose: bool) {
    let default = if verbose { "loadstat=debug" } else { "loadstat=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Resolve configuration: explicit `--config`, else discovered file, else defaults
fn resolve_config(cli: &Cli) -> anyhow::Result<LoadstatConfig> {
    if let Some(path) = &cli.config {
        return LoadstatConfig::load(path);
    }
    match LoadstatConfig::discover()? {
        Some((path, config)) => {
            info!(path = %path.display(), "Using configuration file");
            Ok(config)
        }
        None => Ok(LoadstatConfig::default()),
    }
}

/// Layer CLI flags over the configuration file
fn apply_overrides(cli: &Cli, mut config: LoadstatConfig) -> LoadstatConfig {
    if let Some(rounds) = cli.rounds {
        config.statistics.bootstrap_rounds = rounds;
    }
    if let Some(confidence) = cli.confidence {
        config.statistics.confidence_level = confidence;
    }
    if let Some(seed) = cli.seed {
        config.statistics.seed = seed;
    }
    if let Some(json) = &cli.output {
        config.output.json = json.clone();
    }
    if let Some(csv) = &cli.csv {
        config.output.csv = csv.clone();
    }
    config
}

/// Run the aggregation pipeline and write both reports
pub fn run_aggregation(cli: &Cli) -> anyhow::Result<RunOutput> {
    let results_root = cli
        .results_root
        .as_deref()
        .context("--results-root is required")?;

    let config = apply_overrides(cli, resolve_config(cli)?);
    let aggregation = AggregationConfig {
        bootstrap: config.bootstrap()?,
        seed: config.statistics.seed,
    };
    let filter = cli.filter.as_deref().map(KeyFilter::new).transpose()?;

    // Configure Rayon thread pool for statistics computation
    if cli.threads > 0 {
        ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .ok();
    }

    let results_root = absolute(results_root)?;
    let baseline_root = cli.baseline_root.as_deref().map(absolute).transpose()?;
    let options: DiscoveryOptions = config.discovery.to_options();

    let current = load_store(&results_root, &options, filter.as_ref(), "results")?;
    let baseline = baseline_root
        .as_deref()
        .map(|root| load_store(root, &options, filter.as_ref(), "baseline"))
        .transpose()?;

    let rows = build_rows(&current, baseline.as_ref(), &aggregation)
        .context("failed to compute statistics")?;
    let report = build_report(
        rows,
        &ReportInputs {
            results_root: &results_root,
            baseline_root: baseline_root.as_deref(),
            config: &aggregation,
        },
    );
    info!(rows = report.row_count, "Report assembled");

    let json_path = absolute(&config.output.json)?;
    let csv_path = absolute(&config.output.csv)?;
    write_json_report(&json_path, &report)
        .with_context(|| format!("failed to write {}", json_path.display()))?;
    write_csv_report(&csv_path, &report.rows)
        .with_context(|| format!("failed to write {}", csv_path.display()))?;

    Ok(RunOutput {
        json_path,
        csv_path,
        report,
    })
}

fn absolute(path: &Path) -> anyhow::Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("failed to resolve {}", path.display()))
}
