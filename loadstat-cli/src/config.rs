//! Configuration loading from loadstat.toml
//!
//! LoadStat configuration can be specified in a `loadstat.toml` file. The
//! file is discovered by walking up from the current directory, or passed
//! explicitly with `--config`. Command-line flags override file values.

use anyhow::Context;
use loadstat_core::{DiscoveryOptions, RUN_METADATA_FILE};
use loadstat_stats::{
    BootstrapConfig, DEFAULT_BOOTSTRAP_ROUNDS, DEFAULT_CONFIDENCE_LEVEL, DEFAULT_SEED,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file name looked up during discovery
pub const CONFIG_FILE_NAME: &str = "loadstat.toml";

/// LoadStat configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LoadstatConfig {
    /// Statistics configuration
    #[serde(default)]
    pub statistics: StatisticsConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Artifact discovery configuration
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

/// Bootstrap and seeding parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsConfig {
    /// Bootstrap resamples per metric
    #[serde(default = "default_bootstrap_rounds")]
    pub bootstrap_rounds: usize,
    /// Confidence level of the median interval (0.0 to 1.0, exclusive)
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,
    /// Base seed; each metric derives its own generator from it
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            bootstrap_rounds: default_bootstrap_rounds(),
            confidence_level: default_confidence_level(),
            seed: default_seed(),
        }
    }
}

fn default_bootstrap_rounds() -> usize {
    DEFAULT_BOOTSTRAP_ROUNDS
}
fn default_confidence_level() -> f64 {
    DEFAULT_CONFIDENCE_LEVEL
}
fn default_seed() -> u64 {
    DEFAULT_SEED
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Structured report path
    #[serde(default = "default_json_path")]
    pub json: PathBuf,
    /// Tabular report path
    #[serde(default = "default_csv_path")]
    pub csv: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json: default_json_path(),
            csv: default_csv_path(),
        }
    }
}

fn default_json_path() -> PathBuf {
    PathBuf::from("bench-results/paper-stats.json")
}
fn default_csv_path() -> PathBuf {
    PathBuf::from("bench-results/paper-stats.csv")
}

/// Artifact discovery configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// File names never treated as artifacts
    #[serde(default = "default_skip_files")]
    pub skip_files: Vec<String>,
    /// Follow symbolic links while walking result trees
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            skip_files: default_skip_files(),
            follow_symlinks: false,
        }
    }
}

fn default_skip_files() -> Vec<String> {
    vec![RUN_METADATA_FILE.to_string()]
}

impl DiscoveryConfig {
    /// Loader options for this configuration
    pub fn to_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            skip_files: self.skip_files.clone(),
            follow_symlinks: self.follow_symlinks,
        }
    }
}

impl LoadstatConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Discover a configuration file by walking up from `start`
    ///
    /// Returns `Ok(None)` when no file exists; a file that exists but does
    /// not parse is an error.
    pub fn discover_from(start: &Path) -> anyhow::Result<Option<(PathBuf, Self)>> {
        let mut dir = start.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                let config = Self::load(&config_path)?;
                return Ok(Some((config_path, config)));
            }
            if !dir.pop() {
                return Ok(None);
            }
        }
    }

    /// Discover a configuration file starting at the current directory
    pub fn discover() -> anyhow::Result<Option<(PathBuf, Self)>> {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        Self::discover_from(&cwd)
    }

    /// Bootstrap parameters, rejected early when unusable
    pub fn bootstrap(&self) -> anyhow::Result<BootstrapConfig> {
        let config = BootstrapConfig {
            rounds: self.statistics.bootstrap_rounds,
            confidence_level: self.statistics.confidence_level,
        };
        config.validate().context("invalid [statistics] configuration")?;
        Ok(config)
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        format!(
            r#"# LoadStat Configuration

[statistics]
# Bootstrap resamples per metric
bootstrap_rounds = {DEFAULT_BOOTSTRAP_ROUNDS}
# Confidence level of the median interval (0.0 to 1.0)
confidence_level = {DEFAULT_CONFIDENCE_LEVEL}
# Base seed for reproducible intervals
seed = {DEFAULT_SEED}

[output]
# Structured report
json = "bench-results/paper-stats.json"
# Flat table for chart renderers
csv = "bench-results/paper-stats.csv"

[discovery]
# File names never treated as artifacts
skip_files = ["{RUN_METADATA_FILE}"]
# Follow symbolic links while walking result trees
follow_symlinks = false
"#
        )
    }
}
