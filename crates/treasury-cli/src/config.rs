//! Pipeline configuration file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use treasury_core::MaturityUnit;
use treasury_ext_file::{Compression, Layout, ReadOptions, WriteOptions};
use treasury_portfolio::{AggregationConfig, CompoundingConfig, WeightingMethod};

use crate::error::{CliError, CliResult};

/// Settings shared by the pipeline commands.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Default input file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,

    /// Default output file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Weighting of constituent returns
    #[serde(default)]
    pub weighting: WeightingMethod,

    /// Unit of the input maturity column
    #[serde(default)]
    pub maturity_unit: MaturityUnit,

    /// Output column layout
    #[serde(default)]
    pub layout: Layout,

    /// Parquet compression
    #[serde(default)]
    pub compression: Compression,

    /// Process periods in parallel
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Minimum number of periods before going parallel
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,

    /// Keep only notes and bonds when compounding daily returns
    #[serde(default = "default_true")]
    pub notes_and_bonds_only: bool,
}

fn default_true() -> bool {
    true
}

fn default_parallel_threshold() -> usize {
    AggregationConfig::default().parallel_threshold
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            weighting: WeightingMethod::default(),
            maturity_unit: MaturityUnit::default(),
            layout: Layout::default(),
            compression: Compression::default(),
            parallel: true,
            parallel_threshold: default_parallel_threshold(),
            notes_and_bonds_only: true,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CliError::config(path, e))?;
        toml::from_str(&content).map_err(|e| CliError::config(path, e))
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::config("<memory>", e))
    }

    /// Aggregation settings.
    pub fn aggregation(&self) -> AggregationConfig {
        AggregationConfig::new()
            .with_weighting(self.weighting)
            .with_parallel(self.parallel)
            .with_threshold(self.parallel_threshold)
    }

    /// Compounding settings. Securities are fanned out, so the threshold
    /// stays at the library default.
    pub fn compounding(&self) -> CompoundingConfig {
        let defaults = CompoundingConfig::default();
        let aggregation = defaults.aggregation.clone().with_parallel(self.parallel);
        defaults
            .with_notes_and_bonds_only(self.notes_and_bonds_only)
            .with_aggregation(aggregation)
    }

    /// Options for reading input files.
    pub fn read_options(&self) -> ReadOptions {
        ReadOptions::new().with_maturity_unit(self.maturity_unit)
    }

    /// Options for writing output files.
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions::new()
            .with_layout(self.layout)
            .with_compression(self.compression)
    }
}

/// Default configuration file location.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .map(|dir| dir.join("treasury").join("pipeline.toml"))
}

/// Loads the configuration.
///
/// An explicit path must exist. Without one, the default location is
/// used when present and built-in defaults otherwise.
pub fn load(explicit: Option<&Path>) -> CliResult<PipelineConfig> {
    if let Some(path) = explicit {
        tracing::debug!(path = %path.display(), "loading configuration");
        return PipelineConfig::from_file(path);
    }

    match default_path() {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "loading configuration");
            PipelineConfig::from_file(&path)
        }
        _ => {
            tracing::debug!("using default configuration");
            Ok(PipelineConfig::default())
        }
    }
}
