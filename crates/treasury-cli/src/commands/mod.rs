//! CLI command implementations.

pub mod aggregate;
pub mod auctions;
pub mod buckets;
pub mod compound;
pub mod config;
pub mod correlation;
pub mod cumulative;
pub mod run_status;
pub mod summary;

// Re-export submodules for convenience
pub use aggregate::AggregateArgs;
pub use auctions::AuctionsArgs;
pub use compound::CompoundArgs;
pub use config::ConfigArgs;
pub use correlation::CorrelationArgs;
pub use cumulative::CumulativeArgs;
pub use run_status::RunStatusArgs;
pub use summary::SummaryArgs;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Args;
use treasury_core::MaturityUnit;
use treasury_ext_file::{read_portfolio_returns, Compression, Layout, RowError};
use treasury_portfolio::{PortfolioReturnRecord, WeightingMethod};

use crate::cli::OutputFormat;
use crate::config::{self as pipeline, PipelineConfig};
use crate::error::{CliError, CliResult};
use crate::output::print_warning;

/// Maximum number of skipped rows listed individually.
const ROW_ERRORS_SHOWN: usize = 10;

/// Global options shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub format: OutputFormat,
    pub quiet: bool,
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Creates a context from the global flags.
    pub fn new(format: OutputFormat, quiet: bool, config_path: Option<PathBuf>) -> Self {
        Self {
            format,
            quiet,
            config_path,
        }
    }

    /// Loads the pipeline configuration named by `--config`, or the default one.
    pub fn pipeline_config(&self) -> CliResult<PipelineConfig> {
        pipeline::load(self.config_path.as_deref())
    }

    /// True when decorations (headers, notices) should be printed.
    pub fn decorate(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Table
    }
}

/// Flags that override the pipeline configuration file.
#[derive(Args, Debug, Default)]
pub struct PipelineOverrides {
    /// Weighting: equal-weight or value-weight
    #[arg(short, long)]
    pub weighting: Option<WeightingMethod>,

    /// Unit of the input maturity column: months, years or days
    #[arg(long)]
    pub maturity_unit: Option<MaturityUnit>,

    /// Output layout: standard or ftsfr
    #[arg(short, long)]
    pub layout: Option<Layout>,

    /// Parquet compression: snappy, zstd or none
    #[arg(long)]
    pub compression: Option<Compression>,

    /// Disable parallel processing
    #[arg(long)]
    pub sequential: bool,
}

impl PipelineOverrides {
    /// Applies the flags that were given on top of `config`.
    pub fn apply(&self, mut config: PipelineConfig) -> PipelineConfig {
        if let Some(weighting) = self.weighting {
            config.weighting = weighting;
        }
        if let Some(unit) = self.maturity_unit {
            config.maturity_unit = unit;
        }
        if let Some(layout) = self.layout {
            config.layout = layout;
        }
        if let Some(compression) = self.compression {
            config.compression = compression;
        }
        if self.sequential {
            config.parallel = false;
        }
        config
    }
}

/// Picks the command-line path, falling back to the configured one.
pub fn resolve_path(
    given: Option<PathBuf>,
    configured: Option<&PathBuf>,
    name: &str,
) -> CliResult<PathBuf> {
    given
        .or_else(|| configured.cloned())
        .ok_or_else(|| CliError::missing_argument(name))
}

/// Reads a portfolio return file, defaulting to the configured output.
pub fn load_portfolio(
    path: Option<PathBuf>,
    ctx: &Context,
) -> anyhow::Result<Vec<PortfolioReturnRecord>> {
    let config = ctx.pipeline_config()?;
    let path = resolve_path(path, config.output.as_ref(), "input")?;

    let read = read_portfolio_returns(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    report_row_errors(&path, &read.errors, ctx.quiet);
    tracing::debug!(
        path = %path.display(),
        records = read.records.len(),
        "loaded portfolio returns"
    );

    Ok(read.records)
}

/// Reports rows skipped while reading `path`.
pub fn report_row_errors(path: &Path, errors: &[RowError], quiet: bool) {
    if errors.is_empty() || quiet {
        return;
    }

    print_warning(&format!(
        "{}: skipped {} malformed row(s)",
        path.display(),
        errors.len()
    ));
    for error in errors.iter().take(ROW_ERRORS_SHOWN) {
        eprintln!("    {error}");
    }
    if errors.len() > ROW_ERRORS_SHOWN {
        eprintln!("    ... and {} more", errors.len() - ROW_ERRORS_SHOWN);
    }
}
