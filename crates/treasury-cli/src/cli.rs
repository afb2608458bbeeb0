//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::commands::{
    AggregateArgs, AuctionsArgs, ConfigArgs, CompoundArgs, CorrelationArgs, CumulativeArgs,
    RunStatusArgs, SummaryArgs,
};

/// Treasury - Maturity-bucketed US Treasury portfolio returns
#[derive(Parser)]
#[command(name = "treasury")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Pipeline configuration file (TOML)
    #[arg(short, long, global = true, env = "TREASURY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate monthly bond returns into maturity-bucket portfolio returns
    Aggregate(AggregateArgs),

    /// Compound daily bond returns into monthly returns
    Compound(CompoundArgs),

    /// Summary statistics per bucket from a portfolio return file
    Summary(SummaryArgs),

    /// Growth of $1 per bucket from a portfolio return file
    Cumulative(CumulativeArgs),

    /// Correlation between bucket return series
    Correlation(CorrelationArgs),

    /// Auction statistics by security type
    Auctions(AuctionsArgs),

    /// On-the-run and off-the-run status from auction issue dates
    RunStatus(RunStatusArgs),

    /// List the maturity buckets
    Buckets,

    /// Manage the pipeline configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// One compact JSON object per line
    Minimal,
}
