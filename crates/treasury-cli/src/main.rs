//! Treasury CLI - Maturity-bucketed US Treasury portfolio returns.
//!
//! # Usage
//!
//! ```bash
//! # Daily CRSP extract to monthly bond returns
//! treasury compound daily.parquet --output monthly.parquet
//!
//! # Monthly bond returns to bucket portfolio returns
//! treasury aggregate monthly.parquet --output portfolio.parquet --layout ftsfr
//!
//! # Analytics on the portfolio file
//! treasury summary portfolio.parquet
//! treasury correlation portfolio.parquet --format csv
//!
//! # On-the-run status from auction results
//! treasury run-status auctions.parquet --on-the-run --as-of 2024-06-30
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let ctx = Context::new(cli.format, cli.quiet, cli.config);

    // Execute command
    match cli.command {
        Commands::Aggregate(args) => commands::aggregate::execute(args, &ctx)?,
        Commands::Compound(args) => commands::compound::execute(args, &ctx)?,
        Commands::Summary(args) => commands::summary::execute(args, &ctx)?,
        Commands::Cumulative(args) => commands::cumulative::execute(args, &ctx)?,
        Commands::Correlation(args) => commands::correlation::execute(args, &ctx)?,
        Commands::Auctions(args) => commands::auctions::execute(args, &ctx)?,
        Commands::RunStatus(args) => commands::run_status::execute(args, &ctx)?,
        Commands::Buckets => commands::buckets::execute(&ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}

/// Logs go to stderr so that stdout stays machine-readable.
fn init_logging(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn,treasury=info",
        (false, 1) => "info,treasury=debug",
        (false, _) => "debug,treasury=trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
