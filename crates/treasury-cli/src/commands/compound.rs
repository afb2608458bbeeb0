//! Compound command implementation.
//!
//! Turns daily bond returns into monthly bond returns.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;

use treasury_ext_file::{read_daily_returns, write_bond_returns};
use treasury_portfolio::{compound_monthly, CompoundingOutcome};

use crate::commands::{report_row_errors, Context, PipelineOverrides};
use crate::output::{print_header, print_output, print_success, KeyValue};

/// Arguments for the compound command.
#[derive(Args, Debug)]
pub struct CompoundArgs {
    /// Daily bond returns (CSV or Parquet)
    pub input: PathBuf,

    /// Monthly bond return file to write
    #[arg(short, long)]
    pub output: PathBuf,

    /// Keep every instrument type, not only notes and bonds
    #[arg(long)]
    pub all_types: bool,

    #[command(flatten)]
    pub overrides: PipelineOverrides,
}

/// Execute the compound command.
pub fn execute(args: CompoundArgs, ctx: &Context) -> Result<()> {
    let mut config = args.overrides.apply(ctx.pipeline_config()?);
    if args.all_types {
        config.notes_and_bonds_only = false;
    }
    let output = args.output;

    let read = read_daily_returns(&args.input, &config.read_options())
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    report_row_errors(&args.input, &read.errors, ctx.quiet);

    let outcome = compound_monthly(&read.records, &config.compounding());
    tracing::info!(
        input = outcome.input,
        compounded = outcome.compounded,
        filtered = outcome.filtered,
        rejected = outcome.rejected.len(),
        months = outcome.records.len(),
        "compounded daily returns"
    );
    for issue in &outcome.rejected {
        tracing::debug!(
            security_id = %issue.security_id,
            date = %issue.date,
            "rejected daily row: {}",
            issue.kind
        );
    }

    let rows = write_bond_returns(&output, &outcome.records, &config.write_options())
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let mut summary = outcome_rows(&outcome);
    summary.push(KeyValue::from_count("Rows written", rows));

    if ctx.decorate() {
        print_header("Compounding");
    }
    print_output(&summary, ctx.format)?;
    if ctx.decorate() {
        print_success(&format!("Wrote {} rows to {}", rows, output.display()));
    }

    Ok(())
}

fn outcome_rows(outcome: &CompoundingOutcome) -> Vec<KeyValue> {
    vec![
        KeyValue::from_count("Daily rows", outcome.input),
        KeyValue::from_count("Compounded", outcome.compounded),
        KeyValue::from_count("Filtered (type)", outcome.filtered),
        KeyValue::from_count("Rejected", outcome.rejected.len()),
        KeyValue::from_count("Monthly records", outcome.records.len()),
    ]
}
