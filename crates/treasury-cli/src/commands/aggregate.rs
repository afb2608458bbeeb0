//! Aggregate command implementation.
//!
//! Reads monthly bond returns and produces one return per maturity
//! bucket and period.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use treasury_ext_file::{read_bond_returns, write_portfolio_returns};
use treasury_portfolio::{aggregate, AggregationReport, PortfolioReturnRecord};

use crate::cli::OutputFormat;
use crate::commands::{report_row_errors, resolve_path, Context, PipelineOverrides};
use crate::output::{format_percent, print_header, print_output, print_success, KeyValue};

/// Arguments for the aggregate command.
#[derive(Args, Debug)]
pub struct AggregateArgs {
    /// Monthly bond returns (CSV or Parquet)
    pub input: Option<PathBuf>,

    /// Portfolio return file to write. Without it, returns are printed.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// List every rejected record
    #[arg(long)]
    pub show_rejected: bool,

    #[command(flatten)]
    pub overrides: PipelineOverrides,
}

/// A portfolio return row for display.
#[derive(Debug, Serialize, Tabled)]
struct PortfolioRow {
    #[tabled(rename = "Bucket")]
    bucket: u8,
    #[tabled(rename = "Maturity")]
    label: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Return", display_with = "display_return")]
    #[serde(rename = "return")]
    portfolio_return: f64,
    #[tabled(rename = "Bonds")]
    constituents: usize,
}

fn display_return(value: &f64) -> String {
    format_percent(*value)
}

impl From<&PortfolioReturnRecord> for PortfolioRow {
    fn from(r: &PortfolioReturnRecord) -> Self {
        Self {
            bucket: r.bucket.index(),
            label: r.bucket.label(),
            period: r.period.to_string(),
            portfolio_return: r.portfolio_return,
            constituents: r.constituents,
        }
    }
}

/// Execute the aggregate command.
pub fn execute(args: AggregateArgs, ctx: &Context) -> Result<()> {
    let config = args.overrides.apply(ctx.pipeline_config()?);
    let input = resolve_path(args.input, config.input.as_ref(), "input")?;
    let output = args.output.or_else(|| config.output.clone());

    let read = read_bond_returns(&input, &config.read_options())
        .with_context(|| format!("Failed to read {}", input.display()))?;
    report_row_errors(&input, &read.errors, ctx.quiet);

    let result = aggregate(&read.records, &config.aggregation());
    tracing::info!(
        input = %input.display(),
        periods = result.periods.len(),
        weighting = config.weighting.code(),
        "{}",
        result.report
    );

    match output {
        Some(path) => {
            let rows = write_portfolio_returns(&path, &result.records, &config.write_options())
                .with_context(|| format!("Failed to write {}", path.display()))?;

            let mut summary = report_rows(&result.report);
            summary.push(KeyValue::from_count("Periods", result.periods.len()));
            summary.push(KeyValue::from_count("Rows written", rows));
            summary.push(KeyValue::new("Weighting", config.weighting.code()));
            summary.push(KeyValue::new("Layout", config.layout.as_str()));

            if ctx.decorate() {
                print_header("Aggregation");
            }
            print_output(&summary, ctx.format)?;
            if ctx.decorate() {
                print_success(&format!("Wrote {} rows to {}", rows, path.display()));
            }
        }
        None => {
            let rows: Vec<PortfolioRow> = result.records.iter().map(PortfolioRow::from).collect();
            if ctx.decorate() {
                print_header("Portfolio Returns");
            }
            print_output(&rows, ctx.format)?;
            if ctx.decorate() {
                print_header("Completeness");
                print_output(&report_rows(&result.report), OutputFormat::Table)?;
            }
        }
    }

    if args.show_rejected && !ctx.quiet {
        for issue in &result.report.rejected {
            eprintln!("rejected: {issue}");
        }
    }

    Ok(())
}

fn report_rows(report: &AggregationReport) -> Vec<KeyValue> {
    let mut rows = vec![
        KeyValue::from_count("Input records", report.input),
        KeyValue::from_count("Bucketed", report.total_bucketed()),
        KeyValue::from_count("Out of range", report.out_of_range),
        KeyValue::from_count("Rejected", report.rejected_count()),
    ];
    rows.extend(
        report
            .bucketed
            .iter()
            .map(|(bucket, count)| KeyValue::from_count(format!("  Bucket {bucket}"), *count)),
    );
    rows
}
