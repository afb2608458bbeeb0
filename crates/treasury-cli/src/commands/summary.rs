//! Summary command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use treasury_portfolio::{summarize_by_bucket, BucketSummary};

use crate::commands::{load_portfolio, Context};
use crate::output::{format_optional, format_percent, print_header, print_output};

/// Arguments for the summary command.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Portfolio returns (CSV or Parquet, either layout).
    /// Defaults to the configured output file.
    pub input: Option<PathBuf>,
}

/// Per-bucket statistics for display.
#[derive(Debug, Serialize, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Bucket")]
    bucket: u8,
    #[tabled(rename = "Maturity")]
    label: String,
    #[tabled(rename = "Months")]
    count: usize,
    #[tabled(rename = "Mean", display_with = "display_percent")]
    mean: f64,
    #[tabled(rename = "Std Dev", display_with = "format_optional")]
    std_dev: Option<f64>,
    #[tabled(rename = "Min", display_with = "display_percent")]
    min: f64,
    #[tabled(rename = "Max", display_with = "display_percent")]
    max: f64,
    #[tabled(rename = "First")]
    first_period: String,
    #[tabled(rename = "Last")]
    last_period: String,
}

fn display_percent(value: &f64) -> String {
    format_percent(*value)
}

impl From<&BucketSummary> for SummaryRow {
    fn from(s: &BucketSummary) -> Self {
        Self {
            bucket: s.bucket.index(),
            label: s.bucket.label(),
            count: s.count,
            mean: s.mean,
            std_dev: s.std_dev,
            min: s.min,
            max: s.max,
            first_period: s.first_period.to_string(),
            last_period: s.last_period.to_string(),
        }
    }
}

/// Execute the summary command.
pub fn execute(args: SummaryArgs, ctx: &Context) -> Result<()> {
    let records = load_portfolio(args.input, ctx)?;
    let rows: Vec<SummaryRow> = summarize_by_bucket(&records)
        .iter()
        .map(SummaryRow::from)
        .collect();

    if ctx.decorate() {
        print_header("Bucket Return Summary");
    }
    print_output(&rows, ctx.format)
}
