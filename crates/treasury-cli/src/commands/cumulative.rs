//! Cumulative command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use treasury_portfolio::{cumulative_growth, CumulativePoint};

use crate::commands::{load_portfolio, Context};
use crate::output::{format_percent, print_header, print_output};

/// Arguments for the cumulative command.
#[derive(Args, Debug)]
pub struct CumulativeArgs {
    /// Portfolio returns (CSV or Parquet, either layout).
    /// Defaults to the configured output file.
    pub input: Option<PathBuf>,

    /// Show only the last period of each bucket
    #[arg(long = "final")]
    pub final_only: bool,
}

/// Growth of $1 for display.
#[derive(Debug, Serialize, Tabled)]
struct CumulativeRow {
    #[tabled(rename = "Bucket")]
    bucket: u8,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Growth of $1", display_with = "display_growth")]
    growth: f64,
    #[tabled(rename = "Cumulative Return", display_with = "display_percent")]
    cumulative_return: f64,
}

fn display_growth(value: &f64) -> String {
    format!("{value:.6}")
}

fn display_percent(value: &f64) -> String {
    format_percent(*value)
}

impl From<&CumulativePoint> for CumulativeRow {
    fn from(p: &CumulativePoint) -> Self {
        Self {
            bucket: p.bucket.index(),
            period: p.period.to_string(),
            growth: p.growth,
            cumulative_return: p.cumulative_return(),
        }
    }
}

/// Execute the cumulative command.
pub fn execute(args: CumulativeArgs, ctx: &Context) -> Result<()> {
    let records = load_portfolio(args.input, ctx)?;
    let points = cumulative_growth(&records);

    let rows: Vec<CumulativeRow> = if args.final_only {
        last_per_bucket(&points).map(CumulativeRow::from).collect()
    } else {
        points.iter().map(CumulativeRow::from).collect()
    };

    if ctx.decorate() {
        print_header("Cumulative Growth");
    }
    print_output(&rows, ctx.format)
}

/// Points are ordered by bucket, then period.
fn last_per_bucket(points: &[CumulativePoint]) -> impl Iterator<Item = &CumulativePoint> {
    points
        .iter()
        .enumerate()
        .filter(|(i, p)| points.get(i + 1).map_or(true, |next| next.bucket != p.bucket))
        .map(|(_, p)| p)
}
