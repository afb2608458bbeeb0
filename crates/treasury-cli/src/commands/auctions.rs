//! Auctions command implementation.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use treasury_ext_file::read_auctions;
use treasury_portfolio::{summarize_auctions, AuctionSummary};

use crate::commands::{report_row_errors, Context};
use crate::output::{format_optional, print_header, print_output};

/// Arguments for the auctions command.
#[derive(Args, Debug)]
pub struct AuctionsArgs {
    /// Auction results (CSV or Parquet)
    pub input: PathBuf,

    /// Only show this security type (case-insensitive)
    #[arg(short = 't', long)]
    pub security_type: Option<String>,
}

/// Auction statistics for display.
#[derive(Debug, Serialize, Tabled)]
struct AuctionRow {
    #[tabled(rename = "Type")]
    security_type: String,
    #[tabled(rename = "Auctions")]
    auctions: usize,
    #[tabled(rename = "With Accepted")]
    accepted_count: usize,
    #[tabled(rename = "Total Accepted")]
    total_accepted: Decimal,
    #[tabled(rename = "Mean Accepted", display_with = "display_decimal")]
    mean_accepted: Option<Decimal>,
    #[tabled(rename = "Bid/Cover Mean", display_with = "format_optional")]
    bid_to_cover_mean: Option<f64>,
    #[tabled(rename = "Bid/Cover Std", display_with = "format_optional")]
    bid_to_cover_std: Option<f64>,
    #[tabled(rename = "First", display_with = "display_date")]
    first_auction: Option<String>,
    #[tabled(rename = "Last", display_with = "display_date")]
    last_auction: Option<String>,
}

fn display_decimal(value: &Option<Decimal>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.round_dp(2).to_string())
}

fn display_date(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

impl From<&AuctionSummary> for AuctionRow {
    fn from(s: &AuctionSummary) -> Self {
        Self {
            security_type: s.security_type.clone(),
            auctions: s.auctions,
            accepted_count: s.accepted_count,
            total_accepted: s.total_accepted,
            mean_accepted: s.mean_accepted,
            bid_to_cover_mean: s.bid_to_cover_mean,
            bid_to_cover_std: s.bid_to_cover_std,
            first_auction: s.first_auction.map(|d| d.to_string()),
            last_auction: s.last_auction.map(|d| d.to_string()),
        }
    }
}

/// Execute the auctions command.
pub fn execute(args: AuctionsArgs, ctx: &Context) -> Result<()> {
    let read = read_auctions(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    report_row_errors(&args.input, &read.errors, ctx.quiet);

    let rows: Vec<AuctionRow> = summarize_auctions(&read.records)
        .iter()
        .filter(|s| {
            args.security_type
                .as_deref()
                .map_or(true, |t| s.security_type.eq_ignore_ascii_case(t.trim()))
        })
        .map(AuctionRow::from)
        .collect();
    tracing::info!(auctions = read.records.len(), types = rows.len(), "summarized auctions");

    if ctx.decorate() {
        print_header("Auction Statistics");
    }
    print_output(&rows, ctx.format)
}
