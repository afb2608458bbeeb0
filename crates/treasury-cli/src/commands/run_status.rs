//! Run status command implementation.
//!
//! Marks each auctioned security as on-the-run or off-the-run within its
//! security type and term.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use treasury_core::Date;
use treasury_ext_file::{read_auctions, write_run_status};
use treasury_portfolio::{classify_runs, RunStatusRecord, RunStatusReport};

use crate::commands::{report_row_errors, Context};
use crate::output::{print_header, print_output, print_success, print_warning, KeyValue};

/// Arguments for the run-status command.
#[derive(Args, Debug)]
pub struct RunStatusArgs {
    /// Auction results with securityTerm and issueDate columns (CSV or Parquet)
    pub input: PathBuf,

    /// Status as of this date (YYYY-MM-DD). Defaults to the latest issue.
    #[arg(long, value_parser = parse_as_of)]
    pub as_of: Option<Date>,

    /// Only show this security type (case-insensitive)
    #[arg(short = 't', long)]
    pub security_type: Option<String>,

    /// Only list on-the-run securities
    #[arg(long)]
    pub on_the_run: bool,

    /// Run status file to write. Without it, securities are printed.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn parse_as_of(value: &str) -> Result<Date, String> {
    Date::parse(value).map_err(|e| e.to_string())
}

/// A security's run status for display.
#[derive(Debug, Serialize, Tabled)]
struct RunStatusRow {
    #[tabled(rename = "Type")]
    security_type: String,
    #[tabled(rename = "Term")]
    security_term: String,
    #[tabled(rename = "CUSIP")]
    cusip: String,
    #[tabled(rename = "Issued")]
    issue_date: String,
    #[tabled(rename = "Run")]
    run: usize,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&RunStatusRecord> for RunStatusRow {
    fn from(r: &RunStatusRecord) -> Self {
        Self {
            security_type: r.security_type.clone(),
            security_term: r.security_term.clone(),
            cusip: r.cusip.to_string(),
            issue_date: r.issue_date.to_string(),
            run: r.run,
            status: r.status.to_string(),
        }
    }
}

/// Execute the run-status command.
pub fn execute(args: RunStatusArgs, ctx: &Context) -> Result<()> {
    let config = ctx.pipeline_config()?;

    let read = read_auctions(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    report_row_errors(&args.input, &read.errors, ctx.quiet);

    let report = classify_runs(&read.records, args.as_of);
    if report.skipped > 0 && !ctx.quiet {
        print_warning(&format!(
            "{} auction row(s) without a term or issue date were left out",
            report.skipped
        ));
    }
    tracing::info!(
        securities = report.records.len(),
        on_the_run = report.on_the_run().count(),
        skipped = report.skipped,
        "classified run status"
    );

    let selected = select(&report, &args);

    match &args.output {
        Some(path) => {
            let rows = write_run_status(path, &selected, &config.write_options())
                .with_context(|| format!("Failed to write {}", path.display()))?;

            let summary = vec![
                KeyValue::from_count("Auction rows", read.records.len()),
                KeyValue::from_count("Securities", report.records.len()),
                KeyValue::from_count("On the run", report.on_the_run().count()),
                KeyValue::from_count("Skipped", report.skipped),
                KeyValue::from_count("Not yet issued", report.not_yet_issued),
                KeyValue::from_count("Rows written", rows),
            ];
            if ctx.decorate() {
                print_header("Run Status");
            }
            print_output(&summary, ctx.format)?;
            if ctx.decorate() {
                print_success(&format!("Wrote {} rows to {}", rows, path.display()));
            }
        }
        None => {
            let rows: Vec<RunStatusRow> = selected.iter().map(RunStatusRow::from).collect();
            if ctx.decorate() {
                print_header("Run Status");
            }
            print_output(&rows, ctx.format)?;
        }
    }

    Ok(())
}

fn select(report: &RunStatusReport, args: &RunStatusArgs) -> Vec<RunStatusRecord> {
    report
        .records
        .iter()
        .filter(|r| !args.on_the_run || r.run == 0)
        .filter(|r| {
            args.security_type
                .as_deref()
                .map_or(true, |t| r.security_type.eq_ignore_ascii_case(t.trim()))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use treasury_core::{AuctionRecord, SecurityId};

    fn auction(cusip: &str, security_type: &str, issued: &str) -> AuctionRecord {
        AuctionRecord {
            cusip: SecurityId::new(cusip),
            security_type: security_type.to_string(),
            security_term: Some("10-Year".to_string()),
            auction_date: None,
            issue_date: Some(Date::parse(issued).unwrap()),
            total_accepted: None,
            total_tendered: None,
            bid_to_cover_ratio: None,
        }
    }

    fn args(security_type: Option<&str>, on_the_run: bool) -> RunStatusArgs {
        RunStatusArgs {
            input: PathBuf::from("auctions.csv"),
            as_of: None,
            security_type: security_type.map(str::to_string),
            on_the_run,
            output: None,
        }
    }

    #[test]
    fn test_select_filters() {
        let report = classify_runs(
            &[
                auction("N1", "Note", "2024-01-15"),
                auction("N2", "Note", "2024-02-15"),
                auction("T1", "TIPS", "2024-01-31"),
            ],
            None,
        );

        assert_eq!(select(&report, &args(None, false)).len(), 3);
        assert_eq!(select(&report, &args(None, true)).len(), 2);

        let notes = select(&report, &args(Some("note"), true));
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].cusip.as_str(), "N2");
    }

    #[test]
    fn test_parse_as_of() {
        assert_eq!(
            parse_as_of("2024-02-15").unwrap(),
            Date::from_ymd(2024, 2, 15).unwrap()
        );
        assert!(parse_as_of("February").is_err());
    }

    #[test]
    fn test_row_from_record() {
        let report = classify_runs(&[auction("N1", "Note", "2024-01-15")], None);
        let row = RunStatusRow::from(&report.records[0]);
        assert_eq!(row.status, "on-the-run");
        assert_eq!(row.issue_date, "2024-01-15");
    }
}
