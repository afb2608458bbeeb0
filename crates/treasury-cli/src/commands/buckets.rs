//! Buckets command implementation.

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

use treasury_portfolio::MaturityBucket;

use crate::commands::Context;
use crate::output::{print_header, print_output};

/// A maturity bucket for display.
#[derive(Debug, Serialize, Tabled)]
struct BucketRow {
    #[tabled(rename = "Bucket")]
    bucket: u8,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "From (months)")]
    lower_months: f64,
    #[tabled(rename = "To (months)")]
    upper_months: f64,
}

fn bucket_rows() -> Vec<BucketRow> {
    MaturityBucket::all()
        .iter()
        .map(|b| BucketRow {
            bucket: b.index(),
            label: b.label(),
            lower_months: b.lower_months(),
            upper_months: b.upper_months(),
        })
        .collect()
}

/// Execute the buckets command.
pub fn execute(ctx: &Context) -> Result<()> {
    if ctx.decorate() {
        print_header("Maturity Buckets");
    }
    print_output(&bucket_rows(), ctx.format)?;
    if ctx.decorate() {
        println!("Each bucket includes its lower bound and excludes its upper bound.");
    }
    Ok(())
}
