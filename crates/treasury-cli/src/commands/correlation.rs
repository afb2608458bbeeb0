//! Correlation command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tabled::builder::Builder;
use tabled::settings::Style;

use treasury_portfolio::{correlation_matrix, CorrelationMatrix};

use crate::cli::OutputFormat;
use crate::commands::{load_portfolio, Context};
use crate::output::print_header;

/// Arguments for the correlation command.
#[derive(Args, Debug)]
pub struct CorrelationArgs {
    /// Portfolio returns (CSV or Parquet, either layout).
    /// Defaults to the configured output file.
    pub input: Option<PathBuf>,

    /// Decimal places in table output
    #[arg(long, default_value = "3")]
    pub precision: usize,
}

/// Execute the correlation command.
pub fn execute(args: CorrelationArgs, ctx: &Context) -> Result<()> {
    let records = load_portfolio(args.input, ctx)?;
    let matrix = correlation_matrix(&records);

    match ctx.format {
        OutputFormat::Table => {
            if ctx.decorate() {
                print_header("Bucket Return Correlations");
            }
            if matrix.is_empty() {
                println!("No results.");
            } else {
                println!("{}", render_table(&matrix, args.precision));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&matrix)?);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for record in csv_records(&matrix) {
                wtr.write_record(&record)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Minimal => {
            for (bucket, row) in matrix.buckets.iter().zip(&matrix.values) {
                println!("{}", serde_json::json!({ "bucket": bucket, "values": row }));
            }
        }
    }

    Ok(())
}

fn cell(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.precision$}"))
}

fn render_table(matrix: &CorrelationMatrix, precision: usize) -> String {
    let mut builder = Builder::default();
    builder.push_record(
        std::iter::once("Bucket".to_string()).chain(matrix.buckets.iter().map(|b| b.to_string())),
    );
    for (bucket, row) in matrix.buckets.iter().zip(&matrix.values) {
        builder.push_record(
            std::iter::once(bucket.label())
                .chain(row.iter().map(|value| cell(*value, precision))),
        );
    }

    builder.build().with(Style::rounded()).to_string()
}

fn csv_records(matrix: &CorrelationMatrix) -> Vec<Vec<String>> {
    let header = std::iter::once("bucket".to_string())
        .chain(matrix.buckets.iter().map(|b| b.to_string()))
        .collect();

    std::iter::once(header)
        .chain(matrix.buckets.iter().zip(&matrix.values).map(|(bucket, row)| {
            std::iter::once(bucket.to_string())
                .chain(row.iter().map(|v| v.map(|v| v.to_string()).unwrap_or_default()))
                .collect()
        }))
        .collect()
}
