//! Record writers.
//!
//! Output format follows the file extension. Parquet files are written
//! in one pass with a single schema; parent directories are created.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Date32Array, Float64Array, StringArray, UInt32Array, UInt8Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use treasury_core::BondReturnRecord;
use treasury_portfolio::{PortfolioReturnRecord, RunStatusRecord};

use crate::error::{FileError, FileResult};
use crate::options::{FileFormat, Layout, WriteOptions};

/// Writes portfolio returns, one row per `(bucket, period)`.
///
/// Standard layout: `bucket` (UInt8), `period` (Utf8, `YYYY-MM`),
/// `return` (Float64), `constituents` (UInt32).
/// FTSFR layout: `unique_id` (Utf8 bucket index), `ds` (Date32 month end),
/// `y` (Float64).
///
/// # Returns
///
/// Number of rows written.
pub fn write_portfolio_returns(
    path: impl AsRef<Path>,
    records: &[PortfolioReturnRecord],
    options: &WriteOptions,
) -> FileResult<usize> {
    let path = path.as_ref();
    match FileFormat::from_path(path)? {
        FileFormat::Parquet => {
            write_parquet(path, &portfolio_batch(records, options.layout)?, options)?;
        }
        FileFormat::Csv => match options.layout {
            Layout::Standard => write_csv(
                path,
                &STANDARD_PORTFOLIO_HEADERS,
                records.iter().map(StandardPortfolioRow::from),
            )?,
            Layout::Ftsfr => write_csv(
                path,
                &FTSFR_HEADERS,
                records.iter().map(|r| FtsfrRow {
                    unique_id: r.bucket.index().to_string(),
                    ds: r.period.end_date().to_string(),
                    y: r.portfolio_return,
                }),
            )?,
        },
    }

    tracing::debug!(
        path = %path.display(),
        rows = records.len(),
        layout = %options.layout,
        "wrote portfolio returns"
    );
    Ok(records.len())
}

/// Writes monthly bond returns.
///
/// Standard layout: `security_id`, `period`, `maturity` (months),
/// `return`, `market_value` (nullable). FTSFR layout: `unique_id`
/// (security id), `ds` (month end), `y`.
///
/// # Returns
///
/// Number of rows written.
pub fn write_bond_returns(
    path: impl AsRef<Path>,
    records: &[BondReturnRecord],
    options: &WriteOptions,
) -> FileResult<usize> {
    let path = path.as_ref();
    match FileFormat::from_path(path)? {
        FileFormat::Parquet => {
            write_parquet(path, &bond_batch(records, options.layout)?, options)?;
        }
        FileFormat::Csv => match options.layout {
            Layout::Standard => write_csv(
                path,
                &STANDARD_BOND_HEADERS,
                records.iter().map(StandardBondRow::from),
            )?,
            Layout::Ftsfr => write_csv(
                path,
                &FTSFR_HEADERS,
                records.iter().map(|r| FtsfrRow {
                    unique_id: r.security_id.to_string(),
                    ds: r.period.end_date().to_string(),
                    y: r.total_return,
                }),
            )?,
        },
    }

    tracing::debug!(
        path = %path.display(),
        rows = records.len(),
        layout = %options.layout,
        "wrote bond returns"
    );
    Ok(records.len())
}

/// Writes on-the-run status, one row per security.
///
/// Columns: `cusip`, `security_type`, `security_term`, `issue_date`
/// (Date32 in Parquet), `run` (UInt32, 0 is on-the-run) and `status`.
/// The layout option does not apply.
///
/// # Returns
///
/// Number of rows written.
pub fn write_run_status(
    path: impl AsRef<Path>,
    records: &[RunStatusRecord],
    options: &WriteOptions,
) -> FileResult<usize> {
    let path = path.as_ref();
    match FileFormat::from_path(path)? {
        FileFormat::Parquet => write_parquet(path, &run_status_batch(records)?, options)?,
        FileFormat::Csv => write_csv(
            path,
            &RUN_STATUS_HEADERS,
            records.iter().map(RunStatusRow::from),
        )?,
    }

    tracing::debug!(path = %path.display(), rows = records.len(), "wrote run status");
    Ok(records.len())
}

// =============================================================================
// ARROW BATCHES
// =============================================================================

fn portfolio_batch(records: &[PortfolioReturnRecord], layout: Layout) -> FileResult<RecordBatch> {
    let (fields, columns): (Vec<Field>, Vec<ArrayRef>) = match layout {
        Layout::Standard => (
            vec![
                Field::new("bucket", DataType::UInt8, false),
                Field::new("period", DataType::Utf8, false),
                Field::new("return", DataType::Float64, false),
                Field::new("constituents", DataType::UInt32, false),
            ],
            vec![
                Arc::new(UInt8Array::from_iter_values(
                    records.iter().map(|r| r.bucket.index()),
                )),
                Arc::new(StringArray::from_iter_values(
                    records.iter().map(|r| r.period.to_string()),
                )),
                Arc::new(Float64Array::from_iter_values(
                    records.iter().map(|r| r.portfolio_return),
                )),
                Arc::new(UInt32Array::from_iter_values(
                    records
                        .iter()
                        .map(|r| u32::try_from(r.constituents).unwrap_or(u32::MAX)),
                )),
            ],
        ),
        Layout::Ftsfr => ftsfr_columns(
            records.iter().map(|r| r.bucket.index().to_string()),
            records.iter().map(|r| r.period.end_date().days_since_epoch()),
            records.iter().map(|r| r.portfolio_return),
        ),
    };

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

fn bond_batch(records: &[BondReturnRecord], layout: Layout) -> FileResult<RecordBatch> {
    let (fields, columns): (Vec<Field>, Vec<ArrayRef>) = match layout {
        Layout::Standard => (
            vec![
                Field::new("security_id", DataType::Utf8, false),
                Field::new("period", DataType::Utf8, false),
                Field::new("maturity", DataType::Float64, false),
                Field::new("return", DataType::Float64, false),
                Field::new("market_value", DataType::Float64, true),
            ],
            vec![
                Arc::new(StringArray::from_iter_values(
                    records.iter().map(|r| r.security_id.as_str()),
                )),
                Arc::new(StringArray::from_iter_values(
                    records.iter().map(|r| r.period.to_string()),
                )),
                Arc::new(Float64Array::from_iter_values(
                    records.iter().map(|r| r.maturity_months),
                )),
                Arc::new(Float64Array::from_iter_values(
                    records.iter().map(|r| r.total_return),
                )),
                Arc::new(Float64Array::from_iter(
                    records
                        .iter()
                        .map(|r| r.market_value.and_then(|mv| mv.to_f64())),
                )),
            ],
        ),
        Layout::Ftsfr => ftsfr_columns(
            records.iter().map(|r| r.security_id.to_string()),
            records.iter().map(|r| r.period.end_date().days_since_epoch()),
            records.iter().map(|r| r.total_return),
        ),
    };

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

fn run_status_batch(records: &[RunStatusRecord]) -> FileResult<RecordBatch> {
    let fields = vec![
        Field::new("cusip", DataType::Utf8, false),
        Field::new("security_type", DataType::Utf8, false),
        Field::new("security_term", DataType::Utf8, false),
        Field::new("issue_date", DataType::Date32, false),
        Field::new("run", DataType::UInt32, false),
        Field::new("status", DataType::Utf8, false),
    ];
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.cusip.as_str()),
        )),
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.security_type.as_str()),
        )),
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.security_term.as_str()),
        )),
        Arc::new(Date32Array::from_iter_values(
            records.iter().map(|r| r.issue_date.days_since_epoch()),
        )),
        Arc::new(UInt32Array::from_iter_values(
            records
                .iter()
                .map(|r| u32::try_from(r.run).unwrap_or(u32::MAX)),
        )),
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.status.as_str()),
        )),
    ];

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

fn ftsfr_columns(
    ids: impl Iterator<Item = String>,
    days: impl Iterator<Item = i32>,
    values: impl Iterator<Item = f64>,
) -> (Vec<Field>, Vec<ArrayRef>) {
    (
        vec![
            Field::new("unique_id", DataType::Utf8, false),
            Field::new("ds", DataType::Date32, false),
            Field::new("y", DataType::Float64, false),
        ],
        vec![
            Arc::new(StringArray::from_iter_values(ids)),
            Arc::new(Date32Array::from_iter_values(days)),
            Arc::new(Float64Array::from_iter_values(values)),
        ],
    )
}

// =============================================================================
// FILE OUTPUT
// =============================================================================

fn create_parent(path: &Path) -> FileResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| FileError::io(parent, e))?;
    }
    Ok(())
}

fn write_parquet(path: &Path, batch: &RecordBatch, options: &WriteOptions) -> FileResult<()> {
    create_parent(path)?;

    let file = File::create(path).map_err(|e| FileError::io(path, e))?;
    let props = WriterProperties::builder()
        .set_compression(options.compression.to_parquet())
        .set_max_row_group_size(options.max_row_group_size)
        .build();

    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;

    Ok(())
}

/// Writes `headers` first so an empty batch still produces a readable file.
fn write_csv<R: Serialize>(
    path: &Path,
    headers: &[&str],
    rows: impl Iterator<Item = R>,
) -> FileResult<()> {
    create_parent(path)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(headers)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(|e| FileError::io(path, e))?;

    Ok(())
}

const STANDARD_PORTFOLIO_HEADERS: [&str; 4] = ["bucket", "period", "return", "constituents"];

const STANDARD_BOND_HEADERS: [&str; 5] =
    ["security_id", "period", "maturity", "return", "market_value"];

const FTSFR_HEADERS: [&str; 3] = ["unique_id", "ds", "y"];

const RUN_STATUS_HEADERS: [&str; 6] = [
    "cusip",
    "security_type",
    "security_term",
    "issue_date",
    "run",
    "status",
];

#[derive(Serialize)]
struct StandardPortfolioRow {
    bucket: u8,
    period: String,
    #[serde(rename = "return")]
    portfolio_return: f64,
    constituents: usize,
}

impl From<&PortfolioReturnRecord> for StandardPortfolioRow {
    fn from(r: &PortfolioReturnRecord) -> Self {
        Self {
            bucket: r.bucket.index(),
            period: r.period.to_string(),
            portfolio_return: r.portfolio_return,
            constituents: r.constituents,
        }
    }
}

#[derive(Serialize)]
struct StandardBondRow<'a> {
    security_id: &'a str,
    period: String,
    maturity: f64,
    #[serde(rename = "return")]
    total_return: f64,
    market_value: Option<String>,
}

impl<'a> From<&'a BondReturnRecord> for StandardBondRow<'a> {
    fn from(r: &'a BondReturnRecord) -> Self {
        Self {
            security_id: r.security_id.as_str(),
            period: r.period.to_string(),
            maturity: r.maturity_months,
            total_return: r.total_return,
            market_value: r.market_value.map(|mv| mv.to_string()),
        }
    }
}

#[derive(Serialize)]
struct FtsfrRow {
    unique_id: String,
    ds: String,
    y: f64,
}

#[derive(Serialize)]
struct RunStatusRow<'a> {
    cusip: &'a str,
    security_type: &'a str,
    security_term: &'a str,
    issue_date: String,
    run: usize,
    status: &'static str,
}

impl<'a> From<&'a RunStatusRecord> for RunStatusRow<'a> {
    fn from(r: &'a RunStatusRecord) -> Self {
        Self {
            cusip: r.cusip.as_str(),
            security_type: &r.security_type,
            security_term: &r.security_term,
            issue_date: r.issue_date.to_string(),
            run: r.run,
            status: r.status.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Compression;
    use crate::readers::{read_bond_returns, read_portfolio_returns};
    use crate::ReadOptions;
    use approx::assert_relative_eq;
    use arrow::array::Array;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use rust_decimal_macros::dec;
    use treasury_core::Period;
    use treasury_portfolio::MaturityBucket;

    // ===== TEST FIXTURES =====

    fn portfolio_records() -> Vec<PortfolioReturnRecord> {
        let jan = Period::new(2020, 1).unwrap();
        let feb = Period::new(2020, 2).unwrap();
        vec![
            PortfolioReturnRecord::new(MaturityBucket::new(1).unwrap(), jan, 0.02, 2),
            PortfolioReturnRecord::new(MaturityBucket::new(10).unwrap(), jan, -0.0035, 7),
            PortfolioReturnRecord::new(MaturityBucket::new(1).unwrap(), feb, 0.001, 3),
        ]
    }

    fn read_batch(path: &Path) -> RecordBatch {
        let file = File::open(path).unwrap();
        let mut reader = ParquetRecordBatchReaderBuilder::try_new(file)
            .unwrap()
            .build()
            .unwrap();
        reader.next().unwrap().unwrap()
    }

    // ===== PORTFOLIO RETURNS =====

    #[test]
    fn test_standard_parquet_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/portfolio.parquet");

        let rows = write_portfolio_returns(&path, &portfolio_records(), &WriteOptions::default())
            .unwrap();
        assert_eq!(rows, 3);

        let batch = read_batch(&path);
        let schema = batch.schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names, vec!["bucket", "period", "return", "constituents"]);
        assert_eq!(schema.field(0).data_type(), &DataType::UInt8);
        assert_eq!(schema.field(3).data_type(), &DataType::UInt32);
        assert_eq!(batch.num_rows(), 3);
    }

    #[test]
    fn test_ftsfr_parquet_uses_month_end_dates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ftsfr.parquet");
        let options = WriteOptions::new()
            .with_layout(Layout::Ftsfr)
            .with_compression(Compression::Zstd);

        write_portfolio_returns(&path, &portfolio_records(), &options).unwrap();

        let batch = read_batch(&path);
        assert_eq!(batch.schema().field(1).data_type(), &DataType::Date32);
        let ds = batch
            .column(1)
            .as_any()
            .downcast_ref::<Date32Array>()
            .unwrap();
        // 2020-01-31
        assert_eq!(ds.value(0), 18292);
        let ids = batch
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(ids.value(1), "10");
        assert!(!ids.is_null(1));
    }

    #[test]
    fn test_portfolio_round_trip_both_layouts_and_formats() {
        let dir = tempfile::tempdir().unwrap();
        let records = portfolio_records();

        for (name, layout) in [
            ("a.parquet", Layout::Standard),
            ("b.parquet", Layout::Ftsfr),
            ("c.csv", Layout::Standard),
            ("d.csv", Layout::Ftsfr),
        ] {
            let path = dir.path().join(name);
            let options = WriteOptions::new()
                .with_layout(layout)
                .with_compression(Compression::None);
            write_portfolio_returns(&path, &records, &options).unwrap();

            let read = read_portfolio_returns(&path).unwrap();
            assert!(read.is_clean(), "{name}: {:?}", read.errors);
            assert_eq!(read.records.len(), records.len(), "{name}");

            for (got, want) in read.records.iter().zip(&records) {
                assert_eq!(got.bucket, want.bucket, "{name}");
                assert_eq!(got.period, want.period, "{name}");
                assert_relative_eq!(got.portfolio_return, want.portfolio_return);
                let constituents = if layout == Layout::Ftsfr { 0 } else { want.constituents };
                assert_eq!(got.constituents, constituents, "{name}");
            }
        }
    }

    #[test]
    fn test_empty_output_writes_schema_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.parquet");

        write_portfolio_returns(&path, &[], &WriteOptions::default()).unwrap();

        let read = read_portfolio_returns(&path).unwrap();
        assert!(read.records.is_empty());
    }

    #[test]
    fn test_empty_csv_keeps_header_in_both_layouts() {
        let dir = tempfile::tempdir().unwrap();

        for (name, layout, header) in [
            ("standard.csv", Layout::Standard, "bucket,period,return,constituents"),
            ("ftsfr.csv", Layout::Ftsfr, "unique_id,ds,y"),
        ] {
            let path = dir.path().join(name);
            let options = WriteOptions::new().with_layout(layout);

            let rows = write_portfolio_returns(&path, &[], &options).unwrap();
            assert_eq!(rows, 0);
            assert_eq!(fs::read_to_string(&path).unwrap().trim_end(), header);

            let read = read_portfolio_returns(&path).unwrap();
            assert!(read.records.is_empty(), "{name}");
            assert!(read.is_clean(), "{name}");
        }

        let bonds = dir.path().join("bonds.csv");
        write_bond_returns(&bonds, &[], &WriteOptions::default()).unwrap();
        let read = read_bond_returns(&bonds, &ReadOptions::default()).unwrap();
        assert!(read.records.is_empty());
    }

    #[test]
    fn test_unsupported_output_extension() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_portfolio_returns(
            dir.path().join("out.xlsx"),
            &portfolio_records(),
            &WriteOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, FileError::UnsupportedFormat { .. }));
    }

    // ===== BOND RETURNS =====

    #[test]
    fn test_bond_returns_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let jan = Period::new(2020, 1).unwrap();
        let records = vec![
            BondReturnRecord::new("912828UN8", jan, 29.5, 0.0302).with_market_value(dec!(1250.5)),
            BondReturnRecord::new("912828YW4", jan, 4.0, -0.001),
        ];

        for name in ["bonds.parquet", "bonds.csv"] {
            let path = dir.path().join(name);
            write_bond_returns(&path, &records, &WriteOptions::default()).unwrap();

            let read = read_bond_returns(&path, &ReadOptions::default()).unwrap();
            assert!(read.is_clean(), "{name}: {:?}", read.errors);
            assert_eq!(read.records, records, "{name}");
        }
    }

    #[test]
    fn test_bond_returns_ftsfr_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ftsfr_bonds.parquet");
        let records = vec![BondReturnRecord::new(
            "912828UN8",
            Period::new(2021, 2).unwrap(),
            29.5,
            0.01,
        )];

        write_bond_returns(&path, &records, &WriteOptions::new().with_layout(Layout::Ftsfr))
            .unwrap();

        let batch = read_batch(&path);
        let names: Vec<String> = batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();
        assert_eq!(names, vec!["unique_id", "ds", "y"]);
    }

    // ===== RUN STATUS =====

    fn run_status_records() -> Vec<RunStatusRecord> {
        use treasury_core::{AuctionRecord, Date, SecurityId};

        let auction = |cusip: &str, issued: &str| AuctionRecord {
            cusip: SecurityId::new(cusip),
            security_type: "Note".to_string(),
            security_term: Some("2-Year".to_string()),
            auction_date: None,
            issue_date: Some(Date::parse(issued).unwrap()),
            total_accepted: None,
            total_tendered: None,
            bid_to_cover_ratio: None,
        };
        treasury_portfolio::classify_runs(
            &[auction("OLD", "2024-01-31"), auction("NEW", "2024-02-29")],
            None,
        )
        .records
    }

    #[test]
    fn test_run_status_parquet_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run_status.parquet");

        let rows = write_run_status(&path, &run_status_records(), &WriteOptions::default())
            .unwrap();
        assert_eq!(rows, 2);

        let batch = read_batch(&path);
        assert_eq!(batch.schema().field(3).data_type(), &DataType::Date32);
        let status = batch
            .column(5)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(status.value(0), "on-the-run");
        assert_eq!(status.value(1), "off-the-run");
        let run = batch
            .column(4)
            .as_any()
            .downcast_ref::<UInt32Array>()
            .unwrap();
        assert_eq!(run.value(1), 1);
    }

    #[test]
    fn test_run_status_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run_status.csv");

        write_run_status(&path, &run_status_records(), &WriteOptions::default()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "cusip,security_type,security_term,issue_date,run,status");
        assert_eq!(lines[1], "NEW,Note,2-Year,2024-02-29,0,on-the-run");
        assert_eq!(lines[2], "OLD,Note,2-Year,2024-01-31,1,off-the-run");
    }
}
