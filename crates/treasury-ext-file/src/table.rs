//! Row scanning over CSV and Parquet files.
//!
//! Both formats are read into text cells projected onto a fixed list of
//! columns, so the record parsers never see the physical format.

use std::fmt;
use std::fs::File;
use std::path::Path;

use arrow::array::Array;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::{FileError, FileResult};
use crate::options::FileFormat;

/// A row that could not be turned into a record.
///
/// For CSV, `line` is the physical line number (the header is line 1).
/// For Parquet, it is the 1-based row number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// Line or row number.
    pub line: usize,
    /// What was wrong with the row.
    pub reason: String,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

/// Records read from a file, plus the rows that were skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadOutcome<T> {
    /// Successfully parsed records, in file order.
    pub records: Vec<T>,
    /// Rows that were skipped, in file order.
    pub errors: Vec<RowError>,
}

impl<T> Default for ReadOutcome<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl<T> ReadOutcome<T> {
    /// Number of data rows seen.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.records.len() + self.errors.len()
    }

    /// True when no row was skipped.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, line: usize, parsed: Result<T, String>) {
        match parsed {
            Ok(record) => self.records.push(record),
            Err(reason) => {
                tracing::debug!(line, "skipped row: {reason}");
                self.errors.push(RowError { line, reason });
            }
        }
    }
}

/// A logical column and the header names it may appear under.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColumnSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub required: bool,
}

impl ColumnSpec {
    pub(crate) const fn required(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self {
            name,
            aliases,
            required: true,
        }
    }

    pub(crate) const fn optional(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self {
            name,
            aliases,
            required: false,
        }
    }

    fn matches(&self, header: &str) -> bool {
        let header = normalize(header);
        normalize(self.name) == header || self.aliases.iter().any(|a| normalize(a) == header)
    }
}

/// Lowercases and drops everything but ASCII letters and digits, so
/// `securityType`, `security_type` and `Security Type` compare equal.
pub(crate) fn normalize(header: &str) -> String {
    header
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn resolve(headers: &[String], specs: &[ColumnSpec]) -> FileResult<Vec<Option<usize>>> {
    specs
        .iter()
        .map(|spec| {
            let index = headers.iter().position(|h| spec.matches(h));
            if index.is_none() && spec.required {
                return Err(FileError::missing_column(spec.name, headers));
            }
            Ok(index)
        })
        .collect()
}

fn is_missing(value: &str) -> bool {
    value.is_empty() || matches!(value, "null" | "NULL" | "NA" | "N/A" | "None")
}

/// Reads every data row of a CSV or Parquet file.
///
/// `parse` receives the cells for `specs`, in order; absent optional
/// columns and empty or null cells are `None`. A row that fails to parse
/// is recorded as a [`RowError`] and the read continues.
pub(crate) fn read_rows<T, F>(
    path: &Path,
    specs: &[ColumnSpec],
    parse: F,
) -> FileResult<ReadOutcome<T>>
where
    F: Fn(&[Option<&str>]) -> Result<T, String>,
{
    let outcome = match FileFormat::from_path(path)? {
        FileFormat::Csv => read_csv_rows(path, specs, parse)?,
        FileFormat::Parquet => read_parquet_rows(path, specs, parse)?,
    };

    if !outcome.is_clean() {
        tracing::warn!(
            path = %path.display(),
            skipped = outcome.errors.len(),
            rows = outcome.rows(),
            "skipped malformed rows"
        );
    }

    Ok(outcome)
}

fn read_csv_rows<T, F>(path: &Path, specs: &[ColumnSpec], parse: F) -> FileResult<ReadOutcome<T>>
where
    F: Fn(&[Option<&str>]) -> Result<T, String>,
{
    let file = File::open(path).map_err(|e| FileError::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let columns = resolve(&headers, specs)?;

    let mut outcome = ReadOutcome::default();
    let mut record = csv::StringRecord::new();
    let mut last_line = 1;

    loop {
        match reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {
                let line = record.position().map_or(last_line + 1, |p| p.line() as usize);
                last_line = line;
                let cells: Vec<Option<&str>> = columns
                    .iter()
                    .map(|c| c.and_then(|i| record.get(i)).filter(|v| !is_missing(v)))
                    .collect();
                outcome.push(line, parse(&cells));
            }
            Err(e) => {
                if let csv::ErrorKind::Io(_) = e.kind() {
                    return Err(e.into());
                }
                let line = e.position().map_or(last_line + 1, |p| p.line() as usize);
                last_line = line;
                outcome.push(line, Err(e.to_string()));
            }
        }
    }

    Ok(outcome)
}

fn read_parquet_rows<T, F>(
    path: &Path,
    specs: &[ColumnSpec],
    parse: F,
) -> FileResult<ReadOutcome<T>>
where
    F: Fn(&[Option<&str>]) -> Result<T, String>,
{
    let file = File::open(path).map_err(|e| FileError::io(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let columns = resolve(&headers, specs)?;
    let reader = builder.build()?;

    let options = FormatOptions::default();
    let mut outcome = ReadOutcome::default();
    let mut line = 0;

    for batch in reader {
        let batch = batch?;
        let formatters = columns
            .iter()
            .map(|c| {
                c.map(|i| {
                    let array = batch.column(i);
                    ArrayFormatter::try_new(array.as_ref(), &options).map(|f| (array, f))
                })
                .transpose()
            })
            .collect::<Result<Vec<_>, _>>()?;

        for row in 0..batch.num_rows() {
            line += 1;
            let owned: Vec<Option<String>> = formatters
                .iter()
                .map(|f| {
                    f.as_ref()
                        .filter(|(array, _)| !array.is_null(row))
                        .map(|(_, formatter)| formatter.value(row).to_string())
                })
                .collect();
            let cells: Vec<Option<&str>> = owned
                .iter()
                .map(|c| c.as_deref().map(str::trim).filter(|v| !is_missing(v)))
                .collect();
            outcome.push(line, parse(&cells));
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SPECS: [ColumnSpec; 2] = [
        ColumnSpec::required("security_id", &["id", "cusip"]),
        ColumnSpec::optional("market_value", &["mv"]),
    ];

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn parse_id(cells: &[Option<&str>]) -> Result<(String, Option<String>), String> {
        let id = cells[0].ok_or("missing security_id")?;
        Ok((id.to_string(), cells[1].map(str::to_string)))
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("securityType"), "securitytype");
        assert_eq!(normalize("Security_Type "), "securitytype");
        assert_eq!(normalize("TMATDT_MONTHS"), "tmatdtmonths");
    }

    #[test]
    fn test_aliases_and_optional_column() {
        let file = write_csv("CUSIP,other\nA,1\nB,2\n");

        let outcome = read_rows(file.path(), &SPECS, parse_id).unwrap();

        assert_eq!(
            outcome.records,
            vec![("A".to_string(), None), ("B".to_string(), None)]
        );
        assert!(outcome.is_clean());
    }

    #[test]
    fn test_missing_required_column() {
        let file = write_csv("name,mv\nA,1\n");

        let err = read_rows(file.path(), &SPECS, parse_id).unwrap_err();

        assert!(matches!(
            err,
            FileError::MissingColumn {
                column: "security_id",
                ..
            }
        ));
    }

    #[test]
    fn test_bad_rows_are_collected_with_line_numbers() {
        let file = write_csv("id,mv\nA,1\n,2\nC,3,extra\nD, NA \n");

        let outcome = read_rows(file.path(), &SPECS, parse_id).unwrap();

        assert_eq!(outcome.rows(), 4);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[1], ("D".to_string(), None));
        assert_eq!(outcome.errors[0].line, 3);
        assert_eq!(outcome.errors[0].reason, "missing security_id");
        assert_eq!(outcome.errors[1].line, 4);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = read_rows(Path::new("returns.json"), &SPECS, parse_id).unwrap_err();
        assert!(matches!(err, FileError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = read_rows(Path::new("/nonexistent/returns.csv"), &SPECS, parse_id).unwrap_err();
        assert!(matches!(err, FileError::Io { .. }));
    }
}
