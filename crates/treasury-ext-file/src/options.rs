//! File formats and read/write options.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use treasury_core::MaturityUnit;

use crate::error::{FileError, FileResult};

/// Tabular file format, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// Apache Parquet.
    Parquet,
}

impl FileFormat {
    /// Detects the format from the file extension (case-insensitive).
    pub fn from_path(path: impl AsRef<Path>) -> FileResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("parquet" | "pq") => Ok(Self::Parquet),
            _ => Err(FileError::unsupported_format(path)),
        }
    }
}

/// Column layout of written files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Named columns: `bucket`, `period`, `return`, `constituents`.
    #[default]
    Standard,
    /// Long forecasting layout: `unique_id`, `ds` (month end), `y`.
    Ftsfr,
}

impl Layout {
    /// Configuration value for the layout.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Ftsfr => "ftsfr",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "ftsfr" => Ok(Self::Ftsfr),
            other => Err(format!("unknown layout '{other}' (expected standard or ftsfr)")),
        }
    }
}

/// Parquet compression codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Snappy.
    #[default]
    Snappy,
    /// Zstandard at the default level.
    Zstd,
    /// No compression.
    None,
}

impl Compression {
    /// Configuration value for the codec.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Snappy => "snappy",
            Self::Zstd => "zstd",
            Self::None => "none",
        }
    }

    pub(crate) fn to_parquet(self) -> parquet::basic::Compression {
        match self {
            Self::Snappy => parquet::basic::Compression::SNAPPY,
            Self::Zstd => parquet::basic::Compression::ZSTD(Default::default()),
            Self::None => parquet::basic::Compression::UNCOMPRESSED,
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Compression {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "snappy" => Ok(Self::Snappy),
            "zstd" => Ok(Self::Zstd),
            "none" | "uncompressed" => Ok(Self::None),
            other => Err(format!(
                "unknown compression '{other}' (expected snappy, zstd or none)"
            )),
        }
    }
}

/// Options for reading input records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReadOptions {
    /// Unit of the maturity column; values are converted to months.
    pub maturity_unit: MaturityUnit,
}

impl ReadOptions {
    /// Creates default options (maturity in months).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maturity unit.
    #[must_use]
    pub fn with_maturity_unit(mut self, unit: MaturityUnit) -> Self {
        self.maturity_unit = unit;
        self
    }
}

/// Options for writing output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteOptions {
    /// Column layout.
    pub layout: Layout,
    /// Parquet compression. Ignored for CSV.
    pub compression: Compression,
    /// Maximum rows per Parquet row group.
    pub max_row_group_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            layout: Layout::Standard,
            compression: Compression::Snappy,
            max_row_group_size: 5000,
        }
    }
}

impl WriteOptions {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the layout.
    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }
}
