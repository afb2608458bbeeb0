//! Error types for file adapters.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;

/// Errors that abort a whole read or write.
///
/// Problems confined to a single row are reported as
/// [`RowError`](crate::RowError) instead.
#[derive(Error, Debug)]
pub enum FileError {
    /// Opening, creating or reading the file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// File extension is not `.csv`, `.parquet` or `.pq`.
    #[error("Unsupported file format: {}", path.display())]
    UnsupportedFormat {
        /// The file involved.
        path: PathBuf,
    },

    /// A required column is absent from the header.
    #[error("Missing required column '{column}' (found: {})", found.join(", "))]
    MissingColumn {
        /// Canonical column name.
        column: &'static str,
        /// Column names present in the file.
        found: Vec<String>,
    },

    /// CSV header could not be read or a record could not be written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Parquet encoding or decoding failed.
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Arrow batch construction failed.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

impl FileError {
    /// Create an I/O error for a path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an unsupported format error.
    #[must_use]
    pub fn unsupported_format(path: impl AsRef<Path>) -> Self {
        Self::UnsupportedFormat {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a missing column error.
    #[must_use]
    pub fn missing_column(column: &'static str, found: &[String]) -> Self {
        Self::MissingColumn {
            column,
            found: found.to_vec(),
        }
    }
}
