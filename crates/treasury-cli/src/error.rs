//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Missing required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Configuration file could not be parsed or written.
    #[error("Configuration error in {}: {message}", path.display())]
    Config {
        /// The configuration file.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// Refusing to overwrite an existing file.
    #[error("{} already exists (use --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Create a missing argument error.
    pub fn missing_argument(name: impl Into<String>) -> Self {
        Self::MissingArgument(name.into())
    }

    /// Create a configuration error.
    pub fn config(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Config {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
