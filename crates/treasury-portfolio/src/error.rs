//! Error types for portfolio analytics.
//!
//! This module defines the error types used throughout the portfolio crate.
//! Per-record problems during aggregation are not errors; they are reported
//! in [`crate::aggregation::AggregationReport`].

use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// Unrecognised weighting method name.
    #[error("Unknown weighting method '{value}' (expected equal-weight or value-weight)")]
    UnknownWeighting {
        /// The rejected value.
        value: String,
    },

    /// Bucket index outside 1-10.
    #[error("Invalid maturity bucket {index} (expected 1-10)")]
    InvalidBucket {
        /// The rejected index.
        index: u8,
    },

    /// Bucket assignment failed.
    #[error(transparent)]
    Bucketing(#[from] BucketingError),
}

impl PortfolioError {
    /// Create an unknown weighting error.
    #[must_use]
    pub fn unknown_weighting(value: impl Into<String>) -> Self {
        Self::UnknownWeighting {
            value: value.into(),
        }
    }
}

/// Why a time-to-maturity could not be assigned a bucket.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum BucketingError {
    /// Finite maturity outside `[0, 60)` months.
    #[error("Maturity {months} months is outside the bucketed range [0, 60)")]
    OutOfRange {
        /// The maturity in months.
        months: f64,
    },

    /// NaN or infinite maturity.
    #[error("Out-of-domain maturity: {months}")]
    OutOfDomain {
        /// The maturity value.
        months: f64,
    },
}
