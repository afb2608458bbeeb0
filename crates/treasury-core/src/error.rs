//! Error types for the Treasury core types.
//!
//! Parsing of dates, periods and units reports through [`CoreError`].

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The error type for core type construction and parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Invalid observation period.
    #[error("Invalid period: {message}")]
    InvalidPeriod {
        /// Description of the period error.
        message: String,
    },

    /// Unrecognised maturity unit.
    #[error("Unknown maturity unit '{value}' (expected months, years or days)")]
    UnknownMaturityUnit {
        /// The rejected value.
        value: String,
    },

    /// Invalid record field.
    #[error("Invalid field '{field}': {reason}")]
    InvalidField {
        /// The field name.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid period error.
    #[must_use]
    pub fn invalid_period(message: impl Into<String>) -> Self {
        Self::InvalidPeriod {
            message: message.into(),
        }
    }

    /// Creates an invalid field error.
    #[must_use]
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
