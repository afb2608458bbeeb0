//! Calendar date for daily return observations.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Period;
use crate::error::{CoreError, CoreResult};

/// A calendar date of a daily observation.
///
/// Newtype wrapper around `chrono::NaiveDate`. Vendor extracts deliver
/// dates either as ISO strings (`2020-01-31`) or as compact integers
/// (`20200131`); [`Date::parse`] accepts both.
///
/// # Example
///
/// ```rust
/// use treasury_core::types::Date;
///
/// let date = Date::parse("20200131").unwrap();
/// assert_eq!(date, Date::from_ymd(2020, 1, 31).unwrap());
/// assert_eq!(date.period().to_string(), "2020-01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Parses `YYYY-MM-DD` or `YYYYMMDD`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let s = s.trim();
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(s, "%Y%m%d"))
            .map(Date)
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the calendar month this date falls in.
    #[must_use]
    pub fn period(&self) -> Period {
        Period::from_date(*self)
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Days since 1970-01-01, the Arrow `Date32` representation.
    #[must_use]
    pub fn days_since_epoch(&self) -> i32 {
        (self.0 - NaiveDate::default()).num_days() as i32
    }

    /// Inverse of [`Date::days_since_epoch`].
    #[must_use]
    pub fn from_days_since_epoch(days: i32) -> Option<Self> {
        NaiveDate::default()
            .checked_add_signed(chrono::Duration::days(i64::from(days)))
            .map(Date)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}
