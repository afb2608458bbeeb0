//! Monthly observation period.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Date;
use crate::error::{CoreError, CoreResult};

/// A calendar month, the unit of observation for monthly returns.
///
/// Periods order chronologically and render as `YYYY-MM`.
///
/// # Example
///
/// ```rust
/// use treasury_core::types::Period;
///
/// let jan = Period::parse("2020-01-31").unwrap();
/// assert_eq!(jan, Period::new(2020, 1).unwrap());
/// assert_eq!(jan.next().to_string(), "2020-02");
/// assert_eq!(jan.end_date().to_string(), "2020-01-31");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    year: i32,
    month: u32,
}

/// Years a period may fall in. Bounded so that `next()` and the month end
/// always exist as calendar dates.
const YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

impl Period {
    /// Creates a period from a year (1-9999) and a month (1-12).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPeriod` if the year or month is out of range.
    pub fn new(year: i32, month: u32) -> CoreResult<Self> {
        if !YEARS.contains(&year) || !(1..=12).contains(&month) {
            return Err(CoreError::invalid_period(format!("{year}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    /// Returns the month containing `date`.
    #[must_use]
    pub fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parses `YYYY-MM`, `YYYY-MM-DD` or `YYYYMMDD`.
    ///
    /// A full date maps to the month it falls in.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPeriod` if the string matches none of the layouts.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let s = s.trim();
        if let Ok(date) = Date::parse(s) {
            return Self::new(date.year(), date.month());
        }

        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| CoreError::invalid_period(format!("Cannot parse: {s}")))?;
        let year: i32 = year
            .parse()
            .map_err(|_| CoreError::invalid_period(format!("Cannot parse: {s}")))?;
        let month: u32 = month
            .parse()
            .map_err(|_| CoreError::invalid_period(format!("Cannot parse: {s}")))?;
        Self::new(year, month)
    }

    /// Returns the year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// First calendar day of the month.
    #[must_use]
    pub fn start_date(&self) -> Date {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(Date::from)
            .unwrap_or_else(|| unreachable!("period is validated on construction"))
    }

    /// Last calendar day of the month.
    #[must_use]
    pub fn end_date(&self) -> Date {
        let last = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year, 12, 31)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1).and_then(|d| d.pred_opt())
        };
        last
            .map(Date::from)
            .unwrap_or_else(|| unreachable!("period is validated on construction"))
    }

    /// The following month.
    #[must_use]
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Period {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}

impl From<Date> for Period {
    fn from(date: Date) -> Self {
        Self::from_date(date)
    }
}
