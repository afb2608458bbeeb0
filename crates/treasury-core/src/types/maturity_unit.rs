//! Units for time-to-maturity inputs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Average days per month used when converting day counts.
const DAYS_PER_MONTH: f64 = 365.25 / 12.0;

/// Unit in which an input source expresses time-to-maturity.
///
/// Bucketing always works in months; this converts whatever the
/// extract delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaturityUnit {
    /// Months (no conversion)
    #[default]
    Months,
    /// Years
    Years,
    /// Calendar days
    Days,
}

impl MaturityUnit {
    /// Converts a value expressed in this unit to months.
    ///
    /// Non-finite values pass through unchanged so that the caller's
    /// domain check still sees them.
    #[must_use]
    pub fn to_months(&self, value: f64) -> f64 {
        match self {
            Self::Months => value,
            Self::Years => value * 12.0,
            Self::Days => value / DAYS_PER_MONTH,
        }
    }

    /// Returns the lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Months => "months",
            Self::Years => "years",
            Self::Days => "days",
        }
    }
}

impl fmt::Display for MaturityUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MaturityUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "months" | "month" | "m" => Ok(Self::Months),
            "years" | "year" | "y" => Ok(Self::Years),
            "days" | "day" | "d" => Ok(Self::Days),
            other => Err(CoreError::UnknownMaturityUnit {
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_months() {
        assert_eq!(MaturityUnit::Months.to_months(7.5), 7.5);
        assert_eq!(MaturityUnit::Years.to_months(0.5), 6.0);
        assert!((MaturityUnit::Days.to_months(365.25) - 12.0).abs() < 1e-12);
        assert!(MaturityUnit::Years.to_months(f64::NAN).is_nan());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Years".parse::<MaturityUnit>().unwrap(), MaturityUnit::Years);
        assert_eq!("d".parse::<MaturityUnit>().unwrap(), MaturityUnit::Days);
        assert!("weeks".parse::<MaturityUnit>().is_err());
    }

    #[test]
    fn test_default_is_months() {
        assert_eq!(MaturityUnit::default(), MaturityUnit::Months);
    }
}
