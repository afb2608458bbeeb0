//! Portfolio weighting methods.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::PortfolioError;

/// Rule for combining bond returns into one bucket return.
///
/// The source datasets do not fix a weighting, so it is always an explicit
/// choice. Equal weight reproduces the plain per-bucket mean of the
/// published portfolio series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeightingMethod {
    /// Arithmetic mean of constituent returns
    #[default]
    EqualWeight,

    /// Mean weighted by each constituent's market value
    ValueWeight,
}

impl WeightingMethod {
    /// Returns a human-readable name for the weighting method.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::EqualWeight => "Equal Weight",
            Self::ValueWeight => "Value Weight",
        }
    }

    /// Returns the configuration value for the weighting method.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EqualWeight => "equal-weight",
            Self::ValueWeight => "value-weight",
        }
    }

    /// True when constituents must carry a market value.
    #[must_use]
    pub fn requires_market_value(&self) -> bool {
        matches!(self, Self::ValueWeight)
    }
}

impl std::fmt::Display for WeightingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for WeightingMethod {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "equal-weight" | "equal" | "ew" => Ok(Self::EqualWeight),
            "value-weight" | "value" | "vw" => Ok(Self::ValueWeight),
            other => Err(PortfolioError::unknown_weighting(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        assert_eq!(WeightingMethod::default(), WeightingMethod::EqualWeight);
    }

    #[test]
    fn test_name_and_code() {
        assert_eq!(WeightingMethod::EqualWeight.name(), "Equal Weight");
        assert_eq!(WeightingMethod::EqualWeight.code(), "equal-weight");
        assert_eq!(WeightingMethod::ValueWeight.name(), "Value Weight");
        assert_eq!(WeightingMethod::ValueWeight.code(), "value-weight");
    }

    #[test]
    fn test_parse_recognised_values() {
        assert_eq!(
            "equal-weight".parse::<WeightingMethod>().unwrap(),
            WeightingMethod::EqualWeight
        );
        assert_eq!(
            "Value-Weight".parse::<WeightingMethod>().unwrap(),
            WeightingMethod::ValueWeight
        );
        assert!("duration-weight".parse::<WeightingMethod>().is_err());
    }

    #[test]
    fn test_serde_uses_config_values() {
        let json = serde_json::to_string(&WeightingMethod::ValueWeight).unwrap();
        assert_eq!(json, "\"value-weight\"");
        let parsed: WeightingMethod = serde_json::from_str("\"equal-weight\"").unwrap();
        assert_eq!(parsed, WeightingMethod::EqualWeight);
    }
}
