//! Input records produced by the upstream extraction step.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Date, InstrumentType, Period, SecurityId};

/// Monthly total return of one Treasury security.
///
/// `maturity_months` is the time-to-maturity at the observation, already
/// normalised to months. `market_value` is only consulted by value-weighted
/// aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondReturnRecord {
    /// Security identifier.
    pub security_id: SecurityId,
    /// Observation month.
    pub period: Period,
    /// Time-to-maturity in months.
    pub maturity_months: f64,
    /// Monthly total return (0.01 = 1%).
    pub total_return: f64,
    /// Market value used as the value weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_value: Option<Decimal>,
}

impl BondReturnRecord {
    /// Creates a record without a market value.
    pub fn new(
        security_id: impl Into<SecurityId>,
        period: Period,
        maturity_months: f64,
        total_return: f64,
    ) -> Self {
        Self {
            security_id: security_id.into(),
            period,
            maturity_months,
            total_return,
            market_value: None,
        }
    }

    /// Sets the market value.
    #[must_use]
    pub fn with_market_value(mut self, market_value: Decimal) -> Self {
        self.market_value = Some(market_value);
        self
    }
}

/// Daily total return of one Treasury security, before monthly compounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReturnRecord {
    /// Security identifier.
    pub security_id: SecurityId,
    /// Observation date.
    pub date: Date,
    /// Time-to-maturity in months.
    pub maturity_months: f64,
    /// Daily total return.
    pub daily_return: f64,
    /// CRSP instrument type, when the extract carries it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument_type: Option<InstrumentType>,
    /// Market value at the close of the day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_value: Option<Decimal>,
}

impl DailyReturnRecord {
    /// Creates a daily record without instrument type or market value.
    pub fn new(
        security_id: impl Into<SecurityId>,
        date: Date,
        maturity_months: f64,
        daily_return: f64,
    ) -> Self {
        Self {
            security_id: security_id.into(),
            date,
            maturity_months,
            daily_return,
            instrument_type: None,
            market_value: None,
        }
    }

    /// Sets the instrument type.
    #[must_use]
    pub fn with_instrument_type(mut self, instrument_type: InstrumentType) -> Self {
        self.instrument_type = Some(instrument_type);
        self
    }

    /// Sets the market value.
    #[must_use]
    pub fn with_market_value(mut self, market_value: Decimal) -> Self {
        self.market_value = Some(market_value);
        self
    }
}

/// One Treasury auction result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionRecord {
    /// CUSIP of the auctioned security.
    pub cusip: SecurityId,
    /// Security type as published (Bill, Note, Bond, TIPS, FRN).
    pub security_type: String,
    /// Term as published, e.g. `2-Year` or `30-Year`.
    #[serde(default)]
    pub security_term: Option<String>,
    /// Auction date.
    #[serde(default)]
    pub auction_date: Option<Date>,
    /// Date the security is delivered. A reopening repeats the CUSIP with a later date.
    #[serde(default)]
    pub issue_date: Option<Date>,
    /// Amount awarded.
    #[serde(default)]
    pub total_accepted: Option<Decimal>,
    /// Amount bid.
    #[serde(default)]
    pub total_tendered: Option<Decimal>,
    /// Tendered over accepted.
    #[serde(default)]
    pub bid_to_cover_ratio: Option<f64>,
}
