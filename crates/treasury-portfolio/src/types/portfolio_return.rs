//! Aggregated portfolio return records.

use serde::{Deserialize, Serialize};
use treasury_core::Period;

use super::MaturityBucket;

/// Return of one maturity bucket in one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReturnRecord {
    /// Maturity bucket.
    pub bucket: MaturityBucket,
    /// Observation month.
    pub period: Period,
    /// Aggregated return of the bucket's constituents.
    pub portfolio_return: f64,
    /// Number of bonds combined into the return.
    pub constituents: usize,
}

impl PortfolioReturnRecord {
    /// Creates a new portfolio return record.
    #[must_use]
    pub fn new(
        bucket: MaturityBucket,
        period: Period,
        portfolio_return: f64,
        constituents: usize,
    ) -> Self {
        Self {
            bucket,
            period,
            portfolio_return,
            constituents,
        }
    }
}
