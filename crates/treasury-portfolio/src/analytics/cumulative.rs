//! Cumulative growth of bucket portfolios.

use serde::{Deserialize, Serialize};
use treasury_core::Period;

use super::series::return_series;
use crate::types::{MaturityBucket, PortfolioReturnRecord};

/// Value of $1 invested in a bucket portfolio, after a period's return.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    /// Maturity bucket.
    pub bucket: MaturityBucket,
    /// Period at whose end the value is measured.
    pub period: Period,
    /// Growth of $1: `prod(1 + r)` up to and including `period`.
    pub growth: f64,
}

impl CumulativePoint {
    /// Cumulative return, `growth - 1`.
    #[must_use]
    pub fn cumulative_return(&self) -> f64 {
        self.growth - 1.0
    }
}

/// Compounds each bucket's returns in chronological order.
///
/// Output is ordered by bucket, then period. Gaps in a series are not
/// filled; the next available period simply compounds onto the last value.
#[must_use]
pub fn cumulative_growth(records: &[PortfolioReturnRecord]) -> Vec<CumulativePoint> {
    let mut points = Vec::with_capacity(records.len());

    for (bucket, series) in return_series(records) {
        let mut growth = 1.0;
        for (period, ret) in series {
            growth *= 1.0 + ret;
            points.push(CumulativePoint {
                bucket,
                period,
                growth,
            });
        }
    }

    points
}
