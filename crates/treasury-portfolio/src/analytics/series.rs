//! Bucket return time series.

use std::collections::BTreeMap;

use treasury_core::Period;

use crate::types::{MaturityBucket, PortfolioReturnRecord};

/// Chronological returns of one bucket.
pub type ReturnSeries = BTreeMap<Period, f64>;

/// Splits portfolio returns into one chronological series per bucket.
///
/// If a `(bucket, period)` pair appears more than once, the last record wins.
#[must_use]
pub fn return_series(records: &[PortfolioReturnRecord]) -> BTreeMap<MaturityBucket, ReturnSeries> {
    let mut series: BTreeMap<MaturityBucket, ReturnSeries> = BTreeMap::new();
    for record in records {
        series
            .entry(record.bucket)
            .or_default()
            .insert(record.period, record.portfolio_return);
    }
    series
}
