//! Descriptive statistics of bucket returns.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use treasury_core::Period;

use super::series::return_series;
use crate::types::{MaturityBucket, PortfolioReturnRecord};

/// Descriptive statistics of one bucket's monthly returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketSummary {
    /// Maturity bucket.
    pub bucket: MaturityBucket,
    /// Number of periods with a return.
    pub count: usize,
    /// Arithmetic mean return.
    pub mean: f64,
    /// Sample standard deviation. `None` with fewer than two periods.
    pub std_dev: Option<f64>,
    /// Lowest monthly return.
    pub min: f64,
    /// Highest monthly return.
    pub max: f64,
    /// First period of the series.
    pub first_period: Period,
    /// Last period of the series.
    pub last_period: Period,
}

/// Summarizes each bucket's return series, ordered by bucket.
///
/// Buckets without any return are omitted.
#[must_use]
pub fn summarize_by_bucket(records: &[PortfolioReturnRecord]) -> Vec<BucketSummary> {
    return_series(records)
        .into_iter()
        .filter_map(|(bucket, series)| {
            let first_period = *series.keys().next()?;
            let last_period = *series.keys().next_back()?;
            let values: Vec<f64> = series.into_values().collect();

            let std_dev = (values.len() >= 2).then(|| Statistics::std_dev(values.iter()));

            Some(BucketSummary {
                bucket,
                count: values.len(),
                mean: Statistics::mean(values.iter()),
                std_dev,
                min: Statistics::min(values.iter()),
                max: Statistics::max(values.iter()),
                first_period,
                last_period,
            })
        })
        .collect()
}
