//! Maturity-bucket aggregation.
//!
//! Combines the monthly returns of all bonds in a maturity bucket into one
//! portfolio return per `(bucket, period)`. Functions are pure: the same
//! input always produces the same output and report.
//!
//! # Example
//!
//! ```rust
//! use treasury_core::{BondReturnRecord, Period};
//! use treasury_portfolio::aggregation::aggregate;
//! use treasury_portfolio::AggregationConfig;
//!
//! let jan = Period::new(2020, 1).unwrap();
//! let records = vec![
//!     BondReturnRecord::new("A", jan, 3.0, 0.01),
//!     BondReturnRecord::new("B", jan, 3.0, 0.03),
//!     BondReturnRecord::new("C", jan, 61.0, 0.05),
//! ];
//!
//! let result = aggregate(&records, &AggregationConfig::default());
//! assert_eq!(result.records.len(), 1);
//! assert!((result.records[0].portfolio_return - 0.02).abs() < 1e-12);
//! assert_eq!(result.report.out_of_range, 1);
//! ```

mod report;

pub use report::*;

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use treasury_core::{BondReturnRecord, Period};

use crate::analytics::maybe_parallel_map;
use crate::bucketing::bucket_by_maturity;
use crate::types::{AggregationConfig, PortfolioReturnRecord, WeightingMethod};

/// Aggregated returns and accounting for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodAggregation {
    /// The aggregated period.
    pub period: Period,
    /// One record per populated bucket, ordered by bucket.
    pub records: Vec<PortfolioReturnRecord>,
    /// What happened to each input record.
    pub report: AggregationReport,
}

/// Aggregated returns and accounting for a multi-period batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    /// Portfolio returns ordered by `(period, bucket)`.
    pub records: Vec<PortfolioReturnRecord>,
    /// Combined report over all periods.
    pub report: AggregationReport,
    /// Distinct periods seen in the input, in order.
    pub periods: Vec<Period>,
}

impl Aggregation {
    fn push(&mut self, period: PeriodAggregation) {
        self.periods.push(period.period);
        self.records.extend(period.records);
        self.report.merge(period.report);
    }
}

/// Aggregates one period's records into per-bucket portfolio returns.
///
/// Records whose period differs from `period` are rejected. Records whose
/// maturity cannot be bucketed are counted as out of range. Under
/// [`WeightingMethod::ValueWeight`] records without a positive market value
/// are rejected. Empty input yields no records and an empty report.
///
/// # Arguments
///
/// * `period` - The period being aggregated
/// * `records` - Bond returns observed in that period
/// * `config` - Weighting settings
#[must_use]
pub fn aggregate_period(
    period: Period,
    records: &[BondReturnRecord],
    config: &AggregationConfig,
) -> PeriodAggregation {
    aggregate_records(period, records, config.weighting)
}

/// Aggregates a batch spanning any number of periods.
///
/// Records are grouped by period and each period is aggregated
/// independently; with the `parallel` feature, periods fan out over rayon
/// once their number reaches `config.parallel_threshold`. Output is ordered
/// by `(period, bucket)` regardless of scheduling.
#[must_use]
pub fn aggregate(records: &[BondReturnRecord], config: &AggregationConfig) -> Aggregation {
    let mut by_period: BTreeMap<Period, Vec<&BondReturnRecord>> = BTreeMap::new();
    for record in records {
        by_period.entry(record.period).or_default().push(record);
    }
    let groups: Vec<(Period, Vec<&BondReturnRecord>)> = by_period.into_iter().collect();

    let weighting = config.weighting;
    let per_period = maybe_parallel_map(&groups, config, |(period, members)| {
        aggregate_records(*period, members.iter().copied(), weighting)
    });

    let mut aggregation = Aggregation::default();
    for period in per_period {
        aggregation.push(period);
    }

    tracing::debug!(
        periods = aggregation.periods.len(),
        rows = aggregation.records.len(),
        "aggregated {}",
        aggregation.report
    );

    aggregation
}

fn aggregate_records<'a, I>(
    period: Period,
    records: I,
    weighting: WeightingMethod,
) -> PeriodAggregation
where
    I: IntoIterator<Item = &'a BondReturnRecord>,
{
    let mut report = AggregationReport::new();
    let mut in_period = Vec::new();

    for record in records {
        report.input += 1;
        if record.period == period {
            in_period.push(record);
        } else {
            report.reject(record, IssueKind::PeriodMismatch { expected: period });
        }
    }

    let distribution = bucket_by_maturity(in_period);
    report.out_of_range = distribution.out_of_range.len();

    let mut out = Vec::with_capacity(distribution.by_bucket.len());
    for (bucket, members) in distribution.iter() {
        let mut acc = WeightedMean::default();
        for record in members {
            match constituent_weight(record, weighting) {
                Ok(weight) => acc.add(weight, record.total_return),
                Err(kind) => report.reject(record, kind),
            }
        }

        if let Some(value) = acc.value() {
            report.bucketed.insert(bucket, acc.count);
            out.push(PortfolioReturnRecord::new(bucket, period, value, acc.count));
        }
    }

    PeriodAggregation {
        period,
        records: out,
        report,
    }
}

fn constituent_weight(
    record: &BondReturnRecord,
    weighting: WeightingMethod,
) -> Result<f64, IssueKind> {
    if !record.total_return.is_finite() {
        return Err(IssueKind::NonFiniteReturn {
            value: record.total_return,
        });
    }

    match weighting {
        WeightingMethod::EqualWeight => Ok(1.0),
        WeightingMethod::ValueWeight => match record.market_value {
            None => Err(IssueKind::MissingMarketValue),
            Some(mv) if mv <= Decimal::ZERO => Err(IssueKind::NonPositiveMarketValue { value: mv }),
            Some(mv) => mv.to_f64().ok_or(IssueKind::MissingMarketValue),
        },
    }
}

#[derive(Debug, Default)]
struct WeightedMean {
    weighted_sum: f64,
    total_weight: f64,
    count: usize,
}

impl WeightedMean {
    fn add(&mut self, weight: f64, value: f64) {
        self.weighted_sum += weight * value;
        self.total_weight += weight;
        self.count += 1;
    }

    fn value(&self) -> Option<f64> {
        (self.count > 0 && self.total_weight > 0.0).then(|| self.weighted_sum / self.total_weight)
    }
}
