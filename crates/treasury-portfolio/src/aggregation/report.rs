//! Accounting of what happened to every input record.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use treasury_core::{BondReturnRecord, Period, SecurityId};

use crate::types::MaturityBucket;

/// Why a record was rejected from aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    /// Return is NaN or infinite.
    NonFiniteReturn {
        /// The rejected return.
        value: f64,
    },
    /// Value-weighting requested but the record has no market value.
    MissingMarketValue,
    /// Value-weighting requested and the market value is zero or negative.
    NonPositiveMarketValue {
        /// The rejected market value.
        value: Decimal,
    },
    /// Record belongs to another period than the one being aggregated.
    PeriodMismatch {
        /// The period being aggregated.
        expected: Period,
    },
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteReturn { value } => write!(f, "non-finite return {value}"),
            Self::MissingMarketValue => write!(f, "missing market value"),
            Self::NonPositiveMarketValue { value } => {
                write!(f, "non-positive market value {value}")
            }
            Self::PeriodMismatch { expected } => write!(f, "period does not match {expected}"),
        }
    }
}

/// One rejected record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordIssue {
    /// Security identifier of the rejected record.
    pub security_id: SecurityId,
    /// Period carried by the rejected record.
    pub period: Period,
    /// What was wrong with it.
    pub kind: IssueKind,
}

impl RecordIssue {
    /// Creates an issue for a record.
    #[must_use]
    pub fn new(record: &BondReturnRecord, kind: IssueKind) -> Self {
        Self {
            security_id: record.security_id.clone(),
            period: record.period,
            kind,
        }
    }
}

impl fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.security_id, self.period, self.kind)
    }
}

/// Per-run accounting of input records.
///
/// Every input record ends up in exactly one of three places: a bucket
/// count, the out-of-range count, or the rejected list. See
/// [`AggregationReport::is_complete`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationReport {
    /// Number of records seen.
    pub input: usize,
    /// Records combined into each bucket's return.
    pub bucketed: BTreeMap<MaturityBucket, usize>,
    /// Records excluded because their maturity is negative, `>= 60` months
    /// or not a finite number.
    pub out_of_range: usize,
    /// Records rejected for bad data.
    pub rejected: Vec<RecordIssue>,
}

impl AggregationReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records assigned to a given bucket.
    #[must_use]
    pub fn bucketed_in(&self, bucket: MaturityBucket) -> usize {
        self.bucketed.get(&bucket).copied().unwrap_or(0)
    }

    /// Records assigned to any bucket.
    #[must_use]
    pub fn total_bucketed(&self) -> usize {
        self.bucketed.values().sum()
    }

    /// Number of rejected records.
    #[must_use]
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    /// True when bucketed + out-of-range + rejected accounts for all input.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total_bucketed() + self.out_of_range + self.rejected_count() == self.input
    }

    /// Folds another report into this one.
    pub fn merge(&mut self, other: AggregationReport) {
        self.input += other.input;
        for (bucket, count) in other.bucketed {
            *self.bucketed.entry(bucket).or_insert(0) += count;
        }
        self.out_of_range += other.out_of_range;
        self.rejected.extend(other.rejected);
    }

    pub(crate) fn reject(&mut self, record: &BondReturnRecord, kind: IssueKind) {
        tracing::warn!(
            security_id = %record.security_id,
            period = %record.period,
            "rejected record: {kind}"
        );
        self.rejected.push(RecordIssue::new(record, kind));
    }
}

impl fmt::Display for AggregationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} input, {} bucketed, {} out of range, {} rejected",
            self.input,
            self.total_bucketed(),
            self.out_of_range,
            self.rejected_count()
        )
    }
}
