//! Maturity-based bucketing of bond return records.
//!
//! Provides the partition of a batch into the ten maturity buckets.

use crate::error::BucketingError;
use crate::types::MaturityBucket;
use std::collections::BTreeMap;
use treasury_core::BondReturnRecord;

/// Partition of a batch of records by maturity bucket.
#[derive(Debug, Clone, Default)]
pub struct MaturityDistribution<'a> {
    /// Records by maturity bucket. Only populated buckets are present.
    pub by_bucket: BTreeMap<MaturityBucket, Vec<&'a BondReturnRecord>>,

    /// Records that could not be bucketed, with the reason.
    pub out_of_range: Vec<(&'a BondReturnRecord, BucketingError)>,
}

impl<'a> MaturityDistribution<'a> {
    /// Returns the records in a specific bucket.
    #[must_use]
    pub fn get(&self, bucket: MaturityBucket) -> &[&'a BondReturnRecord] {
        self.by_bucket.get(&bucket).map_or(&[], Vec::as_slice)
    }

    /// Number of records in a specific bucket.
    #[must_use]
    pub fn count(&self, bucket: MaturityBucket) -> usize {
        self.get(bucket).len()
    }

    /// Number of records assigned to any bucket.
    #[must_use]
    pub fn total_bucketed(&self) -> usize {
        self.by_bucket.values().map(Vec::len).sum()
    }

    /// Number of records that were bucketed or excluded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.total_bucketed() + self.out_of_range.len()
    }

    /// True if no records were seen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Populated buckets with their records, shortest maturity first.
    pub fn iter(&self) -> impl Iterator<Item = (MaturityBucket, &[&'a BondReturnRecord])> + '_ {
        self.by_bucket.iter().map(|(b, v)| (*b, v.as_slice()))
    }
}

/// Buckets records by time-to-maturity.
///
/// Each record with a maturity in `[0, 60)` months lands in exactly one
/// bucket. Negative, `>= 60` and non-finite maturities are collected in
/// `out_of_range` together with the [`BucketingError`]; none are dropped.
///
/// # Arguments
///
/// * `records` - Records to bucket, typically one period's worth
///
/// # Returns
///
/// Distribution of records by maturity bucket.
#[must_use]
pub fn bucket_by_maturity<'a, I>(records: I) -> MaturityDistribution<'a>
where
    I: IntoIterator<Item = &'a BondReturnRecord>,
{
    let mut distribution = MaturityDistribution::default();

    for record in records {
        match MaturityBucket::from_months(record.maturity_months) {
            Ok(bucket) => distribution
                .by_bucket
                .entry(bucket)
                .or_default()
                .push(record),
            Err(reason) => {
                tracing::debug!(
                    security_id = %record.security_id,
                    period = %record.period,
                    maturity_months = record.maturity_months,
                    "excluded from maturity buckets: {reason}"
                );
                distribution.out_of_range.push((record, reason));
            }
        }
    }

    distribution
}
