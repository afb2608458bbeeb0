//! Maturity bucket classification.

use serde::{Deserialize, Serialize};

use crate::error::{BucketingError, PortfolioError};

/// One of ten fixed 6-month time-to-maturity windows spanning 0-5 years.
///
/// Bucket `i` covers `[(i-1)*6, i*6)` months: lower bound inclusive,
/// upper bound exclusive. Bucket 10 covers `[54, 60)`.
///
/// # Example
///
/// ```rust
/// use treasury_portfolio::MaturityBucket;
///
/// assert_eq!(MaturityBucket::from_months(5.9999).unwrap().index(), 1);
/// assert_eq!(MaturityBucket::from_months(6.0).unwrap().index(), 2);
/// assert!(MaturityBucket::from_months(60.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MaturityBucket(u8);

const ALL_BUCKETS: [MaturityBucket; MaturityBucket::COUNT as usize] = [
    MaturityBucket(1),
    MaturityBucket(2),
    MaturityBucket(3),
    MaturityBucket(4),
    MaturityBucket(5),
    MaturityBucket(6),
    MaturityBucket(7),
    MaturityBucket(8),
    MaturityBucket(9),
    MaturityBucket(10),
];

impl MaturityBucket {
    /// Number of buckets.
    pub const COUNT: u8 = 10;

    /// Width of each bucket in months.
    pub const WIDTH_MONTHS: f64 = 6.0;

    /// Exclusive upper bound of the bucketed range in months.
    pub const MAX_MONTHS: f64 = Self::WIDTH_MONTHS * Self::COUNT as f64;

    /// Returns the bucket with the given 1-based index.
    #[must_use]
    pub fn new(index: u8) -> Option<Self> {
        (1..=Self::COUNT).contains(&index).then_some(Self(index))
    }

    /// Classify a time-to-maturity in months.
    ///
    /// `floor(months / 6) + 1`, clamped to `[1, 10]`.
    ///
    /// # Errors
    ///
    /// - [`BucketingError::OutOfDomain`] for NaN or infinite input
    /// - [`BucketingError::OutOfRange`] for negative input or input `>= 60`
    pub fn from_months(months: f64) -> Result<Self, BucketingError> {
        if !months.is_finite() {
            return Err(BucketingError::OutOfDomain { months });
        }
        if !(0.0..Self::MAX_MONTHS).contains(&months) {
            return Err(BucketingError::OutOfRange { months });
        }

        let index = (months / Self::WIDTH_MONTHS).floor() + 1.0;
        Ok(Self(index.clamp(1.0, f64::from(Self::COUNT)) as u8))
    }

    /// Classify a time-to-maturity in years.
    ///
    /// # Errors
    ///
    /// Same as [`MaturityBucket::from_months`].
    pub fn from_years(years: f64) -> Result<Self, BucketingError> {
        Self::from_months(years * 12.0)
    }

    /// Returns the 1-based bucket index.
    #[must_use]
    pub fn index(&self) -> u8 {
        self.0
    }

    /// Inclusive lower bound in months.
    #[must_use]
    pub fn lower_months(&self) -> f64 {
        f64::from(self.0 - 1) * Self::WIDTH_MONTHS
    }

    /// Exclusive upper bound in months.
    #[must_use]
    pub fn upper_months(&self) -> f64 {
        f64::from(self.0) * Self::WIDTH_MONTHS
    }

    /// Returns the midpoint of the bucket in years.
    #[must_use]
    pub fn midpoint_years(&self) -> f64 {
        (self.lower_months() + self.upper_months()) / 24.0
    }

    /// Returns the label for this bucket, e.g. `0.0-0.5Y`.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{:.1}-{:.1}Y",
            self.lower_months() / 12.0,
            self.upper_months() / 12.0
        )
    }

    /// Returns all buckets in order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &ALL_BUCKETS
    }
}

impl std::fmt::Display for MaturityBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for MaturityBucket {
    type Error = PortfolioError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index).ok_or(PortfolioError::InvalidBucket { index })
    }
}

impl From<MaturityBucket> for u8 {
    fn from(bucket: MaturityBucket) -> Self {
        bucket.0
    }
}
