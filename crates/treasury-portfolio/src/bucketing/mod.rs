//! Maturity bucketing.
//!
//! Assigns bond return records to the ten fixed 6-month maturity buckets.
//! All functions are pure - they take records and return distributions
//! without modifying state.
//!
//! # Example
//!
//! ```rust
//! use treasury_core::{BondReturnRecord, Period};
//! use treasury_portfolio::bucketing::bucket_by_maturity;
//! use treasury_portfolio::MaturityBucket;
//!
//! let jan = Period::new(2020, 1).unwrap();
//! let records = vec![
//!     BondReturnRecord::new("A", jan, 3.0, 0.01),
//!     BondReturnRecord::new("B", jan, 61.0, 0.02),
//! ];
//!
//! let dist = bucket_by_maturity(&records);
//! assert_eq!(dist.count(MaturityBucket::new(1).unwrap()), 1);
//! assert_eq!(dist.out_of_range.len(), 1);
//! ```

mod maturity;

pub use maturity::*;
