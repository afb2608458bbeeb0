//! # Treasury Portfolio
//!
//! Maturity-bucketed portfolio returns for US Treasury securities.
//!
//! This crate turns bond-level monthly returns into ten portfolio return
//! series, one per 6-month maturity window between 0 and 5 years, and
//! provides the analytics run on those series.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: All calculations are stateless with explicit inputs
//! - **Nothing silently dropped**: Every input record is bucketed, counted out of range,
//!   or rejected with a reason
//! - **Explicit weighting**: Equal or value weighting is a configuration choice
//! - **Config-driven parallelism**: Optional rayon support with threshold-based switching
//!
//! ## Features
//!
//! - **Bucketing**: Fixed `[0, 6)`, `[6, 12)`, ..., `[54, 60)` month windows
//! - **Aggregation**: One return per `(bucket, period)` with a completeness report
//! - **Compounding**: Daily to monthly returns, notes and bonds only
//! - **Analytics**: Per-bucket statistics, cumulative growth, correlations
//! - **Auctions**: Summary statistics by security type
//! - **Run status**: On-the-run and off-the-run securities by type and term
//!
//! ## Quick Start
//!
//! ```rust
//! use treasury_portfolio::prelude::*;
//!
//! let jan = Period::new(2020, 1).unwrap();
//! let records = vec![
//!     BondReturnRecord::new("A", jan, 3.0, 0.01),
//!     BondReturnRecord::new("B", jan, 3.0, 0.03),
//! ];
//!
//! let config = AggregationConfig::default();
//! let result = aggregate(&records, &config);
//! assert_eq!(result.records[0].bucket.index(), 1);
//! assert!(result.report.is_complete());
//! ```
//!
//! ## Module Overview
//!
//! - [`aggregation`] - Per-period bucket aggregation and its report
//! - [`analytics`] - Summary statistics, cumulative growth, correlation
//! - [`auction`] - Auction statistics
//! - [`bucketing`] - Assignment of records to maturity buckets
//! - [`compounding`] - Daily to monthly compounding
//! - [`run_status`] - On-the-run classification
//! - [`types`] - Core types (MaturityBucket, WeightingMethod, Config)
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon-based parallel processing of periods and securities

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

// Module declarations
pub mod aggregation;
pub mod analytics;
pub mod auction;
pub mod bucketing;
pub mod compounding;
pub mod error;
pub mod run_status;
pub mod types;

// Re-export error types at crate root
pub use error::{BucketingError, PortfolioError, PortfolioResult};

// Re-export main types
pub use types::{
    AggregationConfig, CompoundingConfig, MaturityBucket, PortfolioReturnRecord, WeightingMethod,
};

// Re-export aggregation types and functions
pub use aggregation::{
    aggregate, aggregate_period, Aggregation, AggregationReport, IssueKind, PeriodAggregation,
    RecordIssue,
};

// Re-export analytics types and functions
pub use analytics::{
    correlation_matrix,
    cumulative_growth,
    // Parallel utilities
    maybe_parallel_map,
    return_series,
    summarize_by_bucket,
    BucketSummary,
    CorrelationMatrix,
    CumulativePoint,
    ReturnSeries,
};

pub use auction::{summarize_auctions, AuctionSummary};
pub use bucketing::{bucket_by_maturity, MaturityDistribution};
pub use compounding::{compound_monthly, CompoundingOutcome, DailyIssue, DailyIssueKind};
pub use run_status::{classify_runs, RunStatus, RunStatusRecord, RunStatusReport};

/// Prelude module for convenient imports.
///
/// ```rust
/// use treasury_portfolio::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{BucketingError, PortfolioError, PortfolioResult};

    // Types
    pub use crate::types::{
        AggregationConfig, CompoundingConfig, MaturityBucket, PortfolioReturnRecord,
        WeightingMethod,
    };

    // Aggregation
    pub use crate::aggregation::{aggregate, aggregate_period, Aggregation, AggregationReport};

    // Compounding
    pub use crate::compounding::{compound_monthly, CompoundingOutcome};

    // Analytics
    pub use crate::analytics::{
        correlation_matrix, cumulative_growth, summarize_by_bucket, BucketSummary,
        CorrelationMatrix, CumulativePoint,
    };

    // Auctions
    pub use crate::auction::{summarize_auctions, AuctionSummary};
    pub use crate::run_status::{classify_runs, RunStatus, RunStatusRecord};

    // Re-export commonly used types from dependencies
    pub use rust_decimal::Decimal;
    pub use treasury_core::{
        AuctionRecord, BondReturnRecord, DailyReturnRecord, Date, Period, SecurityId,
    };
}
