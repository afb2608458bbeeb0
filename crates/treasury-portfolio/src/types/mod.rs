//! Domain types for portfolio analytics.
//!
//! - [`MaturityBucket`]: The ten 6-month maturity windows
//! - [`WeightingMethod`]: Equal- or value-weighted aggregation
//! - [`AggregationConfig`], [`CompoundingConfig`]: Computation settings
//! - [`PortfolioReturnRecord`]: One aggregated (bucket, period) return

mod config;
mod maturity;
mod portfolio_return;
mod weighting;

// Re-export all types
pub use config::{AggregationConfig, CompoundingConfig};
pub use maturity::MaturityBucket;
pub use portfolio_return::PortfolioReturnRecord;
pub use weighting::WeightingMethod;
