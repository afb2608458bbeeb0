//! Analytics over aggregated bucket returns.
//!
//! This module provides:
//! - Descriptive statistics per bucket
//! - Cumulative growth series
//! - Correlation between buckets
//!
//! All functions are pure - they take portfolio return records as input
//! and return computed results. No caching, no I/O, no side effects.

mod correlation;
mod cumulative;
mod parallel;
mod series;
mod summary;

pub use correlation::*;
pub use cumulative::*;
pub use parallel::*;
pub use series::*;
pub use summary::*;
