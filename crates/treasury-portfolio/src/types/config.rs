//! Configuration for aggregation and compounding.

use super::WeightingMethod;
use serde::{Deserialize, Serialize};

/// Configuration for maturity-bucket aggregation.
///
/// Controls weighting and per-period parallelism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Enable parallel processing (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum number of periods to trigger parallel processing.
    /// Below this threshold, sequential is faster due to thread overhead.
    pub parallel_threshold: usize,

    /// Weighting method for combining constituent returns.
    pub weighting: WeightingMethod,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 24, // Two years of monthly periods
            weighting: WeightingMethod::EqualWeight,
        }
    }
}

impl AggregationConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always uses sequential processing.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Sets the weighting method.
    #[must_use]
    pub fn with_weighting(mut self, method: WeightingMethod) -> Self {
        self.weighting = method;
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }
}

/// Configuration for daily to monthly compounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundingConfig {
    /// Keep only non-callable notes and bonds (ITYPE 1 or 2).
    /// Rows without an ITYPE are kept.
    pub notes_and_bonds_only: bool,

    /// Parallelism settings, applied per security.
    pub aggregation: AggregationConfig,
}

impl Default for CompoundingConfig {
    fn default() -> Self {
        Self {
            notes_and_bonds_only: true,
            aggregation: AggregationConfig::default().with_threshold(256),
        }
    }
}

impl CompoundingConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to drop everything except notes and bonds.
    #[must_use]
    pub fn with_notes_and_bonds_only(mut self, enabled: bool) -> Self {
        self.notes_and_bonds_only = enabled;
        self
    }

    /// Sets the parallelism settings.
    #[must_use]
    pub fn with_aggregation(mut self, aggregation: AggregationConfig) -> Self {
        self.aggregation = aggregation;
        self
    }
}
