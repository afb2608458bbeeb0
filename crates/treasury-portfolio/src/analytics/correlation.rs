//! Correlation between bucket return series.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use super::series::{return_series, ReturnSeries};
use crate::types::{MaturityBucket, PortfolioReturnRecord};

/// Pairwise Pearson correlations between bucket return series.
///
/// `values[i][j]` is the correlation between `buckets[i]` and `buckets[j]`
/// over the periods both series have. The matrix is symmetric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    /// Buckets labelling rows and columns, ordered by bucket.
    pub buckets: Vec<MaturityBucket>,
    /// Correlation coefficients. `None` when undefined.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Correlation between two buckets, if both are present and it is defined.
    #[must_use]
    pub fn get(&self, a: MaturityBucket, b: MaturityBucket) -> Option<f64> {
        let i = self.buckets.iter().position(|x| *x == a)?;
        let j = self.buckets.iter().position(|x| *x == b)?;
        self.values[i][j]
    }

    /// Number of buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// True if no bucket has any return.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Computes the correlation matrix of bucket return series.
///
/// A coefficient is `None` when the two series share fewer than two
/// periods or either has zero variance over the shared periods.
#[must_use]
pub fn correlation_matrix(records: &[PortfolioReturnRecord]) -> CorrelationMatrix {
    let series: Vec<(MaturityBucket, ReturnSeries)> = return_series(records).into_iter().collect();
    let n = series.len();
    let mut values = vec![vec![None; n]; n];

    for i in 0..n {
        for j in i..n {
            let rho = pearson(&series[i].1, &series[j].1);
            values[i][j] = rho;
            values[j][i] = rho;
        }
    }

    CorrelationMatrix {
        buckets: series.into_iter().map(|(b, _)| b).collect(),
        values,
    }
}

fn pearson(a: &ReturnSeries, b: &ReturnSeries) -> Option<f64> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = a
        .iter()
        .filter_map(|(period, x)| b.get(period).map(|y| (*x, *y)))
        .unzip();

    if xs.len() < 2 {
        return None;
    }

    let sx = Statistics::std_dev(xs.iter());
    let sy = Statistics::std_dev(ys.iter());
    if sx == 0.0 || sy == 0.0 || !sx.is_finite() || !sy.is_finite() {
        return None;
    }

    let rho = Statistics::covariance(xs.iter(), ys.iter()) / (sx * sy);
    Some(rho.clamp(-1.0, 1.0))
}
