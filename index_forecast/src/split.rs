//! Train/test partitioning

use crate::series::Series;
use serde::Serialize;

/// Contiguous training prefix and held-out suffix of one series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Split {
    /// Training prefix
    pub train: Series,
    /// Held-out suffix; empty when evaluation is skipped
    pub test: Series,
}

impl Split {
    /// Whether there is anything to evaluate against
    pub fn has_test(&self) -> bool {
        !self.test.is_empty()
    }
}

/// Splits a series by position
#[derive(Debug, Clone, Copy, Default)]
pub struct TrainTestSplitter;

impl TrainTestSplitter {
    /// Create a new splitter
    pub fn new() -> Self {
        Self
    }

    /// Hold out the last `n_test` points.
    ///
    /// When the series has `n_test` points or fewer, the whole series is
    /// used for training and the test part is empty.
    pub fn split(&self, series: &Series, n_test: usize) -> Split {
        let len = series.len();
        if len <= n_test {
            return Split {
                train: series.clone(),
                test: Series::default(),
            };
        }

        let cut = len - n_test;
        Split {
            train: series.slice(0..cut),
            test: series.slice(cut..len),
        }
    }
}
