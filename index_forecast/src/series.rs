//! Dated value series

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, Range};

/// A single dated observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Observation date
    pub date: NaiveDate,
    /// Observed value; non-finite values are treated as missing
    pub value: f64,
}

impl Observation {
    /// Create a new observation
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Series of observations with unique, strictly increasing dates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    observations: Vec<Observation>,
}

impl Series {
    /// Build a series from raw `(date, value)` pairs in arrival order.
    ///
    /// Pairs are sorted by date; when a date repeats, the pair that arrived
    /// last wins.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        Self::from_observations(
            pairs
                .into_iter()
                .map(|(date, value)| Observation::new(date, value))
                .collect(),
        )
    }

    /// Build a series from observations in arrival order (see [`Series::from_pairs`])
    pub fn from_observations(mut observations: Vec<Observation>) -> Self {
        if is_strictly_increasing(&observations) {
            return Self { observations };
        }

        // Stable sort keeps arrival order among equal dates
        observations.sort_by_key(|o| o.date);

        let mut deduped: Vec<Observation> = Vec::with_capacity(observations.len());
        for obs in observations {
            match deduped.last_mut() {
                Some(last) if last.date == obs.date => *last = obs,
                _ => deduped.push(obs),
            }
        }

        Self {
            observations: deduped,
        }
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// All observations, ascending by date
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Dates as a vector
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.observations.iter().map(|o| o.date).collect()
    }

    /// Values as a vector
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    /// Earliest date
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    /// Latest date
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }

    /// Positional slice; out-of-range bounds are clamped
    pub fn slice(&self, range: Range<usize>) -> Series {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        Series {
            observations: self.observations[start..end].to_vec(),
        }
    }
}

fn is_strictly_increasing(observations: &[Observation]) -> bool {
    observations.windows(2).all(|w| w[0].date < w[1].date)
}

/// A series on a gap-free business-day grid with every value filled.
///
/// Only produced by [`crate::normalize::SeriesNormalizer`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedSeries {
    series: Series,
}

impl NormalizedSeries {
    pub(crate) fn new(series: Series) -> Self {
        Self { series }
    }

    /// Borrow the underlying series
    pub fn as_series(&self) -> &Series {
        &self.series
    }

    /// Unwrap into a plain series
    pub fn into_series(self) -> Series {
        self.series
    }
}

impl Deref for NormalizedSeries {
    type Target = Series;

    fn deref(&self) -> &Series {
        &self.series
    }
}
