//! Alignment of raw series onto the business-day calendar

use crate::calendar::business_days_between;
use crate::error::{ForecastError, Result};
use crate::series::{NormalizedSeries, Observation, Series};
use std::collections::HashMap;
use tracing::debug;

/// Reindexes a series onto consecutive business days and fills gaps.
///
/// Gaps are forward-filled from the previous business day; any leading gap
/// left over is back-filled from the first valid value. Weekend observations
/// fall outside the grid and are dropped, and non-finite values count as
/// missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesNormalizer;

impl SeriesNormalizer {
    /// Create a new normalizer
    pub fn new() -> Self {
        Self
    }

    /// Normalize `series` onto the business-day grid spanning its dates
    pub fn normalize(&self, series: &Series) -> Result<NormalizedSeries> {
        let (first, last) = match (series.first_date(), series.last_date()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(ForecastError::Normalization(
                    "Cannot normalize an empty series".to_string(),
                ))
            }
        };

        let grid = business_days_between(first, last);
        if grid.is_empty() {
            return Err(ForecastError::Normalization(format!(
                "No business days between {} and {}",
                first, last
            )));
        }

        let observed: HashMap<_, _> = series
            .observations()
            .iter()
            .filter(|o| o.value.is_finite())
            .map(|o| (o.date, o.value))
            .collect();

        let mut filled: Vec<Option<f64>> = Vec::with_capacity(grid.len());
        let mut carry = None;
        for date in &grid {
            if let Some(&value) = observed.get(date) {
                carry = Some(value);
            }
            filled.push(carry);
        }

        let first_valid = filled.iter().flatten().next().copied().ok_or_else(|| {
            ForecastError::Normalization("Series has no valid values".to_string())
        })?;

        let missing = grid.iter().filter(|d| !observed.contains_key(*d)).count();
        debug!(
            grid_len = grid.len(),
            filled = missing,
            dropped = series.len().saturating_sub(grid.len() - missing),
            "normalized series onto business days"
        );

        let observations = grid
            .into_iter()
            .zip(filled)
            .map(|(date, value)| Observation::new(date, value.unwrap_or(first_valid)))
            .collect();

        Ok(NormalizedSeries::new(Series::from_observations(observations)))
    }
}
