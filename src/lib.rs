//! # Index Forecast Workspace
//!
//! Umbrella crate re-exporting the workspace libraries.
//!
//! ## Example
//!
//! ```
//! use index_forecast_workspace::forecast::{Series, SeriesNormalizer, TrainTestSplitter};
//! use chrono::NaiveDate;
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
//! let series = Series::from_pairs(vec![(day(4), 10.0), (day(9), 12.0)]);
//!
//! let normalized = SeriesNormalizer::new().normalize(&series).unwrap();
//! assert_eq!(normalized.values(), vec![10.0, 10.0, 10.0, 12.0]);
//!
//! let split = TrainTestSplitter::new().split(&normalized, 1);
//! assert_eq!(split.test.values(), vec![12.0]);
//! ```

/// Forecasting pipeline, models and collaborators
pub use index_forecast as forecast;

/// Numeric building blocks
pub use forecast_math as math;
