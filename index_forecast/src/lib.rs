//! # Index Forecast
//!
//! Daily financial index forecasting on a business-day calendar.
//!
//! ## Features
//!
//! - Alignment of raw `(date, value)` series to Monday-to-Friday business days
//! - Seasonal ARIMA models with incremental update and confidence intervals
//! - Stepwise order selection by AICc
//! - Out-of-sample MAPE and residual normality diagnostics
//! - A forecasting pipeline that absorbs failures of optional steps and
//!   reports them in a step log
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use index_forecast::{
//!     train_model, CsvSeriesSupplier, FileModelStore, ForecastPipeline, ModelSelector,
//! };
//!
//! let supplier = CsvSeriesSupplier::new("ibov.csv");
//! let store = FileModelStore::new("models/arima.json");
//!
//! // Train once
//! train_model(&supplier, &store, &ModelSelector::default(), 0..=5, 0..=5, false)?;
//!
//! // Forecast 60 business days, holding out the last 30 observations
//! let pipeline = ForecastPipeline::new(supplier, store);
//! let report = pipeline.run_pipeline(30, true, 60, 0.95)?;
//! println!("{:?}", report.evaluation);
//! # Ok::<(), index_forecast::ForecastError>(())
//! ```

pub mod calendar;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod selector;
pub mod series;
pub mod sources;
pub mod split;
pub mod training;

// Re-export commonly used types
pub use crate::config::{PipelineConfig, SelectorConfig};
pub use crate::error::{ForecastError, Result};
pub use crate::evaluator::{EvaluationReport, ForecastEvaluator};
pub use crate::models::arima::{ArimaModel, ArimaOrder, SeasonalOrder};
pub use crate::models::{ForecastModel, ForecastResult, ModelForecast};
pub use crate::normalize::SeriesNormalizer;
pub use crate::pipeline::{ForecastPipeline, PipelineReport, RunStatus, StepStatus};
pub use crate::selector::ModelSelector;
pub use crate::series::{NormalizedSeries, Series};
pub use crate::sources::{
    CsvSeriesSupplier, FileModelStore, InMemoryModelStore, InMemorySeries, ModelStore,
    SeriesSupplier,
};
pub use crate::split::{Split, TrainTestSplitter};
pub use crate::training::train_model;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
