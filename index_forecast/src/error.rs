//! Error types for the index_forecast crate

use forecast_math::MathError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the index_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The series supplier could not produce data
    #[error("Supply error: {0}")]
    Supply(String),

    /// The model store could not load or save an artifact
    #[error("Store error: {0}")]
    Store(String),

    /// A model artifact is corrupt or incompatible
    #[error("Model load error: {0}")]
    ModelLoad(String),

    /// The series could not be aligned to the business-day calendar
    #[error("Normalization error: {0}")]
    Normalization(String),

    /// Incremental refit of a model failed
    #[error("Update error: {0}")]
    Update(String),

    /// A forecast could not be produced
    #[error("Prediction error: {0}")]
    Prediction(String),

    /// No residuals are attached to the model
    #[error("Residuals unavailable: {0}")]
    ResidualsUnavailable(String),

    /// No candidate order could be fitted during model selection
    #[error("Selection error: {0}")]
    Selection(String),

    /// The supplier returned no observations
    #[error("Series is empty")]
    EmptySeries,

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    Polars(String),

    /// Error from JSON (de)serialization
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error from numeric routines
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

impl ForecastError {
    /// Whether a pipeline run may absorb this error and continue degraded
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ForecastError::Normalization(_)
                | ForecastError::Update(_)
                | ForecastError::ResidualsUnavailable(_)
        )
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::Polars(err.to_string())
    }
}
