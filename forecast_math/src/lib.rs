//! # Forecast Math
//!
//! Numeric building blocks shared by the forecasting crates.
//! This crate provides the pieces an autoregressive model and its
//! diagnostics are assembled from.

use thiserror::Error;

pub mod descriptive;
pub mod differencing;
pub mod normality;
pub mod optimization;
pub mod polynomial;

/// Errors that can occur in numeric calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for numeric operations
pub type Result<T> = std::result::Result<T, MathError>;

pub use descriptive::{mean, population_std_dev, population_variance};
pub use differencing::{differencing_polynomial, suggest_differencing, suggest_seasonal_differencing};
pub use normality::{shapiro_wilk, ShapiroWilk};
pub use optimization::{nelder_mead, NelderMeadConfig, NelderMeadResult};
pub use polynomial::{is_stable, lag_polynomial, poly_mul, psi_weights};
