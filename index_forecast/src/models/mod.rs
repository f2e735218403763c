//! Forecasting models for daily index series

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Undated output of [`ForecastModel::predict`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelForecast {
    /// Point forecasts, one per step ahead
    pub point: Vec<f64>,
    /// Lower interval bounds
    pub lower: Vec<f64>,
    /// Upper interval bounds
    pub upper: Vec<f64>,
}

impl ModelForecast {
    /// Number of steps forecast
    pub fn len(&self) -> usize {
        self.point.len()
    }

    /// Check if the forecast is empty
    pub fn is_empty(&self) -> bool {
        self.point.is_empty()
    }
}

/// Dated forecast with confidence bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Forecast dates
    pub dates: Vec<NaiveDate>,
    /// Point forecasts
    pub point_forecast: Vec<f64>,
    /// Lower confidence bounds
    pub lower_ci: Vec<f64>,
    /// Upper confidence bounds
    pub upper_ci: Vec<f64>,
}

impl ForecastResult {
    /// Attach dates to a model forecast
    pub fn new(dates: Vec<NaiveDate>, forecast: ModelForecast) -> Result<Self> {
        let n = dates.len();
        if forecast.point.len() != n || forecast.lower.len() != n || forecast.upper.len() != n {
            return Err(ForecastError::Prediction(format!(
                "Forecast length ({}) doesn't match dates length ({})",
                forecast.point.len(),
                n
            )));
        }

        Ok(Self {
            dates,
            point_forecast: forecast.point,
            lower_ci: forecast.lower,
            upper_ci: forecast.upper,
        })
    }

    /// Number of forecast steps
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if the forecast is empty
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// A fitted, updatable forecasting model.
///
/// Instances never share mutable state: [`ForecastModel::copy`] yields a
/// fully independent model that can be updated without affecting the source.
pub trait ForecastModel: Debug + Send + Sync {
    /// Append `values` to the model history and refit the coefficients,
    /// keeping the model structure. The model is unchanged on error.
    fn update(&mut self, values: &[f64], max_iterations: usize) -> Result<()>;

    /// Forecast `horizon` steps past the end of the history with a
    /// `confidence` interval
    fn predict(&self, horizon: usize, confidence: f64) -> Result<ModelForecast>;

    /// Residuals of the most recent fit or update
    fn residuals(&self) -> Result<Vec<f64>>;

    /// Independent deep copy
    fn copy(&self) -> Box<dyn ForecastModel>;

    /// Human readable model name
    fn name(&self) -> String;

    /// Serialize into a persistable artifact
    fn to_bytes(&self) -> Result<Vec<u8>>;
}

/// Deserializes a persisted artifact into a boxed model
pub type ModelLoader = fn(&[u8]) -> Result<Box<dyn ForecastModel>>;

pub mod arima;
