//! Run configuration for forecasting and training

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Parameters of one forecasting run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of trailing observations held out for evaluation
    pub n_test: usize,
    /// Refit the model on the training part before forecasting
    pub update_model: bool,
    /// Business days to forecast past the last observation
    pub horizon: usize,
    /// Confidence level of the forecast intervals
    pub confidence: f64,
    /// Optimizer budget for the incremental update
    pub update_max_iterations: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            n_test: 30,
            update_model: true,
            horizon: 60,
            confidence: 0.95,
            update_max_iterations: 50,
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file; absent fields take defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Check parameter ranges
    pub fn validate(&self) -> Result<()> {
        validate_run(self.horizon, self.confidence)?;
        if self.update_max_iterations == 0 {
            return Err(ForecastError::InvalidParameter(
                "update_max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Shared check for horizon and confidence level
pub(crate) fn validate_run(horizon: usize, confidence: f64) -> Result<()> {
    if horizon == 0 {
        return Err(ForecastError::InvalidParameter(
            "Horizon must be at least 1".to_string(),
        ));
    }
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(ForecastError::InvalidParameter(format!(
            "Confidence must be between 0 and 1, got {}",
            confidence
        )));
    }
    Ok(())
}

/// Parameters of the stepwise order search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Starting AR order
    pub start_p: usize,
    /// Starting MA order
    pub start_q: usize,
    /// Upper bound on the differencing order
    pub max_d: usize,
    /// Upper bound on the seasonal differencing order
    pub max_seasonal_d: usize,
    /// Upper bound on the seasonal AR order
    pub max_seasonal_p: usize,
    /// Upper bound on the seasonal MA order
    pub max_seasonal_q: usize,
    /// Season length used when the search is seasonal
    pub seasonal_period: usize,
    /// Optimizer budget per candidate fit
    pub max_iterations: usize,
    /// Upper bound on the number of candidate fits
    pub max_fits: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            start_p: 1,
            start_q: 1,
            max_d: 2,
            max_seasonal_d: 1,
            max_seasonal_p: 2,
            max_seasonal_q: 2,
            seasonal_period: 5,
            max_iterations: 1000,
            max_fits: 60,
        }
    }
}

impl SelectorConfig {
    /// Load a configuration from a JSON file; absent fields take defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Check parameter ranges
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 || self.max_fits == 0 {
            return Err(ForecastError::InvalidParameter(
                "max_iterations and max_fits must be at least 1".to_string(),
            ));
        }
        if self.seasonal_period < 2 {
            return Err(ForecastError::InvalidParameter(format!(
                "Seasonal period must be at least 2, got {}",
                self.seasonal_period
            )));
        }
        Ok(())
    }
}
