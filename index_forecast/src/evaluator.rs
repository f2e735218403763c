//! Forecast accuracy and residual diagnostics

use crate::error::{ForecastError, Result};
use forecast_math::{mean, population_std_dev, shapiro_wilk, ShapiroWilk};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Significance level used for the normality verdict
pub const DEFAULT_SIGNIFICANCE: f64 = 0.05;

/// Accuracy of a forecast against held-out actuals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyMetrics {
    /// Mean absolute percentage error over non-zero actuals
    pub mape: Option<f64>,
    /// `100 - mape`
    pub accuracy: Option<f64>,
    /// Mean absolute error
    pub mae: f64,
    /// Root mean squared error
    pub rmse: f64,
}

/// Summary statistics of model residuals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResidualDiagnostics {
    /// Mean of the residuals
    pub mean: f64,
    /// Population standard deviation of the residuals
    pub std: f64,
    /// Shapiro-Wilk test, when enough non-constant residuals exist
    pub shapiro: Option<ShapiroWilk>,
}

/// Combined accuracy and residual report of one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Mean absolute percentage error on the test part
    pub mape: Option<f64>,
    /// `100 - mape`
    pub accuracy: Option<f64>,
    /// Mean of the model residuals
    pub residual_mean: Option<f64>,
    /// Standard deviation of the model residuals
    pub residual_std: Option<f64>,
    /// Shapiro-Wilk W statistic
    pub shapiro_stat: Option<f64>,
    /// Shapiro-Wilk p-value
    pub shapiro_p: Option<f64>,
}

impl EvaluationReport {
    /// Fill the accuracy fields
    pub fn with_accuracy(mut self, metrics: &AccuracyMetrics) -> Self {
        self.mape = metrics.mape;
        self.accuracy = metrics.accuracy;
        self
    }

    /// Fill the residual fields
    pub fn with_residuals(mut self, diagnostics: &ResidualDiagnostics) -> Self {
        self.residual_mean = Some(diagnostics.mean);
        self.residual_std = Some(diagnostics.std);
        self.shapiro_stat = diagnostics.shapiro.map(|s| s.statistic);
        self.shapiro_p = diagnostics.shapiro.map(|s| s.p_value);
        self
    }

    /// Rating of the accuracy, when defined
    pub fn rating(&self) -> Option<AccuracyRating> {
        self.accuracy.map(AccuracyRating::from_accuracy)
    }
}

/// Qualitative band of a forecast accuracy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyRating {
    /// 95% or better
    Excellent,
    /// 85% or better
    Good,
    /// 70% or better
    Reasonable,
    /// Below 70%
    Low,
}

impl AccuracyRating {
    /// Band for an accuracy percentage
    pub fn from_accuracy(accuracy: f64) -> Self {
        if accuracy >= 95.0 {
            AccuracyRating::Excellent
        } else if accuracy >= 85.0 {
            AccuracyRating::Good
        } else if accuracy >= 70.0 {
            AccuracyRating::Reasonable
        } else {
            AccuracyRating::Low
        }
    }
}

impl fmt::Display for AccuracyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AccuracyRating::Excellent => "excellent",
            AccuracyRating::Good => "good",
            AccuracyRating::Reasonable => "reasonable",
            AccuracyRating::Low => "low",
        };
        f.write_str(label)
    }
}

/// Computes accuracy metrics and residual diagnostics
#[derive(Debug, Clone, Copy)]
pub struct ForecastEvaluator {
    significance: f64,
}

impl Default for ForecastEvaluator {
    fn default() -> Self {
        Self {
            significance: DEFAULT_SIGNIFICANCE,
        }
    }
}

impl ForecastEvaluator {
    /// Create an evaluator with the default significance level
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an evaluator with a custom significance level
    pub fn with_significance(significance: f64) -> Result<Self> {
        if !(significance > 0.0 && significance < 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "Significance must be between 0 and 1, got {}",
                significance
            )));
        }
        Ok(Self { significance })
    }

    /// Compare a forecast with the actual values.
    ///
    /// MAPE skips indices where the actual value is zero and is `None` when
    /// every index is skipped.
    pub fn evaluate(&self, actual: &[f64], predicted: &[f64]) -> Result<AccuracyMetrics> {
        if actual.len() != predicted.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "Actual length ({}) doesn't match predicted length ({})",
                actual.len(),
                predicted.len()
            )));
        }
        if actual.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "Cannot evaluate an empty forecast".to_string(),
            ));
        }

        let n = actual.len() as f64;
        let errors: Vec<f64> = actual.iter().zip(predicted).map(|(a, p)| a - p).collect();
        let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
        let rmse = (errors.iter().map(|e| e * e).sum::<f64>() / n).sqrt();

        let percentages: Vec<f64> = actual
            .iter()
            .zip(&errors)
            .filter(|(a, _)| **a != 0.0)
            .map(|(a, e)| (e / a).abs() * 100.0)
            .collect();

        let mape = if percentages.is_empty() {
            warn!("all actual values are zero; MAPE is undefined");
            None
        } else {
            Some(mean(&percentages))
        };

        Ok(AccuracyMetrics {
            mape,
            accuracy: mape.map(|m| 100.0 - m),
            mae,
            rmse,
        })
    }

    /// Summarize residuals.
    ///
    /// The Shapiro-Wilk test runs only for more than three residuals that are
    /// not all equal.
    pub fn residual_diagnostics(&self, residuals: &[f64]) -> Result<ResidualDiagnostics> {
        if residuals.is_empty() {
            return Err(ForecastError::ResidualsUnavailable(
                "Residual vector is empty".to_string(),
            ));
        }

        let shapiro = if residuals.len() > 3 {
            match shapiro_wilk(residuals) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!(error = %e, "skipping Shapiro-Wilk test");
                    None
                }
            }
        } else {
            None
        };

        Ok(ResidualDiagnostics {
            mean: mean(residuals),
            std: population_std_dev(residuals),
            shapiro,
        })
    }

    /// Whether normality of the residuals is not rejected; `None` without a test
    pub fn residuals_look_normal(&self, diagnostics: &ResidualDiagnostics) -> Option<bool> {
        diagnostics
            .shapiro
            .map(|s| s.is_normal(self.significance))
    }
}
