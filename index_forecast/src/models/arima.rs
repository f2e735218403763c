//! Seasonal ARIMA models estimated by conditional sum of squares
//!
//! The differenced series `w_t = δ(B) y_t`, with
//! `δ(B) = (1 - B)^d (1 - B^s)^D`, follows the ARMA process
//! `φ(B)Φ(B^s)(w_t - μ) = θ(B)Θ(B^s) e_t`. Coefficients are estimated by
//! minimizing the conditional sum of squared innovations with Nelder-Mead,
//! rejecting non-stationary and non-invertible parameter sets.

use crate::error::{ForecastError, Result};
use crate::models::{ForecastModel, ModelForecast};
use forecast_math::differencing::apply_difference;
use forecast_math::{
    differencing_polynomial, is_stable, lag_polynomial, mean, nelder_mead, poly_mul,
    psi_weights, MathError, NelderMeadConfig,
};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use std::f64::consts::PI;
use std::fmt;
use tracing::{debug, warn};

/// Version tag written into every persisted artifact
pub const ARTIFACT_VERSION: u32 = 1;

/// Optimizer budget used by [`ArimaModel::fit`]
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

const MIN_SIGMA2: f64 = 1e-12;

/// Non-seasonal order `(p, d, q)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ArimaOrder {
    /// Autoregressive order
    pub p: usize,
    /// Differencing order
    pub d: usize,
    /// Moving average order
    pub q: usize,
}

impl ArimaOrder {
    /// Create a new order
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }
}

impl fmt::Display for ArimaOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.p, self.d, self.q)
    }
}

/// Seasonal order `(P, D, Q)[period]`; inactive when `period < 2`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SeasonalOrder {
    /// Seasonal autoregressive order
    pub p: usize,
    /// Seasonal differencing order
    pub d: usize,
    /// Seasonal moving average order
    pub q: usize,
    /// Season length in observations
    pub period: usize,
}

impl SeasonalOrder {
    /// Create a new seasonal order
    pub fn new(p: usize, d: usize, q: usize, period: usize) -> Self {
        Self { p, d, q, period }
    }

    /// No seasonal component
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether the seasonal part contributes anything
    pub fn is_active(&self) -> bool {
        self.period >= 2 && self.p + self.d + self.q > 0
    }
}

/// Estimated ARMA coefficients of a fitted model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    /// Mean of the differenced series (zero when not estimated)
    pub intercept: f64,
    /// φ1..φp
    pub ar: Vec<f64>,
    /// θ1..θq
    pub ma: Vec<f64>,
    /// Φ1..ΦP
    pub seasonal_ar: Vec<f64>,
    /// Θ1..ΘQ
    pub seasonal_ma: Vec<f64>,
}

impl Coefficients {
    fn pack(&self, include_intercept: bool) -> Vec<f64> {
        let mut params = Vec::new();
        if include_intercept {
            params.push(self.intercept);
        }
        params.extend_from_slice(&self.ar);
        params.extend_from_slice(&self.ma);
        params.extend_from_slice(&self.seasonal_ar);
        params.extend_from_slice(&self.seasonal_ma);
        params
    }

    fn ar_polynomial(&self, period: usize) -> Vec<f64> {
        poly_mul(
            &lag_polynomial(&self.ar, 1, -1.0),
            &lag_polynomial(&self.seasonal_ar, period, -1.0),
        )
    }

    fn ma_polynomial(&self, period: usize) -> Vec<f64> {
        poly_mul(
            &lag_polynomial(&self.ma, 1, 1.0),
            &lag_polynomial(&self.seasonal_ma, period, 1.0),
        )
    }

    fn is_finite(&self) -> bool {
        self.intercept.is_finite()
            && self
                .ar
                .iter()
                .chain(&self.ma)
                .chain(&self.seasonal_ar)
                .chain(&self.seasonal_ma)
                .all(|c| c.is_finite())
    }
}

/// Model shape shared by estimation and forecasting
#[derive(Debug, Clone, Copy)]
struct Structure {
    order: ArimaOrder,
    seasonal: SeasonalOrder,
    include_intercept: bool,
}

impl Structure {
    fn n_params(&self) -> usize {
        usize::from(self.include_intercept)
            + self.order.p
            + self.order.q
            + self.seasonal.p
            + self.seasonal.q
    }

    fn delta(&self) -> Vec<f64> {
        differencing_polynomial(self.order.d, self.seasonal.d, self.seasonal.period)
    }

    fn ar_degree(&self) -> usize {
        self.order.p + self.seasonal.p * self.seasonal.period
    }

    fn unpack(&self, params: &[f64]) -> Coefficients {
        let mut rest = params;
        let mut take = |n: usize| {
            let (head, tail) = rest.split_at(n);
            rest = tail;
            head.to_vec()
        };
        let intercept = if self.include_intercept {
            take(1)[0]
        } else {
            0.0
        };
        Coefficients {
            intercept,
            ar: take(self.order.p),
            ma: take(self.order.q),
            seasonal_ar: take(self.seasonal.p),
            seasonal_ma: take(self.seasonal.q),
        }
    }

    fn zero_coefficients(&self, intercept: f64) -> Coefficients {
        Coefficients {
            intercept: if self.include_intercept { intercept } else { 0.0 },
            ar: vec![0.0; self.order.p],
            ma: vec![0.0; self.order.q],
            seasonal_ar: vec![0.0; self.seasonal.p],
            seasonal_ma: vec![0.0; self.seasonal.q],
        }
    }
}

/// State produced by a successful fit or update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct FittedState {
    coefficients: Coefficients,
    sigma2: f64,
    aicc: f64,
    history: Vec<f64>,
    #[serde(default)]
    residuals: Option<Vec<f64>>,
}

struct Estimate {
    state: FittedState,
    iterations: usize,
    converged: bool,
}

/// Innovations `e_t` of the ARMA recursion on `w`; zero for the first
/// `ar.len() - 1` conditioning points.
fn innovations(w: &[f64], mu: f64, ar: &[f64], ma: &[f64]) -> Vec<f64> {
    let r = ar.len().saturating_sub(1);
    let mut e = vec![0.0; w.len()];
    for t in r..w.len() {
        let mut value = w[t] - mu;
        for (i, a) in ar.iter().enumerate().skip(1) {
            value += a * (w[t - i] - mu);
        }
        for (j, m) in ma.iter().enumerate().skip(1) {
            if j > t {
                break;
            }
            value -= m * e[t - j];
        }
        e[t] = value;
    }
    e
}

fn estimate(
    structure: &Structure,
    history: &[f64],
    start: Option<&Coefficients>,
    config: &NelderMeadConfig,
) -> std::result::Result<Estimate, MathError> {
    let delta = structure.delta();
    let w = apply_difference(history, &delta);
    let r = structure.ar_degree();
    let k = structure.n_params();
    let n_eff = w.len().saturating_sub(r);
    if n_eff <= k + 2 {
        return Err(MathError::InsufficientData(format!(
            "{} observations leave {} usable points for {} parameters",
            history.len(),
            n_eff,
            k
        )));
    }

    let period = structure.seasonal.period;
    let sum_of_squares = |c: &Coefficients| -> f64 {
        let ar = c.ar_polynomial(period);
        let ma = c.ma_polynomial(period);
        if !is_stable(&ar) || !is_stable(&ma) {
            return f64::MAX;
        }
        let e = innovations(&w, c.intercept, &ar, &ma);
        let css: f64 = e[r..].iter().map(|v| v * v).sum();
        if css.is_finite() {
            css
        } else {
            f64::MAX
        }
    };

    let initial = match start {
        Some(c) => c.pack(structure.include_intercept),
        None => structure
            .zero_coefficients(mean(&w))
            .pack(structure.include_intercept),
    };

    let result = nelder_mead(
        |params| sum_of_squares(&structure.unpack(params)),
        &initial,
        config,
    );

    if result.optimal_value >= f64::MAX
        || !result.optimal_value.is_finite()
        || result.optimal_point.iter().any(|v| !v.is_finite())
    {
        return Err(MathError::CalculationError(
            "Optimizer found no stationary and invertible parameters".to_string(),
        ));
    }

    let coefficients = structure.unpack(&result.optimal_point);
    let ar = coefficients.ar_polynomial(period);
    let ma = coefficients.ma_polynomial(period);
    let residuals = innovations(&w, coefficients.intercept, &ar, &ma)[r..].to_vec();

    let n = n_eff as f64;
    let sigma2 = (result.optimal_value / n).max(MIN_SIGMA2);
    let n_total = (k + 1) as f64;
    let log_likelihood = -0.5 * n * ((2.0 * PI * sigma2).ln() + 1.0);
    let aic = -2.0 * log_likelihood + 2.0 * n_total;
    let aicc = aic + 2.0 * n_total * (n_total + 1.0) / (n - n_total - 1.0);

    debug!(
        css = result.optimal_value,
        sigma2,
        aicc,
        iterations = result.iterations,
        converged = result.converged,
        "estimated ARIMA coefficients"
    );

    Ok(Estimate {
        state: FittedState {
            coefficients,
            sigma2,
            aicc,
            history: history.to_vec(),
            residuals: Some(residuals),
        },
        iterations: result.iterations,
        converged: result.converged,
    })
}

/// Seasonal ARIMA model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArimaModel {
    version: u32,
    order: ArimaOrder,
    #[serde(default)]
    seasonal: SeasonalOrder,
    include_intercept: bool,
    #[serde(default)]
    fitted: Option<FittedState>,
}

impl ArimaModel {
    /// Create an unfitted non-seasonal model.
    ///
    /// A mean is estimated when the total differencing order is below two.
    pub fn new(order: ArimaOrder) -> Self {
        Self {
            version: ARTIFACT_VERSION,
            order,
            seasonal: SeasonalOrder::none(),
            include_intercept: order.d < 2,
            fitted: None,
        }
    }

    /// Same model with a seasonal component; ignored when `period < 2`
    pub fn with_seasonal(mut self, seasonal: SeasonalOrder) -> Self {
        self.seasonal = if seasonal.period >= 2 {
            seasonal
        } else {
            SeasonalOrder::none()
        };
        self.include_intercept = self.order.d + self.seasonal.d < 2;
        self.fitted = None;
        self
    }

    /// Fit the model to `values` from scratch
    pub fn fit(&mut self, values: &[f64]) -> Result<()> {
        self.fit_with_max_iterations(values, DEFAULT_MAX_ITERATIONS)
    }

    /// Fit the model to `values` from scratch with an optimizer budget.
    ///
    /// The best parameters found are kept even when the budget runs out.
    pub fn fit_with_max_iterations(&mut self, values: &[f64], max_iterations: usize) -> Result<()> {
        self.fit_reporting_convergence(values, max_iterations).map(|_| ())
    }

    /// Fit from scratch and report whether the optimizer converged
    pub(crate) fn fit_reporting_convergence(
        &mut self,
        values: &[f64],
        max_iterations: usize,
    ) -> Result<bool> {
        if values.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "Cannot fit a model to an empty series".to_string(),
            ));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::InvalidParameter(
                "Training values must be finite".to_string(),
            ));
        }

        let config = NelderMeadConfig::default().with_max_iter(max_iterations.max(1));
        let estimate = estimate(&self.structure(), values, None, &config)?;
        if !estimate.converged {
            debug!(
                model = %self.name(),
                iterations = estimate.iterations,
                "fit stopped at the iteration limit"
            );
        }
        self.fitted = Some(estimate.state);
        Ok(estimate.converged)
    }

    /// Deserialize a persisted artifact.
    ///
    /// Fails with [`ForecastError::ModelLoad`] when the payload is not valid
    /// JSON, carries another artifact version, or holds an unfitted or
    /// inconsistent model.
    pub fn load(bytes: &[u8]) -> Result<Self> {
        let model: ArimaModel = serde_json::from_slice(bytes)
            .map_err(|e| ForecastError::ModelLoad(format!("Invalid artifact: {}", e)))?;
        model.validate().map_err(ForecastError::ModelLoad)?;
        Ok(model)
    }

    /// Boxed variant of [`ArimaModel::load`], usable as a [`crate::models::ModelLoader`]
    pub fn load_boxed(bytes: &[u8]) -> Result<Box<dyn ForecastModel>> {
        Ok(Box::new(Self::load(bytes)?))
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.version != ARTIFACT_VERSION {
            return Err(format!(
                "Unsupported artifact version {} (expected {})",
                self.version, ARTIFACT_VERSION
            ));
        }
        let fitted = self
            .fitted
            .as_ref()
            .ok_or_else(|| "Artifact holds no fitted state".to_string())?;

        let c = &fitted.coefficients;
        let s = &self.seasonal;
        if c.ar.len() != self.order.p
            || c.ma.len() != self.order.q
            || c.seasonal_ar.len() != s.p
            || c.seasonal_ma.len() != s.q
        {
            return Err(format!(
                "Coefficient counts ({}, {}, {}, {}) don't match order {}{}",
                c.ar.len(),
                c.ma.len(),
                c.seasonal_ar.len(),
                c.seasonal_ma.len(),
                self.order,
                self.seasonal_suffix()
            ));
        }
        if (s.p > 0 || s.d > 0 || s.q > 0) && s.period < 2 {
            return Err(format!("Seasonal period {} is too short", s.period));
        }
        if self.include_intercept != (self.order.d + s.d < 2) {
            return Err(format!(
                "Mean term flag {} is inconsistent with total differencing order {}",
                self.include_intercept,
                self.order.d + s.d
            ));
        }
        if !self.include_intercept && c.intercept != 0.0 {
            return Err("Intercept present on a model without a mean term".to_string());
        }
        if !c.is_finite() {
            return Err("Coefficients must be finite".to_string());
        }
        if !(fitted.sigma2.is_finite() && fitted.sigma2 > 0.0) || !fitted.aicc.is_finite() {
            return Err("Innovation variance and criterion must be finite".to_string());
        }

        let structure = self.structure();
        let min_history = structure.delta().len() + structure.ar_degree();
        if fitted.history.len() < min_history {
            return Err(format!(
                "History of {} observations is too short for order {}{}",
                fitted.history.len(),
                self.order,
                self.seasonal_suffix()
            ));
        }
        if fitted.history.iter().any(|v| !v.is_finite()) {
            return Err("History must be finite".to_string());
        }
        if let Some(residuals) = &fitted.residuals {
            if residuals.iter().any(|v| !v.is_finite()) {
                return Err("Residuals must be finite".to_string());
            }
        }
        Ok(())
    }

    fn structure(&self) -> Structure {
        Structure {
            order: self.order,
            seasonal: self.seasonal,
            include_intercept: self.include_intercept,
        }
    }

    fn seasonal_suffix(&self) -> String {
        if self.seasonal.is_active() {
            format!(
                "({},{},{})[{}]",
                self.seasonal.p, self.seasonal.d, self.seasonal.q, self.seasonal.period
            )
        } else {
            String::new()
        }
    }

    /// Non-seasonal order
    pub fn order(&self) -> ArimaOrder {
        self.order
    }

    /// Seasonal order
    pub fn seasonal_order(&self) -> SeasonalOrder {
        self.seasonal
    }

    /// Whether the model has been fitted
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Fitted coefficients
    pub fn coefficients(&self) -> Option<&Coefficients> {
        self.fitted.as_ref().map(|f| &f.coefficients)
    }

    /// Corrected Akaike information criterion of the last fit
    pub fn aicc(&self) -> Option<f64> {
        self.fitted.as_ref().map(|f| f.aicc)
    }

    /// Innovation variance of the last fit
    pub fn sigma2(&self) -> Option<f64> {
        self.fitted.as_ref().map(|f| f.sigma2)
    }

    /// Number of observations the model has been fitted on
    pub fn history_len(&self) -> usize {
        self.fitted.as_ref().map_or(0, |f| f.history.len())
    }

    /// Point forecasts and cumulative ψ-weight variances
    fn forecast_path(&self, fitted: &FittedState, horizon: usize) -> (Vec<f64>, Vec<f64>) {
        let structure = self.structure();
        let period = self.seasonal.period;
        let delta = structure.delta();
        let c = &fitted.coefficients;
        let ar = c.ar_polynomial(period);
        let ma = c.ma_polynomial(period);
        let mu = c.intercept;

        let w = apply_difference(&fitted.history, &delta);
        let mut e = innovations(&w, mu, &ar, &ma);
        let mut u: Vec<f64> = w.iter().map(|v| v - mu).collect();

        let n = u.len();
        for t in n..n + horizon {
            let mut value = 0.0;
            for (i, a) in ar.iter().enumerate().skip(1) {
                value -= a * u[t - i];
            }
            for (j, m) in ma.iter().enumerate().skip(1) {
                if j > t {
                    break;
                }
                value += m * e[t - j];
            }
            u.push(value);
            e.push(0.0);
        }

        let mut y = fitted.history.clone();
        let m = y.len();
        for h in 0..horizon {
            let t = m + h;
            let mut value = u[n + h] + mu;
            for (k, d) in delta.iter().enumerate().skip(1) {
                value -= d * y[t - k];
            }
            y.push(value);
        }

        let psi = psi_weights(&poly_mul(&ar, &delta), &ma, horizon);
        let variances = psi
            .iter()
            .scan(0.0, |acc, p| {
                *acc += p * p;
                Some(*acc * fitted.sigma2)
            })
            .collect();

        (y.split_off(m), variances)
    }
}

impl ForecastModel for ArimaModel {
    fn update(&mut self, values: &[f64], max_iterations: usize) -> Result<()> {
        let fitted = self
            .fitted
            .as_ref()
            .ok_or_else(|| ForecastError::Update("Model has not been fitted".to_string()))?;
        if values.is_empty() {
            return Err(ForecastError::Update(
                "No observations to update with".to_string(),
            ));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::Update(
                "Update values must be finite".to_string(),
            ));
        }

        let mut history = fitted.history.clone();
        history.extend_from_slice(values);

        let config = NelderMeadConfig::default().with_max_iter(max_iterations.max(1));
        let estimate = estimate(
            &self.structure(),
            &history,
            Some(&fitted.coefficients),
            &config,
        )
        .map_err(|e| ForecastError::Update(e.to_string()))?;

        if !estimate.converged {
            warn!(
                model = %self.name(),
                iterations = estimate.iterations,
                "update hit the iteration limit before converging; keeping best parameters"
            );
        }
        self.fitted = Some(estimate.state);
        Ok(())
    }

    fn predict(&self, horizon: usize, confidence: f64) -> Result<ModelForecast> {
        let fitted = self
            .fitted
            .as_ref()
            .ok_or_else(|| ForecastError::Prediction("Model has not been fitted".to_string()))?;
        if horizon == 0 {
            return Err(ForecastError::Prediction(
                "Horizon must be at least 1".to_string(),
            ));
        }
        if !(confidence > 0.0 && confidence < 1.0) {
            return Err(ForecastError::Prediction(format!(
                "Confidence level must be between 0 and 1, got {}",
                confidence
            )));
        }

        let normal =
            Normal::new(0.0, 1.0).map_err(|e| ForecastError::Prediction(e.to_string()))?;
        let z = normal.inverse_cdf((1.0 + confidence) / 2.0);

        let (point, variances) = self.forecast_path(fitted, horizon);
        let (lower, upper) = point
            .iter()
            .zip(&variances)
            .map(|(p, v)| {
                let half = z * v.sqrt();
                (p - half, p + half)
            })
            .unzip();

        Ok(ModelForecast { point, lower, upper })
    }

    fn residuals(&self) -> Result<Vec<f64>> {
        self.fitted
            .as_ref()
            .and_then(|f| f.residuals.clone())
            .ok_or_else(|| {
                ForecastError::ResidualsUnavailable(format!(
                    "{} carries no residuals",
                    self.name()
                ))
            })
    }

    fn copy(&self) -> Box<dyn ForecastModel> {
        Box::new(self.clone())
    }

    fn name(&self) -> String {
        format!("ARIMA{}{}", self.order, self.seasonal_suffix())
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::Distribution;

    fn ar1_series(phi: f64, n: usize) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(42);
        let noise = rand_distr::Normal::new(0.0, 1.0).unwrap();
        let mut y = vec![0.0];
        for t in 1..n {
            y.push(phi * y[t - 1] + noise.sample(&mut rng));
        }
        y
    }

    #[test]
    fn test_innovations_white_noise() {
        let w = [1.0, 2.0, 3.0];
        let e = innovations(&w, 2.0, &[1.0], &[1.0]);
        assert_eq!(e, vec![-1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_unpack_roundtrip() {
        let structure = Structure {
            order: ArimaOrder::new(2, 0, 1),
            seasonal: SeasonalOrder::new(1, 0, 0, 5),
            include_intercept: true,
        };
        let c = structure.unpack(&[5.0, 0.1, 0.2, 0.3, 0.4]);
        assert_eq!(c.intercept, 5.0);
        assert_eq!(c.ar, vec![0.1, 0.2]);
        assert_eq!(c.ma, vec![0.3]);
        assert_eq!(c.seasonal_ar, vec![0.4]);
        assert!(c.seasonal_ma.is_empty());
        assert_eq!(c.pack(true), vec![5.0, 0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn test_fit_recovers_ar_coefficient() {
        let mut model = ArimaModel::new(ArimaOrder::new(1, 0, 0));
        model.fit(&ar1_series(0.7, 300)).unwrap();
        let phi = model.coefficients().unwrap().ar[0];
        assert!((phi - 0.7).abs() < 0.15, "phi = {}", phi);
        assert!(model.aicc().unwrap().is_finite());
    }

    #[test]
    fn test_second_difference_extrapolates_slope() {
        let values = [10.0, 11.0, 9.5, 10.5, 10.0, 11.0, 10.2, 10.8, 10.4, 10.6];
        let mut model = ArimaModel::new(ArimaOrder::new(0, 2, 0));
        model.fit(&values).unwrap();
        // (0,2,0) extrapolates the last slope linearly
        let forecast = model.predict(2, 0.95).unwrap();
        assert_relative_eq!(forecast.point[0], 10.8, epsilon = 1e-9);
        assert_relative_eq!(forecast.point[1], 11.0, epsilon = 1e-9);
    }

    #[test]
    fn test_interval_widens_with_horizon() {
        let mut model = ArimaModel::new(ArimaOrder::new(1, 1, 0));
        model.fit(&ar1_series(0.5, 80)).unwrap();
        let forecast = model.predict(5, 0.95).unwrap();
        let widths: Vec<f64> = forecast
            .upper
            .iter()
            .zip(&forecast.lower)
            .map(|(u, l)| u - l)
            .collect();
        assert!(widths.windows(2).all(|w| w[1] >= w[0]));
        for i in 0..5 {
            assert!(forecast.lower[i] <= forecast.point[i]);
            assert!(forecast.point[i] <= forecast.upper[i]);
        }
    }

    #[test]
    fn test_insufficient_data() {
        let mut model = ArimaModel::new(ArimaOrder::new(2, 1, 2));
        assert!(matches!(
            model.fit(&[1.0, 2.0, 3.0, 4.0]),
            Err(ForecastError::Math(MathError::InsufficientData(_)))
        ));
        assert!(!model.is_fitted());
    }

    #[test]
    fn test_name_includes_seasonal_order() {
        let model = ArimaModel::new(ArimaOrder::new(1, 1, 1))
            .with_seasonal(SeasonalOrder::new(1, 0, 0, 5));
        assert_eq!(model.name(), "ARIMA(1,1,1)(1,0,0)[5]");
        let plain = ArimaModel::new(ArimaOrder::new(1, 1, 1))
            .with_seasonal(SeasonalOrder::new(1, 0, 0, 1));
        assert_eq!(plain.name(), "ARIMA(1,1,1)");
    }
}
