//! End-to-end forecasting run
//!
//! A run fetches the series, aligns it to business days, optionally refits a
//! private copy of the cached model on the training part, forecasts the
//! future horizon and evaluates a forecast of the held-out part. Failures of
//! the optional steps degrade the run instead of aborting it; every step is
//! recorded in the report's step log.

use crate::calendar::business_days_after;
use crate::config::{validate_run, PipelineConfig};
use crate::error::{ForecastError, Result};
use crate::evaluator::{
    AccuracyMetrics, AccuracyRating, EvaluationReport, ForecastEvaluator, ResidualDiagnostics,
};
use crate::models::arima::ArimaModel;
use crate::models::{ForecastModel, ForecastResult, ModelLoader};
use crate::normalize::SeriesNormalizer;
use crate::series::Series;
use crate::sources::{ModelStore, SeriesSupplier};
use crate::split::{Split, TrainTestSplitter};
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Stages of a run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStep {
    LoadSeries,
    LoadModel,
    Normalize,
    Split,
    Update,
    Forecast,
    TestForecast,
    Evaluate,
    Residuals,
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStep::LoadSeries => "load_series",
            PipelineStep::LoadModel => "load_model",
            PipelineStep::Normalize => "normalize",
            PipelineStep::Split => "split",
            PipelineStep::Update => "update",
            PipelineStep::Forecast => "forecast",
            PipelineStep::TestForecast => "test_forecast",
            PipelineStep::Evaluate => "evaluate",
            PipelineStep::Residuals => "residuals",
        };
        f.write_str(name)
    }
}

/// Outcome of a single step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum StepStatus {
    Ok,
    /// Not applicable to this run
    Skipped(String),
    /// Failed and absorbed
    Failed(String),
}

/// One entry of the step log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub step: PipelineStep,
    #[serde(flatten)]
    pub status: StepStatus,
}

/// Overall outcome of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reasons", rename_all = "snake_case")]
pub enum RunStatus {
    Ok,
    /// Completed with absorbed failures
    DegradedOk(Vec<String>),
    /// Aborted
    Failed(String),
}

impl From<&Result<PipelineReport>> for RunStatus {
    fn from(result: &Result<PipelineReport>) -> Self {
        match result {
            Ok(report) => report.status(),
            Err(e) => RunStatus::Failed(e.to_string()),
        }
    }
}

/// Output of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    /// Name of the model that produced the forecasts
    pub model_name: String,
    /// False when normalization failed and the raw series was used
    pub normalized: bool,
    /// Whether the model copy was refitted on the training part
    pub updated: bool,
    /// Forecast past the last observation
    pub forecast: ForecastResult,
    /// Forecast over the held-out part
    pub test_forecast: Option<ForecastResult>,
    /// Accuracy and residual summary, when any part could be computed
    pub evaluation: Option<EvaluationReport>,
    /// Step log in execution order
    pub steps: Vec<StepRecord>,
}

impl PipelineReport {
    /// Status of `step`, if it was reached
    pub fn step(&self, step: PipelineStep) -> Option<&StepStatus> {
        self.steps
            .iter()
            .find(|r| r.step == step)
            .map(|r| &r.status)
    }

    /// `DegradedOk` when any step failed, `Ok` otherwise
    pub fn status(&self) -> RunStatus {
        let reasons: Vec<String> = self
            .steps
            .iter()
            .filter_map(|r| match &r.status {
                StepStatus::Failed(reason) => Some(format!("{}: {}", r.step, reason)),
                _ => None,
            })
            .collect();

        if reasons.is_empty() {
            RunStatus::Ok
        } else {
            RunStatus::DegradedOk(reasons)
        }
    }

    /// Accuracy band of the test forecast
    pub fn rating(&self) -> Option<AccuracyRating> {
        self.evaluation.as_ref().and_then(|e| e.rating())
    }
}

/// Forecasting pipeline over a series supplier and a model store.
///
/// The canonical model is loaded once and shared between runs; each run
/// works on its own copy.
pub struct ForecastPipeline<S, M> {
    supplier: S,
    store: M,
    loader: ModelLoader,
    normalizer: SeriesNormalizer,
    splitter: TrainTestSplitter,
    evaluator: ForecastEvaluator,
    update_max_iterations: usize,
    cached: Mutex<Option<Arc<dyn ForecastModel>>>,
}

impl<S, M> fmt::Debug for ForecastPipeline<S, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForecastPipeline")
            .field("update_max_iterations", &self.update_max_iterations)
            .finish_non_exhaustive()
    }
}

impl<S, M> ForecastPipeline<S, M>
where
    S: SeriesSupplier,
    M: ModelStore,
{
    /// Create a pipeline loading [`ArimaModel`] artifacts
    pub fn new(supplier: S, store: M) -> Self {
        Self {
            supplier,
            store,
            loader: ArimaModel::load_boxed,
            normalizer: SeriesNormalizer::new(),
            splitter: TrainTestSplitter::new(),
            evaluator: ForecastEvaluator::new(),
            update_max_iterations: PipelineConfig::default().update_max_iterations,
            cached: Mutex::new(None),
        }
    }

    /// Use another artifact loader
    pub fn with_loader(mut self, loader: ModelLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Use another evaluator
    pub fn with_evaluator(mut self, evaluator: ForecastEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Optimizer budget of the incremental update
    pub fn with_update_max_iterations(mut self, max_iterations: usize) -> Self {
        self.update_max_iterations = max_iterations.max(1);
        self
    }

    /// The cached canonical model, loading it from the store on first use
    pub fn canonical_model(&self) -> Result<Arc<dyn ForecastModel>> {
        let mut cached = self
            .cached
            .lock()
            .map_err(|_| ForecastError::Store("Model cache lock poisoned".to_string()))?;

        if let Some(model) = cached.as_ref() {
            return Ok(Arc::clone(model));
        }

        let bytes = self.store.load_model_bytes()?;
        let model: Arc<dyn ForecastModel> = Arc::from((self.loader)(&bytes)?);
        info!(model = %model.name(), "loaded model artifact");
        *cached = Some(Arc::clone(&model));
        Ok(model)
    }

    /// Drop the cached model so the next run reloads it from the store
    pub fn invalidate_model(&self) {
        if let Ok(mut cached) = self.cached.lock() {
            *cached = None;
        }
    }

    /// Run with the values of `config`
    pub fn run_with_config(&self, config: &PipelineConfig) -> Result<PipelineReport> {
        config.validate()?;
        self.run(
            config.n_test,
            config.update_model,
            config.horizon,
            config.confidence,
            config.update_max_iterations,
        )
    }

    /// Execute one forecasting run
    pub fn run_pipeline(
        &self,
        n_test: usize,
        update_model: bool,
        horizon: usize,
        confidence: f64,
    ) -> Result<PipelineReport> {
        self.run(
            n_test,
            update_model,
            horizon,
            confidence,
            self.update_max_iterations,
        )
    }

    fn run(
        &self,
        n_test: usize,
        update_model: bool,
        horizon: usize,
        confidence: f64,
        max_iterations: usize,
    ) -> Result<PipelineReport> {
        validate_run(horizon, confidence)?;
        let mut steps = StepLog::default();

        let series = self.supplier.fetch_series()?;
        if series.is_empty() {
            return Err(ForecastError::EmptySeries);
        }
        info!(observations = series.len(), "series loaded");
        steps.ok(PipelineStep::LoadSeries);

        let mut model = self.canonical_model()?.copy();
        steps.ok(PipelineStep::LoadModel);

        let (working, normalized) = match self.normalizer.normalize(&series) {
            Ok(normalized) => {
                steps.ok(PipelineStep::Normalize);
                (normalized.into_series(), true)
            }
            Err(e) => {
                warn!(error = %e, "normalization failed; using the sorted series");
                steps.failed(PipelineStep::Normalize, &e);
                (series, false)
            }
        };

        let split = self.splitter.split(&working, n_test);
        info!(
            train = split.train.len(),
            test = split.test.len(),
            "series split"
        );
        steps.ok(PipelineStep::Split);

        let updated = if update_model {
            match model.update(&split.train.values(), max_iterations) {
                Ok(()) => {
                    info!(model = %model.name(), "model updated on training data");
                    steps.ok(PipelineStep::Update);
                    true
                }
                Err(e) => {
                    warn!(error = %e, "update failed; forecasting with the loaded model");
                    steps.failed(PipelineStep::Update, &e);
                    false
                }
            }
        } else {
            steps.skipped(PipelineStep::Update, "update disabled");
            false
        };

        let forecast = self.future_forecast(model.as_ref(), &working, horizon, confidence)?;
        info!(horizon, "future forecast produced");
        steps.ok(PipelineStep::Forecast);

        let (test_forecast, metrics) =
            self.evaluate_test(model.as_ref(), &split, confidence, &mut steps);

        let diagnostics = match model
            .residuals()
            .and_then(|r| self.evaluator.residual_diagnostics(&r))
        {
            Ok(diagnostics) => {
                steps.ok(PipelineStep::Residuals);
                Some(diagnostics)
            }
            Err(e) => {
                warn!(error = %e, "residual diagnostics unavailable");
                steps.failed(PipelineStep::Residuals, &e);
                None
            }
        };

        let evaluation = build_evaluation(metrics.as_ref(), diagnostics.as_ref());

        let report = PipelineReport {
            model_name: model.name(),
            normalized,
            updated,
            forecast,
            test_forecast,
            evaluation,
            steps: steps.into_records(),
        };
        info!(status = ?report.status(), "pipeline run finished");
        Ok(report)
    }

    fn future_forecast(
        &self,
        model: &dyn ForecastModel,
        series: &Series,
        horizon: usize,
        confidence: f64,
    ) -> Result<ForecastResult> {
        let last = series.last_date().ok_or(ForecastError::EmptySeries)?;
        let forecast = model.predict(horizon, confidence)?;
        ForecastResult::new(business_days_after(last, horizon), forecast)
    }

    fn evaluate_test(
        &self,
        model: &dyn ForecastModel,
        split: &Split,
        confidence: f64,
        steps: &mut StepLog,
    ) -> (Option<ForecastResult>, Option<AccuracyMetrics>) {
        if !split.has_test() {
            let reason = "not enough observations for a test set";
            steps.skipped(PipelineStep::TestForecast, reason);
            steps.skipped(PipelineStep::Evaluate, reason);
            return (None, None);
        }

        let test_forecast = match model
            .predict(split.test.len(), confidence)
            .and_then(|f| ForecastResult::new(split.test.dates(), f))
        {
            Ok(forecast) => {
                steps.ok(PipelineStep::TestForecast);
                forecast
            }
            Err(e) => {
                warn!(error = %e, "test forecast failed; skipping evaluation");
                steps.failed(PipelineStep::TestForecast, &e);
                steps.skipped(PipelineStep::Evaluate, "no test forecast");
                return (None, None);
            }
        };

        let metrics = match self
            .evaluator
            .evaluate(&split.test.values(), &test_forecast.point_forecast)
        {
            Ok(metrics) => {
                info!(mape = ?metrics.mape, "test forecast evaluated");
                steps.ok(PipelineStep::Evaluate);
                Some(metrics)
            }
            Err(e) => {
                warn!(error = %e, "evaluation failed");
                steps.failed(PipelineStep::Evaluate, &e);
                None
            }
        };

        (Some(test_forecast), metrics)
    }
}

fn build_evaluation(
    metrics: Option<&AccuracyMetrics>,
    diagnostics: Option<&ResidualDiagnostics>,
) -> Option<EvaluationReport> {
    if metrics.is_none() && diagnostics.is_none() {
        return None;
    }
    let mut report = EvaluationReport::default();
    if let Some(metrics) = metrics {
        report = report.with_accuracy(metrics);
    }
    if let Some(diagnostics) = diagnostics {
        report = report.with_residuals(diagnostics);
    }
    Some(report)
}

#[derive(Default)]
struct StepLog {
    records: Vec<StepRecord>,
}

impl StepLog {
    fn push(&mut self, step: PipelineStep, status: StepStatus) {
        self.records.push(StepRecord { step, status });
    }

    fn ok(&mut self, step: PipelineStep) {
        self.push(step, StepStatus::Ok);
    }

    fn skipped(&mut self, step: PipelineStep, reason: &str) {
        self.push(step, StepStatus::Skipped(reason.to_string()));
    }

    fn failed(&mut self, step: PipelineStep, error: &ForecastError) {
        self.push(step, StepStatus::Failed(error.to_string()));
    }

    fn into_records(self) -> Vec<StepRecord> {
        self.records
    }
}
