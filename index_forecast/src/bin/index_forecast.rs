//! Command-line entry point for training and forecasting runs.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use index_forecast::{
    train_model, CsvSeriesSupplier, FileModelStore, ForecastPipeline, ModelSelector,
    PipelineConfig, PipelineReport, RunStatus, SelectorConfig,
};
use index_forecast::evaluator::AccuracyRating;
use index_forecast::models::ForecastModel;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "index-forecast")]
#[command(about = "Business-day index forecasting", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select a model order on historical data and save the artifact
    Train {
        /// CSV file with a date and a closing value column
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the model artifact
        #[arg(short, long)]
        model: PathBuf,

        /// Include a seasonal component in the search
        #[arg(long)]
        seasonal: bool,

        /// Largest AR order to try
        #[arg(long, default_value_t = 5)]
        max_p: usize,

        /// Largest MA order to try
        #[arg(long, default_value_t = 5)]
        max_q: usize,

        /// JSON file with search parameters
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Forecast with a saved model and evaluate it on held-out data
    Forecast {
        /// CSV file with a date and a closing value column
        #[arg(short, long)]
        input: PathBuf,

        /// Model artifact produced by `train`
        #[arg(short, long)]
        model: PathBuf,

        /// JSON file with run parameters
        #[arg(long)]
        config: Option<PathBuf>,

        /// Business days to forecast
        #[arg(long)]
        horizon: Option<usize>,

        /// Observations held out for evaluation
        #[arg(long)]
        n_test: Option<usize>,

        /// Confidence level of the intervals
        #[arg(long)]
        confidence: Option<f64>,

        /// Forecast with the saved model as is
        #[arg(long)]
        no_update: bool,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct ForecastOutput<'a> {
    #[serde(flatten)]
    report: &'a PipelineReport,
    status: RunStatus,
    rating: Option<AccuracyRating>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "index_forecast=info".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Train {
            input,
            model,
            seasonal,
            max_p,
            max_q,
            config,
        } => {
            let selector_config = match config {
                Some(path) => SelectorConfig::from_json_file(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                None => SelectorConfig::default(),
            };
            let trained = train_model(
                &CsvSeriesSupplier::new(&input),
                &FileModelStore::new(&model),
                &ModelSelector::new(selector_config),
                0..=max_p,
                0..=max_q,
                seasonal,
            )
            .context("training failed")?;
            info!(model = %trained.name(), path = %model.display(), "done");
            Ok(())
        }
        Commands::Forecast {
            input,
            model,
            config,
            horizon,
            n_test,
            confidence,
            no_update,
            output,
        } => {
            let mut run_config = match config {
                Some(path) => PipelineConfig::from_json_file(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                None => PipelineConfig::default(),
            };
            if let Some(horizon) = horizon {
                run_config.horizon = horizon;
            }
            if let Some(n_test) = n_test {
                run_config.n_test = n_test;
            }
            if let Some(confidence) = confidence {
                run_config.confidence = confidence;
            }
            if no_update {
                run_config.update_model = false;
            }

            let pipeline =
                ForecastPipeline::new(CsvSeriesSupplier::new(&input), FileModelStore::new(&model));
            let result = pipeline.run_with_config(&run_config);
            let status = RunStatus::from(&result);
            let report = match result {
                Ok(report) => report,
                Err(e) => bail!("forecast run failed: {}", e),
            };

            if let RunStatus::DegradedOk(reasons) = &status {
                warn!(?reasons, "run completed with degraded steps");
            }

            let rating = report.rating();
            let json = serde_json::to_string_pretty(&ForecastOutput {
                report: &report,
                status,
                rating,
            })?;
            match output {
                Some(path) => fs::write(&path, json)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{}", json),
            }
            Ok(())
        }
    }
}
