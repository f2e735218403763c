//! Series suppliers and model artifact stores

use crate::error::{ForecastError, Result};
use crate::models::ForecastModel;
use crate::series::Series;
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::{CsvReader, DataFrame, DataType, SerReader};
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Source of the raw `(date, value)` series
pub trait SeriesSupplier: Send + Sync {
    /// Fetch the series; fails with [`ForecastError::Supply`]
    fn fetch_series(&self) -> Result<Series>;
}

/// Persistence for an opaque model artifact
pub trait ModelStore: Send + Sync {
    /// Load the stored artifact; fails with [`ForecastError::Store`]
    fn load_model_bytes(&self) -> Result<Vec<u8>>;

    /// Replace the stored artifact; fails with [`ForecastError::Store`]
    fn save_model_bytes(&self, bytes: &[u8]) -> Result<()>;
}

/// Supplier serving a series held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySeries {
    series: Series,
}

impl InMemorySeries {
    /// Wrap an existing series
    pub fn new(series: Series) -> Self {
        Self { series }
    }

    /// Build from raw pairs in arrival order
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        Self::new(Series::from_pairs(pairs))
    }
}

impl SeriesSupplier for InMemorySeries {
    fn fetch_series(&self) -> Result<Series> {
        Ok(self.series.clone())
    }
}

/// Store keeping the artifact in memory
#[derive(Debug, Default)]
pub struct InMemoryModelStore {
    bytes: Mutex<Option<Vec<u8>>>,
}

impl InMemoryModelStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `bytes`
    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Mutex::new(Some(bytes)),
        }
    }

    /// Create a store holding the serialized `model`
    pub fn from_model(model: &dyn ForecastModel) -> Result<Self> {
        Ok(Self::with_bytes(model.to_bytes()?))
    }
}

impl ModelStore for InMemoryModelStore {
    fn load_model_bytes(&self) -> Result<Vec<u8>> {
        let guard = self
            .bytes
            .lock()
            .map_err(|_| ForecastError::Store("Store lock poisoned".to_string()))?;
        guard
            .clone()
            .ok_or_else(|| ForecastError::Store("No model artifact stored".to_string()))
    }

    fn save_model_bytes(&self, bytes: &[u8]) -> Result<()> {
        let mut guard = self
            .bytes
            .lock()
            .map_err(|_| ForecastError::Store("Store lock poisoned".to_string()))?;
        *guard = Some(bytes.to_vec());
        Ok(())
    }
}

/// Store backed by a single file
#[derive(Debug, Clone)]
pub struct FileModelStore {
    path: PathBuf,
}

impl FileModelStore {
    /// Store the artifact at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Artifact location
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModelStore for FileModelStore {
    fn load_model_bytes(&self) -> Result<Vec<u8>> {
        fs::read(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ForecastError::Store(format!(
                "No model artifact at {}",
                self.path.display()
            )),
            _ => ForecastError::Store(format!("Cannot read {}: {}", self.path.display(), e)),
        })
    }

    fn save_model_bytes(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                ForecastError::Store(format!("Cannot create {}: {}", parent.display(), e))
            })?;
        }
        fs::write(&self.path, bytes)
            .map_err(|e| ForecastError::Store(format!("Cannot write {}: {}", self.path.display(), e)))?;
        debug!(path = %self.path.display(), size = bytes.len(), "model artifact saved");
        Ok(())
    }
}

/// Supplier reading a CSV file with a date and a value column
#[derive(Debug, Clone)]
pub struct CsvSeriesSupplier {
    path: PathBuf,
    date_column: Option<String>,
    value_column: Option<String>,
}

impl CsvSeriesSupplier {
    /// Read `path`, detecting the date and value columns from their names
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            date_column: None,
            value_column: None,
        }
    }

    /// Use explicit column names instead of detection
    pub fn with_columns(mut self, date_column: &str, value_column: &str) -> Self {
        self.date_column = Some(date_column.to_string());
        self.value_column = Some(value_column.to_string());
        self
    }

    fn read(&self) -> Result<Series> {
        let file = File::open(&self.path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        series_from_dataframe(
            &df,
            self.date_column.as_deref(),
            self.value_column.as_deref(),
        )
    }
}

impl SeriesSupplier for CsvSeriesSupplier {
    fn fetch_series(&self) -> Result<Series> {
        self.read().map_err(|e| match e {
            ForecastError::Supply(_) => e,
            other => ForecastError::Supply(format!("{}: {}", self.path.display(), other)),
        })
    }
}

/// Supplier serving a series from an in-memory DataFrame
#[derive(Debug, Clone)]
pub struct DataFrameSupplier {
    df: DataFrame,
    date_column: Option<String>,
    value_column: Option<String>,
}

impl DataFrameSupplier {
    /// Serve `df`, detecting the date and value columns from their names
    pub fn new(df: DataFrame) -> Self {
        Self {
            df,
            date_column: None,
            value_column: None,
        }
    }

    /// Use explicit column names instead of detection
    pub fn with_columns(mut self, date_column: &str, value_column: &str) -> Self {
        self.date_column = Some(date_column.to_string());
        self.value_column = Some(value_column.to_string());
        self
    }
}

impl SeriesSupplier for DataFrameSupplier {
    fn fetch_series(&self) -> Result<Series> {
        series_from_dataframe(
            &self.df,
            self.date_column.as_deref(),
            self.value_column.as_deref(),
        )
        .map_err(|e| match e {
            ForecastError::Supply(_) => e,
            other => ForecastError::Supply(other.to_string()),
        })
    }
}

const DATE_HINTS: [&str; 4] = ["date", "data", "time", "timestamp"];
const VALUE_HINTS: [&str; 4] = ["close", "fechamento", "price", "value"];

/// Extract a series from two DataFrame columns.
///
/// Columns not named explicitly are detected from their names. Rows whose
/// date cannot be parsed or whose value is missing or non-numeric are
/// dropped.
pub fn series_from_dataframe(
    df: &DataFrame,
    date_column: Option<&str>,
    value_column: Option<&str>,
) -> Result<Series> {
    let date_name = match date_column {
        Some(name) => name.to_string(),
        None => detect_column(df, &DATE_HINTS, None)?,
    };
    let value_name = match value_column {
        Some(name) => name.to_string(),
        None => detect_column(df, &VALUE_HINTS, Some(&date_name))?,
    };

    let dates = df.column(&date_name)?.cast(&DataType::Utf8)?;
    let values = df.column(&value_name)?.cast(&DataType::Float64)?;
    let dates = dates.utf8()?;
    let values = values.f64()?;

    let mut pairs = Vec::with_capacity(df.height());
    let mut dropped = 0usize;
    for (date, value) in dates.into_iter().zip(values.into_iter()) {
        match (date.and_then(parse_date), value.filter(|v| v.is_finite())) {
            (Some(date), Some(value)) => pairs.push((date, value)),
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!(dropped, "dropped rows with unparsable dates or values");
    }
    debug!(
        date_column = %date_name,
        value_column = %value_name,
        rows = pairs.len(),
        "extracted series from data frame"
    );

    Ok(Series::from_pairs(pairs))
}

fn detect_column(df: &DataFrame, hints: &[&str], exclude: Option<&str>) -> Result<String> {
    let names = df.get_column_names();
    for hint in hints {
        for name in &names {
            if Some(*name) == exclude {
                continue;
            }
            if name.to_lowercase().contains(hint) {
                return Ok(name.to_string());
            }
        }
    }

    Err(ForecastError::Supply(format!(
        "No column matching {:?} in {:?}",
        hints, names
    )))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    for format in ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d.%m.%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(datetime.date());
    }
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}
