//! Training path: fetch, normalize, select and persist a model

use crate::error::{ForecastError, Result};
use crate::models::arima::ArimaModel;
use crate::models::ForecastModel;
use crate::normalize::SeriesNormalizer;
use crate::selector::ModelSelector;
use crate::sources::{ModelStore, SeriesSupplier};
use std::ops::RangeInclusive;
use tracing::{info, warn};

/// Default AR search range of the training job
pub const DEFAULT_P_RANGE: RangeInclusive<usize> = 0..=5;

/// Default MA search range of the training job
pub const DEFAULT_Q_RANGE: RangeInclusive<usize> = 0..=5;

/// Select a model for the supplied series and save it to `store`.
///
/// Normalization failures fall back to the raw series, as in a forecasting
/// run.
pub fn train_model<S, M>(
    supplier: &S,
    store: &M,
    selector: &ModelSelector,
    p_range: RangeInclusive<usize>,
    q_range: RangeInclusive<usize>,
    seasonal: bool,
) -> Result<ArimaModel>
where
    S: SeriesSupplier + ?Sized,
    M: ModelStore + ?Sized,
{
    let series = supplier.fetch_series()?;
    if series.is_empty() {
        return Err(ForecastError::EmptySeries);
    }

    let values = match SeriesNormalizer::new().normalize(&series) {
        Ok(normalized) => normalized.values(),
        Err(e) => {
            warn!(error = %e, "normalization failed; training on the raw series");
            series.values()
        }
    };
    info!(observations = values.len(), seasonal, "selecting model order");

    let model = selector.select_order(&values, p_range, q_range, seasonal)?;
    store.save_model_bytes(&model.to_bytes()?)?;

    info!(
        model = %model.name(),
        aicc = ?model.aicc(),
        "trained model saved"
    );
    Ok(model)
}
