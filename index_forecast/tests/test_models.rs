mod common;

use approx::assert_relative_eq;
use common::{ar1, fitted_model, noisy_trend};
use index_forecast::models::arima::ARTIFACT_VERSION;
use index_forecast::{ArimaModel, ArimaOrder, ForecastError, ForecastModel, SeasonalOrder};
use serde_json::Value;

fn artifact_json(model: &ArimaModel) -> Value {
    serde_json::from_slice(&model.to_bytes().unwrap()).unwrap()
}

fn load_json(value: &Value) -> index_forecast::Result<ArimaModel> {
    ArimaModel::load(&serde_json::to_vec(value).unwrap())
}

#[test]
fn test_predict_shapes_and_bounds() {
    let model = fitted_model(&noisy_trend(60, 7));
    let forecast = model.predict(12, 0.95).unwrap();

    assert_eq!(forecast.point.len(), 12);
    assert_eq!(forecast.lower.len(), 12);
    assert_eq!(forecast.upper.len(), 12);
    for i in 0..12 {
        assert!(forecast.lower[i] < forecast.point[i]);
        assert!(forecast.point[i] < forecast.upper[i]);
    }
    // Trend continues upwards from around 160
    assert!(forecast.point[0] > 150.0 && forecast.point[0] < 170.0);
    assert!(forecast.point[11] > forecast.point[0]);
}

#[test]
fn test_predict_is_deterministic() {
    let model = fitted_model(&noisy_trend(50, 3));
    assert_eq!(model.predict(5, 0.9).unwrap(), model.predict(5, 0.9).unwrap());
}

#[test]
fn test_wider_confidence_gives_wider_interval() {
    let model = fitted_model(&noisy_trend(50, 3));
    let narrow = model.predict(3, 0.8).unwrap();
    let wide = model.predict(3, 0.99).unwrap();
    for i in 0..3 {
        assert_relative_eq!(narrow.point[i], wide.point[i]);
        assert!(wide.upper[i] - wide.lower[i] > narrow.upper[i] - narrow.lower[i]);
    }
}

#[test]
fn test_prediction_errors() {
    let unfitted = ArimaModel::new(ArimaOrder::new(1, 0, 0));
    assert!(matches!(
        unfitted.predict(5, 0.95),
        Err(ForecastError::Prediction(_))
    ));

    let model = fitted_model(&noisy_trend(40, 1));
    for confidence in [0.0, 1.0, -0.5, f64::NAN] {
        assert!(matches!(
            model.predict(5, confidence),
            Err(ForecastError::Prediction(_))
        ));
    }
    assert!(matches!(
        model.predict(0, 0.95),
        Err(ForecastError::Prediction(_))
    ));
}

#[test]
fn test_artifact_roundtrip_preserves_forecasts() {
    let model = fitted_model(&noisy_trend(45, 11));
    let loaded = ArimaModel::load(&model.to_bytes().unwrap()).unwrap();

    assert_eq!(loaded, model);
    assert_eq!(
        loaded.predict(10, 0.95).unwrap(),
        model.predict(10, 0.95).unwrap()
    );
    assert_eq!(loaded.residuals().unwrap(), model.residuals().unwrap());
}

#[test]
fn test_load_rejects_corrupt_artifacts() {
    assert!(matches!(
        ArimaModel::load(b"not json"),
        Err(ForecastError::ModelLoad(_))
    ));

    let model = fitted_model(&noisy_trend(45, 11));

    let mut wrong_version = artifact_json(&model);
    wrong_version["version"] = Value::from(ARTIFACT_VERSION + 1);
    assert!(matches!(
        load_json(&wrong_version),
        Err(ForecastError::ModelLoad(_))
    ));

    let mut extra_coefficient = artifact_json(&model);
    extra_coefficient["fitted"]["coefficients"]["ar"]
        .as_array_mut()
        .unwrap()
        .push(Value::from(0.1));
    assert!(matches!(
        load_json(&extra_coefficient),
        Err(ForecastError::ModelLoad(_))
    ));

    let mut no_state = artifact_json(&model);
    no_state.as_object_mut().unwrap().remove("fitted");
    assert!(matches!(
        load_json(&no_state),
        Err(ForecastError::ModelLoad(_))
    ));

    let unfitted = ArimaModel::new(ArimaOrder::new(1, 1, 0));
    assert!(matches!(
        ArimaModel::load(&unfitted.to_bytes().unwrap()),
        Err(ForecastError::ModelLoad(_))
    ));
}

#[test]
fn test_load_rejects_mean_term_mismatch() {
    let mut model = ArimaModel::new(ArimaOrder::new(1, 2, 0));
    model.fit(&noisy_trend(60, 5)).unwrap();
    assert!(ArimaModel::load(&model.to_bytes().unwrap()).is_ok());

    let mut json = artifact_json(&model);
    json["include_intercept"] = Value::from(true);
    assert!(matches!(
        load_json(&json),
        Err(ForecastError::ModelLoad(_))
    ));

    let mut json = artifact_json(&fitted_model(&noisy_trend(45, 11)));
    json["include_intercept"] = Value::from(false);
    json["fitted"]["coefficients"]["intercept"] = Value::from(0.0);
    assert!(matches!(
        load_json(&json),
        Err(ForecastError::ModelLoad(_))
    ));
}

#[test]
fn test_artifact_without_residuals() {
    let model = fitted_model(&noisy_trend(45, 11));
    let mut json = artifact_json(&model);
    json["fitted"]
        .as_object_mut()
        .unwrap()
        .remove("residuals");

    let loaded = load_json(&json).unwrap();
    assert!(matches!(
        loaded.residuals(),
        Err(ForecastError::ResidualsUnavailable(_))
    ));
    assert!(loaded.predict(5, 0.95).is_ok());
}

#[test]
fn test_copy_then_update_leaves_original_untouched() {
    let values = noisy_trend(40, 5);
    let original = fitted_model(&values[..25]);
    let before = original.predict(8, 0.95).unwrap();

    let mut copy = original.copy();
    copy.update(&values[25..], 50).unwrap();

    assert_eq!(original.predict(8, 0.95).unwrap(), before);
    assert_eq!(original.history_len(), 25);
    assert_ne!(copy.predict(8, 0.95).unwrap(), before);
}

#[test]
fn test_update_appends_and_refits() {
    let values = ar1(0.6, 120, 9);
    let mut model = ArimaModel::new(ArimaOrder::new(1, 0, 0));
    model.fit(&values[..60]).unwrap();

    model.update(&values[60..], 50).unwrap();
    assert_eq!(model.history_len(), 120);
    assert_eq!(model.order(), ArimaOrder::new(1, 0, 0));
    assert_eq!(model.coefficients().unwrap().ar.len(), 1);
    assert!(model.residuals().unwrap().len() >= 118);
}

#[test]
fn test_update_with_tiny_budget_is_accepted() {
    let values = ar1(0.6, 80, 2);
    let mut model = ArimaModel::new(ArimaOrder::new(1, 0, 1));
    model.fit(&values[..50]).unwrap();

    model.update(&values[50..], 1).unwrap();
    assert_eq!(model.history_len(), 80);
}

#[test]
fn test_failed_update_leaves_model_unchanged() {
    let mut model = fitted_model(&noisy_trend(40, 4));
    let before = model.clone();

    assert!(matches!(model.update(&[], 50), Err(ForecastError::Update(_))));
    assert!(matches!(
        model.update(&[1.0, f64::NAN], 50),
        Err(ForecastError::Update(_))
    ));
    assert_eq!(model, before);

    let mut unfitted = ArimaModel::new(ArimaOrder::new(1, 1, 0));
    assert!(matches!(
        unfitted.update(&[1.0, 2.0, 3.0], 50),
        Err(ForecastError::Update(_))
    ));
}

#[test]
fn test_fit_rejects_invalid_values() {
    let mut model = ArimaModel::new(ArimaOrder::new(1, 0, 0));
    assert!(matches!(
        model.fit(&[]),
        Err(ForecastError::InvalidParameter(_))
    ));
    assert!(matches!(
        model.fit(&[1.0, f64::INFINITY, 2.0]),
        Err(ForecastError::InvalidParameter(_))
    ));
}

#[test]
fn test_seasonal_model_fit_and_forecast() {
    let pattern = [0.0, 2.0, 4.0, 2.0, 0.0];
    let noise = common::gaussian(100, 21);
    let values: Vec<f64> = (0..100)
        .map(|i| 20.0 + pattern[i % 5] + 0.2 * noise[i])
        .collect();

    let mut model = ArimaModel::new(ArimaOrder::new(0, 0, 0))
        .with_seasonal(SeasonalOrder::new(1, 0, 0, 5));
    model.fit(&values).unwrap();
    assert_eq!(model.name(), "ARIMA(0,0,0)(1,0,0)[5]");

    let forecast = model.predict(5, 0.95).unwrap();
    // The forecast follows the weekly shape
    assert!(forecast.point[2] > forecast.point[0]);
    assert!(forecast.point[2] > forecast.point[4]);

    let loaded = ArimaModel::load(&model.to_bytes().unwrap()).unwrap();
    assert_eq!(loaded.seasonal_order(), SeasonalOrder::new(1, 0, 0, 5));
}
