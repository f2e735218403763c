#![allow(dead_code)]

use chrono::NaiveDate;
use index_forecast::calendar::business_days_after;
use index_forecast::{ArimaModel, ArimaOrder, Series};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Business days starting at Monday 2024-01-01
pub fn business_dates(n: usize) -> Vec<NaiveDate> {
    let mut dates = vec![date(2024, 1, 1)];
    dates.extend(business_days_after(date(2024, 1, 1), n.saturating_sub(1)));
    dates.truncate(n);
    dates
}

/// Linear trend plus seeded Gaussian noise
pub fn noisy_trend(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 0.5).unwrap();
    (0..n)
        .map(|i| 100.0 + i as f64 + noise.sample(&mut rng))
        .collect()
}

/// Seeded standard normal draws
pub fn gaussian(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1.0).unwrap();
    (0..n).map(|_| noise.sample(&mut rng)).collect()
}

/// AR(1) process driven by seeded Gaussian noise
pub fn ar1(phi: f64, n: usize, seed: u64) -> Vec<f64> {
    let shocks = gaussian(n, seed);
    let mut values = Vec::with_capacity(n);
    let mut last = 0.0;
    for shock in shocks {
        last = phi * last + shock;
        values.push(50.0 + last);
    }
    values
}

pub fn business_series(values: &[f64]) -> Series {
    Series::from_pairs(business_dates(values.len()).into_iter().zip(values.iter().copied()))
}

/// ARIMA(1,1,0) fitted on `values`
pub fn fitted_model(values: &[f64]) -> ArimaModel {
    let mut model = ArimaModel::new(ArimaOrder::new(1, 1, 0));
    model.fit(values).unwrap();
    model
}
