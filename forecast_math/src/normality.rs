//! Shapiro-Wilk normality test
//!
//! Coefficients and p-value approximation follow Royston (1995), algorithm
//! AS R94, which covers samples of 3 to 5000 observations.

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use std::f64::consts::PI;

const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.071190, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.5440, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const G: [f64; 2] = [-2.273, 0.459];

/// Result of a Shapiro-Wilk test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapiroWilk {
    /// W statistic, in `(0, 1]`; values near one indicate normality
    pub statistic: f64,
    /// Upper-tail p-value of the null hypothesis that the sample is normal
    pub p_value: f64,
}

impl ShapiroWilk {
    /// True when normality is not rejected at significance `alpha`
    pub fn is_normal(&self, alpha: f64) -> bool {
        self.p_value > alpha
    }
}

fn poly(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Run the Shapiro-Wilk test on a sample of at least three finite values.
pub fn shapiro_wilk(sample: &[f64]) -> Result<ShapiroWilk> {
    let n = sample.len();
    if n < 3 {
        return Err(MathError::InsufficientData(format!(
            "Shapiro-Wilk needs at least 3 observations, got {}",
            n
        )));
    }
    if sample.iter().any(|v| !v.is_finite()) {
        return Err(MathError::InvalidInput(
            "Sample contains non-finite values".to_string(),
        ));
    }

    let mut x = sample.to_vec();
    x.sort_by(|a, b| a.total_cmp(b));

    let mean = x.iter().sum::<f64>() / n as f64;
    let ss: f64 = x.iter().map(|v| (v - mean).powi(2)).sum();
    if ss <= f64::EPSILON * mean.abs().max(1.0) {
        return Err(MathError::CalculationError(
            "Sample has zero variance".to_string(),
        ));
    }

    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| MathError::CalculationError(e.to_string()))?;

    let a = coefficients(n, &normal);
    let b: f64 = a.iter().zip(x.iter()).map(|(ai, xi)| ai * xi).sum();
    let w = (b * b / ss).min(1.0);

    let p_value = p_value(w, n, &normal).clamp(0.0, 1.0);
    Ok(ShapiroWilk {
        statistic: w,
        p_value,
    })
}

fn coefficients(n: usize, normal: &Normal) -> Vec<f64> {
    if n == 3 {
        let half = 0.5_f64.sqrt();
        return vec![-half, 0.0, half];
    }

    let nf = n as f64;
    let m: Vec<f64> = (1..=n)
        .map(|i| normal.inverse_cdf((i as f64 - 0.375) / (nf + 0.25)))
        .collect();
    let summ2: f64 = m.iter().map(|v| v * v).sum();
    let ssumm2 = summ2.sqrt();
    let u = 1.0 / nf.sqrt();

    let mut a = vec![0.0; n];
    let an = m[n - 1] / ssumm2 + poly(&C1, u);
    a[n - 1] = an;
    a[0] = -an;

    if n > 5 {
        let an1 = m[n - 2] / ssumm2 + poly(&C2, u);
        let phi = (summ2 - 2.0 * m[n - 1].powi(2) - 2.0 * m[n - 2].powi(2))
            / (1.0 - 2.0 * an.powi(2) - 2.0 * an1.powi(2));
        a[n - 2] = an1;
        a[1] = -an1;
        for i in 2..n - 2 {
            a[i] = m[i] / phi.sqrt();
        }
    } else {
        let phi = (summ2 - 2.0 * m[n - 1].powi(2)) / (1.0 - 2.0 * an.powi(2));
        for i in 1..n - 1 {
            a[i] = m[i] / phi.sqrt();
        }
    }

    a
}

fn p_value(w: f64, n: usize, normal: &Normal) -> f64 {
    if n == 3 {
        let p = 6.0 / PI * (w.sqrt().asin() - 0.75_f64.sqrt().asin());
        return p.max(0.0);
    }

    let nf = n as f64;
    let y = (1.0 - w).ln();
    let z = if n <= 11 {
        let gamma = poly(&G, nf);
        if y >= gamma {
            return 0.0;
        }
        let w1 = -(gamma - y).ln();
        let m = poly(&C3, nf);
        let s = poly(&C4, nf).exp();
        (w1 - m) / s
    } else {
        let ln_n = nf.ln();
        let m = poly(&C5, ln_n);
        let s = poly(&C6, ln_n).exp();
        (y - m) / s
    };

    1.0 - normal.cdf(z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal_scores(n: usize) -> Vec<f64> {
        let normal = Normal::new(0.0, 1.0).unwrap();
        (1..=n)
            .map(|i| normal.inverse_cdf((i as f64 - 0.5) / n as f64))
            .collect()
    }

    #[test]
    fn test_normal_sample_not_rejected() {
        let result = shapiro_wilk(&normal_scores(30)).unwrap();
        assert!(result.statistic > 0.95 && result.statistic <= 1.0);
        assert!(result.p_value > 0.5);
        assert!(result.is_normal(0.05));
    }

    #[test]
    fn test_small_normal_sample() {
        let result = shapiro_wilk(&normal_scores(8)).unwrap();
        assert!(result.statistic > 0.9);
        assert!(result.p_value > 0.05 && result.p_value <= 1.0);
    }

    #[test]
    fn test_skewed_sample_rejected() {
        let skewed: Vec<f64> = (0..25).map(|i| (i as f64 / 2.0).exp()).collect();
        let result = shapiro_wilk(&skewed).unwrap();
        assert!(result.statistic < 0.8);
        assert!(result.p_value < 0.01);
        assert!(!result.is_normal(0.05));
    }

    #[test]
    fn test_three_points() {
        let result = shapiro_wilk(&[1.0, 2.0, 3.0]).unwrap();
        assert!((result.statistic - 1.0).abs() < 1e-9);
        assert!(result.p_value > 0.99);
    }

    #[test]
    fn test_invalid_samples() {
        assert!(matches!(
            shapiro_wilk(&[1.0, 2.0]),
            Err(MathError::InsufficientData(_))
        ));
        assert!(matches!(
            shapiro_wilk(&[4.0, 4.0, 4.0, 4.0]),
            Err(MathError::CalculationError(_))
        ));
        assert!(matches!(
            shapiro_wilk(&[1.0, f64::NAN, 2.0]),
            Err(MathError::InvalidInput(_))
        ));
    }
}
