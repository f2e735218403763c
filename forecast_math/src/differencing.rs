//! Differencing operators and order heuristics

use crate::descriptive::population_variance;
use crate::polynomial::poly_mul;

/// Coefficients of `(1 - B)^d · (1 - B^s)^D`.
///
/// Seasonal differencing is ignored when `period < 2`.
pub fn differencing_polynomial(d: usize, seasonal_d: usize, period: usize) -> Vec<f64> {
    let mut poly = vec![1.0];
    for _ in 0..d {
        poly = poly_mul(&poly, &[1.0, -1.0]);
    }
    if period >= 2 {
        let mut seasonal = vec![0.0; period + 1];
        seasonal[0] = 1.0;
        seasonal[period] = -1.0;
        for _ in 0..seasonal_d {
            poly = poly_mul(&poly, &seasonal);
        }
    }
    poly
}

/// Apply a differencing polynomial: `w_t = Σ δ_k · y_{t-k}` for every `t`
/// with a full lag window. The result is `values.len() - degree` long.
pub fn apply_difference(values: &[f64], delta: &[f64]) -> Vec<f64> {
    let degree = delta.len().saturating_sub(1);
    if values.len() <= degree {
        return Vec::new();
    }
    (degree..values.len())
        .map(|t| {
            delta
                .iter()
                .enumerate()
                .map(|(k, &c)| c * values[t - k])
                .sum()
        })
        .collect()
}

/// Suggest a non-seasonal differencing order (0, 1 or 2) from the variance
/// reduction each difference achieves.
pub fn suggest_differencing(values: &[f64]) -> usize {
    if values.len() < 3 {
        return 0;
    }

    let var_0 = population_variance(values);
    let diff_1 = apply_difference(values, &[1.0, -1.0]);
    if diff_1.len() < 2 {
        return 0;
    }
    let var_1 = population_variance(&diff_1);

    if var_0 > 0.0 && var_1 / var_0 < 0.9 {
        let diff_2 = apply_difference(&diff_1, &[1.0, -1.0]);
        if diff_2.len() >= 2 && var_1 > 0.0 {
            let var_2 = population_variance(&diff_2);
            if var_2 / var_1 < 0.9 && var_2 < var_0 {
                return 2;
            }
        }
        return 1;
    }

    0
}

/// Suggest a seasonal differencing order (0 or 1) for the given period.
pub fn suggest_seasonal_differencing(values: &[f64], period: usize) -> usize {
    if period < 2 || values.len() < 2 * period {
        return 0;
    }

    let seasonal = differencing_polynomial(0, 1, period);
    let diffs = apply_difference(values, &seasonal);
    let orig_var = population_variance(values);
    let diff_var = population_variance(&diffs);

    if orig_var > 0.0 && diff_var < orig_var * 0.7 {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_differencing_polynomial() {
        assert_eq!(differencing_polynomial(0, 0, 0), vec![1.0]);
        assert_eq!(differencing_polynomial(2, 0, 0), vec![1.0, -2.0, 1.0]);
        assert_eq!(
            differencing_polynomial(1, 1, 3),
            vec![1.0, -1.0, 0.0, -1.0, 1.0]
        );
        // Seasonal order without a usable period is a no-op
        assert_eq!(differencing_polynomial(1, 1, 1), vec![1.0, -1.0]);
    }

    #[test]
    fn test_apply_difference() {
        let values = [1.0, 3.0, 6.0, 10.0];
        assert_eq!(apply_difference(&values, &[1.0, -1.0]), vec![2.0, 3.0, 4.0]);
        assert_eq!(apply_difference(&values, &[1.0, -2.0, 1.0]), vec![1.0, 1.0]);
        assert!(apply_difference(&[1.0], &[1.0, -1.0]).is_empty());
    }

    #[test]
    fn test_suggest_differencing() {
        let stationary = [1.0, 0.5, 1.2, 0.8, 1.1, 0.9, 1.0, 1.1];
        assert_eq!(suggest_differencing(&stationary), 0);

        let trend: Vec<f64> = (0..20).map(|i| 10.0 + 2.0 * i as f64).collect();
        assert_eq!(suggest_differencing(&trend), 1);
    }

    #[test]
    fn test_suggest_seasonal_differencing() {
        let seasonal: Vec<f64> = (0..40).map(|i| [10.0, 20.0, 30.0, 20.0][i % 4]).collect();
        assert_eq!(suggest_seasonal_differencing(&seasonal, 4), 1);
        assert_eq!(suggest_seasonal_differencing(&seasonal, 1), 0);
    }
}
