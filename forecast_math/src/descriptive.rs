//! Descriptive statistics over plain slices

/// Arithmetic mean, `NaN` for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (divides by `n`), `NaN` for an empty slice
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by `n`)
pub fn population_std_dev(values: &[f64]) -> f64 {
    population_variance(values).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3.0);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_population_std_dev() {
        // Population variance of [2, 4, 4, 4, 5, 5, 7, 9] is 4
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(population_variance(&values), 4.0);
        assert_relative_eq!(population_std_dev(&values), 2.0);
        assert_relative_eq!(population_std_dev(&[3.0]), 0.0);
    }
}
