//! Lag polynomial algebra
//!
//! A lag polynomial `1 + c1·B + c2·B² + ...` is stored as its coefficient
//! vector `[1.0, c1, c2, ...]`, index = lag.

/// Build `1 + sign·(a1·B^s + a2·B^2s + ...)` from raw coefficients.
///
/// Autoregressive operators use `sign = -1.0` (`1 - φ1·B - ...`), moving
/// average operators `sign = 1.0`. A `spacing` of zero is treated as one.
pub fn lag_polynomial(coefficients: &[f64], spacing: usize, sign: f64) -> Vec<f64> {
    let spacing = spacing.max(1);
    let mut poly = vec![0.0; coefficients.len() * spacing + 1];
    poly[0] = 1.0;
    for (i, &c) in coefficients.iter().enumerate() {
        poly[(i + 1) * spacing] = sign * c;
    }
    poly
}

/// Product of two polynomials
pub fn poly_mul(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let mut product = vec![0.0; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        if x == 0.0 {
            continue;
        }
        for (j, &y) in b.iter().enumerate() {
            product[i + j] += x * y;
        }
    }
    product
}

/// Whether every root of the lag polynomial lies strictly outside the unit circle.
///
/// Uses the step-down (reverse Durbin-Levinson) recursion: the operator is
/// stable iff every implied partial autocorrelation has modulus below one.
/// For an autoregressive operator this is stationarity, for a moving average
/// operator invertibility.
pub fn is_stable(poly: &[f64]) -> bool {
    if poly.iter().any(|c| !c.is_finite()) {
        return false;
    }
    if poly.len() <= 1 {
        return true;
    }

    // x_t = Σ a_i x_{t-i}  <=>  poly = [1, -a_1, ..., -a_k]
    let mut a: Vec<f64> = poly[1..].iter().map(|c| -c).collect();

    while let Some(&r) = a.last() {
        if r.abs() >= 1.0 {
            return false;
        }
        let k = a.len();
        let denom = 1.0 - r * r;
        let reduced: Vec<f64> = (0..k - 1)
            .map(|j| (a[j] + r * a[k - 2 - j]) / denom)
            .collect();
        a = reduced;
    }

    true
}

/// First `n` weights of the infinite moving-average representation
/// `ψ(B) = ma(B) / ar(B)`, starting with `ψ0 = 1`.
pub fn psi_weights(ar: &[f64], ma: &[f64], n: usize) -> Vec<f64> {
    let mut psi = Vec::with_capacity(n);
    for j in 0..n {
        if j == 0 {
            psi.push(1.0);
            continue;
        }
        let mut value = ma.get(j).copied().unwrap_or(0.0);
        for i in 1..=j.min(ar.len().saturating_sub(1)) {
            value -= ar[i] * psi[j - i];
        }
        psi.push(value);
    }
    psi
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lag_polynomial_seasonal_spacing() {
        assert_eq!(lag_polynomial(&[0.5], 1, -1.0), vec![1.0, -0.5]);
        assert_eq!(
            lag_polynomial(&[0.3, 0.2], 3, 1.0),
            vec![1.0, 0.0, 0.0, 0.3, 0.0, 0.0, 0.2]
        );
        assert_eq!(lag_polynomial(&[], 5, -1.0), vec![1.0]);
    }

    #[test]
    fn test_poly_mul() {
        // (1 - B)(1 - B) = 1 - 2B + B²
        assert_eq!(poly_mul(&[1.0, -1.0], &[1.0, -1.0]), vec![1.0, -2.0, 1.0]);
        assert!(poly_mul(&[], &[1.0]).is_empty());
    }

    #[test]
    fn test_stability() {
        assert!(is_stable(&[1.0]));
        assert!(is_stable(&[1.0, -0.5]));
        assert!(!is_stable(&[1.0, -1.0]));
        assert!(!is_stable(&[1.0, -1.2]));
        // φ = (1.5, -0.75) is stationary
        assert!(is_stable(&[1.0, -1.5, 0.75]));
        // φ = (0.5, 0.6) sums above one
        assert!(!is_stable(&[1.0, -0.5, -0.6]));
        assert!(!is_stable(&[1.0, f64::NAN]));
    }

    #[test]
    fn test_psi_weights_ar1() {
        let psi = psi_weights(&[1.0, -0.5], &[1.0], 4);
        assert_relative_eq!(psi[0], 1.0);
        assert_relative_eq!(psi[1], 0.5);
        assert_relative_eq!(psi[2], 0.25);
        assert_relative_eq!(psi[3], 0.125);
    }

    #[test]
    fn test_psi_weights_random_walk_with_ma() {
        // (1 - B) y = (1 + 0.4B) e  =>  ψ = 1, 1.4, 1.4, ...
        let psi = psi_weights(&[1.0, -1.0], &[1.0, 0.4], 4);
        assert_relative_eq!(psi[1], 1.4);
        assert_relative_eq!(psi[3], 1.4);
    }
}
