//! Derivative-free minimization used for parameter estimation

/// Result of a Nelder-Mead run
#[derive(Debug, Clone)]
pub struct NelderMeadResult {
    /// Best point found
    pub optimal_point: Vec<f64>,
    /// Objective value at the best point
    pub optimal_value: f64,
    /// Iterations performed
    pub iterations: usize,
    /// Whether the simplex met the tolerance before `max_iter`
    pub converged: bool,
}

/// Nelder-Mead configuration
#[derive(Debug, Clone)]
pub struct NelderMeadConfig {
    /// Maximum number of iterations
    pub max_iter: usize,
    /// Relative tolerance on the spread of objective values
    pub tolerance: f64,
    /// Reflection coefficient
    pub alpha: f64,
    /// Expansion coefficient
    pub gamma: f64,
    /// Contraction coefficient
    pub rho: f64,
    /// Shrink coefficient
    pub sigma: f64,
    /// Initial simplex step, relative to the starting coordinate
    pub initial_step: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-8,
            alpha: 1.0,
            gamma: 2.0,
            rho: 0.5,
            sigma: 0.5,
            initial_step: 0.05,
        }
    }
}

impl NelderMeadConfig {
    /// Same configuration with a different iteration budget
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }
}

/// Minimize `objective` starting from `initial`.
///
/// Convergence is declared when the spread of objective values across the
/// simplex falls below `tolerance · (1 + |best|)`, or when the simplex
/// collapses to a point.
pub fn nelder_mead<F>(objective: F, initial: &[f64], config: &NelderMeadConfig) -> NelderMeadResult
where
    F: Fn(&[f64]) -> f64,
{
    let n = initial.len();
    if n == 0 {
        return NelderMeadResult {
            optimal_point: Vec::new(),
            optimal_value: objective(initial),
            iterations: 0,
            converged: true,
        };
    }

    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
    simplex.push(initial.to_vec());
    for i in 0..n {
        let mut vertex = initial.to_vec();
        let step = if initial[i].abs() > 1e-10 {
            config.initial_step * initial[i].abs()
        } else {
            config.initial_step
        };
        vertex[i] += step;
        simplex.push(vertex);
    }
    let mut values: Vec<f64> = simplex.iter().map(|v| objective(v)).collect();

    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iter {
        let mut order: Vec<usize> = (0..=n).collect();
        order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
        let best = order[0];
        let worst = order[n];
        let second_worst = order[n - 1];

        let spread = values[worst] - values[best];
        if spread <= config.tolerance * (1.0 + values[best].abs()) {
            converged = true;
            break;
        }

        let centroid = centroid(&simplex, worst);
        let diameter = simplex
            .iter()
            .map(|v| distance(v, &centroid))
            .fold(0.0, f64::max);
        if diameter < config.tolerance {
            converged = true;
            break;
        }

        iterations += 1;

        let reflected = towards(&centroid, &simplex[worst], -config.alpha);
        let reflected_value = objective(&reflected);

        if reflected_value < values[best] {
            let expanded = towards(&centroid, &reflected, config.gamma);
            let expanded_value = objective(&expanded);
            if expanded_value < reflected_value {
                simplex[worst] = expanded;
                values[worst] = expanded_value;
            } else {
                simplex[worst] = reflected;
                values[worst] = reflected_value;
            }
            continue;
        }

        if reflected_value < values[second_worst] {
            simplex[worst] = reflected;
            values[worst] = reflected_value;
            continue;
        }

        let (contracted, contracted_value) = if reflected_value < values[worst] {
            let outside = towards(&centroid, &reflected, config.rho);
            let value = objective(&outside);
            (outside, value)
        } else {
            let inside = towards(&centroid, &simplex[worst], config.rho);
            let value = objective(&inside);
            (inside, value)
        };

        if contracted_value < values[worst].min(reflected_value) {
            simplex[worst] = contracted;
            values[worst] = contracted_value;
            continue;
        }

        let anchor = simplex[best].clone();
        for i in 0..=n {
            if i == best {
                continue;
            }
            simplex[i] = towards(&anchor, &simplex[i], config.sigma);
            values[i] = objective(&simplex[i]);
        }
    }

    let best = (0..=n)
        .min_by(|&a, &b| values[a].total_cmp(&values[b]))
        .unwrap_or(0);

    NelderMeadResult {
        optimal_point: simplex[best].clone(),
        optimal_value: values[best],
        iterations,
        converged,
    }
}

/// Centroid of every vertex except `exclude`
fn centroid(simplex: &[Vec<f64>], exclude: usize) -> Vec<f64> {
    let dim = simplex[0].len();
    let count = (simplex.len() - 1) as f64;
    let mut c = vec![0.0; dim];
    for (i, vertex) in simplex.iter().enumerate() {
        if i == exclude {
            continue;
        }
        for (cj, vj) in c.iter_mut().zip(vertex) {
            *cj += vj;
        }
    }
    c.iter_mut().for_each(|v| *v /= count);
    c
}

/// `origin + factor · (point - origin)`
fn towards(origin: &[f64], point: &[f64], factor: f64) -> Vec<f64> {
    origin
        .iter()
        .zip(point)
        .map(|(o, p)| o + factor * (p - o))
        .collect()
}

fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}
