//! Stepwise ARIMA order search minimizing AICc

use crate::config::SelectorConfig;
use crate::error::{ForecastError, Result};
use crate::models::arima::{ArimaModel, ArimaOrder, SeasonalOrder};
use crate::models::ForecastModel;
use forecast_math::{suggest_differencing, suggest_seasonal_differencing};
use serde::Serialize;
use std::collections::HashSet;
use std::ops::RangeInclusive;
use tracing::{debug, info};

/// Criterion value of one fitted candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidateScore {
    /// Non-seasonal order
    pub order: ArimaOrder,
    /// Seasonal order
    pub seasonal: SeasonalOrder,
    /// Corrected Akaike information criterion
    pub aicc: f64,
}

/// Outcome of a search: the winning model and every successful candidate
#[derive(Debug, Clone)]
pub struct Selection {
    /// Fitted model with the lowest AICc
    pub model: ArimaModel,
    /// Successful candidates, ascending by AICc
    pub candidates: Vec<CandidateScore>,
}

/// `(p, q, P, Q)`; differencing orders are fixed before the search
type Key = (usize, usize, usize, usize);

/// Automated order selection for [`ArimaModel`]
#[derive(Debug, Clone, Default)]
pub struct ModelSelector {
    config: SelectorConfig,
}

struct Bounds {
    p: RangeInclusive<usize>,
    q: RangeInclusive<usize>,
    seasonal_p: RangeInclusive<usize>,
    seasonal_q: RangeInclusive<usize>,
}

impl Bounds {
    fn contains(&self, key: &Key) -> bool {
        self.p.contains(&key.0)
            && self.q.contains(&key.1)
            && self.seasonal_p.contains(&key.2)
            && self.seasonal_q.contains(&key.3)
    }
}

impl ModelSelector {
    /// Create a selector with the given search parameters
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    /// Search parameters
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Select and fit the best model for `values`.
    ///
    /// Candidates whose fit fails are skipped. Fails with
    /// [`ForecastError::Selection`] when no candidate could be fitted.
    pub fn select_order(
        &self,
        values: &[f64],
        p_range: RangeInclusive<usize>,
        q_range: RangeInclusive<usize>,
        seasonal: bool,
    ) -> Result<ArimaModel> {
        Ok(self
            .select_with_trace(values, p_range, q_range, seasonal)?
            .model)
    }

    /// Like [`ModelSelector::select_order`], also returning every candidate score
    pub fn select_with_trace(
        &self,
        values: &[f64],
        p_range: RangeInclusive<usize>,
        q_range: RangeInclusive<usize>,
        seasonal: bool,
    ) -> Result<Selection> {
        if p_range.is_empty() || q_range.is_empty() {
            return Err(ForecastError::InvalidParameter(format!(
                "Empty order range: p {:?}, q {:?}",
                p_range, q_range
            )));
        }
        if values.is_empty() || values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::InvalidParameter(
                "Selection needs a non-empty series of finite values".to_string(),
            ));
        }
        self.config.validate()?;

        let d = suggest_differencing(values).min(self.config.max_d);
        let (period, seasonal_d, bounds) = if seasonal {
            let period = self.config.seasonal_period;
            let seasonal_d =
                suggest_seasonal_differencing(values, period).min(self.config.max_seasonal_d);
            let bounds = Bounds {
                p: p_range,
                q: q_range,
                seasonal_p: 0..=self.config.max_seasonal_p,
                seasonal_q: 0..=self.config.max_seasonal_q,
            };
            (period, seasonal_d, bounds)
        } else {
            let bounds = Bounds {
                p: p_range,
                q: q_range,
                seasonal_p: 0..=0,
                seasonal_q: 0..=0,
            };
            (0, 0, bounds)
        };
        debug!(d, seasonal_d, period, "differencing orders chosen");

        let fit = |key: Key| -> Option<(ArimaModel, f64)> {
            let seasonal_order = SeasonalOrder::new(key.2, seasonal_d, key.3, period);
            let mut model =
                ArimaModel::new(ArimaOrder::new(key.0, d, key.1)).with_seasonal(seasonal_order);
            match model.fit_reporting_convergence(values, self.config.max_iterations) {
                Ok(true) => {
                    let aicc = model.aicc().filter(|a| a.is_finite())?;
                    debug!(candidate = ?key, aicc, "candidate fitted");
                    Some((model, aicc))
                }
                Ok(false) => {
                    debug!(candidate = ?key, "candidate skipped: optimizer did not converge");
                    None
                }
                Err(e) => {
                    debug!(candidate = ?key, error = %e, "candidate skipped");
                    None
                }
            }
        };

        let mut visited: HashSet<Key> = HashSet::new();
        let mut candidates = Vec::new();
        let mut best: Option<(ArimaModel, f64)> = None;
        let mut fits = 0;

        let mut frontier = self.initial_candidates(&bounds, seasonal);
        loop {
            let mut improved = false;
            for key in frontier {
                if fits >= self.config.max_fits || !visited.insert(key) {
                    continue;
                }
                fits += 1;
                if let Some((model, aicc)) = fit(key) {
                    candidates.push(CandidateScore {
                        order: model.order(),
                        seasonal: model.seasonal_order(),
                        aicc,
                    });
                    if best.as_ref().map_or(true, |(_, b)| aicc < *b) {
                        best = Some((model, aicc));
                        improved = true;
                    }
                }
            }

            let center = match (&best, improved) {
                (Some((model, _)), true) if fits < self.config.max_fits => {
                    let o = model.order();
                    let s = model.seasonal_order();
                    (o.p, o.q, s.p, s.q)
                }
                _ => break,
            };
            frontier = neighbors(center, seasonal)
                .into_iter()
                .filter(|k| bounds.contains(k))
                .collect();
        }

        let (model, aicc) = best.ok_or_else(|| {
            ForecastError::Selection(format!(
                "None of {} candidate orders converged",
                fits
            ))
        })?;

        candidates.sort_by(|a, b| a.aicc.total_cmp(&b.aicc));
        info!(
            model = %model.name(),
            aicc,
            fits,
            "selected model"
        );

        Ok(Selection { model, candidates })
    }

    fn initial_candidates(&self, bounds: &Bounds, seasonal: bool) -> Vec<Key> {
        let start_p = clamp_to(self.config.start_p, &bounds.p);
        let start_q = clamp_to(self.config.start_q, &bounds.q);
        let s1 = usize::from(seasonal);

        let mut keys = vec![
            (start_p, start_q, s1, s1),
            (0, 0, 0, 0),
            (1, 0, s1, 0),
            (0, 1, 0, s1),
        ];
        let mut seen = HashSet::new();
        keys.retain(|k| bounds.contains(k) && seen.insert(*k));
        if keys.is_empty() {
            keys.push((*bounds.p.start(), *bounds.q.start(), 0, 0));
        }
        keys
    }
}

fn clamp_to(value: usize, range: &RangeInclusive<usize>) -> usize {
    value.clamp(*range.start(), *range.end())
}

/// Orders one step away from `center`
fn neighbors(center: Key, seasonal: bool) -> Vec<Key> {
    let (p, q, sp, sq) = center;
    let mut keys = Vec::new();
    let mut push = |p: Option<usize>, q: Option<usize>, sp: Option<usize>, sq: Option<usize>| {
        if let (Some(p), Some(q), Some(sp), Some(sq)) = (p, q, sp, sq) {
            keys.push((p, q, sp, sq));
        }
    };

    push(p.checked_sub(1), Some(q), Some(sp), Some(sq));
    push(Some(p + 1), Some(q), Some(sp), Some(sq));
    push(Some(p), q.checked_sub(1), Some(sp), Some(sq));
    push(Some(p), Some(q + 1), Some(sp), Some(sq));
    push(p.checked_sub(1), q.checked_sub(1), Some(sp), Some(sq));
    push(Some(p + 1), Some(q + 1), Some(sp), Some(sq));

    if seasonal {
        push(Some(p), Some(q), sp.checked_sub(1), Some(sq));
        push(Some(p), Some(q), Some(sp + 1), Some(sq));
        push(Some(p), Some(q), Some(sp), sq.checked_sub(1));
        push(Some(p), Some(q), Some(sp), Some(sq + 1));
    }

    keys
}
