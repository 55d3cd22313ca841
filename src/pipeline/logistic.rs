//! L2-regularised binary logistic regression over sparse features.
//!
//! Minimises `0.5 * ||w||^2 + C * sum_i log(1 + exp(-y_i * (w . x_i + b)))`
//! with Nesterov-accelerated full-batch gradient descent. The intercept is
//! not regularised. Per-sample work runs on the rayon pool; reductions are
//! sequential so repeated fits give identical weights.

use super::data::Label;
use super::tfidf::SparseVector;
use crate::error::{Error, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Optimizer settings.
#[derive(Debug, Clone, Copy)]
pub struct LogisticParams {
    /// Inverse regularization strength
    pub c: f64,
    pub max_iter: usize,
    /// Stop once the largest gradient component falls below
    /// `tolerance` times its value at the start
    pub tolerance: f64,
}

impl Default for LogisticParams {
    fn default() -> Self {
        LogisticParams {
            c: 1.0,
            max_iter: 1000,
            tolerance: 1e-4,
        }
    }
}

/// Outcome of a fit.
#[derive(Debug, Clone, Copy)]
pub struct FitSummary {
    pub iterations: usize,
    pub converged: bool,
    /// Objective value at the returned weights
    pub objective: f64,
}

/// Fitted linear classifier. `weights[i]` pairs with vocabulary term `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// `log(1 + exp(-m))` without overflow.
fn log_loss(margin: f64) -> f64 {
    if margin > 0.0 {
        (-margin).exp().ln_1p()
    } else {
        -margin + margin.exp().ln_1p()
    }
}

fn dot(weights: &[f64], intercept: f64, x: &SparseVector) -> f64 {
    x.iter()
        .map(|&(i, v)| weights.get(i).map_or(0.0, |w| w * v))
        .sum::<f64>()
        + intercept
}

impl LogisticRegression {
    /// Fit on sparse rows with `n_features` columns.
    pub fn fit(
        features: &[SparseVector],
        labels: &[Label],
        n_features: usize,
        params: &LogisticParams,
    ) -> Result<(Self, FitSummary)> {
        if features.is_empty() {
            return Err(Error::EmptyDataset);
        }
        if features.len() != labels.len() {
            return Err(Error::IncompatibleModel(format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }
        if let Some(&only) = labels.first() {
            if labels.iter().all(|&l| l == only) {
                return Err(Error::SingleClass(only));
            }
        }

        let targets: Vec<f64> = labels.iter().map(|&l| f64::from(l.as_u8())).collect();
        let c = params.c;

        // Lipschitz bound of the gradient; rows are L2-normalised plus the
        // constant intercept column.
        let row_sq: f64 = features
            .iter()
            .map(|x| x.iter().map(|(_, v)| v * v).sum::<f64>() + 1.0)
            .sum();
        let step = 1.0 / (1.0 + 0.25 * c * row_sq);

        let gradient = |w: &[f64], b: f64| -> (Vec<f64>, f64) {
            let residuals: Vec<f64> = features
                .par_iter()
                .zip(targets.par_iter())
                .map(|(x, &y)| sigmoid(dot(w, b, x)) - y)
                .collect();
            let mut gw = w.to_vec();
            let mut gb = 0.0;
            for (x, r) in features.iter().zip(&residuals) {
                let r = c * r;
                for &(i, v) in x {
                    if let Some(g) = gw.get_mut(i) {
                        *g += r * v;
                    }
                }
                gb += r;
            }
            (gw, gb)
        };

        let objective = |w: &[f64], b: f64| -> f64 {
            let losses: Vec<f64> = features
                .par_iter()
                .zip(targets.par_iter())
                .map(|(x, &y)| {
                    let sign = 2.0 * y - 1.0;
                    log_loss(sign * dot(w, b, x))
                })
                .collect();
            0.5 * w.iter().map(|v| v * v).sum::<f64>() + c * losses.iter().sum::<f64>()
        };

        let max_abs = |g: &[f64], gb: f64| g.iter().fold(gb.abs(), |m, v| m.max(v.abs()));

        let mut w = vec![0.0; n_features];
        let mut b = 0.0;
        let mut w_prev = w.clone();
        let mut b_prev = b;
        let mut t = 1.0_f64;

        let (g0, gb0) = gradient(&w, b);
        let threshold = params.tolerance * max_abs(&g0, gb0).max(1.0);

        let mut iterations = 0;
        let mut converged = false;
        while iterations < params.max_iter {
            iterations += 1;

            let t_next = (1.0 + (1.0 + 4.0 * t * t).sqrt()) / 2.0;
            let momentum = (t - 1.0) / t_next;
            let y_w: Vec<f64> = w
                .iter()
                .zip(&w_prev)
                .map(|(cur, prev)| cur + momentum * (cur - prev))
                .collect();
            let y_b = b + momentum * (b - b_prev);

            let (gw, gb) = gradient(&y_w, y_b);
            if max_abs(&gw, gb) <= threshold {
                w = y_w;
                b = y_b;
                converged = true;
                break;
            }

            w_prev = std::mem::replace(
                &mut w,
                y_w.iter().zip(&gw).map(|(v, g)| v - step * g).collect(),
            );
            b_prev = b;
            b = y_b - step * gb;
            t = t_next;

            if iterations % 100 == 0 {
                debug!(iteration = iterations, objective = objective(&w, b), "optimizer progress");
            }
        }

        let summary = FitSummary {
            iterations,
            converged,
            objective: objective(&w, b),
        };
        if converged {
            info!(iterations, objective = summary.objective, "logistic regression converged");
        } else {
            warn!(
                iterations,
                objective = summary.objective,
                "logistic regression reached max_iter before converging"
            );
        }

        Ok((
            LogisticRegression {
                weights: w,
                intercept: b,
            },
            summary,
        ))
    }

    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    /// Decision function `w . x + b`.
    pub fn decision(&self, x: &SparseVector) -> f64 {
        dot(&self.weights, self.intercept, x)
    }

    /// Class probabilities `[p(fake), p(real)]`.
    pub fn predict_proba(&self, x: &SparseVector) -> [f64; 2] {
        let p_real = sigmoid(self.decision(x));
        [1.0 - p_real, p_real]
    }

    /// Most probable class; an exact tie goes to [`Label::Fake`].
    pub fn predict(&self, x: &SparseVector) -> Label {
        let [p_fake, p_real] = self.predict_proba(x);
        if p_real > p_fake {
            Label::Real
        } else {
            Label::Fake
        }
    }

    /// Check that weights are usable with a vocabulary of `n_features` terms.
    pub fn validate(&self, n_features: usize) -> Result<()> {
        if self.weights.len() != n_features {
            return Err(Error::IncompatibleModel(format!(
                "classifier has {} weights but vocabulary has {} terms",
                self.weights.len(),
                n_features
            )));
        }
        if !self.intercept.is_finite() || self.weights.iter().any(|w| !w.is_finite()) {
            return Err(Error::IncompatibleModel(
                "classifier weights contain non-finite values".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> (Vec<SparseVector>, Vec<Label>) {
        let features = vec![
            vec![(0, 1.0)],
            vec![(0, 0.8), (2, 0.6)],
            vec![(1, 1.0)],
            vec![(1, 0.6), (2, 0.8)],
        ];
        let labels = vec![Label::Fake, Label::Fake, Label::Real, Label::Real];
        (features, labels)
    }

    #[test]
    fn test_sigmoid_is_stable() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(1000.0) <= 1.0);
        assert!(sigmoid(-1000.0) >= 0.0);
        assert!(log_loss(-1000.0).is_finite());
        assert!(log_loss(1000.0) >= 0.0);
    }

    #[test]
    fn test_fit_separates_toy_data() {
        let (features, labels) = toy();
        let (model, summary) =
            LogisticRegression::fit(&features, &labels, 3, &LogisticParams::default()).unwrap();
        assert!(summary.iterations >= 1);
        assert!(model.weights[0] < 0.0);
        assert!(model.weights[1] > 0.0);
        for (x, &y) in features.iter().zip(&labels) {
            assert_eq!(model.predict(x), y);
        }
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (features, labels) = toy();
        let params = LogisticParams::default();
        let (a, _) = LogisticRegression::fit(&features, &labels, 3, &params).unwrap();
        let (b, _) = LogisticRegression::fit(&features, &labels, 3, &params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let (features, labels) = toy();
        let (model, _) =
            LogisticRegression::fit(&features, &labels, 3, &LogisticParams::default()).unwrap();
        let [p0, p1] = model.predict_proba(&vec![(0, 0.3), (1, 0.9)]);
        assert!((p0 + p1 - 1.0).abs() < 1e-12);
        assert!((0.0..=1.0).contains(&p0) && (0.0..=1.0).contains(&p1));
    }

    #[test]
    fn test_single_class_is_rejected() {
        let features = vec![vec![(0, 1.0)], vec![(0, 0.5)]];
        let labels = vec![Label::Real, Label::Real];
        let err = LogisticRegression::fit(&features, &labels, 1, &LogisticParams::default())
            .unwrap_err();
        assert!(matches!(err, Error::SingleClass(Label::Real)));
    }

    #[test]
    fn test_validate_dimension_mismatch() {
        let model = LogisticRegression {
            weights: vec![0.1, 0.2],
            intercept: 0.0,
        };
        assert!(model.validate(2).is_ok());
        assert!(matches!(model.validate(3), Err(Error::IncompatibleModel(_))));
    }
}
