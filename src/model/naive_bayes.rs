//! Multinomial naive Bayes.
//!
//! Count-based probabilistic back end with Lidstone smoothing. Requires
//! non-negative features: TF-IDF weights qualify, but a fused matrix with
//! negative branch weights does not. That precondition is enforced, not
//! clipped away.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VeracityError};
use crate::features::sparse::CsrMatrix;
use crate::model::{check_feature_count, check_training_inputs, ordered_classes, Classifier};
use crate::pipeline::data::Label;

/// Smoothing floor: zero alpha is clamped here so log-probabilities of
/// unseen terms stay finite.
const ALPHA_FLOOR: f64 = 1e-10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNb {
    alpha: f64,
    state: Option<NbState>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NbState {
    n_features: usize,
    classes: Vec<Label>,
    class_log_prior: Vec<f64>,
    /// Per class, per feature: log P(feature | class).
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    pub fn new(alpha: f64) -> Self {
        MultinomialNb { alpha, state: None }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Classifier for MultinomialNb {
    fn fit(&mut self, x: &CsrMatrix, y: &[Label]) -> Result<()> {
        check_training_inputs(x, y)?;
        if x.has_negative() {
            return Err(VeracityError::UnsupportedValue(
                "multinomial naive Bayes requires non-negative features".into(),
            ));
        }

        let classes = ordered_classes(y);
        let alpha = self.alpha.max(ALPHA_FLOOR);
        let n = y.len() as f64;

        let mut class_log_prior = Vec::with_capacity(classes.len());
        let mut feature_log_prob = Vec::with_capacity(classes.len());

        for &class in &classes {
            let members: Vec<usize> = (0..x.rows()).filter(|&i| y[i] == class).collect();
            class_log_prior.push((members.len() as f64 / n).ln());

            let mut feature_sum = vec![0.0; x.cols()];
            for &i in &members {
                let (cols, vals) = x.row(i);
                for (c, v) in cols.iter().zip(vals) {
                    feature_sum[*c] += v;
                }
            }
            let total: f64 = feature_sum.iter().sum();
            let denom = (total + alpha * x.cols() as f64).ln();
            feature_log_prob
                .push(feature_sum.iter().map(|s| (s + alpha).ln() - denom).collect());
        }

        self.state = Some(NbState {
            n_features: x.cols(),
            classes,
            class_log_prior,
            feature_log_prob,
        });
        Ok(())
    }

    fn predict(&self, x: &CsrMatrix) -> Result<Vec<Label>> {
        let state = self.state.as_ref().ok_or(VeracityError::NotFitted)?;
        check_feature_count(state.n_features, x)?;

        let mut predictions = Vec::with_capacity(x.rows());
        for i in 0..x.rows() {
            let (cols, vals) = x.row(i);
            let mut best = (f64::NEG_INFINITY, state.classes[0]);
            for (k, &class) in state.classes.iter().enumerate() {
                let mut score = state.class_log_prior[k];
                for (c, v) in cols.iter().zip(vals) {
                    score += v * state.feature_log_prob[k][*c];
                }
                if score > best.0 {
                    best = (score, class);
                }
            }
            predictions.push(best.1);
        }
        Ok(predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> (CsrMatrix, Vec<Label>) {
        // Two well-separated count profiles.
        let mut x = CsrMatrix::with_cols(4);
        x.push_row(&[(0, 3.0), (1, 1.0)]);
        x.push_row(&[(0, 2.0), (1, 2.0)]);
        x.push_row(&[(2, 3.0), (3, 1.0)]);
        x.push_row(&[(2, 1.0), (3, 2.0)]);
        let y = vec![Label::False, Label::False, Label::True, Label::True];
        (x, y)
    }

    #[test]
    fn separates_disjoint_vocabularies() {
        let (x, y) = toy();
        let mut nb = MultinomialNb::new(0.5);
        nb.fit(&x, &y).unwrap();

        let mut probe = CsrMatrix::with_cols(4);
        probe.push_row(&[(0, 1.0)]);
        probe.push_row(&[(3, 2.0)]);
        assert_eq!(nb.predict(&probe).unwrap(), vec![Label::False, Label::True]);
    }

    #[test]
    fn zero_alpha_is_clamped_not_rejected() {
        let (x, y) = toy();
        let mut nb = MultinomialNb::new(0.0);
        nb.fit(&x, &y).unwrap();
        let preds = nb.predict(&x).unwrap();
        assert_eq!(preds, y);
    }

    #[test]
    fn negative_features_are_unsupported() {
        let mut x = CsrMatrix::with_cols(2);
        x.push_row(&[(0, 1.0), (1, -0.1)]);
        let mut nb = MultinomialNb::new(1.0);
        let err = nb.fit(&x, &[Label::True]).unwrap_err();
        assert!(matches!(err, VeracityError::UnsupportedValue(_)));
    }

    #[test]
    fn empty_training_set_is_rejected() {
        let mut nb = MultinomialNb::new(1.0);
        let err = nb.fit(&CsrMatrix::with_cols(3), &[]).unwrap_err();
        assert!(matches!(err, VeracityError::EmptyTrainingSet));
    }

    #[test]
    fn predict_before_fit_is_not_fitted() {
        let nb = MultinomialNb::new(1.0);
        let err = nb.predict(&CsrMatrix::with_cols(3)).unwrap_err();
        assert!(matches!(err, VeracityError::NotFitted));
    }

    #[test]
    fn predict_rejects_column_mismatch() {
        let (x, y) = toy();
        let mut nb = MultinomialNb::new(1.0);
        nb.fit(&x, &y).unwrap();
        let err = nb.predict(&CsrMatrix::with_cols(5)).unwrap_err();
        assert!(matches!(
            err,
            VeracityError::DimensionMismatch { expected: 4, found: 5 }
        ));
    }
}
