//! Gradient-boosted trees.
//!
//! Multiclass boosting with softmax deviance: per stage, one shallow
//! regression tree per class is fit to the pseudo-residuals and added to the
//! class score with a shrinkage factor. Trees grow on a per-tree √d feature
//! subsample gathered densely, like the forest members.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VeracityError};
use crate::features::sparse::CsrMatrix;
use crate::model::tree::RegressionTree;
use crate::model::{check_feature_count, check_training_inputs, ordered_classes, Classifier};
use crate::pipeline::data::Label;

pub const DEFAULT_ESTIMATORS: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBoosting {
    n_estimators: usize,
    learning_rate: f64,
    max_depth: usize,
    seed: u64,
    state: Option<BoostState>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BoostState {
    n_features: usize,
    classes: Vec<Label>,
    /// Log-prior starting score per class.
    base_score: Vec<f64>,
    /// `stages[m][k]` is the stage-m tree for class k.
    stages: Vec<Vec<BoostTree>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BoostTree {
    features: Vec<usize>,
    tree: RegressionTree,
}

impl GradientBoosting {
    pub fn new(n_estimators: usize, learning_rate: f64, max_depth: usize, seed: u64) -> Self {
        assert!(n_estimators >= 1, "need at least one stage");
        assert!(learning_rate > 0.0, "shrinkage must be positive");
        GradientBoosting {
            n_estimators,
            learning_rate,
            max_depth,
            seed,
            state: None,
        }
    }
}

impl Default for GradientBoosting {
    fn default() -> Self {
        GradientBoosting::new(DEFAULT_ESTIMATORS, 0.1, 3, 0)
    }
}

impl Classifier for GradientBoosting {
    fn fit(&mut self, x: &CsrMatrix, y: &[Label]) -> Result<()> {
        check_training_inputs(x, y)?;

        let classes = ordered_classes(y);
        let n_rows = x.rows();
        let n = n_rows as f64;
        let base_score: Vec<f64> = classes
            .iter()
            .map(|&c| (y.iter().filter(|&&l| l == c).count() as f64 / n).ln())
            .collect();

        // A single observed class needs no stages.
        if classes.len() == 1 {
            self.state = Some(BoostState {
                n_features: x.cols(),
                classes,
                base_score,
                stages: Vec::new(),
            });
            return Ok(());
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let subset = feature_subset_size(x.cols());
        let mut scores: Vec<Vec<f64>> = (0..n_rows).map(|_| base_score.clone()).collect();
        let mut stages = Vec::with_capacity(self.n_estimators);

        for _ in 0..self.n_estimators {
            let mut stage = Vec::with_capacity(classes.len());
            for (k, &class) in classes.iter().enumerate() {
                let features = sample_features(x.cols(), subset, &mut rng);
                let dense = x.gather_columns(&features);

                let residuals: Vec<f64> = (0..n_rows)
                    .map(|r| {
                        let target = if y[r] == class { 1.0 } else { 0.0 };
                        target - softmax_prob(&scores[r], k)
                    })
                    .collect();

                let mut tree = RegressionTree::new(self.max_depth, 1);
                tree.fit(&dense, &residuals);

                for (r, row) in dense.iter().enumerate() {
                    scores[r][k] += self.learning_rate * tree.predict_row(row);
                }
                stage.push(BoostTree { features, tree });
            }
            stages.push(stage);
        }

        self.state = Some(BoostState {
            n_features: x.cols(),
            classes,
            base_score,
            stages,
        });
        Ok(())
    }

    fn predict(&self, x: &CsrMatrix) -> Result<Vec<Label>> {
        let state = self.state.as_ref().ok_or(VeracityError::NotFitted)?;
        check_feature_count(state.n_features, x)?;

        let mut predictions = Vec::with_capacity(x.rows());
        for i in 0..x.rows() {
            let mut scores = state.base_score.clone();
            for stage in &state.stages {
                for (k, member) in stage.iter().enumerate() {
                    let row: Vec<f64> = member.features.iter().map(|&c| x.get(i, c)).collect();
                    scores[k] += self.learning_rate * member.tree.predict_row(&row);
                }
            }
            let mut best = 0;
            for k in 1..scores.len() {
                if scores[k] > scores[best] {
                    best = k;
                }
            }
            predictions.push(state.classes[best]);
        }
        Ok(predictions)
    }
}

fn softmax_prob(scores: &[f64], k: usize) -> f64 {
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let denom: f64 = scores.iter().map(|s| (s - max).exp()).sum();
    (scores[k] - max).exp() / denom
}

fn feature_subset_size(n_features: usize) -> usize {
    ((n_features as f64).sqrt().round() as usize).clamp(1, n_features.max(1))
}

fn sample_features(n_features: usize, subset: usize, rng: &mut StdRng) -> Vec<usize> {
    let mut all: Vec<usize> = (0..n_features).collect();
    all.shuffle(rng);
    let mut chosen: Vec<usize> = all.into_iter().take(subset).collect();
    chosen.sort_unstable();
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable() -> (CsrMatrix, Vec<Label>) {
        let mut x = CsrMatrix::with_cols(2);
        let mut y = Vec::new();
        for i in 0..8 {
            let v = if i % 2 == 0 { -1.0 } else { 1.0 };
            x.push_row(&[(0, v + 0.03 * i as f64), (1, -v)]);
            y.push(if i % 2 == 0 { Label::False } else { Label::True });
        }
        (x, y)
    }

    #[test]
    fn learns_separable_data() {
        let (x, y) = separable();
        let mut gb = GradientBoosting::new(20, 0.3, 2, 11);
        gb.fit(&x, &y).unwrap();
        assert_eq!(gb.predict(&x).unwrap(), y);
    }

    #[test]
    fn single_class_training_set_predicts_that_class() {
        let mut x = CsrMatrix::with_cols(2);
        x.push_row(&[(0, 1.0)]);
        x.push_row(&[(1, 1.0)]);
        let mut gb = GradientBoosting::new(5, 0.1, 2, 0);
        gb.fit(&x, &[Label::Other, Label::Other]).unwrap();
        assert_eq!(
            gb.predict(&x).unwrap(),
            vec![Label::Other, Label::Other]
        );
    }

    #[test]
    fn default_uses_two_hundred_stages() {
        let gb = GradientBoosting::default();
        assert_eq!(gb.n_estimators, DEFAULT_ESTIMATORS);
    }

    #[test]
    fn accepts_negative_features() {
        let (x, y) = separable();
        assert!(x.has_negative());
        let mut gb = GradientBoosting::new(10, 0.3, 2, 5);
        assert!(gb.fit(&x, &y).is_ok());
    }

    #[test]
    fn predict_before_fit_is_not_fitted() {
        let gb = GradientBoosting::default();
        let err = gb.predict(&CsrMatrix::with_cols(2)).unwrap_err();
        assert!(matches!(err, VeracityError::NotFitted));
    }

    #[test]
    fn column_mismatch_is_rejected() {
        let (x, y) = separable();
        let mut gb = GradientBoosting::new(3, 0.1, 2, 0);
        gb.fit(&x, &y).unwrap();
        let err = gb.predict(&CsrMatrix::with_cols(9)).unwrap_err();
        assert!(matches!(err, VeracityError::DimensionMismatch { .. }));
    }
}
