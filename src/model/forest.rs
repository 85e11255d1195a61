//! Bagged random forest.
//!
//! Bootstrap-sampled Gini trees, each grown on its own √d feature subsample
//! gathered densely from the sparse input. Prediction is a majority vote
//! across trees.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Result, VeracityError};
use crate::features::sparse::CsrMatrix;
use crate::model::tree::DecisionTree;
use crate::model::{check_feature_count, check_training_inputs, Classifier};
use crate::pipeline::data::Label;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    n_estimators: usize,
    max_depth: Option<usize>,
    min_samples_split: usize,
    min_samples_leaf: usize,
    seed: u64,
    state: Option<ForestState>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ForestState {
    n_features: usize,
    members: Vec<ForestMember>,
}

/// One tree plus the feature columns it was grown on.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ForestMember {
    features: Vec<usize>,
    tree: DecisionTree,
}

impl RandomForest {
    pub fn new(
        n_estimators: usize,
        max_depth: Option<usize>,
        min_samples_split: usize,
        min_samples_leaf: usize,
        seed: u64,
    ) -> Self {
        assert!(n_estimators >= 1, "need at least one tree");
        RandomForest {
            n_estimators,
            max_depth,
            min_samples_split,
            min_samples_leaf,
            seed,
            state: None,
        }
    }
}

impl Classifier for RandomForest {
    fn fit(&mut self, x: &CsrMatrix, y: &[Label]) -> Result<()> {
        check_training_inputs(x, y)?;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let n_rows = x.rows();
        let subset = feature_subset_size(x.cols());

        let mut members = Vec::with_capacity(self.n_estimators);
        for _ in 0..self.n_estimators {
            let features = sample_features(x.cols(), subset, &mut rng);

            let sample: Vec<usize> = (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect();
            let dense: Vec<Vec<f64>> = sample
                .iter()
                .map(|&r| features.iter().map(|&c| x.get(r, c)).collect())
                .collect();
            let labels: Vec<Label> = sample.iter().map(|&r| y[r]).collect();

            let mut tree = DecisionTree::new(
                self.max_depth,
                self.min_samples_split,
                self.min_samples_leaf,
            );
            tree.fit(&dense, &labels);
            members.push(ForestMember { features, tree });
        }

        self.state = Some(ForestState {
            n_features: x.cols(),
            members,
        });
        Ok(())
    }

    fn predict(&self, x: &CsrMatrix) -> Result<Vec<Label>> {
        let state = self.state.as_ref().ok_or(VeracityError::NotFitted)?;
        check_feature_count(state.n_features, x)?;

        let mut predictions = Vec::with_capacity(x.rows());
        for i in 0..x.rows() {
            let mut votes = [0usize; Label::REPORT_ORDER.len()];
            for member in &state.members {
                let row: Vec<f64> = member.features.iter().map(|&c| x.get(i, c)).collect();
                votes[member.tree.predict_row(&row).index()] += 1;
            }
            let mut best = 0;
            for c in 1..votes.len() {
                if votes[c] > votes[best] {
                    best = c;
                }
            }
            predictions.push(Label::REPORT_ORDER[best]);
        }
        Ok(predictions)
    }
}

/// √d feature subsample, at least one column.
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
