//! Training-time hyperparameter selection.
//!
//! Optional collaborator: the back ends work with any fixed parameter set,
//! and these helpers only pick one using held-out accuracy. The smoothing
//! sweep walks a fixed grid; the k-NN and forest searches sample their
//! parameter spaces at random with a seeded generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::features::sparse::CsrMatrix;
use crate::model::metrics::accuracy;
use crate::model::{Classifier, KnnClassifier, MultinomialNb, RandomForest};
use crate::pipeline::data::Label;

/// Sweep the smoothing coefficient over `{0.0, 0.1, .., 0.9}` and return
/// `(best_alpha, held_out_accuracy)`.
pub fn sweep_alpha(
    x_train: &CsrMatrix,
    y_train: &[Label],
    x_valid: &CsrMatrix,
    y_valid: &[Label],
) -> Result<(f64, f64)> {
    let mut best = (0.0, f64::NEG_INFINITY);
    for step in 0..10 {
        let alpha = step as f64 * 0.1;
        let mut nb = MultinomialNb::new(alpha);
        nb.fit(x_train, y_train)?;
        let score = accuracy(y_valid, &nb.predict(x_valid)?);
        println!("  alpha {alpha:.1}: accuracy {:.4}", score);
        if score > best.1 {
            best = (alpha, score);
        }
    }
    Ok(best)
}

/// Winning k-NN parameters from a randomized search.
#[derive(Debug, Clone, Copy)]
pub struct KnnParams {
    pub n_neighbors: usize,
    pub leaf_size: usize,
    pub p: u32,
}

/// Randomized search over the k-NN space: neighbors 1..30, leaf size 1..50,
/// Minkowski order 1 or 2.
pub fn search_knn(
    x_train: &CsrMatrix,
    y_train: &[Label],
    x_valid: &CsrMatrix,
    y_valid: &[Label],
    n_iter: usize,
    seed: u64,
) -> Result<(KnnParams, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut best: Option<(KnnParams, f64)> = None;

    for _ in 0..n_iter {
        let params = KnnParams {
            n_neighbors: rng.gen_range(1..30),
            leaf_size: rng.gen_range(1..50),
            p: if rng.gen_bool(0.5) { 1 } else { 2 },
        };
        let mut knn = KnnClassifier::new(params.n_neighbors, params.leaf_size, params.p);
        knn.fit(x_train, y_train)?;
        let score = accuracy(y_valid, &knn.predict(x_valid)?);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((params, score));
        }
    }
    Ok(best.expect("n_iter must be positive"))
}

/// Winning forest parameters from a randomized search.
#[derive(Debug, Clone, Copy)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
}

/// Randomized search over the forest grid: 200-1000 trees, depth 10-50 or
/// unlimited, split minimum {2, 5, 10}, leaf minimum {1, 2, 4}.
pub fn search_forest(
    x_train: &CsrMatrix,
    y_train: &[Label],
    x_valid: &CsrMatrix,
    y_valid: &[Label],
    n_iter: usize,
    seed: u64,
) -> Result<(ForestParams, f64)> {
    const TREES: [usize; 5] = [200, 400, 600, 800, 1000];
    const DEPTHS: [Option<usize>; 6] =
        [Some(10), Some(20), Some(30), Some(40), Some(50), None];
    const SPLITS: [usize; 3] = [2, 5, 10];
    const LEAVES: [usize; 3] = [1, 2, 4];

    let mut rng = StdRng::seed_from_u64(seed);
    let mut best: Option<(ForestParams, f64)> = None;

    for _ in 0..n_iter {
        let params = ForestParams {
            n_estimators: TREES[rng.gen_range(0..TREES.len())],
            max_depth: DEPTHS[rng.gen_range(0..DEPTHS.len())],
            min_samples_split: SPLITS[rng.gen_range(0..SPLITS.len())],
            min_samples_leaf: LEAVES[rng.gen_range(0..LEAVES.len())],
        };
        let mut forest = RandomForest::new(
            params.n_estimators,
            params.max_depth,
            params.min_samples_split,
            params.min_samples_leaf,
            rng.gen(),
        );
        forest.fit(x_train, y_train)?;
        let score = accuracy(y_valid, &forest.predict(x_valid)?);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((params, score));
        }
    }
    Ok(best.expect("n_iter must be positive"))
}
