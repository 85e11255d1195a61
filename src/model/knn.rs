//! k-nearest-neighbor classification.
//!
//! Distance-based back end over sparse rows using the Minkowski metric of
//! configurable order. The training matrix itself is the fitted artifact.
//! `leaf_size` sets the block granularity of the training-row scan; it does
//! not change results.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VeracityError};
use crate::features::sparse::CsrMatrix;
use crate::model::{check_feature_count, check_training_inputs, Classifier};
use crate::pipeline::data::Label;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnnClassifier {
    n_neighbors: usize,
    leaf_size: usize,
    /// Minkowski order: 1 = Manhattan, 2 = Euclidean.
    p: u32,
    state: Option<KnnState>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct KnnState {
    x: CsrMatrix,
    y: Vec<Label>,
}

impl KnnClassifier {
    pub fn new(n_neighbors: usize, leaf_size: usize, p: u32) -> Self {
        assert!(n_neighbors >= 1, "need at least one neighbor");
        assert!(leaf_size >= 1, "leaf size must be positive");
        assert!(p >= 1, "Minkowski order must be positive");
        KnnClassifier {
            n_neighbors,
            leaf_size,
            p,
            state: None,
        }
    }
}

impl Classifier for KnnClassifier {
    fn fit(&mut self, x: &CsrMatrix, y: &[Label]) -> Result<()> {
        check_training_inputs(x, y)?;
        self.state = Some(KnnState {
            x: x.clone(),
            y: y.to_vec(),
        });
        Ok(())
    }

    fn predict(&self, x: &CsrMatrix) -> Result<Vec<Label>> {
        let state = self.state.as_ref().ok_or(VeracityError::NotFitted)?;
        check_feature_count(state.x.cols(), x)?;

        let k = self.n_neighbors.min(state.x.rows());
        let mut predictions = Vec::with_capacity(x.rows());

        for i in 0..x.rows() {
            let query = x.row(i);

            // Scan training rows block-wise, keeping the k best seen so far.
            let mut nearest: Vec<(f64, usize)> = Vec::with_capacity(k + self.leaf_size);
            let mut start = 0;
            while start < state.x.rows() {
                let end = (start + self.leaf_size).min(state.x.rows());
                for j in start..end {
                    nearest.push((minkowski(query, state.x.row(j), self.p), j));
                }
                nearest.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
                nearest.truncate(k);
                start = end;
            }

            predictions.push(vote(&nearest, &state.y));
        }
        Ok(predictions)
    }
}

/// Minkowski distance between two sparse rows via a sorted-index merge walk.
fn minkowski(a: (&[usize], &[f64]), b: (&[usize], &[f64]), p: u32) -> f64 {
    let (ac, av) = a;
    let (bc, bv) = b;
    let (mut i, mut j) = (0, 0);
    let mut acc = 0.0;
    while i < ac.len() || j < bc.len() {
        let diff = if j >= bc.len() || (i < ac.len() && ac[i] < bc[j]) {
            let d = av[i];
            i += 1;
            d
        } else if i >= ac.len() || bc[j] < ac[i] {
            let d = -bv[j];
            j += 1;
            d
        } else {
            let d = av[i] - bv[j];
            i += 1;
            j += 1;
            d
        };
        acc += diff.abs().powi(p as i32);
    }
    acc.powf(1.0 / p as f64)
}

/// Majority vote among neighbors; ties fall to the smaller summed distance,
/// then to report order.
fn vote(nearest: &[(f64, usize)], y: &[Label]) -> Label {
    let mut count = [0usize; Label::REPORT_ORDER.len()];
    let mut dist = [0.0f64; Label::REPORT_ORDER.len()];
    for &(d, idx) in nearest {
        let class = y[idx].index();
        count[class] += 1;
        dist[class] += d;
    }

    let mut best = 0;
    for c in 1..count.len() {
        if count[c] > count[best]
            || (count[c] == count[best] && count[c] > 0 && dist[c] < dist[best])
        {
            best = c;
        }
    }
    Label::REPORT_ORDER[best]
}
