//! Classifier back ends behind one fit/predict capability.
//!
//! Every back end consumes the fused (or a single-branch) sparse matrix and
//! an aligned label vector. Fit state is written once and never mutated
//! afterwards, so a fitted model may be shared read-only across predict
//! calls. Back-end selection is explicit via [`AnyModel`]; there is no
//! runtime type sniffing.

pub mod boosting;
pub mod forest;
pub mod knn;
pub mod metrics;
pub mod naive_bayes;
pub mod tree;
pub mod tune;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VeracityError};
use crate::features::sparse::CsrMatrix;
use crate::pipeline::data::Label;

pub use boosting::GradientBoosting;
pub use forest::RandomForest;
pub use knn::KnnClassifier;
pub use naive_bayes::MultinomialNb;

/// Uniform fit/predict contract shared by all back ends.
pub trait Classifier {
    /// Learn from a feature matrix and its aligned labels.
    ///
    /// Fails with `EmptyTrainingSet` on zero rows and `DimensionMismatch`
    /// when rows and labels disagree.
    fn fit(&mut self, x: &CsrMatrix, y: &[Label]) -> Result<()>;

    /// Predict one label per input row.
    ///
    /// Fails with `NotFitted` before fit and `DimensionMismatch` when the
    /// column count differs from fit time.
    fn predict(&self, x: &CsrMatrix) -> Result<Vec<Label>>;
}

/// Tagged union over the supported back ends; doubles as the single
/// serialized fitted-model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnyModel {
    NaiveBayes(MultinomialNb),
    Knn(KnnClassifier),
    Forest(RandomForest),
    Boosting(GradientBoosting),
}

impl AnyModel {
    pub fn name(&self) -> &'static str {
        match self {
            AnyModel::NaiveBayes(_) => "naive_bayes",
            AnyModel::Knn(_) => "knn",
            AnyModel::Forest(_) => "forest",
            AnyModel::Boosting(_) => "boosting",
        }
    }
}

impl Classifier for AnyModel {
    fn fit(&mut self, x: &CsrMatrix, y: &[Label]) -> Result<()> {
        match self {
            AnyModel::NaiveBayes(m) => m.fit(x, y),
            AnyModel::Knn(m) => m.fit(x, y),
            AnyModel::Forest(m) => m.fit(x, y),
            AnyModel::Boosting(m) => m.fit(x, y),
        }
    }

    fn predict(&self, x: &CsrMatrix) -> Result<Vec<Label>> {
        match self {
            AnyModel::NaiveBayes(m) => m.predict(x),
            AnyModel::Knn(m) => m.predict(x),
            AnyModel::Forest(m) => m.predict(x),
            AnyModel::Boosting(m) => m.predict(x),
        }
    }
}

/// Shared fit-time input validation.
pub(crate) fn check_training_inputs(x: &CsrMatrix, y: &[Label]) -> Result<()> {
    if x.rows() == 0 || y.is_empty() {
        return Err(VeracityError::EmptyTrainingSet);
    }
    if x.rows() != y.len() {
        return Err(VeracityError::DimensionMismatch {
            expected: x.rows(),
            found: y.len(),
        });
    }
    Ok(())
}

/// Shared predict-time column validation.
pub(crate) fn check_feature_count(expected: usize, x: &CsrMatrix) -> Result<()> {
    if x.cols() != expected {
        return Err(VeracityError::DimensionMismatch {
            expected,
            found: x.cols(),
        });
    }
    Ok(())
}

/// Distinct labels present in the training set, in report order.
pub(crate) fn ordered_classes(y: &[Label]) -> Vec<Label> {
    Label::REPORT_ORDER
        .iter()
        .copied()
        .filter(|label| y.contains(label))
        .collect()
}
