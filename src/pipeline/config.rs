//! Configuration structures for the classification pipeline.
//!
//! Strongly-typed TOML configuration covering data paths, feature
//! extraction, model selection and artifact output paths. A missing or
//! unreadable file falls back to [`Config::default`].

use serde::Deserialize;
use std::error::Error;

use crate::error::{Result as VResult, VeracityError};
use crate::features::fuse::FusionWeights;
use crate::model::{
    AnyModel, GradientBoosting, KnnClassifier, MultinomialNb, RandomForest,
};

/// Main configuration structure loaded from `config.toml`.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub features: FeaturesConfig,
    pub model: ModelConfig,
    pub output: OutputConfig,
}

/// Data loading configuration.
#[derive(Debug, Deserialize)]
pub struct DataConfig {
    /// Path to the primary tab-separated dataset
    pub primary_path: String,
    /// Optional secondary dataset merged after its filter rule
    pub secondary_path: Option<String>,
    /// Train/test split ratio (e.g. 0.8 = 80% train)
    pub train_split: f64,
    /// Shuffle seed for reproducible splits
    pub seed: u64,
}

/// Feature extraction configuration.
#[derive(Debug, Deserialize)]
pub struct FeaturesConfig {
    /// Inclusive n-gram range of the lexical branch
    pub lexical_ngram: [usize; 2],
    /// Inclusive n-gram range of the part-of-speech branch
    pub pos_ngram: [usize; 2],
    /// Inclusive n-gram range of the semantic branch
    pub semantic_ngram: [usize; 2],
    /// Per-branch fusion weights
    pub weights: FusionWeights,
}

/// Model selection and hyperparameters.
#[derive(Debug, Deserialize)]
pub struct ModelConfig {
    /// Back end: "naive_bayes", "knn", "forest" or "boosting"
    pub kind: String,
    /// Naive Bayes smoothing coefficient
    pub alpha: f64,
    /// k-NN neighbor count
    pub n_neighbors: usize,
    /// k-NN scan block size
    pub leaf_size: usize,
    /// k-NN Minkowski order
    pub minkowski_p: u32,
    /// Forest tree count
    pub n_estimators: usize,
    /// Forest depth limit (absent = unlimited)
    pub max_depth: Option<usize>,
    /// Forest split minimum
    pub min_samples_split: usize,
    /// Forest leaf minimum
    pub min_samples_leaf: usize,
    /// Boosting stage count
    pub boosting_estimators: usize,
    /// Boosting shrinkage
    pub learning_rate: f64,
    /// Boosting tree depth
    pub boosting_depth: usize,
}

/// Output paths configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Directory for all fitted artifacts
    pub model_dir: String,
    /// Lexical vectorizer filename
    pub lexical_file: String,
    /// Part-of-speech vectorizer filename
    pub pos_file: String,
    /// Semantic vectorizer filename
    pub semantic_file: String,
    /// Fitted model filename
    pub model_file: String,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data: DataConfig {
                primary_path: "data/articles.tsv".to_string(),
                secondary_path: Some("data/articles_extra.tsv".to_string()),
                train_split: 0.8,
                seed: 42,
            },
            features: FeaturesConfig {
                lexical_ngram: [1, 3],
                pos_ngram: [1, 3],
                semantic_ngram: [1, 1],
                weights: FusionWeights::default(),
            },
            model: ModelConfig {
                kind: "naive_bayes".to_string(),
                alpha: 0.0,
                n_neighbors: 19,
                leaf_size: 6,
                minkowski_p: 2,
                n_estimators: 1000,
                max_depth: Some(30),
                min_samples_split: 10,
                min_samples_leaf: 2,
                boosting_estimators: 200,
                learning_rate: 0.1,
                boosting_depth: 3,
            },
            output: OutputConfig {
                model_dir: "models".to_string(),
                lexical_file: "lexical_tfidf.json".to_string(),
                pos_file: "pos_tfidf.json".to_string(),
                semantic_file: "semantic_tfidf.json".to_string(),
                model_file: "model.json".to_string(),
            },
        }
    }
}

impl ModelConfig {
    /// Build an unfitted back end for the configured kind. Selection is
    /// explicit; there is no fallback on an unknown name.
    pub fn build(&self, seed: u64) -> VResult<AnyModel> {
        self.build_kind(&self.kind, seed)
    }

    /// Build a specific back end, e.g. from a command-line override, with
    /// this configuration's hyperparameters.
    pub fn build_kind(&self, kind: &str, seed: u64) -> VResult<AnyModel> {
        match kind {
            "naive_bayes" => Ok(AnyModel::NaiveBayes(MultinomialNb::new(self.alpha))),
            "knn" => Ok(AnyModel::Knn(KnnClassifier::new(
                self.n_neighbors,
                self.leaf_size,
                self.minkowski_p,
            ))),
            "forest" => Ok(AnyModel::Forest(RandomForest::new(
                self.n_estimators,
                self.max_depth,
                self.min_samples_split,
                self.min_samples_leaf,
                seed,
            ))),
            "boosting" => Ok(AnyModel::Boosting(GradientBoosting::new(
                self.boosting_estimators,
                self.learning_rate,
                self.boosting_depth,
                seed,
            ))),
            unknown => Err(VeracityError::UnsupportedValue(format!(
                "unknown model kind {unknown:?}"
            ))),
        }
    }
}
