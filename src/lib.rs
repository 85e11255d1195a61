//! # Veracity - News Truthfulness Classifier
//!
//! Classifies news articles into truthfulness ratings (TRUE, FALSE,
//! PARTIALLY FALSE, OTHER) with a fused three-branch feature pipeline.
//!
//! ## Architecture
//!
//! Every article is projected into three independent sparse TF-IDF
//! representations, each fit once on training data and persisted for reuse:
//!
//! - **Lexical**: cleaned text (punctuation- and stopword-free, lemmatized),
//!   unigrams through trigrams
//! - **Part-of-speech**: Universal POS tag sequences of the raw text, same
//!   n-gram family
//! - **Semantic**: category-name pseudo-text from a fixed topical lexicon,
//!   unigrams only
//!
//! The branches are weighted (lexical 1.5, part-of-speech 0.45, semantic
//! 1.05), row-aligned by zero-padding and concatenated column-wise into one
//! combined matrix that drives any of four classifier back ends behind a
//! uniform fit/predict contract:
//!
//! | Back end | Notes |
//! |----------|-------|
//! | `naive_bayes` | multinomial counts, tunable smoothing, non-negative input only |
//! | `knn` | Minkowski distance, majority vote |
//! | `forest` | bootstrap-bagged Gini trees |
//! | `boosting` | gradient-boosted regression trees, 200 stages by default |
//!
//! ## Quick start
//!
//! ```no_run
//! use veracity::model::{AnyModel, MultinomialNb};
//! use veracity::pipeline::config::Config;
//! use veracity::pipeline::data::{Document, Label};
//! use veracity::pipeline::train::fit_pipeline;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let docs = vec![
//!         Document { text: "Officials confirmed the report".into(), label: Label::True },
//!         Document { text: "Viral hoax spreads conspiracy".into(), label: Label::False },
//!     ];
//!     let features = Config::default().features;
//!     let model = AnyModel::NaiveBayes(MultinomialNb::new(0.1));
//!     let pipeline = fit_pipeline(&docs, &features, model)?;
//!
//!     let rating = pipeline.predict_texts(&["Senate passes health bill".into()])?;
//!     println!("{}", rating[0]);
//!     Ok(())
//! }
//! ```
//!
//! ## Command line
//!
//! ```bash
//! veracity train --model boosting
//! veracity predict "Senate passes sweeping health bill"
//! ```
//!
//! ## Configuration
//!
//! Create a `config.toml` next to the binary to override the defaults:
//!
//! ```toml
//! [data]
//! primary_path = "data/articles.tsv"
//! secondary_path = "data/articles_extra.tsv"
//! train_split = 0.8
//! seed = 42
//!
//! [features]
//! lexical_ngram = [1, 3]
//! pos_ngram = [1, 3]
//! semantic_ngram = [1, 1]
//! weights = { lexical = 1.5, pos = 0.45, semantic = 1.05 }
//!
//! [model]
//! kind = "naive_bayes"
//! alpha = 0.0
//! n_neighbors = 19
//! leaf_size = 6
//! minkowski_p = 2
//! n_estimators = 1000
//! max_depth = 30
//! min_samples_split = 10
//! min_samples_leaf = 2
//! boosting_estimators = 200
//! learning_rate = 0.1
//! boosting_depth = 3
//!
//! [output]
//! model_dir = "models"
//! lexical_file = "lexical_tfidf.json"
//! pos_file = "pos_tfidf.json"
//! semantic_file = "semantic_tfidf.json"
//! model_file = "model.json"
//! ```
//!
//! ## Persisted artifacts
//!
//! A training run writes four independently loadable JSON blobs: the three
//! fitted vectorizers and the fitted model. `veracity predict` reloads them
//! without touching the training corpus.
//!
//! ## License
//!
//! GNU General Public License v3.0 (GPLv3)

pub mod error;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod text;

// Re-export the types most callers need.
pub use error::VeracityError;
pub use features::fuse::{fuse, FusionWeights};
pub use features::sparse::CsrMatrix;
pub use features::tfidf::TfidfVectorizer;
pub use model::{AnyModel, Classifier};
pub use pipeline::data::{Document, Label};
pub use pipeline::FittedPipeline;
