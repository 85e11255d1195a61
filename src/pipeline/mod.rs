//! End-to-end training and inference pipeline.
//!
//! Raw articles flow through the text collaborators into three encoded
//! branches, get fused into one matrix, and drive the selected classifier.
//! A [`FittedPipeline`] bundles the three fitted vectorizers, the fusion
//! weights and the fitted model; all four parts persist independently so
//! inference never touches the training corpus.
//!
//! ## Module structure
//!
//! - [`config`] - TOML configuration and model selection
//! - [`data`] - dataset records, labels, loading and merging
//! - [`train`] - the training pipeline
//! - [`predict`] - single-text prediction from saved artifacts
//! - [`save`] - artifact persistence
//! - [`report`] - reporting collaborator interface
//! - [`cli`] - command-line entry point

pub mod cli;
pub mod config;
pub mod data;
pub mod predict;
pub mod report;
pub mod save;
pub mod train;

use crate::error::Result;
use crate::features::fuse::{fuse, FusionWeights};
use crate::features::sparse::CsrMatrix;
use crate::features::tfidf::TfidfVectorizer;
use crate::model::{AnyModel, Classifier};
use crate::pipeline::data::Label;
use crate::text::{lexicon, normalize, tagger};

/// Fitted artifacts of the full pipeline.
#[derive(Debug)]
pub struct FittedPipeline {
    pub lexical: TfidfVectorizer,
    pub pos: TfidfVectorizer,
    pub semantic: TfidfVectorizer,
    pub weights: FusionWeights,
    pub model: AnyModel,
}

impl FittedPipeline {
    /// Encode raw texts into the fused feature matrix: normalize, tag and
    /// expand each text, transform the three branches, fuse.
    pub fn encode_texts(&self, texts: &[String]) -> Result<CsrMatrix> {
        let lexical_texts: Vec<String> = texts.iter().map(|t| normalize(t)).collect();
        let pos_texts: Vec<String> = texts.iter().map(|t| tagger::tag(t)).collect();
        let semantic_texts: Vec<String> = texts.iter().map(|t| lexicon::expand(t)).collect();

        fuse(&[
            (self.lexical.transform(&lexical_texts)?, self.weights.lexical),
            (self.pos.transform(&pos_texts)?, self.weights.pos),
            (self.semantic.transform(&semantic_texts)?, self.weights.semantic),
        ])
    }

    /// Predict one label per raw text.
    pub fn predict_texts(&self, texts: &[String]) -> Result<Vec<Label>> {
        self.model.predict(&self.encode_texts(texts)?)
    }
}
