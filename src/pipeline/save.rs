//! Artifact persistence.
//!
//! Four independently loadable blobs under the output directory: the three
//! fitted vectorizers and the fitted model. Loading maps IO and decoding
//! failures to `Persistence` errors.

use std::path::Path;

use crate::error::{Result, VeracityError};
use crate::features::fuse::FusionWeights;
use crate::features::tfidf::TfidfVectorizer;
use crate::model::AnyModel;
use crate::pipeline::config::OutputConfig;
use crate::pipeline::FittedPipeline;

/// Save all pipeline artifacts under the configured directory.
pub fn save_pipeline(pipeline: &FittedPipeline, output: &OutputConfig) -> Result<()> {
    std::fs::create_dir_all(&output.model_dir)
        .map_err(|e| VeracityError::Persistence(e.to_string()))?;

    println!("Saving artifacts...");
    pipeline.lexical.save(&artifact_path(output, &output.lexical_file))?;
    pipeline.pos.save(&artifact_path(output, &output.pos_file))?;
    pipeline.semantic.save(&artifact_path(output, &output.semantic_file))?;

    let model_blob = serde_json::to_vec(&pipeline.model)
        .map_err(|e| VeracityError::Persistence(e.to_string()))?;
    let model_path = artifact_path(output, &output.model_file);
    std::fs::write(&model_path, model_blob)
        .map_err(|e| VeracityError::Persistence(e.to_string()))?;

    println!("  - {}", artifact_path(output, &output.lexical_file));
    println!("  - {}", artifact_path(output, &output.pos_file));
    println!("  - {}", artifact_path(output, &output.semantic_file));
    println!("  - {}\n", model_path);
    Ok(())
}

/// Load a previously saved pipeline. Fusion weights come from configuration
/// rather than the artifacts, so callers pass them in.
pub fn load_pipeline(output: &OutputConfig, weights: FusionWeights) -> Result<FittedPipeline> {
    let lexical = TfidfVectorizer::load(&artifact_path(output, &output.lexical_file))?;
    let pos = TfidfVectorizer::load(&artifact_path(output, &output.pos_file))?;
    let semantic = TfidfVectorizer::load(&artifact_path(output, &output.semantic_file))?;

    let model_blob = std::fs::read(artifact_path(output, &output.model_file))
        .map_err(|e| VeracityError::Persistence(e.to_string()))?;
    let model: AnyModel = serde_json::from_slice(&model_blob)
        .map_err(|e| VeracityError::Persistence(e.to_string()))?;

    Ok(FittedPipeline {
        lexical,
        pos,
        semantic,
        weights,
        model,
    })
}

fn artifact_path(output: &OutputConfig, file: &str) -> String {
    Path::new(&output.model_dir)
        .join(file)
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_artifacts_fail_with_persistence() {
        let output = OutputConfig {
            model_dir: "no-such-dir".to_string(),
            lexical_file: "lex.json".to_string(),
            pos_file: "pos.json".to_string(),
            semantic_file: "sem.json".to_string(),
            model_file: "model.json".to_string(),
        };
        let err = load_pipeline(&output, FusionWeights::default()).unwrap_err();
        assert!(matches!(err, VeracityError::Persistence(_)));
    }
}
