//! Single-text prediction from saved artifacts.

use std::error::Error;
use std::time::Instant;

use crate::pipeline::config::Config;
use crate::pipeline::save::load_pipeline;

/// Classify one text using the artifacts saved by a previous training run.
pub fn predict_single(config: &Config, text: &str) -> Result<(), Box<dyn Error>> {
    println!("\nLoading artifacts...");
    let pipeline = load_pipeline(&config.output, config.features.weights)?;
    println!("  model: {}\n", pipeline.model.name());

    let display: String = text.chars().take(100).collect();
    if display.len() < text.len() {
        println!("Input: {display}...");
    } else {
        println!("Input: {display}");
    }

    let start = Instant::now();
    let labels = pipeline.predict_texts(&[text.to_string()])?;
    println!("\nRating: {}", labels[0]);
    println!("Time: {:.3}s\n", start.elapsed().as_secs_f64());
    Ok(())
}
