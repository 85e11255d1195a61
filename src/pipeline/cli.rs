//! Command-line interface.

use std::error::Error;

use super::config::Config;
use super::predict::predict_single;
use super::train::train;

/// Print command-line usage information.
pub fn print_usage() {
    println!("Usage:");
    println!("  veracity [COMMAND] [OPTIONS]\n");
    println!("Commands:");
    println!("  train              Train the fused pipeline (saves artifacts to models/)");
    println!("  predict TEXT       Classify one text (requires trained artifacts)");
    println!("  help               Show this help\n");
    println!("Options:");
    println!("  --model KIND       Back end override: naive_bayes, knn, forest, boosting");
    println!("                     Default: uses config.toml setting\n");
    println!("Examples:");
    println!("  veracity train --model forest");
    println!("  veracity predict \"Senate passes sweeping health bill\"");
}

/// Main entry point: parses arguments (including program name) and runs the
/// selected command with `config.toml` or defaults.
pub fn run(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let command = if args.len() > 1 { args[1].as_str() } else { "train" };

    let config = Config::load("config.toml").unwrap_or_else(|e| {
        eprintln!("Warning: could not load config.toml: {e}");
        eprintln!("Using default configuration\n");
        Config::default()
    });

    match command {
        "train" => {
            let kind_override = flag_value(&args, "--model");
            train(&config, kind_override.as_deref())
        }
        "predict" => {
            let text = args.get(2).filter(|t| !t.starts_with("--"));
            match text {
                Some(text) => predict_single(&config, text),
                None => {
                    println!("Error: TEXT argument required\n");
                    print_usage();
                    Ok(())
                }
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        _ => {
            println!("Unknown command: {command}\n");
            print_usage();
            Ok(())
        }
    }
}

/// Value of a `--flag VALUE` pair anywhere in the argument list.
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_value_finds_pairs() {
        let args: Vec<String> = ["veracity", "train", "--model", "knn"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(flag_value(&args, "--model").as_deref(), Some("knn"));
        assert_eq!(flag_value(&args, "--seed"), None);
    }

    #[test]
    fn flag_value_handles_trailing_flag() {
        let args: Vec<String> = ["veracity", "train", "--model"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(flag_value(&args, "--model"), None);
    }
}
