//! Training pipeline.
//!
//! Loads and merges the datasets, builds the three text branches, fits the
//! branch vectorizers on the training split, fuses the weighted matrices and
//! fits the selected back end, then evaluates and saves every artifact.

use std::error::Error;

use crate::error::{Result, VeracityError};
use crate::features::fuse::fuse;
use crate::features::tfidf::TfidfVectorizer;
use crate::model::metrics::{accuracy, classification_report, confusion_matrix};
use crate::model::tune::sweep_alpha;
use crate::model::{AnyModel, Classifier, MultinomialNb};
use crate::pipeline::config::{Config, FeaturesConfig};
use crate::pipeline::data::{
    self, label_distribution, load_articles, merge_datasets, split_documents, Document, Label,
};
use crate::pipeline::report::{top_terms, ConsoleReporter, Reporter};
use crate::pipeline::save::save_pipeline;
use crate::pipeline::FittedPipeline;
use crate::text::{lexicon, normalize, tagger};

/// The three derived text branches of a document set, in dataset order.
pub struct BranchTexts {
    pub lexical: Vec<String>,
    pub pos: Vec<String>,
    pub semantic: Vec<String>,
}

/// Derive cleaned, tagged and expanded text for every document.
pub fn build_branches(docs: &[Document]) -> BranchTexts {
    BranchTexts {
        lexical: docs.iter().map(|d| normalize(&d.text)).collect(),
        pos: docs.iter().map(|d| tagger::tag(&d.text)).collect(),
        semantic: docs.iter().map(|d| lexicon::expand(&d.text)).collect(),
    }
}

/// Fit the three vectorizers and the given back end on the training split.
pub fn fit_pipeline(
    train_docs: &[Document],
    features: &FeaturesConfig,
    mut model: AnyModel,
) -> Result<FittedPipeline> {
    let branches = build_branches(train_docs);

    let mut lexical =
        TfidfVectorizer::new(features.lexical_ngram[0], features.lexical_ngram[1], true);
    let mut pos = TfidfVectorizer::new(features.pos_ngram[0], features.pos_ngram[1], true);
    let mut semantic =
        TfidfVectorizer::new(features.semantic_ngram[0], features.semantic_ngram[1], true);
    lexical.fit(&branches.lexical)?;
    pos.fit(&branches.pos)?;
    semantic.fit(&branches.semantic)?;

    let x = fuse(&[
        (lexical.transform(&branches.lexical)?, features.weights.lexical),
        (pos.transform(&branches.pos)?, features.weights.pos),
        (semantic.transform(&branches.semantic)?, features.weights.semantic),
    ])?;

    let labels: Vec<Label> = train_docs.iter().map(|d| d.label).collect();
    // Padding keeps branch rows aligned by index; the label vector must
    // still line up one-to-one with the fused rows.
    if x.rows() != labels.len() {
        return Err(VeracityError::DimensionMismatch {
            expected: labels.len(),
            found: x.rows(),
        });
    }

    model.fit(&x, &labels)?;
    Ok(FittedPipeline {
        lexical,
        pos,
        semantic,
        weights: features.weights,
        model,
    })
}

/// Full training run: load, merge, report, split, fit, evaluate, save.
pub fn train(config: &Config, kind_override: Option<&str>) -> std::result::Result<(), Box<dyn Error>> {
    let kind = kind_override.unwrap_or(&config.model.kind);
    println!("\n===================================================================");
    println!("  Truthfulness classifier: fused three-branch pipeline");
    println!("  lexical + part-of-speech + semantic TF-IDF -> {kind}");
    println!("===================================================================\n");

    println!("Loading dataset...");
    let mut articles = load_articles(&config.data.primary_path)?;
    if let Some(secondary_path) = &config.data.secondary_path {
        let secondary = load_articles(secondary_path)?;
        articles = merge_datasets(articles, secondary);
    }
    let docs = data::documents(&articles)?;
    println!("  {} articles\n", docs.len());

    let reporter = ConsoleReporter;
    reporter.label_distribution(&label_distribution(&docs));
    report_frequent_terms(&docs, &reporter);

    let (train_docs, test_docs) = split_documents(&docs, config.data.train_split, config.data.seed);
    println!("Train: {} | Test: {}\n", train_docs.len(), test_docs.len());

    let model = select_model(config, kind, &train_docs, &test_docs)?;
    println!("Fitting {} on the fused matrix...", model.name());
    let pipeline = fit_pipeline(&train_docs, &config.features, model)?;

    evaluate_split(&pipeline, &train_docs, "Training set", &reporter)?;
    evaluate_split(&pipeline, &test_docs, "Test set", &reporter)?;

    save_pipeline(&pipeline, &config.output)?;
    println!("Training complete.\n");
    Ok(())
}

/// Build the back end, running the smoothing sweep for the multinomial
/// model the way the tuning collaborator prescribes.
fn select_model(
    config: &Config,
    kind: &str,
    train_docs: &[Document],
    test_docs: &[Document],
) -> Result<AnyModel> {
    if kind != "naive_bayes" || test_docs.is_empty() {
        return config.model.build_kind(kind, config.data.seed);
    }

    // Sweep the smoothing coefficient on the held-out split first.
    println!("Sweeping smoothing coefficient...");
    let train_branches = build_branches(train_docs);
    let test_branches = build_branches(test_docs);

    let mut probe = TfidfVectorizer::new(
        config.features.lexical_ngram[0],
        config.features.lexical_ngram[1],
        true,
    );
    probe.fit(&train_branches.lexical)?;
    let x_train = probe.transform(&train_branches.lexical)?;
    let x_test = probe.transform(&test_branches.lexical)?;
    let y_train: Vec<Label> = train_docs.iter().map(|d| d.label).collect();
    let y_test: Vec<Label> = test_docs.iter().map(|d| d.label).collect();

    let (alpha, score) = sweep_alpha(&x_train, &y_train, &x_test, &y_test)?;
    println!("  best alpha {alpha:.1} (accuracy {score:.4})\n");
    Ok(AnyModel::NaiveBayes(MultinomialNb::new(alpha)))
}

/// Predict one split and print its report plus the confusion matrix.
fn evaluate_split(
    pipeline: &FittedPipeline,
    docs: &[Document],
    name: &str,
    reporter: &dyn Reporter,
) -> Result<()> {
    if docs.is_empty() {
        return Ok(());
    }
    let texts: Vec<String> = docs.iter().map(|d| d.text.clone()).collect();
    let labels: Vec<Label> = docs.iter().map(|d| d.label).collect();
    let predictions = pipeline.predict_texts(&texts)?;

    println!("{name}:");
    println!("  accuracy {:.4}\n", accuracy(&labels, &predictions));
    println!("{}", classification_report(&labels, &predictions));
    reporter.confusion(&confusion_matrix(&labels, &predictions));
    Ok(())
}

/// Per-label top terms of the cleaned text, for the reporting collaborator.
fn report_frequent_terms(docs: &[Document], reporter: &dyn Reporter) {
    for &label in &Label::REPORT_ORDER {
        let cleaned: Vec<String> = docs
            .iter()
            .filter(|d| d.label == label)
            .map(|d| normalize(&d.text))
            .collect();
        if cleaned.is_empty() {
            continue;
        }
        let top = top_terms(cleaned.iter().map(|s| s.as_str()), 20);
        reporter.frequency_table(label, &top);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GradientBoosting, KnnClassifier, RandomForest};

    fn synthetic_corpus() -> Vec<Document> {
        let false_texts = [
            "Viral hoax claims vaccines contain secret microchips conspiracy",
            "Fabricated hoax story spreads debunked conspiracy about vaccines",
            "Conspiracy hoax fabricated claims debunked by doctors",
            "Debunked viral hoax spreads fabricated vaccine conspiracy",
            "Hoax conspiracy fabricated microchips claims spread online",
        ];
        let true_texts = [
            "Officials confirmed the verified report with accurate evidence",
            "Verified evidence confirmed by officials in accurate report",
            "Accurate report confirmed verified by government officials",
            "Officials release verified accurate evidence in confirmed report",
            "Confirmed verified evidence appears in accurate official report",
        ];
        let mut docs = Vec::new();
        for text in false_texts {
            docs.push(Document {
                text: text.to_string(),
                label: Label::False,
            });
        }
        for text in true_texts {
            docs.push(Document {
                text: text.to_string(),
                label: Label::True,
            });
        }
        docs
    }

    /// 8 training documents, one held-out document per class.
    fn train_test_split(docs: &[Document]) -> (Vec<Document>, Vec<Document>) {
        let train: Vec<Document> = docs[..4].iter().chain(&docs[5..9]).cloned().collect();
        let test = vec![docs[4].clone(), docs[9].clone()];
        (train, test)
    }

    fn assert_sanity_floor(model: AnyModel) {
        let docs = synthetic_corpus();
        let (train_docs, test_docs) = train_test_split(&docs);
        let pipeline = fit_pipeline(&train_docs, &Config::default().features, model).unwrap();

        let texts: Vec<String> = test_docs.iter().map(|d| d.text.clone()).collect();
        let predictions = pipeline.predict_texts(&texts).unwrap();
        let correct = predictions
            .iter()
            .zip(test_docs.iter())
            .filter(|(p, d)| **p == d.label)
            .count();
        assert!(correct >= 1, "predictions {predictions:?}");
    }

    #[test]
    fn naive_bayes_clears_the_sanity_floor() {
        assert_sanity_floor(AnyModel::NaiveBayes(MultinomialNb::new(0.1)));
    }

    #[test]
    fn knn_clears_the_sanity_floor() {
        assert_sanity_floor(AnyModel::Knn(KnnClassifier::new(3, 10, 2)));
    }

    #[test]
    fn forest_clears_the_sanity_floor() {
        assert_sanity_floor(AnyModel::Forest(RandomForest::new(40, Some(10), 2, 1, 42)));
    }

    #[test]
    fn boosting_clears_the_sanity_floor() {
        assert_sanity_floor(AnyModel::Boosting(GradientBoosting::new(15, 0.3, 2, 7)));
    }

    #[test]
    fn branch_row_counts_always_match_documents() {
        let docs = synthetic_corpus();
        let branches = build_branches(&docs);
        assert_eq!(branches.lexical.len(), docs.len());
        assert_eq!(branches.pos.len(), docs.len());
        assert_eq!(branches.semantic.len(), docs.len());
    }

    #[test]
    fn fused_pipeline_round_trips_through_persistence() {
        let docs = synthetic_corpus();
        let (train_docs, _) = train_test_split(&docs);
        let pipeline = fit_pipeline(
            &train_docs,
            &Config::default().features,
            AnyModel::NaiveBayes(MultinomialNb::new(0.1)),
        )
        .unwrap();

        // Vectorizer blobs restore to encoders that encode identically.
        let restored = TfidfVectorizer::restore(&pipeline.lexical.persist().unwrap()).unwrap();
        let branches = build_branches(&train_docs);
        assert_eq!(
            pipeline.lexical.transform(&branches.lexical).unwrap(),
            restored.transform(&branches.lexical).unwrap()
        );
    }
}
