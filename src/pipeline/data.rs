//! Dataset records, labels and loading.

use std::fmt;
use std::fs::File;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VeracityError};

/// Truthfulness rating of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    True,
    False,
    PartiallyFalse,
    Other,
}

impl Label {
    /// Fixed order used for confusion matrices and reports.
    pub const REPORT_ORDER: [Label; 4] =
        [Label::False, Label::True, Label::PartiallyFalse, Label::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::True => "TRUE",
            Label::False => "FALSE",
            Label::PartiallyFalse => "PARTIALLY FALSE",
            Label::Other => "OTHER",
        }
    }

    /// Position in [`Label::REPORT_ORDER`].
    pub fn index(&self) -> usize {
        Label::REPORT_ORDER
            .iter()
            .position(|l| l == self)
            .expect("label present in report order")
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = VeracityError;

    /// Case-insensitive rating parse, normalizing to the uppercase forms.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "true" => Ok(Label::True),
            "false" => Ok(Label::False),
            "partially false" => Ok(Label::PartiallyFalse),
            "other" => Ok(Label::Other),
            unknown => Err(VeracityError::Dataset(format!(
                "unknown rating {unknown:?}"
            ))),
        }
    }
}

/// Raw dataset row as it appears in the tab-separated files.
#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    pub title: String,
    pub text: String,
    #[serde(rename = "our rating")]
    pub rating: String,
}

/// An ingested article: combined text plus its parsed label. Read-only
/// downstream of ingestion.
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub label: Label,
}

/// Load one tab-separated dataset.
pub fn load_articles(path: &str) -> Result<Vec<Article>> {
    let file =
        File::open(path).map_err(|e| VeracityError::Dataset(format!("{path}: {e}")))?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(file);

    let mut articles = Vec::new();
    for row in reader.deserialize() {
        let article: Article =
            row.map_err(|e| VeracityError::Dataset(format!("{path}: {e}")))?;
        articles.push(article);
    }
    Ok(articles)
}

/// Merge the two source datasets into one. Rows of the secondary set whose
/// raw rating is exactly `"false"` are dropped before the merge.
pub fn merge_datasets(primary: Vec<Article>, secondary: Vec<Article>) -> Vec<Article> {
    let mut merged = primary;
    merged.extend(secondary.into_iter().filter(|a| a.rating != "false"));
    merged
}

/// Turn raw articles into documents: title and body are combined into one
/// text field and ratings parsed into labels.
pub fn documents(articles: &[Article]) -> Result<Vec<Document>> {
    articles
        .iter()
        .map(|a| {
            Ok(Document {
                text: format!("{} {}", a.title, a.text),
                label: a.rating.parse()?,
            })
        })
        .collect()
}

/// Seeded shuffle-and-split into train and test sets.
pub fn split_documents(
    docs: &[Document],
    train_ratio: f64,
    seed: u64,
) -> (Vec<Document>, Vec<Document>) {
    let mut shuffled = docs.to_vec();
    let mut rng = StdRng::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);

    let split = (shuffled.len() as f64 * train_ratio) as usize;
    let test = shuffled.split_off(split);
    (shuffled, test)
}

/// Label counts in report order, for the reporting collaborator.
pub fn label_distribution(docs: &[Document]) -> Vec<(Label, usize)> {
    Label::REPORT_ORDER
        .iter()
        .map(|&label| (label, docs.iter().filter(|d| d.label == label).count()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, text: &str, rating: &str) -> Article {
        Article {
            title: title.to_string(),
            text: text.to_string(),
            rating: rating.to_string(),
        }
    }

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!("TRUE".parse::<Label>().unwrap(), Label::True);
        assert_eq!("Partially False".parse::<Label>().unwrap(), Label::PartiallyFalse);
        assert_eq!("other".parse::<Label>().unwrap(), Label::Other);
        assert!("mostly true".parse::<Label>().is_err());
    }

    #[test]
    fn label_display_is_uppercase() {
        assert_eq!(Label::PartiallyFalse.to_string(), "PARTIALLY FALSE");
        assert_eq!(Label::False.index(), 0);
        assert_eq!(Label::Other.index(), 3);
    }

    #[test]
    fn merge_drops_false_rows_of_secondary_set_only() {
        let primary = vec![article("a", "x", "false"), article("b", "y", "true")];
        let secondary = vec![article("c", "z", "false"), article("d", "w", "other")];
        let merged = merge_datasets(primary, secondary);
        let titles: Vec<&str> = merged.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["a", "b", "d"]);
    }

    #[test]
    fn documents_combine_title_and_body() {
        let docs = documents(&[article("Big news", "body here", "TRUE")]).unwrap();
        assert_eq!(docs[0].text, "Big news body here");
        assert_eq!(docs[0].label, Label::True);
    }

    #[test]
    fn split_is_seeded_and_exhaustive() {
        let docs: Vec<Document> = (0..10)
            .map(|i| Document {
                text: format!("doc {i}"),
                label: Label::True,
            })
            .collect();
        let (train_a, test_a) = split_documents(&docs, 0.8, 42);
        let (train_b, test_b) = split_documents(&docs, 0.8, 42);
        assert_eq!(train_a.len(), 8);
        assert_eq!(test_a.len(), 2);
        assert_eq!(
            train_a.iter().map(|d| &d.text).collect::<Vec<_>>(),
            train_b.iter().map(|d| &d.text).collect::<Vec<_>>()
        );
        assert_eq!(test_a[0].text, test_b[0].text);
        assert_eq!(test_b.len(), 2);
    }

    #[test]
    fn distribution_counts_by_report_order() {
        let docs = vec![
            Document { text: String::new(), label: Label::True },
            Document { text: String::new(), label: Label::False },
            Document { text: String::new(), label: Label::False },
        ];
        let dist = label_distribution(&docs);
        assert_eq!(dist[0], (Label::False, 2));
        assert_eq!(dist[1], (Label::True, 1));
        assert_eq!(dist[2], (Label::PartiallyFalse, 0));
    }
}
