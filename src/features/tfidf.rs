//! TF-IDF vectorization with n-gram support.
//!
//! One vectorizer per feature branch (lexical, part-of-speech, semantic),
//! each fit once on training texts and reused. The fitted state (vocabulary
//! plus smoothed IDF weights) is a write-once artifact that serializes to
//! an opaque JSON blob, so inference never needs the training corpus.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{Result, VeracityError};
use crate::features::sparse::CsrMatrix;
use crate::text::normalize::stopword_set;

/// N-gram TF-IDF vectorizer.
///
/// Terms are whitespace tokens, lowercased, optionally stopword-filtered,
/// expanded into all n-grams within the configured range. Weighting is raw
/// term frequency times smoothed inverse document frequency, with L2 row
/// normalization. Vocabulary comes only from `fit`; unseen terms at
/// transform time contribute nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    ngram_min: usize,
    ngram_max: usize,
    strip_stopwords: bool,
    state: Option<FittedState>,
}

/// Write-once fit artifact: term → column index and per-column IDF.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FittedState {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Unfitted vectorizer over the inclusive n-gram range `min_n..=max_n`.
    pub fn new(min_n: usize, max_n: usize, strip_stopwords: bool) -> Self {
        assert!(min_n >= 1 && min_n <= max_n, "invalid n-gram range");
        TfidfVectorizer {
            ngram_min: min_n,
            ngram_max: max_n,
            strip_stopwords,
            state: None,
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    /// Vocabulary size of the fitted state.
    pub fn n_features(&self) -> Result<usize> {
        Ok(self.fitted()?.idf.len())
    }

    /// Learn vocabulary and IDF weights from the training texts.
    pub fn fit(&mut self, texts: &[String]) -> Result<()> {
        if texts.is_empty() {
            return Err(VeracityError::EmptyTrainingSet);
        }

        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        for text in texts {
            let seen: HashSet<String> = self.analyze(text).into_iter().collect();
            for term in seen {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        // Alphabetical column order keeps fitted artifacts reproducible
        // across runs on the same corpus.
        let mut terms: Vec<String> = doc_freq.keys().cloned().collect();
        terms.sort();

        let n_docs = texts.len() as f64;
        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (idx, term) in terms.into_iter().enumerate() {
            let df = doc_freq[&term] as f64;
            idf.push(((1.0 + n_docs) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert(term, idx);
        }

        self.state = Some(FittedState { vocabulary, idf });
        Ok(())
    }

    /// Encode texts as an L2-normalized TF-IDF matrix, one row per text.
    ///
    /// Fails with `NotFitted` before `fit`. Out-of-vocabulary terms are
    /// silently ignored; a text with no known terms becomes an all-zero row.
    pub fn transform(&self, texts: &[String]) -> Result<CsrMatrix> {
        let state = self.fitted()?;
        let mut matrix = CsrMatrix::with_cols(state.idf.len());

        for text in texts {
            let mut counts: HashMap<usize, f64> = HashMap::new();
            for term in self.analyze(text) {
                if let Some(&idx) = state.vocabulary.get(&term) {
                    *counts.entry(idx).or_insert(0.0) += 1.0;
                }
            }

            let mut entries: Vec<(usize, f64)> = counts
                .into_iter()
                .map(|(idx, tf)| (idx, tf * state.idf[idx]))
                .collect();
            let norm = entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, v) in &mut entries {
                    *v /= norm;
                }
            }
            matrix.push_row(&entries);
        }
        Ok(matrix)
    }

    /// Serialize the fitted vectorizer to an opaque blob.
    pub fn persist(&self) -> Result<Vec<u8>> {
        self.fitted()?;
        serde_json::to_vec(self).map_err(|e| VeracityError::Persistence(e.to_string()))
    }

    /// Restore a vectorizer previously written by [`persist`](Self::persist).
    pub fn restore(blob: &[u8]) -> Result<Self> {
        let vectorizer: TfidfVectorizer =
            serde_json::from_slice(blob).map_err(|e| VeracityError::Persistence(e.to_string()))?;
        if !vectorizer.is_fitted() {
            return Err(VeracityError::Persistence(
                "blob holds an unfitted vectorizer".into(),
            ));
        }
        Ok(vectorizer)
    }

    /// Write the fitted vectorizer to a JSON file.
    pub fn save(&self, path: &str) -> Result<()> {
        let blob = self.persist()?;
        std::fs::write(path, blob).map_err(|e| VeracityError::Persistence(e.to_string()))
    }

    /// Load a fitted vectorizer from a JSON file.
    pub fn load(path: &str) -> Result<Self> {
        let blob =
            std::fs::read(path).map_err(|e| VeracityError::Persistence(e.to_string()))?;
        Self::restore(&blob)
    }

    /// Final term sequence for one text: filtered tokens plus their n-grams.
    fn analyze(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = if self.strip_stopwords {
            let stops = stopword_set();
            lowered
                .split_whitespace()
                .filter(|w| !stops.contains(w))
                .collect()
        } else {
            lowered.split_whitespace().collect()
        };

        let mut terms = Vec::new();
        for n in self.ngram_min..=self.ngram_max {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }

    fn fitted(&self) -> Result<&FittedState> {
        self.state.as_ref().ok_or(VeracityError::NotFitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<String> {
        vec![
            "senate passed vaccine bill".to_string(),
            "vaccine hoax spread online".to_string(),
            "senate debated online rumor".to_string(),
        ]
    }

    #[test]
    fn transform_before_fit_is_not_fitted() {
        let v = TfidfVectorizer::new(1, 2, false);
        let err = v.transform(&corpus()).unwrap_err();
        assert!(matches!(err, VeracityError::NotFitted));
    }

    #[test]
    fn fit_on_empty_corpus_is_rejected() {
        let mut v = TfidfVectorizer::new(1, 1, false);
        let err = v.fit(&[]).unwrap_err();
        assert!(matches!(err, VeracityError::EmptyTrainingSet));
    }

    #[test]
    fn rows_match_inputs_and_are_l2_normalized() {
        let mut v = TfidfVectorizer::new(1, 1, false);
        v.fit(&corpus()).unwrap();
        let m = v.transform(&corpus()).unwrap();
        assert_eq!(m.rows(), 3);
        for i in 0..m.rows() {
            let (_, vals) = m.row(i);
            let norm = vals.iter().map(|v| v * v).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn unseen_terms_are_ignored() {
        let mut v = TfidfVectorizer::new(1, 1, false);
        v.fit(&corpus()).unwrap();
        let m = v
            .transform(&["completely unknown words".to_string()])
            .unwrap();
        assert_eq!(m.rows(), 1);
        assert_eq!(m.nnz(), 0);
    }

    #[test]
    fn ngram_range_produces_phrases() {
        let mut v = TfidfVectorizer::new(1, 3, false);
        v.fit(&corpus()).unwrap();
        let n = v.n_features().unwrap();
        // 3 docs x 4 tokens: 12 distinct unigrams is impossible (repeats),
        // but bigrams and trigrams push the count past the unigram total.
        let mut uni = TfidfVectorizer::new(1, 1, false);
        uni.fit(&corpus()).unwrap();
        assert!(n > uni.n_features().unwrap());
    }

    #[test]
    fn vectorizer_stopword_filter_applies() {
        let mut v = TfidfVectorizer::new(1, 1, true);
        v.fit(&["the senate and the house".to_string()]).unwrap();
        assert_eq!(v.n_features().unwrap(), 2); // senate, house
    }

    #[test]
    fn persist_restore_round_trip_matches_exactly() {
        let mut v = TfidfVectorizer::new(1, 2, false);
        v.fit(&corpus()).unwrap();
        let direct = v.transform(&corpus()).unwrap();

        let restored = TfidfVectorizer::restore(&v.persist().unwrap()).unwrap();
        let replayed = restored.transform(&corpus()).unwrap();
        assert_eq!(direct, replayed);
    }

    #[test]
    fn persist_unfitted_is_not_fitted() {
        let v = TfidfVectorizer::new(1, 1, false);
        assert!(matches!(v.persist().unwrap_err(), VeracityError::NotFitted));
    }

    #[test]
    fn restore_rejects_corrupt_blob() {
        let err = TfidfVectorizer::restore(b"not json at all").unwrap_err();
        assert!(matches!(err, VeracityError::Persistence(_)));
    }
}
