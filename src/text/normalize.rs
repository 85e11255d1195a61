//! Canonical text cleaning.
//!
//! `normalize` turns a raw article into the lowercase, punctuation-free,
//! stopword-free, lemmatized string the lexical encoder consumes. It is
//! deterministic and pure; empty input yields an empty string.

use std::collections::HashSet;

use regex::Regex;

use super::lemma::lemmatize;

/// Symbols removed on top of ASCII punctuation. Raw articles carry curly
/// quotes and stray markup characters that survive the first strip.
const EXTRA_SYMBOLS: &[char] = &[
    '-', '(', ')', '"', '#', '/', '@', '’', '‘', '“', '”', ';', ':', '<', '>', '{', '}', '`',
    '+', '=', '~', '|', '.', '!', '?', ',',
];

/// English stopword set, shared with the vectorizer-level filter.
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "ain", "all", "am", "an", "and", "any",
    "are", "aren", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "cannot", "could", "couldn", "d", "did", "didn", "do", "does",
    "doesn", "doing", "don", "down", "during", "each", "few", "for", "from", "further", "had",
    "hadn", "has", "hasn", "have", "haven", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "isn", "it", "its", "itself",
    "just", "ll", "m", "ma", "me", "might", "mightn", "more", "most", "must", "mustn", "my",
    "myself", "needn", "no", "nor", "not", "now", "o", "of", "off", "on", "once", "only", "or",
    "other", "our", "ours", "ourselves", "out", "over", "own", "re", "s", "same", "shan", "she",
    "should", "shouldn", "so", "some", "such", "t", "than", "that", "the", "their", "theirs",
    "them", "themselves", "then", "there", "these", "they", "this", "those", "through", "to",
    "too", "under", "until", "up", "ve", "very", "was", "wasn", "we", "were", "weren", "what",
    "when", "where", "which", "while", "who", "whom", "why", "will", "with", "won", "would",
    "wouldn", "y", "you", "your", "yours", "yourself", "yourselves",
];

/// Build the stopword lookup set.
pub fn stopword_set() -> HashSet<&'static str> {
    STOP_WORDS.iter().copied().collect()
}

/// Normalize raw article text into a cleaned token string.
///
/// Steps, in order: strip punctuation (ASCII set plus [`EXTRA_SYMBOLS`]),
/// lowercase and drop stopwords, strip any remaining non-letter characters,
/// then lemmatize the surviving tokens longer than two characters and rejoin
/// with single spaces.
pub fn normalize(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| !c.is_ascii_punctuation() && !EXTRA_SYMBOLS.contains(c))
        .collect();
    let lowered = stripped.to_lowercase();

    let stops = stopword_set();
    let kept: Vec<&str> = lowered
        .split_whitespace()
        .filter(|w| !stops.contains(w))
        .collect();
    let joined = kept.join(" ");

    // Unicode odds and ends (digits, emoji, combining marks) fall out here.
    let letters = Regex::new(r"[^a-z\s]").expect("letter filter pattern");
    let letters_only = letters.replace_all(&joined, "");

    letters_only
        .split_whitespace()
        .filter(|w| w.len() > 2)
        .map(lemmatize)
        .collect::<Vec<_>>()
        .join(" ")
}
