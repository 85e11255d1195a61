//! Part-of-speech annotation.
//!
//! Stand-in for an external tagger: emits one Universal POS symbol per raw
//! token, space-joined, so the syntactic encoder can treat the sequence as
//! opaque text. Closed classes come from lookup tables, open classes from
//! suffix heuristics; unknown words default to NOUN.

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "some", "any", "all",
    "both", "either", "neither", "no", "another", "such",
];

const ADPOSITIONS: &[&str] = &[
    "in", "on", "at", "of", "for", "with", "without", "by", "from", "into", "onto", "about",
    "against", "between", "among", "through", "during", "before", "after", "above", "below",
    "under", "over", "near", "off", "out", "up", "down", "across", "behind", "beyond", "within",
    "along", "around", "despite", "toward", "towards", "upon", "per",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "myself", "we", "us", "our", "ours", "ourselves", "you", "your",
    "yours", "yourself", "he", "him", "his", "himself", "she", "her", "hers", "herself", "it",
    "its", "itself", "they", "them", "their", "theirs", "themselves", "who", "whom", "whose",
    "what", "which", "someone", "anyone", "everyone", "nobody", "something", "anything",
    "everything", "nothing",
];

const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "shall", "should", "may", "might", "can", "could", "must",
];

const COORDINATORS: &[&str] = &["and", "or", "but", "nor", "yet", "so"];

const SUBORDINATORS: &[&str] = &[
    "because", "although", "though", "while", "whereas", "if", "unless", "since", "until",
    "whether", "once", "when", "where", "why", "how", "as", "than",
];

const PARTICLES: &[&str] = &["to", "not", "n't"];

const INTERJECTIONS: &[&str] = &["oh", "wow", "hey", "yes", "yeah", "ouch", "hmm", "alas"];

/// Tag raw text, returning one symbol per token joined by single spaces.
pub fn tag(text: &str) -> String {
    tokenize(text)
        .iter()
        .map(|tok| tag_token(tok))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split raw text into word, number and punctuation tokens.
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if c.is_alphanumeric() || c == '\'' || c == '’' {
            current.push(c);
        } else {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            if !c.is_whitespace() {
                tokens.push(c.to_string());
            }
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn tag_token(token: &str) -> &'static str {
    let mut chars = token.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return "X",
    };

    if token.chars().all(|c| c.is_ascii_punctuation() || c == '’') {
        return if matches!(first, '$' | '%' | '+' | '=' | '#' | '€' | '£') {
            "SYM"
        } else {
            "PUNCT"
        };
    }
    if token.chars().all(|c| c.is_ascii_digit()) {
        return "NUM";
    }

    let lower = token.to_lowercase();
    let word = lower.trim_matches(|c| c == '\'' || c == '’');
    if DETERMINERS.contains(&word) {
        return "DET";
    }
    if PRONOUNS.contains(&word) {
        return "PRON";
    }
    if AUXILIARIES.contains(&word) {
        return "AUX";
    }
    if ADPOSITIONS.contains(&word) {
        return "ADP";
    }
    if COORDINATORS.contains(&word) {
        return "CCONJ";
    }
    if SUBORDINATORS.contains(&word) {
        return "SCONJ";
    }
    if PARTICLES.contains(&word) {
        return "PART";
    }
    if INTERJECTIONS.contains(&word) {
        return "INTJ";
    }

    if first.is_uppercase() {
        return "PROPN";
    }
    if word.ends_with("ly") {
        return "ADV";
    }
    if word.ends_with("ing") || word.ends_with("ed") || word.ends_with("ize")
        || word.ends_with("ise")
    {
        return "VERB";
    }
    if word.ends_with("ous") || word.ends_with("ful") || word.ends_with("ive")
        || word.ends_with("less") || word.ends_with("able") || word.ends_with("ible")
        || word.ends_with("ial") || word.ends_with("ical") || word.ends_with("ish")
    {
        return "ADJ";
    }

    "NOUN"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_tag_per_token() {
        let tags = tag("The senate passed a controversial law.");
        assert_eq!(tags, "DET NOUN VERB DET ADJ NOUN PUNCT");
    }

    #[test]
    fn closed_classes_beat_capitalization() {
        assert_eq!(tag("The They And"), "DET PRON CCONJ");
    }

    #[test]
    fn numbers_symbols_and_proper_nouns() {
        assert_eq!(tag("NASA quickly spending $ 42000"), "PROPN ADV VERB SYM NUM");
    }

    #[test]
    fn empty_input_yields_empty_sequence() {
        assert_eq!(tag(""), "");
    }

    #[test]
    fn deterministic() {
        let text = "Officials said the report was partially false.";
        assert_eq!(tag(text), tag(text));
    }
}
