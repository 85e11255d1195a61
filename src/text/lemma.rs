//! Dictionary-style noun lemmatization.
//!
//! Reduces plural nouns to their base form with an exception table plus
//! ordered suffix rules. Verbs and adjectives pass through untouched, so the
//! mapping is idempotent: a produced lemma maps to itself.

/// Irregular plurals that no suffix rule recovers.
const IRREGULAR: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("mice", "mouse"),
    ("oxen", "ox"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("data", "datum"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("theses", "thesis"),
    ("hypotheses", "hypothesis"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("appendices", "appendix"),
    ("shoes", "shoe"),
    ("movies", "movie"),
    ("cookies", "cookie"),
];

/// Plural-looking words that are their own lemma.
const UNCHANGED: &[&str] = &["series", "species", "news", "means", "headquarters"];

/// Lemmatize a single lowercase token to its dictionary base form.
pub fn lemmatize(word: &str) -> String {
    if let Some((_, base)) = IRREGULAR.iter().find(|(w, _)| *w == word) {
        return (*base).to_string();
    }
    if word.len() <= 3 || UNCHANGED.contains(&word) || word.ends_with("ics") {
        return word.to_string();
    }

    let n = word.len();
    if word.ends_with("ies") && n > 4 {
        return format!("{}y", &word[..n - 3]);
    }
    if word.ends_with("men") && n > 5 {
        return format!("{}man", &word[..n - 3]);
    }
    if word.ends_with("zzes") {
        return word[..n - 3].to_string();
    }
    if word.ends_with("sses") || word.ends_with("ches") || word.ends_with("shes") {
        return word[..n - 2].to_string();
    }
    if word.ends_with("xes") || (word.ends_with("oes") && n > 4) {
        return word[..n - 2].to_string();
    }
    if word.ends_with("ves") && n > 4 {
        return format!("{}f", &word[..n - 3]);
    }
    if word.ends_with("ses") {
        return word[..n - 1].to_string();
    }
    if word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us") && !word.ends_with("is")
    {
        return word[..n - 1].to_string();
    }

    word.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_plurals() {
        assert_eq!(lemmatize("senators"), "senator");
        assert_eq!(lemmatize("reports"), "report");
        assert_eq!(lemmatize("studies"), "study");
        assert_eq!(lemmatize("boxes"), "box");
        assert_eq!(lemmatize("churches"), "church");
        assert_eq!(lemmatize("classes"), "class");
        assert_eq!(lemmatize("heroes"), "hero");
        assert_eq!(lemmatize("wolves"), "wolf");
        assert_eq!(lemmatize("houses"), "house");
    }

    #[test]
    fn irregular_plurals() {
        assert_eq!(lemmatize("children"), "child");
        assert_eq!(lemmatize("women"), "woman");
        assert_eq!(lemmatize("lives"), "life");
        assert_eq!(lemmatize("crises"), "crisis");
    }

    #[test]
    fn singulars_pass_through() {
        for w in ["virus", "crisis", "glass", "politics", "news", "economy"] {
            assert_eq!(lemmatize(w), w);
        }
    }

    #[test]
    fn idempotent_on_own_output() {
        for w in ["senators", "studies", "wolves", "children", "classes", "heroes"] {
            let once = lemmatize(w);
            assert_eq!(lemmatize(&once), once);
        }
    }
}
