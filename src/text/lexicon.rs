//! Semantic-category lexicon.
//!
//! Scores a document against a fixed set of topical and affective
//! categories, each backed by a word list. The category enumeration is
//! order-stable: `analyze("")` yields every category with a zero count, and
//! `categories()` is derived from exactly that call. `expand` turns the raw
//! counts into pseudo-text (each category name repeated count times) so a
//! plain n-gram vectorizer can consume them.

use std::collections::HashMap;

/// Category table. Declaration order is the stable enumeration order.
const CATEGORIES: &[(&str, &[&str])] = &[
    ("government", &[
        "government", "senate", "congress", "parliament", "minister", "ministry", "federal",
        "state", "administration", "official", "officials", "governor", "mayor", "agency",
        "policy", "legislation", "regulation",
    ]),
    ("politics", &[
        "election", "vote", "voter", "voting", "campaign", "candidate", "party", "democrat",
        "republican", "liberal", "conservative", "president", "presidential", "political",
        "politician", "ballot", "poll",
    ]),
    ("law", &[
        "law", "court", "judge", "jury", "trial", "lawsuit", "legal", "illegal", "attorney",
        "lawyer", "justice", "verdict", "ruling", "constitution", "rights", "appeal",
    ]),
    ("crime", &[
        "crime", "criminal", "police", "arrest", "arrested", "theft", "fraud", "murder",
        "robbery", "assault", "investigation", "suspect", "prison", "jail", "sentence",
        "smuggling", "corruption",
    ]),
    ("violence", &[
        "violence", "violent", "attack", "attacked", "shooting", "shot", "riot", "bomb",
        "bombing", "explosion", "gun", "weapon", "killed", "killing", "victim", "wounded",
    ]),
    ("war", &[
        "war", "military", "army", "soldier", "troops", "battle", "invasion", "missile",
        "airstrike", "conflict", "ceasefire", "enemy", "defense", "nuclear", "navy",
    ]),
    ("terrorism", &[
        "terror", "terrorism", "terrorist", "extremist", "radical", "hostage", "insurgent",
        "militant", "jihadist", "plot",
    ]),
    ("health", &[
        "health", "hospital", "doctor", "nurse", "patient", "medical", "medicine", "clinic",
        "treatment", "surgery", "therapy", "symptom", "diagnosis", "healthcare",
    ]),
    ("disease", &[
        "disease", "virus", "viral", "infection", "infected", "epidemic", "pandemic",
        "outbreak", "vaccine", "vaccination", "immunity", "quarantine", "contagious", "flu",
        "cancer", "covid",
    ]),
    ("science", &[
        "science", "scientist", "scientific", "research", "researcher", "study", "studies",
        "experiment", "laboratory", "discovery", "evidence", "theory", "physics", "chemistry",
        "biology", "genetic",
    ]),
    ("technology", &[
        "technology", "computer", "software", "internet", "online", "digital", "website",
        "network", "data", "algorithm", "artificial", "robot", "smartphone", "app", "cyber",
        "hacker",
    ]),
    ("media", &[
        "media", "news", "newspaper", "journalist", "reporter", "press", "broadcast",
        "television", "radio", "headline", "article", "interview", "editor", "tabloid",
    ]),
    ("social_media", &[
        "facebook", "twitter", "instagram", "youtube", "tiktok", "whatsapp", "post", "posts",
        "share", "shared", "hashtag", "follower", "account", "platform",
    ]),
    ("economy", &[
        "economy", "economic", "market", "stock", "inflation", "recession", "unemployment",
        "growth", "trade", "tariff", "export", "import", "gdp", "budget", "deficit",
    ]),
    ("money", &[
        "money", "dollar", "euro", "cash", "payment", "salary", "income", "tax", "taxes",
        "debt", "loan", "bank", "banking", "fund", "donation", "million", "billion",
    ]),
    ("business", &[
        "business", "company", "corporation", "industry", "factory", "employer", "employee",
        "startup", "profit", "revenue", "investor", "shareholder", "merger", "brand",
    ]),
    ("religion", &[
        "religion", "religious", "church", "mosque", "temple", "priest", "pastor", "imam",
        "prayer", "faith", "god", "holy", "bible", "quran", "worship", "christian", "muslim",
    ]),
    ("family", &[
        "family", "mother", "father", "parent", "child", "children", "son", "daughter",
        "husband", "wife", "brother", "sister", "baby", "marriage", "wedding", "divorce",
    ]),
    ("education", &[
        "education", "school", "university", "college", "student", "teacher", "professor",
        "classroom", "curriculum", "exam", "degree", "scholarship", "tuition",
    ]),
    ("sports", &[
        "sport", "sports", "game", "match", "team", "player", "coach", "football", "soccer",
        "basketball", "baseball", "olympic", "championship", "tournament", "stadium", "goal",
    ]),
    ("weather", &[
        "weather", "storm", "hurricane", "tornado", "flood", "flooding", "drought",
        "earthquake", "wildfire", "rain", "snow", "temperature", "climate", "heatwave",
    ]),
    ("travel", &[
        "travel", "flight", "airline", "airport", "passenger", "tourist", "tourism", "border",
        "visa", "migrant", "migration", "refugee", "journey", "cruise",
    ]),
    ("food", &[
        "food", "meal", "restaurant", "meat", "vegetable", "fruit", "bread", "milk", "wine",
        "beer", "hunger", "famine", "farming", "harvest", "grocery",
    ]),
    ("death", &[
        "death", "dead", "die", "died", "dying", "funeral", "grave", "fatal", "casualty",
        "casualties", "mourning", "obituary", "corpse", "deceased",
    ]),
    ("fear", &[
        "fear", "afraid", "scared", "panic", "terrified", "alarm", "alarming", "threat",
        "threatening", "danger", "dangerous", "warning", "anxiety", "dread",
    ]),
    ("deception", &[
        "hoax", "fake", "false", "falsely", "lie", "lies", "lying", "liar", "misleading",
        "misinformation", "disinformation", "fabricated", "debunked", "rumor", "conspiracy",
        "scam", "propaganda",
    ]),
    ("trust", &[
        "true", "truth", "truthful", "accurate", "accuracy", "authentic", "verified",
        "confirmed", "credible", "reliable", "legitimate", "genuine", "factual", "proven",
    ]),
    ("positive_emotion", &[
        "happy", "happiness", "joy", "glad", "hope", "hopeful", "celebrate", "celebration",
        "success", "successful", "win", "winner", "praise", "proud", "relief",
    ]),
    ("negative_emotion", &[
        "angry", "anger", "outrage", "sad", "sadness", "grief", "hate", "hatred", "shame",
        "disgust", "despair", "furious", "upset", "bitter",
    ]),
];

/// Raw category counts for a document, in stable category order.
pub fn analyze(text: &str) -> Vec<(&'static str, usize)> {
    let mut counts: Vec<(&'static str, usize)> =
        CATEGORIES.iter().map(|(name, _)| (*name, 0)).collect();
    if text.is_empty() {
        return counts;
    }

    let index = word_index();
    let lowered = text.to_lowercase();
    for token in lowered
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
    {
        if let Some(cats) = index.get(token) {
            for &cat in cats {
                counts[cat].1 += 1;
            }
        }
    }
    counts
}

/// The fixed category enumeration, derived from the empty-string analysis.
pub fn categories() -> Vec<&'static str> {
    analyze("").into_iter().map(|(name, _)| name).collect()
}

/// Expand a document into category-name pseudo-text: each name repeated as
/// many times as its raw count, space-joined.
pub fn expand(text: &str) -> String {
    let mut out = Vec::new();
    for (name, count) in analyze(text) {
        for _ in 0..count {
            out.push(name);
        }
    }
    out.join(" ")
}

fn word_index() -> HashMap<&'static str, Vec<usize>> {
    let mut index: HashMap<&'static str, Vec<usize>> = HashMap::new();
    for (cat, (_, words)) in CATEGORIES.iter().enumerate() {
        for word in *words {
            index.entry(word).or_default().push(cat);
        }
    }
    index
}
