//! Text-side collaborators: normalization, part-of-speech tagging and the
//! semantic-category lexicon.
//!
//! Each produces plain text that downstream encoders treat as opaque input:
//! [`normalize`] yields the cleaned token string, [`tagger::tag`] the
//! space-joined tag sequence, and [`lexicon::expand`] the category-name
//! pseudo-text.

pub mod lemma;
pub mod lexicon;
pub mod normalize;
pub mod tagger;

pub use normalize::normalize;
