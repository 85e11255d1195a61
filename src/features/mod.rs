//! Feature extraction: sparse encoding and fusion.
//!
//! Three [`tfidf::TfidfVectorizer`] instances (lexical, part-of-speech,
//! semantic) each map a text branch to a [`sparse::CsrMatrix`];
//! [`fuse::fuse`] weights and concatenates them into the combined matrix the
//! classifiers consume.

pub mod fuse;
pub mod sparse;
pub mod tfidf;

pub use fuse::{fuse, FusionWeights};
pub use sparse::CsrMatrix;
pub use tfidf::TfidfVectorizer;
