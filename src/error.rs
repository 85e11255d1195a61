//! Error taxonomy shared by the feature and model layers.
//!
//! All variants are recoverable by the caller: retry with corrected input,
//! re-fit, or pick a different back end. Nothing here aborts the pipeline.

use thiserror::Error;

/// Errors produced by encoders, the fuser and classifier back ends.
#[derive(Debug, Error)]
pub enum VeracityError {
    /// An operation needed fitted state and none was present.
    #[error("not fitted: call fit before transform/predict")]
    NotFitted,

    /// Zero rows were passed to a fit call.
    #[error("empty training set: fit requires at least one row")]
    EmptyTrainingSet,

    /// Column counts disagree between fit-time and call-time inputs, or
    /// between a fused matrix and its label vector.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A value outside the back end's supported domain, e.g. negative
    /// features passed to the multinomial model.
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    /// A fitted artifact could not be written, read or decoded.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// A dataset row could not be read or carried an unknown rating.
    #[error("dataset error: {0}")]
    Dataset(String),
}

pub type Result<T> = std::result::Result<T, VeracityError>;
