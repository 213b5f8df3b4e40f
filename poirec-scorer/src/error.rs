//! Error types raised while ranking candidates.

use poirec_core::{DimensionMismatch, RecordError, WireError};
use thiserror::Error;

/// Errors that abort a ranking run.
///
/// Invalid business records are not errors; they are logged and skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankingError {
    /// A reference vector is not shaped like the candidate vectors.
    #[error("reference {label:?} has {actual} dimensions but candidates have {expected}")]
    ReferenceDimension {
        /// Label of the offending reference vector.
        label: String,
        /// Dimension produced by the category schema.
        expected: usize,
        /// Dimension of the reference vector.
        actual: usize,
    },
    /// The similarity measure was handed vectors of different lengths.
    #[error(transparent)]
    Dimension(#[from] DimensionMismatch),
    /// A group key could not be decoded.
    #[error("failed to decode group key {key:?}")]
    GroupKey {
        /// Raw key text.
        key: String,
        /// Source error from the wire codec.
        #[source]
        source: WireError,
    },
    /// A worker thread ranking one group panicked.
    #[error("worker ranking group {key:?} panicked")]
    WorkerPanicked {
        /// Key of the group whose worker failed.
        key: String,
    },
}

/// Reasons a record produced no pipeline pairs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// The record failed validation.
    #[error(transparent)]
    Record(#[from] RecordError),
    /// The candidate could not be encoded.
    #[error(transparent)]
    Wire(#[from] WireError),
}
