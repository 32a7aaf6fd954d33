//! Error types for `miniattach`.
//!
//! Shape and vocabulary problems are fatal to the operation that hit them.
//! A [`Error::DecodeInfeasible`] only concerns the document being decoded;
//! callers that process many documents report it and move on.

use thiserror::Error;

/// Result type for `miniattach` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for `miniattach` operations.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Array lengths or dimensions disagree between a datapack
    /// and a value attached to it.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Datapacks with different label (or feature) vocabularies
    /// were combined.
    #[error("Vocabulary mismatch: {0}")]
    VocabularyMismatch(String),

    /// A reserved label is absent from the label vocabulary.
    #[error("Missing label: {0}")]
    MissingLabel(String),

    /// The decoder found no structure satisfying its constraints.
    #[error("Decoding is infeasible: {0}")]
    DecodeInfeasible(String),

    /// The two EDUs of a pairing belong to different groupings.
    #[error(
        "Grouping mismatch: {source_edu} is in group {source_group}, \
        but {target_edu} is in {target_group}"
    )]
    GroupingConflict {
        /// Identifier of the source EDU.
        source_edu: String,
        /// Grouping of the source EDU.
        source_group: String,
        /// Identifier of the target EDU.
        target_edu: String,
        /// Grouping of the target EDU.
        target_group: String,
    },

    /// A row index outside of the datapack.
    #[error("Index {index} is out of range for {len} rows")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of rows available.
        len: usize,
    },

    /// A decoder or labeller was given a datapack without scores.
    #[error("The datapack carries no graph; score it before decoding")]
    MissingGraph,

    /// A decoder needed a pairing that is not among the candidates.
    #[error("No candidate pairing from {source_edu} to {target_edu}")]
    MissingPairing {
        /// Identifier of the source EDU.
        source_edu: String,
        /// Identifier of the target EDU.
        target_edu: String,
    },

    /// Attachment and labelling data do not line up.
    #[error("Label scores do not match the attachment data: {0}")]
    LabelMismatch(String),

    /// A configuration value is out of its domain.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An operation that needs at least one item got none.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// A configuration could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(String),

    /// Writing a training log failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl Error {
    /// Create a shape mismatch error.
    pub fn shape_mismatch(msg: impl Into<String>) -> Self {
        Error::ShapeMismatch(msg.into())
    }

    /// Create a vocabulary mismatch error.
    pub fn vocabulary_mismatch(msg: impl Into<String>) -> Self {
        Error::VocabularyMismatch(msg.into())
    }

    /// Create a missing label error.
    pub fn missing_label(msg: impl Into<String>) -> Self {
        Error::MissingLabel(msg.into())
    }

    /// Create a decode failure.
    pub fn infeasible(msg: impl Into<String>) -> Self {
        Error::DecodeInfeasible(msg.into())
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }

    /// Returns `true` if the error only concerns the current document.
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, Error::DecodeInfeasible(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
