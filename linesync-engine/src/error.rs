//! Layered error types
//!
//! [`SyncError`] is the drift report of a synchronization run, [`SinkError`]
//! is raised at the edit boundary, and [`EngineError`] wraps both for callers.

use thiserror::Error;

/// Anchor line mismatch between source and target
///
/// Raised whenever a primary-script target line cannot be matched against the
/// current source line. Never recovered inside the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "sync error at source line {source_line}, target line {target_line}: {cause} \
     (source key: {source_key}, target key: {target_key})"
)]
pub struct SyncError {
    /// 1-based number of the current source line
    pub source_line: usize,
    /// 1-based number of the offending target line
    pub target_line: usize,
    /// Key of the current source line
    pub source_key: String,
    /// Key of the target line
    pub target_key: String,
    /// Human readable cause
    pub cause: String,
}

/// Failure to apply an edit to a document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// Index outside the document body
    #[error("index {index} is outside the document")]
    IndexOutOfRange {
        /// The rejected index
        index: i64,
    },

    /// Index inside a surrogate pair
    #[error("index {index} splits a character")]
    SplitsCharacter {
        /// The rejected index
        index: i64,
    },

    /// Empty or reversed range
    #[error("invalid range [{start},{end})")]
    InvalidRange {
        /// Range start
        start: i64,
        /// Range end
        end: i64,
    },

    /// Field mask names an unknown field
    #[error("unsupported field '{0}' in field mask")]
    UnsupportedField(String),

    /// Request refused by the document backend
    #[error("request rejected: {0}")]
    Rejected(String),
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Source and target drifted apart
    #[error(transparent)]
    Mismatch(#[from] SyncError),

    /// Deferred tab insertion failed
    #[error("failed to insert tabs for loop {loop_id}: {source}")]
    TabInsertion {
        /// Loop whose tabs were being inserted
        loop_id: usize,
        /// Underlying edit failure
        source: SinkError,
    },

    /// Resume point must be at least 1
    #[error("start loop must be >= 1, got {0}")]
    InvalidStartLoop(usize),

    /// Malformed document JSON
    #[error("document serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
