//! Error types shared by the board engine and the document codec.

use thiserror::Error;

/// Errors raised by the core.
///
/// Ordinary user interaction (an empty gesture, blank text, undo with no history)
/// never produces one of these; those cases are absorbed as no-ops.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Malformed document: {0}")]
    MalformedDocument(String),
}

/// Result type for core operations.
pub type BoardResult<T> = Result<T, BoardError>;
