//! Export error types.

use htics_core::DecodeError;
use htics_firestore::FetchError;
use thiserror::Error;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that end an export run.
///
/// Every variant is terminal: the run stops and no calendar is written.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The query could not be sent or answered.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The response body is not a valid `runQuery` result.
    #[error("failed to parse query response: {0}")]
    Parse(#[from] serde_json::Error),

    /// A document could not be decoded into an event.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Writing the calendar failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
