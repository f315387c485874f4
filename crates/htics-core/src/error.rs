//! Decoding errors.

use std::num::ParseIntError;

use thiserror::Error;

use crate::time::TimestampError;

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// What was wrong with a decoded field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeCause {
    /// A required timestamp field is absent.
    #[error("required timestamp is missing")]
    MissingTimestamp,

    /// A timestamp field does not hold a valid `YYYY-MM-DDTHH:MM:SSZ` value.
    #[error("malformed timestamp: {0}")]
    MalformedTimestamp(#[from] TimestampError),

    /// A map or array was found where a scalar was expected.
    #[error("expected {expected}, found {found}")]
    ShapeMismatch {
        expected: &'static str,
        found: String,
    },

    /// An integer field does not hold a valid integer.
    #[error("malformed integer: {0}")]
    MalformedInteger(#[from] ParseIntError),
}

/// A field of a document could not be decoded into an event record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot decode field `{field}` of document `{document}` (value {raw_value:?}): {cause}")]
pub struct DecodeError {
    /// Resource name of the offending document.
    pub document: String,
    /// Dotted path of the offending field.
    pub field: String,
    /// The raw offending value.
    pub raw_value: String,
    /// What was wrong with it.
    #[source]
    pub cause: DecodeCause,
}

impl DecodeError {
    /// Creates a decode error.
    pub fn new(
        document: impl Into<String>,
        field: impl Into<String>,
        raw_value: impl Into<String>,
        cause: impl Into<DecodeCause>,
    ) -> Self {
        Self {
            document: document.into(),
            field: field.into(),
            raw_value: raw_value.into(),
            cause: cause.into(),
        }
    }
}
