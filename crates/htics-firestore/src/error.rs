//! Error types for fetching query results.

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// High-level classification of a [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    /// The request could not be built or sent, or the connection failed.
    Transport,
    /// The server answered with something other than 200 OK.
    Status,
    /// The response body could not be read.
    BodyRead,
    /// The query body could not be encoded.
    Query,
    /// The endpoint configuration is unusable.
    Config,
}

impl FetchErrorKind {
    /// Returns a stable name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Status => "status",
            Self::BodyRead => "body_read",
            Self::Query => "query",
            Self::Config => "config",
        }
    }
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error that occurred while fetching documents.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be built.
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Request construction or network failure.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server did not answer 200 OK.
    #[error("status code is not 200 OK but {status} (from {url}): {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    /// The response body stream failed.
    #[error("failed to read response body: {0}")]
    BodyRead(#[source] reqwest::Error),

    /// The structured query could not be serialized.
    #[error("failed to encode query: {0}")]
    Query(#[from] serde_json::Error),

    /// The endpoint configuration does not form a valid URL.
    #[error("invalid endpoint configuration: {0}")]
    Config(String),
}

impl FetchError {
    /// Creates a transport error for `url`.
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }

    /// Creates a status error.
    pub fn status(url: impl Into<String>, status: StatusCode, body: impl Into<String>) -> Self {
        Self::Status {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Client(_) | Self::Transport { .. } => FetchErrorKind::Transport,
            Self::Status { .. } => FetchErrorKind::Status,
            Self::BodyRead(_) => FetchErrorKind::BodyRead,
            Self::Query(_) => FetchErrorKind::Query,
            Self::Config(_) => FetchErrorKind::Config,
        }
    }
}

/// A specialized Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;
