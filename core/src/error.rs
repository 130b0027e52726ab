//! Error types for the vet-atlas client.
//!
//! # Design
//! Transport failures (the network call itself, or a non-2xx status) are kept
//! apart from decoding failures so callers can tell "the server said no" from
//! "the server said something we cannot read". Validation errors are raised
//! before any I/O happens.

use thiserror::Error;

/// Failure of the HTTP round-trip.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced a response (connection refused, reset, DNS).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a status outside the 2xx range.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Errors returned by the data source, the REST decoder and the `Atlas` facade.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body could not be deserialized into the expected type.
    #[error("decoding failed: {0}")]
    Decode(String),

    /// A required value was missing or malformed before the request was sent.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The request payload could not be serialized to a JSON object.
    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// True when the server answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ApiError::Transport(TransportError::Status { status: 404, .. })
        )
    }

    /// HTTP status of a non-2xx response, if that is what failed.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport(TransportError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

impl From<figment::Error> for ApiError {
    fn from(err: figment::Error) -> Self {
        ApiError::Config(err.to_string())
    }
}
