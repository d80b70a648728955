//! Error types for REST transports.
//!
//! # Design
//! `Network` wraps the underlying `reqwest` failure one-to-one. `Timeout` and
//! `Cancelled` are split out because callers usually react to them
//! differently from a refused connection. `Decode` is reserved for a body
//! that arrived but does not match the requested type.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    /// The base URL or the resolved request URL is unusable.
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Connecting, sending, or reading the response failed.
    #[error("network failure: {0}")]
    Network(#[source] reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The request was abandoned before a response arrived.
    #[error("request cancelled")]
    Cancelled,

    /// The response body is not JSON of the expected shape.
    #[error("response body does not match the expected format: {0}")]
    Decode(#[from] serde_json::Error),

    /// Any other failure, typically raised by a mock handler.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    pub fn is_decode(&self) -> bool {
        matches!(self, TransportError::Decode(_))
    }

    /// True for failures that originate below the decode step.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            TransportError::Network(_) | TransportError::Timeout | TransportError::Cancelled
        )
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Network(value)
        }
    }
}
