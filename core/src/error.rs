//! Error types for the Flickr service.
//!
//! # Design
//! Transport failures pass through `ServiceError::Transport` unchanged so
//! callers can still tell a dropped connection from a schema mismatch.
//! `FlickrError` is reserved for failures Flickr itself reports in a
//! `"stat": "fail"` envelope; the service adds no failure modes of its own.

use rest_transport::TransportError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A failure reported by the Flickr API, e.g. code 100 for an invalid key.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("flickr error {code}: {message}")]
pub struct FlickrError {
    pub code: i64,
    pub message: String,
}

/// Errors returned by `FlickrService` operations.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Flickr(#[from] FlickrError),
}

impl ServiceError {
    /// Flickr's error code, if the API reported the failure.
    pub fn flickr_code(&self) -> Option<i64> {
        match self {
            ServiceError::Flickr(e) => Some(e.code),
            ServiceError::Transport(_) => None,
        }
    }
}

/// Errors raised while assembling `FlickrConfig` from the environment.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("FLICKR_API_KEY is not set")]
    MissingApiKey,

    #[error("FLICKR_TIMEOUT_SECS must be a whole number of seconds, got {0:?}")]
    InvalidTimeout(String),
}
