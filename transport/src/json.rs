//! JSON-over-HTTP transport backed by `reqwest`.
//!
//! # Design
//! `JsonTransport` holds an immutable base URL, a shared `reqwest::Client`,
//! and a cancellation token. None of these are mutated by `get`, so one
//! transport can serve any number of concurrent calls without locking.
//!
//! The body is read in full before decoding so that a transfer failure is
//! reported as `Network` and a schema mismatch as `Decode`, never the other
//! way around. Status codes are not interpreted: a non-2xx response is logged
//! and its body decoded like any other.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::error::TransportError;
use crate::query::{self, QueryItem};
use crate::rest::Transport;

/// Query parameters whose values never reach the logs.
const SECRET_PARAMETERS: &[&str] = &["api_key"];

#[derive(Debug, Clone)]
pub struct JsonTransport {
    base_url: Url,
    client: reqwest::Client,
    cancel: CancellationToken,
}

impl JsonTransport {
    /// Create a transport with the default `reqwest` client settings.
    ///
    /// Fails with `TransportError::InvalidUrl` if `base_url` cannot be parsed
    /// or cannot carry a path.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a transport whose requests fail with `TransportError::Timeout`
    /// when they take longer than `timeout` end to end.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::Network)?;
        Self::with_client(base_url, client)
    }

    /// Create a transport sharing an existing `reqwest::Client`.
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Result<Self, TransportError> {
        Ok(Self {
            base_url: query::parse_base(base_url)?,
            client,
            cancel: CancellationToken::new(),
        })
    }

    /// Tie every request issued by this transport to `token`.
    ///
    /// Once the token is cancelled, pending and future calls complete with
    /// `TransportError::Cancelled`.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The URL a `get(path, parameters)` call would request.
    pub fn request_url(&self, path: &str, parameters: &[QueryItem]) -> Result<Url, TransportError> {
        query::resolve(&self.base_url, path, parameters)
    }

    async fn fetch(&self, url: Url) -> Result<Vec<u8>, TransportError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, url = %response.url(), "non-success status, decoding body anyway");
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl Transport for JsonTransport {
    async fn get<T>(&self, path: &str, parameters: &[QueryItem]) -> Result<T, TransportError>
    where
        T: DeserializeOwned + Send,
    {
        let url = self.request_url(path, parameters)?;
        debug!(url = %query::redacted(&url, SECRET_PARAMETERS), "GET");

        let body = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(TransportError::Cancelled),
            body = self.fetch(url) => body?,
        };

        debug!(bytes = body.len(), "response received");
        Ok(serde_json::from_slice(&body)?)
    }
}
