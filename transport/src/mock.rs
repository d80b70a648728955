//! In-memory transport for tests.
//!
//! # Design
//! The handler is stored behind a lock so it can be installed after the
//! transport has been shared (for example through an `Arc` handed to a
//! service). Every call is recorded before the handler runs, letting tests
//! assert on the request outside the handler closure.
//!
//! Decoding is always `serde_json`, the same as `JsonTransport`, so a body
//! that fails here fails the same way over the network.

use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::TransportError;
use crate::query::QueryItem;
use crate::rest::Transport;

type Handler = Box<dyn Fn(&str, &[QueryItem]) -> Result<String, TransportError> + Send + Sync>;

/// A `get` call observed by a `MockTransport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub path: String,
    pub parameters: Vec<QueryItem>,
}

impl RecordedRequest {
    /// True if `name=value` appears among the parameters, at any position.
    pub fn has(&self, name: &str, value: &str) -> bool {
        self.parameters
            .iter()
            .any(|p| p.name == name && p.value == value)
    }

    /// Value of the first parameter called `name`.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }
}

/// Returns a predefined JSON string instead of performing network I/O.
///
/// Calling `get` before a handler has been installed panics: it means the
/// test itself is misconfigured.
#[derive(Default)]
pub struct MockTransport {
    handler: RwLock<Option<Handler>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport that answers every call with `handler`.
    pub fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&str, &[QueryItem]) -> Result<String, TransportError> + Send + Sync + 'static,
    {
        let transport = Self::new();
        transport.set_handler(handler);
        transport
    }

    /// Create a transport that answers every call with the same body.
    pub fn returning(body: impl Into<String>) -> Self {
        let body = body.into();
        Self::with_handler(move |_, _| Ok(body.clone()))
    }

    /// Replace the handler used by subsequent calls.
    pub fn set_handler<F>(&self, handler: F)
    where
        F: Fn(&str, &[QueryItem]) -> Result<String, TransportError> + Send + Sync + 'static,
    {
        *self.handler.write().unwrap() = Some(Box::new(handler));
    }

    /// All calls made so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The most recent call, if any.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    fn respond(&self, path: &str, parameters: &[QueryItem]) -> Result<String, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            path: path.to_string(),
            parameters: parameters.to_vec(),
        });

        let handler = self.handler.read().unwrap();
        let Some(handler) = handler.as_ref() else {
            panic!("MockTransport::get called for {path:?} without a handler");
        };
        handler(path, parameters)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get<T>(&self, path: &str, parameters: &[QueryItem]) -> Result<T, TransportError>
    where
        T: DeserializeOwned + Send,
    {
        let body = self.respond(path, parameters)?;
        Ok(serde_json::from_str(&body)?)
    }
}
