//! Minimal single-verb REST transport.
//!
//! # Overview
//! A `Transport` performs one HTTP `GET` against a path relative to a base URL
//! and decodes the JSON body into a caller-chosen type. Two implementations
//! ship with the crate:
//!
//! - `JsonTransport` issues real requests through a shared `reqwest::Client`.
//! - `MockTransport` answers from a caller-supplied handler and performs no I/O.
//!
//! # Design
//! - Each call is a single-shot future: exactly one value or one error.
//! - Network failures and body-format mismatches are distinct
//!   `TransportError` variants so callers can tell them apart.
//! - There is no retry, caching, or status-code interpretation; callers decide
//!   what to do with a failure.

pub mod error;
pub mod json;
pub mod mock;
pub mod query;
pub mod rest;

pub use error::TransportError;
pub use json::JsonTransport;
pub use mock::{MockTransport, RecordedRequest};
pub use query::QueryItem;
pub use rest::Transport;
