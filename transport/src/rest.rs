//! The transport capability.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::TransportError;
use crate::query::QueryItem;

/// Perform an HTTP `GET` against `path` and decode the JSON body as `T`.
///
/// Implementations produce exactly one value or one error per call and never
/// mutate `parameters`. Calls are independent: there is no ordering between
/// concurrent calls and no connection reuse guarantee.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get<T>(&self, path: &str, parameters: &[QueryItem]) -> Result<T, TransportError>
    where
        T: DeserializeOwned + Send;

    /// `get` with no query parameters.
    async fn get_path<T>(&self, path: &str) -> Result<T, TransportError>
    where
        T: DeserializeOwned + Send,
    {
        self.get(path, &[]).await
    }
}

#[async_trait]
impl<X> Transport for Arc<X>
where
    X: Transport,
{
    async fn get<T>(&self, path: &str, parameters: &[QueryItem]) -> Result<T, TransportError>
    where
        T: DeserializeOwned + Send,
    {
        (**self).get(path, parameters).await
    }
}
