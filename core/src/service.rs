//! The Flickr service and its REST implementation.
//!
//! # Design
//! `FlickrRestService` is pure parameter assembly plus delegation. It holds an
//! immutable `FlickrConfig` and a `Transport`, both injected at construction,
//! and issues exactly one `GET` per operation against the root of the base
//! URL (the base URL *is* the endpoint). Shared parameters come first, then
//! `method`, then the per-call parameters.

use async_trait::async_trait;
use rest_transport::{JsonTransport, QueryItem, Transport, TransportError};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::FlickrConfig;
use crate::error::ServiceError;
use crate::reply::Reply;
use crate::types::{
    FlickrPhotoSizesRequest, FlickrPhotoSizesResponse, FlickrPhotosRequest, FlickrPhotosResponse,
};

pub const SEARCH_METHOD: &str = "flickr.photos.search";
pub const GET_SIZES_METHOD: &str = "flickr.photos.getSizes";

/// API for interacting with the Flickr web service.
///
/// Consumers depend on this trait only, never on a transport or encoding.
#[async_trait]
pub trait FlickrService: Send + Sync {
    /// Photos matching `request`. Unauthenticated calls only see public
    /// photos, and Flickr returns at most the first 4,000 results of a query.
    async fn get_photos(
        &self,
        request: &FlickrPhotosRequest,
    ) -> Result<FlickrPhotosResponse, ServiceError>;

    /// The available sizes for one photo.
    async fn get_photo_sizes(
        &self,
        request: &FlickrPhotoSizesRequest,
    ) -> Result<FlickrPhotoSizesResponse, ServiceError>;
}

pub struct FlickrRestService<T> {
    config: FlickrConfig,
    transport: T,
}

impl<T> FlickrRestService<T>
where
    T: Transport,
{
    pub fn new(config: FlickrConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &FlickrConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Parameters for `flickr.photos.search`.
    pub fn photos_parameters(&self, request: &FlickrPhotosRequest) -> Vec<QueryItem> {
        self.parameters(
            SEARCH_METHOD,
            [
                QueryItem::new("tags", request.tags_parameter()),
                QueryItem::new("page", request.page.to_string()),
            ],
        )
    }

    /// Parameters for `flickr.photos.getSizes`.
    pub fn photo_sizes_parameters(&self, request: &FlickrPhotoSizesRequest) -> Vec<QueryItem> {
        self.parameters(
            GET_SIZES_METHOD,
            [QueryItem::new("photo_id", request.id.as_str())],
        )
    }

    fn parameters(
        &self,
        method: &str,
        specific: impl IntoIterator<Item = QueryItem>,
    ) -> Vec<QueryItem> {
        let mut parameters = vec![
            QueryItem::new("format", "json"),
            QueryItem::new("nojsoncallback", "1"),
            QueryItem::new("api_key", self.config.api_key.as_str()),
            QueryItem::new("method", method),
        ];
        parameters.extend(specific);
        parameters
    }

    async fn call<R>(&self, parameters: Vec<QueryItem>) -> Result<R, ServiceError>
    where
        R: DeserializeOwned + Send,
    {
        let reply: Reply<R> = self.transport.get("", &parameters).await?;
        Ok(reply.into_result()?)
    }
}

impl FlickrRestService<JsonTransport> {
    /// Production wiring: a `JsonTransport` built from `config`.
    pub fn connect(config: FlickrConfig) -> Result<Self, TransportError> {
        let transport = JsonTransport::with_timeout(&config.base_url, config.timeout)?;
        Ok(Self::new(config, transport))
    }
}

#[async_trait]
impl<T> FlickrService for FlickrRestService<T>
where
    T: Transport,
{
    async fn get_photos(
        &self,
        request: &FlickrPhotosRequest,
    ) -> Result<FlickrPhotosResponse, ServiceError> {
        debug!(tags = ?request.tags, page = request.page, "searching photos");
        self.call(self.photos_parameters(request)).await
    }

    async fn get_photo_sizes(
        &self,
        request: &FlickrPhotoSizesRequest,
    ) -> Result<FlickrPhotoSizesResponse, ServiceError> {
        debug!(id = %request.id, "fetching photo sizes");
        self.call(self.photo_sizes_parameters(request)).await
    }
}
