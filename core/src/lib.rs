//! Flickr photo search over a pluggable REST transport.
//!
//! # Overview
//! `FlickrRestService` maps two Flickr REST methods onto a
//! `rest_transport::Transport`:
//!
//! - `flickr.photos.search` via `FlickrService::get_photos`
//! - `flickr.photos.getSizes` via `FlickrService::get_photo_sizes`
//!
//! # Design
//! - The service owns no mutable state; configuration and transport are
//!   injected at construction.
//! - Consumers program against the object-safe `FlickrService` trait and
//!   never see the transport or the JSON encoding.
//! - Transport failures pass through unchanged; failures reported by Flickr
//!   surface as `FlickrError`.

pub mod config;
pub mod error;
mod reply;
pub mod service;
pub mod types;

pub use config::{FlickrConfig, FLICKR_REST_URL};
pub use error::{ConfigError, FlickrError, ServiceError};
pub use service::{FlickrRestService, FlickrService};
pub use types::{
    FlickrPhotoSizesRequest, FlickrPhotoSizesResponse, FlickrPhotosRequest, FlickrPhotosResponse,
    Photo, Photos, Size, SizeLabel, Sizes,
};
