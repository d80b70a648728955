//! End-to-end tests against the mock Flickr server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `FlickrRestService`
//! over a real `JsonTransport`, so URL building, query encoding, decoding,
//! and the `stat: fail` envelope are all exercised over HTTP.

use std::time::Duration;

use flickr_core::{
    FlickrConfig, FlickrPhotoSizesRequest, FlickrPhotosRequest, FlickrRestService, FlickrService,
    ServiceError, SizeLabel,
};
use rest_transport::{JsonTransport, TransportError};
use tokio::net::TcpListener;

const KEY: &str = "integration-key";

async fn start_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { mock_server::run(listener, KEY).await.unwrap() });
    format!("http://{addr}{}", mock_server::REST_PATH)
}

async fn service() -> FlickrRestService<JsonTransport> {
    let config = FlickrConfig::new(KEY)
        .with_base_url(start_server().await)
        .with_timeout(Duration::from_secs(5));
    FlickrRestService::<JsonTransport>::connect(config).unwrap()
}

#[tokio::test]
async fn search_then_fetch_sizes() {
    let service = service().await;

    let photos = service
        .get_photos(&FlickrPhotosRequest::with_tags(["kittens", "puppies"]))
        .await
        .unwrap()
        .photos;
    assert_eq!(photos.page, 1);
    assert_eq!(photos.pages, 1);
    assert_eq!(photos.photo.len(), 7);

    let sizes = service
        .get_photo_sizes(&FlickrPhotoSizesRequest::new(photos.photo[0].id.clone()))
        .await
        .unwrap();
    let large = sizes.find(SizeLabel::Large).unwrap();
    assert_eq!((large.width, large.height), (1024, 768));
    assert_eq!(
        large.source.as_str(),
        "https://live.staticflickr.com/65535/1001_b.jpg"
    );
    assert!(sizes.find(SizeLabel::LargeSquare).is_some());
}

#[tokio::test]
async fn unknown_labels_survive_a_real_round_trip() {
    let sizes = service()
        .await
        .get_photo_sizes(&FlickrPhotoSizesRequest::new("1009"))
        .await
        .unwrap();

    assert_eq!(sizes.sizes.size.len(), 4);
    assert_eq!(sizes.sizes.size[3].label, None);
    assert_eq!(sizes.sizes.size[3].width, 8000);
}

#[tokio::test]
async fn requested_page_is_sent() {
    let photos = service()
        .await
        .get_photos(&FlickrPhotosRequest::with_tags(["kittens"]).page(2))
        .await
        .unwrap()
        .photos;

    // Everything fits on the first page, so page two is empty.
    assert_eq!(photos.page, 2);
    assert!(photos.photo.is_empty());
}

#[tokio::test]
async fn flickr_failures_surface_as_flickr_errors() {
    let service = service().await;

    let err = service
        .get_photo_sizes(&FlickrPhotoSizesRequest::new("404"))
        .await
        .unwrap_err();
    assert_eq!(err.flickr_code(), Some(1));

    let err = service
        .get_photos(&FlickrPhotosRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.flickr_code(), Some(3));
}

#[tokio::test]
async fn wrong_key_is_rejected_by_the_server() {
    let config = FlickrConfig::new("wrong").with_base_url(start_server().await);
    let service = FlickrRestService::<JsonTransport>::connect(config).unwrap();

    let err = service
        .get_photos(&FlickrPhotosRequest::with_tags(["kittens"]))
        .await
        .unwrap_err();
    match err {
        ServiceError::Flickr(e) => {
            assert_eq!(e.code, 100);
            assert_eq!(e.message, "Invalid API Key (Key has invalid format)");
        }
        other => panic!("expected a Flickr error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = FlickrConfig::new(KEY).with_base_url(format!("http://{addr}/services/rest/"));
    let service = FlickrRestService::<JsonTransport>::connect(config).unwrap();

    let err = service
        .get_photos(&FlickrPhotosRequest::with_tags(["kittens"]))
        .await
        .unwrap_err();
    assert!(
        matches!(err, ServiceError::Transport(TransportError::Network(_))),
        "got {err:?}"
    );
}
