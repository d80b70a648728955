//! Verify both service operations against JSON test vectors in `test-vectors/`.
//!
//! Each vector file lists requests, the query parameters the service must
//! send, a simulated response body, and the expected outcome. Parameters are
//! checked by inclusion, not position. Results are compared as decoded
//! values, so field order in the vectors does not matter.

use std::sync::Arc;

use flickr_core::{
    FlickrConfig, FlickrError, FlickrPhotoSizesRequest, FlickrPhotoSizesResponse,
    FlickrPhotosRequest, FlickrPhotosResponse, FlickrRestService, FlickrService, ServiceError,
};
use rest_transport::{MockTransport, QueryItem, RecordedRequest};
use serde_json::Value;

fn load(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap()
}

fn service(vectors: &Value, case: &Value) -> (Arc<MockTransport>, FlickrRestService<Arc<MockTransport>>) {
    let body = case["simulated_response"].as_str().unwrap().to_string();
    let transport = Arc::new(MockTransport::returning(body));
    let key = vectors["api_key"].as_str().unwrap();
    let service = FlickrRestService::new(FlickrConfig::new(key), Arc::clone(&transport));
    (transport, service)
}

fn expected_parameters(case: &Value) -> Vec<QueryItem> {
    case["expected_parameters"]
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let pair = pair.as_array().unwrap();
            QueryItem::new(pair[0].as_str().unwrap(), pair[1].as_str().unwrap())
        })
        .collect()
}

fn check_parameters(name: &str, vectors: &Value, case: &Value, sent: &RecordedRequest) {
    assert_eq!(sent.path, "", "{name}: path");
    assert!(
        sent.has("method", vectors["method"].as_str().unwrap()),
        "{name}: method"
    );
    for expected in expected_parameters(case) {
        assert!(
            sent.parameters.contains(&expected),
            "{name}: missing {}={:?} in {:?}",
            expected.name,
            expected.value,
            sent.parameters
        );
    }
}

/// Compare a service outcome with the vector's `expected_*` entry.
fn check_outcome<T>(name: &str, case: &Value, outcome: Result<T, ServiceError>)
where
    T: serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    if case["expected_decode_error"].as_bool() == Some(true) {
        match outcome {
            Err(ServiceError::Transport(e)) if e.is_decode() => {}
            other => panic!("{name}: expected decode error, got {other:?}"),
        }
    } else if let Some(expected) = case.get("expected_error") {
        let expected: FlickrError = serde_json::from_value(expected.clone()).unwrap();
        match outcome {
            Err(ServiceError::Flickr(e)) => assert_eq!(e, expected, "{name}: error"),
            other => panic!("{name}: expected Flickr error, got {other:?}"),
        }
    } else {
        let expected: T = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(outcome.unwrap(), expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn photos_search_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/photos_search.json"));

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let request: FlickrPhotosRequest = serde_json::from_value(case["request"].clone()).unwrap();
        let (transport, service) = service(&vectors, case);

        let outcome = service.get_photos(&request).await;

        let sent = transport.last_request().unwrap();
        check_parameters(name, &vectors, case, &sent);
        check_outcome::<FlickrPhotosResponse>(name, case, outcome);
    }
}

// ---------------------------------------------------------------------------
// Sizes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn photo_sizes_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/photo_sizes.json"));

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let request: FlickrPhotoSizesRequest =
            serde_json::from_value(case["request"].clone()).unwrap();
        let (transport, service) = service(&vectors, case);

        let outcome = service.get_photo_sizes(&request).await;

        let sent = transport.last_request().unwrap();
        check_parameters(name, &vectors, case, &sent);
        check_outcome::<FlickrPhotoSizesResponse>(name, case, outcome);
    }
}
