//! In-process stand-in for the Flickr REST endpoint.
//!
//! Serves `GET /services/rest/` from an in-memory catalogue and answers the
//! way Flickr does: HTTP 200 with either the method payload or a
//! `{"stat":"fail","code":…,"message":…}` envelope.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;

pub const REST_PATH: &str = "/services/rest/";

const DEFAULT_PER_PAGE: usize = 100;
const MAX_PER_PAGE: usize = 500;

#[derive(Clone, Debug, Serialize)]
pub struct SizeEntry {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub source: String,
    pub url: String,
}

#[derive(Clone, Debug)]
pub struct CatalogPhoto {
    pub id: String,
    pub tags: Vec<String>,
    pub sizes: Vec<SizeEntry>,
}

impl CatalogPhoto {
    /// A photo with the usual square, large, and original renditions.
    pub fn new(id: &str, tags: &[&str]) -> Self {
        let size = |label: &str, suffix: &str, width, height| SizeEntry {
            label: label.to_string(),
            width,
            height,
            source: format!("https://live.staticflickr.com/65535/{id}_{suffix}.jpg"),
            url: format!("https://www.flickr.com/photos/mock/{id}/sizes/{suffix}/"),
        };

        Self {
            id: id.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            sizes: vec![
                size("Large Square", "q", 150, 150),
                size("Large", "b", 1024, 768),
                size("Original", "o", 4032, 3024),
            ],
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    photos: Vec<CatalogPhoto>,
}

impl Catalog {
    pub fn new(photos: Vec<CatalogPhoto>) -> Self {
        Self { photos }
    }

    /// Five kittens, three puppies, one of them tagged with both.
    pub fn sample() -> Self {
        let mut panorama = CatalogPhoto::new("1009", &["puppies", "beach"]);
        panorama.sizes.push(SizeEntry {
            label: "Panorama".to_string(),
            width: 8000,
            height: 1000,
            source: "https://live.staticflickr.com/65535/1009_p.jpg".to_string(),
            url: "https://www.flickr.com/photos/mock/1009/sizes/p/".to_string(),
        });

        Self::new(vec![
            CatalogPhoto::new("1001", &["kittens"]),
            CatalogPhoto::new("1002", &["kittens", "sleeping"]),
            CatalogPhoto::new("1003", &["kittens", "puppies"]),
            CatalogPhoto::new("1004", &["kittens"]),
            CatalogPhoto::new("1005", &["kittens", "sleeping"]),
            CatalogPhoto::new("1008", &["puppies"]),
            panorama,
        ])
    }

    /// Photos carrying any wanted tag and none of the excluded ones.
    fn search(&self, wanted: &[&str], excluded: &[&str]) -> Vec<&CatalogPhoto> {
        self.photos
            .iter()
            .filter(|p| p.tags.iter().any(|t| wanted.contains(&t.as_str())))
            .filter(|p| !p.tags.iter().any(|t| excluded.contains(&t.as_str())))
            .collect()
    }

    fn find(&self, id: &str) -> Option<&CatalogPhoto> {
        self.photos.iter().find(|p| p.id == id)
    }
}

#[derive(Clone)]
struct AppState {
    api_key: Arc<str>,
    catalog: Arc<Catalog>,
}

/// Router over the sample catalogue accepting only `api_key`.
pub fn app(api_key: &str) -> Router {
    app_with_catalog(api_key, Catalog::sample())
}

pub fn app_with_catalog(api_key: &str, catalog: Catalog) -> Router {
    let state = AppState {
        api_key: Arc::from(api_key),
        catalog: Arc::new(catalog),
    };
    Router::new()
        .route(REST_PATH, get(rest))
        .with_state(state)
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

fn fail(code: u32, message: impl Into<String>) -> Json<Value> {
    Json(json!({ "stat": "fail", "code": code, "message": message.into() }))
}

fn param<'a>(query: &'a [(String, String)], name: &str) -> Option<&'a str> {
    query
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

async fn rest(
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> Json<Value> {
    let method = param(&query, "method").unwrap_or_default();
    debug!(method, "request");

    if param(&query, "api_key") != Some(&*state.api_key) {
        return fail(100, "Invalid API Key (Key has invalid format)");
    }

    let format = param(&query, "format").unwrap_or("rest");
    if format != "json" || param(&query, "nojsoncallback") != Some("1") {
        return fail(111, format!("Format \"{format}\" not found"));
    }

    match method {
        "flickr.photos.search" => search(&state.catalog, &query),
        "flickr.photos.getSizes" => get_sizes(&state.catalog, &query),
        other => fail(112, format!("Method \"{other}\" not found")),
    }
}

fn search(catalog: &Catalog, query: &[(String, String)]) -> Json<Value> {
    let tags: Vec<&str> = param(query, "tags")
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    let (excluded, wanted): (Vec<&str>, Vec<&str>) =
        tags.into_iter().partition(|t| t.starts_with('-'));
    let excluded: Vec<&str> = excluded.into_iter().map(|t| &t[1..]).collect();

    if wanted.is_empty() {
        return fail(
            3,
            "Parameterless searches have been disabled. Please use flickr.photos.getRecent instead.",
        );
    }

    let page: usize = param(query, "page")
        .and_then(|p| p.parse().ok())
        .filter(|p| *p > 0)
        .unwrap_or(1);
    let per_page: usize = param(query, "per_page")
        .and_then(|p| p.parse().ok())
        .filter(|p| *p > 0)
        .unwrap_or(DEFAULT_PER_PAGE)
        .min(MAX_PER_PAGE);

    let matches = catalog.search(&wanted, &excluded);
    let pages = matches.len().div_ceil(per_page);
    // Pages so far out that the offset overflows are simply empty.
    let offset = (page - 1).checked_mul(per_page).unwrap_or(usize::MAX);
    let photo: Vec<Value> = matches
        .iter()
        .skip(offset)
        .take(per_page)
        .map(|p| json!({ "id": p.id, "owner": "mock@N00", "title": p.tags.join(" ") }))
        .collect();

    Json(json!({
        "photos": {
            "page": page,
            "pages": pages,
            "perpage": per_page,
            "total": matches.len(),
            "photo": photo,
        },
        "stat": "ok",
    }))
}

fn get_sizes(catalog: &Catalog, query: &[(String, String)]) -> Json<Value> {
    let Some(photo) = param(query, "photo_id").and_then(|id| catalog.find(id)) else {
        return fail(1, "Photo not found");
    };

    Json(json!({
        "sizes": {
            "canblog": 0,
            "canprint": 0,
            "candownload": 1,
            "size": photo.sizes,
        },
        "stat": "ok",
    }))
}
