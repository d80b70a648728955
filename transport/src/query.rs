//! Query parameters and request URL resolution.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::TransportError;

/// One `name=value` pair of a request query string.
///
/// Order is preserved exactly as assembled and repeated names are legal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryItem {
    pub name: String,
    pub value: String,
}

impl QueryItem {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl<N, V> From<(N, V)> for QueryItem
where
    N: Into<String>,
    V: Into<String>,
{
    fn from((name, value): (N, V)) -> Self {
        QueryItem::new(name, value)
    }
}

/// Parse a base URL, rejecting anything that cannot carry a path.
pub fn parse_base(base_url: &str) -> Result<Url, TransportError> {
    let url = Url::parse(base_url).map_err(|e| TransportError::InvalidUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(TransportError::InvalidUrl {
            url: base_url.to_string(),
            reason: "URL cannot be a base".to_string(),
        });
    }

    Ok(url)
}

/// Append `path` to `base` and attach `parameters` as the query string.
///
/// Each `/`-separated piece of `path` becomes one percent-encoded segment.
/// A trailing empty segment of the base is replaced, so `.../rest/` joined
/// with `photos` yields `.../rest/photos`. An empty `path` leaves the base
/// path untouched.
pub fn resolve(base: &Url, path: &str, parameters: &[QueryItem]) -> Result<Url, TransportError> {
    let mut url = base.clone();

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if !segments.is_empty() {
        url.path_segments_mut()
            .map_err(|()| TransportError::InvalidUrl {
                url: base.to_string(),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
    }

    if !parameters.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(parameters.iter().map(|p| (p.name.as_str(), p.value.as_str())));
    }

    Ok(url)
}

/// Render `url` for logs with the values of `secret` parameters masked.
pub(crate) fn redacted(url: &Url, secret: &[&str]) -> String {
    if url.query().is_none() {
        return url.to_string();
    }

    let mut shown = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if secret.contains(&k.as_ref()) {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    shown.query_pairs_mut().clear().extend_pairs(pairs);
    shown.to_string()
}
