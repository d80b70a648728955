//! What the browser shows for one search.
//!
//! A `Listing` is either a page of photos or an empty result carrying the
//! reason. Every service failure lands in the latter; nothing here panics.

use std::fmt;

use flickr_core::{FlickrPhotoSizesRequest, FlickrPhotosRequest, FlickrService, SizeLabel};
use tracing::warn;
use url::Url;

const THUMBNAIL_LABELS: &[SizeLabel] = &[SizeLabel::LargeSquare, SizeLabel::Square];
const LARGE_LABELS: &[SizeLabel] = &[
    SizeLabel::Large,
    SizeLabel::Large1600,
    SizeLabel::Large2048,
    SizeLabel::Medium800,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: String,
    pub thumbnail: Option<Url>,
    pub large: Option<Url>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Photos {
        page: u32,
        pages: u32,
        entries: Vec<Entry>,
    },
    Empty {
        reason: String,
    },
}

impl Listing {
    pub fn is_empty(&self) -> bool {
        matches!(self, Listing::Empty { .. })
    }

    pub fn empty(reason: impl Into<String>) -> Self {
        Listing::Empty {
            reason: reason.into(),
        }
    }
}

/// Run the search and, if `with_sizes` is set, resolve each photo's
/// thumbnail and large image.
///
/// A failed size lookup leaves that entry without URLs rather than failing
/// the page.
pub async fn load(
    service: &dyn FlickrService,
    request: &FlickrPhotosRequest,
    with_sizes: bool,
) -> Listing {
    let photos = match service.get_photos(request).await {
        Ok(response) => response.photos,
        Err(err) => return Listing::empty(err.to_string()),
    };

    if photos.photo.is_empty() {
        return Listing::empty(format!("no photos on page {}", photos.page));
    }

    let mut entries = Vec::with_capacity(photos.photo.len());
    for photo in photos.photo {
        let mut entry = Entry {
            id: photo.id,
            thumbnail: None,
            large: None,
        };

        if with_sizes {
            match service
                .get_photo_sizes(&FlickrPhotoSizesRequest::new(entry.id.as_str()))
                .await
            {
                Ok(sizes) => {
                    entry.thumbnail = sizes.largest_with(THUMBNAIL_LABELS).map(|s| s.source.clone());
                    entry.large = sizes.largest_with(LARGE_LABELS).map(|s| s.source.clone());
                }
                Err(err) => warn!(id = %entry.id, %err, "size lookup failed"),
            }
        }

        entries.push(entry);
    }

    Listing::Photos {
        page: photos.page,
        pages: photos.pages,
        entries,
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listing::Empty { reason } => write!(f, "no results: {reason}"),
            Listing::Photos {
                page,
                pages,
                entries,
            } => {
                writeln!(f, "page {page} of {pages}")?;
                for entry in entries {
                    write!(f, "{}", entry.id)?;
                    if let Some(thumbnail) = &entry.thumbnail {
                        write!(f, "  thumb {thumbnail}")?;
                    }
                    if let Some(large) = &entry.large {
                        write!(f, "  large {large}")?;
                    }
                    writeln!(f)?;
                }
                Ok(())
            }
        }
    }
}
