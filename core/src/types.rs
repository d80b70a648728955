//! Request and response shapes for the Flickr REST methods.
//!
//! # Design
//! Response types mirror the Flickr JSON envelopes field for field. Unknown
//! fields are ignored and missing fields fail the decode, with one exception:
//! an unrecognized size label decodes as `None` instead of failing the whole
//! response, since Flickr adds new size names from time to time.
//!
//! See <https://www.flickr.com/services/api/flickr.photos.search.html> and
//! <https://www.flickr.com/services/api/flickr.photos.getSizes.html>.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

/// Criteria for `flickr.photos.search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlickrPhotosRequest {
    /// 1-based page of results.
    #[serde(default = "first_page")]
    pub page: u32,

    /// Photos with one or more of these tags are returned. A tag prefixed
    /// with `-` excludes matching photos.
    #[serde(default)]
    pub tags: Vec<String>,
}

fn first_page() -> u32 {
    1
}

impl Default for FlickrPhotosRequest {
    fn default() -> Self {
        Self {
            page: first_page(),
            tags: Vec::new(),
        }
    }
}

impl FlickrPhotosRequest {
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// The `tags` query value: tags joined with `,`, empty when there are none.
    pub fn tags_parameter(&self) -> String {
        self.tags.join(",")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlickrPhotosResponse {
    pub photos: Photos,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photos {
    pub page: u32,
    pub pages: u32,
    pub perpage: u32,
    pub photo: Vec<Photo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
}

/// Criteria for `flickr.photos.getSizes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlickrPhotoSizesRequest {
    /// Identifier of the photo to fetch sizes for.
    pub id: String,
}

impl FlickrPhotoSizesRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlickrPhotoSizesResponse {
    pub sizes: Sizes,
}

impl FlickrPhotoSizesResponse {
    /// First size carrying `label`.
    pub fn find(&self, label: SizeLabel) -> Option<&Size> {
        self.sizes.size.iter().find(|s| s.label == Some(label))
    }

    /// Widest size whose label is one of `labels`.
    pub fn largest_with(&self, labels: &[SizeLabel]) -> Option<&Size> {
        self.sizes
            .size
            .iter()
            .filter(|s| s.label.is_some_and(|l| labels.contains(&l)))
            .max_by_key(|s| s.width)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sizes {
    pub size: Vec<Size>,
}

/// One rendition of a photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    #[serde(default, deserialize_with = "lenient_label")]
    pub label: Option<SizeLabel>,
    pub width: u32,
    pub height: u32,
    pub source: Url,
    pub url: Url,
}

/// Decode a label string, mapping names we don't know to `None`.
fn lenient_label<'de, D>(deserializer: D) -> Result<Option<SizeLabel>, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(label.and_then(|l| l.parse().ok()))
}

macro_rules! size_labels {
    ($($variant:ident => $name:literal,)+) => {
        /// Size names documented by `flickr.photos.getSizes`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum SizeLabel {
            $($variant,)+
        }

        impl SizeLabel {
            pub const ALL: &'static [SizeLabel] = &[$(SizeLabel::$variant,)+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(SizeLabel::$variant => $name,)+
                }
            }
        }

        impl FromStr for SizeLabel {
            type Err = UnknownSizeLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(SizeLabel::$variant),)+
                    other => Err(UnknownSizeLabel(other.to_string())),
                }
            }
        }
    };
}

size_labels! {
    Square => "Square",
    LargeSquare => "Large Square",
    Thumbnail => "Thumbnail",
    Small => "Small",
    Small320 => "Small 320",
    Small400 => "Small 400",
    Medium => "Medium",
    Medium640 => "Medium 640",
    Medium800 => "Medium 800",
    Large => "Large",
    Large1600 => "Large 1600",
    Large2048 => "Large 2048",
    XLarge3K => "X-Large 3K",
    XLarge4K => "X-Large 4K",
    XLarge5K => "X-Large 5K",
    XLarge6K => "X-Large 6K",
    Original => "Original",
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown size label {0:?}")]
pub struct UnknownSizeLabel(pub String);

impl fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SizeLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SizeLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
