//! The `stat` envelope Flickr wraps around every JSON reply.
//!
//! Flickr answers failed calls with HTTP 200 and a body such as
//! `{"stat":"fail","code":100,"message":"Invalid API Key"}`. `Reply<T>`
//! recognizes that shape during decoding, so it still happens inside the
//! transport and a genuine schema mismatch remains a `Decode` error.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::FlickrError;

#[derive(Debug)]
pub(crate) enum Reply<T> {
    Ok(T),
    Fail(FlickrError),
}

impl<T> Reply<T> {
    pub(crate) fn into_result(self) -> Result<T, FlickrError> {
        match self {
            Reply::Ok(value) => Ok(value),
            Reply::Fail(err) => Err(err),
        }
    }
}

impl<'de, T> Deserialize<'de> for Reply<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;

        if value.get("stat").and_then(Value::as_str) == Some("fail") {
            return FlickrError::deserialize(value)
                .map(Reply::Fail)
                .map_err(D::Error::custom);
        }

        T::deserialize(value).map(Reply::Ok).map_err(D::Error::custom)
    }
}
