//! Service configuration.

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

/// The public Flickr REST endpoint.
pub const FLICKR_REST_URL: &str = "https://api.flickr.com/services/rest/";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlickrConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl FlickrConfig {
    /// Configuration for the public endpoint with the default timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: FLICKR_REST_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `FLICKR_API_KEY`, `FLICKR_BASE_URL`, and `FLICKR_TIMEOUT_SECS`,
    /// loading a `.env` file first if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Like `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("FLICKR_API_KEY")
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let mut config = FlickrConfig::new(api_key);

        if let Some(base_url) = lookup("FLICKR_BASE_URL") {
            config.base_url = base_url;
        }

        if let Some(secs) = lookup("FLICKR_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(secs.clone()))?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_the_key_is_set() {
        let config = FlickrConfig::from_lookup(lookup(&[("FLICKR_API_KEY", "abc")])).unwrap();
        assert_eq!(config, FlickrConfig::new("abc"));
        assert_eq!(config.base_url, FLICKR_REST_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn overrides_are_read() {
        let config = FlickrConfig::from_lookup(lookup(&[
            ("FLICKR_API_KEY", "abc"),
            ("FLICKR_BASE_URL", "http://127.0.0.1:3000/services/rest/"),
            ("FLICKR_TIMEOUT_SECS", " 5 "),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:3000/services/rest/");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn missing_or_empty_key_is_an_error() {
        assert_eq!(
            FlickrConfig::from_lookup(lookup(&[])),
            Err(ConfigError::MissingApiKey)
        );
        assert_eq!(
            FlickrConfig::from_lookup(lookup(&[("FLICKR_API_KEY", "")])),
            Err(ConfigError::MissingApiKey)
        );
    }

    #[test]
    fn bad_timeout_is_an_error() {
        let err = FlickrConfig::from_lookup(lookup(&[
            ("FLICKR_API_KEY", "abc"),
            ("FLICKR_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidTimeout("soon".to_string()));
    }
}
