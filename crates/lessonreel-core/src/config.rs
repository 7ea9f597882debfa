//! Client configuration

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

/// Default backend base URL
pub const DEFAULT_API_URL: &str = "https://videoplayer-backend-fieg.onrender.com/api/";

/// Environment variable overriding the backend base URL
pub const API_URL_ENV: &str = "LESSONREEL_API_URL";

/// Environment variable overriding the request timeout
pub const TIMEOUT_ENV: &str = "LESSONREEL_TIMEOUT_MS";

/// Backend client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL all API routes are resolved against
    pub base_url: Url,
    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            request_timeout_ms: 30_000,
            user_agent: format!("lessonreel/{}", crate::VERSION),
        }
    }
}

impl ClientConfig {
    /// Default configuration with `LESSONREEL_*` environment overrides applied
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(API_URL_ENV) {
            config = config.with_base_url(&url)?;
        }

        if let Ok(timeout) = std::env::var(TIMEOUT_ENV) {
            config.request_timeout_ms = timeout.trim().parse().map_err(|_| {
                Error::InvalidConfig(format!("{} must be a number of milliseconds, got {:?}", TIMEOUT_ENV, timeout))
            })?;
        }

        Ok(config)
    }

    /// Replace the base URL.
    ///
    /// A trailing slash is added when missing so relative joins keep the
    /// last path segment (`.../api` + `lessons` must give `.../api/lessons`).
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let mut url = Url::parse(base_url)
            .map_err(|e| Error::InvalidConfig(format!("invalid API URL {:?}: {}", base_url, e)))?;

        if url.cannot_be_a_base() {
            return Err(Error::InvalidConfig(format!("API URL {:?} cannot be a base", base_url)));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        self.base_url = url;
        Ok(self)
    }

    /// Set the request timeout
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }
}
