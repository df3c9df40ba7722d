//! deCONZ gateway configuration.

use std::time::Duration;

use serde::Deserialize;

/// Where the gateway lives and how long to wait for it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeconzConfig {
    /// Base URL of the gateway, without the `/api` suffix.
    pub base_url: String,
    /// API key registered on the gateway.
    pub api_key: String,
    /// Upper bound for any request, in milliseconds.
    pub request_timeout_ms: u64,
    /// Upper bound for single-resource reads, in milliseconds.
    pub read_timeout_ms: u64,
}

impl Default for DeconzConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            api_key: String::new(),
            request_timeout_ms: 5_000,
            read_timeout_ms: 2_000,
        }
    }
}

impl DeconzConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// `{base_url}/api/{api_key}`, the root every resource path hangs off.
    #[must_use]
    pub fn api_root(&self) -> String {
        format!("{}/api/{}", self.base_url.trim_end_matches('/'), self.api_key)
    }
}
