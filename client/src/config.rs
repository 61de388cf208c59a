//! Client configuration with environment overrides.

use std::time::Duration;

/// Where the API lives and how long the search box stays quiet before a
/// reload. Defaults match local development against the mock server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub debounce: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            debounce: Duration::from_millis(300),
        }
    }
}

impl ClientConfig {
    /// Build a config from `TODO_API_URL` and `TODO_DEBOUNCE_MS`, falling
    /// back to defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let base_url = std::env::var("TODO_API_URL").unwrap_or(defaults.base_url);
        let debounce = std::env::var("TODO_DEBOUNCE_MS")
            .ok()
            .and_then(|ms| ms.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.debounce);
        Self { base_url, debounce }
    }
}
