//! Client construction-time settings.

use std::time::Duration;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings supplied when an [`crate::ApiClient`] is constructed.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL requests are composed against.
    pub base_url: String,
    /// Default timeout bounding every request; per-call overrides win.
    pub timeout: Duration,
    /// Headers attached to every request; per-call headers override by key.
    pub default_headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        }
    }
}

impl ClientConfig {
    /// Creates settings for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Sets the default timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a default header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }
}
