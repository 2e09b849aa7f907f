//! Configuration module for the REST client.
//!
//! A [`RestConfig`] is fixed once the client is built; calls only ever read it.

use std::collections::HashMap;
use std::time::Duration;

/// Default `Content-Type` header value.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Default `Accept` header value.
pub const DEFAULT_ACCEPT: &str = "application/json; charset=utf-8";

/// Default request timeout used by the built-in transport (60 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Returns the default header mapping applied to every request.
pub fn default_headers() -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert("Content-Type".to_string(), DEFAULT_CONTENT_TYPE.to_string());
    headers.insert("Accept".to_string(), DEFAULT_ACCEPT.to_string());
    headers
}

/// Configuration for the REST client.
#[derive(Clone, PartialEq, Eq)]
pub struct RestConfig {
    /// Base URL every request starts from.
    pub base_url: String,
    /// Path appended to the base URL.
    pub base_path: String,
    /// Headers sent with every request.
    pub default_headers: HashMap<String, String>,
    /// Emit request/response diagnostics.
    pub debug: bool,
}

impl RestConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> RestConfigBuilder {
        RestConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `REST_CLIENT_BASE_URL` (optional): Base URL
    /// - `REST_CLIENT_BASE_PATH` (optional): Base path
    /// - `REST_CLIENT_DEBUG` (optional): `1`, `true`, `yes` or `on` enables diagnostics
    pub fn from_env() -> Self {
        let mut builder = RestConfigBuilder::new();

        if let Ok(base_url) = std::env::var("REST_CLIENT_BASE_URL") {
            builder = builder.base_url(base_url);
        }

        if let Ok(base_path) = std::env::var("REST_CLIENT_BASE_PATH") {
            builder = builder.base_path(base_path);
        }

        if let Ok(debug) = std::env::var("REST_CLIENT_DEBUG") {
            if let Some(enabled) = parse_flag(&debug) {
                builder = builder.debug(enabled);
            }
        }

        builder.build()
    }
}

impl Default for RestConfig {
    fn default() -> Self {
        RestConfigBuilder::new().build()
    }
}

impl std::fmt::Debug for RestConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headers: HashMap<&str, &str> = self
            .default_headers
            .iter()
            .map(|(k, v)| {
                let v = if is_sensitive_header(k) {
                    "[REDACTED]"
                } else {
                    v.as_str()
                };
                (k.as_str(), v)
            })
            .collect();

        f.debug_struct("RestConfig")
            .field("base_url", &self.base_url)
            .field("base_path", &self.base_path)
            .field("default_headers", &headers)
            .field("debug", &self.debug)
            .finish()
    }
}

/// Builder for `RestConfig`.
#[derive(Debug, Clone)]
pub struct RestConfigBuilder {
    base_url: String,
    base_path: String,
    headers: HashMap<String, String>,
    debug: bool,
}

impl RestConfigBuilder {
    /// Creates a new configuration builder seeded with the default headers.
    pub fn new() -> Self {
        Self {
            base_url: String::new(),
            base_path: String::new(),
            headers: default_headers(),
            debug: false,
        }
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the base path.
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Adds or replaces a default header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Replaces the whole default header mapping.
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Enables or disables diagnostics.
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> RestConfig {
        RestConfig {
            base_url: self.base_url,
            base_path: self.base_path,
            default_headers: self.headers,
            debug: self.debug,
        }
    }
}

impl Default for RestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads the built-in transport timeout from `REST_CLIENT_TIMEOUT` (seconds).
pub fn timeout_from_env() -> Option<Duration> {
    std::env::var("REST_CLIENT_TIMEOUT")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub(crate) fn is_sensitive_header(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    name == "authorization"
        || name == "proxy-authorization"
        || name == "cookie"
        || name.contains("key")
        || name.contains("token")
}
