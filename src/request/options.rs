//! Per-call request overrides.

use std::collections::{BTreeMap, HashMap};

/// Per-call overrides for URL parts, headers and diagnostics.
///
/// Every field is optional; anything left unset falls back to the client's
/// [`RestConfig`](crate::config::RestConfig).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Replaces the configured base URL.
    pub url: Option<String>,
    /// Replaces the configured base path.
    pub path: Option<String>,
    /// Appended as an extra path segment.
    pub resource_id: Option<String>,
    /// Appended verbatim, with no separator inserted.
    pub suffix: Option<String>,
    /// Replaces the query component. One value per key.
    pub query: Option<BTreeMap<String, String>>,
    /// Headers layered over the configured defaults.
    pub headers: HashMap<String, String>,
    /// Overrides the configured debug flag.
    pub debug: Option<bool>,
}

impl RequestOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the URL override.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the path override.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the resource id.
    pub fn resource_id(mut self, id: impl Into<String>) -> Self {
        self.resource_id = Some(id.into());
        self
    }

    /// Sets the suffix.
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Adds a query parameter, replacing any previous value for `name`.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replaces the whole query mapping.
    pub fn query_params<K, V, I>(mut self, params: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.query = Some(
            params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Adds a per-call header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds several per-call headers.
    pub fn headers<K, V, I>(mut self, headers: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Overrides the debug flag for this call.
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = Some(enabled);
        self
    }
}
