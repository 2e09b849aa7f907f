//! Request construction.
//!
//! Turns client configuration plus per-call [`RequestOptions`] into an
//! [`HttpRequest`]: the URL is assembled by [`build_url`], headers are layered
//! by [`build_request`]. Body attachment happens in the client.

mod options;
mod url;

pub use self::options::RequestOptions;
pub use self::url::{assemble_url, build_url};

use http::Uri;
use std::collections::HashMap;

use crate::config::RestConfig;
use crate::transport::{HttpMethod, HttpRequest};

/// Layers per-call headers over the defaults. Per-call values win.
pub fn merge_headers(
    defaults: &HashMap<String, String>,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut headers = defaults.clone();
    headers.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    headers
}

/// Builds a body-less request for `url` with the merged header mapping.
pub fn build_request(
    config: &RestConfig,
    method: HttpMethod,
    url: Uri,
    headers: &HashMap<String, String>,
) -> HttpRequest {
    HttpRequest {
        method,
        url,
        headers: merge_headers(&config.default_headers, headers),
        body: None,
    }
}
