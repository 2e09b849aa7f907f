//! URL assembly.

use ::url::form_urlencoded;
use http::Uri;
use std::collections::BTreeMap;

use super::RequestOptions;
use crate::config::RestConfig;
use crate::errors::{RestError, RestResult};

/// Concatenates `base_url/path[/resource_id][suffix]`.
///
/// No normalisation is applied: slashes already present in the parts are kept
/// as they are, and the suffix is appended without a separator.
pub fn assemble_url(
    base_url: &str,
    path: &str,
    resource_id: Option<&str>,
    suffix: Option<&str>,
) -> String {
    let mut url = format!("{}/{}", base_url, path);
    if let Some(id) = resource_id {
        url.push('/');
        url.push_str(id);
    }
    if let Some(suffix) = suffix {
        url.push_str(suffix);
    }
    url
}

/// Builds the request URL from the configuration and per-call overrides.
///
/// Relative references such as `/users/1` are accepted; whether they can be
/// dispatched is up to the transport. Fragments are never sent on the wire,
/// so a URL containing `#` is rejected with [`RestError::InvalidUrl`].
pub fn build_url(config: &RestConfig, options: &RequestOptions) -> RestResult<Uri> {
    let raw = assemble_url(
        options.url.as_deref().unwrap_or(&config.base_url),
        options.path.as_deref().unwrap_or(&config.base_path),
        options.resource_id.as_deref(),
        options.suffix.as_deref(),
    );

    if raw.contains('#') {
        return Err(RestError::invalid_url(raw.as_str(), "fragments are not supported"));
    }

    let uri: Uri = raw
        .parse()
        .map_err(|e| RestError::invalid_url(raw.as_str(), e))?;

    match &options.query {
        Some(query) => with_query(uri, query),
        None => Ok(uri),
    }
}

/// Replaces the query component of `uri`. An empty mapping clears it.
fn with_query(uri: Uri, query: &BTreeMap<String, String>) -> RestResult<Uri> {
    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query)
        .finish();

    let mut parts = uri.into_parts();
    let path = parts
        .path_and_query
        .as_ref()
        .map(|pq| pq.path().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| "/".to_string());

    let path_and_query = if encoded.is_empty() {
        path
    } else {
        format!("{}?{}", path, encoded)
    };

    parts.path_and_query = Some(
        path_and_query
            .parse()
            .map_err(|e| RestError::invalid_url(path_and_query.as_str(), e))?,
    );

    Uri::from_parts(parts).map_err(|e| RestError::invalid_url(path_and_query.as_str(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn config() -> RestConfig {
        RestConfig::builder()
            .base_url("https://api.example.com")
            .base_path("users")
            .build()
    }

    #[test_case(RequestOptions::new(), "https://api.example.com/users" ; "defaults only")]
    #[test_case(
        RequestOptions::new().resource_id("42"),
        "https://api.example.com/users/42";
        "resource id"
    )]
    #[test_case(
        RequestOptions::new().suffix(".json"),
        "https://api.example.com/users.json";
        "suffix without separator"
    )]
    #[test_case(
        RequestOptions::new().resource_id("42").suffix("/history"),
        "https://api.example.com/users/42/history";
        "resource id then suffix"
    )]
    #[test_case(
        RequestOptions::new().url("http://localhost:8080"),
        "http://localhost:8080/users";
        "url override"
    )]
    #[test_case(
        RequestOptions::new().path("v2/orders"),
        "https://api.example.com/v2/orders";
        "path override"
    )]
    #[test_case(
        RequestOptions::new().url("http://localhost").path("").resource_id("7"),
        "http://localhost//7";
        "empty path keeps separators"
    )]
    fn test_build_url(options: RequestOptions, expected: &str) {
        let url = build_url(&config(), &options).unwrap();
        assert_eq!(url.to_string(), expected);
    }

    #[test]
    fn test_build_url_empty_config_is_root() {
        let config = RestConfig::default();

        let root = build_url(&config, &RequestOptions::new()).unwrap();
        assert_eq!(root.to_string(), "/");

        let item = build_url(&config, &RequestOptions::new().resource_id("0")).unwrap();
        assert_eq!(item.to_string(), "/0");
    }

    #[test]
    fn test_build_url_sets_query() {
        let options = RequestOptions::new()
            .resource_id("42")
            .query("page", "2")
            .query("q", "a b&c");

        let url = build_url(&config(), &options).unwrap();

        assert_eq!(
            url.to_string(),
            "https://api.example.com/users/42?page=2&q=a+b%26c"
        );
    }

    #[test]
    fn test_build_url_query_replaces_suffix_query() {
        let with_query = RequestOptions::new().suffix("?old=1").query("new", "1");
        let url = build_url(&config(), &with_query).unwrap();
        assert_eq!(url.to_string(), "https://api.example.com/users?new=1");

        let without_query = RequestOptions::new().suffix("?old=1");
        let url = build_url(&config(), &without_query).unwrap();
        assert_eq!(url.to_string(), "https://api.example.com/users?old=1");
    }

    #[test]
    fn test_build_url_empty_query_clears_component() {
        let options = RequestOptions::new()
            .suffix("?old=1")
            .query_params(Vec::<(String, String)>::new());

        let url = build_url(&config(), &options).unwrap();
        assert_eq!(url.to_string(), "https://api.example.com/users");
    }

    #[test]
    fn test_build_url_invalid() {
        let options = RequestOptions::new().url("http://exa mple.com");

        let err = build_url(&config(), &options).unwrap_err();

        match err {
            RestError::InvalidUrl { url, .. } => assert_eq!(url, "http://exa mple.com/users"),
            other => panic!("Expected InvalidUrl, got {:?}", other),
        }
    }

    #[test]
    fn test_build_url_rejects_fragment() {
        let options = RequestOptions::new().suffix("#top");

        match build_url(&config(), &options).unwrap_err() {
            RestError::InvalidUrl { url, message } => {
                assert_eq!(url, "https://api.example.com/users#top");
                assert!(message.contains("fragment"));
            }
            other => panic!("Expected InvalidUrl, got {:?}", other),
        }
    }

    #[test]
    fn test_build_url_invalid_resource_id() {
        let options = RequestOptions::new().resource_id("has space");
        assert!(build_url(&config(), &options).unwrap_err().is_invalid_url());
    }

    #[test]
    fn test_assemble_url_is_verbatim() {
        assert_eq!(assemble_url("", "", None, None), "/");
        assert_eq!(
            assemble_url("https://a.b/", "/c", Some("d"), Some("e")),
            "https://a.b///c/de"
        );
    }
}
