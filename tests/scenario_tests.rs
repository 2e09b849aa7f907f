//! End-to-end behaviour of a client bound to `String` resources.

use rest_resource_client::mocks::{MockResponse, MockTransport, RecordingLogger};
use rest_resource_client::{HttpMethod, RequestBody, RequestOptions, RestClient};
use std::sync::Arc;

fn setup() -> (RestClient<String>, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::new());
    transport.respond_with(|request| {
        if request.method == HttpMethod::Get && request.url.to_string() == "/" {
            Ok(MockResponse::json(&vec!["Success"]))
        } else {
            Ok(MockResponse::json(&"Success"))
        }
    });

    let client = RestClient::builder()
        .base_url("")
        .transport(transport.clone())
        .logger(Arc::new(RecordingLogger::new()))
        .build()
        .unwrap();

    (client, transport)
}

#[tokio::test]
async fn test_get_collection_without_arguments() {
    let (client, transport) = setup();

    let result = client.get_all(RequestOptions::new()).await.unwrap();

    assert_eq!(result, vec!["Success".to_string()]);
    assert_eq!(transport.last_request().unwrap().url, "/");
}

#[tokio::test]
async fn test_get_single_by_resource_id() {
    let (client, transport) = setup();

    let result = client.get("0", RequestOptions::new()).await.unwrap();

    assert_eq!(result, "Success");
    assert_eq!(transport.last_request().unwrap().url, "/0");
}

#[tokio::test]
async fn test_post_resource() {
    let (client, transport) = setup();

    let body = String::new();
    let result = client
        .post(RequestBody::Resource(&body), RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(result.as_deref(), Some("Success"));
    let request = transport.last_request().unwrap();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.body_text(), Some("\"\""));
}

#[tokio::test]
async fn test_delete_invokes_transport_once() {
    let (client, transport) = setup();

    client
        .delete_discard(RequestBody::Empty, RequestOptions::new().resource_id("0"))
        .await
        .unwrap();

    assert_eq!(transport.request_count(), 1);
    let request = transport.last_request().unwrap();
    assert_eq!(request.method, HttpMethod::Delete);
    assert_eq!(request.url, "/0");
}

#[tokio::test]
async fn test_default_headers_are_sent() {
    let (client, transport) = setup();

    client.get_all(RequestOptions::new()).await.unwrap();

    let headers = transport.last_request().unwrap().headers;
    assert_eq!(headers["Content-Type"], "application/json; charset=utf-8");
    assert_eq!(headers["Accept"], "application/json; charset=utf-8");
}
