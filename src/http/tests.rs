//! Tests for the HTTP module

use super::*;
use crate::error::Error;
use serde_json::{json, Value};
use std::time::Duration;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client() -> HttpClient {
    HttpClient::with_config(HttpClientConfig::builder().no_rate_limit().build()).unwrap()
}

fn endpoint(server: &MockServer, rest: &str) -> Url {
    Url::parse(&format!("{}{rest}", server.uri())).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.rate_limit.is_none());
    assert!(config.user_agent.starts_with("paged-source/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(5))
        .rate_limit(RateLimiterConfig::new(2, 1))
        .header("Authorization", "ApiKey u:k")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(2, 1)));
    assert_eq!(
        config.default_headers.get("Authorization"),
        Some(&"ApiKey u:k".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");

    let client = HttpClient::with_config(config).unwrap();
    assert!(client.has_rate_limiter());
}

#[test]
fn test_http_client_rejects_bad_header() {
    let config = HttpClientConfig::builder()
        .header("bad header", "value")
        .build();
    let err = HttpClient::with_config(config).unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { .. }));
}

#[tokio::test]
async fn test_http_client_get_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/entries/"))
        .and(query_param("offset", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": 42})))
        .mount(&server)
        .await;

    let body = test_client()
        .get_json(&endpoint(&server, "/api/entries/?offset=20"))
        .await
        .unwrap();
    assert_eq!(body["value"], 42);
}

#[tokio::test]
async fn test_http_client_sends_default_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/secure"))
        .and(header("X-API-Key", "secret123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = HttpClient::with_config(
        HttpClientConfig::builder()
            .header("X-API-Key", "secret123")
            .build(),
    )
    .unwrap();

    assert!(client.get_json(&endpoint(&server, "/api/secure")).await.is_ok());
}

#[tokio::test]
async fn test_http_client_status_error_single_attempt() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/flaky"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client()
        .get_json(&endpoint(&server, "/api/flaky"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 503, ref body } if body == "down"));
}

#[tokio::test]
async fn test_http_client_invalid_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let err = test_client()
        .get_json(&endpoint(&server, "/api/html"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::JsonParse(_)));
}

// ============================================================================
// HttpPageClient Tests
// ============================================================================

#[tokio::test]
async fn test_page_client_returns_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/entries/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"limit": 2, "offset": 0, "total_count": 2},
            "objects": [{"id": "a"}, {"id": "b"}]
        })))
        .mount(&server)
        .await;

    let fetcher = HttpPageClient::new(test_client());
    let body = fetcher.fetch(&endpoint(&server, "/api/entries/")).await;

    assert_eq!(body["meta"]["total_count"], 2);
    assert_eq!(page_objects(body).len(), 2);
}

#[tokio::test]
async fn test_page_client_fail_soft_on_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let fetcher = HttpPageClient::new(test_client());
    assert_eq!(fetcher.fetch(&endpoint(&server, "/api/x")).await, Value::Null);
}

#[tokio::test]
async fn test_page_client_fail_soft_on_bad_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let fetcher = HttpPageClient::new(test_client());
    assert_eq!(fetcher.fetch(&endpoint(&server, "/api/x")).await, Value::Null);
}

#[tokio::test]
async fn test_page_client_fail_soft_on_transport_error() {
    // Nothing listens on port 9 (discard) in the test environment
    let fetcher = HttpPageClient::new(
        HttpClient::with_config(
            HttpClientConfig::builder()
                .timeout(Duration::from_secs(2))
                .build(),
        )
        .unwrap(),
    );
    let url = Url::parse("http://127.0.0.1:9/api/").unwrap();
    assert_eq!(fetcher.fetch(&url).await, Value::Null);
}

#[test]
fn test_page_objects_shapes() {
    assert_eq!(
        page_objects(json!({"objects": [{"id": "a"}]})),
        vec![json!({"id": "a"})]
    );
    assert!(page_objects(json!({"objects": {"id": "a"}})).is_empty());
    assert!(page_objects(json!({"meta": {}})).is_empty());
    assert!(page_objects(Value::Null).is_empty());
    assert!(page_objects(json!([1, 2])).is_empty());
}
