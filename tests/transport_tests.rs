//! Integration tests for the reqwest-backed transport.

use serde_json::json;
use shopify_app_auth::clients::{HttpMethod, TransportRequest};
use shopify_app_auth::{ReqwestTransport, Transport, TransportError};
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_returns_status_headers_and_bodies() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/api/2025-10/shop.json"))
        .and(query_param("fields", "id,name"))
        .and(header("Accept", "application/json"))
        .and(header_exists("User-Agent"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Shopify-Shop-Api-Call-Limit", "1/40")
                .set_body_json(json!({"shop": {"id": 1}})),
        )
        .mount(&mock_server)
        .await;

    let transport = ReqwestTransport::new().unwrap();
    let request = TransportRequest::builder(
        HttpMethod::Get,
        mock_server.uri(),
        "/admin/api/2025-10/shop.json",
    )
    .query_param("fields", "id,name")
    .build();

    let response = transport.call(request).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(
        response.headers.get("x-shopify-shop-api-call-limit"),
        Some(&vec!["1/40".to_string()])
    );
    assert_eq!(response.header("X-Shopify-Shop-Api-Call-Limit"), Some("1/40"));
    assert_eq!(response.parsed_body, Some(json!({"shop": {"id": 1}})));
    assert_eq!(response.raw_body, br#"{"shop":{"id":1}}"#.to_vec());
}

#[tokio::test]
async fn test_sends_json_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/admin/api/2025-10/products/1.json"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = ReqwestTransport::new().unwrap();
    let request = TransportRequest::builder(
        HttpMethod::Put,
        mock_server.uri(),
        "/admin/api/2025-10/products/1.json",
    )
    .body(json!({"product": {"id": 1}}))
    .build();

    let response = transport.call(request).await.unwrap();
    assert!(response.parsed_body.is_none());
    assert_eq!(response.raw_body, b"not json".to_vec());
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"errors": "Not Found"})))
        .mount(&mock_server)
        .await;

    let transport = ReqwestTransport::new().unwrap();
    let request = TransportRequest::builder(
        HttpMethod::Delete,
        mock_server.uri(),
        "/admin/api/2025-10/products/1.json",
    )
    .build();

    let error = transport.call(request).await.unwrap_err();
    assert_eq!(error.status(), Some(404));
    assert!(matches!(
        error,
        TransportError::Response { ref body, .. } if body.contains("Not Found")
    ));
}

#[tokio::test]
async fn test_custom_user_agent_prefix() {
    let transport = ReqwestTransport::new().unwrap().user_agent_prefix("MyApp/1.0");
    assert!(transport
        .user_agent()
        .starts_with("MyApp/1.0 | Shopify App Auth Library v"));

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("User-Agent", transport.user_agent()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = TransportRequest::builder(HttpMethod::Get, mock_server.uri(), "/").build();
    transport.call(request).await.unwrap();
}

#[tokio::test]
async fn test_deprecated_endpoint_still_succeeds() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Shopify-API-Deprecated-Reason", "https://shopify.dev/changelog")
                .set_body_json(json!({})),
        )
        .mount(&mock_server)
        .await;

    let transport = ReqwestTransport::new().unwrap();
    let request =
        TransportRequest::builder(HttpMethod::Get, mock_server.uri(), "/admin/api/2023-01/x.json")
            .build();

    let response = transport.call(request).await.unwrap();
    assert_eq!(response.status, 200);
}
