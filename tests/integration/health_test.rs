//! Integration tests for the health endpoints.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_health_detailed() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/health/detailed").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["content_store"], "available");
    assert_eq!(response.body["metadata_store"], "connected");
    assert!(response.body["version"].is_string());
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/nope").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
