//! Integration tests for `POST /upload`.

use axum::body::{Body, Bytes};
use http::{Request, StatusCode, header};

use crate::helpers::{self, BOUNDARY, TestApp};

#[tokio::test]
async fn test_upload_returns_created_item() {
    let app = TestApp::new().await;

    let response = app
        .upload("report.pdf", Some("application/pdf"), b"0123456789")
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let body = &response.body;
    let id = body["id"].as_str().expect("id");
    assert!(uuid::Uuid::parse_str(id).is_ok());
    assert_eq!(body["filename"], "report.pdf");
    assert_eq!(body["size"], 10);

    let path = body["path"].as_str().expect("path");
    assert!(path.ends_with(&format!("{id}.pdf")));
    assert_eq!(std::fs::read(path).unwrap(), b"0123456789");

    let created_at = body["created_at"].as_str().expect("created_at");
    assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());

    assert_eq!(app.metadata.len(), 1);
}

#[tokio::test]
async fn test_upload_without_extension() {
    let app = TestApp::new().await;

    let response = app.upload("README", None, b"hello").await;

    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.body["id"].as_str().unwrap();
    let path = response.body["path"].as_str().unwrap();
    assert!(path.ends_with(id));
}

#[tokio::test]
async fn test_upload_empty_file() {
    let app = TestApp::new().await;

    let response = app.upload("empty.txt", Some("text/plain"), b"").await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["size"], 0);
    assert_eq!(app.blob_count(), 1);
}

#[tokio::test]
async fn test_upload_missing_file_field() {
    let app = TestApp::new().await;
    let body = helpers::multipart_body("attachment", Some("a.txt"), None, b"abc");

    let response = app
        .upload_raw(body, &format!("multipart/form-data; boundary={BOUNDARY}"), false)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_INPUT");
    assert_eq!(app.blob_count(), 0);
    assert!(app.metadata.is_empty());
}

#[tokio::test]
async fn test_upload_field_without_filename() {
    let app = TestApp::new().await;
    let body = helpers::multipart_body("file", None, None, b"abc");

    let response = app
        .upload_raw(body, &format!("multipart/form-data; boundary={BOUNDARY}"), false)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.metadata.is_empty());
}

#[tokio::test]
async fn test_upload_not_multipart() {
    let app = TestApp::new().await;

    let response = app
        .upload_raw(b"{}".to_vec(), "application/json", false)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.blob_count(), 0);
}

#[tokio::test]
async fn test_upload_streamed_over_ceiling_rejected() {
    let app = TestApp::with_max_upload(1024).await;

    let response = app.upload("big.bin", None, &vec![7u8; 4096]).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_INPUT");
    assert_eq!(app.blob_count(), 0);
    assert!(app.metadata.is_empty());
}

#[tokio::test]
async fn test_upload_declared_over_ceiling_rejected() {
    let app = TestApp::with_max_upload(1024).await;
    let body = helpers::multipart_body("file", Some("big.bin"), None, &vec![7u8; 200 * 1024]);

    let response = app
        .upload_raw(body, &format!("multipart/form-data; boundary={BOUNDARY}"), true)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.blob_count(), 0);
    assert!(app.metadata.is_empty());
}

#[tokio::test]
async fn test_upload_at_ceiling_accepted() {
    let app = TestApp::with_max_upload(1024).await;

    let response = app.upload("exact.bin", None, &vec![1u8; 1024]).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["size"], 1024);
}

#[tokio::test]
async fn test_same_name_twice_gets_distinct_items() {
    let app = TestApp::new().await;

    let first = app.upload("dup.txt", None, b"one").await;
    let second = app.upload("dup.txt", None, b"two").await;

    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(second.status, StatusCode::CREATED);
    assert_ne!(first.body["id"], second.body["id"]);
    assert_ne!(first.body["path"], second.body["path"]);
    assert_eq!(app.blob_count(), 2);
}

#[tokio::test]
async fn test_stalled_upload_times_out() {
    let app = TestApp::with_config(|config| config.server.request_timeout_seconds = 1).await;
    let stalled = futures::stream::pending::<Result<Bytes, std::io::Error>>();
    let req = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from_stream(stalled))
        .unwrap();

    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::REQUEST_TIMEOUT);
    assert!(app.metadata.is_empty());
}
