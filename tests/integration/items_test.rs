//! Integration tests for the item endpoints.

use http::StatusCode;

use crate::helpers::{self, TestApp};

#[tokio::test]
async fn test_list_empty() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/items").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!([]));
}

#[tokio::test]
async fn test_list_newest_first() {
    let app = TestApp::new().await;
    for name in ["one.txt", "two.txt", "three.txt"] {
        let response = app.upload(name, Some("text/plain"), b"abc").await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let response = app.request("GET", "/items").await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.body.as_array().expect("array");
    let names: Vec<&str> = items
        .iter()
        .map(|i| i["original_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["three.txt", "two.txt", "one.txt"]);
    assert_eq!(items[0]["file_size"], 3);
    assert_eq!(items[0]["mime_type"], "text/plain");
}

#[tokio::test]
async fn test_unknown_mime_type_omitted() {
    let app = TestApp::new().await;
    app.upload("blob.qqq", None, b"abc").await;

    let response = app.request("GET", "/items").await;

    let item = &response.body[0];
    assert_eq!(item["original_name"], "blob.qqq");
    assert!(item.get("mime_type").is_none());
}

#[tokio::test]
async fn test_get_item() {
    let app = TestApp::new().await;
    let uploaded = app.upload("notes.txt", None, b"# hi").await;
    let id = uploaded.body["id"].as_str().unwrap();

    let response = app.request("GET", &format!("/items/{id}")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], id);
    assert_eq!(response.body["original_name"], "notes.txt");
    assert_eq!(response.body["file_size"], 4);
    assert_eq!(response.body["mime_type"], "text/plain");
}

#[tokio::test]
async fn test_get_unknown_item() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", &format!("/items/{}", uuid::Uuid::new_v4()))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_get_malformed_id() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/items/not-a-uuid").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_delete_item() {
    let app = TestApp::new().await;
    let uploaded = app.upload("gone.txt", None, b"bye").await;
    let id = uploaded.body["id"].as_str().unwrap().to_string();
    let path = uploaded.body["path"].as_str().unwrap().to_string();
    assert!(helpers::file_exists(&path));

    let response = app.request("DELETE", &format!("/items/{id}")).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    assert!(!helpers::file_exists(&path));
    assert!(app.metadata.is_empty());
    let response = app.request("GET", &format!("/items/{id}")).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_twice() {
    let app = TestApp::new().await;
    let uploaded = app.upload("once.txt", None, b"x").await;
    let id = uploaded.body["id"].as_str().unwrap().to_string();

    let first = app.request("DELETE", &format!("/items/{id}")).await;
    let second = app.request("DELETE", &format!("/items/{id}")).await;

    assert_eq!(first.status, StatusCode::NO_CONTENT);
    assert_eq!(second.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_malformed_id() {
    let app = TestApp::new().await;

    let response = app.request("DELETE", "/items/12345").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_leaves_other_items() {
    let app = TestApp::new().await;
    let keep = app.upload("keep.txt", None, b"k").await;
    let removed = app.upload("drop.txt", None, b"d").await;

    let id = removed.body["id"].as_str().unwrap();
    app.request("DELETE", &format!("/items/{id}")).await;

    let response = app.request("GET", "/items").await;
    let items = response.body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], keep.body["id"]);
    assert_eq!(app.blob_count(), 1);
}
