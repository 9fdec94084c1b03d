//! Shared test helpers for integration tests.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use gatherer_api::AppState;
use gatherer_core::config::{AppConfig, MetadataBackend};
use gatherer_database::MemoryItemRepository;
use gatherer_service::StorageCoordinator;
use gatherer_storage::LocalContentStore;

/// Multipart boundary used by [`multipart_body`].
pub const BOUNDARY: &str = "gatherer-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Metadata records, for direct inspection
    pub metadata: MemoryItemRepository,
    /// Upload directory; removed when the app is dropped
    pub upload_dir: TempDir,
}

impl TestApp {
    /// Create a test application with the default 50 MiB ceiling
    pub async fn new() -> Self {
        Self::with_max_upload(AppConfig::default().storage.max_upload_size_bytes).await
    }

    /// Create a test application with a custom upload ceiling
    pub async fn with_max_upload(max_upload_size_bytes: u64) -> Self {
        Self::with_config(|config| config.storage.max_upload_size_bytes = max_upload_size_bytes)
            .await
    }

    /// Create a test application after adjusting the default config
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let upload_dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.database.backend = MetadataBackend::Memory;
        adjust(&mut config);
        config.storage.upload_dir = upload_dir.path().display().to_string();

        let content = LocalContentStore::new(&config.storage)
            .await
            .expect("Failed to init content store");
        let metadata = MemoryItemRepository::new();
        let coordinator = Arc::new(StorageCoordinator::new(
            Arc::new(content),
            Arc::new(metadata.clone()),
            config.storage.max_upload_size_bytes,
        ));

        let router = gatherer_api::build_router(AppState::new(Arc::new(config), coordinator));

        Self {
            router,
            metadata,
            upload_dir,
        }
    }

    /// Number of blobs currently in the upload directory
    pub fn blob_count(&self) -> usize {
        std::fs::read_dir(self.upload_dir.path())
            .expect("Failed to read upload dir")
            .count()
    }

    /// Make a body-less request
    pub async fn request(&self, method: &str, path: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Upload `data` as the `file` field
    pub async fn upload(
        &self,
        filename: &str,
        content_type: Option<&str>,
        data: &[u8],
    ) -> TestResponse {
        let body = multipart_body("file", Some(filename), content_type, data);
        self.upload_raw(body, &format!("multipart/form-data; boundary={BOUNDARY}"), false)
            .await
    }

    /// POST a prepared body to `/upload`, optionally declaring its length
    pub async fn upload_raw(
        &self,
        body: Vec<u8>,
        content_type: &str,
        with_content_length: bool,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method("POST")
            .uri("/upload")
            .header(header::CONTENT_TYPE, content_type);
        if with_content_length {
            req = req.header(header::CONTENT_LENGTH, body.len());
        }
        let req = req.body(Body::from(body)).expect("Failed to build request");
        self.send(req).await
    }

    /// Send a prepared request
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Build a single-part multipart body
pub fn multipart_body(
    field: &str,
    filename: Option<&str>,
    content_type: Option<&str>,
    data: &[u8],
) -> Vec<u8> {
    let mut disposition = format!("Content-Disposition: form-data; name=\"{field}\"");
    if let Some(filename) = filename {
        disposition.push_str(&format!("; filename=\"{filename}\""));
    }

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n{disposition}\r\n").as_bytes());
    if let Some(content_type) = content_type {
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Whether `path` names an existing file
pub fn file_exists(path: &str) -> bool {
    Path::new(path).is_file()
}

/// Test response wrapper
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
