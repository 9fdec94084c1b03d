//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gatherer_core::types::ItemId;
use gatherer_entity::item::FileMetadata;

/// Body of a successful `POST /upload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Item ID.
    pub id: ItemId,
    /// Client-supplied file name.
    pub filename: String,
    /// Bytes stored.
    pub size: u64,
    /// Blob location.
    pub path: String,
    /// Creation time (UTC).
    pub created_at: DateTime<Utc>,
}

impl From<FileMetadata> for UploadResponse {
    fn from(meta: FileMetadata) -> Self {
        Self {
            id: meta.id,
            filename: meta.original_name,
            size: meta.size,
            path: meta.path,
            created_at: meta.created_at,
        }
    }
}

/// Item summary used by the listing and lookup endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResponse {
    /// Item ID.
    pub id: ItemId,
    /// Client-supplied file name.
    pub original_name: String,
    /// Bytes stored.
    pub file_size: u64,
    /// MIME type, omitted when unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Creation time (UTC).
    pub created_at: DateTime<Utc>,
}

impl From<FileMetadata> for ItemResponse {
    fn from(meta: FileMetadata) -> Self {
        Self {
            id: meta.id,
            original_name: meta.original_name,
            file_size: meta.size,
            mime_type: meta.mime_type,
            created_at: meta.created_at,
        }
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests.
    pub status: String,
}

/// Store-level health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Seconds since startup.
    pub uptime_seconds: u64,
    /// `available` or `unavailable`.
    pub content_store: String,
    /// `connected` or `unavailable`.
    pub metadata_store: String,
}
