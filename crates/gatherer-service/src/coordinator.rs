//! Storage coordinator: save, get, delete, and list uploaded items.
//!
//! Ordering rules:
//! - save writes the blob first, then the record; if the record write
//!   fails the blob is removed before the error is returned.
//! - delete removes the blob first, then the record; if the blob cannot be
//!   removed the record is kept.
//!
//! A failed compensating removal is logged and left in place. The
//! coordinator never retries.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use gatherer_core::error::{AppError, ErrorKind};
use gatherer_core::result::AppResult;
use gatherer_core::traits::content::{ByteStream, ContentStore};
use gatherer_core::traits::metadata::MetadataStore;
use gatherer_core::types::ItemId;
use gatherer_entity::item::{FileMetadata, Item};
use gatherer_storage::naming;

use crate::guard::UncommittedBlob;

/// Caller-supplied description of an upload.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    /// Original file name, stored verbatim.
    pub filename: String,
    /// MIME type reported by the client, if any.
    pub mime_type: Option<String>,
    /// Size the client claims. Checked against the ceiling before any bytes
    /// are read, but never stored.
    pub declared_size: Option<u64>,
}

/// Health of the two stores behind the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreHealth {
    /// Content store reachable.
    pub content: bool,
    /// Metadata store reachable.
    pub metadata: bool,
}

impl StoreHealth {
    /// Both stores are reachable.
    pub fn is_healthy(&self) -> bool {
        self.content && self.metadata
    }
}

/// Composes a content store and a metadata store behind one contract.
#[derive(Clone)]
pub struct StorageCoordinator {
    content: Arc<dyn ContentStore>,
    metadata: Arc<dyn MetadataStore<Item>>,
    max_upload_size: u64,
}

impl std::fmt::Debug for StorageCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageCoordinator")
            .field("content", &self.content.provider_type())
            .field("metadata", &self.metadata.backend_type())
            .field("max_upload_size", &self.max_upload_size)
            .finish()
    }
}

impl StorageCoordinator {
    /// Creates a coordinator enforcing `max_upload_size` bytes per upload.
    pub fn new(
        content: Arc<dyn ContentStore>,
        metadata: Arc<dyn MetadataStore<Item>>,
        max_upload_size: u64,
    ) -> Self {
        Self {
            content,
            metadata,
            max_upload_size,
        }
    }

    /// Largest accepted upload in bytes.
    pub fn max_upload_size(&self) -> u64 {
        self.max_upload_size
    }

    /// Reject a declared size above the ceiling.
    pub fn check_declared_size(&self, declared: u64) -> AppResult<()> {
        if declared > self.max_upload_size {
            return Err(AppError::invalid_input(format!(
                "File too large: {declared} bytes exceeds the maximum of {} bytes",
                self.max_upload_size
            )));
        }
        Ok(())
    }

    /// Store an upload and its metadata record.
    ///
    /// The returned size is the number of bytes actually written.
    pub async fn save<'s>(
        &self,
        request: UploadRequest,
        stream: ByteStream<'s>,
    ) -> AppResult<FileMetadata> {
        if request.filename.trim().is_empty() {
            return Err(AppError::invalid_input("File name is required"));
        }
        if let Some(declared) = request.declared_size {
            self.check_declared_size(declared)?;
        }

        let id = ItemId::new();
        let blob = self
            .content
            .put(id, &request.filename, stream, self.max_upload_size)
            .await?;
        let pending = UncommittedBlob::new(Arc::clone(&self.content), blob.path.clone());

        let file_size = i64::try_from(blob.size)
            .map_err(|_| AppError::internal(format!("Blob size {} overflows", blob.size)))?;
        let mime_type = request
            .mime_type
            .filter(|m| !m.trim().is_empty())
            .or_else(|| naming::mime_from_name(&request.filename));
        let now = Utc::now();
        let item = Item {
            id,
            original_name: request.filename,
            stored_name: blob.stored_name,
            file_path: blob.path,
            file_size,
            mime_type,
            created_at: now,
            updated_at: now,
        };

        if let Err(err) = self.metadata.create(&item).await {
            if let Err(cleanup_err) = pending.discard().await {
                error!(
                    item_id = %id,
                    orphan_path = %item.file_path,
                    error = %err,
                    cleanup_error = %cleanup_err,
                    kind = %ErrorKind::OrphanCleanup,
                    "Metadata write failed and blob cleanup failed; blob is orphaned"
                );
            } else {
                warn!(
                    item_id = %id,
                    error = %err,
                    "Metadata write failed; removed blob"
                );
            }
            return Err(err);
        }
        pending.commit();

        info!(
            item_id = %item.id,
            name = %item.original_name,
            size = item.file_size,
            "Upload stored"
        );
        Ok(FileMetadata::from(item))
    }

    /// Look up an item by its textual id.
    pub async fn get(&self, id: &str) -> AppResult<FileMetadata> {
        let id = ItemId::parse(id)?;
        self.metadata.get_by_id(id).await.map(FileMetadata::from)
    }

    /// Remove an item's blob, then its record.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let meta = self.get(id).await?;

        if let Err(err) = self.content.remove(&meta.path).await {
            warn!(
                item_id = %meta.id,
                path = %meta.path,
                error = %err,
                "Blob removal failed; keeping metadata record"
            );
            return Err(err);
        }
        self.metadata.delete(meta.id).await?;

        info!(item_id = %meta.id, "Item deleted");
        Ok(())
    }

    /// All items, newest first.
    pub async fn list(&self) -> AppResult<Vec<FileMetadata>> {
        let items = self.metadata.list().await?;
        Ok(items.into_iter().map(FileMetadata::from).collect())
    }

    /// Probe both stores. Probe errors count as unhealthy.
    pub async fn health_check(&self) -> StoreHealth {
        let content = self.content.health_check().await.unwrap_or(false);
        let metadata = self.metadata.health_check().await.unwrap_or(false);
        StoreHealth { content, metadata }
    }
}
