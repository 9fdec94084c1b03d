//! In-memory content store.
//!
//! Blobs are buffered completely before they become visible, so a failed or
//! dropped `put` never leaves anything behind. Contents are lost when the
//! process exits.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::stream::StreamExt;
use tokio::sync::RwLock;
use tracing::debug;

use gatherer_core::error::{AppError, ErrorKind};
use gatherer_core::result::AppResult;
use gatherer_core::traits::content::{ByteStream, ContentStore, StoredBlob};
use gatherer_core::types::ItemId;

use crate::naming;

/// Path prefix for blobs held by [`MemoryContentStore`].
pub const MEMORY_PREFIX: &str = "memory://";

/// Ephemeral content store backed by a locked map of path → bytes.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentStore {
    blobs: Arc<RwLock<HashMap<String, Bytes>>>,
}

impl MemoryContentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a stored blob back.
    pub async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
        let blobs = self.blobs.read().await;
        blobs
            .get(path)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Blob not found: {path}")))
    }

    /// Number of stored blobs.
    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    /// Whether the store holds no blobs.
    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn put<'s>(
        &self,
        id: ItemId,
        filename: &str,
        mut stream: ByteStream<'s>,
        max_bytes: u64,
    ) -> AppResult<StoredBlob> {
        let stored_name = naming::stored_name(id, filename);
        let path = format!("{MEMORY_PREFIX}{stored_name}");

        let mut buf = BytesMut::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                AppError::with_source(ErrorKind::InvalidInput, "Failed to read upload stream", e)
            })?;
            if (buf.len() + chunk.len()) as u64 > max_bytes {
                return Err(AppError::invalid_input(format!(
                    "File exceeds maximum upload size of {max_bytes} bytes"
                )));
            }
            buf.extend_from_slice(&chunk);
        }

        let size = buf.len() as u64;
        let mut blobs = self.blobs.write().await;
        if blobs.contains_key(&path) {
            return Err(AppError::conflict(format!(
                "Blob already exists: {stored_name}"
            )));
        }
        blobs.insert(path.clone(), buf.freeze());
        debug!(path = %path, bytes = size, "Stored blob in memory");

        Ok(StoredBlob {
            stored_name,
            path,
            size,
        })
    }

    async fn remove(&self, path: &str) -> AppResult<()> {
        if self.blobs.write().await.remove(path).is_none() {
            debug!(path, "Blob already absent");
        }
        Ok(())
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        Ok(self.blobs.read().await.contains_key(path))
    }
}
