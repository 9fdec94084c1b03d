//! Local filesystem content store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::stream::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use gatherer_core::config::StorageConfig;
use gatherer_core::error::{AppError, ErrorKind};
use gatherer_core::result::AppResult;
use gatherer_core::traits::content::{ByteStream, ContentStore, StoredBlob};
use gatherer_core::types::ItemId;

use crate::naming;

/// Content store that writes each blob as a file directly under one base
/// directory.
#[derive(Debug, Clone)]
pub struct LocalContentStore {
    /// Base directory for all stored blobs.
    root: PathBuf,
}

impl LocalContentStore {
    /// Create the store, creating the base directory and any missing
    /// ancestors.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        Self::with_root(&config.upload_dir).await
    }

    /// Create a store rooted at an explicit directory.
    pub async fn with_root(root: impl AsRef<Path>) -> AppResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::StorageWrite,
                format!("Failed to create storage directory: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// The base directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ContentStore for LocalContentStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    async fn put<'s>(
        &self,
        id: ItemId,
        filename: &str,
        mut stream: ByteStream<'s>,
        max_bytes: u64,
    ) -> AppResult<StoredBlob> {
        let stored_name = naming::stored_name(id, filename);
        let dest = self.root.join(&stored_name);

        // `create_new` guarantees a stored name is never reused.
        let file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&dest)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => {
                    AppError::conflict(format!("Blob already exists: {stored_name}"))
                }
                _ => AppError::with_source(
                    ErrorKind::StorageWrite,
                    format!("Failed to create file: {stored_name}"),
                    e,
                ),
            })?;
        let mut blob = PartialBlob::new(dest.clone(), file);

        let mut written = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                AppError::with_source(ErrorKind::InvalidInput, "Failed to read upload stream", e)
            })?;
            written += chunk.len() as u64;
            if written > max_bytes {
                return Err(AppError::invalid_input(format!(
                    "File exceeds maximum upload size of {max_bytes} bytes"
                )));
            }
            blob.write(&chunk).await.map_err(|e| {
                AppError::with_source(ErrorKind::StorageWrite, "Failed to write chunk", e)
            })?;
        }

        blob.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::StorageWrite, "Failed to sync file", e))?;

        let path = dest.to_string_lossy().into_owned();
        debug!(path = %path, bytes = written, "Wrote blob from stream");
        Ok(StoredBlob {
            stored_name,
            path,
            size: written,
        })
    }

    async fn remove(&self, path: &str) -> AppResult<()> {
        match fs::remove_file(path).await {
            Ok(()) => {
                debug!(path, "Removed blob");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path, "Blob already absent");
                Ok(())
            }
            Err(e) => Err(AppError::with_source(
                ErrorKind::StorageWrite,
                format!("Failed to delete file: {path}"),
                e,
            )),
        }
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        fs::try_exists(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::StorageWrite,
                format!("Failed to stat file: {path}"),
                e,
            )
        })
    }
}

/// A destination file being written. Unless [`PartialBlob::commit`]
/// succeeds, dropping it closes the handle and then removes the file.
/// Covers early returns and a dropped `put` future alike.
struct PartialBlob {
    path: PathBuf,
    file: Option<fs::File>,
    armed: bool,
}

impl PartialBlob {
    fn new(path: PathBuf, file: fs::File) -> Self {
        Self {
            path,
            file: Some(file),
            armed: true,
        }
    }

    async fn write(&mut self, chunk: &[u8]) -> std::io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.write_all(chunk).await,
            None => Err(std::io::Error::other("blob already closed")),
        }
    }

    /// Flush and sync, then close the handle and keep the file.
    async fn commit(mut self) -> std::io::Result<()> {
        if let Some(file) = self.file.as_mut() {
            file.flush().await?;
            file.sync_all().await?;
        }
        // Disarm only once the bytes are durable.
        self.armed = false;
        drop(self.file.take());
        Ok(())
    }
}

impl Drop for PartialBlob {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        // Close before unlinking; an open handle blocks removal on Windows.
        drop(self.file.take());
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed partial blob"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove partial blob"
            ),
        }
    }
}
