//! Content store trait for pluggable blob backends.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;
use crate::types::ItemId;

/// A byte stream fed into [`ContentStore::put`].
///
/// The lifetime lets callers pass streams that borrow from the request,
/// such as a multipart field.
pub type ByteStream<'a> = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send + 'a>>;

/// Outcome of a successful [`ContentStore::put`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoredBlob {
    /// Generated on-disk name: item id plus the original extension.
    pub stored_name: String,
    /// Resolved location inside the store.
    pub path: String,
    /// Bytes actually written.
    pub size: u64,
}

/// Byte storage keyed by a generated name under one base location.
///
/// Implementations exist for the local filesystem and for process memory.
/// Neither may leave a partial blob behind when `put` fails.
#[async_trait]
pub trait ContentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g. "local", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the store is usable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Copy `stream` into a new blob named after `id` and the extension of
    /// `filename`.
    ///
    /// Fails with `InvalidInput` once more than `max_bytes` arrive. On every
    /// failure path the partially written blob is removed first.
    async fn put<'s>(
        &self,
        id: ItemId,
        filename: &str,
        stream: ByteStream<'s>,
        max_bytes: u64,
    ) -> AppResult<StoredBlob>;

    /// Delete the blob at `path`. A missing blob is not an error.
    async fn remove(&self, path: &str) -> AppResult<()>;

    /// Check whether a blob exists at `path`.
    async fn exists(&self, path: &str) -> AppResult<bool>;
}
