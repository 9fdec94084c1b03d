//! Metadata store trait for durable item records.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::ItemId;

/// CRUD over item records keyed by [`ItemId`].
///
/// Generic over the record type so the trait can live here while the
/// concrete entity is defined in `gatherer-entity`.
#[async_trait]
pub trait MetadataStore<Record>: Send + Sync + std::fmt::Debug + 'static
where
    Record: Send + Sync + 'static,
{
    /// Return the backend name (e.g. "postgres", "memory").
    fn backend_type(&self) -> &str;

    /// Check whether the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Insert a new record. Fails with `Conflict` if the id already exists.
    async fn create(&self, record: &Record) -> AppResult<()>;

    /// Fetch a record. Fails with `NotFound` if absent.
    async fn get_by_id(&self, id: ItemId) -> AppResult<Record>;

    /// Remove a record. Fails with `NotFound` unless exactly one row went away.
    async fn delete(&self, id: ItemId) -> AppResult<()>;

    /// All records, newest `created_at` first.
    async fn list(&self) -> AppResult<Vec<Record>>;
}
