//! In-memory item repository.
//!
//! Non-durable: records vanish when the process exits. Useful for local
//! runs without PostgreSQL and for tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use gatherer_core::error::AppError;
use gatherer_core::result::AppResult;
use gatherer_core::traits::metadata::MetadataStore;
use gatherer_core::types::ItemId;
use gatherer_entity::item::Item;

/// Metadata store backed by a concurrent map.
#[derive(Debug, Clone, Default)]
pub struct MemoryItemRepository {
    /// Records keyed by id, each tagged with its insertion sequence.
    items: Arc<DashMap<ItemId, (u64, Item)>>,
    /// Monotonic insertion counter; breaks `created_at` ties in `list`.
    next_seq: Arc<AtomicU64>,
}

impl MemoryItemRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no records are stored.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl MetadataStore<Item> for MemoryItemRepository {
    fn backend_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn create(&self, item: &Item) -> AppResult<()> {
        match self.items.entry(item.id) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Item {} already exists",
                item.id
            ))),
            Entry::Vacant(slot) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                slot.insert((seq, item.clone()));
                Ok(())
            }
        }
    }

    async fn get_by_id(&self, id: ItemId) -> AppResult<Item> {
        self.items
            .get(&id)
            .map(|entry| entry.value().1.clone())
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))
    }

    async fn delete(&self, id: ItemId) -> AppResult<()> {
        self.items
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))
    }

    async fn list(&self) -> AppResult<Vec<Item>> {
        let mut rows: Vec<(u64, Item)> = self
            .items
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| seq_b.cmp(seq_a))
        });
        Ok(rows.into_iter().map(|(_, item)| item).collect())
    }
}
