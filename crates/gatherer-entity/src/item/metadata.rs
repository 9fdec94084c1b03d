//! Coordinator-facing view of a stored item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gatherer_core::types::ItemId;

use super::model::Item;

/// Metadata returned by save/get/list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Item identifier.
    pub id: ItemId,
    /// Client-supplied file name.
    pub original_name: String,
    /// Generated on-disk name.
    pub stored_name: String,
    /// Bytes actually stored.
    pub size: u64,
    /// Blob location.
    pub path: String,
    /// MIME type, if known.
    pub mime_type: Option<String>,
    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
}

impl From<Item> for FileMetadata {
    fn from(item: Item) -> Self {
        let size = item.size_bytes();
        Self {
            id: item.id,
            original_name: item.original_name,
            stored_name: item.stored_name,
            size,
            path: item.file_path,
            mime_type: item.mime_type,
            created_at: item.created_at,
        }
    }
}
