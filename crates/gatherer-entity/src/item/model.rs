//! Item entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use gatherer_core::types::ItemId;

/// A stored upload: one row in `items`, one blob in the content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Item {
    /// Unique item identifier, also the stem of `stored_name`.
    pub id: ItemId,
    /// Client-supplied file name. Never used to build paths.
    pub original_name: String,
    /// On-disk name: `id` plus the original extension.
    pub stored_name: String,
    /// Location of the blob inside the content store.
    pub file_path: String,
    /// Bytes actually written.
    pub file_size: i64,
    /// MIME type, if known.
    pub mime_type: Option<String>,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
    /// When the item metadata was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Size as an unsigned count; negative values never reach the table.
    pub fn size_bytes(&self) -> u64 {
        u64::try_from(self.file_size).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str) -> Item {
        let now = Utc::now();
        Item {
            id: ItemId::new(),
            original_name: name.to_string(),
            stored_name: String::new(),
            file_path: String::new(),
            file_size: 10,
            mime_type: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_size_bytes() {
        let mut item = sample("report.pdf");
        assert_eq!(item.size_bytes(), 10);
        item.file_size = -1;
        assert_eq!(item.size_bytes(), 0);
    }

    #[test]
    fn test_metadata_view_carries_size_and_path() {
        let mut item = sample("report.pdf");
        item.file_path = "/srv/uploads/x.pdf".to_string();
        let meta = crate::item::FileMetadata::from(item.clone());
        assert_eq!(meta.id, item.id);
        assert_eq!(meta.size, 10);
        assert_eq!(meta.path, "/srv/uploads/x.pdf");
    }
}
