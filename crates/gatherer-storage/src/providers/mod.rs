//! Content store implementations.

pub mod local;
pub mod memory;

use std::sync::Arc;

use tracing::info;

use gatherer_core::config::{ContentBackend, StorageConfig};
use gatherer_core::result::AppResult;
use gatherer_core::traits::content::ContentStore;

pub use local::LocalContentStore;
pub use memory::MemoryContentStore;

/// Build the content store selected by `config.backend`.
pub async fn build_content_store(config: &StorageConfig) -> AppResult<Arc<dyn ContentStore>> {
    let store: Arc<dyn ContentStore> = match config.backend {
        ContentBackend::Local => Arc::new(LocalContentStore::new(config).await?),
        ContentBackend::Memory => Arc::new(MemoryContentStore::new()),
    };
    info!(
        provider = store.provider_type(),
        upload_dir = %config.upload_dir,
        "Content store ready"
    );
    Ok(store)
}
