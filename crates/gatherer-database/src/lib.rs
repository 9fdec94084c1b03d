//! # gatherer-database
//!
//! PostgreSQL connection management and the metadata store
//! implementations (durable Postgres, ephemeral in-memory).

pub mod connection;
pub mod migration;
pub mod repositories;

use std::sync::Arc;

use tracing::info;

use gatherer_core::config::{DatabaseConfig, MetadataBackend};
use gatherer_core::result::AppResult;
use gatherer_core::traits::metadata::MetadataStore;
use gatherer_entity::item::Item;

pub use connection::DatabasePool;
pub use repositories::{MemoryItemRepository, PostgresItemRepository};

/// Metadata store selected by configuration, plus the pool behind it when
/// the backend is Postgres.
pub struct MetadataBackendHandle {
    /// The store handed to the coordinator.
    pub store: Arc<dyn MetadataStore<Item>>,
    /// Open pool, kept so the caller can close it on shutdown.
    pub pool: Option<DatabasePool>,
}

/// Connect (and migrate, if enabled) the metadata store named by
/// `config.backend`.
pub async fn build_metadata_store(config: &DatabaseConfig) -> AppResult<MetadataBackendHandle> {
    match config.backend {
        MetadataBackend::Postgres => {
            let pool = DatabasePool::connect(config).await?;
            if config.run_migrations {
                migration::run_migrations(pool.pool()).await?;
            }
            let store = Arc::new(PostgresItemRepository::new(pool.pool().clone()));
            Ok(MetadataBackendHandle {
                store,
                pool: Some(pool),
            })
        }
        MetadataBackend::Memory => {
            info!("Using in-memory metadata store; records will not survive a restart");
            Ok(MetadataBackendHandle {
                store: Arc::new(MemoryItemRepository::new()),
                pool: None,
            })
        }
    }
}
