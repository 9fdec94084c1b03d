//! PostgreSQL item repository.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use gatherer_core::error::{AppError, ErrorKind};
use gatherer_core::result::AppResult;
use gatherer_core::traits::metadata::MetadataStore;
use gatherer_core::types::ItemId;
use gatherer_entity::item::Item;

const ITEM_COLUMNS: &str = "id, original_name, stored_name, file_path, file_size, mime_type, \
                            created_at, updated_at";

/// Durable metadata store over the `items` table.
#[derive(Debug, Clone)]
pub struct PostgresItemRepository {
    pool: PgPool,
}

impl PostgresItemRepository {
    /// Create a new item repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetadataStore<Item> for PostgresItemRepository {
    fn backend_type(&self) -> &str {
        "postgres"
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::MetadataRead, "Health check failed", e))
    }

    async fn create(&self, item: &Item) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO items (id, original_name, stored_name, file_path, file_size, mime_type, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(item.id)
        .bind(&item.original_name)
        .bind(&item.stored_name)
        .bind(&item.file_path)
        .bind(item.file_size)
        .bind(&item.mime_type)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::conflict(format!("Item {} already exists", item.id))
            }
            _ => AppError::with_source(ErrorKind::MetadataWrite, "Failed to insert item", e),
        })?;

        debug!(item_id = %item.id, "Inserted item");
        Ok(())
    }

    async fn get_by_id(&self, id: ItemId) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(&format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::MetadataRead, "Failed to get item", e))?
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))
    }

    async fn delete(&self, id: ItemId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::MetadataWrite, "Failed to delete item", e)
            })?;

        match result.rows_affected() {
            1 => Ok(()),
            0 => Err(AppError::not_found(format!("Item {id} not found"))),
            n => Err(AppError::internal(format!(
                "Deleting item {id} affected {n} rows"
            ))),
        }
    }

    async fn list(&self) -> AppResult<Vec<Item>> {
        sqlx::query_as::<_, Item>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::MetadataRead, "Failed to list items", e))
    }
}
