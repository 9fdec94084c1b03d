//! Item listing, lookup, and deletion handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::dto::response::ItemResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /items
pub async fn list_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    let items = state.coordinator.list().await?;
    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

/// GET /items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemResponse>, ApiError> {
    let item = state.coordinator.get(&id).await?;
    Ok(Json(ItemResponse::from(item)))
}

/// DELETE /items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.coordinator.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
