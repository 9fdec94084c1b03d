//! Route definitions for the Gatherer HTTP API.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::handlers::upload::MULTIPART_OVERHEAD;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .storage
        .max_upload_size_bytes
        .saturating_add(MULTIPART_OVERHEAD);
    let body_limit = usize::try_from(body_limit).unwrap_or(usize::MAX);
    let timeout_secs = state.config.server.request_timeout_seconds;

    let mut router = Router::new()
        .merge(upload_routes())
        .merge(item_routes())
        .merge(health_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum_middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&state.config.server.cors));

    if timeout_secs > 0 {
        router = router.layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(timeout_secs),
        ));
    }

    router.with_state(state)
}

/// Multipart upload
fn upload_routes() -> Router<AppState> {
    Router::new().route("/upload", post(handlers::upload::upload))
}

/// Item listing, lookup, deletion
fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(handlers::items::list_items))
        .route(
            "/items/{id}",
            get(handlers::items::get_item).delete(handlers::items::delete_item),
        )
}

/// Health checks
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
