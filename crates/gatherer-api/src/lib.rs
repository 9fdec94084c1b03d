//! # gatherer-api
//!
//! HTTP API layer for Gatherer built on Axum.
//!
//! Provides the upload, item, and health endpoints, request logging and CORS
//! middleware, DTOs, and the mapping from `AppError` to HTTP responses.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
