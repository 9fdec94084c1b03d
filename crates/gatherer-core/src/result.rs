//! Convenience result type alias for Gatherer.

use crate::error::AppError;

/// A specialized `Result` type for Gatherer operations.
pub type AppResult<T> = Result<T, AppError>;
