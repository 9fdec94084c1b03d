//! # gatherer-core
//!
//! Core crate for Gatherer. Contains the content/metadata store traits,
//! configuration schemas, the typed item identifier, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other Gatherer crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
