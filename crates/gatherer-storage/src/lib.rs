//! # gatherer-storage
//!
//! Content store implementations for Gatherer: the local filesystem store
//! used in production and an in-memory store for ephemeral runs and tests.

pub mod naming;
pub mod providers;

pub use providers::{LocalContentStore, MemoryContentStore, build_content_store};
