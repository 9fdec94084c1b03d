//! Core type definitions used across the Gatherer workspace.

pub mod id;

pub use id::ItemId;
