//! # gatherer-entity
//!
//! Domain entity models for Gatherer. [`item::Item`] is the row stored in
//! the `items` table; [`item::FileMetadata`] is what the coordinator hands
//! back to callers.

pub mod item;

pub use item::{FileMetadata, Item};
