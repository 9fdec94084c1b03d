//! # gatherer-service
//!
//! The storage coordinator: the only component allowed to write blobs and
//! metadata records. It composes a [`ContentStore`] and a
//! [`MetadataStore`] so that a record exists exactly when its blob does.
//!
//! Dependencies are injected at construction time as `Arc` trait objects,
//! so callers never see which backends are in use.
//!
//! [`ContentStore`]: gatherer_core::traits::ContentStore
//! [`MetadataStore`]: gatherer_core::traits::MetadataStore

pub mod coordinator;
mod guard;

pub use coordinator::{StorageCoordinator, StoreHealth, UploadRequest};
