//! Uploaded item entities.

pub mod metadata;
pub mod model;

pub use metadata::FileMetadata;
pub use model::Item;
