//! Store traits defined in `gatherer-core` and implemented by other crates.

pub mod content;
pub mod metadata;

pub use content::{ByteStream, ContentStore, StoredBlob};
pub use metadata::MetadataStore;
