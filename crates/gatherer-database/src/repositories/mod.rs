//! Metadata store implementations for item records.

pub mod item;
pub mod memory;

pub use item::PostgresItemRepository;
pub use memory::MemoryItemRepository;
