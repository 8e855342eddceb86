//! Durable key-value slots.
//!
//! The bookmark collection lives in a single named slot. `SlotStorage` is the
//! synchronous get/set primitive the store is written against; `Database`
//! backs it with SQLite and `MemorySlots` keeps it in process memory.

pub mod memory;
pub mod sqlite;
pub mod tables;

pub use memory::MemorySlots;
pub use sqlite::Database;

/// Failure of the slot backend itself (as opposed to bad data inside a slot).
#[derive(Debug, thiserror::Error)]
pub enum SlotError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("slot storage lock poisoned")]
    Poisoned,
}

/// Synchronous key-value storage for whole-value slots.
pub trait SlotStorage: Send + Sync {
    /// Read a slot. `Ok(None)` when the slot has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, SlotError>;

    /// Overwrite a slot with a new value.
    fn set(&self, key: &str, value: &str) -> Result<(), SlotError>;

    /// Short backend name for status reporting.
    fn backend_name(&self) -> &'static str;
}
