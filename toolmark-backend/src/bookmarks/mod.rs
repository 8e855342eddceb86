//! Bookmark collection: the canonical store and the query views derived from it.

pub mod query;
pub mod store;

pub use query::{derive_view, QueryParams};
pub use store::BookmarkStore;

use crate::db::SlotError;
use crate::models::BookmarkField;

#[derive(Debug, thiserror::Error)]
pub enum BookmarkError {
    /// An add request left a required field empty. Nothing was changed or written.
    #[error("{field} must not be empty")]
    Validation { field: BookmarkField },
    /// The slot backend failed to read or write.
    #[error("bookmark storage failed: {0}")]
    Storage(String),
}

impl From<SlotError> for BookmarkError {
    fn from(e: SlotError) -> Self {
        BookmarkError::Storage(e.to_string())
    }
}
