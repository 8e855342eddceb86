pub mod bookmark;

pub use bookmark::{Bookmark, BookmarkField, NewBookmark};
