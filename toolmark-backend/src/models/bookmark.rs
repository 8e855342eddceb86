use serde::{Deserialize, Serialize};

/// A bookmarked AI tool. Every stored bookmark has non-empty fields and an id
/// that is unique within its collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub name: String,
    pub url: String,
    pub category: String,
}

impl Bookmark {
    /// Name of the first empty field, if any (checked in name, url, category order).
    pub fn first_empty_field(&self) -> Option<BookmarkField> {
        first_empty(&self.name, &self.url, &self.category)
    }
}

/// Request to create a bookmark. Missing fields deserialize as empty strings
/// so validation, not the JSON layer, rejects them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewBookmark {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub category: String,
}

/// The user-supplied fields of a bookmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookmarkField {
    Name,
    Url,
    Category,
}

impl BookmarkField {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookmarkField::Name => "name",
            BookmarkField::Url => "url",
            BookmarkField::Category => "category",
        }
    }
}

impl std::fmt::Display for BookmarkField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn first_empty(name: &str, url: &str, category: &str) -> Option<BookmarkField> {
    if name.is_empty() {
        Some(BookmarkField::Name)
    } else if url.is_empty() {
        Some(BookmarkField::Url)
    } else if category.is_empty() {
        Some(BookmarkField::Category)
    } else {
        None
    }
}
