//! Derived, read-only views over a bookmark collection.
//!
//! Nothing here mutates the store. The HTTP layer calls `derive_view` after
//! every mutation or change of search/category input.

use serde::{Deserialize, Serialize};

use crate::models::Bookmark;

/// Category value that disables category filtering
pub const ALL_CATEGORIES: &str = "all";

/// Transient query inputs. Absent values mean "match everything".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryParams {
    pub search: Option<String>,
    pub category: Option<String>,
}

impl QueryParams {
    pub fn search_term(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }

    /// An empty category (e.g. `?category=`) means no filter
    pub fn category_filter(&self) -> &str {
        self.category.as_deref().filter(|c| !c.is_empty()).unwrap_or(ALL_CATEGORIES)
    }
}

/// A selectable category with its display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOption {
    pub value: String,
    pub label: String,
}

/// Everything the presentation layer needs to render the list
#[derive(Debug, Clone, Serialize)]
pub struct BookmarkView {
    pub bookmarks: Vec<Bookmark>,
    pub categories: Vec<CategoryOption>,
    pub search: String,
    pub category: String,
    pub total: usize,
    pub visible: usize,
}

/// "all" followed by each distinct category in first-seen order
pub fn categories(collection: &[Bookmark]) -> Vec<String> {
    let mut out = vec![ALL_CATEGORIES.to_string()];
    for bookmark in collection {
        if !out.iter().any(|c| c == &bookmark.category) {
            out.push(bookmark.category.clone());
        }
    }
    out
}

/// Stable filter: case-insensitive name substring AND category match
pub fn filter<'a>(collection: &'a [Bookmark], search_term: &str, category_filter: &str) -> Vec<&'a Bookmark> {
    let needle = search_term.to_lowercase();
    collection
        .iter()
        .filter(|b| needle.is_empty() || b.name.to_lowercase().contains(&needle))
        .filter(|b| category_filter == ALL_CATEGORIES || b.category == category_filter)
        .collect()
}

/// Display label for a category: first character uppercased ("chat" -> "Chat")
pub fn category_label(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn category_options(collection: &[Bookmark]) -> Vec<CategoryOption> {
    categories(collection)
        .into_iter()
        .map(|value| CategoryOption {
            label: category_label(&value),
            value,
        })
        .collect()
}

/// The explicit re-render step: visible bookmarks plus the category universe
pub fn derive_view(collection: &[Bookmark], params: &QueryParams) -> BookmarkView {
    let search = params.search_term();
    let category = params.category_filter();
    let bookmarks: Vec<Bookmark> = filter(collection, search, category).into_iter().cloned().collect();

    BookmarkView {
        visible: bookmarks.len(),
        total: collection.len(),
        categories: category_options(collection),
        search: search.to_string(),
        category: category.to_string(),
        bookmarks,
    }
}
