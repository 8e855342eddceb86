//! BookmarkStore — the canonical bookmark collection
//!
//! Holds the collection in memory and mirrors it into a single durable slot
//! as a JSON array. Every mutation is written in full; a failed write rolls
//! the in-memory list back, so the slot and memory never disagree. Loading
//! and dropping a store never writes.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use super::BookmarkError;
use crate::db::SlotStorage;
use crate::models::bookmark::first_empty;
use crate::models::Bookmark;

pub struct BookmarkStore {
    slots: Arc<dyn SlotStorage>,
    slot_key: String,
    bookmarks: Vec<Bookmark>,
    last_persisted_at: Option<DateTime<Utc>>,
}

impl BookmarkStore {
    /// Create an empty store bound to `slot_key`. Nothing is read until `load`.
    pub fn new(slots: Arc<dyn SlotStorage>, slot_key: impl Into<String>) -> Self {
        Self {
            slots,
            slot_key: slot_key.into(),
            bookmarks: Vec::new(),
            last_persisted_at: None,
        }
    }

    /// Create a store and load whatever the slot currently holds
    pub fn open(slots: Arc<dyn SlotStorage>, slot_key: impl Into<String>) -> Result<Self, BookmarkError> {
        let mut store = Self::new(slots, slot_key);
        store.load()?;
        Ok(store)
    }

    /// Replace the in-memory collection with the slot's contents.
    ///
    /// An absent slot or unparsable content yields an empty collection.
    /// Records that break the collection invariant (an empty field or a
    /// repeated id) are dropped. Only a failing storage backend is an error.
    pub fn load(&mut self) -> Result<usize, BookmarkError> {
        let raw = self.slots.get(&self.slot_key)?;

        self.bookmarks = match raw {
            None => {
                log::info!("[BOOKMARKS] Slot '{}' is empty, starting fresh", self.slot_key);
                Vec::new()
            }
            Some(raw) => match serde_json::from_str::<Vec<Bookmark>>(&raw) {
                Ok(records) => sanitize(records),
                Err(e) => {
                    log::warn!(
                        "[BOOKMARKS] Slot '{}' holds malformed data ({}), starting with an empty collection",
                        self.slot_key,
                        e
                    );
                    Vec::new()
                }
            },
        };

        log::info!("[BOOKMARKS] Loaded {} bookmarks", self.bookmarks.len());
        Ok(self.bookmarks.len())
    }

    /// Append a new bookmark and persist. Any empty argument rejects the call
    /// without touching the collection or the slot.
    pub fn add(&mut self, name: &str, url: &str, category: &str) -> Result<Bookmark, BookmarkError> {
        if let Some(field) = first_empty(name, url, category) {
            return Err(BookmarkError::Validation { field });
        }

        let bookmark = Bookmark {
            id: self.fresh_id(),
            name: name.to_string(),
            url: url.to_string(),
            category: category.to_string(),
        };

        let mut next = self.bookmarks.clone();
        next.push(bookmark.clone());
        self.commit(next)?;

        log::info!("[BOOKMARKS] Added '{}' ({}) in '{}'", bookmark.name, bookmark.id, bookmark.category);
        Ok(bookmark)
    }

    /// Remove the bookmark with `id`. A miss is not an error; the collection
    /// is persisted either way. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> Result<bool, BookmarkError> {
        let next: Vec<Bookmark> = self.bookmarks.iter().filter(|b| b.id != id).cloned().collect();
        let removed = next.len() != self.bookmarks.len();
        self.commit(next)?;

        if removed {
            log::info!("[BOOKMARKS] Removed {}", id);
        } else {
            log::debug!("[BOOKMARKS] Remove of unknown id {} was a no-op", id);
        }
        Ok(removed)
    }

    /// Overwrite the slot with the whole current collection
    pub fn persist(&mut self) -> Result<(), BookmarkError> {
        self.write_slot(&self.bookmarks)?;
        self.last_persisted_at = Some(Utc::now());
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }

    pub fn list(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    pub fn slot_key(&self) -> &str {
        &self.slot_key
    }

    pub fn backend_name(&self) -> &'static str {
        self.slots.backend_name()
    }

    /// When the slot was last written successfully by this store
    pub fn last_persisted_at(&self) -> Option<DateTime<Utc>> {
        self.last_persisted_at
    }

    /// Swap in `next` and persist it; on a failed write the previous
    /// collection is restored.
    fn commit(&mut self, next: Vec<Bookmark>) -> Result<(), BookmarkError> {
        let previous = std::mem::replace(&mut self.bookmarks, next);
        if let Err(e) = self.persist() {
            self.bookmarks = previous;
            return Err(e);
        }
        Ok(())
    }

    fn write_slot(&self, collection: &[Bookmark]) -> Result<(), BookmarkError> {
        let encoded = serde_json::to_string(collection)
            .map_err(|e| BookmarkError::Storage(format!("Failed to encode bookmarks: {}", e)))?;
        self.slots.set(&self.slot_key, &encoded).map_err(|e| {
            log::error!("[BOOKMARKS] Failed to write slot '{}': {}", self.slot_key, e);
            BookmarkError::from(e)
        })
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

/// Drop records with empty fields and repeated ids, keeping the first of each id
fn sanitize(records: Vec<Bookmark>) -> Vec<Bookmark> {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(records.len());

    for record in records {
        if record.id.is_empty() {
            log::warn!("[BOOKMARKS] Dropping stored bookmark '{}' with empty id", record.name);
            continue;
        }
        if let Some(field) = record.first_empty_field() {
            log::warn!("[BOOKMARKS] Dropping stored bookmark {} with empty {}", record.id, field);
            continue;
        }
        if !seen.insert(record.id.clone()) {
            log::warn!("[BOOKMARKS] Dropping stored bookmark with duplicate id {}", record.id);
            continue;
        }
        kept.push(record);
    }

    kept
}
