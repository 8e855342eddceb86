//! SQLite-backed slot storage.

use rusqlite::{Connection, Result as SqliteResult};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use super::{tables, SlotError, SlotStorage};

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the database file and make sure the slot table exists.
    pub fn new(database_url: &str) -> SqliteResult<Self> {
        if let Some(parent) = Path::new(database_url).parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    log::warn!("[SLOTS] Failed to create database directory {:?}: {}", parent, e);
                }
            }
        }

        let conn = Connection::open(database_url)?;
        Self::from_connection(conn)
    }

    /// In-memory SQLite database, for tests.
    #[cfg(test)]
    pub fn open_in_memory() -> SqliteResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> SqliteResult<Self> {
        tables::slots::init_tables(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub(crate) fn conn(&self) -> Result<MutexGuard<'_, Connection>, SlotError> {
        self.conn.lock().map_err(|_| SlotError::Poisoned)
    }
}

impl SlotStorage for Database {
    fn get(&self, key: &str) -> Result<Option<String>, SlotError> {
        self.get_slot(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SlotError> {
        self.set_slot(key, value)
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_slot_survives_reopen() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("slots.db");
        let db_url = db_path.to_str().unwrap();

        {
            let db = Database::new(db_url).expect("Failed to open database");
            db.set("aiBookmarks", "[]").expect("Failed to write slot");
        }

        let db = Database::new(db_url).expect("Failed to reopen database");
        assert_eq!(db.get("aiBookmarks").unwrap().as_deref(), Some("[]"));
        assert_eq!(db.backend_name(), "sqlite");
    }

    #[test]
    fn test_absent_slot_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get("missing").unwrap().is_none());
    }
}
