use std::env;
use std::str::FromStr;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Key of the durable slot holding the bookmark collection.
    pub const BOOKMARKS_SLOT_KEY: &str = "BOOKMARKS_SLOT_KEY";
    /// "sqlite" (default) or "memory". Memory storage does not survive restarts.
    pub const BOOKMARKS_STORAGE: &str = "BOOKMARKS_STORAGE";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 8080;
    pub const DATABASE_URL: &str = "./.db/toolmark.db";
    pub const BOOKMARKS_SLOT_KEY: &str = "aiBookmarks";
}

/// Where the bookmark slot is kept
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Sqlite => "sqlite",
            StorageBackend::Memory => "memory",
        }
    }
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(StorageBackend::Sqlite),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub slot_key: String,
    pub storage: StorageBackend,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup. Unparsable values
    /// fall back to their defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(env_vars::PORT) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("Invalid {} value '{}', using {}", env_vars::PORT, raw, defaults::PORT);
                defaults::PORT
            }),
            None => defaults::PORT,
        };

        let database_url = lookup(env_vars::DATABASE_URL)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| defaults::DATABASE_URL.to_string());

        let slot_key = lookup(env_vars::BOOKMARKS_SLOT_KEY)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| defaults::BOOKMARKS_SLOT_KEY.to_string());

        let storage = match lookup(env_vars::BOOKMARKS_STORAGE) {
            Some(raw) => raw.parse::<StorageBackend>().unwrap_or_else(|e| {
                log::warn!(
                    "{}: {}, using {}",
                    env_vars::BOOKMARKS_STORAGE,
                    e,
                    StorageBackend::default().as_str()
                );
                StorageBackend::default()
            }),
            None => StorageBackend::default(),
        };

        Self {
            port,
            database_url,
            slot_key,
            storage,
        }
    }
}
