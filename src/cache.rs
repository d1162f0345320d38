//! Persistence for locale lists and catalogue data.
//!
//! The [`CatalogueManager`](crate::catalogue::CatalogueManager) stores two
//! kinds of entries:
//! - `locales`: the list of discovered locale names
//! - `locales/<locale>`: the [`CatalogueData`](crate::catalogue::CatalogueData) of one locale
//!
//! Saving `None` removes an entry.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::Result;

/// Key-value store for cached catalogue data.
pub trait CatalogueCache {
    /// Load the value stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<Value>>;

    /// Store `value` under `key`; `None` clears the entry.
    fn save(&self, key: &str, value: Option<Value>) -> Result<()>;
}

/// Cache that stores nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCache;

impl CatalogueCache for NullCache {
    fn load(&self, _key: &str) -> Result<Option<Value>> {
        Ok(None)
    }

    fn save(&self, _key: &str, _value: Option<Value>) -> Result<()> {
        Ok(())
    }
}

/// In-process cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RefCell<HashMap<String, Value>>,
}

impl MemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Check if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl CatalogueCache for MemoryCache {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: Option<Value>) -> Result<()> {
        let mut entries = self.entries.borrow_mut();
        match value {
            Some(value) => {
                entries.insert(key.to_string(), value);
            },
            None => {
                entries.remove(key);
            },
        }
        Ok(())
    }
}

/// Cache persisted as one JSON file per key under a directory.
///
/// The key `locales/ru` is stored in `<directory>/locales/ru.json`.
#[derive(Debug, Clone)]
pub struct FileCache {
    directory: PathBuf,
}

impl FileCache {
    /// Create a cache rooted at `directory`. The directory is created lazily.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self { directory: directory.into() }
    }

    /// Root directory of the cache.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let mut path = self.directory.clone();
        for segment in key.split('/').filter(|s| !s.is_empty() && *s != "." && *s != "..") {
            path.push(segment);
        }
        path.set_extension("json");
        path
    }
}

impl CatalogueCache for FileCache {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)?;
        match serde_json::from_str(&contents) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring corrupt cache entry");
                Ok(None)
            },
        }
    }

    fn save(&self, key: &str, value: Option<Value>) -> Result<()> {
        let path = self.path_for(key);
        match value {
            Some(value) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&path, serde_json::to_string_pretty(&value)?)?;
            },
            None => {
                if path.exists() {
                    std::fs::remove_file(&path)?;
                }
            },
        }
        Ok(())
    }
}
