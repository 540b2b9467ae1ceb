//! Client-side key/value storage.
//!
//! Each key holds one JSON document that is overwritten in full on every
//! write. There is no schema version and no cross-writer coordination: the
//! last writer to a key wins.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Key under which the shopping cart is stored.
pub const CART_KEY: &str = "cart";
/// Jobs posted from this client, appended after the built-in listings.
pub const POSTED_JOBS_KEY: &str = "postedJobs";
pub const JOB_ALERTS_KEY: &str = "jobAlerts";
pub const SAVED_JOBS_KEY: &str = "savedJobsList";
pub const JOB_APPLICATIONS_KEY: &str = "jobApplications";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage io error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage { entries: HashMap<String, String> }

impl MemoryStorage {
    pub fn new() -> Self { Self::default() }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> { Ok(self.entries.get(key).cloned()) }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Clone, Debug)]
pub struct FileStorage { dir: PathBuf }

impl FileStorage {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        fs::create_dir_all(dir.as_ref())?;
        Ok(Self { dir: dir.as_ref().to_path_buf() })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid { return Err(StorageError::InvalidKey(key.to_string())); }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        fs::write(self.path_for(key)?, value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)?) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Records stored in a [`StoredList`] are matched by this id.
pub trait Identified {
    fn id(&self) -> &str;
}

#[derive(Debug, Error)]
pub enum ListError {
    #[error("List serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A JSON array kept under one key. Every mutation rewrites the whole array,
/// the same way the cart is persisted.
///
/// The list does not own its store so that several lists can share one.
#[derive(Clone, Debug)]
pub struct StoredList<T> {
    key: &'static str,
    items: Vec<T>,
}

impl<T: Identified + Serialize + DeserializeOwned> StoredList<T> {
    /// A missing, unreadable or corrupt entry yields an empty list.
    pub fn load<S: KeyValueStore>(key: &'static str, storage: &S) -> Self {
        let items = match storage.get(key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(key, error = %e, "Discarding unreadable stored list");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(key, error = %e, "Could not read stored list");
                Vec::new()
            }
        };
        Self { key, items }
    }

    pub fn key(&self) -> &'static str { self.key }
    pub fn items(&self) -> &[T] { &self.items }
    pub fn len(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn get(&self, id: &str) -> Option<&T> { self.items.iter().find(|i| i.id() == id) }
    pub fn contains(&self, id: &str) -> bool { self.get(id).is_some() }

    pub fn append<S: KeyValueStore>(&mut self, storage: &mut S, item: T) -> Result<(), ListError> {
        self.items.push(item);
        self.persist(storage)
    }

    /// Removes every record with `id`. Returns whether anything was removed;
    /// storage is left untouched when nothing matched.
    pub fn remove<S: KeyValueStore>(&mut self, storage: &mut S, id: &str) -> Result<bool, ListError> {
        let before = self.items.len();
        self.items.retain(|i| i.id() != id);
        if self.items.len() == before { return Ok(false); }
        self.persist(storage)?;
        Ok(true)
    }

    /// Applies `f` to the first record with `id`.
    pub fn update<S: KeyValueStore>(&mut self, storage: &mut S, id: &str, f: impl FnOnce(&mut T)) -> Result<bool, ListError> {
        let Some(item) = self.items.iter_mut().find(|i| i.id() == id) else { return Ok(false) };
        f(item);
        self.persist(storage)?;
        Ok(true)
    }

    /// Removes the record with `item`'s id if present, appends `item`
    /// otherwise. Returns whether the id is in the list afterwards.
    pub fn toggle<S: KeyValueStore>(&mut self, storage: &mut S, item: T) -> Result<bool, ListError> {
        if self.remove(storage, item.id())? { return Ok(false); }
        self.append(storage, item)?;
        Ok(true)
    }

    fn persist<S: KeyValueStore>(&self, storage: &mut S) -> Result<(), ListError> {
        storage.set(self.key, serde_json::to_string(&self.items)?)?;
        tracing::debug!(key = self.key, len = self.items.len(), "Stored list persisted");
        Ok(())
    }
}
