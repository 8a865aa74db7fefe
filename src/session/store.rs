//! Key-value persistence for the session.
//!
//! The store is deliberately flat: three string keys, each written as soon as
//! the value it tracks changes.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::reducer::Effect;

/// Path of the last loaded file.
pub const LAST_FILE_KEY: &str = "lastFile";
/// Last cursor position, as a decimal string.
pub const LAST_INDEX_KEY: &str = "lastIndex";
/// Last link template.
pub const TEMPLATE_KEY: &str = "customUrl";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access session store {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("session store {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Minimal string key-value store.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    /// Returns an error if the value cannot be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// # Errors
    /// Returns an error if the removal cannot be persisted.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-process store, lost on exit.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Store backed by a JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self::empty(path));
        }
        let content = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let values = if content.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?
        };
        Ok(Self { path, values })
    }

    /// An empty store that will write to `path` on the first change.
    pub const fn empty(path: PathBuf) -> Self {
        Self {
            path,
            values: BTreeMap::new(),
        }
    }

    fn flush(&self) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&self.values).map_err(|source| {
            StoreError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, format!("{json}\n")).map_err(io_err)
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.values.get(key).is_some_and(|v| v == value) {
            return Ok(());
        }
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Session values read from the store at startup.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub last_file_path: Option<String>,
    pub last_cursor: Option<usize>,
    pub last_template: Option<String>,
}

impl PersistedSession {
    /// Read the persisted values. Unparsable cursors are treated as absent.
    pub fn read(store: &dyn SessionStore) -> Self {
        Self {
            last_file_path: store.get(LAST_FILE_KEY).filter(|p| !p.is_empty()),
            last_cursor: store
                .get(LAST_INDEX_KEY)
                .and_then(|raw| raw.trim().parse().ok()),
            last_template: store.get(TEMPLATE_KEY),
        }
    }
}

/// Write the persistence side of `effect` to `store`.
///
/// Returns `Ok(false)` for effects that do not touch the store.
///
/// # Errors
/// Propagates the store's write failure.
pub fn persist(store: &mut dyn SessionStore, effect: &Effect) -> Result<bool, StoreError> {
    match effect {
        Effect::PersistCursor(index) => store.set(LAST_INDEX_KEY, &index.to_string())?,
        Effect::PersistTemplate(template) => store.set(TEMPLATE_KEY, template)?,
        Effect::PersistFilePath(path) => store.set(LAST_FILE_KEY, path)?,
        Effect::ClearFilePath => store.remove(LAST_FILE_KEY)?,
        Effect::CopyToClipboard(_) => return Ok(false),
    }
    Ok(true)
}
