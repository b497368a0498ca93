//! Persistence backends for the theme mode.
//!
//! The store only needs a tiny string key/value interface, [`ModeStorage`].
//! Two backends ship with the crate:
//!
//! - [`MemoryStorage`]: in-process map; clones share the same entries, which
//!   makes it handy for tests and for hosts that persist elsewhere.
//! - [`FileStorage`]: a JSON object on disk, by default in the platform config
//!   directory.
//!
//! ## Storage Layout
//!
//! ```text
//! <config dir>/shade/
//! └── theme.json      # {"app-theme-mode": "dark"}
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use directories::ProjectDirs;

use crate::error::StorageError;

/// Key the mode is stored under unless overridden.
pub const DEFAULT_STORAGE_KEY: &str = "app-theme-mode";

const STORAGE_FILENAME: &str = "theme.json";

/// A synchronous string key/value store.
pub trait ModeStorage {
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Which backend a mode store should persist to.
pub enum StorageChoice {
    /// Keep the mode in memory only.
    None,
    /// A [`FileStorage`] in the platform config directory.
    Default,
    /// A caller-provided backend.
    Custom(Box<dyn ModeStorage>),
}

impl StorageChoice {
    pub fn custom(storage: impl ModeStorage + 'static) -> Self {
        StorageChoice::Custom(Box::new(storage))
    }
}

impl fmt::Debug for StorageChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageChoice::None => f.write_str("None"),
            StorageChoice::Default => f.write_str("Default"),
            StorageChoice::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// In-memory backend. Clones share entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl ModeStorage for MemoryStorage {
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// File backend: a JSON object of string values.
///
/// The file is read on every access and rewritten on every change; a missing
/// file reads as empty.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A file storage in the platform config directory, if one exists.
    pub fn in_config_dir() -> Option<Self> {
        ProjectDirs::from("", "shade", "shade")
            .map(|dirs| Self::new(dirs.config_dir().join(STORAGE_FILENAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let content = serde_json::to_string_pretty(entries).map_err(|source| {
            StorageError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, content).map_err(io_err)
    }
}

impl ModeStorage for FileStorage {
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}
