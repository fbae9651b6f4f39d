//! Durable key-value slots for the cart.
//!
//! The page keeps its cart in a single named slot that survives reloads. The
//! [`CartStorage`] trait is that slot's contract; [`MemoryStorage`] backs
//! tests and ephemeral sessions, [`FileStorage`] backs the CLI with one JSON
//! file per key.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default slot name for the serialized cart.
pub const DEFAULT_CART_KEY: &str = "powerhitCart";

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying filesystem operation failed.
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    /// Key cannot be mapped to a slot (e.g., contains a path separator).
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// A durable string slot store, keyed by name.
pub trait CartStorage {
    /// Read the raw value stored under `key`, or `None` if the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the slot under `key` with `value`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Clear the slot under `key`. Clearing an empty slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: CartStorage + ?Sized> CartStorage for &mut T {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

// =============================================================================
// In-memory backend
// =============================================================================

/// In-memory storage. Never fails.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with one slot pre-populated.
    #[must_use]
    pub fn with_slot(key: &str, value: &str) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.to_string(), value.to_string());
        Self { slots }
    }

    /// Peek at a slot without going through the trait.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl CartStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.slots.remove(key);
        Ok(())
    }
}

// =============================================================================
// File backend
// =============================================================================

/// File-backed storage: each key is a `<key>.json` file under one directory.
///
/// Writes go to a temporary sibling file and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a file store rooted at `dir`. The directory is created lazily
    /// on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory of this store.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl CartStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_err)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_store() -> FileStorage {
        FileStorage::new(std::env::temp_dir().join(format!("powerhit-{}", uuid::Uuid::new_v4())))
    }

    #[test]
    fn test_memory_storage_roundtrip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.read("cart").unwrap(), None);

        storage.write("cart", "[]").unwrap();
        assert_eq!(storage.read("cart").unwrap().as_deref(), Some("[]"));

        storage.remove("cart").unwrap();
        assert_eq!(storage.get("cart"), None);
    }

    #[test]
    fn test_memory_storage_remove_missing_is_ok() {
        let mut storage = MemoryStorage::new();
        assert!(storage.remove("nothing").is_ok());
    }

    #[test]
    fn test_file_storage_missing_slot_reads_none() {
        let storage = temp_store();
        assert_eq!(storage.read(DEFAULT_CART_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_storage_write_then_read() {
        let mut storage = temp_store();
        storage.write(DEFAULT_CART_KEY, r#"[{"id":1}]"#).unwrap();
        assert_eq!(
            storage.read(DEFAULT_CART_KEY).unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );
        assert!(storage.dir().join("powerhitCart.json").exists());
        assert!(!storage.dir().join("powerhitCart.json.tmp").exists());

        storage.remove(DEFAULT_CART_KEY).unwrap();
        assert_eq!(storage.read(DEFAULT_CART_KEY).unwrap(), None);
        fs::remove_dir_all(storage.dir()).unwrap();
    }

    #[test]
    fn test_file_storage_overwrites() {
        let mut storage = temp_store();
        storage.write("slot", "first").unwrap();
        storage.write("slot", "second").unwrap();
        assert_eq!(storage.read("slot").unwrap().as_deref(), Some("second"));
        fs::remove_dir_all(storage.dir()).unwrap();
    }

    #[test]
    fn test_file_storage_rejects_bad_keys() {
        let mut storage = temp_store();
        for key in ["", "../escape", ".hidden", "a/b", "a b"] {
            assert!(matches!(
                storage.write(key, "x"),
                Err(StorageError::InvalidKey(_))
            ));
        }
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn write_through<S: CartStorage>(mut storage: S) {
            storage.write("k", "v").unwrap();
        }

        let mut storage = MemoryStorage::new();
        write_through(&mut storage);
        assert_eq!(storage.get("k"), Some("v"));
    }
}
