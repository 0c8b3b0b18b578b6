//! Cart storage
//!
//! The cart is persisted under a single key as a JSON list of
//! `{product, quantity}` objects, each `product` a full copy of the catalog
//! entry at the time it was added.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::cart::CartLineItem;

/// Key the cart is stored under.
pub const CART_STORAGE_KEY: &str = "cart";

/// Errors reading or writing persisted cart state.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store could not be read or written.
    #[error("cart storage unavailable: {0}")]
    Io(#[from] io::Error),

    /// Line items could not be encoded.
    #[error("failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Key/value persistence for the cart entry.
#[cfg_attr(test, mockall::automock)]
pub trait CartStorage {
    /// Read the persisted payload, `None` when nothing has been stored.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store cannot be read.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Replace the persisted payload.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store cannot be written.
    fn save(&mut self, payload: &str) -> Result<(), StorageError>;

    /// Delete the persisted payload. Deleting a missing entry succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store cannot be written.
    fn erase(&mut self) -> Result<(), StorageError>;
}

/// Encode line items in the persisted layout.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if serialization fails.
pub fn encode_items(items: &[CartLineItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

/// Decode line items from the persisted layout.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if the payload is not a valid list of line items.
pub fn decode_items(payload: &str) -> Result<Vec<CartLineItem>, serde_json::Error> {
    serde_json::from_str(payload)
}

/// In-memory key/value store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: FxHashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with one entry already present.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut storage = Self::new();
        storage.set(key, value);
        storage
    }

    /// Read an entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Write an entry.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.get(CART_STORAGE_KEY).map(str::to_string))
    }

    fn save(&mut self, payload: &str) -> Result<(), StorageError> {
        self.set(CART_STORAGE_KEY, payload);
        Ok(())
    }

    fn erase(&mut self) -> Result<(), StorageError> {
        self.entries.remove(CART_STORAGE_KEY);
        Ok(())
    }
}

/// Stores the cart entry as a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Store the cart at `path`. Nothing is touched until the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the cart file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStorage for FileStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn save(&mut self, payload: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, payload)?;

        Ok(())
    }

    fn erase(&mut self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}
