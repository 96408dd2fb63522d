//! # Persistence Port
//!
//! Where the cart survives between sessions.
//!
//! ```text
//! ┌──────────────┐  load/save  ┌──────────────────────┐  read/write  ┌────────────────┐
//! │  CartStore   │────────────►│ StoragePersistence<S>│─────────────►│ KeyValueStorage│
//! └──────────────┘             │  key = "cart"        │              │ Memory | File  │
//!                              │  CartRecord JSON     │              └────────────────┘
//!                              └──────────────────────┘
//! ```
//!
//! The record shape is `{ items: [{product, quantity}], totalItems, totalPrice }`
//! with no version field. Stored totals are ignored on load and recomputed.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use storefront_core::{CartRecord, CartState, CART_STORAGE_KEY};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Key-Value Storage
// =============================================================================

/// String storage keyed by name, in the manner of browser local storage.
pub trait KeyValueStorage: Send + Sync {
    /// Returns the stored value, or `None` if the key was never written.
    fn read(&self, key: &str) -> StoreResult<Option<String>>;

    fn write(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Deletes the key. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// In-process storage. Lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

impl KeyValueStorage for MemoryStorage {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous record intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Uses `dir` for storage. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStorage for FileStorage {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), bytes = value.len(), "Wrote storage file");
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// Cart Persistence
// =============================================================================

/// Loads and saves the whole cart.
pub trait CartPersistence: Send + Sync {
    /// Returns the stored cart, `None` when nothing was stored.
    ///
    /// An undecodable or inconsistent record is an error; the store turns
    /// it into an empty cart.
    fn load(&self) -> StoreResult<Option<CartState>>;

    fn save(&self, cart: &CartState) -> StoreResult<()>;
}

/// Stores the cart record as JSON in a [`KeyValueStorage`].
#[derive(Debug)]
pub struct StoragePersistence<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> StoragePersistence<S> {
    /// Persists under the standard `cart` key.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, CART_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        StoragePersistence {
            storage,
            key: key.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<S: KeyValueStorage> CartPersistence for StoragePersistence<S> {
    fn load(&self) -> StoreResult<Option<CartState>> {
        let Some(raw) = self.storage.read(&self.key)? else {
            return Ok(None);
        };
        let record: CartRecord = serde_json::from_str(&raw)?;
        let cart = CartState::try_from(record)?;
        Ok(Some(cart))
    }

    fn save(&self, cart: &CartState) -> StoreResult<()> {
        let json = serde_json::to_string(cart)?;
        self.storage.write(&self.key, &json)
    }
}

impl<P: CartPersistence + ?Sized> CartPersistence for Box<P> {
    fn load(&self) -> StoreResult<Option<CartState>> {
        (**self).load()
    }

    fn save(&self, cart: &CartState) -> StoreResult<()> {
        (**self).save(cart)
    }
}

/// Persistence that keeps nothing. Every session starts empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPersistence;

impl CartPersistence for NoPersistence {
    fn load(&self) -> StoreResult<Option<CartState>> {
        Ok(None)
    }

    fn save(&self, _cart: &CartState) -> StoreResult<()> {
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
