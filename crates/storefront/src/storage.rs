//! Persistent key-value store adapter.
//!
//! Wraps a synchronous local key-value backend (the stand-in for browser
//! local storage) and handles JSON (de)serialization. Reads tolerate absent
//! keys and corrupt data by returning a caller-supplied fallback; writes
//! swallow failures after logging them. Nothing here is ever surfaced to the
//! user - worst case is an empty cart or a logged-out session.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Storage keys owned by the storefront core.
///
/// The cart and the session own disjoint keys; no other code writes these.
pub mod keys {
    /// Key for the persisted cart (JSON array of cart lines).
    pub const CART: &str = "lvl_carrito";

    /// Key for the raw bearer token string.
    pub const TOKEN: &str = "jwtToken";

    /// Key for the persisted session identity (JSON object).
    pub const USER: &str = "usuario";
}

/// A synchronous string-keyed storage backend.
///
/// Implementations must not fail loudly: `set`/`remove` log and swallow
/// errors, mirroring how browser local storage quota failures were treated.
pub trait StorageBackend: Send + Sync {
    /// Return the raw string stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, overwriting any prior value.
    fn set(&self, key: &str, value: &str);

    /// Remove `key` if present.
    fn remove(&self, key: &str);
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .map(|entries| entries.get(key).cloned())
            .unwrap_or_default()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

/// File-backed storage: one `<key>.json` file per key under a directory.
///
/// This is what the CLI uses so cart and session survive between runs, the
/// same way local storage survives browser restarts.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a file-backed store rooted at `dir`, creating it if needed.
    #[must_use]
    pub fn new(dir: PathBuf) -> Self {
        if let Err(e) = std::fs::create_dir_all(&dir) {
            tracing::warn!("Failed to create storage directory {}: {e}", dir.display());
        }
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are internal constants, but sanitize anyway so a key can
        // never escape the storage directory.
        let safe: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl StorageBackend for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        let path = self.path_for(key);
        if let Err(e) = std::fs::write(&path, value) {
            tracing::warn!("Failed to write {}: {e}", path.display());
        }
    }

    fn remove(&self, key: &str) {
        let path = self.path_for(key);
        if path.exists()
            && let Err(e) = std::fs::remove_file(&path)
        {
            tracing::warn!("Failed to remove {}: {e}", path.display());
        }
    }
}

/// Typed JSON view over a [`StorageBackend`].
///
/// Cheap to clone; clones share the same backend.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn StorageBackend>,
}

impl Store {
    /// Create a store over the given backend.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Convenience constructor for an in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Read and parse the JSON value stored under `key`.
    ///
    /// Returns `fallback` unchanged if the key is absent or the stored data
    /// is not valid JSON for `T`. Malformed data is logged and swallowed,
    /// never propagated.
    pub fn read<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        let Some(raw) = self.backend.get(key) else {
            return fallback;
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Corrupt data under key {key}, using fallback: {e}");
                fallback
            }
        }
    }

    /// Serialize `value` to JSON and store it under `key`.
    ///
    /// Overwrites any prior value. Serialization failures are logged and
    /// swallowed; callers have no failure path to handle.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.backend.set(key, &raw),
            Err(e) => tracing::warn!("Failed to serialize value for key {key}: {e}"),
        }
    }

    /// Read the raw string under `key` without JSON parsing.
    ///
    /// Used for the bearer token, which is persisted as-is rather than as a
    /// JSON document.
    pub fn read_raw(&self, key: &str) -> Option<String> {
        self.backend.get(key)
    }

    /// Store a raw string under `key` without JSON encoding.
    pub fn write_raw(&self, key: &str, value: &str) {
        self.backend.set(key, value);
    }

    /// Remove `key` from the backend.
    pub fn remove(&self, key: &str) {
        self.backend.remove(key);
    }
}
