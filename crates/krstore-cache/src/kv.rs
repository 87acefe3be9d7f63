//! Typed key-value store wrapper with automatic serialization.

use std::sync::Arc;

use crate::backend::{FileBackend, KvBackend, MemoryBackend};
use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe cache over a [`KvBackend`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Cloning a `Cache` shares the backend.
#[derive(Debug, Clone)]
pub struct Cache {
    backend: Arc<dyn KvBackend>,
}

impl Cache {
    /// Wrap an existing backend.
    pub fn new(backend: impl KvBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Wrap a shared backend.
    pub fn from_shared(backend: Arc<dyn KvBackend>) -> Self {
        Self { backend }
    }

    /// Open a volatile in-memory store.
    ///
    /// # Example
    ///
    /// ```
    /// use krstore_cache::Cache;
    ///
    /// let cache = Cache::in_memory();
    /// cache.set("user", &"ana").unwrap();
    /// assert_eq!(cache.get::<String>("user").unwrap().as_deref(), Some("ana"));
    /// ```
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Open a store persisted to a JSON file.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open_file(".krstore/storage.json")?;
    /// ```
    pub fn open_file(path: impl Into<std::path::PathBuf>) -> Result<Self, CacheError> {
        Ok(Self::new(FileBackend::open(path)?))
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist and
    /// [`CacheError::SerializeError`] if the stored text does not decode as `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let items: Option<Vec<LineItem>> = cache.get("cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.backend.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("cart", &items)?;
    /// ```
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set(key, &raw)
    }

    /// Read the stored text without decoding it.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.backend.get(key)
    }

    /// Store text verbatim.
    pub fn set_raw(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.backend.set(key, value)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.backend.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.backend.get(key)?.is_some())
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.backend.keys()
    }

    /// Get all keys starting with `prefix`.
    pub fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, CacheError> {
        Ok(self
            .backend
            .keys()?
            .into_iter()
            .filter(|k| k.starts_with(prefix))
            .collect())
    }
}

/// Helper to build storage keys with namespacing.
///
/// Parts are joined with `_`, matching the browser storage layout.
///
/// # Example
///
/// ```
/// use krstore_cache::storage_key;
///
/// let key = storage_key!("productRating", 42);
/// assert_eq!(key, "productRating_42");
/// ```
#[macro_export]
macro_rules! storage_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push('_');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}
