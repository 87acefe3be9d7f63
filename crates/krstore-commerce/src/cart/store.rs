//! Persistence seam for cart state.

use std::sync::{Arc, Mutex};

use crate::cart::LineItem;
use crate::error::CommerceError;
use krstore_cache::{Cache, CacheError};

/// Storage key owned by the cart.
pub const CART_KEY: &str = "cart";

/// Where the cart's line items live between runs.
pub trait CartStore {
    /// Load persisted items.
    ///
    /// `Ok(None)` means nothing was stored. Stored data that cannot be
    /// decoded is [`CommerceError::PersistenceReadCorrupt`].
    fn load(&self) -> Result<Option<Vec<LineItem>>, CommerceError>;

    /// Replace the persisted items.
    fn save(&self, items: &[LineItem]) -> Result<(), CommerceError>;
}

/// Cart store over the local key-value cache, under [`CART_KEY`].
#[derive(Debug, Clone)]
pub struct KvCartStore {
    cache: Cache,
}

impl KvCartStore {
    /// Create a store over `cache`.
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }
}

impl CartStore for KvCartStore {
    fn load(&self) -> Result<Option<Vec<LineItem>>, CommerceError> {
        match self.cache.get::<Vec<LineItem>>(CART_KEY) {
            Ok(items) => Ok(items),
            Err(CacheError::SerializeError(e)) => Err(CommerceError::PersistenceReadCorrupt {
                key: CART_KEY.to_string(),
                reason: e.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, items: &[LineItem]) -> Result<(), CommerceError> {
        self.cache
            .set(CART_KEY, items)
            .map_err(|e| CommerceError::PersistenceWrite {
                key: CART_KEY.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Volatile cart store. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartStore {
    slot: Arc<Mutex<Option<Vec<LineItem>>>>,
}

impl MemoryCartStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with items.
    pub fn with_items(items: Vec<LineItem>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(items))),
        }
    }
}

impl CartStore for MemoryCartStore {
    fn load(&self) -> Result<Option<Vec<LineItem>>, CommerceError> {
        let slot = self.slot.lock().map_err(|_| poisoned())?;
        Ok(slot.clone())
    }

    fn save(&self, items: &[LineItem]) -> Result<(), CommerceError> {
        let mut slot = self.slot.lock().map_err(|_| poisoned())?;
        *slot = Some(items.to_vec());
        Ok(())
    }
}

fn poisoned() -> CommerceError {
    CommerceError::PersistenceWrite {
        key: CART_KEY.to_string(),
        reason: "store lock poisoned".to_string(),
    }
}
