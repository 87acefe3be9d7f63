//! Type-safe local key-value store for KR Store.
//!
//! Provides a string-keyed store with automatic JSON serialization, the
//! desktop counterpart of browser local storage. Backends are pluggable:
//! [`MemoryBackend`] for tests and [`FileBackend`] for durable state.
//!
//! # Example
//!
//! ```
//! use krstore_cache::Cache;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct User {
//!     name: String,
//!     email: String,
//! }
//!
//! let cache = Cache::in_memory();
//!
//! // Store a value
//! cache.set("user", &User { name: "sok".into(), email: "sok@example.com".into() }).unwrap();
//!
//! // Retrieve a value
//! let user: Option<User> = cache.get("user").unwrap();
//! assert!(user.is_some());
//!
//! // Delete a value
//! cache.delete("user").unwrap();
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileBackend, KvBackend, MemoryBackend};
pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileBackend, KvBackend, MemoryBackend};
}
