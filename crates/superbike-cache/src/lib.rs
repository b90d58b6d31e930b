//! Type-safe durable Key-Value storage for the superbike storefront.
//!
//! This is the storefront's "local storage": a small set of string keys,
//! each holding one JSON document. Two backends ship with the crate:
//!
//! - [`MemoryStore`] - process-local, for tests and throwaway sessions
//! - [`FileStore`] - one file per key under a directory
//!
//! # Example
//!
//! ```rust,ignore
//! use superbike_cache::{Cache, FileStore};
//!
//! let cache = Cache::new(FileStore::open(".superbike")?);
//!
//! // Store a value
//! cache.set("cart", &cart)?;
//!
//! // Retrieve a value
//! let cart: Option<CartState> = cache.get("cart")?;
//!
//! // Delete a value
//! cache.delete("cart")?;
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
