//! Key-value persistence for the Pantry storefront.
//!
//! The cart lives in a small key-value store owned by the shopper's session:
//! browser-style local storage during development, a directory of files for
//! the CLI, and Spin's Key-Value Store when deployed as a WASM component.
//!
//! # Example
//!
//! ```rust
//! use pantry_cache::{Cache, MemoryStore, CART_KEY};
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set(CART_KEY, &vec!["bread", "milk"]).unwrap();
//!
//! let items: Option<Vec<String>> = cache.get(CART_KEY).unwrap();
//! assert_eq!(items.unwrap().len(), 2);
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, MemoryStore, Store};

#[cfg(target_arch = "wasm32")]
pub use store::SpinStore;

/// Key under which the cart snapshot is stored.
pub const CART_KEY: &str = "cart";

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, MemoryStore, Store, CART_KEY};
}
