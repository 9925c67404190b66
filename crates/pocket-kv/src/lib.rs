//! Asynchronous key-value storage layer for PocketMarket.
//!
//! Provides the [`KeyValueStore`] port that higher layers persist
//! through, with automatic string-keyed JSON text values, plus two
//! backends:
//!
//! - [`MemoryStore`]: process-local map for tests and ephemeral sessions
//! - [`FileStore`]: JSON-document-backed store, durable across restarts
//!
//! # Example
//!
//! ```rust,ignore
//! use pocket_kv::{KeyValueStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//!
//! // Store a value
//! store.set("cart:item1", r#"{"id":"item1","quantity":1}"#).await?;
//!
//! // Partially update it
//! store.merge("cart:item1", r#"{"quantity":2}"#).await?;
//!
//! // Retrieve it
//! let raw = store.get("cart:item1").await?;
//! ```

mod error;
mod file;
mod memory;
mod store;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::{merge_json, KeyValueStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStore, KeyValueStore, MemoryStore, StoreError};
}
