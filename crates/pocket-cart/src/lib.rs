//! Shopping cart state management for PocketMarket.
//!
//! The [`CartManager`] is the single source of truth for the cart's
//! contents during a session: it rehydrates the item list from a
//! [`KeyValueStore`](pocket_kv::KeyValueStore) at construction, keeps
//! memory and storage consistent on every mutation, and notifies
//! subscribers through a watch channel.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pocket_cart::{CartManager, CartSummary, Product};
//! use pocket_kv::MemoryStore;
//!
//! let store = Arc::new(MemoryStore::new());
//! let cart = CartManager::open(store).await?;
//!
//! cart.add_to_cart(Product {
//!     id: "sku-1".into(),
//!     title: "Espresso Beans".into(),
//!     image_url: "https://img.example/beans.png".into(),
//!     price: 12.5,
//! })
//! .await?;
//!
//! let summary = cart.summary();
//! assert_eq!(summary.total_items, 1);
//! ```

pub mod error;
pub mod ids;
pub mod item;
pub mod keyspace;
pub mod manager;
pub mod summary;

mod locks;

pub use error::CartError;
pub use ids::ProductId;
pub use item::{CartItem, Product};
pub use keyspace::Keyspace;
pub use manager::CartManager;
pub use summary::{CartSummary, SummaryFeed};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CartError;
    pub use crate::ids::ProductId;
    pub use crate::item::{CartItem, Product};
    pub use crate::keyspace::Keyspace;
    pub use crate::manager::CartManager;
    pub use crate::summary::{CartSummary, SummaryFeed};
}
