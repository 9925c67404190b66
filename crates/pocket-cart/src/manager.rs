//! Cart state manager.

use std::sync::Arc;

use pocket_kv::KeyValueStore;
use tokio::sync::watch;

use crate::error::CartError;
use crate::ids::ProductId;
use crate::item::{CartItem, Product};
use crate::keyspace::Keyspace;
use crate::locks::IdLocks;
use crate::summary::CartSummary;

/// Single source of truth for the cart's contents during a session.
///
/// The manager keeps an in-memory item list and the persistent store
/// consistent: every mutation writes through to the store first, then
/// updates memory and notifies subscribers. Construction rehydrates the
/// list from whatever the store already holds, so a restarted session
/// resumes where it left off.
///
/// The manager is meant to be built once at application start and handed
/// to consumers explicitly (`Arc<CartManager>`); it is `Send + Sync` and
/// mutations from concurrent tasks against the same product serialize
/// internally.
pub struct CartManager {
    store: Arc<dyn KeyValueStore>,
    keyspace: Keyspace,
    locks: IdLocks,
    state: watch::Sender<Vec<CartItem>>,
}

impl CartManager {
    /// Open a cart over `store` under the default keyspace,
    /// rehydrating the item list before returning.
    pub async fn open(store: Arc<dyn KeyValueStore>) -> Result<Self, CartError> {
        Self::open_with_keyspace(store, Keyspace::default()).await
    }

    /// Open a cart under a custom keyspace.
    ///
    /// This is the only place the store is read in bulk: all keys are
    /// enumerated, filtered to the keyspace, and bulk-read. Entries that
    /// fail to parse are skipped with a warning rather than failing the
    /// whole load.
    pub async fn open_with_keyspace(
        store: Arc<dyn KeyValueStore>,
        keyspace: Keyspace,
    ) -> Result<Self, CartError> {
        let keys: Vec<String> = store
            .keys()
            .await?
            .into_iter()
            .filter(|key| keyspace.contains(key))
            .collect();

        let mut items = Vec::with_capacity(keys.len());
        for (key, value) in store.multi_get(&keys).await? {
            let Some(raw) = value else { continue };
            match serde_json::from_str::<CartItem>(&raw) {
                Ok(item) => items.push(item),
                Err(e) => tracing::warn!("Skipping malformed cart entry {key}: {e}"),
            }
        }

        tracing::debug!("Cart rehydrated with {} item(s)", items.len());

        let (state, _) = watch::channel(items);
        Ok(Self {
            store,
            keyspace,
            locks: IdLocks::new(),
            state,
        })
    }

    /// Add one unit of `product` to the cart.
    ///
    /// If the product already has a cart entry its quantity grows by
    /// exactly 1 and all other fields are refreshed from the caller;
    /// otherwise a new entry with quantity 1 is created. After the call
    /// resolves, exactly one item with this id exists.
    pub async fn add_to_cart(&self, product: Product) -> Result<(), CartError> {
        if product.id.is_empty() {
            return Err(CartError::EmptyProductId);
        }

        let lock = self.locks.lock_for(&product.id);
        let _guard = lock.lock().await;

        let key = self.keyspace.item_key(&product.id);
        let item = match self.store.get(&key).await? {
            Some(raw) => {
                let stored = parse_entry(&key, &raw)?;
                let item = product.with_quantity(stored.quantity.saturating_add(1));
                self.store.merge(&key, &serde_json::to_string(&item)?).await?;
                item
            }
            None => {
                let item = product.with_quantity(1);
                self.store.set(&key, &serde_json::to_string(&item)?).await?;
                item
            }
        };

        tracing::debug!("Added {} (quantity now {})", item.id, item.quantity);
        self.upsert(item);
        Ok(())
    }

    /// Increase the quantity of the item with `id` by 1.
    ///
    /// Silent no-op when no entry exists for `id`; no item materializes.
    pub async fn increment(&self, id: &ProductId) -> Result<(), CartError> {
        let lock = self.locks.lock_for(id);
        let _guard = lock.lock().await;

        let key = self.keyspace.item_key(id);
        let Some(raw) = self.store.get(&key).await? else {
            return Ok(());
        };

        let mut item = parse_entry(&key, &raw)?;
        item.quantity = item.quantity.saturating_add(1);
        self.store.merge(&key, &serde_json::to_string(&item)?).await?;

        tracing::debug!("Incremented {} to {}", item.id, item.quantity);
        self.upsert(item);
        Ok(())
    }

    /// Decrease the quantity of the item with `id` by 1.
    ///
    /// Silent no-op when no entry exists. Quantity is floor-clamped at
    /// 1: decrementing a quantity-1 item changes nothing and the item is
    /// never removed.
    pub async fn decrement(&self, id: &ProductId) -> Result<(), CartError> {
        let lock = self.locks.lock_for(id);
        let _guard = lock.lock().await;

        let key = self.keyspace.item_key(id);
        let Some(raw) = self.store.get(&key).await? else {
            return Ok(());
        };

        let mut item = parse_entry(&key, &raw)?;
        if item.quantity <= 1 {
            return Ok(());
        }

        item.quantity -= 1;
        self.store.merge(&key, &serde_json::to_string(&item)?).await?;

        tracing::debug!("Decremented {} to {}", item.id, item.quantity);
        self.upsert(item);
        Ok(())
    }

    /// Snapshot of the current item list, in first-add order.
    pub fn items(&self) -> Vec<CartItem> {
        self.state.borrow().clone()
    }

    /// Subscribe to item list changes.
    ///
    /// The receiver observes the list as of subscription time and wakes
    /// on every subsequent mutation. Consumers re-derive everything they
    /// need from the received snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.state.subscribe()
    }

    /// Totals derived from the current item list.
    pub fn summary(&self) -> CartSummary {
        CartSummary::of(&self.state.borrow())
    }

    /// Keyspace this cart persists under.
    pub fn keyspace(&self) -> &Keyspace {
        &self.keyspace
    }

    /// Replace the entry with a matching id, or append the item.
    fn upsert(&self, item: CartItem) {
        self.state.send_modify(|items| {
            match items.iter_mut().find(|i| i.id == item.id) {
                Some(slot) => *slot = item,
                None => items.push(item),
            }
        });
    }
}

fn parse_entry(key: &str, raw: &str) -> Result<CartItem, CartError> {
    serde_json::from_str(raw).map_err(|source| CartError::MalformedEntry {
        key: key.to_string(),
        source,
    })
}
