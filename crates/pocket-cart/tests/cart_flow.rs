//! End-to-end cart flows against real store backends.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pocket_cart::{CartManager, CartSummary, Product, ProductId, SummaryFeed};
use pocket_kv::{FileStore, KeyValueStore, MemoryStore, StoreError};

fn product(id: &str, price: f64) -> Product {
    Product {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        image_url: format!("https://img.example/{id}.png"),
        price,
    }
}

/// Store double that yields between the read and the write of a
/// read-modify-write cycle, so an unserialized manager would lose
/// updates.
struct SlowStore {
    inner: MemoryStore,
    delay: Duration,
}

impl SlowStore {
    fn new(delay: Duration) -> Self {
        Self {
            inner: MemoryStore::new(),
            delay,
        }
    }
}

#[async_trait]
impl KeyValueStore for SlowStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self.inner.get(key).await?;
        tokio::time::sleep(self.delay).await;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.set(key, value).await
    }

    async fn merge(&self, key: &str, partial: &str) -> Result<(), StoreError> {
        self.inner.merge(key, partial).await
    }

    async fn multi_get(&self, keys: &[String]) -> Result<Vec<(String, Option<String>)>, StoreError> {
        self.inner.multi_get(keys).await
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.inner.keys().await
    }
}

#[tokio::test]
async fn session_flow_updates_totals() {
    let store = Arc::new(MemoryStore::new());
    let cart = CartManager::open(store).await.unwrap();

    cart.add_to_cart(product("beans", 12.5)).await.unwrap();
    cart.add_to_cart(product("mug", 8.0)).await.unwrap();
    cart.add_to_cart(product("beans", 12.5)).await.unwrap();

    let summary = cart.summary();
    assert_eq!(summary.total_items, 3);
    assert_eq!(summary.total_price, 33.0);

    cart.decrement(&ProductId::new("beans")).await.unwrap();
    assert_eq!(cart.summary(), CartSummary::of(&cart.items()));
    assert_eq!(cart.summary().total_items, 2);
    assert_eq!(cart.summary().display_price(), "$20.50");
}

#[tokio::test]
async fn summary_feed_follows_mutations() {
    let store = Arc::new(MemoryStore::new());
    let cart = CartManager::open(store).await.unwrap();
    let mut feed = SummaryFeed::new(cart.subscribe());

    assert_eq!(feed.current(), CartSummary::default());

    cart.add_to_cart(product("beans", 5.0)).await.unwrap();
    let summary = feed.changed().await.unwrap();
    assert_eq!(summary.total_items, 1);
    assert_eq!(summary.total_price, 5.0);

    cart.increment(&ProductId::new("beans")).await.unwrap();
    let summary = feed.changed().await.unwrap();
    assert_eq!(summary.total_items, 2);

    drop(cart);
    assert!(feed.changed().await.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_increments_serialize() {
    let store = Arc::new(SlowStore::new(Duration::from_millis(25)));
    let cart = Arc::new(CartManager::open(store).await.unwrap());

    cart.add_to_cart(product("beans", 1.0)).await.unwrap();

    let id = ProductId::new("beans");
    let a = tokio::spawn({
        let cart = Arc::clone(&cart);
        let id = id.clone();
        async move { cart.increment(&id).await }
    });
    let b = tokio::spawn({
        let cart = Arc::clone(&cart);
        let id = id.clone();
        async move { cart.increment(&id).await }
    });

    a.await.unwrap().unwrap();
    b.await.unwrap().unwrap();

    // Both increments land: 1 + 1 + 1, never a lost update.
    assert_eq!(cart.items()[0].quantity, 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_adds_serialize() {
    let store = Arc::new(SlowStore::new(Duration::from_millis(25)));
    let cart = Arc::new(CartManager::open(store).await.unwrap());

    let mut handles = Vec::new();
    for _ in 0..4 {
        let cart = Arc::clone(&cart);
        handles.push(tokio::spawn(async move {
            cart.add_to_cart(product("beans", 1.0)).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let items = cart.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 4);
}

#[tokio::test]
async fn distinct_products_do_not_contend() {
    let store = Arc::new(SlowStore::new(Duration::from_millis(10)));
    let cart = Arc::new(CartManager::open(store).await.unwrap());

    let mut handles = Vec::new();
    for id in ["a", "b", "c"] {
        let cart = Arc::clone(&cart);
        handles.push(tokio::spawn(
            async move { cart.add_to_cart(product(id, 1.0)).await },
        ));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(cart.items().len(), 3);
    assert_eq!(cart.summary().total_items, 3);
}

#[tokio::test]
async fn cart_survives_restart_on_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cart.json");

    {
        let store = Arc::new(FileStore::open(&path).await.unwrap());
        let cart = CartManager::open(store).await.unwrap();
        cart.add_to_cart(product("beans", 12.5)).await.unwrap();
        cart.add_to_cart(product("beans", 12.5)).await.unwrap();
        cart.add_to_cart(product("mug", 8.0)).await.unwrap();
    }

    let store = Arc::new(FileStore::open(&path).await.unwrap());
    let cart = CartManager::open(store).await.unwrap();

    let items = cart.items();
    assert_eq!(items.len(), 2);

    let beans = items
        .iter()
        .find(|i| i.id.as_str() == "beans")
        .expect("beans rehydrated");
    assert_eq!(beans.quantity, 2);
    assert_eq!(beans.price, 12.5);
    assert_eq!(cart.summary().total_price, 33.0);
}
