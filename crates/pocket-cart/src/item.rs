//! Product and cart line item types.

use serde::{Deserialize, Serialize};

use crate::ids::ProductId;

/// A catalog product, as handed to
/// [`add_to_cart`](crate::CartManager::add_to_cart).
///
/// All fields except `id` are opaque pass-through: `title` and
/// `image_url` are display data, `price` is the non-negative unit price
/// as supplied by the catalog. Nothing is validated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
    pub price: f64,
}

impl Product {
    /// Turn the product into a cart line item with the given quantity.
    pub fn with_quantity(self, quantity: u32) -> CartItem {
        CartItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity,
        }
    }
}

/// One product entry in the cart with an associated quantity.
///
/// Persisted as a flat JSON object with fields
/// `id, title, image_url, price, quantity`. Invariant: `quantity >= 1`;
/// the manager floor-clamps decrements so a quantity-0 item never
/// exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
    pub price: f64,
    pub quantity: u32,
}

impl CartItem {
    /// Line subtotal: unit price times quantity.
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}
