//! Totals derived from the cart's item list.

use serde::Serialize;
use tokio::sync::watch;

use crate::item::CartItem;

/// Totals for a cart snapshot.
///
/// A pure function of the item list: `total_price` is the sum of
/// `price x quantity` over every item and `total_items` the sum of
/// quantities. Both are zero for an empty cart.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CartSummary {
    pub total_price: f64,
    pub total_items: u64,
}

impl CartSummary {
    /// Derive totals from an item list.
    pub fn of(items: &[CartItem]) -> Self {
        Self {
            total_price: items.iter().map(CartItem::subtotal).sum(),
            total_items: items.iter().map(|i| u64::from(i.quantity)).sum(),
        }
    }

    /// Format the total as a display string (e.g., "$49.99").
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.total_price)
    }
}

/// Subscription surface for presentation components.
///
/// Wraps an item list receiver and hands out derived totals, so a
/// summary widget never touches the cart state directly.
///
/// # Example
///
/// ```rust,ignore
/// let mut feed = SummaryFeed::new(cart.subscribe());
/// while let Some(summary) = feed.changed().await {
///     render_badge(summary.total_items, summary.display_price());
/// }
/// ```
#[derive(Debug)]
pub struct SummaryFeed {
    rx: watch::Receiver<Vec<CartItem>>,
}

impl SummaryFeed {
    /// Build a feed over a cart subscription.
    pub fn new(rx: watch::Receiver<Vec<CartItem>>) -> Self {
        Self { rx }
    }

    /// Totals for the latest item list.
    pub fn current(&self) -> CartSummary {
        CartSummary::of(&self.rx.borrow())
    }

    /// Wait for the next mutation and return the new totals, or `None`
    /// once the cart manager has been dropped.
    pub async fn changed(&mut self) -> Option<CartSummary> {
        self.rx.changed().await.ok()?;
        Some(CartSummary::of(&self.rx.borrow_and_update()))
    }
}
