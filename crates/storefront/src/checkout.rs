//! Simulated checkout.
//!
//! There is no payment or order backend. Placing an order snapshots the
//! cart, waits a fixed delay, and hands back a confirmation; the caller
//! clears the cart afterwards. Nothing about the order is stored.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::cart::{CartItem, CartStore, CartSummary, PricingPolicy};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("cannot check out an empty cart")]
    EmptyCart,
}

/// A snapshot of the cart taken when checkout starts.
///
/// Holding one does not borrow the cart, so the cart stays usable while
/// the order is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOrder {
    items: Vec<CartItem>,
    summary: CartSummary,
}

impl PendingOrder {
    /// Snapshot `cart` priced under `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart has no items.
    pub fn from_cart(cart: &CartStore, policy: &PricingPolicy) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        Ok(Self {
            items: cart.items().to_vec(),
            summary: cart.summary(policy),
        })
    }

    #[must_use]
    pub const fn summary(&self) -> &CartSummary {
        &self.summary
    }

    /// Wait out `delay` and confirm the order.
    pub async fn submit(self, delay: Duration) -> OrderConfirmation {
        tokio::time::sleep(delay).await;
        OrderConfirmation {
            order_number: Uuid::new_v4(),
            placed_at: Utc::now(),
            items: self.items,
            summary: self.summary,
        }
    }
}

/// What the shopper sees after placing an order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderConfirmation {
    pub order_number: Uuid,
    pub placed_at: DateTime<Utc>,
    pub items: Vec<CartItem>,
    pub summary: CartSummary,
}
