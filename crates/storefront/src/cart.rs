//! The shopping cart store.
//!
//! The cart is an ordered list of line items, at most one per product.
//! Every mutating operation runs through [`CartStore::mutate`], which writes
//! the resulting state to the `cart-storage` slot before returning.

use std::collections::HashSet;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use handcraft_core::{CustomizationId, Price, ProductId};

use crate::models::Product;
use crate::persistence::{self, KeyValueStore, slots};

/// Errors raised by cart operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("product {product} has no customization {customization}")]
    UnknownCustomization {
        product: ProductId,
        customization: CustomizationId,
    },
}

/// One product in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    /// Always at least 1.
    pub quantity: u32,
    /// Selected customization ids, each defined on `product`.
    #[serde(default)]
    pub customizations: Vec<CustomizationId>,
}

impl CartItem {
    /// Price of one unit including selected customizations.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        self.product.unit_price(&self.customizations)
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price().times(self.quantity)
    }
}

/// Persisted cart state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    pub items: Vec<CartItem>,
}

impl CartState {
    /// Repair state loaded from storage. Drops zero quantities and repeated
    /// product ids (the first entry wins), then strips customization ids the
    /// product does not offer or that repeat within one item.
    ///
    /// Returns `(dropped items, stripped customizations)`.
    fn normalize(&mut self) -> (usize, usize) {
        let before = self.items.len();
        let mut seen = HashSet::new();
        self.items
            .retain(|item| item.quantity >= 1 && seen.insert(item.product.id.clone()));
        let dropped = before - self.items.len();

        let mut stripped = 0;
        for item in &mut self.items {
            let count = item.customizations.len();
            let product = &item.product;
            let mut picked = HashSet::new();
            item.customizations
                .retain(|id| product.customization(id).is_some() && picked.insert(id.clone()));
            stripped += count - item.customizations.len();
        }
        (dropped, stripped)
    }
}

/// Tax and shipping rules applied to the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    /// Fraction of the subtotal charged as tax (`0.08` is 8%).
    pub tax_rate: Decimal,
    /// Subtotal at or above which shipping is free.
    pub free_shipping_threshold: Price,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(8, 2),
            free_shipping_threshold: Price::from_cents(5000),
        }
    }
}

/// Order summary derived from the current cart contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    /// Distinct products in the cart.
    pub line_count: usize,
    /// Sum of quantities.
    pub item_count: u32,
    pub subtotal: Price,
    pub tax: Price,
    pub total: Price,
    pub free_shipping: bool,
}

/// The cart store.
pub struct CartStore {
    state: CartState,
    storage: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Rehydrate the cart from `storage`, starting empty if nothing usable
    /// is stored.
    #[must_use]
    pub fn restore(storage: Arc<dyn KeyValueStore>) -> Self {
        let mut state: CartState = persistence::restore(storage.as_ref(), slots::CART);
        let (dropped, stripped) = state.normalize();
        if dropped > 0 || stripped > 0 {
            tracing::warn!(dropped, stripped, "discarded invalid cart entries from storage");
        }
        Self { state, storage }
    }

    /// Run a mutation and persist the result.
    fn mutate<R>(&mut self, f: impl FnOnce(&mut CartState) -> R) -> R {
        let result = f(&mut self.state);
        persistence::persist(self.storage.as_ref(), slots::CART, &self.state);
        result
    }

    /// Line items in the order they were added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.state.items
    }

    /// The line item for `product_id`, if present.
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.state.items.iter().find(|i| &i.product.id == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.items.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.state.items.len()
    }

    /// Add `quantity` units of `product`.
    ///
    /// If the product is already in the cart its quantity grows and its
    /// customization selection is left as it was. A quantity of 0 is
    /// treated as 1. Repeated customization ids are collapsed.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownCustomization`] if a selected id is not
    /// offered by the product. The cart is left unchanged.
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: u32,
        customizations: &[CustomizationId],
    ) -> Result<(), CartError> {
        if let Some(unknown) = product.first_unknown_customization(customizations) {
            return Err(CartError::UnknownCustomization {
                product: product.id.clone(),
                customization: unknown.clone(),
            });
        }

        let quantity = quantity.max(1);
        let mut selected: Vec<CustomizationId> = Vec::with_capacity(customizations.len());
        for id in customizations {
            if !selected.contains(id) {
                selected.push(id.clone());
            }
        }

        self.mutate(|state| {
            if let Some(item) = state.items.iter_mut().find(|i| i.product.id == product.id) {
                item.quantity = item.quantity.saturating_add(quantity);
                tracing::debug!(product = %product.id, quantity = item.quantity, "cart quantity increased");
            } else {
                state.items.push(CartItem {
                    product: product.clone(),
                    quantity,
                    customizations: selected,
                });
                tracing::debug!(product = %product.id, quantity, "cart item added");
            }
        });
        Ok(())
    }

    /// Remove the line item for `product_id`. Absent ids are ignored.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.mutate(|state| {
            state.items.retain(|i| &i.product.id != product_id);
        });
        tracing::debug!(product = %product_id, "cart item removed");
    }

    /// Set the quantity for `product_id` exactly. Zero or negative
    /// quantities remove the item. Absent ids are ignored.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        let quantity = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
        if quantity == 0 {
            self.remove_item(product_id);
            return;
        }

        self.mutate(|state| {
            if let Some(item) = state.items.iter_mut().find(|i| &i.product.id == product_id) {
                item.quantity = quantity;
            }
        });
        tracing::debug!(product = %product_id, quantity, "cart quantity set");
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.mutate(|state| state.items.clear());
        tracing::debug!("cart cleared");
    }

    /// Sum of every line total. Recomputed on each call.
    #[must_use]
    pub fn total(&self) -> Price {
        self.state.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities across all line items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.state
            .items
            .iter()
            .fold(0_u32, |count, item| count.saturating_add(item.quantity))
    }

    /// Subtotal, tax and total under `policy`.
    #[must_use]
    pub fn summary(&self, policy: &PricingPolicy) -> CartSummary {
        let subtotal = self.total();
        let tax = subtotal.apply_rate(policy.tax_rate);
        CartSummary {
            line_count: self.line_count(),
            item_count: self.item_count(),
            subtotal,
            tax,
            total: subtotal + tax,
            free_shipping: subtotal >= policy.free_shipping_threshold,
        }
    }
}
