//! The wishlist store: a set of saved products, unique by id, kept in the
//! order they were saved.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use handcraft_core::{Price, ProductId};

use crate::models::Product;
use crate::persistence::{self, KeyValueStore, slots};

/// Persisted wishlist state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistState {
    pub items: Vec<Product>,
}

pub struct WishlistStore {
    state: WishlistState,
    storage: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for WishlistStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WishlistStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl WishlistStore {
    /// Rehydrate the wishlist from `storage`.
    #[must_use]
    pub fn restore(storage: Arc<dyn KeyValueStore>) -> Self {
        let mut state: WishlistState = persistence::restore(storage.as_ref(), slots::WISHLIST);
        let mut seen = HashSet::new();
        state.items.retain(|p| seen.insert(p.id.clone()));
        Self { state, storage }
    }

    fn mutate<R>(&mut self, f: impl FnOnce(&mut WishlistState) -> R) -> R {
        let result = f(&mut self.state);
        persistence::persist(self.storage.as_ref(), slots::WISHLIST, &self.state);
        result
    }

    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.state.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.items.is_empty()
    }

    #[must_use]
    pub fn is_wishlisted(&self, product_id: &ProductId) -> bool {
        self.state.items.iter().any(|p| &p.id == product_id)
    }

    /// Save `product`. Returns `false` if it was already saved.
    pub fn add_item(&mut self, product: &Product) -> bool {
        let added = self.mutate(|state| {
            if state.items.iter().any(|p| p.id == product.id) {
                false
            } else {
                state.items.push(product.clone());
                true
            }
        });
        tracing::debug!(product = %product.id, added, "wishlist add");
        added
    }

    /// Remove the product with `product_id`, returning it if it was saved.
    pub fn remove_item(&mut self, product_id: &ProductId) -> Option<Product> {
        let removed = self.mutate(|state| {
            let index = state.items.iter().position(|p| &p.id == product_id)?;
            Some(state.items.remove(index))
        });
        tracing::debug!(product = %product_id, removed = removed.is_some(), "wishlist remove");
        removed
    }

    /// Add `product` if absent, remove it if present. Returns whether it is
    /// wishlisted afterwards.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.is_wishlisted(&product.id) {
            self.remove_item(&product.id);
            false
        } else {
            self.add_item(product)
        }
    }

    pub fn clear(&mut self) {
        self.mutate(|state| state.items.clear());
        tracing::debug!("wishlist cleared");
    }

    /// Sum of the saved products' base prices.
    #[must_use]
    pub fn total_value(&self) -> Price {
        self.state.items.iter().map(|p| p.price).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::product::fixtures;
    use crate::persistence::MemoryStore;

    fn store() -> (WishlistStore, Arc<MemoryStore>) {
        let storage = Arc::new(MemoryStore::new());
        (WishlistStore::restore(storage.clone()), storage)
    }

    #[test]
    fn test_add_is_idempotent() {
        let (mut wishlist, _) = store();
        let vase = fixtures::product("p-1", "Vase", 4000);

        assert!(wishlist.add_item(&vase));
        assert!(!wishlist.add_item(&vase));
        assert_eq!(wishlist.len(), 1);
        assert!(wishlist.is_wishlisted(&vase.id));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let (mut wishlist, _) = store();
        wishlist.add_item(&fixtures::product("p-1", "Vase", 4000));

        assert_eq!(wishlist.remove_item(&ProductId::new("p-9")), None);
        assert_eq!(wishlist.len(), 1);

        let removed = wishlist.remove_item(&ProductId::new("p-1")).unwrap();
        assert_eq!(removed.name, "Vase");
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_toggle() {
        let (mut wishlist, _) = store();
        let vase = fixtures::product("p-1", "Vase", 4000);

        assert!(wishlist.toggle(&vase));
        assert!(wishlist.is_wishlisted(&vase.id));
        assert!(!wishlist.toggle(&vase));
        assert!(!wishlist.is_wishlisted(&vase.id));
    }

    #[test]
    fn test_total_value_and_order() {
        let (mut wishlist, _) = store();
        wishlist.add_item(&fixtures::product("p-2", "Scarf", 8500));
        wishlist.add_item(&fixtures::product("p-1", "Vase", 4000));

        assert_eq!(wishlist.total_value(), Price::from_cents(12500));
        let ids: Vec<_> = wishlist.items().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p-2", "p-1"]);
    }

    #[test]
    fn test_total_value_saturates() {
        let (mut wishlist, _) = store();
        for id in ["p-1", "p-2"] {
            let mut product = fixtures::product(id, "Heirloom", 100);
            product.price = Price::MAX;
            wishlist.add_item(&product);
        }
        assert_eq!(wishlist.total_value(), Price::MAX);
    }

    #[test]
    fn test_state_survives_restore() {
        let (mut wishlist, storage) = store();
        wishlist.add_item(&fixtures::product("p-1", "Vase", 4000));
        wishlist.add_item(&fixtures::product("p-2", "Scarf", 8500));
        wishlist.remove_item(&ProductId::new("p-1"));

        let restored = WishlistStore::restore(storage.clone());
        assert_eq!(restored.items(), wishlist.items());

        wishlist.clear();
        assert!(WishlistStore::restore(storage).is_empty());
    }

    #[test]
    fn test_restore_drops_duplicates() {
        let storage = Arc::new(MemoryStore::new());
        let vase = fixtures::product("p-1", "Vase", 4000);
        let state = WishlistState {
            items: vec![vase.clone(), vase],
        };
        persistence::persist(storage.as_ref(), slots::WISHLIST, &state);

        assert_eq!(WishlistStore::restore(storage).len(), 1);
    }
}
