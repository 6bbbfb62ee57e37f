//! The storefront context handed to the UI layer.
//!
//! One [`Storefront`] owns the read-only catalog and the three client-state
//! stores. It is passed explicitly to whatever drives it; there are no
//! process-wide singletons.

use std::sync::Arc;

use handcraft_core::{CustomizationId, ProductId};

use crate::cart::{CartStore, CartSummary};
use crate::catalog::Catalog;
use crate::checkout::{OrderConfirmation, PendingOrder};
use crate::config::StorefrontConfig;
use crate::contact::{self, ContactForm, ContactReceipt};
use crate::error::{self, AppError, Result};
use crate::models::{Product, User, UserUpdate};
use crate::persistence::{FileStore, KeyValueStore};
use crate::session::SessionStore;
use crate::wishlist::WishlistStore;

/// Catalog plus client-state stores.
pub struct Storefront {
    config: StorefrontConfig,
    catalog: Arc<Catalog>,
    cart: CartStore,
    wishlist: WishlistStore,
    session: SessionStore,
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("config", &self.config)
            .field("cart", &self.cart)
            .field("wishlist", &self.wishlist)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl Storefront {
    /// Load the bundled catalog and rehydrate every store from files in
    /// `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled catalog is invalid or the data
    /// directory cannot be created.
    pub fn open(config: StorefrontConfig) -> Result<Self> {
        let catalog = Arc::new(Catalog::bundled()?);
        let storage = Arc::new(FileStore::open(&config.data_dir)?);
        tracing::debug!(data_dir = %config.data_dir.display(), "opened storefront");
        Ok(Self::with_store(config, catalog, storage))
    }

    /// Build a context over an explicit catalog and storage backend.
    #[must_use]
    pub fn with_store(
        config: StorefrontConfig,
        catalog: Arc<Catalog>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        let session = SessionStore::restore(Arc::clone(&storage));
        if let Some(user) = session.current_user() {
            error::set_sentry_user(&user.id, Some(user.email.as_str()));
        }
        Self {
            config,
            catalog,
            cart: CartStore::restore(Arc::clone(&storage)),
            wishlist: WishlistStore::restore(storage),
            session,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }

    pub const fn wishlist_mut(&mut self) -> &mut WishlistStore {
        &mut self.wishlist
    }

    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Look up a catalog product by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no product has that id.
    pub fn product(&self, id: &ProductId) -> Result<&Product> {
        self.catalog
            .product(id)
            .ok_or_else(|| AppError::NotFound(format!("product {id}")))
    }

    /// The first `featured_count` catalog products.
    #[must_use]
    pub fn featured(&self) -> &[Product] {
        self.catalog.featured(self.config.featured_count)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add a catalog product to the cart by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown product, or a cart
    /// error for customizations the product does not offer.
    pub fn add_to_cart(
        &mut self,
        id: &ProductId,
        quantity: u32,
        customizations: &[CustomizationId],
    ) -> Result<()> {
        let product = self
            .catalog
            .product(id)
            .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
        self.cart.add_item(product, quantity, customizations)?;
        error::add_breadcrumb("cart", "Added item", Some(&[("product_id", id.as_str())]));
        Ok(())
    }

    /// Subtotal, tax and total under the configured pricing policy.
    #[must_use]
    pub fn cart_summary(&self) -> CartSummary {
        self.cart.summary(&self.config.pricing)
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// Add or remove a catalog product from the wishlist. Returns whether
    /// it is wishlisted afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown product.
    pub fn toggle_wishlist(&mut self, id: &ProductId) -> Result<bool> {
        let product = self
            .catalog
            .product(id)
            .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
        Ok(self.wishlist.toggle(product))
    }

    /// Add a catalog product to the wishlist. Returns `false` if it was
    /// already there.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown product.
    pub fn add_to_wishlist(&mut self, id: &ProductId) -> Result<bool> {
        let product = self
            .catalog
            .product(id)
            .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
        Ok(self.wishlist.add_item(product))
    }

    /// Move a wishlisted product into the cart with quantity 1.
    ///
    /// Returns `false`, changing nothing, if the product is not wishlisted.
    pub fn move_to_cart(&mut self, id: &ProductId) -> bool {
        let Some(product) = self.wishlist.remove_item(id) else {
            return false;
        };
        // No customizations are selected, so this cannot be rejected.
        if let Err(e) = self.cart.add_item(&product, 1, &[]) {
            tracing::warn!(product = %id, error = %e, "could not move wishlist item to cart");
            self.wishlist.add_item(&product);
            return false;
        }
        error::add_breadcrumb("wishlist", "Moved item to cart", Some(&[("product_id", id.as_str())]));
        true
    }

    // =========================================================================
    // Session
    // =========================================================================

    pub fn login(&mut self, user: User) {
        error::set_sentry_user(&user.id, Some(user.email.as_str()));
        self.session.login(user);
        tracing::info!("signed in");
    }

    pub fn logout(&mut self) {
        self.session.logout();
        error::clear_sentry_user();
        tracing::info!("signed out");
    }

    /// Merge `update` into the signed-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] when no one is signed in, leaving
    /// the session untouched.
    pub fn update_profile(&mut self, update: UserUpdate) -> Result<&User> {
        if !self.session.update_user(update) {
            return Err(AppError::Unauthorized("sign in to edit your profile".to_string()));
        }
        self.session
            .current_user()
            .ok_or_else(|| AppError::Unauthorized("sign in to edit your profile".to_string()))
    }

    // =========================================================================
    // Simulations
    // =========================================================================

    /// Start checkout by snapshotting the cart.
    ///
    /// The returned order owns its data: submit it with
    /// [`PendingOrder::submit`] and the configured `checkout_delay`, and
    /// the context stays free for other operations in the meantime. Hand
    /// the confirmation to [`Storefront::complete_checkout`] afterwards.
    ///
    /// # Errors
    ///
    /// Returns a checkout error if the cart is empty.
    pub fn begin_checkout(&self) -> Result<PendingOrder> {
        let pending = PendingOrder::from_cart(&self.cart, &self.config.pricing)?;
        tracing::info!(total = %pending.summary().total, "placing order");
        Ok(pending)
    }

    /// Remove the ordered products from the cart.
    ///
    /// Products added to the cart while the order was pending stay in it.
    pub fn complete_checkout(&mut self, confirmation: &OrderConfirmation) {
        for item in &confirmation.items {
            self.cart.remove_item(&item.product.id);
        }
        error::add_breadcrumb(
            "checkout",
            "Order placed",
            Some(&[("order_number", confirmation.order_number.to_string().as_str())]),
        );
        tracing::info!(order_number = %confirmation.order_number, "order placed");
    }

    /// Submit the contact form after the configured delay.
    ///
    /// # Errors
    ///
    /// Returns a contact error if the form does not validate.
    pub async fn submit_contact(&self, form: &ContactForm) -> Result<ContactReceipt> {
        Ok(contact::submit(form, self.config.contact_delay).await?)
    }
}
