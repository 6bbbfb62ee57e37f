//! Domain models for the storefront.
//!
//! Catalog records ([`Product`], [`Artisan`], [`Review`]) are immutable once
//! the catalog is loaded. [`User`] and [`Session`] describe the signed-in
//! shopper and are owned by the session store.

pub mod artisan;
pub mod product;
pub mod review;
pub mod session;
pub mod user;

pub use artisan::Artisan;
pub use product::{Customization, Product};
pub use review::Review;
pub use session::Session;
pub use user::{Address, Preferences, User, UserUpdate};
