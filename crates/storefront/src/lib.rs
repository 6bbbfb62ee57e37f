//! Handcraft Market storefront library.
//!
//! The read-only catalog, the derived query layer, and the persisted cart,
//! wishlist and session stores, tied together by [`state::Storefront`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod contact;
pub mod error;
pub mod models;
pub mod persistence;
pub mod query;
pub mod session;
pub mod state;
pub mod wishlist;

pub use error::{AppError, Result};
pub use state::Storefront;
