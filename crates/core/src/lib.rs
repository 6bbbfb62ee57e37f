//! Handcraft Core - Shared types library.
//!
//! This crate provides common types used across all Handcraft components:
//! - `storefront` - Catalog, query layer and the cart/wishlist/session stores
//! - `cli` - Command-line front end driving the storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no async
//! runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, ratings,
//!   categories and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
