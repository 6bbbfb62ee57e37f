//! Command handlers. Each one performs a single shopper action against the
//! storefront and renders the result.

pub mod account;
pub mod cart;
pub mod catalog;
pub mod contact;
pub mod wishlist;
