//! Wishlist commands.

use handcraft_core::ProductId;
use handcraft_storefront::Storefront;

use crate::error::CliError;
use crate::output::Output;

pub fn show(storefront: &Storefront, out: Output) -> Result<(), CliError> {
    let wishlist = storefront.wishlist();
    out.wishlist(wishlist.items(), wishlist.total_value())
}

pub fn add(storefront: &mut Storefront, out: Output, id: &str) -> Result<(), CliError> {
    let id = ProductId::new(id);
    if storefront.add_to_wishlist(&id)? {
        out.message("Added to wishlist.")
    } else {
        out.message("Already in your wishlist.")
    }
}

pub fn remove(storefront: &mut Storefront, out: Output, id: &str) -> Result<(), CliError> {
    storefront.wishlist_mut().remove_item(&ProductId::new(id));
    out.message("Removed from wishlist.")
}

pub fn toggle(storefront: &mut Storefront, out: Output, id: &str) -> Result<(), CliError> {
    let id = ProductId::new(id);
    if storefront.toggle_wishlist(&id)? {
        out.message("Added to wishlist.")
    } else {
        out.message("Removed from wishlist.")
    }
}

pub fn clear(storefront: &mut Storefront, out: Output) -> Result<(), CliError> {
    storefront.wishlist_mut().clear();
    out.message("Wishlist cleared.")
}

pub fn move_to_cart(storefront: &mut Storefront, out: Output, id: &str) -> Result<(), CliError> {
    if storefront.move_to_cart(&ProductId::new(id)) {
        out.message("Moved to cart.")
    } else {
        out.message("That product is not in your wishlist.")
    }
}
