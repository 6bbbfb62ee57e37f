//! Cart commands.

use handcraft_core::{CustomizationId, ProductId};
use handcraft_storefront::Storefront;

use crate::error::CliError;
use crate::output::Output;

pub fn show(storefront: &Storefront, out: Output) -> Result<(), CliError> {
    out.cart(storefront.cart().items(), &storefront.cart_summary())
}

pub fn add(
    storefront: &mut Storefront,
    out: Output,
    id: &str,
    quantity: u32,
    customizations: &[String],
) -> Result<(), CliError> {
    let id = ProductId::new(id);
    let selected: Vec<CustomizationId> = customizations
        .iter()
        .map(|c| CustomizationId::new(c.as_str()))
        .collect();
    storefront.add_to_cart(&id, quantity, &selected)?;

    let name = &storefront.product(&id)?.name;
    out.message(&format!("Added {name} to your cart."))
}

pub fn remove(storefront: &mut Storefront, out: Output, id: &str) -> Result<(), CliError> {
    let id = ProductId::new(id);
    storefront.cart_mut().remove_item(&id);
    out.message("Item removed from cart.")
}

pub fn update(
    storefront: &mut Storefront,
    out: Output,
    id: &str,
    quantity: i64,
) -> Result<(), CliError> {
    let id = ProductId::new(id);
    storefront.cart_mut().update_quantity(&id, quantity);
    if quantity <= 0 {
        return out.message("Item removed from cart.");
    }
    show(storefront, out)
}

pub fn clear(storefront: &mut Storefront, out: Output) -> Result<(), CliError> {
    storefront.cart_mut().clear();
    out.message("Cart cleared.")
}

pub async fn checkout(storefront: &mut Storefront, out: Output) -> Result<(), CliError> {
    let pending = storefront.begin_checkout()?;
    let confirmation = pending.submit(storefront.config().checkout_delay).await;
    storefront.complete_checkout(&confirmation);
    out.order(&confirmation)
}
