//! Cart, wishlist and checkout driven through the storefront context.

use pretty_assertions::assert_eq;

use handcraft_core::{CustomizationId, Price, ProductId};
use handcraft_integration_tests::{TestContext, shopper};
use handcraft_storefront::AppError;
use handcraft_storefront::cart::CartError;
use handcraft_storefront::checkout::CheckoutError;
use handcraft_storefront::contact::{ContactError, ContactForm};
use handcraft_storefront::models::UserUpdate;

fn id(raw: &str) -> ProductId {
    ProductId::new(raw)
}

#[test]
fn test_cart_totals_include_customizations() {
    let mut ctx = TestContext::new();
    let storefront = &mut ctx.storefront;

    storefront
        .add_to_cart(&id("p-101"), 2, &[CustomizationId::new("gift-wrap")])
        .expect("add bowl");
    storefront.add_to_cart(&id("p-102"), 1, &[]).expect("add mug");

    // (68 + 5) * 2 + 32
    assert_eq!(storefront.cart().total(), Price::parse("178.00").expect("price"));
    assert_eq!(storefront.cart().item_count(), 3);
    assert_eq!(storefront.cart().line_count(), 2);

    let summary = storefront.cart_summary();
    assert_eq!(summary.tax, Price::parse("14.24").expect("price"));
    assert_eq!(summary.total, Price::parse("192.24").expect("price"));
    assert!(summary.free_shipping);
}

#[test]
fn test_re_adding_keeps_first_customizations() {
    let mut ctx = TestContext::new();
    let storefront = &mut ctx.storefront;

    storefront
        .add_to_cart(&id("p-101"), 1, &[CustomizationId::new("gift-wrap")])
        .expect("first add");
    storefront
        .add_to_cart(&id("p-101"), 2, &[CustomizationId::new("matching-lid")])
        .expect("second add");

    let item = storefront.cart().get(&id("p-101")).expect("item in cart");
    assert_eq!(item.quantity, 3);
    assert_eq!(item.customizations, [CustomizationId::new("gift-wrap")]);
}

#[test]
fn test_invalid_additions_are_rejected() {
    let mut ctx = TestContext::new();
    let storefront = &mut ctx.storefront;

    let err = storefront
        .add_to_cart(&id("p-103"), 1, &[CustomizationId::new("engraving")])
        .expect_err("scarf has no engraving");
    assert!(matches!(
        err,
        AppError::Cart(CartError::UnknownCustomization { .. })
    ));

    let err = storefront
        .add_to_cart(&id("p-999"), 1, &[])
        .expect_err("unknown product");
    assert!(matches!(err, AppError::NotFound(_)));

    assert!(storefront.cart().is_empty());
}

#[test]
fn test_quantity_updates() {
    let mut ctx = TestContext::new();
    let storefront = &mut ctx.storefront;
    storefront.add_to_cart(&id("p-110"), 2, &[]).expect("add");

    storefront.cart_mut().update_quantity(&id("p-110"), 5);
    assert_eq!(storefront.cart().item_count(), 5);

    storefront.cart_mut().update_quantity(&id("p-110"), 0);
    assert!(storefront.cart().get(&id("p-110")).is_none());
    assert_eq!(storefront.cart().total(), Price::ZERO);
}

#[test]
fn test_wishlist_toggle_and_move() {
    let mut ctx = TestContext::new();
    let storefront = &mut ctx.storefront;

    assert!(storefront.toggle_wishlist(&id("p-104")).expect("toggle on"));
    assert!(!storefront.add_to_wishlist(&id("p-104")).expect("add again"));
    assert!(storefront.toggle_wishlist(&id("p-112")).expect("toggle on"));
    assert_eq!(storefront.wishlist().len(), 2);
    assert_eq!(
        storefront.wishlist().total_value(),
        Price::parse("330.00").expect("price")
    );

    assert!(storefront.move_to_cart(&id("p-104")));
    assert!(!storefront.wishlist().is_wishlisted(&id("p-104")));
    assert_eq!(storefront.cart().get(&id("p-104")).map(|i| i.quantity), Some(1));

    // Moving it again does nothing.
    assert!(!storefront.move_to_cart(&id("p-104")));
    assert_eq!(storefront.cart().item_count(), 1);
}

#[tokio::test]
async fn test_checkout_flow() {
    let mut ctx = TestContext::new();

    let err = ctx.storefront.begin_checkout().expect_err("empty cart");
    assert!(matches!(err, AppError::Checkout(CheckoutError::EmptyCart)));

    ctx.storefront
        .add_to_cart(&id("p-111"), 1, &[])
        .expect("add coasters");
    let pending = ctx.storefront.begin_checkout().expect("checkout");
    let confirmation = pending.submit(ctx.storefront.config().checkout_delay).await;
    ctx.storefront.complete_checkout(&confirmation);

    assert_eq!(confirmation.summary.subtotal, Price::parse("24.00").expect("price"));
    assert!(!confirmation.summary.free_shipping);
    assert_eq!(confirmation.items.len(), 1);
    assert!(ctx.storefront.cart().is_empty());

    // The cleared cart is what a restart sees.
    ctx.reopen();
    assert!(ctx.storefront.cart().is_empty());
}

#[tokio::test]
async fn test_contact_submission() {
    let ctx = TestContext::new();
    let form = ContactForm {
        name: "Sam Rivera".to_string(),
        email: "sam@example.com".to_string(),
        subject: "Custom order".to_string(),
        message: "Could the serving bowl come in blue?".to_string(),
    };
    let receipt = ctx.storefront.submit_contact(&form).await.expect("submit");
    assert_eq!(receipt.email.as_str(), "sam@example.com");

    let err = ctx
        .storefront
        .submit_contact(&ContactForm {
            email: "not-an-email".to_string(),
            ..form
        })
        .await
        .expect_err("bad email");
    assert!(matches!(err, AppError::Contact(ContactError::InvalidEmail(_))));
}

#[test]
fn test_profile_updates_need_a_session() {
    let mut ctx = TestContext::new();
    let update = UserUpdate {
        phone: Some(Some("555-0142".to_string())),
        ..UserUpdate::default()
    };

    let err = ctx
        .storefront
        .update_profile(update.clone())
        .expect_err("signed out");
    assert!(matches!(err, AppError::Unauthorized(_)));

    ctx.storefront.login(shopper("u-7", "sam@example.com"));
    let user = ctx.storefront.update_profile(update).expect("signed in");
    assert_eq!(user.phone.as_deref(), Some("555-0142"));
}
