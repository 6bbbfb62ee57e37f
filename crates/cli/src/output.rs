//! Rendering command results to stdout, as text or JSON.

#![allow(clippy::print_stdout)]

use serde::Serialize;
use serde_json::json;

use handcraft_core::Price;
use handcraft_storefront::cart::{CartItem, CartSummary};
use handcraft_storefront::catalog::{CategoryInfo, CommunityStats};
use handcraft_storefront::checkout::OrderConfirmation;
use handcraft_storefront::contact::ContactReceipt;
use handcraft_storefront::models::{Artisan, Product, Review, User};

use crate::error::CliError;

/// Where command results go.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub const fn new(json: bool) -> Self {
        Self { json }
    }

    fn json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// A one-line status message.
    pub fn message(self, text: &str) -> Result<(), CliError> {
        if self.json {
            return Self::json(&json!({ "message": text }));
        }
        println!("{text}");
        Ok(())
    }

    pub fn products(self, products: &[&Product], total: usize) -> Result<(), CliError> {
        if self.json {
            return Self::json(products);
        }
        if products.is_empty() {
            println!("No products match.");
            return Ok(());
        }
        for product in products {
            println!("{}", product_line(product));
        }
        if products.len() < total {
            println!("({} of {total} shown)", products.len());
        }
        Ok(())
    }

    pub fn product_detail(self, product: &Product, reviews: &[&Review]) -> Result<(), CliError> {
        if self.json {
            return Self::json(&json!({ "product": product, "reviews": reviews }));
        }
        println!("{} ({})", product.name, product.id);
        println!(
            "{}  ·  {}  ·  ★ {} ({} reviews)",
            product.price,
            product.category.label(),
            product.rating,
            product.review_count
        );
        println!("by {}", product.artisan.name);
        println!();
        println!("{}", product.description);
        if !product.materials.is_empty() {
            println!("Materials: {}", product.materials.join(", "));
        }
        let mut flags = Vec::new();
        if product.is_handmade {
            flags.push("handmade");
        }
        if product.is_eco_friendly {
            flags.push("eco-friendly");
        }
        if !product.available {
            flags.push("out of stock");
        }
        if !flags.is_empty() {
            println!("[{}]", flags.join("] ["));
        }
        if !product.customizations.is_empty() {
            println!();
            println!("Customizations:");
            for c in &product.customizations {
                println!("  {:<14} +{}  {}", c.id.as_str(), c.price, c.name);
            }
        }
        if !reviews.is_empty() {
            println!();
            println!("Reviews:");
            for review in reviews {
                println!("  {} {}/5  {}", review.date, review.rating, review.user_name);
                println!("    {}", review.comment);
            }
        }
        Ok(())
    }

    pub fn categories(self, categories: &[CategoryInfo]) -> Result<(), CliError> {
        if self.json {
            return Self::json(categories);
        }
        for info in categories {
            println!(
                "{:<10} {:<10} {} products",
                info.category.slug(),
                info.label,
                info.product_count
            );
        }
        Ok(())
    }

    pub fn artisans(self, artisans: &[Artisan]) -> Result<(), CliError> {
        if self.json {
            return Self::json(artisans);
        }
        for artisan in artisans {
            println!(
                "{:<6} {:<16} ★ {}  {} yrs  {}",
                artisan.id.as_str(),
                artisan.name,
                artisan.rating,
                artisan.experience_years,
                artisan.location.as_deref().unwrap_or("-")
            );
        }
        Ok(())
    }

    pub fn artisan_detail(self, artisan: &Artisan, products: &[&Product]) -> Result<(), CliError> {
        if self.json {
            return Self::json(&json!({ "artisan": artisan, "products": products }));
        }
        println!("{} ({})", artisan.name, artisan.id);
        if let Some(location) = &artisan.location {
            println!("{location}");
        }
        println!(
            "★ {} ({} reviews)  ·  {} years of experience",
            artisan.rating, artisan.review_count, artisan.experience_years
        );
        let specialties: Vec<&str> = artisan.specialties.iter().map(|c| c.label()).collect();
        println!("Specialties: {}", specialties.join(", "));
        println!();
        println!("{}", artisan.bio);
        println!();
        for product in products {
            println!("{}", product_line(product));
        }
        Ok(())
    }

    pub fn stats(self, stats: &CommunityStats) -> Result<(), CliError> {
        if self.json {
            return Self::json(stats);
        }
        println!("Artisans:          {}", stats.artisan_count);
        println!("Products:          {}", stats.product_count);
        println!("Years of practice: {}", stats.combined_experience_years);
        println!("Reviews:           {}", stats.combined_review_count);
        Ok(())
    }

    pub fn cart(self, items: &[CartItem], summary: &CartSummary) -> Result<(), CliError> {
        if self.json {
            return Self::json(&json!({ "items": items, "summary": summary }));
        }
        if items.is_empty() {
            println!("Your cart is empty.");
            return Ok(());
        }
        for item in items {
            let extras = if item.customizations.is_empty() {
                String::new()
            } else {
                let ids: Vec<&str> = item.customizations.iter().map(|c| c.as_str()).collect();
                format!(" [{}]", ids.join(", "))
            };
            println!(
                "{:<6} {:<28} {} x {:>3} = {}{extras}",
                item.product.id.as_str(),
                item.product.name,
                item.unit_price(),
                item.quantity,
                item.line_total()
            );
        }
        print_summary(summary);
        Ok(())
    }

    pub fn wishlist(self, products: &[Product], total: Price) -> Result<(), CliError> {
        if self.json {
            return Self::json(&json!({ "items": products, "total_value": total }));
        }
        if products.is_empty() {
            println!("Your wishlist is empty.");
            return Ok(());
        }
        for product in products {
            println!("{}", product_line(product));
        }
        println!("Total value: {total}");
        Ok(())
    }

    pub fn user(self, user: Option<&User>) -> Result<(), CliError> {
        if self.json {
            return Self::json(&json!({ "authenticated": user.is_some(), "user": user }));
        }
        let Some(user) = user else {
            println!("Not signed in.");
            return Ok(());
        };
        println!("{} <{}> ({})", user.name, user.email, user.id);
        if let Some(phone) = &user.phone {
            println!("Phone: {phone}");
        }
        for address in &user.addresses {
            println!(
                "Address: {}, {}, {} {}, {}",
                address.street, address.city, address.state, address.zip_code, address.country
            );
        }
        let prefs = &user.preferences;
        if !prefs.favorite_categories.is_empty() {
            let favorites: Vec<&str> = prefs.favorite_categories.iter().map(|c| c.label()).collect();
            println!("Favorites: {}", favorites.join(", "));
        }
        println!(
            "Newsletter: {}  ·  Eco-friendly only: {}",
            yes_no(prefs.newsletter),
            yes_no(prefs.eco_friendly_only)
        );
        Ok(())
    }

    pub fn order(self, confirmation: &OrderConfirmation) -> Result<(), CliError> {
        if self.json {
            return Self::json(confirmation);
        }
        println!("Order placed successfully! Thank you for your purchase.");
        println!("Order number: {}", confirmation.order_number);
        println!("Placed at:    {}", confirmation.placed_at.to_rfc3339());
        print_summary(&confirmation.summary);
        Ok(())
    }

    pub fn receipt(self, receipt: &ContactReceipt) -> Result<(), CliError> {
        if self.json {
            return Self::json(receipt);
        }
        println!("Thanks for reaching out! We'll reply to {} soon.", receipt.email);
        println!("Reference: {}", receipt.reference);
        Ok(())
    }
}

fn product_line(product: &Product) -> String {
    let stock = if product.available { "" } else { "  (out of stock)" };
    format!(
        "{:<6} {:<28} {:>8}  ★ {}  {}{stock}",
        product.id.as_str(),
        product.name,
        product.price.to_string(),
        product.rating,
        product.artisan.name
    )
}

fn print_summary(summary: &CartSummary) {
    println!("Items:    {}", summary.item_count);
    println!("Subtotal: {}", summary.subtotal);
    println!("Tax:      {}", summary.tax);
    println!(
        "Shipping: {}",
        if summary.free_shipping { "free" } else { "calculated at checkout" }
    );
    println!("Total:    {}", summary.total);
}

const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
