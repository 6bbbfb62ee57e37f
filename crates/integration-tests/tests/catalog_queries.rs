//! Filtering and sorting the bundled catalog.

use pretty_assertions::assert_eq;

use handcraft_core::{Price, ProductCategory};
use handcraft_storefront::catalog::Catalog;
use handcraft_storefront::models::Product;
use handcraft_storefront::query::{
    self, CategoryFilter, PriceRange, ProductQuery, SortDirection, SortKey,
};

fn catalog() -> Catalog {
    Catalog::bundled().expect("bundled catalog loads")
}

fn ids<'a>(products: &[&'a Product]) -> Vec<&'a str> {
    products.iter().map(|p| p.id.as_str()).collect()
}

#[test]
fn test_all_category_returns_catalog_unchanged() {
    let catalog = catalog();
    let selection = query::filter(
        catalog.products(),
        &ProductQuery::new().category(CategoryFilter::All),
    );

    assert!(!selection.is_filtered());
    let expected: Vec<&Product> = catalog.products().iter().collect();
    assert_eq!(selection.products(), expected.as_slice());
}

#[test]
fn test_category_filter_returns_only_that_category() {
    let catalog = catalog();
    let selection = query::filter(
        catalog.products(),
        &ProductQuery::new().category(CategoryFilter::parse("textiles")),
    );

    assert_eq!(ids(selection.products()), ["p-103", "p-108", "p-112"]);
    assert!(
        selection
            .products()
            .iter()
            .all(|p| p.category == ProductCategory::Textiles)
    );
}

#[test]
fn test_unknown_category_is_an_empty_match() {
    let catalog = catalog();
    let selection = query::filter(
        catalog.products(),
        &ProductQuery::new().category(CategoryFilter::parse("ceramics")),
    );

    assert!(selection.is_filtered());
    assert!(selection.is_empty());
}

#[test]
fn test_search_covers_artisan_name() {
    let catalog = catalog();
    let by_artisan = query::filter(catalog.products(), &ProductQuery::new().search("MENSAH"));
    assert_eq!(ids(by_artisan.products()), ["p-103", "p-108", "p-112"]);

    let by_name = query::filter(catalog.products(), &ProductQuery::new().search("serving"));
    assert_eq!(ids(by_name.products()), ["p-101", "p-105"]);
}

#[test]
fn test_combined_filters() {
    let catalog = catalog();
    let query = ProductQuery::new()
        .handmade_only()
        .eco_friendly_only()
        .available_only()
        .price_range(PriceRange::new(Price::ZERO, Price::from_cents(5000)));

    let selection = query::filter(catalog.products(), &query);
    assert_eq!(ids(selection.products()), ["p-108", "p-110"]);
}

#[test]
fn test_price_sort_is_stable_in_both_directions() {
    let catalog = catalog();

    let ascending = query::filter(catalog.products(), &ProductQuery::new())
        .sorted(SortKey::Price, SortDirection::Ascending);
    assert_eq!(
        ids(ascending.products()),
        [
            "p-111", "p-102", "p-108", "p-110", "p-106", "p-109", "p-101", "p-105", "p-107",
            "p-103", "p-104", "p-112",
        ]
    );
    assert!(
        ascending
            .products()
            .windows(2)
            .all(|pair| pair[0].price <= pair[1].price)
    );

    // Equal prices keep catalog order when descending too.
    let descending = query::filter(catalog.products(), &ProductQuery::new())
        .sorted(SortKey::Price, SortDirection::Descending);
    assert_eq!(
        ids(descending.products()),
        [
            "p-112", "p-104", "p-103", "p-107", "p-101", "p-105", "p-109", "p-106", "p-108",
            "p-110", "p-102", "p-111",
        ]
    );
}

#[test]
fn test_rating_sort_defaults_to_highest_first() {
    let catalog = catalog();
    let key: SortKey = "rating".parse().expect("valid key");
    let sorted = query::filter(catalog.products(), &ProductQuery::new())
        .sorted(key, key.natural_direction());

    assert_eq!(
        ids(query::take(sorted.products(), 5)),
        ["p-101", "p-110", "p-112", "p-103", "p-106"]
    );
}

#[test]
fn test_name_sort_is_alphabetical() {
    let catalog = catalog();
    let sorted = query::filter(catalog.products(), &ProductQuery::new())
        .sorted(SortKey::Name, SortDirection::Ascending);

    assert_eq!(
        ids(sorted.products()),
        [
            "p-112", "p-101", "p-110", "p-111", "p-106", "p-104", "p-103", "p-108", "p-107",
            "p-109", "p-102", "p-105",
        ]
    );
}

#[test]
fn test_catalog_helpers() {
    let catalog = catalog();

    let featured: Vec<&str> = catalog.featured(6).iter().map(|p| p.id.as_str()).collect();
    assert_eq!(featured, ["p-101", "p-102", "p-103", "p-104", "p-105", "p-106"]);
    assert_eq!(catalog.featured(100).len(), 12);

    let counts: Vec<(&str, usize)> = catalog
        .categories()
        .iter()
        .map(|c| (c.category.slug(), c.product_count))
        .collect();
    assert_eq!(
        counts,
        [
            ("pottery", 2),
            ("jewelry", 2),
            ("textiles", 3),
            ("woodwork", 2),
            ("leather", 1),
            ("glassware", 2),
        ]
    );

    let stats = catalog.community_stats();
    assert_eq!(stats.artisan_count, 4);
    assert_eq!(stats.product_count, 12);
    assert_eq!(stats.combined_experience_years, 58);
    assert_eq!(stats.combined_review_count, 359);
}
