//! The static product catalog.
//!
//! The catalog is bundled into the binary as JSON and parsed once at
//! startup. Raw product records name their artisan by id; loading resolves
//! that reference and embeds the artisan into the [`Product`]. After loading
//! the catalog is read-only.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use handcraft_core::{ArtisanId, Price, ProductCategory, ProductId, Rating, ReviewId};

use crate::models::{Artisan, Customization, Product, Review};

const BUNDLED_CATALOG: &str = include_str!("../data/catalog.json");

/// Errors raised while loading catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON is invalid: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate product id {0}")]
    DuplicateProduct(ProductId),
    #[error("duplicate artisan id {0}")]
    DuplicateArtisan(ArtisanId),
    #[error("product {product} references unknown artisan {artisan}")]
    UnknownArtisan {
        product: ProductId,
        artisan: ArtisanId,
    },
    #[error("product {0} lists the same customization twice")]
    DuplicateCustomization(ProductId),
    #[error("review {review} references unknown product {product}")]
    UnknownProduct { review: ReviewId, product: ProductId },
    #[error("review {review} has rating {rating}, expected 1-5")]
    InvalidReviewRating { review: ReviewId, rating: u8 },
}

/// Display metadata for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub category: ProductCategory,
    pub label: &'static str,
    /// Number of catalog products in the category.
    pub product_count: usize,
}

/// Aggregate numbers shown on the artisans page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommunityStats {
    pub artisan_count: usize,
    pub product_count: usize,
    /// Sum of every artisan's years of experience.
    pub combined_experience_years: u32,
    /// Sum of every artisan's review count.
    pub combined_review_count: u32,
}

#[derive(Deserialize)]
struct RawCatalog {
    artisans: Vec<Artisan>,
    products: Vec<RawProduct>,
    #[serde(default)]
    reviews: Vec<Review>,
}

#[derive(Deserialize)]
struct RawProduct {
    id: ProductId,
    name: String,
    description: String,
    price: Price,
    category: ProductCategory,
    image: String,
    materials: Vec<String>,
    is_handmade: bool,
    is_eco_friendly: bool,
    rating: Rating,
    review_count: u32,
    artisan_id: ArtisanId,
    #[serde(default)]
    customizations: Vec<Customization>,
    #[serde(default = "default_available")]
    available: bool,
}

const fn default_available() -> bool {
    true
}

/// The read-only product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    artisans: Vec<Artisan>,
    reviews: Vec<Review>,
}

impl Catalog {
    /// Load the catalog bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled data is invalid.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Load and validate a catalog document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not parse or references between
    /// records do not resolve.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawCatalog) -> Result<Self, CatalogError> {
        let mut artisan_ids = HashSet::new();
        for artisan in &raw.artisans {
            if !artisan_ids.insert(&artisan.id) {
                return Err(CatalogError::DuplicateArtisan(artisan.id.clone()));
            }
        }

        let mut products = Vec::with_capacity(raw.products.len());
        let mut product_ids = HashSet::new();
        for record in raw.products {
            if !product_ids.insert(record.id.clone()) {
                return Err(CatalogError::DuplicateProduct(record.id));
            }

            let mut seen = HashSet::new();
            if !record.customizations.iter().all(|c| seen.insert(&c.id)) {
                return Err(CatalogError::DuplicateCustomization(record.id));
            }

            let Some(artisan) = raw.artisans.iter().find(|a| a.id == record.artisan_id) else {
                return Err(CatalogError::UnknownArtisan {
                    product: record.id,
                    artisan: record.artisan_id,
                });
            };

            products.push(Product {
                id: record.id,
                name: record.name,
                description: record.description,
                price: record.price,
                category: record.category,
                image: record.image,
                materials: record.materials,
                is_handmade: record.is_handmade,
                is_eco_friendly: record.is_eco_friendly,
                rating: record.rating,
                review_count: record.review_count,
                artisan: artisan.clone(),
                customizations: record.customizations,
                available: record.available,
            });
        }

        for review in &raw.reviews {
            if !product_ids.contains(&review.product_id) {
                return Err(CatalogError::UnknownProduct {
                    review: review.id.clone(),
                    product: review.product_id.clone(),
                });
            }
            if !Review::RATING_RANGE.contains(&review.rating) {
                return Err(CatalogError::InvalidReviewRating {
                    review: review.id.clone(),
                    rating: review.rating,
                });
            }
        }

        tracing::debug!(
            products = products.len(),
            artisans = raw.artisans.len(),
            reviews = raw.reviews.len(),
            "catalog loaded"
        );

        Ok(Self {
            products,
            artisans: raw.artisans,
            reviews: raw.reviews,
        })
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All artisans, in catalog order.
    #[must_use]
    pub fn artisans(&self) -> &[Artisan] {
        &self.artisans
    }

    /// All reviews, in catalog order.
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Look up an artisan by id.
    #[must_use]
    pub fn artisan(&self, id: &ArtisanId) -> Option<&Artisan> {
        self.artisans.iter().find(|a| &a.id == id)
    }

    /// Look up a category by its slug, with its product count.
    ///
    /// Unknown slugs return `None`.
    #[must_use]
    pub fn category(&self, slug: &str) -> Option<CategoryInfo> {
        ProductCategory::from_slug(slug).map(|c| self.category_info(c))
    }

    /// Every category in display order.
    #[must_use]
    pub fn categories(&self) -> Vec<CategoryInfo> {
        ProductCategory::ALL
            .into_iter()
            .map(|c| self.category_info(c))
            .collect()
    }

    fn category_info(&self, category: ProductCategory) -> CategoryInfo {
        CategoryInfo {
            category,
            label: category.label(),
            product_count: self
                .products
                .iter()
                .filter(|p| p.category == category)
                .count(),
        }
    }

    /// Reviews written for `product_id`, in catalog order.
    pub fn reviews_for<'a>(&'a self, product_id: &'a ProductId) -> impl Iterator<Item = &'a Review> {
        self.reviews.iter().filter(move |r| &r.product_id == product_id)
    }

    /// Products made by `artisan_id`, in catalog order.
    pub fn products_by_artisan<'a>(
        &'a self,
        artisan_id: &'a ArtisanId,
    ) -> impl Iterator<Item = &'a Product> {
        self.products
            .iter()
            .filter(move |p| &p.artisan.id == artisan_id)
    }

    /// The first `count` products, as shown on the home page.
    #[must_use]
    pub fn featured(&self, count: usize) -> &[Product] {
        crate::query::take(&self.products, count)
    }

    /// Totals across the artisan community.
    #[must_use]
    pub fn community_stats(&self) -> CommunityStats {
        CommunityStats {
            artisan_count: self.artisans.len(),
            product_count: self.products.len(),
            combined_experience_years: self.artisans.iter().map(|a| a.experience_years).sum(),
            combined_review_count: self.artisans.iter().map(|a| a.review_count).sum(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SMALL: &str = r#"{
        "artisans": [
            {"id": "a-1", "name": "Maya", "avatar": "m.jpg", "bio": "", "rating": 4.9,
             "review_count": 10, "specialties": ["pottery"], "experience_years": 12},
            {"id": "a-2", "name": "Leo", "avatar": "l.jpg", "bio": "", "rating": 4.5,
             "review_count": 4, "specialties": ["woodwork"], "experience_years": 3,
             "location": "Oaxaca"}
        ],
        "products": [
            {"id": "p-1", "name": "Bowl", "description": "A bowl", "price": "30.00",
             "category": "pottery", "image": "b.jpg", "materials": ["clay"],
             "is_handmade": true, "is_eco_friendly": false, "rating": 4.8,
             "review_count": 2, "artisan_id": "a-1"},
            {"id": "p-2", "name": "Spoon", "description": "A spoon", "price": "12.00",
             "category": "woodwork", "image": "s.jpg", "materials": ["walnut"],
             "is_handmade": true, "is_eco_friendly": true, "rating": 4.1,
             "review_count": 1, "artisan_id": "a-2", "available": false,
             "customizations": [{"id": "engrave", "name": "Engraving", "price": "5.00",
                                 "description": "Initials"}]}
        ],
        "reviews": [
            {"id": "r-1", "product_id": "p-1", "user_id": "u-1", "user_name": "Ana",
             "rating": 5, "comment": "Lovely", "date": "2024-03-02"},
            {"id": "r-2", "product_id": "p-2", "user_id": "u-2", "user_name": "Ben",
             "rating": 4, "comment": "Nice", "date": "2024-04-11"}
        ]
    }"#;

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = Catalog::bundled().unwrap();
        assert!(catalog.products().len() >= 6);
        assert!(!catalog.artisans().is_empty());
        assert!(!catalog.reviews().is_empty());
    }

    #[test]
    fn test_embeds_artisan_and_defaults() {
        let catalog = Catalog::from_json(SMALL).unwrap();
        let bowl = catalog.product(&ProductId::new("p-1")).unwrap();
        assert_eq!(bowl.artisan.name, "Maya");
        assert!(bowl.available);
        assert!(bowl.customizations.is_empty());

        let spoon = catalog.product(&ProductId::new("p-2")).unwrap();
        assert!(!spoon.available);
        assert_eq!(spoon.artisan.location.as_deref(), Some("Oaxaca"));
    }

    #[test]
    fn test_lookups_return_none_when_missing() {
        let catalog = Catalog::from_json(SMALL).unwrap();
        assert!(catalog.product(&ProductId::new("p-404")).is_none());
        assert!(catalog.artisan(&ArtisanId::new("a-404")).is_none());
        assert!(catalog.category("cupcakes").is_none());
    }

    #[test]
    fn test_relations() {
        let catalog = Catalog::from_json(SMALL).unwrap();
        let p1 = ProductId::new("p-1");
        let reviews: Vec<_> = catalog.reviews_for(&p1).map(|r| r.id.as_str()).collect();
        assert_eq!(reviews, ["r-1"]);

        let a2 = ArtisanId::new("a-2");
        let products: Vec<_> = catalog
            .products_by_artisan(&a2)
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(products, ["p-2"]);
    }

    #[test]
    fn test_categories_and_stats() {
        let catalog = Catalog::from_json(SMALL).unwrap();
        let pottery = catalog.category("pottery").unwrap();
        assert_eq!(pottery.product_count, 1);
        assert_eq!(catalog.categories().len(), ProductCategory::ALL.len());

        let stats = catalog.community_stats();
        assert_eq!(stats.artisan_count, 2);
        assert_eq!(stats.product_count, 2);
        assert_eq!(stats.combined_experience_years, 15);
        assert_eq!(stats.combined_review_count, 14);
    }

    #[test]
    fn test_featured_is_bounded() {
        let catalog = Catalog::from_json(SMALL).unwrap();
        assert_eq!(catalog.featured(1).len(), 1);
        assert_eq!(catalog.featured(10).len(), 2);
        assert!(catalog.featured(0).is_empty());
    }

    #[test]
    fn test_rejects_unknown_artisan() {
        let json = SMALL.replace("\"artisan_id\": \"a-2\"", "\"artisan_id\": \"a-9\"");
        assert!(matches!(
            Catalog::from_json(&json),
            Err(CatalogError::UnknownArtisan { .. })
        ));
    }

    #[test]
    fn test_rejects_dangling_review() {
        let json = SMALL.replace("\"product_id\": \"p-2\"", "\"product_id\": \"p-9\"");
        assert!(matches!(
            Catalog::from_json(&json),
            Err(CatalogError::UnknownProduct { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_review_rating() {
        let json = SMALL.replace("\"rating\": 4, ", "\"rating\": 9, ");
        assert!(matches!(
            Catalog::from_json(&json),
            Err(CatalogError::InvalidReviewRating { rating: 9, .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_product() {
        let json = SMALL.replace("\"id\": \"p-2\"", "\"id\": \"p-1\"");
        assert!(matches!(
            Catalog::from_json(&json),
            Err(CatalogError::DuplicateProduct(_))
        ));
    }
}
