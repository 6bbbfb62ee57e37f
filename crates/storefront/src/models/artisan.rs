//! Artisan profiles.

use serde::{Deserialize, Serialize};

use handcraft_core::{ArtisanId, ProductCategory, Rating};

/// A maker who sells through the marketplace.
///
/// Products embed a copy of their artisan so that a cart or wishlist entry
/// restored from storage can still be displayed on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artisan {
    pub id: ArtisanId,
    pub name: String,
    pub avatar: String,
    pub bio: String,
    pub rating: Rating,
    pub review_count: u32,
    pub specialties: Vec<ProductCategory>,
    /// Years of experience.
    pub experience_years: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Artisan {
    /// Whether the artisan lists `category` among their specialties.
    #[must_use]
    pub fn specializes_in(&self, category: ProductCategory) -> bool {
        self.specialties.contains(&category)
    }
}
