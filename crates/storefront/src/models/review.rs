//! Product reviews.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use handcraft_core::{ProductId, ReviewId, UserId};

/// A shopper's review of a single product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_id: UserId,
    pub user_name: String,
    /// Whole stars, 1 through 5. Checked when the catalog is loaded.
    pub rating: u8,
    pub comment: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl Review {
    /// Lowest and highest star values a review may carry.
    pub const RATING_RANGE: core::ops::RangeInclusive<u8> = 1..=5;
}
