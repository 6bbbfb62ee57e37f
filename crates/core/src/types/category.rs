//! Product categories.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// A slug that does not name any [`ProductCategory`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

/// The fixed set of categories every product belongs to.
///
/// Serialized as its kebab-case slug (`"pottery"`, `"glassware"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductCategory {
    Pottery,
    Jewelry,
    Textiles,
    Woodwork,
    Leather,
    Glassware,
}

impl ProductCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 6] = [
        Self::Pottery,
        Self::Jewelry,
        Self::Textiles,
        Self::Woodwork,
        Self::Leather,
        Self::Glassware,
    ];

    /// The URL/filter slug.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Pottery => "pottery",
            Self::Jewelry => "jewelry",
            Self::Textiles => "textiles",
            Self::Woodwork => "woodwork",
            Self::Leather => "leather",
            Self::Glassware => "glassware",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pottery => "Pottery & Ceramics",
            Self::Jewelry => "Jewelry",
            Self::Textiles => "Textiles & Weaving",
            Self::Woodwork => "Woodwork",
            Self::Leather => "Leather Goods",
            Self::Glassware => "Glassware",
        }
    }

    /// Look up a category by slug. Matching is exact.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ProductCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s).ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip() {
        for category in ProductCategory::ALL {
            assert_eq!(ProductCategory::from_slug(category.slug()), Some(category));
        }
    }

    #[test]
    fn test_unknown_slug() {
        assert_eq!(ProductCategory::from_slug("cupcakes"), None);
        assert_eq!(ProductCategory::from_slug("Pottery"), None);
        assert!("baskets".parse::<ProductCategory>().is_err());
    }

    #[test]
    fn test_serde_matches_slug() {
        let json = serde_json::to_string(&ProductCategory::Glassware).unwrap();
        assert_eq!(json, "\"glassware\"");
    }
}
