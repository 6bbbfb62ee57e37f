//! Filtering, sorting and slicing of catalog products.
//!
//! Everything here is pure: the same products and query always produce the
//! same result, and the catalog is never modified.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use feruca::Collator;
use thiserror::Error;

use handcraft_core::Price;

use crate::models::Product;

/// A sort key or direction that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseQueryError {
    kind: &'static str,
    value: String,
}

/// Which categories a query admits.
///
/// `Only` holds the raw slug so that a slug naming no category simply
/// matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Parse a filter value; `"all"` admits every category.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::Only(value.to_owned())
        }
    }

    fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(slug) => product.category.slug() == slug,
        }
    }
}

/// An inclusive price range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Price,
    pub max: Price,
}

impl PriceRange {
    /// A range from `min` to `max`, both inclusive. A range whose `min`
    /// exceeds its `max` contains nothing.
    #[must_use]
    pub const fn new(min: Price, max: Price) -> Self {
        Self { min, max }
    }

    /// A range from optional bounds, open on any side that is `None`.
    /// Returns `None` when neither bound is given.
    #[must_use]
    pub fn from_bounds(min: Option<Price>, max: Option<Price>) -> Option<Self> {
        if min.is_none() && max.is_none() {
            return None;
        }
        Some(Self::new(
            min.unwrap_or(Price::ZERO),
            max.unwrap_or(Price::MAX),
        ))
    }

    /// Whether `price` falls inside the range.
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        self.min <= price && price <= self.max
    }
}

/// A product query. Every constraint that is set must hold (logical AND).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Case-insensitive substring matched against the product name,
    /// description and artisan name.
    pub search: Option<String>,
    pub category: CategoryFilter,
    pub price_range: Option<PriceRange>,
    pub handmade_only: bool,
    pub eco_friendly_only: bool,
    pub available_only: bool,
}

impl ProductQuery {
    /// A query with no constraints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    #[must_use]
    pub fn category(mut self, filter: CategoryFilter) -> Self {
        self.category = filter;
        self
    }

    #[must_use]
    pub const fn price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    #[must_use]
    pub const fn handmade_only(mut self) -> Self {
        self.handmade_only = true;
        self
    }

    #[must_use]
    pub const fn eco_friendly_only(mut self) -> Self {
        self.eco_friendly_only = true;
        self
    }

    #[must_use]
    pub const fn available_only(mut self) -> Self {
        self.available_only = true;
        self
    }

    /// Whether the query constrains nothing, so every product matches.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.search_needle().is_none()
            && self.category == CategoryFilter::All
            && self.price_range.is_none()
            && !self.handmade_only
            && !self.eco_friendly_only
            && !self.available_only
    }

    fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Whether a single product satisfies the query.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_with(product, self.search_needle().as_deref())
    }

    fn matches_with(&self, product: &Product, needle: Option<&str>) -> bool {
        let text_ok = needle.is_none_or(|needle| {
            [
                product.name.as_str(),
                product.description.as_str(),
                product.artisan.name.as_str(),
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
        });

        text_ok
            && self.category.matches(product)
            && self
                .price_range
                .is_none_or(|range| range.contains(product.price))
            && (!self.handmade_only || product.is_handmade)
            && (!self.eco_friendly_only || product.is_eco_friendly)
            && (!self.available_only || product.available)
    }
}

/// The products selected by [`filter`].
///
/// `Unfiltered` means no constraint was applied; `Matched` means one was,
/// and may well be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<'a> {
    Unfiltered(Vec<&'a Product>),
    Matched(Vec<&'a Product>),
}

impl<'a> Selection<'a> {
    /// The selected products, in their current order.
    #[must_use]
    pub fn products(&self) -> &[&'a Product] {
        match self {
            Self::Unfiltered(products) | Self::Matched(products) => products,
        }
    }

    /// Consume the selection, returning its products.
    #[must_use]
    pub fn into_products(self) -> Vec<&'a Product> {
        match self {
            Self::Unfiltered(products) | Self::Matched(products) => products,
        }
    }

    /// Whether a constraint was applied.
    #[must_use]
    pub const fn is_filtered(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products().is_empty()
    }

    /// Sort the selection in place. See [`sort`].
    #[must_use]
    pub fn sorted(mut self, key: SortKey, direction: SortDirection) -> Self {
        match &mut self {
            Self::Unfiltered(products) | Self::Matched(products) => {
                sort(products, key, direction);
            }
        }
        self
    }
}

/// Select the products matching `query`, preserving their order.
#[must_use]
pub fn filter<'a>(products: &'a [Product], query: &ProductQuery) -> Selection<'a> {
    if query.is_unconstrained() {
        return Selection::Unfiltered(products.iter().collect());
    }

    let needle = query.search_needle();
    Selection::Matched(
        products
            .iter()
            .filter(|p| query.matches_with(p, needle.as_deref()))
            .collect(),
    )
}

/// Product sort keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Catalog order. Direction has no effect.
    #[default]
    Newest,
    /// Alphabetical by name, using the Unicode collation order (accents
    /// and case are secondary).
    Name,
    Price,
    Rating,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Name => "name",
            Self::Price => "price",
            Self::Rating => "rating",
        }
    }

    /// The direction a shopper expects when picking this key: highest
    /// rated first, everything else ascending.
    #[must_use]
    pub const fn natural_direction(self) -> SortDirection {
        match self {
            Self::Rating => SortDirection::Descending,
            Self::Newest | Self::Name | Self::Price => SortDirection::Ascending,
        }
    }

    fn compare(self, collator: &mut Collator, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Newest => Ordering::Equal,
            Self::Name => collator.collate(a.name.as_str(), b.name.as_str()),
            Self::Price => a.price.cmp(&b.price),
            Self::Rating => a.rating.cmp(&b.rating),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParseQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "name" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            "rating" => Ok(Self::Rating),
            other => Err(ParseQueryError {
                kind: "sort key",
                value: other.to_owned(),
            }),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = ParseQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(ParseQueryError {
                kind: "sort direction",
                value: other.to_owned(),
            }),
        }
    }
}

/// Stable in-place sort. Products that compare equal keep their relative
/// order in both directions.
pub fn sort(products: &mut [&Product], key: SortKey, direction: SortDirection) {
    let mut collator = Collator::default();
    match direction {
        SortDirection::Ascending => products.sort_by(|a, b| key.compare(&mut collator, a, b)),
        SortDirection::Descending => products.sort_by(|a, b| key.compare(&mut collator, b, a)),
    }
}

/// The first `count` items, or all of them if there are fewer.
#[must_use]
pub fn take<T>(items: &[T], count: usize) -> &[T] {
    items.split_at(count.min(items.len())).0
}
