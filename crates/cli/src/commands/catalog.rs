//! Browsing commands: products, categories, artisans.

use clap::Args;

use handcraft_core::{ArtisanId, Price, ProductId};
use handcraft_storefront::query::{
    self, CategoryFilter, PriceRange, ProductQuery, SortDirection, SortKey,
};
use handcraft_storefront::{AppError, Storefront};

use crate::error::CliError;
use crate::output::Output;

/// Filters and ordering for the product listing.
#[derive(Debug, Args)]
pub struct ProductsArgs {
    /// Text to find in the name, description or artisan name
    #[arg(short, long)]
    search: Option<String>,

    /// Category slug, or `all`
    #[arg(short, long, default_value = "all")]
    category: String,

    /// Lowest price to include
    #[arg(long)]
    min_price: Option<Price>,

    /// Highest price to include
    #[arg(long)]
    max_price: Option<Price>,

    /// Only handmade products
    #[arg(long)]
    handmade: bool,

    /// Only eco-friendly products
    #[arg(long)]
    eco: bool,

    /// Only products in stock
    #[arg(long)]
    available: bool,

    /// Sort by `newest`, `name`, `price` or `rating`
    #[arg(long, default_value_t = SortKey::Newest)]
    sort: SortKey,

    /// `asc` or `desc` (default depends on the sort key)
    #[arg(long)]
    direction: Option<SortDirection>,

    /// Show at most this many products
    #[arg(short, long)]
    limit: Option<usize>,
}

impl ProductsArgs {
    fn query(&self) -> ProductQuery {
        let mut query = ProductQuery::new().category(CategoryFilter::parse(&self.category));
        if let Some(text) = &self.search {
            query = query.search(text.clone());
        }
        if let Some(range) = PriceRange::from_bounds(self.min_price, self.max_price) {
            query = query.price_range(range);
        }
        if self.handmade {
            query = query.handmade_only();
        }
        if self.eco {
            query = query.eco_friendly_only();
        }
        if self.available {
            query = query.available_only();
        }
        query
    }
}

/// List products matching `args`.
pub fn products(storefront: &Storefront, out: Output, args: &ProductsArgs) -> Result<(), CliError> {
    let direction = args
        .direction
        .unwrap_or_else(|| args.sort.natural_direction());
    let selection = query::filter(storefront.catalog().products(), &args.query())
        .sorted(args.sort, direction);

    let all = selection.products();
    let shown = args.limit.map_or(all, |n| query::take(all, n));
    tracing::debug!(matched = all.len(), shown = shown.len(), "listed products");
    out.products(shown, all.len())
}

/// Show one product with its reviews.
pub fn product(storefront: &Storefront, out: Output, id: &str) -> Result<(), CliError> {
    let id = ProductId::new(id);
    let product = storefront.product(&id)?;
    let reviews: Vec<_> = storefront.catalog().reviews_for(&id).collect();
    out.product_detail(product, &reviews)
}

pub fn featured(storefront: &Storefront, out: Output) -> Result<(), CliError> {
    let featured: Vec<_> = storefront.featured().iter().collect();
    out.products(&featured, featured.len())
}

pub fn categories(storefront: &Storefront, out: Output) -> Result<(), CliError> {
    out.categories(&storefront.catalog().categories())
}

/// List artisans, or show one with their products.
pub fn artisans(storefront: &Storefront, out: Output, id: Option<&str>) -> Result<(), CliError> {
    let catalog = storefront.catalog();
    let Some(id) = id else {
        return out.artisans(catalog.artisans());
    };

    let id = ArtisanId::new(id);
    let artisan = catalog
        .artisan(&id)
        .ok_or_else(|| AppError::NotFound(format!("artisan {id}")))?;
    let products: Vec<_> = catalog.products_by_artisan(&id).collect();
    out.artisan_detail(artisan, &products)
}

pub fn stats(storefront: &Storefront, out: Output) -> Result<(), CliError> {
    out.stats(&storefront.catalog().community_stats())
}
