//! Handcraft Market CLI - browse the catalog and manage your cart.
//!
//! # Usage
//!
//! ```bash
//! # Browse handmade pottery under $50, cheapest first
//! handcraft products --category pottery --handmade --max-price 50 --sort price
//!
//! # Add a product with a customization and check out
//! handcraft cart add p-101 --quantity 2 --customization gift-wrap
//! handcraft cart checkout
//!
//! # Save something for later
//! handcraft wishlist toggle p-104
//! ```
//!
//! Every invocation is one shopper action: state is restored from the data
//! directory, the action runs, and the result is saved back.
//!
//! # Commands
//!
//! - `products`, `product`, `featured`, `categories`, `artisans`, `stats` - Browse
//! - `cart` - Show and change the cart, check out
//! - `wishlist` - Show and change the wishlist
//! - `login`, `logout`, `whoami`, `profile` - Session
//! - `contact` - Send a message to the shop

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use handcraft_storefront::Storefront;
use handcraft_storefront::config::StorefrontConfig;

mod commands;
mod error;
mod output;

use error::CliError;
use output::Output;

#[derive(Parser)]
#[command(name = "handcraft")]
#[command(author, version, about = "Handcraft Market storefront")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, with optional filters and sorting
    Products(commands::catalog::ProductsArgs),
    /// Show a product with its customizations and reviews
    Product {
        /// Product id
        id: String,
    },
    /// Show the featured products
    Featured,
    /// List categories with product counts
    Categories,
    /// List artisans, or show one artisan and their products
    Artisans {
        /// Artisan id
        id: Option<String>,
    },
    /// Show community totals
    Stats,
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Sign in on this device
    Login(commands::account::LoginArgs),
    /// Sign out
    Logout,
    /// Show who is signed in
    Whoami,
    /// Update the signed-in profile
    Profile(commands::account::ProfileArgs),
    /// Send a message to the shop
    Contact(commands::contact::ContactArgs),
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart and its totals
    Show,
    /// Add a product
    Add {
        /// Product id
        id: String,

        /// Number of units
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Customization id (repeatable)
        #[arg(short, long = "customization")]
        customizations: Vec<String>,
    },
    /// Remove a product
    Remove {
        /// Product id
        id: String,
    },
    /// Set a product's quantity (0 or less removes it)
    Update {
        /// Product id
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
    /// Place the order
    Checkout,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show the wishlist
    Show,
    /// Save a product
    Add {
        /// Product id
        id: String,
    },
    /// Remove a saved product
    Remove {
        /// Product id
        id: String,
    },
    /// Save or unsave a product
    Toggle {
        /// Product id
        id: String,
    },
    /// Remove every saved product
    Clear,
    /// Move a saved product into the cart
    MoveToCart {
        /// Product id
        id: String,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = StorefrontConfig::from_env();

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    // Logs go to stderr so stdout stays clean for command output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "handcraft_storefront=info,handcraft_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(CliError::from(e)),
    };

    if let Err(e) = result {
        e.report();
        tracing::error!("Command failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), CliError> {
    let out = Output::new(cli.json);
    let mut storefront = Storefront::open(config)?;

    match cli.command {
        Commands::Products(args) => commands::catalog::products(&storefront, out, &args)?,
        Commands::Product { id } => commands::catalog::product(&storefront, out, &id)?,
        Commands::Featured => commands::catalog::featured(&storefront, out)?,
        Commands::Categories => commands::catalog::categories(&storefront, out)?,
        Commands::Artisans { id } => {
            commands::catalog::artisans(&storefront, out, id.as_deref())?;
        }
        Commands::Stats => commands::catalog::stats(&storefront, out)?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&storefront, out)?,
            CartAction::Add {
                id,
                quantity,
                customizations,
            } => commands::cart::add(&mut storefront, out, &id, quantity, &customizations)?,
            CartAction::Remove { id } => commands::cart::remove(&mut storefront, out, &id)?,
            CartAction::Update { id, quantity } => {
                commands::cart::update(&mut storefront, out, &id, quantity)?;
            }
            CartAction::Clear => commands::cart::clear(&mut storefront, out)?,
            CartAction::Checkout => commands::cart::checkout(&mut storefront, out).await?,
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::wishlist::show(&storefront, out)?,
            WishlistAction::Add { id } => commands::wishlist::add(&mut storefront, out, &id)?,
            WishlistAction::Remove { id } => {
                commands::wishlist::remove(&mut storefront, out, &id)?;
            }
            WishlistAction::Toggle { id } => {
                commands::wishlist::toggle(&mut storefront, out, &id)?;
            }
            WishlistAction::Clear => commands::wishlist::clear(&mut storefront, out)?,
            WishlistAction::MoveToCart { id } => {
                commands::wishlist::move_to_cart(&mut storefront, out, &id)?;
            }
        },
        Commands::Login(args) => commands::account::login(&mut storefront, out, args)?,
        Commands::Logout => commands::account::logout(&mut storefront, out)?,
        Commands::Whoami => commands::account::whoami(&storefront, out)?,
        Commands::Profile(args) => commands::account::profile(&mut storefront, out, args)?,
        Commands::Contact(args) => commands::contact::send(&storefront, out, args).await?,
    }
    Ok(())
}
