//! Sign-in and profile commands.
//!
//! There is no account backend: signing in records the given identity on
//! this device until `logout`.

use clap::Args;
use uuid::Uuid;

use handcraft_core::{Email, ProductCategory, UserId};
use handcraft_storefront::models::{Preferences, User, UserUpdate};
use handcraft_storefront::{AppError, Storefront};

use crate::error::CliError;
use crate::output::Output;

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Display name
    #[arg(short, long)]
    name: String,

    /// Email address
    #[arg(short, long)]
    email: String,

    /// Phone number
    #[arg(long)]
    phone: Option<String>,

    /// Account id (generated if omitted)
    #[arg(long)]
    id: Option<String>,
}

/// Fields to change on the signed-in profile. Omitted fields are kept.
#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long, conflicts_with = "clear_phone")]
    phone: Option<String>,

    /// Remove the phone number
    #[arg(long)]
    clear_phone: bool,

    #[arg(long, conflicts_with = "clear_avatar")]
    avatar: Option<String>,

    /// Remove the avatar
    #[arg(long)]
    clear_avatar: bool,

    /// Receive the newsletter
    #[arg(long)]
    newsletter: Option<bool>,

    /// Prefer eco-friendly products
    #[arg(long)]
    eco_only: Option<bool>,

    /// Favorite category slugs (replaces the current list)
    #[arg(long = "favorite", value_delimiter = ',')]
    favorites: Option<Vec<ProductCategory>>,
}

fn parse_email(raw: &str) -> Result<Email, AppError> {
    Email::parse(raw).map_err(|e| AppError::BadRequest(format!("email: {e}")))
}

pub fn login(storefront: &mut Storefront, out: Output, args: LoginArgs) -> Result<(), CliError> {
    let name = args.name.trim().to_owned();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()).into());
    }
    let user = User {
        id: args
            .id
            .map_or_else(|| UserId::new(format!("u-{}", Uuid::new_v4().simple())), UserId::new),
        name,
        email: parse_email(&args.email)?,
        avatar: None,
        phone: args.phone,
        addresses: Vec::new(),
        preferences: Preferences::default(),
    };
    storefront.login(user);
    out.user(storefront.session().current_user())
}

pub fn logout(storefront: &mut Storefront, out: Output) -> Result<(), CliError> {
    storefront.logout();
    out.message("Signed out.")
}

pub fn whoami(storefront: &Storefront, out: Output) -> Result<(), CliError> {
    out.user(storefront.session().current_user())
}

pub fn profile(storefront: &mut Storefront, out: Output, args: ProfileArgs) -> Result<(), CliError> {
    let current = storefront
        .session()
        .current_user()
        .map(|u| u.preferences.clone())
        .ok_or_else(|| AppError::Unauthorized("sign in to edit your profile".to_string()))?;

    let touches_preferences =
        args.newsletter.is_some() || args.eco_only.is_some() || args.favorites.is_some();
    let preferences = if touches_preferences {
        Some(Preferences {
            favorite_categories: args.favorites.unwrap_or(current.favorite_categories),
            newsletter: args.newsletter.unwrap_or(current.newsletter),
            eco_friendly_only: args.eco_only.unwrap_or(current.eco_friendly_only),
        })
    } else {
        None
    };

    let update = UserUpdate {
        name: args.name,
        email: args.email.as_deref().map(parse_email).transpose()?,
        avatar: if args.clear_avatar { Some(None) } else { args.avatar.map(Some) },
        phone: if args.clear_phone { Some(None) } else { args.phone.map(Some) },
        addresses: None,
        preferences,
    };
    if update.is_empty() {
        return out.message("Nothing to update.");
    }

    let user = storefront.update_profile(update)?;
    out.user(Some(user))
}
