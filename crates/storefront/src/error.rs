//! Unified error handling with Sentry integration.
//!
//! Every fallible storefront operation surfaces as an [`AppError`]. Store
//! lookups that miss are not errors (they are silent no-ops); `NotFound` is
//! reserved for ids a caller supplied that do not exist in the catalog.

use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::contact::ContactError;
use crate::persistence::PersistError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bundled catalog data failed to load.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The persistence backend could not be opened.
    #[error("Storage error: {0}")]
    Persist(#[from] PersistError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A cart operation was rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout could not start.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// The contact form did not validate.
    #[error("Contact error: {0}")]
    Contact(#[from] ContactError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The operation needs a signed-in user.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad input from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether the error points at a fault in the installation or data
    /// rather than at the caller's input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Catalog(_) | Self::Persist(_) | Self::Config(_))
    }

    /// Log the error, capturing internal ones to Sentry.
    pub fn report(&self) {
        if self.is_internal() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Storefront error"
            );
        } else {
            tracing::debug!(error = %self, "Rejected request");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after sign-in to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on sign-out to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for shopper actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item", Some(&[("product_id", "p-101")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product p-404".to_string());
        assert_eq!(err.to_string(), "Not found: product p-404");

        let err = AppError::from(CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "Checkout error: cannot check out an empty cart");
    }

    #[test]
    fn test_internal_classification() {
        assert!(AppError::Persist(PersistError::Poisoned).is_internal());
        assert!(AppError::Config(ConfigError::InvalidEnvVar("X".into(), "bad".into())).is_internal());
        assert!(!AppError::NotFound("x".into()).is_internal());
        assert!(!AppError::Contact(ContactError::MissingField("name")).is_internal());
    }

    #[test]
    fn test_report_without_sentry_client() {
        // With no client bound these are no-ops and must not panic.
        AppError::Persist(PersistError::Poisoned).report();
        add_breadcrumb("cart", "Added item", Some(&[("product_id", "p-1")]));
        set_sentry_user(&"u-1", Some("sam@example.com"));
        clear_sentry_user();
    }
}
