//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `HANDCRAFT_DATA_DIR` - Directory holding persisted state (default:
//!   the platform data directory joined with `handcraft`, or `.handcraft`)
//! - `HANDCRAFT_CHECKOUT_DELAY_MS` - Simulated checkout delay (default: 2000)
//! - `HANDCRAFT_CONTACT_DELAY_MS` - Simulated contact submission delay (default: 1000)
//! - `HANDCRAFT_TAX_RATE` - Tax rate as a fraction (default: 0.08)
//! - `HANDCRAFT_FREE_SHIPPING_THRESHOLD` - Subtotal for free shipping (default: 50)
//! - `HANDCRAFT_FEATURED_COUNT` - Number of featured products (default: 6)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

use handcraft_core::Price;

use crate::cart::PricingPolicy;

const DEFAULT_CHECKOUT_DELAY_MS: u64 = 2000;
const DEFAULT_CONTACT_DELAY_MS: u64 = 1000;
const DEFAULT_FEATURED_COUNT: usize = 6;
const DATA_DIR_NAME: &str = "handcraft";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding one JSON file per persisted store
    pub data_dir: PathBuf,
    /// How long the checkout simulation waits before confirming
    pub checkout_delay: Duration,
    /// How long the contact simulation waits before confirming
    pub contact_delay: Duration,
    /// Tax and shipping rules
    pub pricing: PricingPolicy,
    /// Number of products shown as featured
    pub featured_count: usize,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            checkout_delay: Duration::from_millis(DEFAULT_CHECKOUT_DELAY_MS),
            contact_delay: Duration::from_millis(DEFAULT_CONTACT_DELAY_MS),
            pricing: PricingPolicy::default(),
            featured_count: DEFAULT_FEATURED_COUNT,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = env("HANDCRAFT_DATA_DIR").map_or_else(default_data_dir, PathBuf::from);
        let checkout_delay = Duration::from_millis(parse_or_default(
            &env,
            "HANDCRAFT_CHECKOUT_DELAY_MS",
            DEFAULT_CHECKOUT_DELAY_MS,
        )?);
        let contact_delay = Duration::from_millis(parse_or_default(
            &env,
            "HANDCRAFT_CONTACT_DELAY_MS",
            DEFAULT_CONTACT_DELAY_MS,
        )?);

        let defaults = PricingPolicy::default();
        let tax_rate: Decimal = parse_or_default(&env, "HANDCRAFT_TAX_RATE", defaults.tax_rate)?;
        if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE {
            return Err(ConfigError::InvalidEnvVar(
                "HANDCRAFT_TAX_RATE".to_string(),
                format!("must be between 0 and 1 (got {tax_rate})"),
            ));
        }
        let free_shipping_threshold: Price = parse_or_default(
            &env,
            "HANDCRAFT_FREE_SHIPPING_THRESHOLD",
            defaults.free_shipping_threshold,
        )?;
        let featured_count =
            parse_or_default(&env, "HANDCRAFT_FEATURED_COUNT", DEFAULT_FEATURED_COUNT)?;

        Ok(Self {
            data_dir,
            checkout_delay,
            contact_delay,
            pricing: PricingPolicy {
                tax_rate,
                free_shipping_threshold,
            },
            featured_count,
            sentry_dsn: env("SENTRY_DSN"),
            sentry_environment: env("SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// The platform data directory joined with `handcraft`, falling back to a
/// directory in the working directory.
fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from(format!(".{DATA_DIR_NAME}")),
        |dir| dir.join(DATA_DIR_NAME),
    )
}

/// Parse an optional variable, using `default` when it is unset.
fn parse_or_default<T, F>(env: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    env(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.checkout_delay, Duration::from_millis(2000));
        assert_eq!(config.contact_delay, Duration::from_millis(1000));
        assert_eq!(config.pricing.tax_rate, Decimal::new(8, 2));
        assert_eq!(config.pricing.free_shipping_threshold, Price::from_cents(5000));
        assert_eq!(config.featured_count, 6);
        assert!(config.data_dir.ends_with("handcraft") || config.data_dir.ends_with(".handcraft"));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("HANDCRAFT_DATA_DIR", "/tmp/handcraft-test"),
            ("HANDCRAFT_CHECKOUT_DELAY_MS", "0"),
            ("HANDCRAFT_TAX_RATE", "0.2"),
            ("HANDCRAFT_FREE_SHIPPING_THRESHOLD", "75.50"),
            ("HANDCRAFT_FEATURED_COUNT", " 3 "),
            ("SENTRY_ENVIRONMENT", "staging"),
        ])
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/handcraft-test"));
        assert_eq!(config.checkout_delay, Duration::ZERO);
        assert_eq!(config.pricing.tax_rate, Decimal::new(2, 1));
        assert_eq!(config.pricing.free_shipping_threshold, Price::from_cents(7550));
        assert_eq!(config.featured_count, 3);
        assert_eq!(config.sentry_environment.as_deref(), Some("staging"));
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = load(&[("SENTRY_DSN", ""), ("HANDCRAFT_FEATURED_COUNT", "  ")]).unwrap();
        assert!(config.sentry_dsn.is_none());
        assert_eq!(config.featured_count, 6);
    }

    #[test]
    fn test_invalid_number() {
        let err = load(&[("HANDCRAFT_CONTACT_DELAY_MS", "soon")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "HANDCRAFT_CONTACT_DELAY_MS"));
    }

    #[test]
    fn test_tax_rate_out_of_range() {
        assert!(load(&[("HANDCRAFT_TAX_RATE", "1.5")]).is_err());
        assert!(load(&[("HANDCRAFT_TAX_RATE", "-0.1")]).is_err());
    }

    #[test]
    fn test_negative_threshold() {
        assert!(load(&[("HANDCRAFT_FREE_SHIPPING_THRESHOLD", "-5")]).is_err());
    }
}
