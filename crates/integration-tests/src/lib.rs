//! Integration tests for the Handcraft marketplace.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p handcraft-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_queries` - Filtering and sorting the bundled catalog
//! - `shopping_flow` - Cart, wishlist and checkout driven through the context
//! - `persistence` - State surviving a restart, and damaged state files
//!
//! Every test gets its own [`TestContext`], backed by a fresh temporary
//! data directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;

use handcraft_core::{Email, UserId};
use handcraft_storefront::Storefront;
use handcraft_storefront::config::StorefrontConfig;
use handcraft_storefront::models::{Preferences, User};

/// A storefront over a throwaway data directory.
///
/// Simulated delays are zero so tests run instantly. Call
/// [`TestContext::reopen`] to simulate a restart against the same files.
pub struct TestContext {
    dir: TempDir,
    pub storefront: Storefront,
}

impl TestContext {
    /// Open a storefront over a new, empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory or the storefront cannot be
    /// created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let storefront = Storefront::open(config_for(dir.path())).expect("Failed to open storefront");
        Self { dir, storefront }
    }

    /// Drop the current storefront and open a new one over the same files.
    ///
    /// # Panics
    ///
    /// Panics if the storefront cannot be reopened.
    pub fn reopen(&mut self) {
        self.storefront =
            Storefront::open(config_for(self.dir.path())).expect("Failed to reopen storefront");
    }

    /// The data directory holding the slot files.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the file backing `slot`.
    #[must_use]
    pub fn slot_file(&self, slot: &str) -> PathBuf {
        self.dir.path().join(format!("{slot}.json"))
    }

    /// Read and parse the file backing `slot`.
    ///
    /// # Panics
    ///
    /// Panics if the file is missing or is not JSON.
    #[must_use]
    pub fn slot_json(&self, slot: &str) -> serde_json::Value {
        let raw = std::fs::read_to_string(self.slot_file(slot)).expect("Slot file missing");
        serde_json::from_str(&raw).expect("Slot file is not JSON")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

fn config_for(dir: &Path) -> StorefrontConfig {
    StorefrontConfig {
        data_dir: dir.to_path_buf(),
        checkout_delay: Duration::ZERO,
        contact_delay: Duration::ZERO,
        ..StorefrontConfig::default()
    }
}

/// A signed-in shopper for session tests.
///
/// # Panics
///
/// Panics if `email` is not a valid address.
#[must_use]
pub fn shopper(id: &str, email: &str) -> User {
    User {
        id: UserId::new(id),
        name: "Sam Rivera".to_string(),
        email: Email::parse(email).expect("Invalid test email"),
        avatar: None,
        phone: None,
        addresses: Vec::new(),
        preferences: Preferences::default(),
    }
}
