//! Shopper identity and profile types.

use serde::{Deserialize, Serialize};

use handcraft_core::{Email, ProductCategory, UserId};

/// A shipping address on the shopper's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// Shopping preferences saved on the profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub favorite_categories: Vec<ProductCategory>,
    #[serde(default)]
    pub newsletter: bool,
    #[serde(default)]
    pub eco_friendly_only: bool,
}

/// The signed-in shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub preferences: Preferences,
}

/// A partial update to a [`User`]. Only fields that are `Some` are applied.
///
/// `avatar` and `phone` are doubly optional: `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub avatar: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub addresses: Option<Vec<Address>>,
    pub preferences: Option<Preferences>,
}

impl UserUpdate {
    /// Whether the update would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.avatar.is_none()
            && self.phone.is_none()
            && self.addresses.is_none()
            && self.preferences.is_none()
    }
}

impl User {
    /// Merge the present fields of `update` into this user.
    ///
    /// The id is never changed.
    pub fn apply(&mut self, update: UserUpdate) {
        let UserUpdate {
            name,
            email,
            avatar,
            phone,
            addresses,
            preferences,
        } = update;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(avatar) = avatar {
            self.avatar = avatar;
        }
        if let Some(phone) = phone {
            self.phone = phone;
        }
        if let Some(addresses) = addresses {
            self.addresses = addresses;
        }
        if let Some(preferences) = preferences {
            self.preferences = preferences;
        }
    }
}
