//! Authentication state held by the session store.

use serde::{Deserialize, Serialize};

use super::User;

/// Who is signed in, if anyone.
///
/// The default value is the signed-out state. `is_authenticated` is kept
/// alongside `user` because that is the shape persisted to storage; the
/// session store keeps the two in step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<User>,
    pub is_authenticated: bool,
}

impl Session {
    /// A signed-in session for `user`.
    #[must_use]
    pub const fn signed_in(user: User) -> Self {
        Self {
            user: Some(user),
            is_authenticated: true,
        }
    }
}
