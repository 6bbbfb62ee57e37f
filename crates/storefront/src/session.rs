//! The session store: who is signed in on this device.

use std::sync::Arc;

use crate::models::{Session, User, UserUpdate};
use crate::persistence::{self, KeyValueStore, slots};

pub struct SessionStore {
    state: Session,
    storage: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("is_authenticated", &self.state.is_authenticated)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Rehydrate the session from `storage`, signed out if nothing usable
    /// is stored.
    #[must_use]
    pub fn restore(storage: Arc<dyn KeyValueStore>) -> Self {
        let stored: Session = persistence::restore(storage.as_ref(), slots::SESSION);
        // Only a stored user together with the flag counts as signed in.
        let state = match stored {
            Session {
                user: Some(user),
                is_authenticated: true,
            } => Session::signed_in(user),
            Session {
                user,
                is_authenticated,
            } => {
                if user.is_some() || is_authenticated {
                    tracing::warn!("stored session is inconsistent, signing out");
                }
                Session::default()
            }
        };
        Self { state, storage }
    }

    fn mutate<R>(&mut self, f: impl FnOnce(&mut Session) -> R) -> R {
        let result = f(&mut self.state);
        persistence::persist(self.storage.as_ref(), slots::SESSION, &self.state);
        result
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.state
    }

    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    /// Sign `user` in, replacing whoever was signed in before.
    pub fn login(&mut self, user: User) {
        tracing::debug!(user = %user.id, "login");
        self.mutate(|state| *state = Session::signed_in(user));
    }

    /// Return to the signed-out state.
    pub fn logout(&mut self) {
        self.mutate(|state| *state = Session::default());
        tracing::debug!("logout");
    }

    /// Merge `update` into the signed-in user. Returns `false`, changing
    /// nothing, when no one is signed in.
    pub fn update_user(&mut self, update: UserUpdate) -> bool {
        if self.state.user.is_none() {
            tracing::debug!("profile update ignored while signed out");
            return false;
        }
        self.mutate(|state| {
            if let Some(user) = state.user.as_mut() {
                user.apply(update);
            }
        });
        tracing::debug!("profile updated");
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use handcraft_core::{Email, UserId};

    use super::*;
    use crate::models::Preferences;
    use crate::persistence::MemoryStore;

    fn user(id: &str) -> User {
        User {
            id: UserId::new(id),
            name: "Sam Rivera".to_owned(),
            email: Email::parse("sam@example.com").unwrap(),
            avatar: None,
            phone: None,
            addresses: Vec::new(),
            preferences: Preferences::default(),
        }
    }

    fn store() -> (SessionStore, Arc<MemoryStore>) {
        let storage = Arc::new(MemoryStore::new());
        (SessionStore::restore(storage.clone()), storage)
    }

    #[test]
    fn test_starts_signed_out() {
        let (session, _) = store();
        assert!(!session.is_authenticated());
        assert_eq!(session.current_user(), None);
    }

    #[test]
    fn test_login_then_logout() {
        let (mut session, _) = store();
        session.login(user("u-1"));
        assert!(session.is_authenticated());
        assert_eq!(session.current_user(), Some(&user("u-1")));

        session.logout();
        assert_eq!(session.session(), &Session::default());

        // Logging out twice still lands on the default state.
        session.logout();
        assert_eq!(session.session(), &Session::default());
    }

    #[test]
    fn test_login_replaces_previous_user() {
        let (mut session, _) = store();
        session.login(user("u-1"));
        session.login(user("u-2"));
        assert_eq!(session.current_user().unwrap().id, UserId::new("u-2"));
    }

    #[test]
    fn test_update_user_merges_fields() {
        let (mut session, storage) = store();
        session.login(user("u-1"));

        let applied = session.update_user(UserUpdate {
            phone: Some(Some("555-0199".to_owned())),
            ..UserUpdate::default()
        });
        assert!(applied);

        let restored = SessionStore::restore(storage);
        let user = restored.current_user().unwrap();
        assert_eq!(user.phone.as_deref(), Some("555-0199"));
        assert_eq!(user.name, "Sam Rivera");
    }

    #[test]
    fn test_update_while_signed_out_is_noop() {
        let (mut session, storage) = store();
        let applied = session.update_user(UserUpdate {
            name: Some("Ghost".to_owned()),
            ..UserUpdate::default()
        });

        assert!(!applied);
        assert!(!session.is_authenticated());
        assert_eq!(storage.load(slots::SESSION).unwrap(), None);
    }

    #[test]
    fn test_session_survives_restore() {
        let (mut session, storage) = store();
        session.login(user("u-1"));

        let restored = SessionStore::restore(storage.clone());
        assert!(restored.is_authenticated());

        session.logout();
        assert!(!SessionStore::restore(storage).is_authenticated());
    }

    #[test]
    fn test_inconsistent_session_is_signed_out() {
        let storage = Arc::new(MemoryStore::new());
        let state = Session {
            user: None,
            is_authenticated: true,
        };
        persistence::persist(storage.as_ref(), slots::SESSION, &state);

        let session = SessionStore::restore(storage);
        assert!(!session.is_authenticated());
    }
}
