//! The auth session store.
//!
//! [`AuthSessionStore`] is the single source of truth for the current identity
//! on a client. It owns its [`SessionStorage`] and persists after every
//! mutation. Persistence is fire-and-forget: a failed save is logged and the
//! in-memory state stands.
//!
//! # Example
//!
//! ```ignore
//! use malisha_auth::{AuthSessionStore, FileStorage};
//!
//! let mut store = AuthSessionStore::rehydrate(FileStorage::new(dir));
//! store.set_auth(user, token);
//! assert!(store.is_authenticated());
//! store.logout();
//! ```

use malisha_models::{UserIdentity, UserPatch};
use tracing::{debug, warn};

use crate::access;
use crate::session::{Session, SessionSnapshot};
use crate::storage::SessionStorage;

pub struct AuthSessionStore<S: SessionStorage> {
    session: Session,
    storage: S,
}

impl<S: SessionStorage> AuthSessionStore<S> {
    /// Empty store. Nothing is read from `storage`.
    pub fn new(storage: S) -> Self {
        Self {
            session: Session::anonymous(),
            storage,
        }
    }

    /// Store initialised from the last persisted snapshot, or empty.
    pub fn rehydrate(storage: S) -> Self {
        let session = storage
            .load()
            .map(SessionSnapshot::into_session)
            .unwrap_or_default();
        debug!(
            authenticated = session.is_authenticated(),
            "Session rehydrated"
        );
        Self { session, storage }
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Replaces user and token together.
    pub fn set_auth(&mut self, user: UserIdentity, token: impl Into<String>) {
        self.session = Session::authenticated(user, token);
        self.persist();
    }

    /// Clears user and token. Safe to call when already logged out.
    pub fn logout(&mut self) {
        self.session = Session::anonymous();
        self.persist();
    }

    /// Merges `patch` into the current user. No-op without a user.
    pub fn update_user(&mut self, patch: UserPatch) {
        let Some(user) = self.session.user.as_mut() else {
            return;
        };
        user.apply(patch);
        self.persist();
    }

    /// Explicit-list permission check; the super-role always passes.
    pub fn has_permission(&self, permission: &str) -> bool {
        access::explicit_grant(self.session.user(), permission)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        self.session.user()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    fn persist(&mut self) {
        let snapshot = SessionSnapshot::from(&self.session);
        if let Err(e) = self.storage.save(&snapshot) {
            warn!(error = %e, "Failed to persist session");
        }
    }
}
