//! The in-memory session and its persisted snapshot.

use malisha_core::{LegacyRole, Role};
use malisha_models::UserIdentity;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// Current identity and credential of a client.
///
/// `is_authenticated` is derived from `user` and `token`, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<UserIdentity>,
    pub token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: UserIdentity, token: impl Into<String>) -> Self {
        Self {
            user: Some(user),
            token: Some(token.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }
}

/// The persisted form of a [`Session`].
///
/// ```json
/// {"state": {"user": {...}, "token": "...", "isAuthenticated": true}, "version": 0}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: SnapshotState,
    #[serde(default)]
    pub version: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotState {
    #[serde(default, deserialize_with = "deserialize_stored_user")]
    pub user: Option<UserIdentity>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub is_authenticated: bool,
}

/// A role tag as it may appear in a snapshot: canonical, or one of the
/// lowercase tags older clients wrote.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRole {
    Canonical(Role),
    Legacy(LegacyRole),
}

#[derive(Deserialize)]
struct StoredUser {
    id: String,
    name: String,
    email: String,
    role: StoredRole,
    #[serde(default)]
    permissions: Vec<String>,
    #[serde(default)]
    image: Option<String>,
}

/// Reads a persisted user, mapping legacy role tags. A `guest` user has no
/// canonical role and reads back as no user at all.
fn deserialize_stored_user<'de, D>(deserializer: D) -> Result<Option<UserIdentity>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(stored) = Option::<StoredUser>::deserialize(deserializer)? else {
        return Ok(None);
    };

    let role = match stored.role {
        StoredRole::Canonical(role) => Some(role),
        StoredRole::Legacy(legacy) => {
            let role = legacy.to_canonical();
            debug!(legacy = ?legacy, role = ?role, "Mapped legacy role in session snapshot");
            role
        }
    };

    Ok(role.map(|role| UserIdentity {
        id: stored.id,
        name: stored.name,
        email: stored.email,
        role,
        permissions: stored.permissions,
        image: stored.image,
    }))
}

impl SessionSnapshot {
    pub const VERSION: u32 = 0;

    /// Converts back into a session. The stored `isAuthenticated` flag is
    /// ignored: it is recomputed from `user` and `token`.
    pub fn into_session(self) -> Session {
        Session {
            user: self.state.user,
            token: self.state.token,
        }
    }
}

impl From<&Session> for SessionSnapshot {
    fn from(session: &Session) -> Self {
        Self {
            state: SnapshotState {
                user: session.user.clone(),
                token: session.token.clone(),
                is_authenticated: session.is_authenticated(),
            },
            version: Self::VERSION,
        }
    }
}
