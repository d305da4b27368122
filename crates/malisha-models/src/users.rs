//! The session-scoped user identity.
//!
//! A [`UserIdentity`] is created on successful login, replaced wholesale on a
//! new login and dropped on logout. Its role never changes while the session
//! lives, so [`UserPatch`] has no role field.

use malisha_core::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserIdentity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Explicitly granted permission strings, independent of the role.
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl UserIdentity {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            permissions: Vec::new(),
            image: None,
        }
    }

    /// Replaces the explicit permissions, dropping duplicates.
    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = dedup(permissions.into_iter().map(Into::into));
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Whether `permission` is in the explicit list. Ignores the role.
    pub fn has_explicit_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    /// Shallow merge: fields present in `patch` overwrite ours.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(permissions) = patch.permissions {
            self.permissions = dedup(permissions.into_iter());
        }
        if let Some(image) = patch.image {
            self.image = Some(image);
        }
    }
}

fn dedup(permissions: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for permission in permissions {
        if !out.contains(&permission) {
            out.push(permission);
        }
    }
    out
}

/// Partial update for [`UserIdentity`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl UserPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}
