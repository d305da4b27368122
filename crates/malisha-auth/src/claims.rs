//! Session token claims.
//!
//! The session token is the single canonical session credential: it is the
//! value of the session cookie and the bearer token handed to API clients.
//! Its claims carry the full [`UserIdentity`], so the boundary and the API
//! extractors never need a lookup.

use malisha_core::Role;
use malisha_models::UserIdentity;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JWT claims for session tokens.
///
/// # Fields
///
/// - `sub`: User ID (subject)
/// - `name`, `email`, `role`, `permissions`, `image`: The user identity
/// - `exp`: Token expiration timestamp
/// - `iat`: Token issued-at timestamp
/// - `jti`: Unique token identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionClaims {
    /// User ID (subject claim)
    pub sub: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Explicitly granted permission strings
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
    pub jti: String,
}

impl SessionClaims {
    pub fn into_identity(self) -> UserIdentity {
        UserIdentity {
            id: self.sub,
            name: self.name,
            email: self.email,
            role: self.role,
            permissions: self.permissions,
            image: self.image,
        }
    }
}
