//! Authentication DTOs.
//!
//! Field names on the wire are camelCase to match the backend and the
//! browser clients (`accessToken`, `isAuthenticated`, `callbackUrl`).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::users::UserIdentity;
use malisha_core::Role;

/// Login request with email and password.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "password123")]
    pub password: String,
}

/// Successful login: the identity and the signed session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserIdentity,
    pub access_token: String,
}

/// Student details collected on self-registration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: String,
    #[validate(length(min = 1, message = "Gender is required"))]
    pub gender: String,
    #[validate(length(min = 1, message = "Nationality is required"))]
    pub nationality: String,
    #[validate(length(min = 1, message = "Date of birth is required"))]
    pub date_of_birth: String,
}

/// Student self-registration, forwarded to the backend as-is.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(nested)]
    pub student: StudentProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Logout result with the page the client should navigate to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub message: String,
    pub redirect_to: String,
}

/// The session as seen by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: Option<UserIdentity>,
    pub is_authenticated: bool,
}

/// Login response envelope returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamLoginResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<UpstreamLoginData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamLoginData {
    pub user: UpstreamUser,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl From<UpstreamUser> for UserIdentity {
    fn from(user: UpstreamUser) -> Self {
        let identity = UserIdentity::new(user.id, user.name, user.email, user.role)
            .with_permissions(user.permissions);
        match user.image {
            Some(image) => identity.with_image(image),
            None => identity,
        }
    }
}
