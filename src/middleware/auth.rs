use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use axum_extra::{
    TypedHeader,
    extract::cookie::CookieJar,
    headers::{Authorization, authorization::Bearer},
};

use malisha_auth::{Session, SessionClaims, access, verify_session_token};
use malisha_core::{AppError, Permission, Role};
use malisha_models::UserIdentity;

use crate::state::AppState;

/// Extractor that validates the session token and provides its claims.
///
/// The token is read from `Authorization: Bearer <token>` when present,
/// otherwise from the session cookie.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub claims: SessionClaims,
    pub token: String,
}

impl CurrentSession {
    pub fn role(&self) -> Role {
        self.claims.role
    }

    pub fn user(&self) -> UserIdentity {
        self.claims.clone().into_identity()
    }

    pub fn session(&self) -> Session {
        Session::authenticated(self.user(), self.token.clone())
    }

    /// Table check for the session role.
    pub fn can(&self, permission: Permission) -> bool {
        permission.allows(self.claims.role)
    }

    /// Explicit-list check with the super-role bypass.
    pub fn has_permission(&self, permission: &str) -> bool {
        access::explicit_grant(Some(&self.user()), permission)
    }
}

/// Session cookie value, if any.
pub fn cookie_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// The session carried by the cookie; anonymous when it is missing or invalid.
pub fn cookie_session(headers: &HeaderMap, state: &AppState) -> Session {
    cookie_token(headers, &state.cookie_config.name)
        .and_then(|token| {
            verify_session_token(&token, &state.jwt_config)
                .ok()
                .map(|claims| Session::authenticated(claims.into_identity(), token))
        })
        .unwrap_or_default()
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string());

        let token = bearer
            .or_else(|| cookie_token(&parts.headers, &state.cookie_config.name))
            .ok_or_else(|| AppError::unauthorized("Authentication required".to_string()))?;

        let claims = verify_session_token(&token, &state.jwt_config)?;

        Ok(CurrentSession { claims, token })
    }
}

/// Like [`CurrentSession`], but a missing or invalid token yields `None`.
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<CurrentSession>);

impl MaybeSession {
    pub fn session(&self) -> Session {
        self.0
            .as_ref()
            .map(CurrentSession::session)
            .unwrap_or_default()
    }

    pub fn user(&self) -> Option<UserIdentity> {
        self.0.as_ref().map(CurrentSession::user)
    }
}

impl FromRequestParts<AppState> for MaybeSession {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeSession(
            CurrentSession::from_request_parts(parts, state).await.ok(),
        ))
    }
}

/// Helper macro to create extractors that check the permission table.
#[macro_export]
macro_rules! require_permission {
    ($name:ident, $permission:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::CurrentSession);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = $crate::malisha_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let current = <$crate::middleware::auth::CurrentSession as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;

                if !current.can($permission) {
                    return Err($crate::malisha_core::AppError::forbidden(format!(
                        "Access denied. Missing required permission: {}",
                        $permission
                    )));
                }

                Ok($name(current))
            }
        }
    };
}

// Settings
require_permission!(RequireSettingsView, Permission::SettingsView);
