//! Session token creation and verification.
//!
//! Tokens are HS256 JWTs signed with [`JwtConfig::secret`]. Verification
//! checks the signature and the expiry; anything that fails is reported as
//! `401 Invalid or expired token` and callers that only need a yes/no (the
//! route boundary) treat it as an anonymous session.
//!
//! # Example
//!
//! ```ignore
//! use malisha_auth::{create_session_token, verify_session_token};
//! use malisha_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_session_token(&user, &config)?;
//! let claims = verify_session_token(&token, &config)?;
//! assert_eq!(claims.sub, user.id);
//! ```

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use malisha_config::JwtConfig;
use malisha_core::AppError;
use malisha_models::UserIdentity;

use crate::claims::SessionClaims;

/// Creates a signed session token embedding `user`.
///
/// # Errors
///
/// Returns an internal error if token encoding fails.
pub fn create_session_token(user: &UserIdentity, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = (now + jwt_config.access_token_expiry) as usize;

    let claims = SessionClaims {
        sub: user.id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role,
        permissions: user.permissions.clone(),
        image: user.image.clone(),
        exp,
        iat: now as usize,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies a session token and returns its claims.
///
/// # Errors
///
/// Returns an unauthorized error if the signature is invalid, the token has
/// expired or it is malformed.
pub fn verify_session_token(token: &str, jwt_config: &JwtConfig) -> Result<SessionClaims, AppError> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use malisha_core::Role;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 3600,
        }
    }

    fn user() -> UserIdentity {
        UserIdentity::new("u-42", "Rafi Ahmed", "rafi@malisha.edu", Role::Counselor)
            .with_permissions(["lead:view"])
    }

    #[test]
    fn test_create_and_verify_session_token() {
        let config = get_test_jwt_config();
        let token = create_session_token(&user(), &config).unwrap();
        assert!(!token.is_empty());

        let claims = verify_session_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "u-42");
        assert_eq!(claims.role, Role::Counselor);
        assert_eq!(claims.permissions, vec!["lead:view".to_string()]);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(claims.into_identity(), user());
    }

    #[test]
    fn test_tokens_are_unique() {
        let config = get_test_jwt_config();
        let first = create_session_token(&user(), &config).unwrap();
        let second = create_session_token(&user(), &config).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_token_invalid() {
        let config = get_test_jwt_config();
        let err = verify_session_token("invalid-token", &config).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let config = get_test_jwt_config();
        let token = create_session_token(&user(), &config).unwrap();

        let wrong_config = JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            access_token_expiry: 3600,
        };

        assert!(verify_session_token(&token, &wrong_config).is_err());
    }

    #[test]
    fn test_verify_token_expired() {
        // Past the default 60s leeway.
        let config = JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: -120,
        };
        let token = create_session_token(&user(), &config).unwrap();
        assert!(verify_session_token(&token, &config).is_err());
    }
}
