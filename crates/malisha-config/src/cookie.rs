//! Session cookie attributes.

use std::env;

use crate::parse_bool;

/// Attributes of the cookie that carries the signed session token.
///
/// # Environment Variables
///
/// - `AUTH_COOKIE_NAME`: Cookie name (default: `auth_token`)
/// - `AUTH_COOKIE_SECURE`: Set the `Secure` attribute (default: `false`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub path: String,
}

impl CookieConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            name: env::var("AUTH_COOKIE_NAME").unwrap_or(defaults.name),
            secure: env::var("AUTH_COOKIE_SECURE")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.secure),
            path: defaults.path,
        }
    }
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "auth_token".to_string(),
            secure: false,
            path: "/".to_string(),
        }
    }
}
