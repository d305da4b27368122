//! # Malisha Config
//!
//! Configuration types for the Malisha gateway and its clients.
//!
//! Every structure is loaded from environment variables with a sensible default:
//!
//! - [`jwt`]: Session token signing configuration
//! - [`cookie`]: Session cookie attributes
//! - [`routes`]: Route paths and the public route whitelist
//! - [`api`]: Upstream backend API configuration
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: Listener address
//!
//! # Example
//!
//! ```ignore
//! use malisha_config::{CookieConfig, JwtConfig, RouteConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cookie_config = CookieConfig::from_env();
//! let route_config = RouteConfig::from_env();
//! ```

pub mod api;
pub mod cookie;
pub mod cors;
pub mod jwt;
pub mod routes;
pub mod server;

// Re-export commonly used types at crate root
pub use api::ApiConfig;
pub use cookie::CookieConfig;
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use routes::{PublicRoute, RouteConfig};
pub use server::ServerConfig;

/// Parses a boolean environment value (`true`/`false`, `1`/`0`, `yes`/`no`).
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
