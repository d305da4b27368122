//! Route paths and the public route whitelist.
//!
//! All navigable paths live here so that the boundary, the page handlers and
//! the logout flow agree on them.
//!
//! # Environment Variables
//!
//! - `PUBLIC_DASHBOARD`: Keep the dashboard root on the public whitelist
//!   (default: `true`). Only the exact `/dashboard` path is whitelisted; every
//!   page below it stays protected.

use std::env;

use crate::parse_bool;

/// One whitelist entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublicRoute {
    /// Matches only this exact path.
    Exact(String),
    /// Matches this path and every path below it (`/login`, `/login/...`).
    Prefix(String),
}

impl PublicRoute {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PublicRoute::Exact(route) => path == route,
            PublicRoute::Prefix(route) => {
                let route = route.trim_end_matches('/');
                match path.strip_prefix(route) {
                    Some(rest) => rest.is_empty() || rest.starts_with('/'),
                    None => false,
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteConfig {
    pub home: String,
    pub login: String,
    /// Staff login page.
    pub secure_login: String,
    pub register: String,
    pub unauthorized: String,
    pub dashboard: String,
    /// Where a signed-in user lands after login.
    pub default_login_redirect: String,
    /// Query parameter carrying the original path on a login redirect.
    pub callback_param: String,
    /// Paths reachable without a session, besides the home page.
    pub public_routes: Vec<PublicRoute>,
    /// Path prefixes the boundary never evaluates (API, docs, assets).
    pub bypass_prefixes: Vec<String>,
}

impl RouteConfig {
    pub fn from_env() -> Self {
        let public_dashboard = env::var("PUBLIC_DASHBOARD")
            .ok()
            .and_then(|v| parse_bool(&v))
            .unwrap_or(true);

        Self::new(public_dashboard)
    }

    pub fn new(public_dashboard: bool) -> Self {
        let mut public_routes = vec![
            PublicRoute::Prefix("/login".to_string()),
            PublicRoute::Prefix("/secure-login".to_string()),
            PublicRoute::Prefix("/register".to_string()),
            PublicRoute::Prefix("/unauthorized".to_string()),
        ];
        // Whitelisted while the dashboard shell is under development.
        if public_dashboard {
            public_routes.push(PublicRoute::Exact("/dashboard".to_string()));
        }

        Self {
            home: "/".to_string(),
            login: "/login".to_string(),
            secure_login: "/secure-login".to_string(),
            register: "/register".to_string(),
            unauthorized: "/unauthorized".to_string(),
            dashboard: "/dashboard".to_string(),
            default_login_redirect: "/dashboard".to_string(),
            callback_param: "callbackUrl".to_string(),
            public_routes,
            bypass_prefixes: [
                "/api",
                "/api-docs",
                "/swagger-ui",
                "/scalar",
                "/metrics",
                "/assets",
                "/favicon.ico",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }

    /// Login-type pages a signed-in user is sent away from.
    pub fn auth_pages(&self) -> [&str; 3] {
        [
            self.login.as_str(),
            self.secure_login.as_str(),
            self.register.as_str(),
        ]
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matches_sub_paths() {
        let route = PublicRoute::Prefix("/login".to_string());
        assert!(route.matches("/login"));
        assert!(route.matches("/login/"));
        assert!(route.matches("/login/reset"));
        assert!(!route.matches("/loginx"));
        assert!(!route.matches("/dashboard/login"));
    }

    #[test]
    fn test_exact_matches_only_itself() {
        let route = PublicRoute::Exact("/dashboard".to_string());
        assert!(route.matches("/dashboard"));
        assert!(!route.matches("/dashboard/students"));
    }

    #[test]
    fn test_dashboard_whitelist_toggle() {
        let with = RouteConfig::new(true);
        assert!(
            with.public_routes
                .contains(&PublicRoute::Exact("/dashboard".to_string()))
        );

        let without = RouteConfig::new(false);
        assert!(!without.public_routes.iter().any(|r| r.matches("/dashboard")));
    }

    #[test]
    fn test_auth_pages() {
        let config = RouteConfig::default();
        assert_eq!(config.auth_pages(), ["/login", "/secure-login", "/register"]);
    }
}
