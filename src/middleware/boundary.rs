//! Route boundary enforcement.
//!
//! Runs once per navigation, before any page handler. Anonymous traffic to a
//! protected page is sent to the login page with the original path in
//! `callbackUrl`; signed-in users are sent away from the login and
//! registration pages. API, documentation, metrics and asset paths are never
//! evaluated.
//!
//! The only authentication evidence is the session cookie, and it counts only
//! when its signature and expiry verify.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;
use url::form_urlencoded;

use malisha_config::{PublicRoute, RouteConfig};
use malisha_observability::track_boundary_redirect;

use crate::middleware::auth::cookie_session;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Not evaluated at all.
    Bypass,
    Public,
    Protected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryDecision {
    PassThrough,
    /// Anonymous on a protected page. Holds the login URL.
    RedirectToLogin(String),
    /// Signed in on an auth page. Holds the landing page.
    RedirectToDashboard(String),
}

fn under(prefix: &str, path: &str) -> bool {
    PublicRoute::Prefix(prefix.to_string()).matches(path)
}

pub fn classify(path: &str, config: &RouteConfig) -> RouteClass {
    if config.bypass_prefixes.iter().any(|prefix| under(prefix, path)) {
        return RouteClass::Bypass;
    }
    if path == config.home || config.public_routes.iter().any(|route| route.matches(path)) {
        return RouteClass::Public;
    }
    RouteClass::Protected
}

pub fn is_auth_page(path: &str, config: &RouteConfig) -> bool {
    config.auth_pages().iter().any(|page| under(page, path))
}

/// `/login?callbackUrl=<path>`, with the path form-encoded.
pub fn login_redirect_url(path: &str, config: &RouteConfig) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(&config.callback_param, path)
        .finish();
    format!("{}?{}", config.login, query)
}

pub fn decide(path: &str, authenticated: bool, config: &RouteConfig) -> BoundaryDecision {
    match classify(path, config) {
        RouteClass::Bypass => BoundaryDecision::PassThrough,
        RouteClass::Protected if !authenticated => {
            BoundaryDecision::RedirectToLogin(login_redirect_url(path, config))
        }
        _ if authenticated && is_auth_page(path, config) => {
            BoundaryDecision::RedirectToDashboard(config.default_login_redirect.clone())
        }
        _ => BoundaryDecision::PassThrough,
    }
}

pub async fn enforce_route_boundary(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    if classify(&path, &state.route_config) == RouteClass::Bypass {
        return next.run(req).await;
    }

    let authenticated = cookie_session(req.headers(), &state).is_authenticated();

    match decide(&path, authenticated, &state.route_config) {
        BoundaryDecision::PassThrough => next.run(req).await,
        BoundaryDecision::RedirectToLogin(location) => {
            debug!(path = %path, "Anonymous request to protected page");
            track_boundary_redirect("login");
            Redirect::temporary(&location).into_response()
        }
        BoundaryDecision::RedirectToDashboard(location) => {
            debug!(path = %path, "Signed-in request to auth page");
            track_boundary_redirect("dashboard");
            Redirect::temporary(&location).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let config = RouteConfig::default();
        assert_eq!(classify("/", &config), RouteClass::Public);
        assert_eq!(classify("/login", &config), RouteClass::Public);
        assert_eq!(classify("/register/step-2", &config), RouteClass::Public);
        assert_eq!(classify("/dashboard", &config), RouteClass::Public);
        assert_eq!(classify("/dashboard/students", &config), RouteClass::Protected);
        assert_eq!(classify("/loginx", &config), RouteClass::Protected);
        assert_eq!(classify("/api/auth/login", &config), RouteClass::Bypass);
        assert_eq!(classify("/swagger-ui/index.html", &config), RouteClass::Bypass);
        assert_eq!(classify("/apix", &config), RouteClass::Protected);
    }

    #[test]
    fn test_dashboard_root_protected_without_whitelist() {
        let config = RouteConfig::new(false);
        assert_eq!(classify("/dashboard", &config), RouteClass::Protected);
    }

    #[test]
    fn test_decide_table() {
        let config = RouteConfig::default();
        assert_eq!(
            decide("/dashboard/students", false, &config),
            BoundaryDecision::RedirectToLogin(
                "/login?callbackUrl=%2Fdashboard%2Fstudents".to_string()
            )
        );
        assert_eq!(
            decide("/dashboard/students", true, &config),
            BoundaryDecision::PassThrough
        );
        assert_eq!(
            decide("/login", true, &config),
            BoundaryDecision::RedirectToDashboard("/dashboard".to_string())
        );
        assert_eq!(
            decide("/secure-login", true, &config),
            BoundaryDecision::RedirectToDashboard("/dashboard".to_string())
        );
        assert_eq!(decide("/login", false, &config), BoundaryDecision::PassThrough);
        assert_eq!(decide("/unauthorized", true, &config), BoundaryDecision::PassThrough);
        assert_eq!(decide("/", false, &config), BoundaryDecision::PassThrough);
    }

    #[test]
    fn test_login_redirect_round_trips_callback() {
        let config = RouteConfig::default();
        let url = login_redirect_url("/dashboard/support/faq", &config);
        let query = url.split_once('?').map(|(_, q)| q).unwrap();
        let pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        assert_eq!(
            pairs,
            vec![("callbackUrl".to_string(), "/dashboard/support/faq".to_string())]
        );
    }
}
