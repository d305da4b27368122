use std::sync::Arc;

use malisha_config::{ApiConfig, CookieConfig, CorsConfig, JwtConfig, RouteConfig};
use malisha_core::AppError;

use crate::modules::auth::backend::{AuthBackend, HttpAuthBackend};

#[derive(Clone)]
pub struct AppState {
    pub jwt_config: JwtConfig,
    pub cookie_config: CookieConfig,
    pub route_config: RouteConfig,
    pub cors_config: CorsConfig,
    pub api_config: ApiConfig,
    pub auth_backend: Arc<dyn AuthBackend>,
}

impl AppState {
    /// State with the default configuration and the given backend.
    pub fn with_backend(jwt_config: JwtConfig, auth_backend: Arc<dyn AuthBackend>) -> Self {
        Self {
            jwt_config,
            cookie_config: CookieConfig::default(),
            route_config: RouteConfig::default(),
            cors_config: CorsConfig::default(),
            api_config: ApiConfig::default(),
            auth_backend,
        }
    }
}

pub fn init_app_state() -> Result<AppState, AppError> {
    let api_config = ApiConfig::from_env();
    let auth_backend = HttpAuthBackend::new(api_config.clone())?;

    Ok(AppState {
        jwt_config: JwtConfig::from_env(),
        cookie_config: CookieConfig::from_env(),
        route_config: RouteConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        api_config,
        auth_backend: Arc::new(auth_backend),
    })
}
