use axum::{Router, routing::get};

use malisha_config::RouteConfig;

use super::controller::{dashboard_page, public_page};
use crate::state::AppState;

pub fn init_pages_router(routes: &RouteConfig) -> Router<AppState> {
    let mut router = Router::new();
    for path in [
        &routes.home,
        &routes.login,
        &routes.secure_login,
        &routes.register,
        &routes.unauthorized,
    ] {
        router = router.route(path, get(public_page));
    }

    router
        .route(&routes.dashboard, get(dashboard_page))
        .route(&format!("{}/{{*page}}", routes.dashboard), get(dashboard_page))
}
