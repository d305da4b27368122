use axum::{Router, middleware, routing::get};

use super::controller::{
    check_permission, get_my_access, get_permission_table, get_role_permissions,
};
use crate::middleware::role::require_staff;
use crate::state::AppState;

pub fn init_access_router(state: AppState) -> Router<AppState> {
    let staff_routes = Router::new()
        .route("/roles/{role}", get(get_role_permissions))
        .route_layer(middleware::from_fn_with_state(state, require_staff));

    Router::new()
        .route("/me", get(get_my_access))
        .route("/check", get(check_permission))
        .route("/table", get(get_permission_table))
        .merge(staff_routes)
}
