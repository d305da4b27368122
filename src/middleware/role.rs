//! Role-based authorization middleware for Axum
//!
//! 1. Layer-based middleware using [`require_roles`] and its presets
//! 2. Helper functions for checks inside handlers

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use malisha_core::{AppError, Role};

use crate::middleware::auth::CurrentSession;
use crate::state::AppState;

/// Middleware function that checks if the session has one of the required roles.
///
/// # Usage with axum::middleware::from_fn_with_state
///
/// ```rust,ignore
/// let protected_routes = Router::new()
///     .route("/admin-only", get(admin_handler))
///     .layer(middleware::from_fn_with_state(
///         state.clone(),
///         |state, req, next| require_roles(state, req, next, vec![Role::SuperAdmin])
///     ));
/// ```
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: Vec<Role>,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let current = CurrentSession::from_request_parts(&mut parts, &state).await?;
    check_any_role(&current, &allowed_roles)?;

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Every role except STUDENT.
pub async fn require_staff(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let staff = Role::ALL.into_iter().filter(Role::is_staff).collect();
    match require_roles(State(state), req, next, staff).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Helper function to check if a session has any of the specified roles
///
/// ```rust,ignore
/// pub async fn handler(current: CurrentSession) -> Result<Json<Response>, AppError> {
///     check_any_role(&current, &[Role::SuperAdmin, Role::Admin])?;
///     // Handler logic
/// }
/// ```
pub fn check_any_role(current: &CurrentSession, allowed_roles: &[Role]) -> Result<(), AppError> {
    let role = current.role();

    if !allowed_roles.contains(&role) {
        return Err(AppError::forbidden(format!(
            "Access denied. Required roles: {}, but user has role: {}",
            allowed_roles
                .iter()
                .map(Role::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            role
        )));
    }

    Ok(())
}

/// Check if a role has at least the specified level of access
pub fn check_role_hierarchy(user_role: Role, minimum_required_role: Role) -> Result<(), AppError> {
    if !user_role.at_least(minimum_required_role) {
        return Err(AppError::forbidden(format!(
            "Access denied. Minimum required role: {}, but user has role: {}",
            minimum_required_role, user_role
        )));
    }

    Ok(())
}
