use axum::{
    Json,
    extract::{Path, Query},
};
use tracing::debug;

use malisha_core::{AppError, Permission, Role};
use malisha_observability::track_authorization_check;

use super::model::{
    AccessProfile, PermissionCheck, PermissionCheckParams, PermissionTableEntry, RolePermissions,
};
use crate::middleware::auth::{CurrentSession, RequireSettingsView};
use crate::middleware::role::check_role_hierarchy;

fn parse_role(role_str: &str) -> Result<Role, AppError> {
    role_str
        .to_ascii_uppercase()
        .parse::<Role>()
        .map_err(AppError::bad_request)
}

/// Current session's role and permissions
#[utoipa::path(
    get,
    path = "/api/access/me",
    responses(
        (status = 200, description = "Access profile", body = AccessProfile),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Access",
    security(("bearer_auth" = []))
)]
pub async fn get_my_access(current: CurrentSession) -> Json<AccessProfile> {
    let role = current.role();
    Json(AccessProfile {
        role,
        permissions: malisha_core::permissions::permissions_for(role),
        explicit_permissions: current.claims.permissions.clone(),
    })
}

/// Check one permission for the current session
///
/// Reports the permission table decision and the explicit-list decision
/// separately.
#[utoipa::path(
    get,
    path = "/api/access/check",
    params(PermissionCheckParams),
    responses(
        (status = 200, description = "Both decisions", body = PermissionCheck),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Access",
    security(("bearer_auth" = []))
)]
pub async fn check_permission(
    current: CurrentSession,
    Query(params): Query<PermissionCheckParams>,
) -> Json<PermissionCheck> {
    let allowed = Permission::from_key(&params.permission)
        .map(|permission| current.can(permission))
        .unwrap_or(false);
    let explicit_grant = current.has_permission(&params.permission);

    debug!(
        permission = %params.permission,
        role = %current.role(),
        allowed,
        explicit_grant,
        "Permission check"
    );
    track_authorization_check(allowed, current.role().as_str());

    Json(PermissionCheck {
        permission: params.permission,
        allowed,
        explicit_grant,
    })
}

/// The full permission table
#[utoipa::path(
    get,
    path = "/api/access/table",
    responses(
        (status = 200, description = "Every permission with its roles", body = Vec<PermissionTableEntry>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Access",
    security(("bearer_auth" = []))
)]
pub async fn get_permission_table(
    RequireSettingsView(_current): RequireSettingsView,
) -> Json<Vec<PermissionTableEntry>> {
    Json(
        Permission::ALL
            .into_iter()
            .map(PermissionTableEntry::from)
            .collect(),
    )
}

/// Permissions held by a role
///
/// Staff only. Callers may look up their own role and the roles below it.
#[utoipa::path(
    get,
    path = "/api/access/roles/{role}",
    params(("role" = String, Path, description = "Role name, e.g. `BRANCH`")),
    responses(
        (status = 200, description = "Role permissions", body = RolePermissions),
        (status = 400, description = "Unknown role"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Access",
    security(("bearer_auth" = []))
)]
pub async fn get_role_permissions(
    current: CurrentSession,
    Path(role_str): Path<String>,
) -> Result<Json<RolePermissions>, AppError> {
    let role = parse_role(&role_str)?;
    check_role_hierarchy(current.role(), role)?;
    Ok(Json(RolePermissions::from(role)))
}
