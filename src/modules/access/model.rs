use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use malisha_core::{Permission, Role, permissions};

/// Both authorization views of the current session.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessProfile {
    pub role: Role,
    /// Permissions granted to the role by the permission table.
    pub permissions: Vec<Permission>,
    /// The user's own permission list, as issued by the backend.
    pub explicit_permissions: Vec<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PermissionCheckParams {
    /// Permission key, e.g. `STUDENTS_CREATE` or `user:manage`.
    pub permission: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionCheck {
    pub permission: String,
    /// Permission table decision for the session role. Unknown keys are denied.
    pub allowed: bool,
    /// Explicit-list decision. `SUPER_ADMIN` always passes.
    pub explicit_grant: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PermissionTableEntry {
    pub permission: Permission,
    pub roles: Vec<Role>,
}

impl From<Permission> for PermissionTableEntry {
    fn from(permission: Permission) -> Self {
        Self {
            permission,
            roles: permission.allowed_roles().to_vec(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RolePermissions {
    pub role: Role,
    pub permissions: Vec<Permission>,
}

impl From<Role> for RolePermissions {
    fn from(role: Role) -> Self {
        Self {
            role,
            permissions: permissions::permissions_for(role),
        }
    }
}
