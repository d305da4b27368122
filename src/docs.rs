use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use malisha_auth::MenuItem;
use malisha_core::{Permission, Role};
use malisha_models::{
    LoginRequest, LoginResponse, LogoutResponse, MessageResponse, RegisterRequest,
    SessionResponse, StudentProfile, UserIdentity,
};

use crate::modules::access::model::{
    AccessProfile, PermissionCheck, PermissionTableEntry, RolePermissions,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::pages::{PageAction, PageDescriptor};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::register_student,
        crate::modules::auth::controller::logout_user,
        crate::modules::auth::controller::get_session,
        crate::modules::access::controller::get_my_access,
        crate::modules::access::controller::check_permission,
        crate::modules::access::controller::get_permission_table,
        crate::modules::access::controller::get_role_permissions,
        crate::modules::pages::controller::public_page,
        crate::modules::pages::controller::dashboard_page,
    ),
    components(
        schemas(
            Role,
            Permission,
            UserIdentity,
            LoginRequest,
            LoginResponse,
            RegisterRequest,
            StudentProfile,
            MessageResponse,
            LogoutResponse,
            SessionResponse,
            ErrorResponse,
            AccessProfile,
            PermissionCheck,
            PermissionTableEntry,
            RolePermissions,
            MenuItem,
            PageDescriptor,
            PageAction,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, registration, logout and the current session"),
        (name = "Access", description = "Role and permission lookups for the current session"),
        (name = "Pages", description = "Page descriptors behind the route boundary")
    ),
    info(
        title = "Malisha Gateway",
        version = "0.1.0",
        description = "Session gateway for the Malisha Edu portal: authentication against the backend API, route protection and role-based access control.",
        contact(
            name = "API Support",
            email = "support@malishaedu.com"
        ),
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_gateway_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/login",
            "/api/auth/register",
            "/api/auth/logout",
            "/api/auth/session",
            "/api/access/me",
            "/api/access/check",
            "/dashboard/{page}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{}", path);
        }
    }
}
