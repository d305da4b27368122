use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::{info, instrument, warn};

use malisha_auth::create_session_token;
use malisha_config::{CookieConfig, RouteConfig};
use malisha_core::{AppError, Role};
use malisha_models::{
    LoginRequest, LoginResponse, LogoutResponse, MessageResponse, RegisterRequest, UserIdentity,
};
use malisha_observability::{
    track_login_failure, track_login_success, track_logout, track_session_token_issued,
};

use crate::state::AppState;

pub struct AuthService;

impl AuthService {
    /// Authenticates upstream and mints the session token.
    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn login_user(state: &AppState, dto: LoginRequest) -> Result<LoginResponse, AppError> {
        let user = match state.auth_backend.authenticate(&dto).await {
            Ok(user) => user,
            Err(err) => {
                warn!(status = %err.status.as_u16(), "Login failed");
                track_login_failure(if err.status.is_server_error() {
                    "backend_error"
                } else {
                    "invalid_credentials"
                });
                return Err(err);
            }
        };

        let access_token = create_session_token(&user, &state.jwt_config)?;
        track_session_token_issued();
        track_login_success(user.role.as_str());
        info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(LoginResponse { user, access_token })
    }

    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn register_student(
        state: &AppState,
        dto: RegisterRequest,
    ) -> Result<MessageResponse, AppError> {
        let response = state.auth_backend.register(&dto).await?;
        info!("Student registered");
        Ok(response)
    }

    /// Where the client goes after logout: students to the student login,
    /// everyone else to the staff login. A logout without a session counts
    /// as staff.
    pub fn logout_destination(user: Option<&UserIdentity>, routes: &RouteConfig) -> String {
        match user {
            Some(user) if user.role == Role::Student => routes.login.clone(),
            _ => routes.secure_login.clone(),
        }
    }

    pub fn logout_user(user: Option<&UserIdentity>, routes: &RouteConfig) -> LogoutResponse {
        if let Some(user) = user {
            track_logout(user.role.as_str());
            info!(user_id = %user.id, "User logged out");
        }
        LogoutResponse {
            message: "Logged out successfully".to_string(),
            redirect_to: Self::logout_destination(user, routes),
        }
    }

    pub fn set_session_cookie(jar: CookieJar, config: &CookieConfig, token: String) -> CookieJar {
        jar.add(
            Cookie::build((config.name.clone(), token))
                .path(config.path.clone())
                .http_only(true)
                .same_site(SameSite::Lax)
                .secure(config.secure),
        )
    }

    pub fn clear_session_cookie(jar: CookieJar, config: &CookieConfig) -> CookieJar {
        jar.remove(Cookie::build(config.name.clone()).path(config.path.clone()))
    }
}
