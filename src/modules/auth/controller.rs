use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use utoipa::ToSchema;

use malisha_core::AppError;
use malisha_models::{
    LoginRequest, LoginResponse, LogoutResponse, MessageResponse, RegisterRequest,
    SessionResponse,
};

use super::service::AuthService;
use crate::middleware::auth::MaybeSession;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Login and receive the session token
///
/// The same token is set as the session cookie.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Bad request - malformed body", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 502, description = "Authentication service unavailable", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn login_user(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let response = AuthService::login_user(&state, dto).await?;
    let jar = AuthService::set_session_cookie(
        jar,
        &state.cookie_config,
        response.access_token.clone(),
    );
    Ok((jar, Json(response)))
}

/// Register a new student
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Student registered", body = MessageResponse),
        (status = 400, description = "Bad request - rejected by the backend", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 502, description = "Registration service unavailable", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn register_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let response = AuthService::register_student(&state, dto).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Logout and clear the session cookie
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = LogoutResponse)
    ),
    tag = "Authentication"
)]
pub async fn logout_user(
    State(state): State<AppState>,
    session: MaybeSession,
    jar: CookieJar,
) -> (CookieJar, Json<LogoutResponse>) {
    let user = session.user();
    let response = AuthService::logout_user(user.as_ref(), &state.route_config);
    let jar = AuthService::clear_session_cookie(jar, &state.cookie_config);
    (jar, Json(response))
}

/// Current session
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "The session, anonymous when no valid token is sent", body = SessionResponse)
    ),
    security(("bearer_auth" = []), ()),
    tag = "Authentication"
)]
pub async fn get_session(session: MaybeSession) -> Json<SessionResponse> {
    let user = session.user();
    Json(SessionResponse {
        is_authenticated: user.is_some(),
        user,
    })
}
