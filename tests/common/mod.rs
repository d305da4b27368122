use std::collections::HashMap;
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Response, header};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use http_body_util::BodyExt;
use uuid::Uuid;

use malisha::modules::auth::AuthBackend;
use malisha::state::AppState;
use malisha_auth::create_session_token;
use malisha_config::JwtConfig;
use malisha_core::{AppError, Role};
use malisha_models::{LoginRequest, MessageResponse, RegisterRequest, UserIdentity};

pub const TEST_PASSWORD: &str = "testpass123";

/// Backend with a fixed set of accounts, all sharing [`TEST_PASSWORD`].
#[derive(Default)]
pub struct StubAuthBackend {
    users: HashMap<String, UserIdentity>,
}

impl StubAuthBackend {
    pub fn with_user(mut self, user: UserIdentity) -> Self {
        self.users.insert(user.email.clone(), user);
        self
    }
}

#[async_trait]
impl AuthBackend for StubAuthBackend {
    async fn authenticate(&self, request: &LoginRequest) -> Result<UserIdentity, AppError> {
        match self.users.get(&request.email) {
            Some(user) if request.password == TEST_PASSWORD => Ok(user.clone()),
            _ => Err(AppError::unauthorized(
                "Invalid email or password".to_string(),
            )),
        }
    }

    async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, AppError> {
        if self.users.contains_key(&request.email) {
            return Err(AppError::bad_request(anyhow!("Email already registered")));
        }
        Ok(MessageResponse {
            message: "Registration successful".to_string(),
        })
    }
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn fake_user(role: Role) -> UserIdentity {
    let name: String = Name().fake();
    let email: String = SafeEmail().fake();
    UserIdentity::new(Uuid::new_v4().to_string(), name, email, role)
}

pub fn test_state(backend: StubAuthBackend) -> AppState {
    AppState::with_backend(test_jwt_config(), Arc::new(backend))
}

/// Signed session token for `user`, as login would have issued it.
pub fn token_for(user: &UserIdentity) -> String {
    create_session_token(user, &test_jwt_config()).unwrap()
}

pub fn session_cookie(token: &str) -> String {
    format!("auth_token={}", token)
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[allow(dead_code)]
pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}
