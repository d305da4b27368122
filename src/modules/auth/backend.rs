//! Upstream authentication backend.
//!
//! The REST backend owns credentials and student records. The gateway only
//! forwards login and registration to it and translates its responses.

use anyhow::anyhow;
use async_trait::async_trait;
use axum::http::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use malisha_config::ApiConfig;
use malisha_core::AppError;
use malisha_models::{
    LoginRequest, MessageResponse, RegisterRequest, UpstreamLoginResponse, UserIdentity,
};

#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Checks credentials and returns the authenticated identity.
    ///
    /// Rejected credentials are `401`; any other upstream failure is `502`.
    async fn authenticate(&self, credentials: &LoginRequest) -> Result<UserIdentity, AppError>;

    /// Creates a student account.
    async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, AppError>;
}

/// Generic `{success, message}` envelope.
#[derive(Debug, Deserialize)]
struct UpstreamMessage {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    message: String,
}

fn default_success() -> bool {
    true
}

pub struct HttpAuthBackend {
    client: reqwest::Client,
    api_config: ApiConfig,
}

impl HttpAuthBackend {
    pub fn new(api_config: ApiConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(api_config.timeout())
            .user_agent(concat!("malisha-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::internal_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, api_config })
    }

    async fn post<T: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, AppError> {
        let url = self.api_config.endpoint(path);
        debug!(url = %url, "Forwarding request to backend");

        self.client.post(&url).json(body).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Backend request failed");
            AppError::bad_gateway(anyhow!("Authentication service unavailable"))
        })
    }
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn authenticate(&self, credentials: &LoginRequest) -> Result<UserIdentity, AppError> {
        let response = self.post("auth/login", credentials).await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(AppError::unauthorized("Invalid email or password".to_string()));
        }
        if !status.is_success() {
            warn!(status = %status.as_u16(), "Backend rejected login");
            return Err(AppError::bad_gateway(anyhow!(
                "Authentication service returned {}",
                status.as_u16()
            )));
        }

        let body: UpstreamLoginResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Malformed login response from backend");
            AppError::bad_gateway(anyhow!("Malformed response from authentication service"))
        })?;

        match body.data {
            Some(data) if body.success => Ok(UserIdentity::from(data.user)),
            _ => {
                let message = if body.message.is_empty() {
                    "Invalid email or password".to_string()
                } else {
                    body.message
                };
                Err(AppError::unauthorized(message))
            }
        }
    }

    async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, AppError> {
        let response = self.post("students/self-register", request).await?;
        let status = response.status();

        if status.is_client_error() {
            let body: Option<UpstreamMessage> = response.json().await.ok();
            let message = body
                .map(|b| b.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Registration rejected".to_string());
            return Err(AppError::new(status, anyhow!(message)));
        }
        if !status.is_success() {
            warn!(status = %status.as_u16(), "Backend failed registration");
            return Err(AppError::bad_gateway(anyhow!(
                "Registration service returned {}",
                status.as_u16()
            )));
        }

        let body: UpstreamMessage = response.json().await.map_err(|e| {
            warn!(error = %e, "Malformed registration response from backend");
            AppError::bad_gateway(anyhow!("Malformed response from registration service"))
        })?;

        if !body.success {
            return Err(AppError::bad_request(anyhow!(body.message)));
        }

        Ok(MessageResponse {
            message: if body.message.is_empty() {
                "Registration successful".to_string()
            } else {
                body.message
            },
        })
    }
}
