//! # Malisha CLI
//!
//! A terminal client for the Malisha gateway. It logs in through the gateway,
//! keeps the session in a [`FileStorage`] snapshot and answers access questions
//! locally with the same decisions the gateway makes.
//!
//! ## Usage
//!
//! ```ignore
//! use malisha_cli::{GatewayClient, gateway_url};
//!
//! let client = GatewayClient::new(gateway_url())?;
//! let response = client.login(&request).await?;
//! ```

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use malisha_auth::{FileStorage, MenuItem};
use malisha_models::{LoginRequest, LoginResponse, LogoutResponse, SessionResponse};

pub const GATEWAY_URL_VAR: &str = "MALISHA_GATEWAY_URL";
pub const SESSION_DIR_VAR: &str = "MALISHA_SESSION_DIR";

const DEFAULT_GATEWAY_URL: &str = "http://localhost:3000";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub fn gateway_url() -> String {
    env::var(GATEWAY_URL_VAR).unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string())
}

/// Directory holding the session snapshot.
///
/// `MALISHA_SESSION_DIR` wins; otherwise `<config dir>/malisha`, falling back to
/// the working directory on platforms without a config dir.
pub fn storage_dir() -> PathBuf {
    resolve_storage_dir(env::var(SESSION_DIR_VAR).ok(), dirs::config_dir())
}

fn resolve_storage_dir(override_dir: Option<String>, config_dir: Option<PathBuf>) -> PathBuf {
    match override_dir.filter(|dir| !dir.trim().is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => config_dir
            .map(|dir| dir.join("malisha"))
            .unwrap_or_else(|| PathBuf::from(".malisha")),
    }
}

pub fn open_storage() -> FileStorage {
    FileStorage::new(storage_dir())
}

pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("malisha-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(request)
            .send()
            .await
            .context("Gateway unreachable")?;
        read_json(response).await
    }

    /// Asks the gateway whether `token` is still a valid session.
    pub async fn session(&self, token: &str) -> Result<SessionResponse> {
        let response = self
            .http
            .get(self.url("/api/auth/session"))
            .bearer_auth(token)
            .send()
            .await
            .context("Gateway unreachable")?;
        read_json(response).await
    }

    pub async fn logout(&self, token: Option<&str>) -> Result<LogoutResponse> {
        let mut request = self.http.post(self.url("/api/auth/logout"));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.context("Gateway unreachable")?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .context("Unexpected response from gateway");
    }

    let body: serde_json::Value = response.json().await.unwrap_or_default();
    Err(anyhow!(error_message(status, &body)))
}

fn error_message(status: StatusCode, body: &serde_json::Value) -> String {
    body.get("error")
        .and_then(|e| e.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Gateway returned {}", status))
}

/// Indented menu lines, children under their parents.
pub fn render_menu(items: &[MenuItem]) -> Vec<String> {
    fn walk(items: &[MenuItem], depth: usize, out: &mut Vec<String>) {
        for item in items {
            out.push(format!("{}{}  {}", "  ".repeat(depth), item.label, item.href));
            walk(&item.children, depth + 1, out);
        }
    }

    let mut lines = Vec::new();
    walk(items, 0, &mut lines);
    lines
}
