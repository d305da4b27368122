//! Upstream backend API configuration.

use std::env;
use std::time::Duration;

/// Where the REST backend lives and how long to wait for it.
///
/// # Environment Variables
///
/// - `API_URL`: Base URL of the backend (default: `http://localhost:5000/api/v1`)
/// - `API_TIMEOUT_SECS`: Request timeout in seconds (default: `15`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("API_URL")
                .unwrap_or_else(|_| "http://localhost:5000/api/v1".to_string()),
            timeout_secs: env::var("API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Joins an endpoint path onto the base URL without doubling slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api/v1".to_string(),
            timeout_secs: 15,
        }
    }
}
