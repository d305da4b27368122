//! Malisha Observability
//!
//! - Console logging via `tracing-subscriber`
//! - HTTP request logging middleware
//! - Prometheus metrics (the `observability` feature)
//!
//! Logging is always available. Metrics can be disabled at compile time by
//! turning off the `observability` feature, in which case no-op stubs with the
//! same signatures are exported, and at runtime with `OBSERVABILITY_ENABLED=false`.
//!
//! # Example
//!
//! ```ignore
//! use malisha_observability::{init_console_logging, init_metrics};
//!
//! init_console_logging("info");
//! let handle = init_metrics();
//! ```

pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

pub use logging::{init_console_logging, logging_middleware};

#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

#[cfg(feature = "observability")]
pub use metrics::{
    init_metrics, is_observability_enabled, metrics_app, metrics_middleware,
    track_authorization_check, track_boundary_redirect, track_login_failure,
    track_login_success, track_logout, track_session_token_issued,
};

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{Router, extract::Request, middleware::Next, response::Response};

    /// Stand-in for the Prometheus handle; never constructed.
    #[derive(Clone, Debug)]
    pub enum PrometheusHandle {}

    pub fn is_observability_enabled() -> bool {
        false
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub fn init_metrics() -> Option<PrometheusHandle> {
        None
    }

    pub fn metrics_app(handle: PrometheusHandle) -> Router {
        match handle {}
    }

    pub fn track_login_success(_role: &str) {}
    pub fn track_login_failure(_reason: &str) {}
    pub fn track_logout(_role: &str) {}
    pub fn track_session_token_issued() {}
    pub fn track_boundary_redirect(_kind: &str) {}
    pub fn track_authorization_check(_allowed: bool, _role: &str) {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
