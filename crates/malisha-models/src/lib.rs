//! # Malisha Models
//!
//! Domain models and DTOs shared by the gateway, the session store and the CLI.
//!
//! # Modules
//!
//! - [`users`]: The session-scoped [`UserIdentity`] and its partial update
//! - [`auth`]: Login, registration, logout and session DTOs, plus the upstream
//!   backend's login response shape

pub mod auth;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{
    LoginRequest, LoginResponse, LogoutResponse, MessageResponse, RegisterRequest,
    SessionResponse, StudentProfile, UpstreamLoginData, UpstreamLoginResponse, UpstreamUser,
};
pub use users::{UserIdentity, UserPatch};
