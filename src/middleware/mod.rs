//! Middleware modules for request processing.
//!
//! # Modules
//!
//! - [`auth`]: Session extractors and permission-table access control
//! - [`role`]: Role checking middleware and helpers
//! - [`boundary`]: The route boundary in front of every page
//!
//! # Authentication Flow
//!
//! 1. Login sets the session cookie and returns the same token as `accessToken`
//! 2. The boundary reads the cookie to redirect page navigations
//! 3. `CurrentSession` reads `Authorization: Bearer <token>` or the cookie
//! 4. Permission extractors check the role against the permission table
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::{CurrentSession, RequireSettingsView};
//!
//! async fn me(current: CurrentSession) -> impl IntoResponse {
//!     Json(current.user())
//! }
//!
//! async fn settings(RequireSettingsView(current): RequireSettingsView) -> impl IntoResponse {
//!     // Only ADMIN and SUPER_ADMIN get here
//! }
//! ```

pub mod auth;
pub mod boundary;
pub mod role;
