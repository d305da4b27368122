//! # Malisha Gateway
//!
//! The session gateway in front of the Malisha Edu portal. It authenticates
//! users against the backend API, issues a signed session token, keeps anonymous
//! traffic out of the dashboard and decides what each role may see and do.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Session extractors, role checks, route boundary
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Login, registration, logout, session
//! │   ├── access/      # Role and permission lookups
//! │   └── pages/       # Page descriptors behind the boundary
//! ├── docs.rs           # OpenAPI document
//! ├── router.rs         # Main application router
//! ├── state.rs          # Shared application state
//! └── validator.rs      # Validated JSON extractor
//! ```
//!
//! Each feature module follows a consistent structure:
//!
//! - `mod.rs`: Module exports
//! - `controller.rs`: HTTP handlers (routes)
//! - `service.rs`: Business logic
//! - `model.rs`: DTOs
//! - `router.rs`: Axum router configuration
//!
//! ## Roles
//!
//! | Role | Staff | Hierarchy |
//! |------|-------|-----------|
//! | `SUPER_ADMIN` | yes | 4 |
//! | `ADMIN` | yes | 3 |
//! | `BRANCH` | yes | 2 |
//! | `COUNSELOR` | yes | 1 |
//! | `STUDENT` | no | 0 |
//!
//! ## Authorization
//!
//! Two schemes exist side by side and are never merged:
//!
//! - The **permission table** maps each [`malisha_core::Permission`] to the
//!   roles allowed it. Page actions and the `Require*` extractors use it.
//! - The **explicit list** is the permission strings the backend issued to the
//!   user. Menu items with a permission constraint use it, and `SUPER_ADMIN`
//!   always passes.
//!
//! ## Sessions
//!
//! Login returns a signed session token and sets it as an HttpOnly cookie. The
//! route boundary reads only the cookie; API handlers accept either the cookie
//! or `Authorization: Bearer <token>`.
//!
//! ### Environment Variables
//!
//! ```bash
//! API_URL=https://api.malishaedu.com/api/v1
//! JWT_SECRET=your-secure-secret-key
//! JWT_ACCESS_EXPIRY=3600
//! SERVER_ADDR=0.0.0.0:3000
//! ```
//!
//! ## Modules
//!
//! - [`docs`]: OpenAPI documentation setup
//! - [`middleware`]: Authentication, authorization and the route boundary
//! - [`modules`]: Feature modules (auth, access, pages)
//! - [`router`]: Main application router
//! - [`state`]: Shared application state
//! - [`validator`]: Request validation utilities

pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use malisha_auth;
pub use malisha_config;
pub use malisha_core;
pub use malisha_models;
