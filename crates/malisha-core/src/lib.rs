//! # Malisha Core
//!
//! Core types, errors, and the static authorization data for the Malisha gateway.
//!
//! This crate provides foundational types used throughout the workspace:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`roles`]: The closed [`Role`] vocabulary, the legacy role mapping and the
//!   role hierarchy helpers
//! - [`permissions`]: The static permission table keyed by [`Permission`]
//!
//! # Example
//!
//! ```ignore
//! use malisha_core::{Permission, Role, permissions};
//!
//! assert!(Permission::StudentsDelete.allows(Role::Branch));
//! assert!(permissions::resolve("NOT_A_PERMISSION").is_empty());
//! ```

pub mod errors;
pub mod permissions;
pub mod roles;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use permissions::Permission;
pub use roles::{LegacyRole, Role, UnknownRole};
