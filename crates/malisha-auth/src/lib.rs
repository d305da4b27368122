//! # Malisha Auth
//!
//! Session tokens, the persisted auth session store and the access decisions
//! shared by the gateway and the CLI client.
//!
//! This crate provides:
//!
//! - [`claims`] and [`jwt`]: The signed session token, the single canonical
//!   session credential (cookie value and bearer token)
//! - [`session`]: The in-memory [`Session`] and its persisted snapshot
//! - [`storage`]: Storage adapters for the snapshot
//! - [`store`]: The [`AuthSessionStore`]
//! - [`access`]: Pure, fail-closed access decision functions
//! - [`gate`]: Conditional rendering wrappers ([`RoleGate`], [`PermissionGate`])
//! - [`menu`]: Dashboard navigation and its visibility filter
//!
//! # Example
//!
//! ```ignore
//! use malisha_auth::{AuthSessionStore, Gate, MemoryStorage, PermissionGate};
//! use malisha_core::Permission;
//!
//! let mut store = AuthSessionStore::new(MemoryStorage::new());
//! store.set_auth(user, token);
//!
//! let delete = PermissionGate::from(Permission::StudentsDelete)
//!     .render_or_none(store.session(), "Delete");
//! ```

pub mod access;
pub mod claims;
pub mod gate;
pub mod jwt;
pub mod menu;
pub mod session;
pub mod storage;
pub mod store;

// Re-export commonly used types at crate root
pub use claims::SessionClaims;
pub use gate::{Gate, PermissionGate, RoleGate};
pub use jwt::{create_session_token, verify_session_token};
pub use menu::{MenuItem, dashboard_menu, visible_items};
pub use session::{Session, SessionSnapshot, SnapshotState};
pub use storage::{FileStorage, MemoryStorage, STORAGE_KEY, SessionStorage};
pub use store::AuthSessionStore;
