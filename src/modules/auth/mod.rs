pub mod backend;
pub mod controller;
pub mod router;
pub mod service;

pub use backend::{AuthBackend, HttpAuthBackend};
pub use router::init_auth_router;
