//! Conditional rendering wrappers.
//!
//! A gate decides against the session every time it renders; nothing is
//! cached, so a session change is reflected on the next call.

use malisha_core::{Permission, Role};

use crate::access;
use crate::session::Session;

pub trait Gate {
    fn allows(&self, session: &Session) -> bool;

    /// `children` when allowed, otherwise `fallback`.
    fn render<T>(&self, session: &Session, children: T, fallback: T) -> T {
        if self.allows(session) { children } else { fallback }
    }

    /// `children` when allowed, otherwise nothing.
    fn render_or_none<T>(&self, session: &Session, children: T) -> Option<T> {
        self.allows(session).then_some(children)
    }

    /// Like [`Gate::render_or_none`], building the children only when allowed.
    fn render_with<T, F>(&self, session: &Session, children: F) -> Option<T>
    where
        F: FnOnce() -> T,
    {
        self.allows(session).then(children)
    }
}

/// Renders when the session role is in the allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGate {
    allowed: Vec<Role>,
}

impl RoleGate {
    pub fn new(allowed: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    pub fn allowed(&self) -> &[Role] {
        &self.allowed
    }
}

impl Gate for RoleGate {
    fn allows(&self, session: &Session) -> bool {
        access::role_allowed(session, &self.allowed)
    }
}

/// Renders when the permission table allows the session role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGate {
    key: String,
}

impl PermissionGate {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl From<Permission> for PermissionGate {
    fn from(permission: Permission) -> Self {
        Self::new(permission.key())
    }
}

impl Gate for PermissionGate {
    fn allows(&self, session: &Session) -> bool {
        access::permission_allowed(session, &self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use malisha_models::UserIdentity;

    fn session_for(role: Role) -> Session {
        Session::authenticated(UserIdentity::new("u", "User", "u@example.com", role), "tok")
    }

    #[test]
    fn test_role_gate_render() {
        let gate = RoleGate::new([Role::Admin, Role::SuperAdmin]);
        assert_eq!(gate.render(&session_for(Role::Admin), "panel", "denied"), "panel");
        assert_eq!(gate.render(&session_for(Role::Branch), "panel", "denied"), "denied");
        assert_eq!(gate.render_or_none(&Session::anonymous(), "panel"), None);
    }

    #[test]
    fn test_permission_gate_render() {
        let gate = PermissionGate::from(Permission::StudentsDelete);
        assert_eq!(gate.render_or_none(&session_for(Role::Branch), "Delete"), Some("Delete"));
        assert_eq!(gate.render_or_none(&session_for(Role::Counselor), "Delete"), None);
    }

    #[test]
    fn test_permission_gate_unknown_key_denies() {
        let gate = PermissionGate::new("STUDENTS_TELEPORT");
        assert!(!gate.allows(&session_for(Role::SuperAdmin)));
    }

    #[test]
    fn test_gate_reevaluates_each_call() {
        let gate = RoleGate::new([Role::Student]);
        let mut session = Session::anonymous();
        assert!(!gate.allows(&session));

        session = session_for(Role::Student);
        assert!(gate.allows(&session));
    }

    #[test]
    fn test_render_with_is_lazy() {
        let gate = PermissionGate::from(Permission::UsersDelete);
        let mut built = false;
        let rendered = gate.render_with(&session_for(Role::Admin), || {
            built = true;
            "Delete user"
        });
        assert_eq!(rendered, None);
        assert!(!built);
    }
}
