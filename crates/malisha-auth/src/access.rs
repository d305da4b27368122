//! Access decision functions.
//!
//! Pure, synchronous and fail-closed. Two independent schemes coexist and are
//! never merged:
//!
//! - the **role-set** check and the **permission-table** check, which only
//!   look at the user's role;
//! - the **explicit grant** check, which looks at the user's own permission
//!   list and lets the super-role through unconditionally.
//!
//! The permission table has no super-role bypass: `SUPER_ADMIN` is allowed a
//! table permission only because it is listed in every entry.

use malisha_core::{Permission, Role, permissions};
use malisha_models::UserIdentity;

use crate::session::Session;

/// Authenticated and the role is in `allowed`.
pub fn role_allowed(session: &Session, allowed: &[Role]) -> bool {
    if !session.is_authenticated() {
        return false;
    }
    session.role().is_some_and(|role| allowed.contains(&role))
}

/// The user's role is listed for `key` in the permission table.
///
/// Unknown keys resolve to no roles and are denied.
pub fn permission_allowed(session: &Session, key: &str) -> bool {
    role_has_permission(session.role(), key)
}

/// Typed variant of [`permission_allowed`].
pub fn permission_granted(session: &Session, permission: Permission) -> bool {
    session.role().is_some_and(|role| permission.allows(role))
}

/// Evaluates the permission table for a bare role.
pub fn role_has_permission(role: Option<Role>, key: &str) -> bool {
    match role {
        Some(role) => permissions::resolve(key).contains(&role),
        None => false,
    }
}

/// Explicit-list check with the super-role bypass.
pub fn explicit_grant(user: Option<&UserIdentity>, permission: &str) -> bool {
    match user {
        Some(user) if user.role.is_super() => true,
        Some(user) => user.has_explicit_permission(permission),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_for(role: Role) -> Session {
        Session::authenticated(UserIdentity::new("u", "User", "u@example.com", role), "tok")
    }

    #[test]
    fn test_table_check_matches_table_for_every_pair() {
        for permission in Permission::ALL {
            for role in Role::ALL {
                let expected = permission.allowed_roles().contains(&role);
                let session = session_for(role);
                assert_eq!(
                    permission_allowed(&session, permission.key()),
                    expected,
                    "{} / {}",
                    permission,
                    role
                );
                assert_eq!(permission_granted(&session, permission), expected);
            }
        }
    }

    #[test]
    fn test_super_role_has_no_table_bypass() {
        assert!(!role_has_permission(Some(Role::SuperAdmin), "NOT_A_PERMISSION"));
        assert!(!role_has_permission(Some(Role::Admin), "USERS_DELETE"));
        assert!(role_has_permission(Some(Role::SuperAdmin), "USERS_DELETE"));
    }

    #[test]
    fn test_branch_and_counselor_examples() {
        assert!(permission_allowed(&session_for(Role::Branch), "STUDENTS_DELETE"));
        assert!(!permission_allowed(&session_for(Role::Counselor), "USERS_DELETE"));
    }

    #[test]
    fn test_anonymous_is_denied_everything() {
        let anonymous = Session::anonymous();
        assert!(!role_allowed(&anonymous, &Role::ALL));
        assert!(!role_allowed(&anonymous, &[]));
        for permission in Permission::ALL {
            assert!(!permission_allowed(&anonymous, permission.key()));
        }
        assert!(!role_has_permission(None, "APPLICATIONS_VIEW_OWN"));
        assert!(!explicit_grant(None, "anything"));
    }

    #[test]
    fn test_role_allowed_requires_token() {
        let session = Session {
            user: Some(UserIdentity::new("u", "User", "u@example.com", Role::Admin)),
            token: None,
        };
        assert!(!role_allowed(&session, &[Role::Admin]));
        // The table check only needs a user.
        assert!(permission_allowed(&session, "USERS_VIEW"));
    }

    #[test]
    fn test_role_allowed_membership() {
        let session = session_for(Role::Counselor);
        assert!(role_allowed(&session, &[Role::Admin, Role::Counselor]));
        assert!(!role_allowed(&session, &[Role::Admin, Role::SuperAdmin]));
    }

    #[test]
    fn test_explicit_grant() {
        let counselor = UserIdentity::new("c", "C", "c@example.com", Role::Counselor)
            .with_permissions(["user:manage"]);
        assert!(explicit_grant(Some(&counselor), "user:manage"));
        assert!(!explicit_grant(Some(&counselor), "lead:delete"));

        let admin = UserIdentity::new("a", "A", "a@example.com", Role::Admin);
        assert!(!explicit_grant(Some(&admin), "user:manage"));

        let root = UserIdentity::new("r", "R", "r@example.com", Role::SuperAdmin);
        assert!(explicit_grant(Some(&root), "anything-at-all"));
    }
}
