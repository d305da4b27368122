//! The static permission table.
//!
//! Each [`Permission`] maps to the set of roles allowed to exercise it. The
//! table is authored here and is read-only at runtime. String keys coming from
//! outside (menus, HTTP, CLI) go through [`resolve`], which returns an empty set
//! for keys that are not in the table so that callers deny by default.
//!
//! # Example
//!
//! ```ignore
//! use malisha_core::{Permission, Role, permissions};
//!
//! assert_eq!(permissions::resolve("USERS_DELETE"), &[Role::SuperAdmin]);
//! assert!(!Permission::UsersDelete.allows(Role::Admin));
//! ```

use crate::roles::Role;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use Role::{Admin, Branch, Counselor, Student, SuperAdmin};

// =============================================================================
// Role sets shared by several entries
// =============================================================================

const ADMINS: &[Role] = &[Admin, SuperAdmin];
const ADMINS_AND_BRANCH: &[Role] = &[Admin, SuperAdmin, Branch];
const STAFF: &[Role] = &[Admin, SuperAdmin, Branch, Counselor];
const SUPER_ONLY: &[Role] = &[SuperAdmin];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    // Student management
    StudentsViewAll,
    StudentsViewOwn,
    StudentsCreate,
    StudentsEdit,
    StudentsDelete,

    // University management
    UniversitiesView,
    UniversitiesCreate,
    UniversitiesEdit,
    UniversitiesDelete,

    // Course management
    CoursesView,
    CoursesCreate,
    CoursesEdit,
    CoursesDelete,

    // Application management
    ApplicationsViewAll,
    ApplicationsViewOwn,
    ApplicationsCreate,
    ApplicationsEdit,
    ApplicationsDelete,

    // Lead management
    LeadsView,
    LeadsCreate,
    LeadsEdit,
    LeadsDelete,

    // User management
    UsersView,
    UsersCreate,
    UsersEdit,
    UsersDelete,

    // Settings
    SettingsView,
    SettingsEdit,

    // Branch management
    BranchesView,
    BranchesCreate,
    BranchesEdit,
    BranchesDelete,
}

impl Permission {
    pub const ALL: [Permission; 32] = [
        Permission::StudentsViewAll,
        Permission::StudentsViewOwn,
        Permission::StudentsCreate,
        Permission::StudentsEdit,
        Permission::StudentsDelete,
        Permission::UniversitiesView,
        Permission::UniversitiesCreate,
        Permission::UniversitiesEdit,
        Permission::UniversitiesDelete,
        Permission::CoursesView,
        Permission::CoursesCreate,
        Permission::CoursesEdit,
        Permission::CoursesDelete,
        Permission::ApplicationsViewAll,
        Permission::ApplicationsViewOwn,
        Permission::ApplicationsCreate,
        Permission::ApplicationsEdit,
        Permission::ApplicationsDelete,
        Permission::LeadsView,
        Permission::LeadsCreate,
        Permission::LeadsEdit,
        Permission::LeadsDelete,
        Permission::UsersView,
        Permission::UsersCreate,
        Permission::UsersEdit,
        Permission::UsersDelete,
        Permission::SettingsView,
        Permission::SettingsEdit,
        Permission::BranchesView,
        Permission::BranchesCreate,
        Permission::BranchesEdit,
        Permission::BranchesDelete,
    ];

    /// Table key, e.g. `"STUDENTS_CREATE"`.
    pub fn key(&self) -> &'static str {
        match self {
            Permission::StudentsViewAll => "STUDENTS_VIEW_ALL",
            Permission::StudentsViewOwn => "STUDENTS_VIEW_OWN",
            Permission::StudentsCreate => "STUDENTS_CREATE",
            Permission::StudentsEdit => "STUDENTS_EDIT",
            Permission::StudentsDelete => "STUDENTS_DELETE",
            Permission::UniversitiesView => "UNIVERSITIES_VIEW",
            Permission::UniversitiesCreate => "UNIVERSITIES_CREATE",
            Permission::UniversitiesEdit => "UNIVERSITIES_EDIT",
            Permission::UniversitiesDelete => "UNIVERSITIES_DELETE",
            Permission::CoursesView => "COURSES_VIEW",
            Permission::CoursesCreate => "COURSES_CREATE",
            Permission::CoursesEdit => "COURSES_EDIT",
            Permission::CoursesDelete => "COURSES_DELETE",
            Permission::ApplicationsViewAll => "APPLICATIONS_VIEW_ALL",
            Permission::ApplicationsViewOwn => "APPLICATIONS_VIEW_OWN",
            Permission::ApplicationsCreate => "APPLICATIONS_CREATE",
            Permission::ApplicationsEdit => "APPLICATIONS_EDIT",
            Permission::ApplicationsDelete => "APPLICATIONS_DELETE",
            Permission::LeadsView => "LEADS_VIEW",
            Permission::LeadsCreate => "LEADS_CREATE",
            Permission::LeadsEdit => "LEADS_EDIT",
            Permission::LeadsDelete => "LEADS_DELETE",
            Permission::UsersView => "USERS_VIEW",
            Permission::UsersCreate => "USERS_CREATE",
            Permission::UsersEdit => "USERS_EDIT",
            Permission::UsersDelete => "USERS_DELETE",
            Permission::SettingsView => "SETTINGS_VIEW",
            Permission::SettingsEdit => "SETTINGS_EDIT",
            Permission::BranchesView => "BRANCHES_VIEW",
            Permission::BranchesCreate => "BRANCHES_CREATE",
            Permission::BranchesEdit => "BRANCHES_EDIT",
            Permission::BranchesDelete => "BRANCHES_DELETE",
        }
    }

    /// Looks a key up in the table.
    pub fn from_key(key: &str) -> Option<Permission> {
        Permission::ALL.into_iter().find(|p| p.key() == key)
    }

    /// Roles allowed this permission. Never empty.
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Permission::StudentsViewAll => ADMINS,
            Permission::StudentsViewOwn => &[Admin, SuperAdmin, Counselor, Branch],
            Permission::StudentsCreate | Permission::StudentsEdit | Permission::StudentsDelete => {
                ADMINS_AND_BRANCH
            }

            Permission::UniversitiesView => STAFF,
            Permission::UniversitiesCreate
            | Permission::UniversitiesEdit
            | Permission::UniversitiesDelete => ADMINS,

            Permission::CoursesView => STAFF,
            Permission::CoursesCreate | Permission::CoursesEdit | Permission::CoursesDelete => {
                ADMINS
            }

            Permission::ApplicationsViewAll => ADMINS,
            Permission::ApplicationsViewOwn => &[Admin, SuperAdmin, Branch, Counselor, Student],
            Permission::ApplicationsCreate => &[Admin, SuperAdmin, Counselor, Student],
            Permission::ApplicationsEdit => &[Admin, SuperAdmin, Counselor],
            Permission::ApplicationsDelete => ADMINS,

            Permission::LeadsView | Permission::LeadsCreate | Permission::LeadsEdit => STAFF,
            Permission::LeadsDelete => ADMINS,

            Permission::UsersView | Permission::UsersCreate | Permission::UsersEdit => ADMINS,
            Permission::UsersDelete => SUPER_ONLY,

            Permission::SettingsView | Permission::SettingsEdit => ADMINS,

            Permission::BranchesView
            | Permission::BranchesCreate
            | Permission::BranchesEdit
            | Permission::BranchesDelete => ADMINS,
        }
    }

    pub fn allows(&self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when a key is not in the permission table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPermission(pub String);

impl fmt::Display for UnknownPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown permission: {}", self.0)
    }
}

impl std::error::Error for UnknownPermission {}

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::from_key(s).ok_or_else(|| UnknownPermission(s.to_string()))
    }
}

/// Roles allowed `key`; empty for keys that are not in the table.
pub fn resolve(key: &str) -> &'static [Role] {
    Permission::from_key(key)
        .map(|p| p.allowed_roles())
        .unwrap_or(&[])
}

/// Every permission `role` holds according to the table.
pub fn permissions_for(role: Role) -> Vec<Permission> {
    Permission::ALL
        .into_iter()
        .filter(|p| p.allows(role))
        .collect()
}
