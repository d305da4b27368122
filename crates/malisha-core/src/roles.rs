//! The closed role vocabulary and the role hierarchy.
//!
//! Every user carries exactly one [`Role`]. The canonical vocabulary is the
//! five-role set used by the backend (`STUDENT`, `BRANCH`, `COUNSELOR`, `ADMIN`,
//! `SUPER_ADMIN`). Older clients persisted the coarse [`LegacyRole`] set; use
//! [`LegacyRole::to_canonical`] to bring those into the canonical vocabulary.
//!
//! | Legacy    | Canonical     |
//! |-----------|---------------|
//! | `student` | `STUDENT`     |
//! | `agent`   | `COUNSELOR`   |
//! | `admin`   | `SUPER_ADMIN` |
//! | `guest`   | none          |
//!
//! Legacy `admin` maps to `SUPER_ADMIN` because it carried the unconditional
//! permission bypass. `guest` is the anonymous state and has no session role.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Student,
    Branch,
    /// The backend still emits `AGENT` for counselors on some deployments.
    #[serde(alias = "AGENT")]
    Counselor,
    Admin,
    SuperAdmin,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Student,
        Role::Branch,
        Role::Counselor,
        Role::Admin,
        Role::SuperAdmin,
    ];

    /// Wire name, e.g. `"SUPER_ADMIN"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Branch => "BRANCH",
            Role::Counselor => "COUNSELOR",
            Role::Admin => "ADMIN",
            Role::SuperAdmin => "SUPER_ADMIN",
        }
    }

    /// The designated super-role: bypasses explicit permission lists.
    ///
    /// This never bypasses the permission table.
    pub fn is_super(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }

    /// Administrative roles (`ADMIN` and `SUPER_ADMIN`).
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }

    pub fn is_staff(&self) -> bool {
        !matches!(self, Role::Student)
    }

    /// Hierarchy level of the role (higher number = more privileges).
    pub fn hierarchy_level(&self) -> u8 {
        match self {
            Role::SuperAdmin => 4,
            Role::Admin => 3,
            Role::Branch => 2,
            Role::Counselor => 1,
            Role::Student => 0,
        }
    }

    /// Whether this role is at least as privileged as `minimum`.
    pub fn at_least(&self, minimum: Role) -> bool {
        self.hierarchy_level() >= minimum.hierarchy_level()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role name is not part of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STUDENT" => Ok(Role::Student),
            "BRANCH" => Ok(Role::Branch),
            "COUNSELOR" | "AGENT" => Ok(Role::Counselor),
            "ADMIN" => Ok(Role::Admin),
            "SUPER_ADMIN" => Ok(Role::SuperAdmin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// The coarse role set persisted by older clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegacyRole {
    Student,
    Agent,
    Admin,
    Guest,
}

impl LegacyRole {
    /// Canonical role for a legacy tag; `None` for `guest`.
    pub fn to_canonical(self) -> Option<Role> {
        match self {
            LegacyRole::Student => Some(Role::Student),
            LegacyRole::Agent => Some(Role::Counselor),
            LegacyRole::Admin => Some(Role::SuperAdmin),
            LegacyRole::Guest => None,
        }
    }
}

impl FromStr for LegacyRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(LegacyRole::Student),
            "agent" => Ok(LegacyRole::Agent),
            "admin" => Ok(LegacyRole::Admin),
            "guest" => Ok(LegacyRole::Guest),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}
