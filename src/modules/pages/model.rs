use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use malisha_auth::MenuItem;
use malisha_core::Permission;
use malisha_models::UserIdentity;

/// What a page shows to the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageDescriptor {
    pub path: String,
    pub title: String,
    pub user: Option<UserIdentity>,
    /// Sidebar items visible to the session. Empty outside the dashboard.
    pub menu: Vec<MenuItem>,
    /// Actions the session may perform on this page.
    pub actions: Vec<PageAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageAction {
    pub label: String,
    pub permission: Permission,
}

impl PageAction {
    pub fn new(label: &str, permission: Permission) -> Self {
        Self {
            label: label.to_string(),
            permission,
        }
    }
}
