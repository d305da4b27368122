//! Dashboard navigation and its visibility filter.
//!
//! An item is visible when the session passes its role constraint OR its
//! explicit permission constraint. Items with neither constraint are always
//! visible. Children are filtered with the same rule.

use malisha_core::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::access;
use crate::session::Session;

use Role::{Admin, Branch, Counselor, Student, SuperAdmin};

const EVERYONE: &[Role] = &[SuperAdmin, Admin, Branch, Counselor, Student];
const STAFF: &[Role] = &[SuperAdmin, Admin, Branch, Counselor];
const ADMINS: &[Role] = &[SuperAdmin, Admin];
const STUDENTS: &[Role] = &[Student];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MenuItem {
    pub label: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,
    /// Explicit permission string, checked against the user's own list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schema(no_recursion)]
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            roles: None,
            permission: None,
            children: Vec::new(),
        }
    }

    pub fn roles(mut self, roles: &[Role]) -> Self {
        self.roles = Some(roles.to_vec());
        self
    }

    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    pub fn children(mut self, children: Vec<MenuItem>) -> Self {
        self.children = children;
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.roles.is_none() && self.permission.is_none()
    }

    pub fn is_visible(&self, session: &Session) -> bool {
        if self.is_unconstrained() {
            return true;
        }
        let by_role = self
            .roles
            .as_deref()
            .is_some_and(|roles| access::role_allowed(session, roles));
        let by_permission = self
            .permission
            .as_deref()
            .is_some_and(|p| session.is_authenticated() && access::explicit_grant(session.user(), p));

        by_role || by_permission
    }

    /// Depth-first search by `href`.
    pub fn find<'a>(items: &'a [MenuItem], href: &str) -> Option<&'a MenuItem> {
        MenuItem::trail(items, href).and_then(|trail| trail.last().copied())
    }

    /// The item with `href` and its ancestors, outermost first.
    pub fn trail<'a>(items: &'a [MenuItem], href: &str) -> Option<Vec<&'a MenuItem>> {
        items.iter().find_map(|item| {
            if item.href == href {
                Some(vec![item])
            } else {
                MenuItem::trail(&item.children, href).map(|mut trail| {
                    trail.insert(0, item);
                    trail
                })
            }
        })
    }

    /// Like [`MenuItem::trail`], falling back to the deepest item whose
    /// `href` is a whole-segment prefix of `path`.
    pub fn nearest_trail<'a>(items: &'a [MenuItem], path: &str) -> Option<Vec<&'a MenuItem>> {
        let mut candidate = path;
        loop {
            if let Some(trail) = MenuItem::trail(items, candidate) {
                return Some(trail);
            }
            candidate = match candidate.rsplit_once('/') {
                Some((parent, _)) if !parent.is_empty() => parent,
                _ => return None,
            };
        }
    }
}

/// The dashboard sidebar.
pub fn dashboard_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new("Home", "/dashboard").roles(EVERYONE),
        MenuItem::new("Wishlist", "/dashboard/wishlist").roles(STUDENTS),
        MenuItem::new("Documents", "/dashboard/documents").roles(STUDENTS),
        MenuItem::new("Notes", "/dashboard/notes").roles(STUDENTS),
        MenuItem::new("Tasks", "/dashboard/tasks").roles(STUDENTS),
        MenuItem::new("Universities", "/dashboard/universities").roles(ADMINS),
        MenuItem::new("Course", "/dashboard/courses").roles(STAFF),
        MenuItem::new("Students", "/dashboard/students").roles(STAFF),
        MenuItem::new("Applications", "/dashboard/applications").roles(EVERYONE),
        MenuItem::new("Lead Pipeline", "/dashboard/leads").roles(STAFF),
        MenuItem::new("Consultants", "/dashboard/consultants").roles(STAFF),
        MenuItem::new("Academic Settings", "/dashboard/academic-settings")
            .roles(ADMINS)
            .children(vec![
                MenuItem::new("Classes", "/dashboard/academic-settings/classes"),
                MenuItem::new("Sessions", "/dashboard/academic-settings/sessions"),
                MenuItem::new("Subjects", "/dashboard/academic-settings/subjects"),
            ]),
        MenuItem::new("Our Branches", "/dashboard/branches").roles(ADMINS),
        MenuItem::new("Testimonial", "/dashboard/testimonials").roles(ADMINS),
        MenuItem::new("Blog & Events", "/dashboard/blog-events").roles(ADMINS),
        MenuItem::new("Support", "/dashboard/support")
            .roles(EVERYONE)
            .children(vec![
                MenuItem::new("Tickets", "/dashboard/support/tickets"),
                MenuItem::new("FAQ", "/dashboard/support/faq"),
                MenuItem::new("Contact Us", "/dashboard/support/contact"),
            ]),
        MenuItem::new("Users Management", "/dashboard/users").permission("user:manage"),
        MenuItem::new("Web Management", "/dashboard/web-management").roles(ADMINS),
        MenuItem::new("Mailbox", "/dashboard/mailbox").roles(STAFF),
        MenuItem::new("Profile", "/dashboard/profile").roles(EVERYONE),
        MenuItem::new("Settings", "/dashboard/settings").roles(EVERYONE),
    ]
}

/// The items of `items` visible to `session`, children filtered recursively.
pub fn visible_items(items: &[MenuItem], session: &Session) -> Vec<MenuItem> {
    items
        .iter()
        .filter(|item| item.is_visible(session))
        .map(|item| MenuItem {
            children: visible_items(&item.children, session),
            ..item.clone()
        })
        .collect()
}
