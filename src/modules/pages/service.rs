//! Page registry and descriptor assembly.

use malisha_auth::{Gate, MenuItem, PermissionGate, Session, dashboard_menu, visible_items};
use malisha_config::RouteConfig;
use malisha_core::Permission;
use malisha_observability::track_authorization_check;

use super::model::{PageAction, PageDescriptor};

/// Outcome of resolving a dashboard page for a session.
#[derive(Debug)]
pub enum DashboardPage {
    Render(PageDescriptor),
    /// The session's role may not open this page.
    Denied,
    NotFound,
}

/// Menu pages that also serve `<href>/{id}` detail views.
const DETAIL_PAGES: &[(&str, &str)] = &[
    ("/dashboard/students", "Student Details"),
    ("/dashboard/branches", "Branch Details"),
];

pub struct PagesService;

impl PagesService {
    /// Title of a page outside the dashboard.
    pub fn public_title(path: &str, routes: &RouteConfig) -> Option<&'static str> {
        if path == routes.home {
            Some("Malisha Edu")
        } else if path == routes.login {
            Some("Student Login")
        } else if path == routes.secure_login {
            Some("Staff Login")
        } else if path == routes.register {
            Some("Student Registration")
        } else if path == routes.unauthorized {
            Some("Access Denied")
        } else {
            None
        }
    }

    pub fn public_page(path: &str, title: &str, session: &Session) -> PageDescriptor {
        PageDescriptor {
            path: path.to_string(),
            title: title.to_string(),
            user: session.user().cloned(),
            menu: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// The listing page and title behind a detail path such as
    /// `/dashboard/students/42`.
    pub fn detail_parent(path: &str) -> Option<(&'static str, &'static str)> {
        DETAIL_PAGES.iter().copied().find(|(href, _)| {
            path.strip_prefix(*href)
                .and_then(|rest| rest.strip_prefix('/'))
                .is_some_and(|id| !id.is_empty() && !id.contains('/'))
        })
    }

    /// Every action a page offers, before gating.
    pub fn page_actions(path: &str) -> Vec<PageAction> {
        use Permission::*;

        let actions: &[(&str, Permission)] = match Self::detail_parent(path) {
            Some(("/dashboard/students", _)) => &[
                ("Edit Student", StudentsEdit),
                ("Delete Student", StudentsDelete),
            ],
            Some(("/dashboard/branches", _)) => &[
                ("Edit Branch", BranchesEdit),
                ("Delete Branch", BranchesDelete),
            ],
            Some(_) => &[],
            None => Self::listing_actions(path),
        };

        actions
            .iter()
            .map(|(label, permission)| PageAction::new(label, *permission))
            .collect()
    }

    fn listing_actions(path: &str) -> &'static [(&'static str, Permission)] {
        use Permission::*;

        match path {
            "/dashboard/students" => &[
                ("View All Students", StudentsViewAll),
                ("Add Student", StudentsCreate),
                ("Edit Student", StudentsEdit),
                ("Delete Student", StudentsDelete),
            ],
            "/dashboard/universities" => &[
                ("Add University", UniversitiesCreate),
                ("Edit University", UniversitiesEdit),
                ("Delete University", UniversitiesDelete),
            ],
            "/dashboard/courses" => &[
                ("Add Course", CoursesCreate),
                ("Edit Course", CoursesEdit),
                ("Delete Course", CoursesDelete),
            ],
            "/dashboard/applications" => &[
                ("View All Applications", ApplicationsViewAll),
                ("New Application", ApplicationsCreate),
                ("Edit Application", ApplicationsEdit),
                ("Delete Application", ApplicationsDelete),
            ],
            "/dashboard/leads" => &[
                ("Add Lead", LeadsCreate),
                ("Edit Lead", LeadsEdit),
                ("Delete Lead", LeadsDelete),
            ],
            "/dashboard/users" => &[
                ("Add User", UsersCreate),
                ("Edit User", UsersEdit),
                ("Delete User", UsersDelete),
            ],
            "/dashboard/branches" => &[
                ("Add Branch", BranchesCreate),
                ("Edit Branch", BranchesEdit),
                ("Delete Branch", BranchesDelete),
            ],
            "/dashboard/settings" => &[("Edit Settings", SettingsEdit)],
            _ => &[],
        }
    }

    /// Actions gated by the permission table for `session`.
    pub fn allowed_actions(path: &str, session: &Session) -> Vec<PageAction> {
        Self::page_actions(path)
            .into_iter()
            .filter_map(|action| {
                PermissionGate::from(action.permission).render_or_none(session, action)
            })
            .collect()
    }

    /// Menu trail and title for a dashboard path. Detail paths resolve to
    /// their nearest menu ancestor, which must be a page with detail views.
    fn resolve<'a>(menu: &'a [MenuItem], path: &str) -> Option<(Vec<&'a MenuItem>, String)> {
        if let Some(trail) = MenuItem::trail(menu, path) {
            let title = trail.last()?.label.clone();
            return Some((trail, title));
        }

        let (parent, title) = Self::detail_parent(path)?;
        let trail = MenuItem::nearest_trail(menu, path)?;
        if trail.last()?.href != parent {
            return None;
        }
        Some((trail, title.to_string()))
    }

    /// Resolves a dashboard page. The dashboard root always renders; every
    /// other page must be on the menu, or a detail view of a menu page, and
    /// visible to the session along with all of its ancestors.
    pub fn dashboard_page(path: &str, session: &Session, routes: &RouteConfig) -> DashboardPage {
        let menu = dashboard_menu();

        let title = if path == routes.dashboard {
            "Dashboard".to_string()
        } else {
            let Some((trail, title)) = Self::resolve(&menu, path) else {
                return DashboardPage::NotFound;
            };
            let allowed = trail.iter().all(|item| item.is_visible(session));
            if let Some(role) = session.role() {
                track_authorization_check(allowed, role.as_str());
            }
            if !allowed {
                return DashboardPage::Denied;
            }
            title
        };

        DashboardPage::Render(PageDescriptor {
            path: path.to_string(),
            title,
            user: session.user().cloned(),
            menu: visible_items(&menu, session),
            actions: Self::allowed_actions(path, session),
        })
    }
}
