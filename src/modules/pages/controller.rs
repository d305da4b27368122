use anyhow::anyhow;
use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use tracing::debug;

use malisha_core::AppError;

use super::model::PageDescriptor;
use super::service::{DashboardPage, PagesService};
use crate::middleware::auth::MaybeSession;
use crate::state::AppState;

/// Render a public page
#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 200, description = "Page descriptor", body = PageDescriptor),
        (status = 307, description = "Already signed in, redirected to the dashboard")
    ),
    tag = "Pages"
)]
pub async fn public_page(
    State(state): State<AppState>,
    current: MaybeSession,
    uri: Uri,
) -> Result<Json<PageDescriptor>, AppError> {
    let path = uri.path();
    let title = PagesService::public_title(path, &state.route_config)
        .ok_or_else(|| AppError::new(StatusCode::NOT_FOUND, anyhow!("Page not found")))?;

    Ok(Json(PagesService::public_page(
        path,
        title,
        &current.session(),
    )))
}

/// Render a dashboard page
///
/// The sidebar holds only the items visible to the session. Actions are
/// filtered by the permission table.
#[utoipa::path(
    get,
    path = "/dashboard/{page}",
    params(("page" = String, Path, description = "Dashboard page, e.g. `students`, `students/42` or `support/faq`")),
    responses(
        (status = 200, description = "Page descriptor", body = PageDescriptor),
        (status = 307, description = "Not signed in, or the role may not open this page"),
        (status = 404, description = "No such page")
    ),
    tag = "Pages"
)]
pub async fn dashboard_page(
    State(state): State<AppState>,
    current: MaybeSession,
    uri: Uri,
) -> Result<Response, AppError> {
    let path = uri.path().trim_end_matches('/');
    let path = if path.is_empty() { "/" } else { path };
    let session = current.session();

    match PagesService::dashboard_page(path, &session, &state.route_config) {
        DashboardPage::Render(page) => Ok(Json(page).into_response()),
        DashboardPage::Denied => {
            debug!(path = %path, role = ?session.role(), "Dashboard page denied");
            Ok(Redirect::temporary(&state.route_config.unauthorized).into_response())
        }
        DashboardPage::NotFound => Err(AppError::new(
            StatusCode::NOT_FOUND,
            anyhow!("Page not found"),
        )),
    }
}
