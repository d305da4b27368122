mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use common::{StubAuthBackend, body_json, fake_user, location, session_cookie, test_state, token_for};
use malisha::router::init_router;
use malisha_core::Role;
use malisha_models::UserIdentity;

fn page_request(uri: &str, user: Option<&UserIdentity>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(user) = user {
        builder = builder.header(header::COOKIE, session_cookie(&token_for(user)));
    }
    builder.body(Body::empty()).unwrap()
}

fn labels(items: &serde_json::Value) -> Vec<String> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["label"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_protected_page_without_cookie_redirects_to_login() {
    let app = init_router(test_state(StubAuthBackend::default()));

    let response = app
        .oneshot(page_request("/dashboard/students", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        location(&response),
        Some("/login?callbackUrl=%2Fdashboard%2Fstudents")
    );
}

#[tokio::test]
async fn test_expired_cookie_counts_as_anonymous() {
    let user = fake_user(Role::Admin);
    let expired = malisha_auth::create_session_token(
        &user,
        &malisha_config::JwtConfig {
            secret: common::test_jwt_config().secret,
            access_token_expiry: -120,
        },
    )
    .unwrap();
    let app = init_router(test_state(StubAuthBackend::default()));

    let request = Request::builder()
        .uri("/dashboard/students")
        .header(header::COOKIE, session_cookie(&expired))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert!(location(&response).unwrap().starts_with("/login?callbackUrl="));
}

#[tokio::test]
async fn test_login_page_with_cookie_redirects_to_dashboard() {
    let user = fake_user(Role::Student);

    for page in ["/login", "/secure-login", "/register"] {
        let app = init_router(test_state(StubAuthBackend::default()));
        let response = app.oneshot(page_request(page, Some(&user))).await.unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "{}", page);
        assert_eq!(location(&response), Some("/dashboard"));
    }
}

#[tokio::test]
async fn test_public_pages_render_anonymously() {
    for (page, title) in [
        ("/", "Malisha Edu"),
        ("/login", "Student Login"),
        ("/secure-login", "Staff Login"),
        ("/register", "Student Registration"),
        ("/unauthorized", "Access Denied"),
    ] {
        let app = init_router(test_state(StubAuthBackend::default()));
        let response = app.oneshot(page_request(page, None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{}", page);
        let body = body_json(response).await;
        assert_eq!(body["title"], title);
        assert!(body["user"].is_null());
    }
}

#[tokio::test]
async fn test_dashboard_root_is_whitelisted() {
    let app = init_router(test_state(StubAuthBackend::default()));

    let response = app.oneshot(page_request("/dashboard", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "Dashboard");
    assert_eq!(body["menu"], serde_json::json!([]));
}

#[tokio::test]
async fn test_student_dashboard_menu() {
    let student = fake_user(Role::Student);
    let app = init_router(test_state(StubAuthBackend::default()));

    let response = app
        .oneshot(page_request("/dashboard", Some(&student)))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["user"]["id"], student.id);
    let menu = labels(&body["menu"]);
    assert!(menu.contains(&"Wishlist".to_string()));
    assert!(!menu.contains(&"Students".to_string()));
    assert!(!menu.contains(&"Users Management".to_string()));
}

#[tokio::test]
async fn test_student_on_staff_page_goes_to_unauthorized() {
    let student = fake_user(Role::Student);
    let app = init_router(test_state(StubAuthBackend::default()));

    let response = app
        .oneshot(page_request("/dashboard/users", Some(&student)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/unauthorized"));
}

#[tokio::test]
async fn test_explicit_permission_opens_users_management() {
    let counselor = fake_user(Role::Counselor).with_permissions(["user:manage"]);
    let app = init_router(test_state(StubAuthBackend::default()));

    let response = app
        .oneshot(page_request("/dashboard/users", Some(&counselor)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "Users Management");
    // The explicit grant opens the page; actions still follow the table.
    assert_eq!(body["actions"], serde_json::json!([]));
}

#[tokio::test]
async fn test_page_actions_follow_permission_table() {
    let branch = fake_user(Role::Branch);
    let app = init_router(test_state(StubAuthBackend::default()));

    let response = app
        .oneshot(page_request("/dashboard/students", Some(&branch)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let permissions: Vec<&str> = body["actions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["permission"].as_str().unwrap())
        .collect();
    assert_eq!(
        permissions,
        vec!["STUDENTS_CREATE", "STUDENTS_EDIT", "STUDENTS_DELETE"]
    );
}

#[tokio::test]
async fn test_nested_page_checks_parent() {
    let branch = fake_user(Role::Branch);
    let admin = fake_user(Role::Admin);

    let app = init_router(test_state(StubAuthBackend::default()));
    let response = app
        .oneshot(page_request("/dashboard/academic-settings/classes", Some(&branch)))
        .await
        .unwrap();
    assert_eq!(location(&response), Some("/unauthorized"));

    let app = init_router(test_state(StubAuthBackend::default()));
    let response = app
        .oneshot(page_request("/dashboard/academic-settings/classes", Some(&admin)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "Classes");
}

#[tokio::test]
async fn test_unknown_dashboard_page() {
    let admin = fake_user(Role::Admin);
    let app = init_router(test_state(StubAuthBackend::default()));

    let response = app
        .oneshot(page_request("/dashboard/nowhere", Some(&admin)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_student_detail_page_for_branch() {
    let branch = fake_user(Role::Branch);
    let app = init_router(test_state(StubAuthBackend::default()));

    let response = app
        .oneshot(page_request("/dashboard/students/42", Some(&branch)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "Student Details");
    assert_eq!(body["path"], "/dashboard/students/42");
    let permissions: Vec<&str> = body["actions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["permission"].as_str().unwrap())
        .collect();
    assert_eq!(permissions, vec!["STUDENTS_EDIT", "STUDENTS_DELETE"]);
}

#[tokio::test]
async fn test_branch_detail_page_denied_for_branch_role() {
    let branch = fake_user(Role::Branch);
    let app = init_router(test_state(StubAuthBackend::default()));

    let response = app
        .oneshot(page_request("/dashboard/branches/7", Some(&branch)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/unauthorized"));
}

#[tokio::test]
async fn test_detail_page_without_cookie_redirects_to_login() {
    let app = init_router(test_state(StubAuthBackend::default()));

    let response = app
        .oneshot(page_request("/dashboard/branches/7", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        location(&response),
        Some("/login?callbackUrl=%2Fdashboard%2Fbranches%2F7")
    );
}

#[tokio::test]
async fn test_detail_of_page_without_details_is_not_found() {
    let admin = fake_user(Role::Admin);
    let app = init_router(test_state(StubAuthBackend::default()));

    let response = app
        .oneshot(page_request("/dashboard/courses/3", Some(&admin)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_paths_bypass_the_boundary() {
    let app = init_router(test_state(StubAuthBackend::default()));

    let response = app
        .oneshot(page_request("/api/access/me", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
