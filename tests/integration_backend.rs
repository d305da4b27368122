//! `HttpAuthBackend` against an in-process stand-in for the REST backend.

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

use malisha::modules::auth::{AuthBackend, HttpAuthBackend};
use malisha_config::ApiConfig;
use malisha_core::Role;
use malisha_models::{LoginRequest, RegisterRequest, StudentProfile};

async fn upstream_login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    match (body["email"].as_str(), body["password"].as_str()) {
        (Some("staff@malisha.edu"), Some("secret")) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Login successful",
                "data": {
                    "user": {
                        "id": "42",
                        "name": "Farhana Akter",
                        "email": "staff@malisha.edu",
                        "role": "AGENT",
                        "status": "ACTIVE",
                        "permissions": ["user:manage"]
                    },
                    "accessToken": "upstream-access",
                    "refreshToken": "upstream-refresh"
                }
            })),
        ),
        (Some("pending@malisha.edu"), _) => (
            StatusCode::OK,
            Json(json!({ "success": false, "message": "Account pending approval" })),
        ),
        (Some("broken@malisha.edu"), _) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false })),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid credentials" })),
        ),
    }
}

async fn upstream_register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"] == "taken@malisha.edu" {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "success": false, "message": "Email already exists" })),
        );
    }
    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "Student registered" })),
    )
}

async fn spawn_upstream() -> ApiConfig {
    let app = Router::new()
        .route("/api/v1/auth/login", post(upstream_login))
        .route("/api/v1/students/self-register", post(upstream_register));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    ApiConfig {
        base_url: format!("http://{}/api/v1", addr),
        timeout_secs: 5,
    }
}

fn credentials(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

fn registration(email: &str) -> RegisterRequest {
    RegisterRequest {
        name: "Tanvir Hasan".to_string(),
        email: email.to_string(),
        password: "secret1".to_string(),
        student: StudentProfile {
            phone_number: "+8801800000000".to_string(),
            gender: "male".to_string(),
            nationality: "Bangladeshi".to_string(),
            date_of_birth: "2004-02-29".to_string(),
        },
    }
}

#[tokio::test]
async fn test_authenticate_maps_upstream_user() {
    let backend = HttpAuthBackend::new(spawn_upstream().await).unwrap();

    let user = backend
        .authenticate(&credentials("staff@malisha.edu", "secret"))
        .await
        .unwrap();

    assert_eq!(user.id, "42");
    assert_eq!(user.role, Role::Counselor);
    assert_eq!(user.permissions, vec!["user:manage".to_string()]);
}

#[tokio::test]
async fn test_authenticate_rejected_credentials() {
    let backend = HttpAuthBackend::new(spawn_upstream().await).unwrap();

    let err = backend
        .authenticate(&credentials("staff@malisha.edu", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    assert_eq!(err.error.to_string(), "Invalid email or password");
}

#[tokio::test]
async fn test_authenticate_unsuccessful_envelope_keeps_message() {
    let backend = HttpAuthBackend::new(spawn_upstream().await).unwrap();

    let err = backend
        .authenticate(&credentials("pending@malisha.edu", "secret"))
        .await
        .unwrap_err();

    assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    assert_eq!(err.error.to_string(), "Account pending approval");
}

#[tokio::test]
async fn test_authenticate_upstream_failure_is_bad_gateway() {
    let backend = HttpAuthBackend::new(spawn_upstream().await).unwrap();

    let err = backend
        .authenticate(&credentials("broken@malisha.edu", "secret"))
        .await
        .unwrap_err();

    assert_eq!(err.status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_unreachable_backend_is_bad_gateway() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = HttpAuthBackend::new(ApiConfig {
        base_url: format!("http://{}/api/v1", addr),
        timeout_secs: 2,
    })
    .unwrap();

    let err = backend
        .authenticate(&credentials("staff@malisha.edu", "secret"))
        .await
        .unwrap_err();

    assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    assert_eq!(err.error.to_string(), "Authentication service unavailable");
}

#[tokio::test]
async fn test_register_forwards_upstream_message() {
    let backend = HttpAuthBackend::new(spawn_upstream().await).unwrap();

    let response = backend
        .register(&registration("new@malisha.edu"))
        .await
        .unwrap();
    assert_eq!(response.message, "Student registered");

    let err = backend
        .register(&registration("taken@malisha.edu"))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::CONFLICT);
    assert_eq!(err.error.to_string(), "Email already exists");
}
