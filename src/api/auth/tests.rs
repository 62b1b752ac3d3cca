use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::core::security;
use crate::test_support;

fn register_body() -> serde_json::Value {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "ada@example.com",
        "password": "strong-password",
        "confirm_password": "strong-password",
        "role": "student",
        "roll_number": "CS-2026-001"
    })
}

#[tokio::test]
async fn register_requires_roll_number_for_students() {
    let ctx = test_support::lazy_test_context().await;

    let mut body = register_body();
    body["roll_number"] = json!("  ");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::POST, "/api/v1/auth/register", None, Some(body)))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = test_support::read_json(response).await;
    assert_eq!(json["detail"], "Roll number is required for students");
}

#[tokio::test]
async fn register_rejects_invalid_email() {
    let ctx = test_support::lazy_test_context().await;

    let mut body = register_body();
    body["email"] = json!("not-an-email");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::POST, "/api/v1/auth/register", None, Some(body)))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = test_support::read_json(response).await;
    assert_eq!(json["detail"], "Invalid email format");
}

#[tokio::test]
async fn register_rejects_short_password() {
    let ctx = test_support::lazy_test_context().await;

    let mut body = register_body();
    body["password"] = json!("short");
    body["confirm_password"] = json!("short");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::POST, "/api/v1/auth/register", None, Some(body)))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_rejects_password_mismatch() {
    let ctx = test_support::lazy_test_context().await;

    let mut body = register_body();
    body["confirm_password"] = json!("different-password");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::POST, "/api/v1/auth/register", None, Some(body)))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = test_support::read_json(response).await;
    assert_eq!(json["detail"], "Passwords do not match");
}

#[tokio::test]
async fn register_rejects_unknown_role() {
    let ctx = test_support::lazy_test_context().await;

    let mut body = register_body();
    body["role"] = json!("admin");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::POST, "/api/v1/auth/register", None, Some(body)))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = test_support::read_json(response).await;
    assert_eq!(json["detail"], "Invalid role: admin");
}

#[tokio::test]
async fn register_rejects_blank_name() {
    let ctx = test_support::lazy_test_context().await;

    let mut body = register_body();
    body["first_name"] = json!("   ");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::POST, "/api/v1/auth/register", None, Some(body)))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_rejects_unknown_role() {
    let ctx = test_support::lazy_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({
                "email": "ada@example.com",
                "password": "strong-password",
                "role": "superuser"
            })),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn refresh_rejects_garbage_token() {
    let ctx = test_support::lazy_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/auth/refresh",
            None,
            Some(json!({ "refresh_token": "not-a-jwt" })),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = test_support::read_json(response).await;
    assert_eq!(json["detail"], "Invalid refresh token");
}

#[tokio::test]
async fn refresh_rejects_access_token() {
    let ctx = test_support::lazy_test_context().await;

    let access_token = test_support::bearer_token("user-1", ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/auth/refresh",
            None,
            Some(json!({ "refresh_token": access_token })),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_requires_bearer_token() {
    let ctx = test_support::lazy_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/v1/auth/me", None, None))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(axum::http::header::WWW_AUTHENTICATE).map(|v| v.to_str().unwrap()),
        Some("Bearer")
    );
}

#[tokio::test]
async fn me_rejects_refresh_token_as_bearer() {
    let ctx = test_support::lazy_test_context().await;

    let refresh_token =
        security::create_refresh_token("user-1", ctx.state.settings()).expect("token");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/auth/me",
            Some(&refresh_token),
            None,
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
