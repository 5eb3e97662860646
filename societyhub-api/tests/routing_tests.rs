/// Router tests that never need a database

mod common;

use axum::http::StatusCode;
use common::{bearer, get, offline_app, post, send};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_join_requires_token() {
    let app = offline_app();
    let uri = format!("/api/society/{}/join", Uuid::new_v4());

    let (status, body) = send(
        &app,
        post(&uri, None, json!({"name": "Emma", "email": "emma@example.com", "reason": "hi"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Please log in first");
}

#[tokio::test]
async fn test_join_rejects_garbage_token() {
    let app = offline_app();
    let uri = format!("/api/society/{}/leave", Uuid::new_v4());

    let (status, _) = send(
        &app,
        post(&uri, Some("Bearer not-a-jwt"), json!({"name": "E", "email": "e@example.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_my_societies_requires_token() {
    let (status, _) = send(&offline_app(), get("/api/users/me/societies", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bad_society_id_is_bad_request() {
    let (status, _) = send(&offline_app(), get("/api/society/not-a-uuid", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (status, _) = send(&offline_app(), get("/api/nothing-here", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_join_without_reason_is_unprocessable() {
    let app = offline_app();
    let uri = format!("/api/society/{}/join", Uuid::new_v4());

    let (status, body) = send(
        &app,
        post(
            &uri,
            Some(&bearer(Uuid::new_v4())),
            json!({"name": "Emma", "email": "emma@example.com", "reason": "  "}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"][0]["field"], "reason");
}

#[tokio::test]
async fn test_rsvp_with_bad_email_is_unprocessable() {
    let app = offline_app();
    let uri = format!("/api/events/{}/rsvp", Uuid::new_v4());

    let (status, body) = send(&app, post(&uri, None, json!({"name": "Ali", "email": "nope"}))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Invalid email format");
}

#[tokio::test]
async fn test_register_rejects_weak_password() {
    let (status, body) = send(
        &offline_app(),
        post(
            "/api/auth/register",
            None,
            json!({"username": "Ali", "email": "ali@example.com", "password": "short"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "password");
}

#[tokio::test]
async fn test_health_reports_degraded_without_database() {
    let (status, body) = send(&offline_app(), get("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "disconnected");
}

#[tokio::test]
async fn test_security_headers_present() {
    use tower::Service as _;

    let response = offline_app()
        .call(get("/api/nothing-here", None))
        .await
        .unwrap();

    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");
}
