//! Authentication integration tests

use http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, sign_token};

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let resp = app.request("GET", "/api/me", None, None).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.error_code(), "AUTHENTICATION");

    let resp = app
        .request("POST", "/api/maintenance/archive-expired-groups", None, None)
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let resp = app.request("GET", "/api/me", None, Some("not-a-jwt")).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_same_subject_resolves_to_same_profile() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let subject = uuid::Uuid::new_v4().to_string();
    let email = format!("{subject}@example.com");
    let token = sign_token(&subject, &email, "Sam");

    let first = app.request("GET", "/api/me", None, Some(&token)).await;
    let second = app.request("GET", "/api/me", None, Some(&token)).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.data()["id"], second.data()["id"]);
    assert_eq!(first.data()["email"], email);
    assert_eq!(first.data()["display_name"], "Sam");
}

#[tokio::test]
async fn test_update_own_profile() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let user = app.user("sam").await;

    let resp = app
        .request(
            "PATCH",
            "/api/me",
            Some(json!({ "display_name": "  Sam Focus  " })),
            Some(&user.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK, "{}", resp.body);
    assert_eq!(resp.data()["display_name"], "Sam Focus");
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let resp = app.request("GET", "/api/health", None, None).await;
    assert_eq!(resp.status, StatusCode::OK);

    let resp = app.request("GET", "/api/health/detailed", None, None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.data()["database"], "connected");
}
