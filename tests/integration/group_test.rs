//! Group and membership integration tests

use chrono::{DateTime, Duration, Utc};
use http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, id_of};

fn parse_time(value: &serde_json::Value) -> DateTime<Utc> {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| panic!("not a timestamp: {value}"))
}

#[tokio::test]
async fn test_create_group_enrolls_owner() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.user("owner").await;
    let group_id = app.daily_group(&owner, 45).await;

    let resp = app
        .request("GET", &format!("/api/groups/{group_id}"), None, Some(&owner.token))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.data()["status"], "active");
    assert_eq!(resp.data()["period_target_minutes"], 45);

    let members = resp.data()["members"].as_array().cloned().unwrap_or_default();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["role"], "owner");
    assert_eq!(members[0]["user_id"], owner.id.to_string());
}

#[tokio::test]
async fn test_end_before_start_is_rejected() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.user("owner").await;
    let now = Utc::now();

    let resp = app
        .request(
            "POST",
            "/api/groups",
            Some(json!({
                "name": "Backwards",
                "start_at": now,
                "end_at": now - Duration::days(1),
            })),
            Some(&owner.token),
        )
        .await;
    assert!(resp.status.is_client_error(), "{}", resp.body);
}

#[tokio::test]
async fn test_duplicate_member_conflicts() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.user("owner").await;
    let bob = app.user("bob").await;
    let group_id = app.daily_group(&owner, 60).await;
    let path = format!("/api/groups/{group_id}/members");

    let resp = app
        .request("POST", &path, Some(json!({ "user_id": bob.id })), Some(&owner.token))
        .await;
    assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.body);
    assert_eq!(resp.data()["role"], "member");

    let resp = app
        .request("POST", &path, Some(json!({ "user_id": bob.id })), Some(&owner.token))
        .await;
    assert_eq!(resp.status, StatusCode::CONFLICT);
    assert_eq!(resp.error_code(), "ALREADY_EXISTS");
}

#[tokio::test]
async fn test_member_cannot_add_members() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.user("owner").await;
    let bob = app.user("bob").await;
    let carol = app.user("carol").await;
    let group_id = app.daily_group(&owner, 60).await;
    let path = format!("/api/groups/{group_id}/members");

    app.request("POST", &path, Some(json!({ "user_id": bob.id })), Some(&owner.token))
        .await;

    let resp = app
        .request("POST", &path, Some(json!({ "user_id": carol.id })), Some(&bob.token))
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_owner_cannot_be_removed() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.user("owner").await;
    let group_id = app.daily_group(&owner, 60).await;

    let resp = app
        .request("GET", &format!("/api/groups/{group_id}"), None, Some(&owner.token))
        .await;
    let membership_id = id_of(&resp.data()["members"][0]["id"]);

    let resp = app
        .request(
            "DELETE",
            &format!("/api/groups/{group_id}/members/{membership_id}"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_clone_copies_settings_for_caller() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.user("owner").await;
    let group_id = app.daily_group(&owner, 90).await;

    let before = Utc::now() - Duration::seconds(1);
    let resp = app
        .request(
            "POST",
            &format!("/api/groups/{group_id}/clone"),
            None,
            Some(&owner.token),
        )
        .await;
    let after = Utc::now() + Duration::seconds(1);
    assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.body);
    assert_ne!(id_of(&resp.data()["id"]), group_id);
    assert_eq!(resp.data()["period_target_minutes"], 90);
    assert_eq!(resp.data()["timezone"], "UTC");

    // Starts at the request instant and keeps the source's 37-day span.
    let start_at = parse_time(&resp.data()["start_at"]);
    let end_at = parse_time(&resp.data()["end_at"]);
    assert!(start_at >= before && start_at <= after, "start_at {start_at}");
    let drift = (end_at - start_at - Duration::days(37)).num_seconds().abs();
    assert!(drift <= 1, "span drifted by {drift}s");
}

#[tokio::test]
async fn test_expired_groups_are_archived_by_sweep() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.user("owner").await;
    let now = Utc::now();

    let resp = app
        .request(
            "POST",
            "/api/groups",
            Some(json!({
                "name": "Short sprint",
                "start_at": now - Duration::days(2),
                "end_at": now - Duration::days(1),
                "timezone": "UTC",
            })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.body);
    let group_id = id_of(&resp.data()["id"]);

    let resp = app
        .request(
            "POST",
            "/api/maintenance/archive-expired-groups",
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.data()["archived"].as_u64().unwrap_or_default() >= 1);

    let resp = app
        .request("GET", &format!("/api/groups/{group_id}"), None, Some(&owner.token))
        .await;
    assert_eq!(resp.data()["status"], "archived");
}
