//! Invitation integration tests

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::{TestApp, TestUser, id_of};

async fn invite(app: &TestApp, owner: &TestUser, group_id: Uuid, invitee: &TestUser) -> Uuid {
    let resp = app
        .request(
            "POST",
            &format!("/api/groups/{group_id}/invite"),
            Some(json!({ "user_id": invitee.id })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.body);
    assert_eq!(resp.data()["kind"], "group_invite");
    assert_eq!(resp.data()["status"], "pending");
    id_of(&resp.data()["id"])
}

#[tokio::test]
async fn test_accepting_invite_joins_group() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.user("owner").await;
    let bob = app.user("bob").await;
    let group_id = app.daily_group(&owner, 60).await;
    let notification_id = invite(&app, &owner, group_id, &bob).await;

    let resp = app
        .request("GET", "/api/notifications?unread=true", None, Some(&bob.token))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    let inbox = resp.data()["notifications"].as_array().cloned().unwrap_or_default();
    assert!(inbox.iter().any(|n| n["id"] == notification_id.to_string()));

    let resp = app
        .request(
            "POST",
            &format!("/api/notifications/{notification_id}/accept"),
            None,
            Some(&bob.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK, "{}", resp.body);
    assert_eq!(resp.data()["status"], "accepted");

    let resp = app
        .request("GET", &format!("/api/groups/{group_id}"), None, Some(&bob.token))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    let members = resp.data()["members"].as_array().cloned().unwrap_or_default();
    assert!(members.iter().any(|m| m["user_id"] == bob.id.to_string() && m["role"] == "member"));

    let resp = app
        .request(
            "POST",
            &format!("/api/notifications/{notification_id}/accept"),
            None,
            Some(&bob.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_accepting_when_already_member_is_tolerated() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.user("owner").await;
    let bob = app.user("bob").await;
    let group_id = app.daily_group(&owner, 60).await;
    let notification_id = invite(&app, &owner, group_id, &bob).await;

    let resp = app
        .request(
            "POST",
            &format!("/api/groups/{group_id}/members"),
            Some(json!({ "user_id": bob.id, "role": "admin" })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.body);

    let resp = app
        .request(
            "POST",
            &format!("/api/notifications/{notification_id}/accept"),
            None,
            Some(&bob.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK, "{}", resp.body);

    let resp = app
        .request("GET", &format!("/api/groups/{group_id}/members"), None, Some(&bob.token))
        .await;
    let members = resp.data().as_array().cloned().unwrap_or_default();
    let bob_rows: Vec<_> = members
        .iter()
        .filter(|m| m["user_id"] == bob.id.to_string())
        .collect();
    assert_eq!(bob_rows.len(), 1);
    assert_eq!(bob_rows[0]["role"], "admin");
}

#[tokio::test]
async fn test_invite_to_archived_group_is_gone() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.user("owner").await;
    let bob = app.user("bob").await;
    let group_id = app.daily_group(&owner, 60).await;
    let notification_id = invite(&app, &owner, group_id, &bob).await;

    let resp = app
        .request(
            "POST",
            &format!("/api/groups/{group_id}/archive"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK, "{}", resp.body);

    let resp = app
        .request(
            "POST",
            &format!("/api/notifications/{notification_id}/accept"),
            None,
            Some(&bob.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::GONE);
}

#[tokio::test]
async fn test_decline_and_foreign_inbox() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.user("owner").await;
    let bob = app.user("bob").await;
    let group_id = app.daily_group(&owner, 60).await;
    let notification_id = invite(&app, &owner, group_id, &bob).await;

    let resp = app
        .request(
            "GET",
            &format!("/api/notifications/{notification_id}"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = app
        .request(
            "POST",
            &format!("/api/notifications/{notification_id}/decline"),
            None,
            Some(&bob.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK, "{}", resp.body);
    assert_eq!(resp.data()["status"], "declined");

    let resp = app
        .request("GET", &format!("/api/groups/{group_id}"), None, Some(&bob.token))
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
}
