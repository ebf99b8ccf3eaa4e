//! Session lifecycle integration tests

use chrono::{DateTime, Duration, Utc};
use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::{TestApp, id_of};

fn whole_seconds(at: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(at.timestamp(), 0).unwrap_or(at)
}

fn parse_time(value: &serde_json::Value) -> DateTime<Utc> {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| panic!("not a timestamp: {value}"))
}

#[tokio::test]
async fn test_run_then_end_records_both_instants() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let alice = app.user("alice").await;
    let session_id = app.session(&alice, None).await;

    let t1 = whole_seconds(Utc::now() - Duration::minutes(45));
    let t2 = t1 + Duration::minutes(40);
    let path = format!("/api/sessions/{session_id}/status");

    let resp = app
        .request(
            "POST",
            &path,
            Some(json!({ "status": "running", "at": t1 })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK, "{}", resp.body);
    assert_eq!(resp.data()["status"], "running");

    let resp = app
        .request(
            "POST",
            &path,
            Some(json!({ "status": "ended", "at": t2 })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK, "{}", resp.body);

    let resp = app
        .request("GET", &format!("/api/sessions/{session_id}"), None, Some(&alice.token))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.data()["status"], "ended");
    assert_eq!(parse_time(&resp.data()["started_at"]), t1);
    assert_eq!(parse_time(&resp.data()["ended_at"]), t2);
    assert_eq!(resp.data()["version"], 3);
}

#[tokio::test]
async fn test_stale_version_is_rejected() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let alice = app.user("alice").await;
    let session_id = app.session(&alice, None).await;
    let path = format!("/api/sessions/{session_id}/status");

    let resp = app
        .request(
            "POST",
            &path,
            Some(json!({ "status": "running", "expected_version": 1 })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK, "{}", resp.body);

    let resp = app
        .request(
            "POST",
            &path,
            Some(json!({ "status": "paused", "expected_version": 1 })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CONFLICT);
    assert_eq!(resp.error_code(), "CONFLICT");
}

#[tokio::test]
async fn test_ended_session_cannot_restart() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let alice = app.user("alice").await;
    let session_id = app.session(&alice, None).await;
    let path = format!("/api/sessions/{session_id}/status");

    for status in ["running", "ended"] {
        let resp = app
            .request("POST", &path, Some(json!({ "status": status })), Some(&alice.token))
            .await;
        assert_eq!(resp.status, StatusCode::OK, "{}", resp.body);
    }

    let resp = app
        .request("POST", &path, Some(json!({ "status": "running" })), Some(&alice.token))
        .await;
    assert_eq!(resp.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_only_creator_changes_status() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    let session_id = app.session(&alice, None).await;

    let resp = app
        .request(
            "POST",
            &format!("/api/sessions/{session_id}/status"),
            Some(json!({ "status": "running" })),
            Some(&bob.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_cancel_before_scheduled_start_leaves_end_empty() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let alice = app.user("alice").await;
    let scheduled = whole_seconds(Utc::now() + Duration::days(1));

    let resp = app
        .request(
            "POST",
            "/api/sessions",
            Some(json!({ "scheduled_start": scheduled })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.body);
    let session_id = id_of(&resp.data()["id"]);

    let resp = app
        .request(
            "POST",
            &format!("/api/sessions/{session_id}/status"),
            Some(json!({ "status": "cancelled" })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK, "{}", resp.body);
    assert_eq!(resp.data()["status"], "cancelled");
    assert!(resp.data()["ended_at"].is_null(), "{}", resp.body);
    assert_eq!(parse_time(&resp.data()["started_at"]), scheduled);
}

#[tokio::test]
async fn test_participant_cannot_log_for_another_user() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    let session_id = app.session(&alice, None).await;
    let now = Utc::now();
    let path = format!("/api/sessions/{session_id}/logs");
    let interval = |user_id: Uuid| {
        json!({
            "user_id": user_id,
            "started_at": now - Duration::minutes(10),
            "ended_at": now,
        })
    };

    let resp = app
        .request("POST", &path, Some(interval(alice.id)), Some(&bob.token))
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);

    let resp = app
        .request("POST", &path, Some(interval(bob.id)), Some(&alice.token))
        .await;
    assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.body);
}

#[tokio::test]
async fn test_inverted_log_interval_is_unprocessable() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    let session_id = app.session(&alice, None).await;
    let now = Utc::now();

    let resp = app
        .request(
            "POST",
            &format!("/api/sessions/{session_id}/logs"),
            Some(json!({ "started_at": now, "ended_at": now - Duration::minutes(5) })),
            Some(&bob.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp.error_code(), "INVALID_INTERVAL");

    // The rejected log neither enrolled bob nor wrote a time log.
    let resp = app
        .request("GET", &format!("/api/sessions/{session_id}"), None, Some(&alice.token))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    let participants = resp.data()["participants"].as_array().cloned().unwrap_or_default();
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0]["user_id"], alice.id.to_string());
    assert_eq!(resp.data()["version"], 1);
}

#[tokio::test]
async fn test_first_log_enrolls_participant_once() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    let session_id = app.session(&alice, None).await;
    let now = Utc::now();

    for _ in 0..2 {
        let resp = app
            .request(
                "POST",
                &format!("/api/sessions/{session_id}/logs"),
                Some(json!({ "started_at": now - Duration::minutes(10), "ended_at": now })),
                Some(&bob.token),
            )
            .await;
        assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.body);
        assert_eq!(resp.data()["status"], "logged");
    }

    let resp = app
        .request("GET", &format!("/api/sessions/{session_id}"), None, Some(&alice.token))
        .await;
    let participants = resp.data()["participants"].as_array().cloned().unwrap_or_default();
    assert_eq!(participants.len(), 2);
    assert_eq!(participants[0]["role"], "host");
}
