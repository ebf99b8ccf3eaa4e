//! Current-period progress integration tests

use chrono::{DateTime, Duration, Utc};
use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::{TestApp, TestUser};

fn utc_day_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc())
        .unwrap_or(now)
}

async fn log(
    app: &TestApp,
    user: &TestUser,
    session_id: Uuid,
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
) {
    let resp = app
        .request(
            "POST",
            &format!("/api/sessions/{session_id}/logs"),
            Some(json!({ "started_at": started_at, "ended_at": ended_at })),
            Some(&user.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.body);
}

#[tokio::test]
async fn test_two_half_hours_meet_an_hour_goal() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.user("owner").await;
    let group_id = app.daily_group(&owner, 60).await;
    let session_id = app.session(&owner, Some(group_id)).await;

    let day = utc_day_start(Utc::now());
    log(&app, &owner, session_id, day + Duration::hours(1), day + Duration::minutes(90)).await;
    log(&app, &owner, session_id, day + Duration::hours(2), day + Duration::minutes(150)).await;

    let resp = app
        .request(
            "GET",
            &format!("/api/groups/{group_id}/progress/current"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK, "{}", resp.body);

    let rows = resp.data().as_array().cloned().unwrap_or_default();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["user_id"], owner.id.to_string());
    assert_eq!(rows[0]["seconds_done"], 3600);
    assert_eq!(rows[0]["goal_met"], true);
}

#[tokio::test]
async fn test_interval_straddling_period_start_is_clipped() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.user("owner").await;
    let group_id = app.daily_group(&owner, 60).await;
    let session_id = app.session(&owner, Some(group_id)).await;

    let day = utc_day_start(Utc::now());
    log(
        &app,
        &owner,
        session_id,
        day - Duration::minutes(10),
        day + Duration::minutes(20),
    )
    .await;

    let resp = app
        .request(
            "GET",
            &format!("/api/groups/{group_id}/progress/current"),
            None,
            Some(&owner.token),
        )
        .await;
    let rows = resp.data().as_array().cloned().unwrap_or_default();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["seconds_done"], 1200);
    assert_eq!(rows[0]["goal_met"], false);
}

#[tokio::test]
async fn test_group_without_logs_has_empty_progress() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.user("owner").await;
    let group_id = app.daily_group(&owner, 60).await;

    let resp = app
        .request(
            "GET",
            &format!("/api/groups/{group_id}/progress/current"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.data(), &json!([]));
}

#[tokio::test]
async fn test_member_override_and_idle_member_omitted() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.user("owner").await;
    let focused = app.user("focused").await;
    let idle = app.user("idle").await;
    let group_id = app.daily_group(&owner, 60).await;

    for (user, override_minutes) in [(&focused, Some(15)), (&idle, None)] {
        let resp = app
            .request(
                "POST",
                &format!("/api/groups/{group_id}/members"),
                Some(json!({
                    "user_id": user.id,
                    "override_period_target_minutes": override_minutes,
                })),
                Some(&owner.token),
            )
            .await;
        assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.body);
    }

    let session_id = app.session(&owner, Some(group_id)).await;
    let day = utc_day_start(Utc::now());
    log(&app, &focused, session_id, day + Duration::hours(3), day + Duration::minutes(200)).await;

    let resp = app
        .request(
            "GET",
            &format!("/api/groups/{group_id}/progress/current"),
            None,
            Some(&idle.token),
        )
        .await;
    let rows = resp.data().as_array().cloned().unwrap_or_default();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["user_id"], focused.id.to_string());
    assert_eq!(rows[0]["seconds_done"], 1200);
    assert_eq!(rows[0]["target_minutes"], 15);
    assert_eq!(rows[0]["goal_met"], true);
}

#[tokio::test]
async fn test_unknown_group_is_not_found() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.user("owner").await;

    let resp = app
        .request(
            "GET",
            &format!("/api/groups/{}/progress/current", Uuid::new_v4()),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.error_code(), "GROUP_NOT_FOUND");
}

#[tokio::test]
async fn test_non_member_cannot_read_progress() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.user("owner").await;
    let outsider = app.user("outsider").await;
    let group_id = app.daily_group(&owner, 60).await;

    let resp = app
        .request(
            "GET",
            &format!("/api/groups/{group_id}/progress/current"),
            None,
            Some(&outsider.token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
}
