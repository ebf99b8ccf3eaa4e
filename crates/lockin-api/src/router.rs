//! Route definitions for the LockIN HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let config = Arc::clone(&state.config);
    let server = &config.server;

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(profile_routes())
        .merge(group_routes())
        .merge(session_routes())
        .merge(notification_routes())
        .merge(maintenance_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(server.max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_seconds,
        )))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors::build_cors_layer(&server.cors))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Liveness and readiness
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

/// The caller's own profile
fn profile_routes() -> Router<AppState> {
    Router::new().route(
        "/me",
        get(handlers::profile::me).patch(handlers::profile::update_me),
    )
}

/// Groups, membership and progress
fn group_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/groups",
            get(handlers::group::list_groups).post(handlers::group::create_group),
        )
        .route("/groups/{id}", get(handlers::group::get_group))
        .route("/groups/{id}/clone", post(handlers::group::clone_group))
        .route("/groups/{id}/archive", post(handlers::group::archive_group))
        .route(
            "/groups/{id}/members",
            get(handlers::member::list_members).post(handlers::member::add_member),
        )
        .route(
            "/groups/{id}/members/{mid}",
            patch(handlers::member::update_member).delete(handlers::member::remove_member),
        )
        .route("/groups/{id}/invite", post(handlers::member::invite_member))
        .route(
            "/groups/{id}/progress/current",
            get(handlers::group::current_progress),
        )
}

/// Focus sessions and time logs
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(handlers::session::create_session))
        .route("/sessions/{id}", get(handlers::session::get_session))
        .route("/sessions/{id}/status", post(handlers::session::set_status))
        .route(
            "/sessions/{id}/participants",
            post(handlers::session::join_session),
        )
        .route("/sessions/{id}/logs", post(handlers::session::append_log))
}

/// Notification inbox
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications/{id}",
            get(handlers::notification::get_notification),
        )
        .route(
            "/notifications/{id}/read",
            post(handlers::notification::mark_read),
        )
        .route(
            "/notifications/{id}/accept",
            post(handlers::notification::accept_invite),
        )
        .route(
            "/notifications/{id}/decline",
            post(handlers::notification::decline_invite),
        )
}

/// Operator housekeeping
fn maintenance_routes() -> Router<AppState> {
    Router::new().route(
        "/maintenance/archive-expired-groups",
        post(handlers::maintenance::archive_expired_groups),
    )
}
