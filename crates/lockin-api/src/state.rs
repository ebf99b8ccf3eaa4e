//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use lockin_auth::{IdentityResolver, RbacEnforcer};
use lockin_core::config::AppConfig;
use lockin_database::DatabasePool;
use lockin_database::repositories::{
    GroupRepository, MemberRepository, NotificationRepository, ProfileRepository,
    SessionRepository, TimeLogRepository,
};
use lockin_service::{
    GroupAccess, GroupService, MaintenanceService, MemberService, NotificationService,
    ProfileService, ProgressService, SessionService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db: DatabasePool,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token to profile resolver
    pub identity: Arc<IdentityResolver>,

    // ── Services ─────────────────────────────────────────────
    /// Own profile service
    pub profile_service: Arc<ProfileService>,
    /// Group service
    pub group_service: Arc<GroupService>,
    /// Membership service
    pub member_service: Arc<MemberService>,
    /// Focus session service
    pub session_service: Arc<SessionService>,
    /// Progress aggregation service
    pub progress_service: Arc<ProgressService>,
    /// Notification service
    pub notification_service: Arc<NotificationService>,
    /// Maintenance service
    pub maintenance_service: Arc<MaintenanceService>,
}

impl AppState {
    /// Wires repositories and services over one pool.
    pub fn build(config: AppConfig, db: DatabasePool) -> Self {
        let pool = db.pool().clone();

        // ── Repositories ─────────────────────────────────────
        let profile_repo = Arc::new(ProfileRepository::new(pool.clone()));
        let group_repo = Arc::new(GroupRepository::new(pool.clone()));
        let member_repo = Arc::new(MemberRepository::new(pool.clone()));
        let session_repo = Arc::new(SessionRepository::new(pool.clone()));
        let time_log_repo = Arc::new(TimeLogRepository::new(pool.clone()));
        let notification_repo = Arc::new(NotificationRepository::new(pool));

        // ── Auth ─────────────────────────────────────────────
        let identity = Arc::new(IdentityResolver::new(
            db.clone(),
            Arc::clone(&profile_repo),
            &config.auth,
        ));
        let rbac = Arc::new(RbacEnforcer::new());
        let access = Arc::new(GroupAccess::new(
            Arc::clone(&group_repo),
            Arc::clone(&member_repo),
            Arc::clone(&rbac),
        ));

        // ── Services ─────────────────────────────────────────
        let profile_service = Arc::new(ProfileService::new(Arc::clone(&profile_repo)));
        let group_service = Arc::new(GroupService::new(
            db.clone(),
            Arc::clone(&group_repo),
            Arc::clone(&member_repo),
            Arc::clone(&access),
        ));
        let member_service = Arc::new(MemberService::new(
            db.clone(),
            Arc::clone(&member_repo),
            Arc::clone(&profile_repo),
            Arc::clone(&notification_repo),
            Arc::clone(&access),
        ));
        let session_service = Arc::new(SessionService::new(
            db.clone(),
            session_repo,
            Arc::clone(&time_log_repo),
            Arc::clone(&access),
            rbac,
            config.sessions.transition_mode,
        ));
        let progress_service = Arc::new(ProgressService::new(
            db.clone(),
            Arc::clone(&group_repo),
            Arc::clone(&member_repo),
            time_log_repo,
            access,
        ));
        let notification_service = Arc::new(NotificationService::new(
            db.clone(),
            notification_repo,
            Arc::clone(&group_repo),
            member_repo,
        ));
        let maintenance_service = Arc::new(MaintenanceService::new(group_repo));

        Self {
            config: Arc::new(config),
            db,
            identity,
            profile_service,
            group_service,
            member_service,
            session_service,
            progress_service,
            notification_service,
            maintenance_service,
        }
    }
}
