//! Pure fold from members and logged intervals to progress rows.

use std::collections::{HashMap, HashSet};

use chrono::Duration;
use uuid::Uuid;

use lockin_entity::group::{Group, GroupMember};
use lockin_entity::progress::{LoggedInterval, ProgressRow};

use super::window::PeriodWindow;

/// The part of `interval` that overlaps `window`, or zero when disjoint.
pub fn clipped_duration(interval: &LoggedInterval, window: &PeriodWindow) -> Duration {
    let start = interval.started_at.max(window.start);
    let end = interval.ended_at.min(window.end);
    if end > start {
        end - start
    } else {
        Duration::zero()
    }
}

/// Build one row per current member that has logged time in the group.
///
/// `logged_users` holds every user with at least one log in the group's
/// sessions, regardless of window. Members outside it are omitted; members
/// inside it with nothing in the window get a zero row. Rows are ordered by
/// `seconds_done` descending, then `user_id` ascending.
pub fn aggregate(
    group: &Group,
    members: &[GroupMember],
    logged_users: &HashSet<Uuid>,
    intervals: &[LoggedInterval],
    window: PeriodWindow,
) -> Vec<ProgressRow> {
    let mut totals: HashMap<Uuid, Duration> = HashMap::new();
    for interval in intervals {
        let slice = clipped_duration(interval, &window);
        *totals.entry(interval.user_id).or_insert_with(Duration::zero) += slice;
    }

    let mut rows: Vec<ProgressRow> = members
        .iter()
        .filter(|m| logged_users.contains(&m.user_id))
        .map(|member| {
            let seconds_done = totals
                .get(&member.user_id)
                .map(|d| d.num_seconds())
                .unwrap_or(0);
            let target_minutes = member.effective_target_minutes(group.period_target_minutes);
            ProgressRow {
                group_id: group.id,
                user_id: member.user_id,
                period_start: window.start,
                period_end: window.end,
                seconds_done,
                target_minutes,
                goal_met: seconds_done >= i64::from(target_minutes) * 60,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.seconds_done
            .cmp(&a.seconds_done)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    rows
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use lockin_entity::group::{GoalPeriod, GroupStatus, MemberRole};

    use super::*;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 10, h, m, 0).unwrap()
    }

    fn window() -> PeriodWindow {
        PeriodWindow {
            start: at(0, 0),
            end: Utc.with_ymd_and_hms(2025, 6, 11, 0, 0, 0).unwrap(),
        }
    }

    fn group(target: i32) -> Group {
        Group {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            name: "Deep work".into(),
            description: None,
            start_at: at(0, 0) - Duration::days(30),
            end_at: at(0, 0) + Duration::days(30),
            timezone: "UTC".into(),
            period: GoalPeriod::Daily,
            period_target_minutes: target,
            status: GroupStatus::Active,
            created_at: at(0, 0),
            updated_at: at(0, 0),
        }
    }

    fn member(group: &Group, user_id: Uuid, target_override: Option<i32>) -> GroupMember {
        GroupMember {
            id: Uuid::new_v4(),
            group_id: group.id,
            user_id,
            role: MemberRole::Member,
            override_period_target_minutes: target_override,
            created_at: at(0, 0),
        }
    }

    fn log(user_id: Uuid, started_at: DateTime<Utc>, ended_at: DateTime<Utc>) -> LoggedInterval {
        LoggedInterval {
            user_id,
            started_at,
            ended_at,
        }
    }

    #[test]
    fn test_two_half_hours_meet_an_hour_target() {
        let g = group(60);
        let user = Uuid::new_v4();
        let members = vec![member(&g, user, None)];
        let logged = HashSet::from([user]);
        let intervals = vec![log(user, at(9, 0), at(9, 30)), log(user, at(14, 0), at(14, 30))];

        let rows = aggregate(&g, &members, &logged, &intervals, window());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].seconds_done, 3600);
        assert_eq!(rows[0].target_minutes, 60);
        assert!(rows[0].goal_met);
        assert_eq!(rows[0].period_start, window().start);
    }

    #[test]
    fn test_log_straddling_window_start_is_clipped() {
        let g = group(60);
        let user = Uuid::new_v4();
        let members = vec![member(&g, user, None)];
        let logged = HashSet::from([user]);
        let intervals = vec![log(
            user,
            window().start - Duration::minutes(10),
            window().start + Duration::minutes(20),
        )];

        let rows = aggregate(&g, &members, &logged, &intervals, window());

        assert_eq!(rows[0].seconds_done, 1200);
        assert!(!rows[0].goal_met);
    }

    #[test]
    fn test_log_straddling_window_end_is_clipped() {
        let w = window();
        let interval = log(Uuid::new_v4(), w.end - Duration::minutes(5), w.end + Duration::hours(2));
        assert_eq!(clipped_duration(&interval, &w), Duration::minutes(5));
    }

    #[test]
    fn test_disjoint_log_contributes_nothing() {
        let w = window();
        let interval = log(Uuid::new_v4(), w.start - Duration::hours(3), w.start - Duration::hours(1));
        assert_eq!(clipped_duration(&interval, &w), Duration::zero());
    }

    #[test]
    fn test_goal_met_at_exact_boundary() {
        let g = group(30);
        let user = Uuid::new_v4();
        let members = vec![member(&g, user, None)];
        let logged = HashSet::from([user]);
        let intervals = vec![log(user, at(8, 0), at(8, 30))];

        let rows = aggregate(&g, &members, &logged, &intervals, window());

        assert_eq!(rows[0].seconds_done, 1800);
        assert!(rows[0].goal_met);
    }

    #[test]
    fn test_override_target_applies() {
        let g = group(60);
        let user = Uuid::new_v4();
        let members = vec![member(&g, user, Some(15))];
        let logged = HashSet::from([user]);
        let intervals = vec![log(user, at(8, 0), at(8, 20))];

        let rows = aggregate(&g, &members, &logged, &intervals, window());

        assert_eq!(rows[0].target_minutes, 15);
        assert!(rows[0].goal_met);
    }

    #[test]
    fn test_members_without_logs_are_omitted() {
        let g = group(60);
        let members = vec![member(&g, Uuid::new_v4(), None), member(&g, Uuid::new_v4(), None)];

        let rows = aggregate(&g, &members, &HashSet::new(), &[], window());

        assert!(rows.is_empty());
    }

    #[test]
    fn test_logged_member_with_nothing_in_window_gets_zero_row() {
        let g = group(60);
        let user = Uuid::new_v4();
        let members = vec![member(&g, user, None)];
        let logged = HashSet::from([user]);

        let rows = aggregate(&g, &members, &logged, &[], window());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].seconds_done, 0);
        assert!(!rows[0].goal_met);
    }

    #[test]
    fn test_former_members_are_ignored() {
        let g = group(60);
        let stayed = Uuid::new_v4();
        let left = Uuid::new_v4();
        let members = vec![member(&g, stayed, None)];
        let logged = HashSet::from([stayed, left]);
        let intervals = vec![log(stayed, at(1, 0), at(2, 0)), log(left, at(1, 0), at(5, 0))];

        let rows = aggregate(&g, &members, &logged, &intervals, window());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user_id, stayed);
    }

    #[test]
    fn test_rows_sorted_by_seconds_then_user() {
        let g = group(60);
        let mut ids = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        ids.sort();
        let [a, b, c] = ids;
        let members: Vec<_> = ids.iter().map(|u| member(&g, *u, None)).collect();
        let logged = HashSet::from(ids);
        let intervals = vec![
            log(a, at(1, 0), at(1, 10)),
            log(b, at(1, 0), at(2, 0)),
            log(c, at(3, 0), at(3, 10)),
        ];

        let rows = aggregate(&g, &members, &logged, &intervals, window());

        let order: Vec<_> = rows.iter().map(|r| r.user_id).collect();
        assert_eq!(order, vec![b, a, c]);
    }
}
