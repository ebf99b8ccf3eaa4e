//! Goal period windows.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use lockin_core::error::AppError;
use lockin_core::result::AppResult;
use lockin_entity::group::GoalPeriod;

/// A half-open `[start, end)` interval of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindow {
    /// Inclusive start.
    pub start: DateTime<Utc>,
    /// Exclusive end.
    pub end: DateTime<Utc>,
}

impl PeriodWindow {
    /// Whether `at` falls inside the window.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}

/// Compute the window of the period containing `now`.
///
/// - `Daily`: from local midnight of `now`'s calendar day in `tz` to the next
///   local midnight. DST days are 23 or 25 hours long.
/// - `Weekly`: `anchor + k * 7d` for the largest `k >= 0` not past `now`,
///   lasting 7 days. Before the anchor the first cycle is returned.
pub fn current_window(
    period: GoalPeriod,
    tz: Tz,
    anchor: DateTime<Utc>,
    now: DateTime<Utc>,
) -> AppResult<PeriodWindow> {
    match period {
        GoalPeriod::Daily => {
            let today = now.with_timezone(&tz).date_naive();
            let tomorrow = today
                .succ_opt()
                .ok_or_else(|| AppError::internal("Date out of range"))?;
            Ok(PeriodWindow {
                start: local_day_start(tz, today)?,
                end: local_day_start(tz, tomorrow)?,
            })
        }
        GoalPeriod::Weekly => {
            let length = GoalPeriod::Weekly.nominal_length();
            let cycles = (now - anchor)
                .num_seconds()
                .div_euclid(length.num_seconds())
                .max(0);
            let start = anchor + Duration::seconds(cycles * length.num_seconds());
            Ok(PeriodWindow {
                start,
                end: start + length,
            })
        }
    }
}

/// First instant of `date` in `tz`.
///
/// Midnight can be ambiguous (clocks fall back onto it) or skipped (clocks
/// spring forward over it); the earliest existing local time wins.
fn local_day_start(tz: Tz, date: NaiveDate) -> AppResult<DateTime<Utc>> {
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::internal("Invalid midnight"))?;

    (0..=8)
        .map(|step| midnight + Duration::minutes(15 * step))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| AppError::internal(format!("No local midnight for {date} in {tz}")))
}
