//! Goal period enumeration.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recurring window against which a group's target minutes are measured.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "goal_period", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GoalPeriod {
    /// One calendar day in the group's timezone.
    #[default]
    Daily,
    /// A 7-day cycle anchored at the group's start instant.
    Weekly,
}

impl GoalPeriod {
    /// Nominal length of one period.
    ///
    /// Daily windows follow the local calendar, so a DST day may be 23 or
    /// 25 hours long; this is the nominal value only.
    pub fn nominal_length(&self) -> Duration {
        match self {
            Self::Daily => Duration::days(1),
            Self::Weekly => Duration::days(7),
        }
    }

    /// Return the period as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

impl fmt::Display for GoalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GoalPeriod {
    type Err = lockin_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            _ => Err(lockin_core::AppError::validation(format!(
                "Invalid goal period: '{s}'. Expected one of: daily, weekly"
            ))),
        }
    }
}
