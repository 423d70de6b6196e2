//! Hunger classification from the time of the last feeding.
//!
//! The classifier is a pure function of elapsed time. Thresholds are checked
//! in ascending order and the first bucket whose upper bound exceeds the
//! elapsed time wins; anything past the last bound is [`HungerStatus::Starving`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Discrete hunger level reported by the cat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum HungerStatus {
    Full,
    Satisfied,
    SlightlySatisfied,
    Hungry,
    Starving,
}

impl HungerStatus {
    /// What the cat says in this state.
    pub fn message(self) -> &'static str {
        match self {
            Self::Full => "Ah! That was a good meal! 😋",
            Self::Satisfied => "My belly is satisfied",
            Self::SlightlySatisfied => "My belly is satisfied, for now...",
            Self::Hungry => "Hey, feed me! >:|",
            Self::Starving => "Feed me, I'm starving!!! 😱🍔",
        }
    }

    /// Wire label, identical to the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Satisfied => "satisfied",
            Self::SlightlySatisfied => "slightlySatisfied",
            Self::Hungry => "hungry",
            Self::Starving => "starving",
        }
    }
}

impl std::fmt::Display for HungerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status plus the matching message, as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HungerReport {
    #[schema(example = "My belly is satisfied")]
    pub message: String,
    pub status: HungerStatus,
}

impl From<HungerStatus> for HungerReport {
    fn from(status: HungerStatus) -> Self {
        Self {
            message: status.message().to_owned(),
            status,
        }
    }
}

/// Upper bounds (exclusive, in hours) for each bucket, in evaluation order.
const THRESHOLDS: [(i64, HungerStatus); 4] = [
    (2, HungerStatus::Full),
    (3, HungerStatus::Satisfied),
    (4, HungerStatus::SlightlySatisfied),
    (6, HungerStatus::Hungry),
];

/// Classify the hunger level `now - last_fed_at` after a feeding.
///
/// A feeding recorded in the future yields a negative elapsed time and is
/// therefore [`HungerStatus::Full`].
///
/// # Examples
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use chatte_backend::domain::{classify, HungerStatus};
///
/// let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
/// let report = classify(now - Duration::minutes(150), now);
/// assert_eq!(report.status, HungerStatus::Satisfied);
/// assert_eq!(report.message, "My belly is satisfied");
/// ```
pub fn classify(last_fed_at: DateTime<Utc>, now: DateTime<Utc>) -> HungerReport {
    let elapsed = now.signed_duration_since(last_fed_at);
    THRESHOLDS
        .iter()
        .find(|(hours, _)| elapsed < Duration::hours(*hours))
        .map_or(HungerStatus::Starving, |(_, status)| *status)
        .into()
}
