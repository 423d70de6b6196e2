//! Feeding event record and listing filters.

use chrono::{DateTime, Days, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A single feeding.
///
/// `id` and `time` are assigned by the service when the event is recorded.
/// `user_id` is only checked against existing users at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[schema(example = "0d6f8e1e-0f3a-4c3e-9f6b-8d1b2a7c4e5f")]
    pub id: Uuid,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: Uuid,
    #[schema(example = "Ada fed chungus!")]
    pub message: String,
    pub time: DateTime<Utc>,
}

/// Which events a listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventWindow {
    /// Every recorded event.
    All,
    /// Events whose time falls in `[start, end)`.
    Between {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl EventWindow {
    /// The UTC calendar day containing `now`.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use chatte_backend::domain::EventWindow;
    ///
    /// let now = Utc.with_ymd_and_hms(2026, 3, 1, 17, 45, 0).unwrap();
    /// let EventWindow::Between { start, end } = EventWindow::day_of(now) else {
    ///     panic!("expected a bounded window");
    /// };
    /// assert_eq!(start, Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap());
    /// assert_eq!(end, Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap());
    /// ```
    pub fn day_of(now: DateTime<Utc>) -> Self {
        let day = now.date_naive();
        let start = day.and_time(chrono::NaiveTime::MIN).and_utc();
        // Only the last representable day has no successor.
        let end = day
            .checked_add_days(Days::new(1))
            .map_or(DateTime::<Utc>::MAX_UTC, |next| {
                next.and_time(chrono::NaiveTime::MIN).and_utc()
            });
        Self::Between { start, end }
    }

    /// Whether `time` falls inside the window.
    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Between { start, end } => *start <= time && time < *end,
        }
    }
}
