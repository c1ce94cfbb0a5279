use time::{Duration, OffsetDateTime, Time, UtcOffset};

use crate::api::middleware::error::{ApiError, ApiResult};
use crate::database::Database;
use crate::models::{format_rfc3339, now_rfc3339, Appointment};

/// Unviewed notification lists are capped so the agent UI never renders
/// an unbounded backlog; older entries surface as the list is worked down.
const UNVIEWED_LIST_LIMIT: i32 = 10;

/// Notification Engine: unacknowledged bookings and upcoming weekly
/// meetings, derived entirely from the appointments table.
#[derive(Clone)]
pub struct NotificationService {
    db: Database,
}

impl NotificationService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn count_unviewed(&self, agent_id: &str) -> ApiResult<i64> {
        self.db.count_unviewed_appointments(agent_id).await
    }

    /// Unviewed bookings, newest first, capped at 10.
    pub async fn list_unviewed(&self, agent_id: &str) -> ApiResult<Vec<Appointment>> {
        self.db
            .get_unviewed_appointments(agent_id, UNVIEWED_LIST_LIMIT)
            .await
    }

    /// Appointments starting inside the current Monday-to-Monday week,
    /// earliest first.
    pub async fn weekly_meetings(&self, agent_id: &str) -> ApiResult<Vec<Appointment>> {
        let (from, to) = week_bounds(OffsetDateTime::now_utc());
        self.db
            .get_appointments_in_window(agent_id, &from, &to)
            .await
    }

    /// One-way NEW -> VIEWED transition for a booking notification.
    /// Returns whether the marker was actually written: false means the
    /// appointment had already been viewed, which is a no-op, not an
    /// error, so callers can skip decrementing their counter.
    pub async fn mark_viewed(&self, agent_id: &str, appointment_id: &str) -> ApiResult<bool> {
        let (_, owner_id) = self
            .db
            .get_appointment_with_owner(appointment_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Appointment not found".to_string()))?;

        if owner_id != agent_id {
            return Err(ApiError::NotOwner(
                "Appointment belongs to another agent".to_string(),
            ));
        }

        let updated = self
            .db
            .mark_appointment_viewed(appointment_id, &now_rfc3339())
            .await?;

        Ok(updated > 0)
    }
}

/// Half-open [Monday 00:00:00, next Monday 00:00:00) window of the week
/// containing `now`, in UTC.
pub fn week_bounds(now: OffsetDateTime) -> (String, String) {
    let now = now.to_offset(UtcOffset::UTC);
    let days_from_monday = i64::from(now.weekday().number_days_from_monday());
    let monday = (now - Duration::days(days_from_monday)).replace_time(Time::MIDNIGHT);
    let next_monday = monday + Duration::days(7);

    (format_rfc3339(monday), format_rfc3339(next_monday))
}
