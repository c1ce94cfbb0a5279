use serde::Serialize;

use crate::models::Appointment;

/// Notification status derived from an appointment's `viewed_at` marker.
/// The transition is one-way: New -> Viewed, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    New,
    Viewed,
}

impl Appointment {
    pub fn notification_status(&self) -> NotificationStatus {
        if self.viewed_at.is_none() {
            NotificationStatus::New
        } else {
            NotificationStatus::Viewed
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NotificationCountResponse {
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct MarkViewedResponse {
    /// False when the appointment had already been viewed; the caller
    /// keeps its displayed counter untouched in that case.
    pub updated: bool,
}
