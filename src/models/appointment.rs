use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::now_rfc3339;

/// A confirmed booking against an agent's availability.
///
/// `start_at`/`end_at` duplicate the booked interval; `viewed_at` is the
/// one-way notification marker set when the owning agent dismisses the
/// corresponding notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub slot_id: String,
    pub start_at: String,
    pub end_at: String,
    pub model_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub instagram: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub viewed_at: Option<String>,
}

impl Appointment {
    pub fn new(slot_id: String, start_at: String, end_at: String, model_name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            slot_id,
            start_at,
            end_at,
            model_name,
            email: None,
            phone: None,
            instagram: None,
            notes: None,
            created_at: now_rfc3339(),
            viewed_at: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateAppointmentRequest {
    pub slot_id: String,
    pub start_at: String,
    pub end_at: String,
    pub model_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub instagram: Option<String>,
    pub notes: Option<String>,
}

/// Occupied interval as exposed on the public agenda. Personal fields of
/// the underlying appointment are never sent to other visitors.
#[derive(Debug, Clone, Serialize)]
pub struct BusyInterval {
    pub id: String,
    pub slot_id: String,
    pub start_at: String,
    pub end_at: String,
}

impl From<&Appointment> for BusyInterval {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id.clone(),
            slot_id: appointment.slot_id.clone(),
            start_at: appointment.start_at.clone(),
            end_at: appointment.end_at.clone(),
        }
    }
}
