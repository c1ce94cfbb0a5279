use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{now_rfc3339, Appointment};

/// An availability window an agent publishes on their shared agenda.
///
/// Booking does not mutate the slot; appointments are tracked as a
/// separate entity referencing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub id: String,
    pub agent_id: String,
    pub start_at: String,
    pub end_at: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_available: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Slot {
    pub fn new(
        agent_id: String,
        start_at: String,
        end_at: String,
        title: Option<String>,
        description: Option<String>,
    ) -> Self {
        let now = now_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            agent_id,
            start_at,
            end_at,
            title,
            description,
            is_available: true,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateSlotRequest {
    pub start_at: String,
    pub end_at: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSlotRequest {
    pub start_at: Option<String>,
    pub end_at: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_available: Option<bool>,
}

/// One entry of an agent's private calendar: free slots and booked time
/// merged into a single ordered list.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgendaEntry {
    Available { slot: Slot },
    Booked { slot_id: String, appointment: Appointment },
}

impl AgendaEntry {
    pub fn start_at(&self) -> &str {
        match self {
            AgendaEntry::Available { slot } => &slot.start_at,
            AgendaEntry::Booked { appointment, .. } => &appointment.start_at,
        }
    }
}
