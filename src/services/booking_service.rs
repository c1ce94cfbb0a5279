use crate::api::middleware::error::{ApiError, ApiResult};
use crate::database::Database;
use crate::models::{
    format_rfc3339, now_rfc3339, parse_rfc3339, AgendaEntry, Appointment,
    CreateAppointmentRequest, CreateSlotRequest, Slot, UpdateSlotRequest,
};

/// Booking Engine: merges agent availability with existing appointments,
/// validates booking requests and performs the write. Overlap is
/// agent-wide and half-open, so a booking ending exactly when another
/// starts does not conflict.
#[derive(Clone)]
pub struct BookingService {
    db: Database,
}

impl BookingService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Slots a visitor can still book: available, not yet started,
    /// earliest first.
    pub async fn get_available_slots(&self, agent_id: &str) -> ApiResult<Vec<Slot>> {
        self.db.get_available_slots(agent_id, &now_rfc3339()).await
    }

    /// Future appointments under the agent's slots. The presentation
    /// layer merges these with available slots so a visitor cannot pick
    /// an interval someone else already booked.
    pub async fn get_existing_appointments(&self, agent_id: &str) -> ApiResult<Vec<Appointment>> {
        self.db.get_future_appointments(agent_id, &now_rfc3339()).await
    }

    /// Anonymous booking against an agent's shared agenda.
    pub async fn create_appointment(
        &self,
        agent_id: &str,
        request: CreateAppointmentRequest,
    ) -> ApiResult<Appointment> {
        let slot = match self.db.get_slot_by_id(&request.slot_id).await? {
            Some(slot) if slot.agent_id == agent_id => slot,
            // A stale or tampered slot reference reads the same as a
            // slot that was withdrawn: pick another time.
            _ => {
                return Err(ApiError::Conflict(
                    "Slot is no longer available".to_string(),
                ))
            }
        };

        self.book_slot(&slot, request).await
    }

    /// Same contract as `create_appointment`, used when an authenticated
    /// agent books on a visitor's behalf. The acting agent must own the
    /// referenced slot.
    pub async fn create_appointment_as_agent(
        &self,
        agent_id: &str,
        request: CreateAppointmentRequest,
    ) -> ApiResult<Appointment> {
        let slot = self
            .db
            .get_slot_by_id(&request.slot_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Slot not found".to_string()))?;

        if slot.agent_id != agent_id {
            return Err(ApiError::NotOwner(
                "Slot belongs to another agent".to_string(),
            ));
        }

        self.book_slot(&slot, request).await
    }

    async fn book_slot(
        &self,
        slot: &Slot,
        request: CreateAppointmentRequest,
    ) -> ApiResult<Appointment> {
        if request.model_name.trim().is_empty() {
            return Err(ApiError::Validation("Name is required".to_string()));
        }

        let (start_at, end_at) = validate_interval(&request.start_at, &request.end_at)?;

        if !slot.is_available {
            return Err(ApiError::Conflict(
                "Slot is no longer available".to_string(),
            ));
        }

        // The booked interval must lie within the slot it references.
        if start_at < slot.start_at || end_at > slot.end_at {
            return Err(ApiError::Validation(
                "Requested time is outside the slot".to_string(),
            ));
        }

        let mut appointment = Appointment::new(
            slot.id.clone(),
            start_at,
            end_at,
            request.model_name.trim().to_string(),
        );
        appointment.email = request.email;
        appointment.phone = request.phone;
        appointment.instagram = request.instagram;
        appointment.notes = request.notes;

        self.db
            .insert_appointment_checked(&slot.agent_id, &appointment)
            .await?;

        tracing::info!(
            "Appointment {} booked for agent {} ({} - {})",
            appointment.id,
            slot.agent_id,
            appointment.start_at,
            appointment.end_at
        );

        Ok(appointment)
    }

    /// The agent's private calendar: their slots and booked appointments
    /// merged into one list ordered by start instant.
    pub async fn get_agent_agenda(&self, agent_id: &str) -> ApiResult<Vec<AgendaEntry>> {
        let slots = self.db.get_slots_by_agent(agent_id).await?;
        let appointments = self.db.get_appointments_by_agent(agent_id).await?;

        let mut entries: Vec<AgendaEntry> = slots
            .into_iter()
            .map(|slot| AgendaEntry::Available { slot })
            .collect();
        entries.extend(appointments.into_iter().map(|appointment| AgendaEntry::Booked {
            slot_id: appointment.slot_id.clone(),
            appointment,
        }));

        entries.sort_by(|a, b| a.start_at().cmp(b.start_at()));

        Ok(entries)
    }

    pub async fn create_slot(&self, agent_id: &str, request: CreateSlotRequest) -> ApiResult<Slot> {
        let (start_at, end_at) = validate_interval(&request.start_at, &request.end_at)?;

        if start_at < now_rfc3339() {
            return Err(ApiError::Validation(
                "Slot cannot start in the past".to_string(),
            ));
        }

        let slot = Slot::new(
            agent_id.to_string(),
            start_at,
            end_at,
            request.title,
            request.description,
        );
        self.db.create_slot(&slot).await?;

        Ok(slot)
    }

    pub async fn update_slot(
        &self,
        agent_id: &str,
        slot_id: &str,
        request: UpdateSlotRequest,
    ) -> ApiResult<Slot> {
        let mut slot = self
            .db
            .get_slot_by_id(slot_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Slot not found".to_string()))?;

        if slot.agent_id != agent_id {
            return Err(ApiError::NotOwner(
                "Slot belongs to another agent".to_string(),
            ));
        }

        if let Some(start_at) = request.start_at {
            slot.start_at = start_at;
        }
        if let Some(end_at) = request.end_at {
            slot.end_at = end_at;
        }
        let (start_at, end_at) = validate_interval(&slot.start_at, &slot.end_at)?;
        slot.start_at = start_at;
        slot.end_at = end_at;

        if let Some(title) = request.title {
            slot.title = Some(title);
        }
        if let Some(description) = request.description {
            slot.description = Some(description);
        }
        if let Some(is_available) = request.is_available {
            slot.is_available = is_available;
        }
        slot.updated_at = now_rfc3339();

        let updated = self.db.update_slot(&slot).await?;
        if updated == 0 {
            return Err(ApiError::NotFound("Slot not found".to_string()));
        }

        Ok(slot)
    }

    pub async fn delete_slot(&self, agent_id: &str, slot_id: &str) -> ApiResult<()> {
        let slot = self
            .db
            .get_slot_by_id(slot_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Slot not found".to_string()))?;

        if slot.agent_id != agent_id {
            return Err(ApiError::NotOwner(
                "Slot belongs to another agent".to_string(),
            ));
        }

        self.db.delete_slot(slot_id, agent_id).await?;

        Ok(())
    }
}

/// Parse and normalize a caller-supplied interval, enforcing end > start.
fn validate_interval(start_at: &str, end_at: &str) -> ApiResult<(String, String)> {
    let start = parse_rfc3339(start_at)
        .map_err(|_| ApiError::Validation("Invalid start time".to_string()))?;
    let end = parse_rfc3339(end_at)
        .map_err(|_| ApiError::Validation("Invalid end time".to_string()))?;

    if end <= start {
        return Err(ApiError::Validation(
            "End time must be after start time".to_string(),
        ));
    }

    Ok((format_rfc3339(start), format_rfc3339(end)))
}
