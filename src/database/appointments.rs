use sqlx::Row;

use crate::api::middleware::error::{ApiError, ApiResult};
use crate::database::Database;
use crate::models::Appointment;

const APPOINTMENT_COLUMNS: &str =
    "a.id, a.slot_id, a.start_at, a.end_at, a.model_name, a.email, a.phone, a.instagram, a.notes, a.created_at, a.viewed_at";

impl Database {
    /// Transactional check-and-insert. The overlap check against every
    /// appointment under the same agent runs in the same transaction as
    /// the insert, so two racing visitors cannot both pass it; exact
    /// duplicate intervals are additionally rejected by the
    /// UNIQUE(slot_id, start_at, end_at) constraint.
    pub async fn insert_appointment_checked(
        &self,
        agent_id: &str,
        appointment: &Appointment,
    ) -> ApiResult<()> {
        let mut tx = self.pool.begin().await?;

        let slot_row = sqlx::query(
            "SELECT is_available FROM slots WHERE id = ? AND agent_id = ?",
        )
        .bind(&appointment.slot_id)
        .bind(agent_id)
        .fetch_optional(&mut *tx)
        .await?;

        let available = match slot_row {
            Some(row) => row.try_get::<i32, _>("is_available")? != 0,
            None => false,
        };
        if !available {
            return Err(ApiError::Conflict(
                "Slot is no longer available".to_string(),
            ));
        }

        // Half-open overlap: existing.start < new.end AND new.start < existing.end
        let overlap_row = sqlx::query(
            "SELECT COUNT(*) AS overlapping
             FROM appointments a
             JOIN slots s ON a.slot_id = s.id
             WHERE s.agent_id = ? AND a.start_at < ? AND ? < a.end_at",
        )
        .bind(agent_id)
        .bind(&appointment.end_at)
        .bind(&appointment.start_at)
        .fetch_one(&mut *tx)
        .await?;

        let overlapping: i64 = overlap_row.try_get("overlapping")?;
        if overlapping > 0 {
            return Err(ApiError::Conflict(
                "The selected time is no longer available".to_string(),
            ));
        }

        sqlx::query(
            "INSERT INTO appointments (id, slot_id, start_at, end_at, model_name, email, phone, instagram, notes, created_at, viewed_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&appointment.id)
        .bind(&appointment.slot_id)
        .bind(&appointment.start_at)
        .bind(&appointment.end_at)
        .bind(&appointment.model_name)
        .bind(&appointment.email)
        .bind(&appointment.phone)
        .bind(&appointment.instagram)
        .bind(&appointment.notes)
        .bind(&appointment.created_at)
        .bind(&appointment.viewed_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    /// All appointments under the agent's slots that have not ended yet,
    /// earliest first.
    pub async fn get_future_appointments(
        &self,
        agent_id: &str,
        now: &str,
    ) -> ApiResult<Vec<Appointment>> {
        let rows = sqlx::query(&format!(
            "SELECT {APPOINTMENT_COLUMNS}
             FROM appointments a
             JOIN slots s ON a.slot_id = s.id
             WHERE s.agent_id = ? AND a.end_at > ?
             ORDER BY a.start_at ASC"
        ))
        .bind(agent_id)
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_appointment).collect()
    }

    pub async fn get_appointments_by_agent(&self, agent_id: &str) -> ApiResult<Vec<Appointment>> {
        let rows = sqlx::query(&format!(
            "SELECT {APPOINTMENT_COLUMNS}
             FROM appointments a
             JOIN slots s ON a.slot_id = s.id
             WHERE s.agent_id = ?
             ORDER BY a.start_at ASC"
        ))
        .bind(agent_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_appointment).collect()
    }

    /// Returns the appointment together with the id of the agent whose
    /// slot it books, for ownership checks.
    pub async fn get_appointment_with_owner(
        &self,
        id: &str,
    ) -> ApiResult<Option<(Appointment, String)>> {
        let row = sqlx::query(&format!(
            "SELECT {APPOINTMENT_COLUMNS}, s.agent_id AS owner_id
             FROM appointments a
             JOIN slots s ON a.slot_id = s.id
             WHERE a.id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            let appointment = row_to_appointment(&row)?;
            let owner_id: String = row.try_get("owner_id")?;
            Ok(Some((appointment, owner_id)))
        } else {
            Ok(None)
        }
    }

    pub async fn count_unviewed_appointments(&self, agent_id: &str) -> ApiResult<i64> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS unviewed
             FROM appointments a
             JOIN slots s ON a.slot_id = s.id
             WHERE s.agent_id = ? AND a.viewed_at IS NULL",
        )
        .bind(agent_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.try_get("unviewed")?)
    }

    pub async fn get_unviewed_appointments(
        &self,
        agent_id: &str,
        limit: i32,
    ) -> ApiResult<Vec<Appointment>> {
        let rows = sqlx::query(&format!(
            "SELECT {APPOINTMENT_COLUMNS}
             FROM appointments a
             JOIN slots s ON a.slot_id = s.id
             WHERE s.agent_id = ? AND a.viewed_at IS NULL
             ORDER BY a.created_at DESC
             LIMIT ?"
        ))
        .bind(agent_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_appointment).collect()
    }

    /// Appointments starting inside [from, to), earliest first.
    pub async fn get_appointments_in_window(
        &self,
        agent_id: &str,
        from: &str,
        to: &str,
    ) -> ApiResult<Vec<Appointment>> {
        let rows = sqlx::query(&format!(
            "SELECT {APPOINTMENT_COLUMNS}
             FROM appointments a
             JOIN slots s ON a.slot_id = s.id
             WHERE s.agent_id = ? AND a.start_at >= ? AND a.start_at < ?
             ORDER BY a.start_at ASC"
        ))
        .bind(agent_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_appointment).collect()
    }

    /// Sets the viewed marker if and only if it is still unset. Returns
    /// the number of rows touched: 0 means the appointment was already
    /// viewed (or gone), which callers treat as a no-op.
    pub async fn mark_appointment_viewed(&self, id: &str, viewed_at: &str) -> ApiResult<u64> {
        let result = sqlx::query(
            "UPDATE appointments SET viewed_at = ? WHERE id = ? AND viewed_at IS NULL",
        )
        .bind(viewed_at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

fn row_to_appointment(row: &sqlx::any::AnyRow) -> ApiResult<Appointment> {
    Ok(Appointment {
        id: row.try_get("id")?,
        slot_id: row.try_get("slot_id")?,
        start_at: row.try_get("start_at")?,
        end_at: row.try_get("end_at")?,
        model_name: row.try_get("model_name")?,
        email: row.try_get("email").ok(),
        phone: row.try_get("phone").ok(),
        instagram: row.try_get("instagram").ok(),
        notes: row.try_get("notes").ok(),
        created_at: row.try_get("created_at")?,
        viewed_at: row.try_get("viewed_at").ok(),
    })
}
