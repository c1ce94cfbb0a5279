use sqlx::Row;

use crate::api::middleware::error::ApiResult;
use crate::database::Database;
use crate::models::Slot;

impl Database {
    pub async fn create_slot(&self, slot: &Slot) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO slots (id, agent_id, start_at, end_at, title, description, is_available, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&slot.id)
        .bind(&slot.agent_id)
        .bind(&slot.start_at)
        .bind(&slot.end_at)
        .bind(&slot.title)
        .bind(&slot.description)
        .bind(if slot.is_available { 1 } else { 0 })
        .bind(&slot.created_at)
        .bind(&slot.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_slot_by_id(&self, id: &str) -> ApiResult<Option<Slot>> {
        let row = sqlx::query(
            "SELECT id, agent_id, start_at, end_at, title, description, is_available, created_at, updated_at
             FROM slots
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| row_to_slot(&row)).transpose()
    }

    /// Slots a visitor may book: available and not yet started.
    pub async fn get_available_slots(&self, agent_id: &str, now: &str) -> ApiResult<Vec<Slot>> {
        let rows = sqlx::query(
            "SELECT id, agent_id, start_at, end_at, title, description, is_available, created_at, updated_at
             FROM slots
             WHERE agent_id = ? AND is_available = 1 AND start_at >= ?
             ORDER BY start_at ASC",
        )
        .bind(agent_id)
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_slot).collect()
    }

    pub async fn get_slots_by_agent(&self, agent_id: &str) -> ApiResult<Vec<Slot>> {
        let rows = sqlx::query(
            "SELECT id, agent_id, start_at, end_at, title, description, is_available, created_at, updated_at
             FROM slots
             WHERE agent_id = ?
             ORDER BY start_at ASC",
        )
        .bind(agent_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_slot).collect()
    }

    /// Owner-scoped update: the WHERE clause filters on both id and
    /// agent_id, so a non-owner update touches zero rows.
    pub async fn update_slot(&self, slot: &Slot) -> ApiResult<u64> {
        let result = sqlx::query(
            "UPDATE slots
             SET start_at = ?, end_at = ?, title = ?, description = ?, is_available = ?, updated_at = ?
             WHERE id = ? AND agent_id = ?",
        )
        .bind(&slot.start_at)
        .bind(&slot.end_at)
        .bind(&slot.title)
        .bind(&slot.description)
        .bind(if slot.is_available { 1 } else { 0 })
        .bind(&slot.updated_at)
        .bind(&slot.id)
        .bind(&slot.agent_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_slot(&self, id: &str, agent_id: &str) -> ApiResult<u64> {
        let result = sqlx::query("DELETE FROM slots WHERE id = ? AND agent_id = ?")
            .bind(id)
            .bind(agent_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

fn row_to_slot(row: &sqlx::any::AnyRow) -> ApiResult<Slot> {
    let is_available: i32 = row.try_get("is_available")?;

    Ok(Slot {
        id: row.try_get("id")?,
        agent_id: row.try_get("agent_id")?,
        start_at: row.try_get("start_at")?,
        end_at: row.try_get("end_at")?,
        title: row.try_get("title").ok(),
        description: row.try_get("description").ok(),
        is_available: is_available != 0,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
