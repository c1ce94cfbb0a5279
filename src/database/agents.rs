use sqlx::Row;

use crate::api::middleware::error::ApiResult;
use crate::database::Database;
use crate::models::Agent;

impl Database {
    pub async fn create_agent(&self, agent: &Agent) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO agents (id, email, first_name, password_hash, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&agent.id)
        .bind(&agent.email)
        .bind(&agent.first_name)
        .bind(&agent.password_hash)
        .bind(&agent.created_at)
        .bind(&agent.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_agent_by_id(&self, id: &str) -> ApiResult<Option<Agent>> {
        let row = sqlx::query(
            "SELECT id, email, first_name, password_hash, created_at, updated_at
             FROM agents
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| row_to_agent(&row)).transpose()
    }

    pub async fn get_agent_by_email(&self, email: &str) -> ApiResult<Option<Agent>> {
        let row = sqlx::query(
            "SELECT id, email, first_name, password_hash, created_at, updated_at
             FROM agents
             WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| row_to_agent(&row)).transpose()
    }
}

fn row_to_agent(row: &sqlx::any::AnyRow) -> ApiResult<Agent> {
    Ok(Agent {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        first_name: row.try_get("first_name")?,
        password_hash: row.try_get("password_hash")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
