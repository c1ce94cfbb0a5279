use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{format_rfc3339, parse_rfc3339};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub agent_id: String,
    pub token: String,
    pub expires_at: String,
    pub created_at: String,
}

impl Session {
    pub fn new(agent_id: String, token: String, duration_hours: i64) -> Self {
        let now = time::OffsetDateTime::now_utc();
        let expires_at = now + time::Duration::hours(duration_hours);

        Self {
            id: Uuid::new_v4().to_string(),
            agent_id,
            token,
            expires_at: format_rfc3339(expires_at),
            created_at: format_rfc3339(now),
        }
    }

    pub fn is_expired(&self) -> bool {
        match parse_rfc3339(&self.expires_at) {
            Ok(expires_at) => expires_at < time::OffsetDateTime::now_utc(),
            Err(_) => true,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
    pub agent: crate::models::AgentResponse,
}
