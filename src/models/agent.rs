use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::now_rfc3339;

/// An authenticated agency user who owns slots and receives bookings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub email: String,
    pub first_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Agent {
    pub fn new(email: String, first_name: String, password_hash: String) -> Self {
        let now = now_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            first_name,
            password_hash,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AgentResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Agent> for AgentResponse {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id.clone(),
            email: agent.email.clone(),
            first_name: agent.first_name.clone(),
            created_at: agent.created_at.clone(),
            updated_at: agent.updated_at.clone(),
        }
    }
}
