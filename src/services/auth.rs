use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::api::middleware::error::{ApiError, ApiResult};
use crate::database::Database;
use crate::models::{Agent, Session};

pub struct AuthResult {
    pub agent: Agent,
    pub session: Session,
}

/// Hash password using Argon2id with the crate's default parameters.
pub fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Store(format!("Password hashing failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Verify password against an Argon2id hash.
pub fn verify_password(password: &str, hash: &str) -> ApiResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| ApiError::Store("Invalid password hash format".to_string()))?;

    let argon2 = Argon2::default();

    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Generate secure random token for sessions (32 bytes = 64 hex characters).
pub fn generate_session_token() -> String {
    use rand::Rng;
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}

/// Check credentials and open a session for the agent. Wrong email and
/// wrong password are indistinguishable to the caller.
pub async fn authenticate(
    db: &Database,
    email: &str,
    password: &str,
    session_duration_hours: i64,
) -> ApiResult<AuthResult> {
    let agent = db
        .get_agent_by_email(email)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if !verify_password(password, &agent.password_hash)? {
        return Err(ApiError::Unauthorized);
    }

    let session = Session::new(
        agent.id.clone(),
        generate_session_token(),
        session_duration_hours,
    );
    db.create_session(&session).await?;

    tracing::info!("Agent {} logged in", agent.id);

    Ok(AuthResult { agent, session })
}
