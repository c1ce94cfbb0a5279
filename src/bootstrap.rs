use crate::api::middleware::AppState;
use crate::config::Config;
use crate::database::Database;
use crate::models::Agent;
use crate::services::{auth, BookingLedger, BookingService, NotificationService};

/// Create the founding agent from configuration if it does not exist yet.
pub async fn initialize_admin(db: &Database, config: &Config) -> Result<(), String> {
    let existing = db
        .get_agent_by_email(&config.admin_email)
        .await
        .map_err(|e| format!("Failed to look up admin agent: {}", e))?;

    if existing.is_some() {
        tracing::debug!("Admin agent already present");
        return Ok(());
    }

    let password_hash = auth::hash_password(&config.admin_password)
        .map_err(|e| format!("Failed to hash admin password: {}", e))?;

    let agent = Agent::new(
        config.admin_email.clone(),
        "Admin".to_string(),
        password_hash,
    );
    db.create_agent(&agent)
        .await
        .map_err(|e| format!("Failed to create admin agent: {}", e))?;

    tracing::info!("Admin agent {} created", agent.email);

    Ok(())
}

/// Periodically drop expired sessions so the table does not accumulate
/// dead tokens.
pub fn start_session_cleanup(db: Database) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(3600));
        loop {
            interval.tick().await;
            match db.cleanup_expired_sessions().await {
                Ok(0) => {}
                Ok(removed) => tracing::info!("Removed {} expired sessions", removed),
                Err(e) => tracing::warn!("Session cleanup failed: {}", e),
            }
        }
    });
}

pub fn build_app_state(db: Database, config: &Config) -> AppState {
    AppState {
        booking_service: BookingService::new(db.clone()),
        notification_service: NotificationService::new(db.clone()),
        ledger: BookingLedger::new(&config.ledger_dir),
        session_duration_hours: config.session_duration_hours,
        db,
    }
}
