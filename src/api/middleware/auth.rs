use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::middleware::error::ApiError;
use crate::database::Database;
use crate::models::{Agent, Session};
use crate::services::{BookingLedger, BookingService, NotificationService};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub session_duration_hours: i64,
    pub booking_service: BookingService,
    pub notification_service: NotificationService,
    pub ledger: BookingLedger,
}

/// The acting agent, resolved from the Bearer session token and passed
/// explicitly to every owner-scoped operation.
#[derive(Clone)]
pub struct AuthenticatedAgent {
    pub agent: Agent,
    pub session: Session,
    pub token: String,
}

/// Extract and validate the session token from the Authorization header.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = auth_header
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)?;

    let session = state
        .db
        .get_session_by_token(token)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if session.is_expired() {
        // Delete expired session
        state.db.delete_session(token).await.ok();
        return Err(ApiError::Unauthorized);
    }

    let agent = state
        .db
        .get_agent_by_id(&session.agent_id)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let token_owned = token.to_string();

    request.extensions_mut().insert(AuthenticatedAgent {
        agent,
        session,
        token: token_owned,
    });

    Ok(next.run(request).await)
}
