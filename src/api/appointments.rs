use axum::{extract::State, http::StatusCode, Json};

use crate::api::middleware::{ApiResult, AppState, AuthenticatedAgent};
use crate::models::{Appointment, CreateAppointmentRequest};

/// Book on a visitor's behalf. Same overlap contract as the public path,
/// plus ownership of the referenced slot.
pub async fn create_appointment_as_agent(
    State(state): State<AppState>,
    axum::Extension(auth_agent): axum::Extension<AuthenticatedAgent>,
    Json(request): Json<CreateAppointmentRequest>,
) -> ApiResult<(StatusCode, Json<Appointment>)> {
    let appointment = state
        .booking_service
        .create_appointment_as_agent(&auth_agent.agent.id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}
