use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::api::middleware::{ApiResult, AppState, AuthenticatedAgent};
use crate::models::{AgendaEntry, CreateSlotRequest, Slot, UpdateSlotRequest};

pub async fn list_slots(
    State(state): State<AppState>,
    axum::Extension(auth_agent): axum::Extension<AuthenticatedAgent>,
) -> ApiResult<Json<Vec<Slot>>> {
    let slots = state.db.get_slots_by_agent(&auth_agent.agent.id).await?;

    Ok(Json(slots))
}

pub async fn create_slot(
    State(state): State<AppState>,
    axum::Extension(auth_agent): axum::Extension<AuthenticatedAgent>,
    Json(request): Json<CreateSlotRequest>,
) -> ApiResult<(StatusCode, Json<Slot>)> {
    let slot = state
        .booking_service
        .create_slot(&auth_agent.agent.id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(slot)))
}

pub async fn update_slot(
    State(state): State<AppState>,
    axum::Extension(auth_agent): axum::Extension<AuthenticatedAgent>,
    Path(slot_id): Path<String>,
    Json(request): Json<UpdateSlotRequest>,
) -> ApiResult<Json<Slot>> {
    let slot = state
        .booking_service
        .update_slot(&auth_agent.agent.id, &slot_id, request)
        .await?;

    Ok(Json(slot))
}

pub async fn delete_slot(
    State(state): State<AppState>,
    axum::Extension(auth_agent): axum::Extension<AuthenticatedAgent>,
    Path(slot_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .booking_service
        .delete_slot(&auth_agent.agent.id, &slot_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// The agent's private calendar: free and booked time in one ordered list.
pub async fn get_agenda(
    State(state): State<AppState>,
    axum::Extension(auth_agent): axum::Extension<AuthenticatedAgent>,
) -> ApiResult<Json<Vec<AgendaEntry>>> {
    let entries = state
        .booking_service
        .get_agent_agenda(&auth_agent.agent.id)
        .await?;

    Ok(Json(entries))
}
