use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::middleware::{ApiResult, AppState, AuthenticatedAgent};
use crate::models::{Appointment, MarkViewedResponse, NotificationCountResponse};

pub async fn get_notification_count(
    State(state): State<AppState>,
    axum::Extension(auth_agent): axum::Extension<AuthenticatedAgent>,
) -> ApiResult<Json<NotificationCountResponse>> {
    let count = state
        .notification_service
        .count_unviewed(&auth_agent.agent.id)
        .await?;

    Ok(Json(NotificationCountResponse { count }))
}

pub async fn list_notifications(
    State(state): State<AppState>,
    axum::Extension(auth_agent): axum::Extension<AuthenticatedAgent>,
) -> ApiResult<Json<Vec<Appointment>>> {
    let notifications = state
        .notification_service
        .list_unviewed(&auth_agent.agent.id)
        .await?;

    Ok(Json(notifications))
}

pub async fn get_weekly_meetings(
    State(state): State<AppState>,
    axum::Extension(auth_agent): axum::Extension<AuthenticatedAgent>,
) -> ApiResult<Json<Vec<Appointment>>> {
    let meetings = state
        .notification_service
        .weekly_meetings(&auth_agent.agent.id)
        .await?;

    Ok(Json(meetings))
}

pub async fn mark_notification_viewed(
    State(state): State<AppState>,
    axum::Extension(auth_agent): axum::Extension<AuthenticatedAgent>,
    Path(appointment_id): Path<String>,
) -> ApiResult<Json<MarkViewedResponse>> {
    let updated = state
        .notification_service
        .mark_viewed(&auth_agent.agent.id, &appointment_id)
        .await?;

    Ok(Json(MarkViewedResponse { updated }))
}
