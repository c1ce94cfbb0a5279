use axum::{extract::State, http::StatusCode, Json};

use crate::api::middleware::{ApiResult, AppState, AuthenticatedAgent};
use crate::models::{AgentResponse, LoginRequest, LoginResponse};
use crate::services::auth;

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let auth_result = auth::authenticate(
        &state.db,
        &request.email,
        &request.password,
        state.session_duration_hours,
    )
    .await?;

    Ok(Json(LoginResponse {
        token: auth_result.session.token,
        expires_at: auth_result.session.expires_at,
        agent: AgentResponse::from(&auth_result.agent),
    }))
}

pub async fn logout(
    State(state): State<AppState>,
    axum::Extension(auth_agent): axum::Extension<AuthenticatedAgent>,
) -> ApiResult<StatusCode> {
    state.db.delete_session(&auth_agent.token).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_session(
    axum::Extension(auth_agent): axum::Extension<AuthenticatedAgent>,
) -> ApiResult<Json<AgentResponse>> {
    Ok(Json(AgentResponse::from(&auth_agent.agent)))
}
