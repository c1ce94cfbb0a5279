use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use uuid::Uuid;

use crate::api::middleware::{ApiResult, AppState};
use crate::models::{Appointment, BusyInterval, CreateAppointmentRequest, Slot};

const VISITOR_COOKIE: &str = "visitor_id";

/// Open availability of one agent, as seen through the shared link.
pub async fn get_public_slots(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
) -> ApiResult<Json<Vec<Slot>>> {
    let slots = state.booking_service.get_available_slots(&agent_id).await?;

    Ok(Json(slots))
}

/// Occupied intervals under the agent's slots, stripped of personal
/// fields. Merged with the open slots client-side so a visitor cannot
/// select a taken interval.
pub async fn get_public_appointments(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
) -> ApiResult<Json<Vec<BusyInterval>>> {
    let appointments = state
        .booking_service
        .get_existing_appointments(&agent_id)
        .await?;

    let busy = appointments.iter().map(BusyInterval::from).collect();

    Ok(Json(busy))
}

/// Anonymous booking. On success the appointment is also recorded in the
/// visitor's local ledger, keyed by the visitor_id cookie issued here.
pub async fn create_public_appointment(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
    jar: CookieJar,
    Json(request): Json<CreateAppointmentRequest>,
) -> ApiResult<(StatusCode, CookieJar, Json<Appointment>)> {
    let appointment = state
        .booking_service
        .create_appointment(&agent_id, request)
        .await?;

    let (visitor_id, jar) = visitor_identity(jar);
    state
        .ledger
        .for_device(&visitor_id)
        .record(&agent_id, &appointment)
        .await;

    Ok((StatusCode::CREATED, jar, Json(appointment)))
}

/// "Your bookings" for this device, without a login.
pub async fn get_my_bookings(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
    jar: CookieJar,
) -> ApiResult<Json<Vec<Appointment>>> {
    let Some(visitor_id) = known_visitor(&jar) else {
        return Ok(Json(Vec::new()));
    };

    let bookings = state.ledger.for_device(&visitor_id).list(&agent_id).await;

    Ok(Json(bookings))
}

fn known_visitor(jar: &CookieJar) -> Option<String> {
    jar.get(VISITOR_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
        .map(|id| id.to_string())
}

fn visitor_identity(jar: CookieJar) -> (String, CookieJar) {
    if let Some(visitor_id) = known_visitor(&jar) {
        return (visitor_id, jar);
    }

    let visitor_id = Uuid::new_v4().to_string();
    let cookie = Cookie::build((VISITOR_COOKIE, visitor_id.clone()))
        .path("/")
        .http_only(true)
        .build();

    (visitor_id, jar.add(cookie))
}
