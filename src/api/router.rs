use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::api::middleware::{require_auth, AppState};

pub fn build_router(state: AppState) -> Router {
    // Protected routes (require a valid agent session)
    let protected = Router::new()
        .route("/api/auth/logout", post(api::auth::logout))
        .route("/api/auth/session", get(api::auth::get_session))
        .route("/api/slots", get(api::slots::list_slots))
        .route("/api/slots", post(api::slots::create_slot))
        .route("/api/slots/:id", patch(api::slots::update_slot))
        .route("/api/slots/:id", delete(api::slots::delete_slot))
        .route("/api/agenda", get(api::slots::get_agenda))
        .route(
            "/api/appointments",
            post(api::appointments::create_appointment_as_agent),
        )
        .route(
            "/api/notifications/count",
            get(api::notifications::get_notification_count),
        )
        .route(
            "/api/notifications",
            get(api::notifications::list_notifications),
        )
        .route(
            "/api/notifications/weekly",
            get(api::notifications::get_weekly_meetings),
        )
        .route(
            "/api/notifications/:appointment_id/viewed",
            post(api::notifications::mark_notification_viewed),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Public routes: login plus the shared booking agenda
    let public = Router::new()
        .route("/api/auth/login", post(api::auth::login))
        .route(
            "/api/public/agents/:agent_id/slots",
            get(api::bookings::get_public_slots),
        )
        .route(
            "/api/public/agents/:agent_id/appointments",
            get(api::bookings::get_public_appointments),
        )
        .route(
            "/api/public/agents/:agent_id/appointments",
            post(api::bookings::create_public_appointment),
        )
        .route(
            "/api/public/agents/:agent_id/my-bookings",
            get(api::bookings::get_my_bookings),
        );

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
