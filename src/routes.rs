use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/calendar", get(handlers::calendar::calendar_page))
        .route("/api/calendar", get(handlers::calendar::get_calendar))
        .route("/api/bookings", post(handlers::bookings::create_booking))
        .route("/api/bookings/new", get(handlers::bookings::new_booking_form))
        .route(
            "/api/bookings/:id",
            get(handlers::bookings::get_booking).post(handlers::bookings::update_booking),
        )
        .route(
            "/api/bookings/:id/delete",
            get(handlers::bookings::delete_confirmation).post(handlers::bookings::delete_booking),
        )
        .route(
            "/api/bookings/:id/book",
            get(handlers::bookings::book_prompt).post(handlers::bookings::book_submit),
        )
        .route(
            "/api/bookings/:id/confirmed",
            get(handlers::bookings::booking_confirmed),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
