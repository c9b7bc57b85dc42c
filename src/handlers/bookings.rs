use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::auth::{Caller, Role};
use crate::errors::AppError;
use crate::models::{Booking, BookingForm};
use crate::services::booking_flow::{self, BookPrompt};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SlotQuery {
    pub date: NaiveDate,
    pub time: String,
}

#[derive(Deserialize)]
pub struct BookQuery {
    pub date: Option<String>,
    pub time: Option<String>,
}

fn confirmation_url(id: i64) -> String {
    format!("/api/bookings/{id}/confirmed")
}

fn find_or_404(state: &AppState, id: i64) -> Result<Booking, AppError> {
    state.store.find_by_id(id)?.ok_or(AppError::NotFound(id))
}

// GET /api/bookings/new
pub async fn new_booking_form(
    caller: Caller,
    Query(slot): Query<SlotQuery>,
) -> Result<Json<BookingForm>, AppError> {
    caller.require(Role::Customer)?;
    Ok(Json(BookingForm::for_slot(slot.date, &slot.time)))
}

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    caller: Caller,
    Json(form): Json<BookingForm>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    caller.require(Role::Customer)?;

    let booking = state.store.create(form)?;
    Ok((StatusCode::CREATED, Json(booking)))
}

// GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    caller: Caller,
    Path(id): Path<i64>,
) -> Result<Json<Booking>, AppError> {
    caller.require(Role::Admin)?;
    Ok(Json(find_or_404(&state, id)?))
}

// POST /api/bookings/:id
pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    caller: Caller,
    Path(id): Path<i64>,
    Json(booking): Json<Booking>,
) -> Result<Json<Booking>, AppError> {
    caller.require(Role::Admin)?;

    let updated = state.store.update(id, booking)?;
    Ok(Json(updated))
}

// GET /api/bookings/:id/delete
pub async fn delete_confirmation(
    State(state): State<Arc<AppState>>,
    caller: Caller,
    Path(id): Path<i64>,
) -> Result<Json<Booking>, AppError> {
    caller.require(Role::Admin)?;
    Ok(Json(find_or_404(&state, id)?))
}

// POST /api/bookings/:id/delete
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    caller: Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    caller.require(Role::Admin)?;

    state.store.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/bookings/:id/book
pub async fn book_prompt(
    State(state): State<Arc<AppState>>,
    caller: Caller,
    Path(id): Path<i64>,
    Query(slot): Query<BookQuery>,
) -> Result<Response, AppError> {
    caller.require(Role::Customer)?;

    let prompt = booking_flow::prepare_booking(
        state.store.as_ref(),
        id,
        slot.date.as_deref(),
        slot.time.as_deref(),
    )?;
    Ok(match prompt {
        BookPrompt::Existing { booking_id } => {
            Redirect::to(&confirmation_url(booking_id)).into_response()
        }
        new @ BookPrompt::New { .. } => Json(new).into_response(),
    })
}

// POST /api/bookings/:id/book
pub async fn book_submit(
    State(state): State<Arc<AppState>>,
    caller: Caller,
    Path(id): Path<i64>,
    Json(form): Json<BookingForm>,
) -> Result<Redirect, AppError> {
    caller.require(Role::Customer)?;

    let booking = booking_flow::submit_booking(state.store.as_ref(), id, form)?;
    Ok(Redirect::to(&confirmation_url(booking.id)))
}

// GET /api/bookings/:id/confirmed
pub async fn booking_confirmed(
    State(state): State<Arc<AppState>>,
    caller: Caller,
    Path(id): Path<i64>,
) -> Result<Json<Booking>, AppError> {
    caller.require(Role::Customer)?;
    Ok(Json(booking_flow::confirmation(state.store.as_ref(), id)?))
}
