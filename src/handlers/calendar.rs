use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::Json;
use chrono::Local;

use crate::auth::{Caller, Role};
use crate::errors::AppError;
use crate::models::CalendarCell;
use crate::services::calendar::build_calendar;
use crate::state::AppState;

static CALENDAR_HTML: &str = include_str!("../web/calendar.html");

pub async fn calendar_page() -> Html<&'static str> {
    Html(CALENDAR_HTML)
}

// GET /api/calendar
pub async fn get_calendar(
    State(state): State<Arc<AppState>>,
    caller: Caller,
) -> Result<Json<Vec<CalendarCell>>, AppError> {
    caller.require(Role::Customer)?;

    let bookings = state.store.list_all()?;
    let today = Local::now().date_naive();

    Ok(Json(build_calendar(today, &bookings)))
}
