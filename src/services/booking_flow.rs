use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::{Booking, BookingForm, STATUS_PENDING};
use crate::services::store::BookingStore;

/// What the "Book" page shows for a selected calendar cell.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BookPrompt {
    /// The cell's id does not resolve, so the customer is offered a form
    /// for a new booking in that slot.
    New { booking_id: i64, form: BookingForm },
    /// The id belongs to an existing booking; the caller is sent to its
    /// confirmation page. The booking itself is left untouched.
    Existing { booking_id: i64 },
}

fn check_id(id: i64) -> Result<(), AppError> {
    if id <= 0 {
        return Err(AppError::BadRequest(format!("invalid booking id: {id}")));
    }
    Ok(())
}

/// The slot's date and time are only needed when the id is unknown.
pub fn prepare_booking(
    store: &dyn BookingStore,
    id: i64,
    date: Option<&str>,
    time: Option<&str>,
) -> Result<BookPrompt, AppError> {
    check_id(id)?;

    if let Some(existing) = store.find_by_id(id)? {
        return Ok(BookPrompt::Existing {
            booking_id: existing.id,
        });
    }

    let date = date.ok_or_else(|| AppError::BadRequest("date is required".to_string()))?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("invalid date: {date}")))?;
    let time = time.ok_or_else(|| AppError::BadRequest("time is required".to_string()))?;

    Ok(BookPrompt::New {
        booking_id: id,
        form: BookingForm::for_slot(date, time),
    })
}

/// Submits the "Book" form. An unknown id creates a `Pending` booking; a
/// known id returns the existing booking unchanged. Either way the result
/// is the booking whose confirmation should be shown.
pub fn submit_booking(
    store: &dyn BookingStore,
    id: i64,
    form: BookingForm,
) -> Result<Booking, AppError> {
    check_id(id)?;

    if let Some(existing) = store.find_by_id(id)? {
        tracing::debug!(id, status = %existing.status, "booking already exists, showing confirmation");
        return Ok(existing);
    }

    store.create(BookingForm {
        status: Some(STATUS_PENDING.to_string()),
        ..form
    })
}

pub fn confirmation(store: &dyn BookingStore, id: i64) -> Result<Booking, AppError> {
    store.find_by_id(id)?.ok_or(AppError::NotFound(id))
}
