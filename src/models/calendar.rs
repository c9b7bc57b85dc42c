use chrono::NaiveDate;
use serde::Serialize;

pub const CALENDAR_DAYS: i64 = 7;
pub const FIRST_HOUR: u32 = 9;
pub const LAST_HOUR: u32 = 21;

/// Label used for an hourly slot, e.g. `9:00` or `14:00`.
pub fn slot_label(hour: u32) -> String {
    format!("{hour}:00")
}

/// One slot in the weekly view. Built per render and never persisted.
/// For an unbooked slot `booking_id` is a display-only placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub time: String,
    pub is_booked: bool,
    pub booking_id: i64,
}
