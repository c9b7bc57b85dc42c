pub mod booking;
pub mod calendar;

pub use booking::{Booking, BookingForm, STATUS_CONFIRMED, STATUS_PENDING};
pub use calendar::{slot_label, CalendarCell, CALENDAR_DAYS, FIRST_HOUR, LAST_HOUR};
