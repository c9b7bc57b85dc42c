use chrono::{Duration, NaiveDate};

use crate::models::{slot_label, Booking, CalendarCell, CALENDAR_DAYS, FIRST_HOUR, LAST_HOUR};

/// Lays out the week starting at `today` as hourly cells, day-major.
///
/// A booked cell carries the id of the first booking found for its slot.
/// Unbooked cells get placeholder ids counting up from one past the highest
/// existing booking id, in the order the cells are produced.
pub fn build_calendar(today: NaiveDate, bookings: &[Booking]) -> Vec<CalendarCell> {
    let mut next_placeholder = bookings.iter().map(|b| b.id).max().map_or(1, |max| max + 1);
    let mut cells = Vec::with_capacity((CALENDAR_DAYS as usize) * (LAST_HOUR - FIRST_HOUR + 1) as usize);

    for day_offset in 0..CALENDAR_DAYS {
        let date = today + Duration::days(day_offset);

        for hour in FIRST_HOUR..=LAST_HOUR {
            let time = slot_label(hour);

            let cell = match bookings.iter().find(|b| b.occupies(date, &time)) {
                Some(booking) => CalendarCell {
                    date,
                    time,
                    is_booked: true,
                    booking_id: booking.id,
                },
                None => {
                    let booking_id = next_placeholder;
                    next_placeholder += 1;
                    CalendarCell {
                        date,
                        time,
                        is_booked: false,
                        booking_id,
                    }
                }
            };
            cells.push(cell);
        }
    }

    cells
}
