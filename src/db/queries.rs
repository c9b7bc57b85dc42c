use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::Booking;

const DATE_FORMAT: &str = "%Y-%m-%d";

const BOOKING_COLUMNS: &str = "id, date, time, customer_name, customer_number, status";

// ── Bookings ──

pub fn list_bookings(conn: &Connection) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY id ASC"
    ))?;

    let rows = stmt.query_map([], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn get_booking_by_id(conn: &Connection, id: i64) -> anyhow::Result<Option<Booking>> {
    let booking = conn
        .query_row(
            &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"),
            params![id],
            |row| Ok(parse_booking_row(row)),
        )
        .optional()?;

    booking.transpose()
}

pub fn booking_exists(conn: &Connection, id: i64) -> anyhow::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM bookings WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// True when the same customer already holds a booking for this date and time.
/// A different customer in the same slot does not count. Stored dates match
/// on their day part only.
pub fn customer_holds_slot(
    conn: &Connection,
    date: &NaiveDate,
    time: &str,
    customer_name: &str,
    customer_number: &str,
) -> anyhow::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM bookings
         WHERE substr(date, 1, 10) = ?1 AND time = ?2 AND customer_name = ?3 AND customer_number = ?4",
        params![
            date.format(DATE_FORMAT).to_string(),
            time,
            customer_name,
            customer_number
        ],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Inserts a row and returns its store-assigned id.
pub fn insert_booking(
    conn: &Connection,
    date: &NaiveDate,
    time: &str,
    customer_name: &str,
    customer_number: &str,
    status: &str,
) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO bookings (date, time, customer_name, customer_number, status)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            date.format(DATE_FORMAT).to_string(),
            time,
            customer_name,
            customer_number,
            status
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Overwrites every column of the row. Returns the number of rows written.
pub fn update_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<usize> {
    let count = conn.execute(
        "UPDATE bookings
         SET date = ?1, time = ?2, customer_name = ?3, customer_number = ?4, status = ?5
         WHERE id = ?6",
        params![
            booking.date.format(DATE_FORMAT).to_string(),
            booking.time,
            booking.customer_name,
            booking.customer_number,
            booking.status,
            booking.id
        ],
    )?;
    Ok(count)
}

pub fn delete_booking(conn: &Connection, id: i64) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM bookings WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let date_str: String = row.get(1)?;
    // Rows written with a time-of-day suffix still match on the date part.
    let date = NaiveDate::parse_from_str(date_str.get(..10).unwrap_or(&date_str), DATE_FORMAT)?;

    Ok(Booking {
        id: row.get(0)?,
        date,
        time: row.get(2)?,
        customer_name: row.get(3)?,
        customer_number: row.get(4)?,
        status: row.get(5)?,
    })
}
