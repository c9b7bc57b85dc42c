use std::sync::{Mutex, MutexGuard};

use anyhow::anyhow;
use rusqlite::Connection;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingForm, STATUS_PENDING};

/// Persisted collection of bookings keyed by integer id.
pub trait BookingStore: Send + Sync {
    /// Every row, in insertion order.
    fn list_all(&self) -> Result<Vec<Booking>, AppError>;

    fn find_by_id(&self, id: i64) -> Result<Option<Booking>, AppError>;

    /// Validates the customer fields, rejects the form if the same customer
    /// already holds this date and time, then persists it under a new id.
    /// A form without a status is stored as `Pending`.
    fn create(&self, form: BookingForm) -> Result<Booking, AppError>;

    /// Fully overwrites the row at `id`. The record's own id must agree.
    fn update(&self, id: i64, booking: Booking) -> Result<Booking, AppError>;

    fn delete(&self, id: i64) -> Result<(), AppError>;
}

pub struct SqliteBookingStore {
    conn: Mutex<Connection>,
}

impl SqliteBookingStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, AppError> {
        self.conn
            .lock()
            .map_err(|_| AppError::Internal(anyhow!("database lock poisoned")))
    }
}

impl BookingStore for SqliteBookingStore {
    fn list_all(&self) -> Result<Vec<Booking>, AppError> {
        let conn = self.conn()?;
        Ok(queries::list_bookings(&conn)?)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Booking>, AppError> {
        let conn = self.conn()?;
        Ok(queries::get_booking_by_id(&conn, id)?)
    }

    fn create(&self, form: BookingForm) -> Result<Booking, AppError> {
        let date = form.validate().map_err(AppError::Validation)?;
        let status = form.status.unwrap_or_else(|| STATUS_PENDING.to_string());

        let mut conn = self.conn()?;
        // Availability check and insert commit together.
        let tx = conn.transaction()?;

        if queries::customer_holds_slot(
            &tx,
            &date,
            &form.time,
            &form.customer_name,
            &form.customer_number,
        )? {
            tracing::warn!(%date, time = %form.time, "slot already held by this customer");
            return Err(AppError::SlotConflict);
        }

        let id = queries::insert_booking(
            &tx,
            &date,
            &form.time,
            &form.customer_name,
            &form.customer_number,
            &status,
        )?;
        tx.commit()?;

        tracing::info!(id, %date, time = %form.time, "booking created");

        Ok(Booking {
            id,
            date,
            time: form.time,
            customer_name: form.customer_name,
            customer_number: form.customer_number,
            status,
        })
    }

    fn update(&self, id: i64, booking: Booking) -> Result<Booking, AppError> {
        if booking.id != id {
            return Err(AppError::NotFound(id));
        }
        booking.validate().map_err(AppError::Validation)?;

        let conn = self.conn()?;
        let written = queries::update_booking(&conn, &booking)?;
        if written == 0 {
            // Nothing written: the row is gone, or another writer to the
            // same database file got in between.
            if !queries::booking_exists(&conn, id)? {
                return Err(AppError::NotFound(id));
            }
            return Err(AppError::ConcurrencyConflict(id));
        }

        tracing::info!(id, date = %booking.date, time = %booking.time, "booking updated");
        Ok(booking)
    }

    fn delete(&self, id: i64) -> Result<(), AppError> {
        let conn = self.conn()?;
        if !queries::delete_booking(&conn, id)? {
            return Err(AppError::NotFound(id));
        }

        tracing::info!(id, "booking deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use chrono::NaiveDate;

    fn setup_store() -> SqliteBookingStore {
        SqliteBookingStore::new(db::init_db(":memory:").unwrap())
    }

    fn form(name: &str, number: &str) -> BookingForm {
        BookingForm {
            date: NaiveDate::from_ymd_opt(2025, 6, 16),
            time: "14:00".to_string(),
            customer_name: name.to_string(),
            customer_number: number.to_string(),
            status: None,
        }
    }

    #[test]
    fn test_create_assigns_ids() {
        let store = setup_store();
        let first = store.create(form("Alice", "555-0100")).unwrap();
        let second = store.create(form("Bob", "555-0101")).unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.status, STATUS_PENDING);
        assert_eq!(store.find_by_id(first.id).unwrap(), Some(first));
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let store = setup_store();
        let err = store.create(form("", "555-0100")).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref e) if e[0].field == "customer_name"));
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_create_rejects_empty_number() {
        let store = setup_store();
        let err = store.create(form("Alice", "")).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref e) if e[0].field == "customer_number"));
    }

    #[test]
    fn test_same_customer_same_slot_conflicts() {
        let store = setup_store();
        store.create(form("Alice", "555-0100")).unwrap();

        let err = store.create(form("Alice", "555-0100")).unwrap_err();
        assert!(matches!(err, AppError::SlotConflict));
        assert_eq!(store.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_different_customer_same_slot_is_accepted() {
        let store = setup_store();
        store.create(form("Alice", "555-0100")).unwrap();
        store.create(form("Bob", "555-0100")).unwrap();

        assert_eq!(store.list_all().unwrap().len(), 2);
    }

    #[test]
    fn test_create_keeps_explicit_status() {
        let store = setup_store();
        let mut f = form("Alice", "555-0100");
        f.status = Some("Confirmed".to_string());
        assert_eq!(store.create(f).unwrap().status, "Confirmed");
    }

    #[test]
    fn test_update_overwrites_row() {
        let store = setup_store();
        let mut booking = store.create(form("Alice", "555-0100")).unwrap();
        booking.time = "15:00".to_string();
        booking.status = "Confirmed".to_string();

        store.update(booking.id, booking.clone()).unwrap();
        assert_eq!(store.find_by_id(booking.id).unwrap(), Some(booking));
    }

    #[test]
    fn test_update_missing_id_is_not_found() {
        let store = setup_store();
        let existing = store.create(form("Alice", "555-0100")).unwrap();
        let mut ghost = existing.clone();
        ghost.id = existing.id + 10;
        ghost.customer_name = "Mallory".to_string();

        let err = store.update(ghost.id, ghost).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(store.list_all().unwrap(), vec![existing]);
    }

    #[test]
    fn test_update_after_delete_elsewhere_is_not_found() {
        let path = std::env::temp_dir().join(format!(
            "barbershop-update-{}.db",
            std::process::id()
        ));
        let path_str = path.to_str().unwrap();
        let _ = std::fs::remove_file(&path);

        let store = SqliteBookingStore::new(db::init_db(path_str).unwrap());
        let other = SqliteBookingStore::new(db::init_db(path_str).unwrap());

        let mut booking = store.create(form("Alice", "555-0100")).unwrap();
        other.delete(booking.id).unwrap();

        booking.time = "15:00".to_string();
        let err = store.update(booking.id, booking).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(store.list_all().unwrap().is_empty());

        drop(store);
        drop(other);
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{path_str}{suffix}"));
        }
    }

    #[test]
    fn test_create_rejects_duplicate_of_row_with_time_of_day() {
        let store = setup_store();
        {
            let conn = store.conn().unwrap();
            conn.execute(
                "INSERT INTO bookings (date, time, customer_name, customer_number, status)
                 VALUES ('2025-06-16 00:00:00', '14:00', 'Alice', '555-0100', 'Pending')",
                [],
            )
            .unwrap();
        }

        let err = store.create(form("Alice", "555-0100")).unwrap_err();
        assert!(matches!(err, AppError::SlotConflict));
        assert_eq!(store.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_update_id_mismatch_is_not_found() {
        let store = setup_store();
        let booking = store.create(form("Alice", "555-0100")).unwrap();

        let err = store.update(booking.id + 1, booking).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_update_validates_fields() {
        let store = setup_store();
        let mut booking = store.create(form("Alice", "555-0100")).unwrap();
        booking.customer_number = String::new();

        let err = store.update(booking.id, booking).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_delete_then_find_is_absent() {
        let store = setup_store();
        let booking = store.create(form("Alice", "555-0100")).unwrap();

        store.delete(booking.id).unwrap();
        assert_eq!(store.find_by_id(booking.id).unwrap(), None);

        let err = store.delete(booking.id).unwrap_err();
        assert!(matches!(err, AppError::NotFound(id) if id == booking.id));
    }
}
