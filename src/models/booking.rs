use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::FieldError;

pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_CONFIRMED: &str = "Confirmed";

/// A persisted booking row. `status` is free text; the application only
/// ever writes `Pending` or `Confirmed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(default)]
    pub id: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_number: String,
    #[serde(default)]
    pub status: String,
}

impl Booking {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        validate_customer(&self.customer_name, &self.customer_number)
    }

    pub fn occupies(&self, date: NaiveDate, time: &str) -> bool {
        self.date == date && self.time == time
    }
}

/// Input for a new booking. The id is assigned by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingForm {
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl BookingForm {
    pub fn for_slot(date: NaiveDate, time: &str) -> Self {
        Self {
            date: Some(date),
            time: time.to_string(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<NaiveDate, Vec<FieldError>> {
        let mut errors = match validate_customer(&self.customer_name, &self.customer_number) {
            Ok(()) => vec![],
            Err(errors) => errors,
        };
        match self.date {
            Some(date) if errors.is_empty() => Ok(date),
            Some(_) => Err(errors),
            None => {
                errors.insert(0, FieldError::new("date", "Date is required."));
                Err(errors)
            }
        }
    }
}

fn validate_customer(name: &str, number: &str) -> Result<(), Vec<FieldError>> {
    let mut errors = vec![];
    if name.trim().is_empty() {
        errors.push(FieldError::new("customer_name", "Customer name is required."));
    }
    if number.trim().is_empty() {
        errors.push(FieldError::new("customer_number", "Customer number is required."));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, number: &str) -> BookingForm {
        BookingForm {
            date: NaiveDate::from_ymd_opt(2025, 6, 16),
            time: "10:00".to_string(),
            customer_name: name.to_string(),
            customer_number: number.to_string(),
            status: None,
        }
    }

    #[test]
    fn test_valid_form() {
        let date = form("Alice", "555-0100").validate().unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 16).unwrap());
    }

    #[test]
    fn test_missing_name() {
        let errors = form("", "555-0100").validate().unwrap_err();
        assert_eq!(errors, vec![FieldError::new("customer_name", "Customer name is required.")]);
    }

    #[test]
    fn test_blank_number_counts_as_missing() {
        let errors = form("Alice", "   ").validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "customer_number");
    }

    #[test]
    fn test_reports_every_missing_field() {
        let mut f = form("", "");
        f.date = None;
        let fields: Vec<_> = f.validate().unwrap_err().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["date", "customer_name", "customer_number"]);
    }

    #[test]
    fn test_occupies_matches_date_and_time() {
        let booking = Booking {
            id: 1,
            date: NaiveDate::from_ymd_opt(2025, 6, 16).unwrap(),
            time: "9:00".to_string(),
            customer_name: "Alice".to_string(),
            customer_number: "555-0100".to_string(),
            status: STATUS_PENDING.to_string(),
        };
        assert!(booking.occupies(booking.date, "9:00"));
        assert!(!booking.occupies(booking.date, "09:00"));
        assert!(!booking.occupies(booking.date.succ_opt().unwrap(), "9:00"));
    }
}
