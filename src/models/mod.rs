//! Data models for the salon booking server

pub mod booking;
pub mod customer;
pub mod salon;
pub mod slot;

// Re-export commonly used types
pub use booking::{Booking, BookingDraft, CreateBooking, DraftField, ExistingBooking, NewBooking};
pub use customer::CustomerClaims;
pub use salon::{OperatingHours, Salon, SalonService};
pub use slot::{AvailabilityQuery, AvailabilityResponse, CandidateSlot};

use chrono::{NaiveDate, NaiveTime};

use crate::error::{AppError, AppResult};

/// Parse a `YYYY-MM-DD` date coming from a request
pub fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date '{}' (use YYYY-MM-DD)", value)))
}

/// Parse a `HH:MM` (or `HH:MM:SS`) time coming from a request
pub fn parse_time(value: &str) -> AppResult<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| AppError::Validation(format!("Invalid time '{}' (use HH:MM)", value)))
}

/// Parse a comma separated id list such as `3,7`
pub fn parse_id_list(value: &str) -> AppResult<Vec<i32>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i32>()
                .map_err(|_| AppError::Validation(format!("Invalid service id '{}'", part)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_formats() {
        assert_eq!(parse_time("09:30").unwrap(), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(parse_time("09:30:00").unwrap(), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert!(parse_time("9h30").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2026-04-01").unwrap(), NaiveDate::from_ymd_opt(2026, 4, 1).unwrap());
        assert!(parse_date("01/04/2026").is_err());
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("3, 7,").unwrap(), vec![3, 7]);
        assert_eq!(parse_id_list("").unwrap(), Vec::<i32>::new());
        assert!(parse_id_list("3,x").is_err());
    }
}
