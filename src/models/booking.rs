//! Booking models (committed bookings, drafts, create requests)

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Booking status stored in `bookings.status`
pub const STATUS_CONFIRMED: &str = "confirmed";
pub const STATUS_CANCELLED: &str = "cancelled";

/// Committed occupancy window for a (salon, date) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ExistingBooking {
    #[schema(value_type = String, example = "10:00:00")]
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
}

impl ExistingBooking {
    pub fn new(start_time: NaiveTime, duration_minutes: i32) -> Self {
        Self {
            start_time,
            duration_minutes,
        }
    }
}

/// Booking row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: i32,
    pub salon_id: i32,
    pub customer_id: i32,
    pub service_ids: Vec<i32>,
    pub booking_date: NaiveDate,
    #[schema(value_type = String, example = "10:00:00")]
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
    pub total_price: Decimal,
    pub notes: Option<String>,
    pub status: String,
    pub crea_date: Option<DateTime<Utc>>,
}

/// Create booking request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateBooking {
    pub salon_id: i32,
    /// Booking date (YYYY-MM-DD)
    pub date: Option<String>,
    /// Start time (HH:MM)
    pub start_time: Option<String>,
    #[serde(default)]
    pub service_ids: Vec<i32>,
    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

/// Payload handed to the booking store once a draft passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub salon_id: i32,
    pub customer_id: i32,
    pub service_ids: Vec<i32>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub total_duration_minutes: i32,
    pub total_price: Decimal,
    pub notes: Option<String>,
}

/// Draft fields checked before a booking is submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Date,
    StartTime,
    ServiceIds,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DraftField::Date => "date",
            DraftField::StartTime => "start_time",
            DraftField::ServiceIds => "service_ids",
        };
        f.write_str(name)
    }
}

/// In-progress booking selection of a customer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingDraft {
    pub date: Option<NaiveDate>,
    pub chosen_start: Option<NaiveTime>,
    pub service_ids: BTreeSet<i32>,
    pub notes: String,
}

impl BookingDraft {
    /// Date and start time of a complete draft, or the first missing field
    pub fn ready(&self) -> Result<(NaiveDate, NaiveTime), DraftField> {
        let date = self.date.ok_or(DraftField::Date)?;
        let start = self.chosen_start.ok_or(DraftField::StartTime)?;
        if self.service_ids.is_empty() {
            return Err(DraftField::ServiceIds);
        }
        Ok((date, start))
    }

    pub fn missing_field(&self) -> Option<DraftField> {
        self.ready().err()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Notes as sent to the store (empty notes are omitted)
    pub fn notes(&self) -> Option<String> {
        let trimmed = self.notes.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}
