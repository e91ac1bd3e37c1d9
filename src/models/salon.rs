//! Salon models (profile, operating hours, service catalog)

use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// Salon
// ---------------------------------------------------------------------------

/// Salon profile as stored in the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Salon {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    /// Daily opening time
    #[schema(value_type = String, example = "09:00:00")]
    pub opening_time: NaiveTime,
    /// Daily closing time
    #[schema(value_type = String, example = "18:00:00")]
    pub closing_time: NaiveTime,
    pub crea_date: Option<DateTime<Utc>>,
}

impl Salon {
    pub fn hours(&self) -> OperatingHours {
        OperatingHours {
            opens: self.opening_time,
            closes: self.closing_time,
        }
    }
}

/// Daily operating window of a salon.
///
/// `opens >= closes` is tolerated and simply produces no bookable slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingHours {
    pub opens: NaiveTime,
    pub closes: NaiveTime,
}

impl OperatingHours {
    pub fn new(opens: NaiveTime, closes: NaiveTime) -> Self {
        Self { opens, closes }
    }

    pub fn is_degenerate(&self) -> bool {
        self.closes <= self.opens
    }
}

// ---------------------------------------------------------------------------
// SalonService
// ---------------------------------------------------------------------------

/// A bookable service offered by a salon (haircut, colouring, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SalonService {
    pub id: i32,
    pub salon_id: i32,
    pub name: String,
    pub price: Decimal,
    /// Duration in minutes, always positive
    pub duration_minutes: i32,
}
