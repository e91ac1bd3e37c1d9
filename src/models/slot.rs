//! Candidate slot models and availability request/response types

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A bookable start time annotated for the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CandidateSlot {
    #[schema(value_type = String, example = "09:30:00")]
    pub start_time: NaiveTime,
    /// Slot is in the past or its occupancy window collides with a booking
    pub disabled: bool,
    /// Slot lies inside the occupancy window of the chosen slot (display only)
    pub within_selected_range: bool,
}

impl CandidateSlot {
    pub fn is_available(&self) -> bool {
        !self.disabled
    }
}

/// Query parameters for the availability endpoint
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    /// Date to compute slots for (YYYY-MM-DD)
    pub date: String,
    /// Comma separated service ids (e.g. `3,7`)
    pub service_ids: Option<String>,
    /// Currently chosen start time (HH:MM)
    pub chosen: Option<String>,
}

/// Annotated slots for one salon and date
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityResponse {
    pub salon_id: i32,
    pub date: NaiveDate,
    pub slots: Vec<CandidateSlot>,
    /// Chosen slot after reconciliation, `null` when nothing is available
    #[schema(value_type = Option<String>)]
    pub chosen: Option<NaiveTime>,
    pub total_duration_minutes: i64,
    pub total_price: Decimal,
    /// Requested service ids that the salon does not offer
    pub unknown_service_ids: Vec<i32>,
}
