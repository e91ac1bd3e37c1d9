//! Contracts of the external collaborators the booking engine relies on

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    models::{Booking, ExistingBooking, NewBooking, Salon, SalonService},
};

/// Salon profile and service catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn salon(&self, salon_id: i32) -> AppResult<Salon>;

    async fn salon_services(&self, salon_id: i32) -> AppResult<Vec<SalonService>>;
}

/// Persistent booking store.
///
/// `create_booking` must check and insert atomically for the salon and date:
/// at most one confirmed booking may exist per overlapping interval, even
/// under concurrent submissions. A lost race is reported as
/// [`crate::error::AppError::BookingConflict`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Occupancy windows of confirmed bookings for one salon and date
    async fn existing_bookings(&self, salon_id: i32, date: NaiveDate) -> AppResult<Vec<ExistingBooking>>;

    async fn create_booking(&self, booking: &NewBooking) -> AppResult<Booking>;

    async fn customer_bookings(&self, customer_id: i32) -> AppResult<Vec<Booking>>;

    async fn cancel_booking(&self, booking_id: i32, customer_id: i32) -> AppResult<Booking>;
}

/// A booking snapshot that could not be fetched is reported as a network
/// failure, whatever the store's own error was
pub(crate) fn snapshot_fetch_error(err: AppError) -> AppError {
    match err {
        AppError::Network(_) => err,
        other => AppError::Network(other.to_string()),
    }
}
