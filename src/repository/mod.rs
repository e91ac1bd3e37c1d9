//! Repository layer for database operations

pub mod bookings;
pub mod salons;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Booking, ExistingBooking, NewBooking, Salon, SalonService},
    services::store::{BookingStore, CatalogSource},
};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub salons: salons::SalonsRepository,
    pub bookings: bookings::BookingsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            salons: salons::SalonsRepository::new(pool.clone()),
            bookings: bookings::BookingsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check database connectivity
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CatalogSource for Repository {
    async fn salon(&self, salon_id: i32) -> AppResult<Salon> {
        self.salons.get_by_id(salon_id).await
    }

    async fn salon_services(&self, salon_id: i32) -> AppResult<Vec<SalonService>> {
        self.salons.list_services(salon_id).await
    }
}

#[async_trait]
impl BookingStore for Repository {
    async fn existing_bookings(&self, salon_id: i32, date: NaiveDate) -> AppResult<Vec<ExistingBooking>> {
        self.bookings.existing_for_date(salon_id, date).await
    }

    async fn create_booking(&self, booking: &NewBooking) -> AppResult<Booking> {
        self.bookings.create(booking).await
    }

    async fn customer_bookings(&self, customer_id: i32) -> AppResult<Vec<Booking>> {
        self.bookings.list_for_customer(customer_id).await
    }

    async fn cancel_booking(&self, booking_id: i32, customer_id: i32) -> AppResult<Booking> {
        self.bookings.cancel(booking_id, customer_id).await
    }
}
