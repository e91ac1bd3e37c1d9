//! Salon profile, service catalog and booking snapshot lookups

use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    error::AppResult,
    models::{ExistingBooking, Salon, SalonService},
    services::store::{BookingStore, CatalogSource},
};

#[derive(Clone)]
pub struct CatalogService {
    source: Arc<dyn CatalogSource>,
    store: Arc<dyn BookingStore>,
}

impl CatalogService {
    pub fn new(source: Arc<dyn CatalogSource>, store: Arc<dyn BookingStore>) -> Self {
        Self { source, store }
    }

    pub async fn get_salon(&self, salon_id: i32) -> AppResult<Salon> {
        self.source.salon(salon_id).await
    }

    pub async fn list_services(&self, salon_id: i32) -> AppResult<Vec<SalonService>> {
        // Verify salon exists
        self.source.salon(salon_id).await?;
        self.source.salon_services(salon_id).await
    }

    /// Existing-booking snapshot for a salon and date
    pub async fn existing_bookings(&self, salon_id: i32, date: NaiveDate) -> AppResult<Vec<ExistingBooking>> {
        self.source.salon(salon_id).await?;
        self.store.existing_bookings(salon_id, date).await
    }
}
