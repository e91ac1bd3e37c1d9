//! Business logic services

pub mod availability;
pub mod bookings;
pub mod catalog;
pub mod clock;
pub mod session;
pub mod store;

use std::sync::Arc;

use crate::{config::SchedulingConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub availability: availability::AvailabilityService,
    pub bookings: bookings::BookingsService,
    pub repository: Repository,
}

impl Services {
    /// Create all services backed by the given repository
    pub fn new(repository: Repository, scheduling: SchedulingConfig, clock: Arc<dyn clock::Clock>) -> Self {
        let catalog_source: Arc<dyn store::CatalogSource> = Arc::new(repository.clone());
        let booking_store: Arc<dyn store::BookingStore> = Arc::new(repository.clone());

        Self {
            catalog: catalog::CatalogService::new(catalog_source.clone(), booking_store.clone()),
            availability: availability::AvailabilityService::new(
                catalog_source.clone(),
                booking_store.clone(),
                clock.clone(),
                scheduling.clone(),
            ),
            bookings: bookings::BookingsService::new(catalog_source, booking_store, clock, scheduling),
            repository,
        }
    }
}
