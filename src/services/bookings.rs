//! Booking submission and customer booking management

use std::sync::Arc;

use validator::Validate;

use crate::{
    config::SchedulingConfig,
    error::{AppError, AppResult},
    models::{parse_date, parse_time, Booking, BookingDraft, CreateBooking, NewBooking, Salon, SalonService},
    scheduling::{conflict::is_past, slot_starts, ServiceTotals},
    services::{
        clock::Clock,
        store::{BookingStore, CatalogSource},
    },
};

#[derive(Clone)]
pub struct BookingsService {
    catalog: Arc<dyn CatalogSource>,
    store: Arc<dyn BookingStore>,
    clock: Arc<dyn Clock>,
    settings: SchedulingConfig,
}

impl BookingsService {
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        store: Arc<dyn BookingStore>,
        clock: Arc<dyn Clock>,
        settings: SchedulingConfig,
    ) -> Self {
        Self {
            catalog,
            store,
            clock,
            settings,
        }
    }

    /// Validate a create request and submit it to the store
    pub async fn create_booking(&self, customer_id: i32, request: &CreateBooking) -> AppResult<Booking> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let draft = BookingDraft {
            date: request.date.as_deref().map(parse_date).transpose()?,
            chosen_start: request.start_time.as_deref().map(parse_time).transpose()?,
            service_ids: request.service_ids.iter().copied().collect(),
            notes: request.notes.clone().unwrap_or_default(),
        };
        if let Some(field) = draft.missing_field() {
            return Err(AppError::MissingField(field));
        }

        let salon = self.catalog.salon(request.salon_id).await?;
        let services = self.catalog.salon_services(salon.id).await?;
        self.ensure_bookable_start(&salon, &draft)?;

        submit_draft(self.store.as_ref(), salon.id, customer_id, &draft, &services).await
    }

    /// Bookings of the authenticated customer
    pub async fn customer_bookings(&self, customer_id: i32) -> AppResult<Vec<Booking>> {
        self.store.customer_bookings(customer_id).await
    }

    /// Cancel one of the customer's bookings, freeing its interval
    pub async fn cancel_booking(&self, booking_id: i32, customer_id: i32) -> AppResult<Booking> {
        let booking = self.store.cancel_booking(booking_id, customer_id).await?;
        tracing::info!(booking_id, customer_id, "Booking cancelled");
        Ok(booking)
    }

    /// The requested start must be one of the salon's slots and must not lie
    /// before now, on an earlier date or earlier today
    fn ensure_bookable_start(&self, salon: &Salon, draft: &BookingDraft) -> AppResult<()> {
        let (date, start) = draft.ready().map_err(AppError::MissingField)?;

        if !slot_starts(salon.hours(), self.settings.step()).any(|slot| slot == start) {
            return Err(AppError::Validation(format!(
                "start_time {} is not a bookable slot of salon {}",
                start.format("%H:%M"),
                salon.id
            )));
        }
        let now = self.clock.now();
        if date < now.date() || is_past(date, start, now) {
            return Err(AppError::Validation(format!(
                "start_time {} on {} is in the past",
                start.format("%H:%M"),
                date
            )));
        }
        Ok(())
    }
}

/// Validate `draft` and issue exactly one create request to `store`.
///
/// On [`AppError::BookingConflict`] the caller has to reload the booking
/// snapshot and re-evaluate slots before another attempt.
pub async fn submit_draft(
    store: &dyn BookingStore,
    salon_id: i32,
    customer_id: i32,
    draft: &BookingDraft,
    services: &[SalonService],
) -> AppResult<Booking> {
    let (date, start_time) = draft.ready().map_err(AppError::MissingField)?;

    let totals = ServiceTotals::aggregate(&draft.service_ids, services);
    if !totals.unknown_ids.is_empty() {
        return Err(AppError::Validation(format!(
            "Services {:?} are not offered by salon {}",
            totals.unknown_ids, salon_id
        )));
    }
    let total_duration_minutes = i32::try_from(totals.duration_minutes)
        .map_err(|_| AppError::Validation("Selected services are too long".to_string()))?;

    let payload = NewBooking {
        salon_id,
        customer_id,
        service_ids: draft.service_ids.iter().copied().collect(),
        date,
        start_time,
        total_duration_minutes,
        total_price: totals.price,
        notes: draft.notes(),
    };

    match store.create_booking(&payload).await {
        Ok(booking) => {
            tracing::info!(
                booking_id = booking.id,
                salon_id,
                customer_id,
                %date,
                %start_time,
                "Booking created"
            );
            Ok(booking)
        }
        Err(err) => {
            if err.is_conflict() {
                tracing::warn!(salon_id, %date, %start_time, "Booking rejected by store: slot no longer free");
            }
            Err(err)
        }
    }
}
