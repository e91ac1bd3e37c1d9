//! Bookable slot computation for a salon and date

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::{
    config::SchedulingConfig,
    error::AppResult,
    models::{AvailabilityResponse, Salon, SalonService},
    scheduling::{annotate, slot_starts, BookingSnapshot, EvaluationInput, SelectedServiceSet, ServiceTotals},
    services::{
        clock::Clock,
        store::{snapshot_fetch_error, BookingStore, CatalogSource},
    },
};

#[derive(Clone)]
pub struct AvailabilityService {
    catalog: Arc<dyn CatalogSource>,
    store: Arc<dyn BookingStore>,
    clock: Arc<dyn Clock>,
    settings: SchedulingConfig,
}

impl AvailabilityService {
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

    /// Annotated slots, reconciled choice and totals for one salon and date
    pub async fn availability(
        &self,
        salon_id: i32,
        date: NaiveDate,
        selection: &SelectedServiceSet,
        chosen: Option<NaiveTime>,
    ) -> AppResult<AvailabilityResponse> {
        let salon = self.catalog.salon(salon_id).await?;
        let services = self.catalog.salon_services(salon_id).await?;
        let bookings = self
            .store
            .existing_bookings(salon_id, date)
            .await
            .map_err(|err| {
                tracing::warn!(salon_id, %date, error = %err, "Booking snapshot fetch failed");
                snapshot_fetch_error(err)
            })?;

        Ok(compute_availability(
            &salon,
            &services,
            &BookingSnapshot::Resolved(bookings),
            date,
            selection,
            chosen,
            self.clock.now(),
            &self.settings,
        ))
    }
}

/// Pure composition of slot generation, totals, conflict evaluation and
/// reconciliation
#[allow(clippy::too_many_arguments)]
pub fn compute_availability(
    salon: &Salon,
    services: &[SalonService],
    snapshot: &BookingSnapshot,
    date: NaiveDate,
    selection: &SelectedServiceSet,
    chosen: Option<NaiveTime>,
    now: NaiveDateTime,
    settings: &SchedulingConfig,
) -> AvailabilityResponse {
    let hours = salon.hours();
    if hours.is_degenerate() {
        tracing::debug!(salon_id = salon.id, "Salon has no opening window, no availability");
    }

    let starts: Vec<NaiveTime> = slot_starts(hours, settings.step()).collect();
    let totals = ServiceTotals::aggregate(selection, services);
    let (slots, chosen) = annotate(&EvaluationInput {
        starts: &starts,
        date,
        total_duration: totals.duration(),
        bookings: snapshot,
        now,
        chosen,
        policy: settings.snapshot_policy,
    });

    tracing::debug!(
        salon_id = salon.id,
        %date,
        slots = slots.len(),
        available = slots.iter().filter(|s| s.is_available()).count(),
        "Computed availability"
    );

    AvailabilityResponse {
        salon_id: salon.id,
        date,
        slots,
        chosen,
        total_duration_minutes: totals.duration_minutes,
        total_price: totals.price,
        unknown_service_ids: totals.unknown_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        models::ExistingBooking,
        services::{
            clock::FixedClock,
            store::{MockBookingStore, MockCatalogSource},
        },
    };
    use mockall::predicate::eq;
    use rust_decimal::Decimal;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 3).unwrap()
    }

    fn salon(opens: NaiveTime, closes: NaiveTime) -> Salon {
        Salon {
            id: 7,
            name: "Studio Nord".to_string(),
            address: None,
            opening_time: opens,
            closing_time: closes,
            crea_date: None,
        }
    }

    fn services() -> Vec<SalonService> {
        vec![
            SalonService {
                id: 1,
                salon_id: 7,
                name: "Cut".to_string(),
                price: Decimal::new(3000, 2),
                duration_minutes: 30,
            },
            SalonService {
                id: 2,
                salon_id: 7,
                name: "Colour".to_string(),
                price: Decimal::new(6500, 2),
                duration_minutes: 60,
            },
        ]
    }

    fn catalog_mock(opens: NaiveTime, closes: NaiveTime) -> MockCatalogSource {
        let mut catalog = MockCatalogSource::new();
        catalog
            .expect_salon()
            .with(eq(7))
            .returning(move |_| Ok(salon(opens, closes)));
        catalog.expect_salon_services().returning(|_| Ok(services()));
        catalog
    }

    #[tokio::test]
    async fn test_availability_marks_conflicts_and_reconciles() {
        let mut store = MockBookingStore::new();
        store
            .expect_existing_bookings()
            .with(eq(7), eq(day()))
            .times(1)
            .returning(|_, _| Ok(vec![ExistingBooking::new(hm(10, 0), 30)]));

        let service = AvailabilityService::new(
            Arc::new(catalog_mock(hm(9, 0), hm(12, 0))),
            Arc::new(store),
            Arc::new(FixedClock(day().and_time(hm(7, 0)))),
            SchedulingConfig::default(),
        );

        let selection: SelectedServiceSet = [2].into_iter().collect();
        let response = service
            .availability(7, day(), &selection, Some(hm(9, 30)))
            .await
            .unwrap();

        assert_eq!(response.total_duration_minutes, 60);
        assert_eq!(response.total_price, Decimal::new(6500, 2));
        let disabled: Vec<_> = response
            .slots
            .iter()
            .filter(|s| s.disabled)
            .map(|s| s.start_time)
            .collect();
        assert_eq!(disabled, vec![hm(9, 30), hm(10, 0)]);
        // 09:30 collides with the 10:00 booking, first free slot wins
        assert_eq!(response.chosen, Some(hm(9, 0)));
        assert!(response.slots[0].within_selected_range);
    }

    #[tokio::test]
    async fn test_unknown_salon_propagates_not_found() {
        let mut catalog = MockCatalogSource::new();
        catalog
            .expect_salon()
            .returning(|id| Err(AppError::NotFound(format!("Salon {} not found", id))));
        let mut store = MockBookingStore::new();
        store.expect_existing_bookings().never();

        let service = AvailabilityService::new(
            Arc::new(catalog),
            Arc::new(store),
            Arc::new(FixedClock(day().and_time(hm(7, 0)))),
            SchedulingConfig::default(),
        );

        let result = service
            .availability(99, day(), &SelectedServiceSet::new(), None)
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_failed_snapshot_fetch_is_a_network_error() {
        let mut store = MockBookingStore::new();
        store
            .expect_existing_bookings()
            .times(1)
            .returning(|_, _| Err(AppError::Database(sqlx::Error::PoolTimedOut)));

        let service = AvailabilityService::new(
            Arc::new(catalog_mock(hm(9, 0), hm(12, 0))),
            Arc::new(store),
            Arc::new(FixedClock(day().and_time(hm(7, 0)))),
            SchedulingConfig::default(),
        );

        let result = service
            .availability(7, day(), &SelectedServiceSet::new(), None)
            .await;
        assert!(matches!(result, Err(AppError::Network(_))));
    }

    #[test]
    fn test_degenerate_hours_give_no_slots() {
        let response = compute_availability(
            &salon(hm(18, 0), hm(9, 0)),
            &services(),
            &BookingSnapshot::Resolved(vec![]),
            day(),
            &SelectedServiceSet::new(),
            Some(hm(10, 0)),
            day().and_time(hm(7, 0)),
            &SchedulingConfig::default(),
        );
        assert!(response.slots.is_empty());
        assert_eq!(response.chosen, None);
    }

    #[test]
    fn test_unknown_services_are_reported() {
        let selection: SelectedServiceSet = [1, 5].into_iter().collect();
        let response = compute_availability(
            &salon(hm(9, 0), hm(10, 0)),
            &services(),
            &BookingSnapshot::Resolved(vec![]),
            day(),
            &selection,
            None,
            day().and_time(hm(7, 0)),
            &SchedulingConfig::default(),
        );
        assert_eq!(response.unknown_service_ids, vec![5]);
        assert_eq!(response.total_duration_minutes, 30);
        assert_eq!(response.chosen, Some(hm(9, 0)));
    }
}
