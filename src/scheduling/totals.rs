//! Duration and price totals of the selected services

use std::collections::BTreeSet;

use chrono::Duration;
use rust_decimal::Decimal;

use crate::models::SalonService;

/// Stable ids of the services a customer picked
pub type SelectedServiceSet = BTreeSet<i32>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceTotals {
    pub duration_minutes: i64,
    pub price: Decimal,
    /// Selected ids missing from the catalog; they contribute nothing
    pub unknown_ids: Vec<i32>,
}

impl ServiceTotals {
    /// Sum durations and prices of `selection` against `catalog`.
    ///
    /// Both totals are zero for an empty selection.
    pub fn aggregate(selection: &SelectedServiceSet, catalog: &[SalonService]) -> Self {
        let mut totals = Self::default();
        for id in selection {
            match catalog.iter().find(|service| service.id == *id) {
                Some(service) => {
                    totals.duration_minutes += i64::from(service.duration_minutes.max(0));
                    totals.price += service.price;
                }
                None => totals.unknown_ids.push(*id),
            }
        }
        totals
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(self.duration_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(id: i32, price_cents: i64, minutes: i32) -> SalonService {
        SalonService {
            id,
            salon_id: 1,
            name: format!("service {}", id),
            price: Decimal::new(price_cents, 2),
            duration_minutes: minutes,
        }
    }

    #[test]
    fn test_empty_selection_is_zero() {
        let catalog = vec![service(1, 2500, 30)];
        let totals = ServiceTotals::aggregate(&SelectedServiceSet::new(), &catalog);
        assert_eq!(totals.duration_minutes, 0);
        assert_eq!(totals.price, Decimal::ZERO);
        assert!(totals.unknown_ids.is_empty());
    }

    #[test]
    fn test_sums_selected_services() {
        let catalog = vec![service(1, 2500, 30), service(2, 4550, 45), service(3, 1000, 15)];
        let selection: SelectedServiceSet = [1, 2].into_iter().collect();
        let totals = ServiceTotals::aggregate(&selection, &catalog);
        assert_eq!(totals.duration_minutes, 75);
        assert_eq!(totals.price, Decimal::new(7050, 2));
        assert_eq!(totals.duration(), Duration::minutes(75));
    }

    #[test]
    fn test_unknown_ids_are_reported() {
        let catalog = vec![service(1, 2500, 30)];
        let selection: SelectedServiceSet = [1, 9].into_iter().collect();
        let totals = ServiceTotals::aggregate(&selection, &catalog);
        assert_eq!(totals.duration_minutes, 30);
        assert_eq!(totals.unknown_ids, vec![9]);
    }
}
