//! Stateful booking flow of a single customer
//!
//! A [`BookingSession`] owns the draft and everything the slot list is derived
//! from. Every input change recomputes the whole slot list and then
//! reconciles the chosen slot, so a chosen slot is always an available one.
//!
//! Booking snapshots are fetched asynchronously. Each date change hands out a
//! [`SnapshotTicket`] with a new sequence number and only the response for the
//! latest ticket is applied:
//!
//! ```ignore
//! let ticket = session.set_date(date);
//! let (ticket, result) = load_snapshot(store, ticket).await;
//! session.apply_snapshot(ticket, result)?;
//! ```

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::{
    config::SchedulingConfig,
    error::{AppError, AppResult},
    models::{Booking, BookingDraft, CandidateSlot, ExistingBooking, OperatingHours, Salon, SalonService},
    scheduling::{
        annotate, choose, slot_starts, BookingSnapshot, EvaluationInput, SelectedServiceSet, ServiceTotals,
        SnapshotPolicy,
    },
    services::{
        bookings::submit_draft,
        store::{snapshot_fetch_error, BookingStore},
    },
};

/// Identifies one snapshot request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotTicket {
    pub salon_id: i32,
    pub date: NaiveDate,
    sequence: u64,
}

/// Fetch the booking snapshot a ticket asks for.
///
/// The ticket is handed back so the response can be matched to its request.
pub async fn load_snapshot(
    store: &dyn BookingStore,
    ticket: SnapshotTicket,
) -> (SnapshotTicket, AppResult<Vec<ExistingBooking>>) {
    let result = store.existing_bookings(ticket.salon_id, ticket.date).await;
    (ticket, result)
}

#[derive(Debug, Clone)]
pub struct BookingSession {
    salon_id: i32,
    hours: OperatingHours,
    services: Vec<SalonService>,
    step: Duration,
    policy: SnapshotPolicy,
    now: NaiveDateTime,
    draft: BookingDraft,
    snapshot: BookingSnapshot,
    latest_sequence: u64,
    refresh_required: bool,
    totals: ServiceTotals,
    slots: Vec<CandidateSlot>,
}

impl BookingSession {
    pub fn new(salon: &Salon, services: Vec<SalonService>, settings: &SchedulingConfig, now: NaiveDateTime) -> Self {
        Self {
            salon_id: salon.id,
            hours: salon.hours(),
            services,
            step: settings.step(),
            policy: settings.snapshot_policy,
            now,
            draft: BookingDraft::default(),
            snapshot: BookingSnapshot::Unresolved,
            latest_sequence: 0,
            refresh_required: false,
            totals: ServiceTotals::default(),
            slots: Vec::new(),
        }
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn slots(&self) -> &[CandidateSlot] {
        &self.slots
    }

    pub fn chosen(&self) -> Option<NaiveTime> {
        self.draft.chosen_start
    }

    pub fn totals(&self) -> &ServiceTotals {
        &self.totals
    }

    pub fn snapshot(&self) -> &BookingSnapshot {
        &self.snapshot
    }

    /// Set after a store conflict until a fresh snapshot was applied
    pub fn refresh_required(&self) -> bool {
        self.refresh_required
    }

    /// Switch to `date`. The previous snapshot is dropped and a new one must
    /// be loaded with the returned ticket.
    pub fn set_date(&mut self, date: NaiveDate) -> SnapshotTicket {
        self.draft.date = Some(date);
        self.snapshot = BookingSnapshot::Unresolved;
        let ticket = self.next_ticket(date);
        self.recompute();
        ticket
    }

    /// Request a fresh snapshot for the current date, keeping the last one
    /// until the response arrives
    pub fn request_refresh(&mut self) -> Option<SnapshotTicket> {
        let date = self.draft.date?;
        Some(self.next_ticket(date))
    }

    /// Apply a snapshot response.
    ///
    /// Returns `Ok(false)` when the response belongs to an outdated request
    /// and was discarded. A failed fetch for the latest request leaves the
    /// last-known snapshot in place and returns the error.
    pub fn apply_snapshot(
        &mut self,
        ticket: SnapshotTicket,
        result: AppResult<Vec<ExistingBooking>>,
    ) -> AppResult<bool> {
        if ticket.sequence != self.latest_sequence || ticket.salon_id != self.salon_id {
            tracing::debug!(
                sequence = ticket.sequence,
                latest = self.latest_sequence,
                date = %ticket.date,
                "Discarding stale booking snapshot"
            );
            return Ok(false);
        }

        match result {
            Ok(bookings) => {
                self.snapshot = BookingSnapshot::Resolved(bookings);
                self.refresh_required = false;
                self.recompute();
                Ok(true)
            }
            Err(err) => {
                tracing::warn!(date = %ticket.date, error = %err, "Booking snapshot fetch failed");
                Err(snapshot_fetch_error(err))
            }
        }
    }

    pub fn toggle_service(&mut self, service_id: i32) {
        if !self.draft.service_ids.remove(&service_id) {
            self.draft.service_ids.insert(service_id);
        }
        self.recompute();
    }

    pub fn set_services(&mut self, service_ids: SelectedServiceSet) {
        self.draft.service_ids = service_ids;
        self.recompute();
    }

    /// Advance the session clock; slots that became past are disabled
    pub fn set_now(&mut self, now: NaiveDateTime) {
        self.now = now;
        self.recompute();
    }

    /// Pick a slot. Unavailable or unknown slots are refused.
    pub fn choose(&mut self, start: NaiveTime) -> bool {
        match choose(&self.slots, start) {
            Some(start) => {
                self.draft.chosen_start = Some(start);
                self.recompute();
                true
            }
            None => false,
        }
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.draft.notes = notes.into();
    }

    /// Submit the draft to the store.
    ///
    /// On success the draft is cleared. A conflict flags the session so no
    /// further attempt is made before a snapshot requested after the conflict
    /// was applied; tickets handed out earlier are discarded.
    pub async fn submit(&mut self, store: &dyn BookingStore, customer_id: i32) -> AppResult<Booking> {
        if self.refresh_required {
            return Err(AppError::BookingConflict(
                "Booking snapshot must be refreshed before retrying".to_string(),
            ));
        }

        match submit_draft(store, self.salon_id, customer_id, &self.draft, &self.services).await {
            Ok(booking) => {
                self.draft.clear();
                self.snapshot = BookingSnapshot::Unresolved;
                self.recompute();
                Ok(booking)
            }
            Err(err) => {
                if err.is_conflict() {
                    // Snapshots requested before the conflict may predate the
                    // competing booking; only a later ticket can clear the flag
                    self.refresh_required = true;
                    self.latest_sequence += 1;
                }
                Err(err)
            }
        }
    }

    fn next_ticket(&mut self, date: NaiveDate) -> SnapshotTicket {
        self.latest_sequence += 1;
        SnapshotTicket {
            salon_id: self.salon_id,
            date,
            sequence: self.latest_sequence,
        }
    }

    fn recompute(&mut self) {
        self.totals = ServiceTotals::aggregate(&self.draft.service_ids, &self.services);

        let Some(date) = self.draft.date else {
            self.slots.clear();
            self.draft.chosen_start = None;
            return;
        };

        let starts: Vec<NaiveTime> = slot_starts(self.hours, self.step).collect();
        let (slots, chosen) = annotate(&EvaluationInput {
            starts: &starts,
            date,
            total_duration: self.totals.duration(),
            bookings: &self.snapshot,
            now: self.now,
            chosen: self.draft.chosen_start,
            policy: self.policy,
        });

        if chosen != self.draft.chosen_start {
            tracing::debug!(
                previous = ?self.draft.chosen_start,
                chosen = ?chosen,
                "Chosen slot reconciled"
            );
        }
        self.slots = slots;
        self.draft.chosen_start = chosen;
    }
}
