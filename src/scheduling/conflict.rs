//! Slot annotation: past slots, booking conflicts and the selected range

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;

use super::seconds_of;
use crate::models::{CandidateSlot, ExistingBooking};

/// Existing bookings known for the evaluated date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingSnapshot {
    /// Fetch not resolved yet (or failed before anything was loaded)
    Unresolved,
    Resolved(Vec<ExistingBooking>),
}

impl BookingSnapshot {
    pub fn is_resolved(&self) -> bool {
        matches!(self, BookingSnapshot::Resolved(_))
    }
}

/// Treatment of slots while the booking snapshot is [`BookingSnapshot::Unresolved`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotPolicy {
    /// Assume no bookings; the store may still reject the slot later
    Optimistic,
    /// Disable every slot until bookings are known
    #[default]
    Blocking,
}

#[derive(Debug, Clone)]
pub struct EvaluationInput<'a> {
    pub starts: &'a [NaiveTime],
    pub date: NaiveDate,
    pub total_duration: Duration,
    pub bookings: &'a BookingSnapshot,
    pub now: NaiveDateTime,
    pub chosen: Option<NaiveTime>,
    pub policy: SnapshotPolicy,
}

/// Half-open overlap of `[a0, a1)` and `[b0, b1)`; touching ends do not overlap.
pub fn overlaps(a0: i64, a1: i64, b0: i64, b1: i64) -> bool {
    a0 < b1 && b0 < a1
}

/// Occupancy window `[start, start + duration)` in seconds since midnight.
/// Windows running past midnight keep their full length.
fn window(start: NaiveTime, duration: Duration) -> (i64, i64) {
    let start = seconds_of(start);
    (start, start + duration.num_seconds())
}

/// True if a selection starting at `start` for `duration` collides with any booking
pub fn conflicts_with(start: NaiveTime, duration: Duration, bookings: &[ExistingBooking]) -> bool {
    let (s0, s1) = window(start, duration);
    bookings.iter().any(|booking| {
        let (b0, b1) = window(
            booking.start_time,
            Duration::minutes(i64::from(booking.duration_minutes)),
        );
        overlaps(s0, s1, b0, b1)
    })
}

/// Whether `start` on `date` lies before `now`.
///
/// Only slots of today can be past. Slots of other dates never are; callers
/// that must refuse earlier dates check the date themselves.
pub fn is_past(date: NaiveDate, start: NaiveTime, now: NaiveDateTime) -> bool {
    date == now.date() && start < now.time()
}

/// Annotate every candidate start. The output depends on the input only.
pub fn evaluate(input: &EvaluationInput<'_>) -> Vec<CandidateSlot> {
    let has_duration = input.total_duration > Duration::zero();
    let blocked = !input.bookings.is_resolved() && input.policy == SnapshotPolicy::Blocking;
    let bookings: &[ExistingBooking] = match input.bookings {
        BookingSnapshot::Resolved(bookings) => bookings.as_slice(),
        BookingSnapshot::Unresolved => &[],
    };

    let mut slots: Vec<CandidateSlot> = input
        .starts
        .iter()
        .map(|&start| {
            let past = is_past(input.date, start, input.now);
            let conflict = has_duration && conflicts_with(start, input.total_duration, bookings);
            CandidateSlot {
                start_time: start,
                disabled: blocked || past || conflict,
                within_selected_range: false,
            }
        })
        .collect();

    mark_selected_range(&mut slots, input.chosen, input.total_duration);
    slots
}

/// Recompute `within_selected_range` for a (possibly changed) chosen start
pub fn mark_selected_range(slots: &mut [CandidateSlot], chosen: Option<NaiveTime>, total_duration: Duration) {
    let range = chosen
        .filter(|_| total_duration > Duration::zero())
        .map(|start| window(start, total_duration));

    for slot in slots.iter_mut() {
        slot.within_selected_range = match range {
            Some((c0, c1)) => {
                let start = seconds_of(slot.start_time);
                c0 <= start && start < c1
            }
            None => false,
        };
    }
}
