//! Appointment slot computation
//!
//! Pure, synchronous building blocks used by both the availability endpoint
//! and [`crate::services::session::BookingSession`]:
//!
//! - [`window`] turns operating hours into candidate start times
//! - [`totals`] sums duration and price of the selected services
//! - [`conflict`] marks slots that are past or collide with bookings
//! - [`selection`] keeps the chosen slot pointing at an available slot
//!
//! None of these functions read the system clock or touch I/O.

pub mod conflict;
pub mod selection;
pub mod totals;
pub mod window;

pub use conflict::{evaluate, overlaps, BookingSnapshot, EvaluationInput, SnapshotPolicy};
pub use selection::{annotate, choose, reconcile};
pub use totals::{SelectedServiceSet, ServiceTotals};
pub use window::{slot_starts, SlotStarts, DEFAULT_STEP_MINUTES};

use chrono::{NaiveTime, Timelike};

/// Seconds since midnight, used for all interval arithmetic
pub(crate) fn seconds_of(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight())
}

pub(crate) fn time_at(seconds: i64) -> Option<NaiveTime> {
    let seconds = u32::try_from(seconds).ok()?;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
}
