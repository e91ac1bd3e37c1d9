//! Candidate slot generation from operating hours

use chrono::{Duration, NaiveTime};

use super::{seconds_of, time_at};
use crate::models::OperatingHours;

pub const DEFAULT_STEP_MINUTES: i64 = 30;

/// Strictly increasing start times `opens, opens + step, ...` below `closes`.
///
/// Cloning the iterator restarts the sequence from the clone's position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotStarts {
    next: i64,
    closes: i64,
    step: i64,
}

impl Iterator for SlotStarts {
    type Item = NaiveTime;

    fn next(&mut self) -> Option<NaiveTime> {
        if self.step <= 0 || self.next >= self.closes {
            return None;
        }
        let current = time_at(self.next)?;
        self.next += self.step;
        Some(current)
    }
}

impl std::iter::FusedIterator for SlotStarts {}

/// Build the slot sequence for one day.
///
/// Degenerate hours (`closes <= opens`) and non-positive steps yield an empty
/// sequence. A trailing period shorter than `step` is not offered.
pub fn slot_starts(hours: OperatingHours, step: Duration) -> SlotStarts {
    SlotStarts {
        next: seconds_of(hours.opens),
        closes: seconds_of(hours.closes),
        step: step.num_seconds(),
    }
}
