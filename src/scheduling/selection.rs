//! Chosen-slot reconciliation

use chrono::NaiveTime;

use super::conflict::{evaluate, mark_selected_range, EvaluationInput};
use crate::models::CandidateSlot;

/// Annotate slots, then reconcile `input.chosen` against the result.
///
/// The selected range is re-marked when the choice moved.
pub fn annotate(input: &EvaluationInput<'_>) -> (Vec<CandidateSlot>, Option<NaiveTime>) {
    let mut slots = evaluate(input);
    let chosen = reconcile(input.chosen, &slots);
    if chosen != input.chosen {
        mark_selected_range(&mut slots, chosen, input.total_duration);
    }
    (slots, chosen)
}

/// Keep `chosen` if it is still an available slot, otherwise fall back to the
/// earliest available slot (or `None` when nothing is left).
///
/// Run after every recomputation of the slot list.
pub fn reconcile(chosen: Option<NaiveTime>, slots: &[CandidateSlot]) -> Option<NaiveTime> {
    if let Some(current) = chosen {
        if is_available(slots, current) {
            return Some(current);
        }
    }
    first_available(slots)
}

/// Accept a user pick only if it names an available slot
pub fn choose(slots: &[CandidateSlot], requested: NaiveTime) -> Option<NaiveTime> {
    is_available(slots, requested).then_some(requested)
}

fn is_available(slots: &[CandidateSlot], start: NaiveTime) -> bool {
    slots
        .iter()
        .any(|slot| slot.start_time == start && slot.is_available())
}

fn first_available(slots: &[CandidateSlot]) -> Option<NaiveTime> {
    slots
        .iter()
        .filter(|slot| slot.is_available())
        .map(|slot| slot.start_time)
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn slot(start: NaiveTime, disabled: bool) -> CandidateSlot {
        CandidateSlot {
            start_time: start,
            disabled,
            within_selected_range: false,
        }
    }

    #[test]
    fn test_available_choice_is_kept() {
        let slots = vec![slot(hm(9, 0), false), slot(hm(9, 30), false)];
        assert_eq!(reconcile(Some(hm(9, 30)), &slots), Some(hm(9, 30)));
    }

    #[test]
    fn test_disabled_choice_moves_to_first_available() {
        let slots = vec![
            slot(hm(9, 0), true),
            slot(hm(9, 30), true),
            slot(hm(10, 0), false),
            slot(hm(10, 30), false),
        ];
        assert_eq!(reconcile(Some(hm(9, 30)), &slots), Some(hm(10, 0)));
    }

    #[test]
    fn test_vanished_choice_is_replaced() {
        let slots = vec![slot(hm(9, 0), false)];
        assert_eq!(reconcile(Some(hm(17, 0)), &slots), Some(hm(9, 0)));
    }

    #[test]
    fn test_nothing_available_clears_choice() {
        let slots = vec![slot(hm(9, 0), true), slot(hm(9, 30), true)];
        assert_eq!(reconcile(Some(hm(9, 0)), &slots), None);
        assert_eq!(reconcile(None, &[]), None);
    }

    #[test]
    fn test_empty_choice_picks_first_available() {
        let slots = vec![slot(hm(9, 0), true), slot(hm(9, 30), false)];
        assert_eq!(reconcile(None, &slots), Some(hm(9, 30)));
    }

    #[test]
    fn test_choose_rejects_disabled_or_unknown() {
        let slots = vec![slot(hm(9, 0), true), slot(hm(9, 30), false)];
        assert_eq!(choose(&slots, hm(9, 30)), Some(hm(9, 30)));
        assert_eq!(choose(&slots, hm(9, 0)), None);
        assert_eq!(choose(&slots, hm(12, 0)), None);
    }

    #[test]
    fn test_reconciled_choice_is_always_available() {
        let patterns: [[bool; 4]; 5] = [
            [false, false, false, false],
            [true, false, true, false],
            [true, true, true, false],
            [true, true, true, true],
            [false, true, true, true],
        ];
        let starts = [hm(9, 0), hm(9, 30), hm(10, 0), hm(10, 30)];
        for pattern in patterns {
            let slots: Vec<_> = starts
                .iter()
                .zip(pattern)
                .map(|(start, disabled)| slot(*start, disabled))
                .collect();
            for chosen in starts.iter().copied().map(Some).chain([None]) {
                if let Some(result) = reconcile(chosen, &slots) {
                    assert!(slots.iter().any(|s| s.start_time == result && !s.disabled));
                }
            }
        }
    }
}
