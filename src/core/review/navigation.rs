//! # Navigation
//!
//! Decides where the cursor goes next in a two-phase review.
//!
//! ## How It Works
//! 1. **First pass** - walk the ordering front to back, one photo per step,
//!    whether or not a decision was made. Stepping past the last photo
//!    marks the tour completed without moving.
//! 2. **Sweep** - jump to the lowest position that still lacks a keep or
//!    trash decision (archive and skip don't count). When none are left
//!    the review is ready to finalize.
//!
//! Everything here is a pure function of a [`NavigationState`] snapshot.

use super::DecisionMap;

/// Snapshot of the session fields navigation depends on
#[derive(Debug, Clone, Copy)]
pub struct NavigationState<'a> {
    pub index: usize,
    pub photo_count: usize,
    pub decisions: &'a DecisionMap,
    pub tour_completed: bool,
}

/// Outcome of a forward step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationStep {
    /// Move to the given position during the first pass
    Advance(usize),
    /// The first pass just reached its end; the index stays put
    CompleteTour,
    /// Move to the given position, which still needs a decision
    JumpTo(usize),
    /// Every photo is kept or trashed; the index stays put
    ReadyToFinalize,
    /// Nothing to do (empty ordering or index out of range)
    Stay,
}

impl NavigationStep {
    /// The new cursor position, if the step moves it
    pub fn target(&self) -> Option<usize> {
        match self {
            NavigationStep::Advance(index) | NavigationStep::JumpTo(index) => Some(*index),
            _ => None,
        }
    }
}

/// Next position after the current photo
pub fn calculate_next(state: &NavigationState<'_>) -> NavigationStep {
    if state.photo_count == 0 {
        return NavigationStep::Stay;
    }

    if !state.tour_completed {
        let last = state.photo_count - 1;
        return if state.index == last {
            NavigationStep::CompleteTour
        } else if state.index < last {
            NavigationStep::Advance(state.index + 1)
        } else {
            NavigationStep::Stay
        };
    }

    match first_undecided(state.photo_count, state.decisions) {
        Some(index) => NavigationStep::JumpTo(index),
        None => NavigationStep::ReadyToFinalize,
    }
}

/// Previous position, `None` at the start
pub fn calculate_prev(index: usize) -> Option<usize> {
    index.checked_sub(1)
}

/// Positions in `0..photo_count` without a keep or trash decision, ascending
pub fn find_undecided_indices(photo_count: usize, decisions: &DecisionMap) -> Vec<usize> {
    (0..photo_count)
        .filter(|index| !is_settled(decisions, *index))
        .collect()
}

fn first_undecided(photo_count: usize, decisions: &DecisionMap) -> Option<usize> {
    (0..photo_count).find(|index| !is_settled(decisions, *index))
}

fn is_settled(decisions: &DecisionMap, index: usize) -> bool {
    decisions.get(&index).is_some_and(|d| d.is_final())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::review::Decision;

    fn state(index: usize, count: usize, decisions: &DecisionMap, done: bool) -> NavigationState<'_> {
        NavigationState {
            index,
            photo_count: count,
            decisions,
            tour_completed: done,
        }
    }

    #[test]
    fn first_pass_walks_sequentially_then_completes_tour() {
        let decisions = DecisionMap::new();
        let count = 5;
        let mut index = 0;

        for _ in 0..count - 1 {
            match calculate_next(&state(index, count, &decisions, false)) {
                NavigationStep::Advance(next) => index = next,
                other => panic!("expected advance, got {:?}", other),
            }
        }
        assert_eq!(index, count - 1);

        assert_eq!(
            calculate_next(&state(index, count, &decisions, false)),
            NavigationStep::CompleteTour
        );
    }

    #[test]
    fn first_pass_ignores_decisions() {
        let decisions = DecisionMap::from([(1, Decision::Keep), (2, Decision::Trash)]);
        assert_eq!(
            calculate_next(&state(0, 4, &decisions, false)),
            NavigationStep::Advance(1)
        );
    }

    #[test]
    fn sweep_jumps_to_lowest_unsettled_position() {
        let decisions = DecisionMap::from([
            (0, Decision::Keep),
            (1, Decision::Archive),
            (2, Decision::Trash),
            (3, Decision::Undecided),
        ]);

        // From anywhere, including a position past the gap
        assert_eq!(
            calculate_next(&state(3, 5, &decisions, true)),
            NavigationStep::JumpTo(1)
        );
        assert_eq!(
            calculate_next(&state(0, 5, &decisions, true)),
            NavigationStep::JumpTo(1)
        );
    }

    #[test]
    fn sweep_treats_missing_entries_as_unsettled() {
        let decisions = DecisionMap::from([(0, Decision::Keep), (1, Decision::Keep)]);
        assert_eq!(
            calculate_next(&state(1, 3, &decisions, true)),
            NavigationStep::JumpTo(2)
        );
    }

    #[test]
    fn all_settled_is_ready_to_finalize() {
        let decisions = DecisionMap::from([
            (0, Decision::Keep),
            (1, Decision::Trash),
            (2, Decision::Keep),
        ]);
        assert_eq!(
            calculate_next(&state(2, 3, &decisions, true)),
            NavigationStep::ReadyToFinalize
        );
    }

    #[test]
    fn empty_ordering_stays() {
        let decisions = DecisionMap::new();
        assert_eq!(calculate_next(&state(0, 0, &decisions, false)), NavigationStep::Stay);
        assert_eq!(calculate_next(&state(0, 0, &decisions, true)), NavigationStep::Stay);
    }

    #[test]
    fn out_of_range_index_stays_during_first_pass() {
        let decisions = DecisionMap::new();
        assert_eq!(calculate_next(&state(9, 3, &decisions, false)), NavigationStep::Stay);
    }

    #[test]
    fn prev_stops_at_zero() {
        assert_eq!(calculate_prev(3), Some(2));
        assert_eq!(calculate_prev(1), Some(0));
        assert_eq!(calculate_prev(0), None);
    }

    #[test]
    fn undecided_indices_ignore_positions_past_the_end() {
        let decisions = DecisionMap::from([
            (0, Decision::Trash),
            (2, Decision::Archive),
            (7, Decision::Keep),
        ]);
        assert_eq!(find_undecided_indices(4, &decisions), vec![1, 2, 3]);
    }

    #[test]
    fn step_targets() {
        assert_eq!(NavigationStep::Advance(2).target(), Some(2));
        assert_eq!(NavigationStep::JumpTo(0).target(), Some(0));
        assert_eq!(NavigationStep::CompleteTour.target(), None);
        assert_eq!(NavigationStep::ReadyToFinalize.target(), None);
    }
}
