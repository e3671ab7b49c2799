//! One review of one folder: ordering, cursor, decisions and duplicates.

use super::navigation::{calculate_next, calculate_prev, find_undecided_indices};
use super::stats::{calculate_review_stats, get_keep_photos, get_trash_photos, is_review_complete};
use super::{
    DecidedPolicy, Decision, DecisionMap, NavigationState, NavigationStep, ReviewAction,
    ReviewStats,
};
use crate::core::comparator::{build_duplicate_map, reorder_for_duplicates, DuplicateMap, DuplicatePair};
use crate::core::photo::Photo;
use crate::events::{Event, EventSender, ReviewEvent};
use tracing::debug;

/// Review state for a loaded folder.
///
/// Decisions are keyed by position, so the ordering is fixed once the
/// session exists; [`load`](Self::load) replaces everything at once.
#[derive(Default)]
pub struct ReviewSession {
    photos: Vec<Photo>,
    index: usize,
    decisions: DecisionMap,
    tour_completed: bool,
    ready_to_finalize: bool,
    duplicates: DuplicateMap,
    policy: DecidedPolicy,
    events: Option<EventSender>,
}

impl ReviewSession {
    /// Review `photos` in the given order, with no duplicate information
    pub fn new(photos: Vec<Photo>) -> Self {
        Self {
            photos,
            ..Self::default()
        }
    }

    /// Review `photos` with duplicates placed next to each other
    pub fn with_duplicates(photos: Vec<Photo>, pairs: &[DuplicatePair]) -> Self {
        let mut session = Self::default();
        session.load(photos, pairs);
        session
    }

    pub fn policy(mut self, policy: DecidedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Report navigation milestones on `sender`
    pub fn events(mut self, sender: EventSender) -> Self {
        self.events = Some(sender);
        self
    }

    /// Replace the whole session with a fresh review of `photos`
    pub fn load(&mut self, photos: Vec<Photo>, pairs: &[DuplicatePair]) {
        self.photos = if pairs.is_empty() {
            photos
        } else {
            reorder_for_duplicates(&photos, pairs)
        };
        self.duplicates = build_duplicate_map(pairs);
        self.index = 0;
        self.decisions.clear();
        self.tour_completed = false;
        self.ready_to_finalize = false;

        debug!(
            photos = self.photos.len(),
            with_duplicates = self.duplicates.len(),
            "Review session loaded"
        );
    }

    /// Drop all photos and state
    pub fn clear(&mut self) {
        self.load(Vec::new(), &[]);
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn decisions(&self) -> &DecisionMap {
        &self.decisions
    }

    pub fn tour_completed(&self) -> bool {
        self.tour_completed
    }

    pub fn ready_to_finalize(&self) -> bool {
        self.ready_to_finalize
    }

    pub fn duplicate_map(&self) -> &DuplicateMap {
        &self.duplicates
    }

    pub fn current_photo(&self) -> Option<&Photo> {
        self.photos.get(self.index)
    }

    pub fn current_decision(&self) -> Decision {
        self.decisions
            .get(&self.index)
            .copied()
            .unwrap_or_default()
    }

    /// Photos paired with the one at `index`
    pub fn duplicates_of(&self, index: usize) -> Vec<&Photo> {
        let Some(photo) = self.photos.get(index) else {
            return Vec::new();
        };
        let partners = self.duplicates.get(&photo.id);
        self.photos
            .iter()
            .filter(|p| partners.contains(&p.id))
            .collect()
    }

    pub fn current_has_duplicates(&self) -> bool {
        self.current_photo()
            .is_some_and(|p| self.duplicates.has_duplicates(&p.id))
    }

    /// Record a decision. Positions outside the ordering are ignored.
    pub fn set_decision(&mut self, index: usize, decision: Decision) -> bool {
        if index >= self.photos.len() {
            return false;
        }
        self.decisions.insert(index, decision);
        true
    }

    /// Jump straight to `index`
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.photos.len() {
            return false;
        }
        self.move_to(index);
        true
    }

    /// Step forward according to the review phase
    pub fn next(&mut self) -> NavigationStep {
        let step = calculate_next(&NavigationState {
            index: self.index,
            photo_count: self.photos.len(),
            decisions: &self.decisions,
            tour_completed: self.tour_completed,
        });

        match step {
            NavigationStep::Advance(index) | NavigationStep::JumpTo(index) => self.move_to(index),
            NavigationStep::CompleteTour => {
                self.tour_completed = true;
                self.emit(ReviewEvent::TourCompleted);
            }
            NavigationStep::ReadyToFinalize => {
                self.ready_to_finalize = true;
                self.emit(ReviewEvent::ReadyToFinalize);
            }
            NavigationStep::Stay => {}
        }

        step
    }

    /// Step back one photo; `None` at the first photo
    pub fn prev(&mut self) -> Option<usize> {
        let index = calculate_prev(self.index)?;
        self.move_to(index);
        Some(index)
    }

    /// Apply a key action to the current photo.
    ///
    /// Keep, trash and skip record a decision (skip records `Undecided`)
    /// and step forward. Previous steps back, reported as `JumpTo` or
    /// `Stay` at the first photo.
    pub fn apply(&mut self, action: ReviewAction) -> NavigationStep {
        let decision = match action {
            ReviewAction::Keep => Decision::Keep,
            ReviewAction::Trash => Decision::Trash,
            ReviewAction::Skip => Decision::Undecided,
            ReviewAction::Previous => {
                return match self.prev() {
                    Some(index) => NavigationStep::JumpTo(index),
                    None => NavigationStep::Stay,
                };
            }
        };

        if !self.set_decision(self.index, decision) {
            return NavigationStep::Stay;
        }
        self.next()
    }

    pub fn stats(&self) -> ReviewStats {
        calculate_review_stats(&self.photos, &self.decisions, self.policy)
    }

    pub fn is_complete(&self) -> bool {
        is_review_complete(&self.photos, &self.decisions)
    }

    pub fn undecided_indices(&self) -> Vec<usize> {
        find_undecided_indices(self.photos.len(), &self.decisions)
    }

    pub fn trash_photos(&self) -> Vec<&Photo> {
        get_trash_photos(&self.photos, &self.decisions)
    }

    pub fn keep_photos(&self) -> Vec<&Photo> {
        get_keep_photos(&self.photos, &self.decisions)
    }

    fn move_to(&mut self, index: usize) {
        self.index = index;
        self.emit(ReviewEvent::Navigated { index });
    }

    fn emit(&self, event: ReviewEvent) {
        if let Some(sender) = &self.events {
            sender.send(Event::Review(event));
        }
    }
}

impl std::fmt::Debug for ReviewSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewSession")
            .field("photos", &self.photos.len())
            .field("index", &self.index)
            .field("decisions", &self.decisions)
            .field("tour_completed", &self.tour_completed)
            .field("ready_to_finalize", &self.ready_to_finalize)
            .finish()
    }
}
