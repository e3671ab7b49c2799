//! Key bindings for keyboard-driven review.

use serde::{Deserialize, Serialize};

/// Keys a review UI can forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewKey {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Space,
    Backspace,
    Enter,
    Escape,
    Char(char),
}

/// What a key press asks the session to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewAction {
    Keep,
    Trash,
    /// Move on without a decision (records `Undecided`)
    Skip,
    Previous,
}

/// Key → action mapping.
///
/// Defaults: right keeps, left trashes, space skips, backspace goes back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub keep: ReviewKey,
    pub trash: ReviewKey,
    pub skip: ReviewKey,
    pub previous: ReviewKey,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keep(mut self, key: ReviewKey) -> Self {
        self.keep = key;
        self
    }

    pub fn trash(mut self, key: ReviewKey) -> Self {
        self.trash = key;
        self
    }

    pub fn skip(mut self, key: ReviewKey) -> Self {
        self.skip = key;
        self
    }

    pub fn previous(mut self, key: ReviewKey) -> Self {
        self.previous = key;
        self
    }

    /// Action bound to `key`, checked in keep, trash, skip, previous order
    pub fn action_for(&self, key: ReviewKey) -> Option<ReviewAction> {
        if key == self.keep {
            Some(ReviewAction::Keep)
        } else if key == self.trash {
            Some(ReviewAction::Trash)
        } else if key == self.skip {
            Some(ReviewAction::Skip)
        } else if key == self.previous {
            Some(ReviewAction::Previous)
        } else {
            None
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            keep: ReviewKey::ArrowRight,
            trash: ReviewKey::ArrowLeft,
            skip: ReviewKey::Space,
            previous: ReviewKey::Backspace,
        }
    }
}
