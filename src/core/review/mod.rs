//! # Review Module
//!
//! Keyboard-driven keep/trash review of a folder.
//!
//! - `navigation` - where the cursor goes next (first pass, then sweep)
//! - `stats` - kept/trashed/pending counts and byte totals
//! - `session` - the explicit state object a UI drives
//! - `keys` - remappable key bindings

mod decision;
mod keys;
mod navigation;
mod session;
mod stats;

pub use decision::{Decision, DecisionMap};
pub use keys::{KeyBindings, ReviewAction, ReviewKey};
pub use navigation::{
    calculate_next, calculate_prev, find_undecided_indices, NavigationState, NavigationStep,
};
pub use session::ReviewSession;
pub use stats::{
    calculate_review_stats, get_keep_photos, get_trash_photos, is_review_complete,
    DecidedPolicy, ReviewStats,
};
