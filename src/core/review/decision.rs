//! Per-photo review decisions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What the user decided for one photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Keep,
    Trash,
    /// Set aside; does not count toward completion
    Archive,
    /// Skipped or explicitly cleared
    #[default]
    Undecided,
}

impl Decision {
    /// Keep and trash are the only decisions that settle a photo
    pub fn is_final(&self) -> bool {
        matches!(self, Decision::Keep | Decision::Trash)
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Keep => write!(f, "keep"),
            Decision::Trash => write!(f, "trash"),
            Decision::Archive => write!(f, "archive"),
            Decision::Undecided => write!(f, "undecided"),
        }
    }
}

/// Position in the review ordering → decision.
///
/// Keyed by index, not photo id, so it is only meaningful together with
/// the ordering it was recorded against.
pub type DecisionMap = BTreeMap<usize, Decision>;
