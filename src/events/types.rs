//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// All events emitted by the culling engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Folder scanning events
    Scan(ScanEvent),
    /// Fingerprinting events
    Hash(HashEvent),
    /// Pair comparison events
    Compare(CompareEvent),
    /// Review session events
    Review(ReviewEvent),
}

/// Events during the scanning phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Scanning has started
    Started { root: PathBuf },
    /// A photo was found
    PhotoFound { rel_path: String },
    /// An error occurred but scanning continues
    Error { path: PathBuf, message: String },
    /// Scanning completed
    Completed { total_photos: usize },
}

/// Events during the hashing phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HashEvent {
    /// Hashing has started
    Started { total_photos: usize },
    /// Progress update, sent after every hash attempt
    Progress(HashProgress),
    /// A photo was fingerprinted
    PhotoHashed { photo_id: Uuid, hex: String },
    /// A photo could not be fingerprinted; it is left out of this run
    Error {
        photo_id: Uuid,
        name: String,
        message: String,
    },
    /// Hashing completed
    Completed { total_hashed: usize, failed: usize },
}

/// Progress information during hashing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashProgress {
    /// Number of hash attempts finished so far
    pub completed: usize,
    /// Total number of photos in the batch
    pub total: usize,
}

/// Events during the comparison phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CompareEvent {
    /// Comparison has started
    Started { hashed_photos: usize },
    /// A duplicate pair was found
    PairFound {
        photo_a: Uuid,
        photo_b: Uuid,
        similarity: f64,
    },
    /// Comparison completed
    Completed { total_pairs: usize },
}

/// Events emitted by a review session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReviewEvent {
    /// The cursor moved to a new position
    Navigated { index: usize },
    /// The first sequential pass reached the last photo
    TourCompleted,
    /// Every photo has a keep or trash decision
    ReadyToFinalize,
}

impl std::fmt::Display for HashProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.completed, self.total)
    }
}
