//! # Core Module
//!
//! The UI-agnostic culling engine.
//!
//! ## Modules
//! - `photo` - Photo records and image sources
//! - `scanner` - Discovers photos in a folder
//! - `hasher` - Computes dHash fingerprints
//! - `comparator` - Finds duplicate pairs, groups and clusters
//! - `detector` - Batch hashing and detection with progress
//! - `review` - Navigation, decisions and stats for a review session
//! - `finalize` - Deletes trashed photos or exports a delete script

pub mod comparator;
pub mod detector;
pub mod finalize;
pub mod hasher;
pub mod photo;
pub mod review;
pub mod scanner;

// Re-export commonly used types
pub use comparator::{DuplicateMap, DuplicatePair, MatchType};
pub use detector::{DuplicateDetector, SimilarityCluster};
pub use hasher::{Fingerprint, HashConfig};
pub use photo::{ImageSource, Photo, PhotoId};
pub use review::{Decision, ReviewSession, ReviewStats};
