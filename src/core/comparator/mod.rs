//! # Comparator Module
//!
//! Derives duplicate relationships from fingerprints.
//!
//! ## How It Works
//! 1. Compare every unordered pair of fingerprints once (Hamming distance)
//! 2. Convert distance to similarity: `max(0, 1 - distance / bits)`
//! 3. Keep pairs at or above the similarity threshold, most similar first
//! 4. Build the symmetric duplicate map and reorder the review so that
//!    duplicates sit next to each other
//!
//! Pair enumeration is O(n²) over the hashed photos, fine for the few
//! thousand photos of a single folder.

mod cluster;
mod duplicate_map;
mod grouper;

pub use cluster::{cluster_fingerprints, find_similar, DEFAULT_CLUSTER_DISTANCE};
pub use duplicate_map::{build_duplicate_map, DuplicateMap};
pub use grouper::{duplicate_groups, reorder_for_duplicates};

use crate::core::hasher::Fingerprint;
use crate::core::photo::PhotoId;
use crate::error::CompareError;
use serde::{Deserialize, Serialize};

/// Default minimum similarity for two photos to count as duplicates
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.9;

/// Two photos whose fingerprints are close enough to be duplicates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicatePair {
    pub photo_a: PhotoId,
    pub photo_b: PhotoId,
    /// Hamming distance between the fingerprints
    pub distance: u32,
    /// `1 - distance / bits`, 1.0 for identical fingerprints
    pub similarity: f64,
}

impl DuplicatePair {
    /// Whether this pair involves `id`
    pub fn involves(&self, id: PhotoId) -> bool {
        self.photo_a == id || self.photo_b == id
    }

    pub fn match_type(&self) -> MatchType {
        MatchType::from_similarity(self.similarity)
    }
}

/// Classification used when presenting pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    /// Bit-identical fingerprints
    Exact,
    /// 95% or more of the bits agree
    NearExact,
    /// Above the threshold but visibly different
    Similar,
}

impl MatchType {
    pub fn from_similarity(similarity: f64) -> Self {
        if similarity >= 1.0 {
            MatchType::Exact
        } else if similarity >= 0.95 {
            MatchType::NearExact
        } else {
            MatchType::Similar
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchType::Exact => write!(f, "Exact Match"),
            MatchType::NearExact => write!(f, "Near-Exact Match"),
            MatchType::Similar => write!(f, "Similar"),
        }
    }
}

/// Number of differing bits between two fingerprints of the same grid
pub fn hamming_distance(a: &Fingerprint, b: &Fingerprint) -> Result<u32, CompareError> {
    a.distance(b)
}

/// `max(0, 1 - distance / total_bits)`. A zero-width fingerprint is
/// trivially identical.
pub fn similarity(distance: u32, total_bits: u32) -> f64 {
    if total_bits == 0 {
        return 1.0;
    }
    (1.0 - f64::from(distance) / f64::from(total_bits)).max(0.0)
}

/// Check that a similarity threshold lies in `[0, 1]`
pub fn validate_threshold(threshold: f64) -> Result<(), CompareError> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(CompareError::InvalidThreshold { value: threshold })
    }
}

/// Find every pair with `similarity >= threshold`.
///
/// Each unordered pair is considered once. The result is sorted by
/// similarity, most similar first; ties keep enumeration order.
pub fn find_duplicate_pairs(
    hashed: &[(PhotoId, Fingerprint)],
    threshold: f64,
) -> Result<Vec<DuplicatePair>, CompareError> {
    validate_threshold(threshold)?;

    let mut pairs = Vec::new();

    for i in 0..hashed.len() {
        let (id_a, fp_a) = &hashed[i];
        for (id_b, fp_b) in &hashed[i + 1..] {
            let distance = hamming_distance(fp_a, fp_b)?;
            let score = similarity(distance, fp_a.bit_count());

            if score >= threshold {
                pairs.push(DuplicatePair {
                    photo_a: *id_a,
                    photo_b: *id_b,
                    distance,
                    similarity: score,
                });
            }
        }
    }

    pairs.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    Ok(pairs)
}
