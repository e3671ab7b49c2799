//! # Detector Module
//!
//! Batch fingerprinting and duplicate detection over a photo collection.
//!
//! ## Stages
//! 1. **Hash** - fingerprint each photo; a photo that fails to decode is
//!    logged and left out of this run, the batch continues
//! 2. **Compare** - pair every two hashed photos once, keep pairs at or
//!    above the similarity threshold
//!
//! ## Parallelism
//! Hashing runs sequentially by default, one decode in flight at a time,
//! which bounds peak memory. `parallelism(n)` hashes on a dedicated rayon
//! pool of `n` threads instead. Progress callbacks are serialized, so the
//! completed count is strictly increasing either way, and pair order only
//! depends on similarity and input order.

mod batch;

pub use batch::{HashBatch, HashFailure};

use crate::core::comparator::{
    cluster_fingerprints, find_duplicate_pairs, find_similar, validate_threshold,
    DuplicatePair, DEFAULT_CLUSTER_DISTANCE, DEFAULT_SIMILARITY_THRESHOLD,
};
use crate::core::hasher::{DifferenceHasher, HashConfig, ImageDecoder};
use crate::core::photo::{Photo, PhotoId};
use crate::error::{CompareError, CullError};
use crate::events::{CompareEvent, Event, EventSender, HashEvent, HashProgress};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Photos grouped around a common anchor
#[derive(Debug, Clone)]
pub struct SimilarityCluster {
    /// `cluster-<anchor id>`
    pub id: String,
    /// Anchor first, then absorbed photos in input order
    pub photos: Vec<Photo>,
    pub representative: Photo,
}

/// Detector settings
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Minimum similarity (0-1) for a duplicate pair
    pub threshold: f64,
    /// Maximum Hamming distance for clustering and similarity lookups
    pub cluster_distance: u32,
    pub hash: HashConfig,
    /// Hashing threads; `None` hashes sequentially
    pub parallelism: Option<usize>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            cluster_distance: DEFAULT_CLUSTER_DISTANCE,
            hash: HashConfig::default(),
            parallelism: None,
        }
    }
}

/// Builder for [`DuplicateDetector`]
pub struct DetectorBuilder {
    config: DetectorConfig,
    decoder: Option<Arc<dyn ImageDecoder>>,
}

impl DetectorBuilder {
    pub fn new() -> Self {
        Self {
            config: DetectorConfig::default(),
            decoder: None,
        }
    }

    /// Minimum similarity (0-1) for two photos to be paired
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Maximum Hamming distance used by clustering
    pub fn cluster_distance(mut self, distance: u32) -> Self {
        self.config.cluster_distance = distance;
        self
    }

    pub fn hash_config(mut self, config: HashConfig) -> Self {
        self.config.hash = config;
        self
    }

    /// Hash on a pool of `threads` workers (values below 2 mean sequential)
    pub fn parallelism(mut self, threads: usize) -> Self {
        self.config.parallelism = Some(threads);
        self
    }

    /// Decode through a custom provider
    pub fn decoder(mut self, decoder: Arc<dyn ImageDecoder>) -> Self {
        self.decoder = Some(decoder);
        self
    }

    pub fn build(self) -> Result<DuplicateDetector, CullError> {
        validate_threshold(self.config.threshold)?;
        let hasher = match self.decoder {
            Some(decoder) => DifferenceHasher::with_decoder(&self.config.hash, decoder)?,
            None => DifferenceHasher::new(&self.config.hash)?,
        };
        Ok(DuplicateDetector {
            config: self.config,
            hasher,
        })
    }
}

impl Default for DetectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Fingerprints photos and derives duplicate pairs and clusters
#[derive(Debug, Clone)]
pub struct DuplicateDetector {
    config: DetectorConfig,
    hasher: DifferenceHasher,
}

impl DuplicateDetector {
    pub fn builder() -> DetectorBuilder {
        DetectorBuilder::new()
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn hasher(&self) -> &DifferenceHasher {
        &self.hasher
    }

    /// Fingerprint every photo. `on_progress(completed, total)` runs after
    /// each attempt, successful or not.
    pub fn hash_photos<F>(&self, photos: &[Photo], on_progress: F) -> HashBatch
    where
        F: FnMut(usize, usize) + Send,
    {
        batch::run(&self.hasher, photos, self.config.parallelism, on_progress)
    }

    /// Fingerprint photos in place so later runs can reuse the result
    pub fn attach_fingerprints<F>(&self, photos: &mut [Photo], on_progress: F) -> HashBatch
    where
        F: FnMut(usize, usize) + Send,
    {
        let batch = self.hash_photos(photos, on_progress);
        for (photo, (_, fingerprint)) in photos.iter_mut().zip(&batch.entries) {
            if let Some(fingerprint) = fingerprint {
                photo.attach_fingerprint(*fingerprint);
            }
        }
        batch
    }

    /// Hash `photos` and return every pair at or above the threshold,
    /// most similar first. Photos that fail to hash are left out.
    pub fn detect_duplicates<F>(
        &self,
        photos: &[Photo],
        on_progress: F,
    ) -> Result<Vec<DuplicatePair>, CompareError>
    where
        F: FnMut(usize, usize) + Send,
    {
        let batch = self.hash_photos(photos, on_progress);
        let hashed = batch.hashed();
        let pairs = find_duplicate_pairs(&hashed, self.config.threshold)?;

        info!(
            photos = photos.len(),
            hashed = hashed.len(),
            failed = batch.failures.len(),
            pairs = pairs.len(),
            "Duplicate detection finished"
        );

        Ok(pairs)
    }

    /// [`detect_duplicates`](Self::detect_duplicates) reporting through events.
    ///
    /// Each photo's `PhotoHashed` or `Error` event is sent as soon as its
    /// attempt finishes, immediately followed by the matching `Progress`.
    pub fn detect_duplicates_with_events(
        &self,
        photos: &[Photo],
        events: &EventSender,
    ) -> Result<Vec<DuplicatePair>, CompareError> {
        events.send(Event::Hash(HashEvent::Started {
            total_photos: photos.len(),
        }));

        let batch = batch::run_observed(
            &self.hasher,
            photos,
            self.config.parallelism,
            |photo, result, completed, total| {
                let outcome = match result {
                    Ok(fingerprint) => HashEvent::PhotoHashed {
                        photo_id: photo.id.as_uuid(),
                        hex: fingerprint.to_hex(),
                    },
                    Err(e) => HashEvent::Error {
                        photo_id: photo.id.as_uuid(),
                        name: photo.name.clone(),
                        message: e.to_string(),
                    },
                };
                events.send(Event::Hash(outcome));
                events.send(Event::Hash(HashEvent::Progress(HashProgress {
                    completed,
                    total,
                })));
            },
        );

        let hashed = batch.hashed();
        events.send(Event::Hash(HashEvent::Completed {
            total_hashed: hashed.len(),
            failed: batch.failures.len(),
        }));

        events.send(Event::Compare(CompareEvent::Started {
            hashed_photos: hashed.len(),
        }));
        let pairs = find_duplicate_pairs(&hashed, self.config.threshold)?;
        for pair in &pairs {
            events.send(Event::Compare(CompareEvent::PairFound {
                photo_a: pair.photo_a.as_uuid(),
                photo_b: pair.photo_b.as_uuid(),
                similarity: pair.similarity,
            }));
        }
        events.send(Event::Compare(CompareEvent::Completed {
            total_pairs: pairs.len(),
        }));

        Ok(pairs)
    }

    /// Greedy anchored clustering by Hamming distance.
    ///
    /// Not transitive: a photo close to the anchor joins even when it is
    /// far from the other members. Single-photo clusters are dropped.
    pub fn cluster_similar_photos<F>(
        &self,
        photos: &[Photo],
        on_progress: F,
    ) -> Result<Vec<SimilarityCluster>, CompareError>
    where
        F: FnMut(usize, usize) + Send,
    {
        let batch = self.hash_photos(photos, on_progress);
        let clusters = cluster_fingerprints(&batch.entries, self.config.cluster_distance)?;

        let by_id: HashMap<PhotoId, &Photo> = photos.iter().map(|p| (p.id, p)).collect();

        Ok(clusters
            .into_iter()
            .filter_map(|ids| {
                let members: Vec<Photo> = ids
                    .iter()
                    .filter_map(|id| by_id.get(id).map(|p| (*p).clone()))
                    .collect();
                let representative = members.first()?.clone();
                Some(SimilarityCluster {
                    id: format!("cluster-{}", representative.id),
                    photos: members,
                    representative,
                })
            })
            .collect())
    }

    /// Photos among `candidates` within the cluster distance of `target`.
    ///
    /// Fails if `target` itself can't be hashed; candidates that fail are
    /// skipped.
    pub fn find_similar_photos(
        &self,
        target: &Photo,
        candidates: &[Photo],
    ) -> Result<Vec<Photo>, CullError> {
        let target_fp = self.hasher.hash_photo(target)?;
        let hashed = self.hash_photos(candidates, |_, _| {}).hashed();

        let similar = find_similar((target.id, target_fp), &hashed, self.config.cluster_distance)?;

        Ok(candidates
            .iter()
            .filter(|p| similar.contains(&p.id))
            .cloned()
            .collect())
    }

    /// Whether two photos are within the cluster distance of each other
    pub fn are_photos_similar(&self, a: &Photo, b: &Photo) -> Result<bool, CullError> {
        let fp_a = self.hasher.hash_photo(a)?;
        let fp_b = self.hasher.hash_photo(b)?;
        Ok(fp_a.distance(&fp_b)? <= self.config.cluster_distance)
    }
}
