//! Batch fingerprinting with per-photo failure isolation.

use crate::core::hasher::{DifferenceHasher, Fingerprint};
use crate::core::photo::{Photo, PhotoId};
use crate::error::HashError;
use rayon::prelude::*;
use std::sync::Mutex;
use tracing::{debug, warn};

/// A photo that could not be fingerprinted
#[derive(Debug, Clone, PartialEq)]
pub struct HashFailure {
    pub id: PhotoId,
    pub name: String,
    pub reason: String,
}

/// Fingerprints for a batch, aligned with the input photos
#[derive(Debug, Clone, Default)]
pub struct HashBatch {
    /// One entry per input photo, `None` where hashing failed
    pub entries: Vec<(PhotoId, Option<Fingerprint>)>,
    pub failures: Vec<HashFailure>,
}

impl HashBatch {
    /// Successfully hashed photos in input order
    pub fn hashed(&self) -> Vec<(PhotoId, Fingerprint)> {
        self.entries
            .iter()
            .filter_map(|(id, fp)| fp.map(|fp| (*id, fp)))
            .collect()
    }
}

pub(super) fn run<F>(
    hasher: &DifferenceHasher,
    photos: &[Photo],
    parallelism: Option<usize>,
    mut on_progress: F,
) -> HashBatch
where
    F: FnMut(usize, usize) + Send,
{
    run_observed(hasher, photos, parallelism, |_, _, completed, total| {
        on_progress(completed, total)
    })
}

/// Like [`run`], but `on_attempt` also sees which photo finished and how.
/// Calls are serialized and happen as each attempt completes.
pub(super) fn run_observed<F>(
    hasher: &DifferenceHasher,
    photos: &[Photo],
    parallelism: Option<usize>,
    on_attempt: F,
) -> HashBatch
where
    F: FnMut(&Photo, &Result<Fingerprint, HashError>, usize, usize) + Send,
{
    let total = photos.len();
    let progress = Mutex::new((0usize, on_attempt));

    let hash_one = |photo: &Photo| -> Result<Fingerprint, HashError> {
        let result = hasher.hash_photo(photo);

        // Count and report under one lock so `completed` never goes backwards
        if let Ok(mut guard) = progress.lock() {
            let (completed, callback) = &mut *guard;
            *completed += 1;
            callback(photo, &result, *completed, total);
        }

        result
    };

    let results: Vec<Result<Fingerprint, HashError>> = match parallelism {
        Some(threads) if threads > 1 => {
            match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => pool.install(|| photos.par_iter().map(&hash_one).collect()),
                Err(e) => {
                    warn!(error = %e, "Could not start hashing pool, hashing sequentially");
                    photos.iter().map(&hash_one).collect()
                }
            }
        }
        _ => photos.iter().map(&hash_one).collect(),
    };

    let mut batch = HashBatch {
        entries: Vec::with_capacity(total),
        failures: Vec::new(),
    };

    for (photo, result) in photos.iter().zip(results) {
        match result {
            Ok(fingerprint) => {
                debug!(photo = %photo.id, hash = %fingerprint, "Hashed photo");
                batch.entries.push((photo.id, Some(fingerprint)));
            }
            Err(e) => {
                warn!(photo = %photo.id, name = %photo.name, error = %e, "Failed to hash photo");
                batch.failures.push(HashFailure {
                    id: photo.id,
                    name: photo.name.clone(),
                    reason: e.to_string(),
                });
                batch.entries.push((photo.id, None));
            }
        }
    }

    batch
}
