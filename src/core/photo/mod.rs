//! # Photo Module
//!
//! The photo record shared by every part of the engine.
//!
//! A [`Photo`] is created once by a folder provider and stays immutable
//! for the session, apart from attaching a fingerprint after hashing.

use crate::core::hasher::Fingerprint;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// Stable identity of a photo within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PhotoId(Uuid);

impl PhotoId {
    /// Generate a fresh random identity
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PhotoId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PhotoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the encoded image content lives. Decoded lazily on demand.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// A file on disk
    File(PathBuf),
    /// Encoded bytes already held in memory
    Memory(Arc<[u8]>),
}

impl ImageSource {
    /// Path on disk, if this source is file backed
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ImageSource::File(path) => Some(path),
            ImageSource::Memory(_) => None,
        }
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::File(path)
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        ImageSource::Memory(bytes.into())
    }
}

/// A single photo in the review collection
#[derive(Debug, Clone)]
pub struct Photo {
    pub id: PhotoId,
    /// File name shown to the user
    pub name: String,
    /// Path relative to the chosen root, `/` separated (e.g. `2024/08/IMG_123.jpg`)
    pub rel_path: String,
    pub size_bytes: u64,
    pub source: ImageSource,
    /// Previously computed fingerprint, if any
    pub fingerprint: Option<Fingerprint>,
}

impl Photo {
    pub fn new(
        name: impl Into<String>,
        rel_path: impl Into<String>,
        size_bytes: u64,
        source: impl Into<ImageSource>,
    ) -> Self {
        Self {
            id: PhotoId::new(),
            name: name.into(),
            rel_path: rel_path.into(),
            size_bytes,
            source: source.into(),
            fingerprint: None,
        }
    }

    /// Build a photo from in-memory bytes, named after its relative path
    pub fn from_bytes(rel_path: impl Into<String>, bytes: Vec<u8>) -> Self {
        let rel_path = rel_path.into();
        let name = rel_path
            .rsplit('/')
            .next()
            .unwrap_or(rel_path.as_str())
            .to_string();
        let size = bytes.len() as u64;
        Self::new(name, rel_path, size, bytes)
    }

    /// Return this photo with a fingerprint attached
    pub fn with_fingerprint(mut self, fingerprint: Fingerprint) -> Self {
        self.fingerprint = Some(fingerprint);
        self
    }

    pub fn attach_fingerprint(&mut self, fingerprint: Fingerprint) {
        self.fingerprint = Some(fingerprint);
    }
}
