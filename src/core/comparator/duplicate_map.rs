//! Symmetric photo → duplicates lookup, as consumed by the UI badges.

use super::DuplicatePair;
use crate::core::photo::PhotoId;
use serde::Serialize;
use std::collections::HashMap;

/// Photo id → ids it was paired with.
///
/// Always symmetric: if A lists B then B lists A. Each adjacency list
/// holds a partner at most once, in the order the pairs were seen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DuplicateMap {
    entries: HashMap<PhotoId, Vec<PhotoId>>,
}

impl DuplicateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record both directions of a relationship
    pub fn link(&mut self, a: PhotoId, b: PhotoId) {
        if a == b {
            return;
        }
        Self::push_unique(self.entries.entry(a).or_default(), b);
        Self::push_unique(self.entries.entry(b).or_default(), a);
    }

    fn push_unique(list: &mut Vec<PhotoId>, id: PhotoId) {
        if !list.contains(&id) {
            list.push(id);
        }
    }

    /// Partners of `id`; empty when it has none
    pub fn get(&self, id: &PhotoId) -> &[PhotoId] {
        self.entries.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_duplicates(&self, id: &PhotoId) -> bool {
        !self.get(id).is_empty()
    }

    pub fn contains(&self, id: &PhotoId) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of photos with at least one partner
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PhotoId, &Vec<PhotoId>)> {
        self.entries.iter()
    }

    /// b ∈ map[a] ⇔ a ∈ map[b] for every entry
    pub fn is_symmetric(&self) -> bool {
        self.entries
            .iter()
            .all(|(a, partners)| partners.iter().all(|b| self.get(b).contains(a)))
    }
}

/// Build the symmetric adjacency for `pairs`
pub fn build_duplicate_map(pairs: &[DuplicatePair]) -> DuplicateMap {
    let mut map = DuplicateMap::new();
    for pair in pairs {
        map.link(pair.photo_a, pair.photo_b);
    }
    map
}
