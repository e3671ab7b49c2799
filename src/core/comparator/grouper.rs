//! Groups duplicate pairs transitively and reorders a review so every
//! group is shown back to back.
//!
//! If A matches B and B matches C, then {A, B, C} forms one group even if
//! A doesn't directly match C.

use super::{build_duplicate_map, DuplicatePair};
use crate::core::photo::{Photo, PhotoId};
use std::collections::{HashMap, HashSet, VecDeque};

/// Connected components of the pair graph.
///
/// Groups come out in the order their first pair appears in `pairs`. The
/// first member of each group is its representative (the first photo
/// seen in the pair list); partners follow in breadth-first discovery
/// order.
pub fn duplicate_groups(pairs: &[DuplicatePair]) -> Vec<Vec<PhotoId>> {
    let map = build_duplicate_map(pairs);
    let mut visited: HashSet<PhotoId> = HashSet::new();
    let mut groups = Vec::new();

    for start in pairs.iter().flat_map(|p| [p.photo_a, p.photo_b]) {
        if !visited.insert(start) {
            continue;
        }

        let mut group = vec![start];
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            for &partner in map.get(&current) {
                if visited.insert(partner) {
                    group.push(partner);
                    queue.push_back(partner);
                }
            }
        }

        if group.len() > 1 {
            groups.push(group);
        }
    }

    groups
}

/// Permute `photos` so duplicates sit next to each other.
///
/// Photos with no duplicate relationship come first, in their original
/// relative order. Each duplicate group follows as one contiguous block,
/// representative first. Every input photo appears exactly once; pair ids
/// that aren't in `photos` are ignored.
pub fn reorder_for_duplicates(photos: &[Photo], pairs: &[DuplicatePair]) -> Vec<Photo> {
    if pairs.is_empty() {
        return photos.to_vec();
    }

    let groups = duplicate_groups(pairs);
    let grouped: HashSet<PhotoId> = groups.iter().flatten().copied().collect();

    let mut position: HashMap<PhotoId, usize> = HashMap::with_capacity(photos.len());
    for (index, photo) in photos.iter().enumerate() {
        position.entry(photo.id).or_insert(index);
    }

    let mut used = vec![false; photos.len()];
    let mut reordered = Vec::with_capacity(photos.len());

    for (index, photo) in photos.iter().enumerate() {
        if !grouped.contains(&photo.id) {
            used[index] = true;
            reordered.push(photo.clone());
        }
    }

    for id in groups.iter().flatten() {
        if let Some(&index) = position.get(id) {
            if !used[index] {
                used[index] = true;
                reordered.push(photos[index].clone());
            }
        }
    }

    // Repeated ids in the input are kept rather than dropped
    for (index, photo) in photos.iter().enumerate() {
        if !used[index] {
            reordered.push(photo.clone());
        }
    }

    reordered
}
