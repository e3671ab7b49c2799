//! Aggregate review progress derived from the decision map.

use super::{Decision, DecisionMap};
use crate::core::photo::Photo;
use serde::Serialize;

/// What counts as "decided" in [`ReviewStats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecidedPolicy {
    /// Positions in range with a keep or trash decision
    #[default]
    KeepOrTrash,
    /// Every key in the decision map, whatever its value or position
    AnyEntry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReviewStats {
    pub total: usize,
    pub decided: usize,
    pub trash_count: usize,
    pub keep_count: usize,
    pub trash_bytes: u64,
    pub keep_bytes: u64,
    /// `total - decided`, never negative
    pub pending: usize,
}

fn photos_with<'a>(photos: &'a [Photo], decisions: &DecisionMap, wanted: Decision) -> Vec<&'a Photo> {
    decisions
        .iter()
        .filter(|(_, decision)| **decision == wanted)
        .filter_map(|(index, _)| photos.get(*index))
        .collect()
}

/// Photos marked trash, in review order
pub fn get_trash_photos<'a>(photos: &'a [Photo], decisions: &DecisionMap) -> Vec<&'a Photo> {
    photos_with(photos, decisions, Decision::Trash)
}

/// Photos marked keep, in review order
pub fn get_keep_photos<'a>(photos: &'a [Photo], decisions: &DecisionMap) -> Vec<&'a Photo> {
    photos_with(photos, decisions, Decision::Keep)
}

pub fn calculate_review_stats(
    photos: &[Photo],
    decisions: &DecisionMap,
    policy: DecidedPolicy,
) -> ReviewStats {
    let trash = get_trash_photos(photos, decisions);
    let keep = get_keep_photos(photos, decisions);

    let total = photos.len();
    let decided = match policy {
        DecidedPolicy::KeepOrTrash => trash.len() + keep.len(),
        DecidedPolicy::AnyEntry => decisions.len(),
    };

    ReviewStats {
        total,
        decided,
        trash_count: trash.len(),
        keep_count: keep.len(),
        trash_bytes: trash.iter().map(|p| p.size_bytes).sum(),
        keep_bytes: keep.iter().map(|p| p.size_bytes).sum(),
        pending: total.saturating_sub(decided),
    }
}

/// Every position is kept or trashed. An empty review is never complete.
pub fn is_review_complete(photos: &[Photo], decisions: &DecisionMap) -> bool {
    !photos.is_empty()
        && (0..photos.len()).all(|index| decisions.get(&index).is_some_and(|d| d.is_final()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photos(sizes: &[u64]) -> Vec<Photo> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, size)| {
                let mut photo = Photo::from_bytes(format!("{i}.jpg"), vec![0]);
                photo.size_bytes = *size;
                photo
            })
            .collect()
    }

    #[test]
    fn three_photo_scenario() {
        let photos = photos(&[100, 200, 300]);
        let decisions = DecisionMap::from([(0, Decision::Keep), (1, Decision::Trash)]);

        let stats = calculate_review_stats(&photos, &decisions, DecidedPolicy::default());

        assert_eq!(stats.total, 3);
        assert_eq!(stats.trash_count, 1);
        assert_eq!(stats.keep_count, 1);
        assert_eq!(stats.decided, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.trash_bytes, 200);
        assert_eq!(stats.keep_bytes, 100);
        assert!(!is_review_complete(&photos, &decisions));
    }

    #[test]
    fn policies_differ_on_non_final_entries() {
        let photos = photos(&[1, 1, 1]);
        let decisions = DecisionMap::from([
            (0, Decision::Keep),
            (1, Decision::Undecided),
            (2, Decision::Archive),
        ]);

        let strict = calculate_review_stats(&photos, &decisions, DecidedPolicy::KeepOrTrash);
        let loose = calculate_review_stats(&photos, &decisions, DecidedPolicy::AnyEntry);

        assert_eq!((strict.decided, strict.pending), (1, 2));
        assert_eq!((loose.decided, loose.pending), (3, 0));
    }

    #[test]
    fn pending_saturates_at_zero() {
        let photos = photos(&[1]);
        let decisions = DecisionMap::from([(0, Decision::Keep), (5, Decision::Trash)]);

        let stats = calculate_review_stats(&photos, &decisions, DecidedPolicy::AnyEntry);
        assert_eq!(stats.decided, 2);
        assert_eq!(stats.pending, 0);
    }

    #[test]
    fn out_of_range_positions_are_dropped() {
        let photos = photos(&[10, 20]);
        let decisions = DecisionMap::from([(1, Decision::Trash), (4, Decision::Trash)]);

        let trash = get_trash_photos(&photos, &decisions);
        assert_eq!(trash.len(), 1);
        assert_eq!(trash[0].name, "1.jpg");
    }

    #[test]
    fn filters_follow_review_order() {
        let photos = photos(&[1, 2, 3, 4]);
        let decisions = DecisionMap::from([
            (3, Decision::Keep),
            (0, Decision::Keep),
            (2, Decision::Trash),
        ]);

        let keep: Vec<_> = get_keep_photos(&photos, &decisions)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(keep, vec!["0.jpg", "3.jpg"]);
    }

    #[test]
    fn complete_requires_every_position_final() {
        let photos = photos(&[1, 1]);
        let partial = DecisionMap::from([(0, Decision::Keep), (1, Decision::Archive)]);
        let full = DecisionMap::from([(0, Decision::Keep), (1, Decision::Trash)]);

        assert!(!is_review_complete(&photos, &partial));
        assert!(is_review_complete(&photos, &full));
    }

    #[test]
    fn empty_review_is_never_complete() {
        assert!(!is_review_complete(&[], &DecisionMap::new()));
        let stats = calculate_review_stats(&[], &DecisionMap::new(), DecidedPolicy::default());
        assert_eq!(stats, ReviewStats::default());
    }
}
