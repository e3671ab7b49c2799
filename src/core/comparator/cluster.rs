//! Greedy single-pass similarity clustering.
//!
//! Photos are visited in order. Each photo not yet in a cluster becomes an
//! anchor and absorbs every later unassigned photo within `max_distance`
//! of the anchor. Membership is only checked against the anchor, so two
//! members of one cluster may be further apart than `max_distance` from
//! each other. Single-photo clusters are dropped.

use crate::core::hasher::Fingerprint;
use crate::core::photo::PhotoId;
use crate::error::CompareError;

/// Default maximum Hamming distance for clustering
pub const DEFAULT_CLUSTER_DISTANCE: u32 = 10;

/// Cluster `photos` greedily by Hamming distance to each anchor.
///
/// Photos without a fingerprint never anchor or join a cluster. Each
/// returned cluster lists its anchor first, then members in input order.
pub fn cluster_fingerprints(
    photos: &[(PhotoId, Option<Fingerprint>)],
    max_distance: u32,
) -> Result<Vec<Vec<PhotoId>>, CompareError> {
    let mut assigned = vec![false; photos.len()];
    let mut clusters = Vec::new();

    for (i, (anchor_id, anchor_fp)) in photos.iter().enumerate() {
        if assigned[i] {
            continue;
        }
        let Some(anchor_fp) = anchor_fp else {
            continue;
        };

        let mut members = vec![*anchor_id];

        for (j, (candidate_id, candidate_fp)) in photos.iter().enumerate().skip(i + 1) {
            if assigned[j] {
                continue;
            }
            let Some(candidate_fp) = candidate_fp else {
                continue;
            };

            if anchor_fp.distance(candidate_fp)? <= max_distance {
                members.push(*candidate_id);
                assigned[j] = true;
            }
        }

        if members.len() > 1 {
            assigned[i] = true;
            clusters.push(members);
        }
    }

    Ok(clusters)
}

/// Candidates within `max_distance` of `target`, excluding `target` itself.
pub fn find_similar(
    target: (PhotoId, Fingerprint),
    candidates: &[(PhotoId, Fingerprint)],
    max_distance: u32,
) -> Result<Vec<PhotoId>, CompareError> {
    let (target_id, target_fp) = target;
    let mut similar = Vec::new();

    for (id, fingerprint) in candidates {
        if *id == target_id {
            continue;
        }
        if target_fp.distance(fingerprint)? <= max_distance {
            similar.push(*id);
        }
    }

    Ok(similar)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(bits: u128) -> Option<Fingerprint> {
        Fingerprint::new(bits, 9, 8).ok()
    }

    fn ids(count: usize) -> Vec<PhotoId> {
        (0..count).map(|_| PhotoId::new()).collect()
    }

    #[test]
    fn unmatched_photos_form_no_clusters() {
        let id = ids(2);
        let photos = vec![(id[0], fp(0)), (id[1], fp(u128::MAX))];

        let clusters = cluster_fingerprints(&photos, 10).unwrap();
        assert!(clusters.is_empty());
    }

    #[test]
    fn close_photos_cluster_around_anchor() {
        let id = ids(4);
        let photos = vec![
            (id[0], fp(0b0000)),
            (id[1], fp(u128::MAX)),
            (id[2], fp(0b0011)),
            (id[3], fp(u128::MAX >> 60)),
        ];

        let clusters = cluster_fingerprints(&photos, 10).unwrap();

        assert_eq!(clusters, vec![vec![id[0], id[2]], vec![id[1], id[3]]]);
    }

    #[test]
    fn clustering_is_anchored_not_transitive() {
        // B is 6 bits from A, C is 6 bits from B but 12 from A.
        // With max distance 10, C is not pulled into A's cluster through B.
        let id = ids(3);
        let a = 0u128;
        let b = 0b11_1111u128;
        let c = 0b1111_1111_1111u128;
        let photos = vec![(id[0], fp(a)), (id[1], fp(b)), (id[2], fp(c))];

        let clusters = cluster_fingerprints(&photos, 10).unwrap();

        assert_eq!(clusters, vec![vec![id[0], id[1]]]);
    }

    #[test]
    fn members_may_be_far_from_each_other() {
        // B and C are each 5 bits from the anchor but 10 apart; with max
        // distance 8 they still share the anchor's cluster.
        let id = ids(3);
        let photos = vec![
            (id[0], fp(0)),
            (id[1], fp(0b1_1111)),
            (id[2], fp(0b11_1110_0000)),
        ];

        let clusters = cluster_fingerprints(&photos, 8).unwrap();

        assert_eq!(clusters, vec![vec![id[0], id[1], id[2]]]);
    }

    #[test]
    fn photos_without_fingerprint_are_skipped() {
        let id = ids(3);
        let photos = vec![(id[0], None), (id[1], fp(1)), (id[2], fp(1))];

        let clusters = cluster_fingerprints(&photos, 10).unwrap();

        assert_eq!(clusters, vec![vec![id[1], id[2]]]);
    }

    #[test]
    fn find_similar_excludes_target() {
        let id = ids(3);
        let target_fp = Fingerprint::new(0, 9, 8).unwrap();
        let candidates = vec![
            (id[0], target_fp),
            (id[1], Fingerprint::new(0b111, 9, 8).unwrap()),
            (id[2], Fingerprint::new(u128::MAX, 9, 8).unwrap()),
        ];

        let similar = find_similar((id[0], target_fp), &candidates, 10).unwrap();

        assert_eq!(similar, vec![id[1]]);
    }
}
