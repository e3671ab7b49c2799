//! Result printing for the `scan` and `clusters` commands.

use super::{display_path, format_bytes, photo_label};
use console::{style, Term};
use photo_cull::core::comparator::{duplicate_groups, DuplicatePair};
use photo_cull::core::detector::SimilarityCluster;
use photo_cull::core::photo::{Photo, PhotoId};
use photo_cull::core::scanner::ScanResult;
use photo_cull::error::{CullError, Result};
use std::collections::HashMap;

pub(crate) fn print_header(term: &Term, title: &str) {
    term.write_line(&format!(
        "{} {}",
        style("Photo Cull").bold().cyan(),
        style(format!("v{} - {}", env!("CARGO_PKG_VERSION"), title)).dim()
    ))
    .ok();
    term.write_line("").ok();
}

fn index_photos(scan: &ScanResult) -> HashMap<PhotoId, &Photo> {
    scan.photos.iter().map(|p| (p.id, p)).collect()
}

pub(crate) fn print_pretty_pairs(term: &Term, scan: &ScanResult, pairs: &[DuplicatePair]) {
    let photos = index_photos(scan);
    let groups = duplicate_groups(pairs);

    term.write_line(&format!("{} Scan Complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();
    term.write_line(&format!(
        "  {} photos ({}) in {}",
        style(scan.photos.len()).cyan(),
        format_bytes(scan.total_bytes()),
        display_path(&scan.root)
    ))
    .ok();
    term.write_line(&format!(
        "  {} duplicate pairs in {} groups",
        style(pairs.len()).cyan(),
        style(groups.len()).cyan()
    ))
    .ok();
    if !scan.errors.is_empty() {
        term.write_line(&format!(
            "  {} entries could not be read",
            style(scan.errors.len()).red()
        ))
        .ok();
    }
    term.write_line("").ok();

    if pairs.is_empty() {
        term.write_line(&format!("  {} No duplicates found!", style("🎉").green()))
            .ok();
        return;
    }

    term.write_line(&format!("{}", style("Duplicate Pairs:").bold().underlined()))
        .ok();
    term.write_line("").ok();

    for pair in pairs {
        let (Some(a), Some(b)) = (photos.get(&pair.photo_a), photos.get(&pair.photo_b)) else {
            continue;
        };
        term.write_line(&format!(
            "  {} {:.1}% ({} bits differ)",
            style(format!("{}", pair.match_type())).yellow(),
            pair.similarity * 100.0,
            pair.distance
        ))
        .ok();
        term.write_line(&format!("    {} {}", style("○").dim(), photo_label(a)))
            .ok();
        term.write_line(&format!("    {} {}", style("○").dim(), photo_label(b)))
            .ok();
        term.write_line("").ok();
    }

    term.write_line(&format!(
        "{}",
        style("No files were deleted. Use `photo-cull review` to decide what goes.").dim()
    ))
    .ok();
}

pub(crate) fn print_json_pairs(scan: &ScanResult, pairs: &[DuplicatePair]) -> Result<()> {
    let photos = index_photos(scan);
    let rel_path = |id: &PhotoId| photos.get(id).map(|p| p.rel_path.clone());

    let output = serde_json::json!({
        "root": scan.root,
        "total_photos": scan.photos.len(),
        "scan_errors": scan.errors.len(),
        "pairs": pairs.iter().map(|pair| {
            serde_json::json!({
                "photo_a": rel_path(&pair.photo_a),
                "photo_b": rel_path(&pair.photo_b),
                "distance": pair.distance,
                "similarity": pair.similarity,
                "match_type": format!("{}", pair.match_type()),
            })
        }).collect::<Vec<_>>(),
        "groups": duplicate_groups(pairs).iter().map(|group| {
            group.iter().filter_map(rel_path).collect::<Vec<_>>()
        }).collect::<Vec<_>>(),
    });

    let text = serde_json::to_string_pretty(&output)
        .map_err(|e| CullError::Config(format!("JSON output: {e}")))?;
    println!("{text}");
    Ok(())
}

pub(crate) fn print_minimal_pairs(scan: &ScanResult, pairs: &[DuplicatePair]) {
    let photos = index_photos(scan);
    for pair in pairs {
        if let (Some(a), Some(b)) = (photos.get(&pair.photo_a), photos.get(&pair.photo_b)) {
            println!("{}\t{}", a.rel_path, b.rel_path);
        }
    }
}

pub(crate) fn print_pretty_clusters(term: &Term, scan: &ScanResult, clusters: &[SimilarityCluster]) {
    term.write_line(&format!("{} Clustering Complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();
    term.write_line(&format!(
        "  {} photos, {} clusters",
        style(scan.photos.len()).cyan(),
        style(clusters.len()).cyan()
    ))
    .ok();
    term.write_line("").ok();

    for (i, cluster) in clusters.iter().enumerate() {
        let bytes: u64 = cluster.photos.iter().map(|p| p.size_bytes).sum();
        term.write_line(&format!(
            "  {} ({} photos, {})",
            style(format!("Cluster {}:", i + 1)).bold(),
            cluster.photos.len(),
            format_bytes(bytes)
        ))
        .ok();

        for photo in &cluster.photos {
            let marker = if photo.id == cluster.representative.id {
                style("★").green().to_string()
            } else {
                style("○").dim().to_string()
            };
            term.write_line(&format!("    {} {}", marker, photo_label(photo)))
                .ok();
        }
        term.write_line("").ok();
    }
}

pub(crate) fn print_json_clusters(clusters: &[SimilarityCluster]) -> Result<()> {
    let output: Vec<_> = clusters
        .iter()
        .map(|cluster| {
            serde_json::json!({
                "id": cluster.id,
                "representative": cluster.representative.rel_path,
                "photos": cluster.photos.iter().map(|p| &p.rel_path).collect::<Vec<_>>(),
            })
        })
        .collect();

    let text = serde_json::to_string_pretty(&output)
        .map_err(|e| CullError::Config(format!("JSON output: {e}")))?;
    println!("{text}");
    Ok(())
}

pub(crate) fn print_minimal_clusters(clusters: &[SimilarityCluster]) {
    for cluster in clusters {
        let paths: Vec<&str> = cluster.photos.iter().map(|p| p.rel_path.as_str()).collect();
        println!("{}", paths.join("\t"));
    }
}
