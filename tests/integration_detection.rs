//! Integration tests for scanning and duplicate detection.
//!
//! These tests verify end-to-end behavior on real files:
//! - Empty and missing folders
//! - Near-duplicates across PNG and JPEG
//! - Corrupt files don't abort the batch
//! - Sequential and parallel runs agree

use image::{DynamicImage, ImageBuffer, Rgb};
use photo_cull::core::detector::DuplicateDetector;
use photo_cull::core::scanner::{PhotoScanner, ScanConfig, WalkDirScanner};
use photo_cull::error::ScanError;
use photo_cull::events::{Event, EventChannel, HashEvent, ScanEvent};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Horizontal gradient in 20..=220 (+ `lift`), darkening to the right unless `rising`
fn gradient(rising: bool, lift: u8) -> DynamicImage {
    DynamicImage::ImageRgb8(ImageBuffer::from_fn(120, 90, |x, _| {
        let step = (x * 200 / 119) as u8;
        let base = if rising { 20 + step } else { 220 - step };
        let v = base.saturating_add(lift);
        Rgb([v, v, v])
    }))
}

fn save(dir: &Path, rel_path: &str, image: &DynamicImage) {
    let path = dir.join(rel_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    image.save(&path).unwrap();
}

fn scan(dir: &Path) -> photo_cull::core::scanner::ScanResult {
    WalkDirScanner::new(ScanConfig::default()).scan(dir).unwrap()
}

#[test]
fn empty_folder_has_nothing_to_compare() {
    let temp_dir = TempDir::new().unwrap();
    let result = scan(temp_dir.path());

    let pairs = DuplicateDetector::builder()
        .build()
        .unwrap()
        .detect_duplicates(&result.photos, |_, _| {})
        .unwrap();

    assert!(result.photos.is_empty());
    assert!(pairs.is_empty());
}

#[test]
fn missing_folder_is_reported() {
    let result = WalkDirScanner::new(ScanConfig::default())
        .scan(Path::new("/nonexistent/path/that/does/not/exist"));

    assert!(matches!(result, Err(ScanError::DirectoryNotFound { .. })));
}

#[test]
fn near_duplicates_found_across_formats() {
    let temp_dir = TempDir::new().unwrap();
    save(temp_dir.path(), "a_original.png", &gradient(false, 0));
    save(temp_dir.path(), "b_brighter.png", &gradient(false, 20));
    save(temp_dir.path(), "c_export.jpg", &gradient(false, 0));
    save(temp_dir.path(), "d_other.png", &gradient(true, 0));

    let result = scan(temp_dir.path());
    assert_eq!(result.photos.len(), 4);

    let detector = DuplicateDetector::builder().build().unwrap();
    let pairs = detector.detect_duplicates(&result.photos, |_, _| {}).unwrap();

    // a, b and c pair with each other; d pairs with nothing
    let other = &result.photos[3];
    assert_eq!(other.name, "d_other.png");
    assert_eq!(pairs.len(), 3);
    assert!(pairs.iter().all(|p| !p.involves(other.id)));
    assert!(pairs.windows(2).all(|w| w[0].similarity >= w[1].similarity));
}

#[test]
fn corrupt_file_is_skipped_gracefully() {
    let temp_dir = TempDir::new().unwrap();
    save(temp_dir.path(), "a.png", &gradient(true, 0));
    save(temp_dir.path(), "b.png", &gradient(true, 10));
    fs::write(temp_dir.path().join("corrupt.jpg"), b"this is not a valid image file").unwrap();

    let result = scan(temp_dir.path());
    assert_eq!(result.photos.len(), 3);

    let (sender, receiver) = EventChannel::new();
    let pairs = DuplicateDetector::builder()
        .build()
        .unwrap()
        .detect_duplicates_with_events(&result.photos, &sender)
        .unwrap();
    drop(sender);

    assert_eq!(pairs.len(), 1);

    let events: Vec<Event> = receiver.iter().collect();
    let failed = events.iter().find_map(|e| match e {
        Event::Hash(HashEvent::Completed { total_hashed, failed }) => Some((*total_hashed, *failed)),
        _ => None,
    });
    assert_eq!(failed, Some((2, 1)));
}

#[test]
fn parallel_detection_matches_sequential() {
    let temp_dir = TempDir::new().unwrap();
    for i in 0..8u8 {
        save(temp_dir.path(), &format!("falling_{i}.png"), &gradient(false, i * 3));
        save(temp_dir.path(), &format!("rising_{i}.png"), &gradient(true, i * 3));
    }
    let result = scan(temp_dir.path());

    let sequential = DuplicateDetector::builder()
        .build()
        .unwrap()
        .detect_duplicates(&result.photos, |_, _| {})
        .unwrap();

    let mut progress = Vec::new();
    let parallel = DuplicateDetector::builder()
        .parallelism(4)
        .build()
        .unwrap()
        .detect_duplicates(&result.photos, |done, total| progress.push((done, total)))
        .unwrap();

    assert_eq!(sequential, parallel);
    // 8 choose 2, twice
    assert_eq!(parallel.len(), 56);
    assert_eq!(progress.len(), 16);
    assert!(progress.windows(2).all(|w| w[0].0 < w[1].0));
    assert_eq!(progress.last(), Some(&(16, 16)));
}

#[test]
fn scan_events_list_found_photos() {
    let temp_dir = TempDir::new().unwrap();
    save(temp_dir.path(), "2024/one.png", &gradient(true, 0));
    save(temp_dir.path(), "two.png", &gradient(true, 0));

    let (sender, receiver) = EventChannel::new();
    WalkDirScanner::new(ScanConfig::default())
        .scan_with_events(temp_dir.path(), &sender)
        .unwrap();
    drop(sender);

    let mut found: Vec<String> = receiver
        .iter()
        .filter_map(|e| match e {
            Event::Scan(ScanEvent::PhotoFound { rel_path }) => Some(rel_path),
            _ => None,
        })
        .collect();
    found.sort();

    assert_eq!(found, vec!["2024/one.png", "two.png"]);
}

#[test]
fn clusters_from_folder() {
    let temp_dir = TempDir::new().unwrap();
    save(temp_dir.path(), "a.png", &gradient(false, 0));
    save(temp_dir.path(), "b.png", &gradient(true, 0));
    save(temp_dir.path(), "c.png", &gradient(false, 5));
    save(temp_dir.path(), "d.png", &gradient(true, 5));
    save(temp_dir.path(), "e.png", &gradient(true, 15));

    let result = scan(temp_dir.path());
    let clusters = DuplicateDetector::builder()
        .build()
        .unwrap()
        .cluster_similar_photos(&result.photos, |_, _| {})
        .unwrap();

    let names: Vec<Vec<&str>> = clusters
        .iter()
        .map(|c| c.photos.iter().map(|p| p.name.as_str()).collect())
        .collect();
    assert_eq!(names, vec![vec!["a.png", "c.png"], vec!["b.png", "d.png", "e.png"]]);
}
