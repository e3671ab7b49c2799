//! Integration tests for the review flow: scan, detect, review, finalize.

use assert_fs::prelude::*;
use assert_fs::TempDir;
use image::{DynamicImage, ImageBuffer, Rgb};
use photo_cull::core::detector::DuplicateDetector;
use photo_cull::core::finalize::{
    finalize_review, DeleteScript, FsDeleter, ScriptPlatform, FILE_LIST_NAME,
};
use photo_cull::core::review::{NavigationStep, ReviewAction, ReviewSession};
use photo_cull::core::scanner::{PhotoScanner, ScanConfig, WalkDirScanner};
use predicates::prelude::*;

fn gradient(rising: bool, lift: u8) -> DynamicImage {
    DynamicImage::ImageRgb8(ImageBuffer::from_fn(120, 90, |x, _| {
        let step = (x * 200 / 119) as u8;
        let base = if rising { 20 + step } else { 220 - step };
        let v = base.saturating_add(lift);
        Rgb([v, v, v])
    }))
}

/// Folder with one duplicate pair (`a`, `c`) and two unrelated photos
fn folder() -> TempDir {
    let dir = TempDir::new().unwrap();
    gradient(false, 0).save(dir.child("a.png").path()).unwrap();
    gradient(true, 0).save(dir.child("b.png").path()).unwrap();
    gradient(false, 12).save(dir.child("c.png").path()).unwrap();
    // A directory with an image extension is not a photo
    dir.child("notes/d.png").create_dir_all().unwrap();
    dir.child("z.txt").write_str("not a photo").unwrap();
    dir
}

fn load_session(dir: &TempDir) -> ReviewSession {
    let scan = WalkDirScanner::new(ScanConfig::default())
        .scan(dir.path())
        .unwrap();
    let pairs = DuplicateDetector::builder()
        .build()
        .unwrap()
        .detect_duplicates(&scan.photos, |_, _| {})
        .unwrap();
    ReviewSession::with_duplicates(scan.photos, &pairs)
}

fn names(session: &ReviewSession) -> Vec<&str> {
    session.photos().iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn duplicates_are_reviewed_back_to_back() {
    let dir = folder();
    let session = load_session(&dir);

    assert_eq!(names(&session), vec!["b.png", "a.png", "c.png"]);
    assert!(!session.current_has_duplicates());
    assert_eq!(session.duplicates_of(1)[0].name, "c.png");
    assert_eq!(session.duplicates_of(2)[0].name, "a.png");
}

#[test]
fn review_then_delete_trashed_duplicate() {
    let dir = folder();
    let mut session = load_session(&dir);

    assert_eq!(session.apply(ReviewAction::Keep), NavigationStep::Advance(1));
    assert_eq!(session.apply(ReviewAction::Skip), NavigationStep::Advance(2));
    assert_eq!(session.apply(ReviewAction::Trash), NavigationStep::CompleteTour);
    assert_eq!(session.next(), NavigationStep::JumpTo(1));
    assert_eq!(session.apply(ReviewAction::Keep), NavigationStep::ReadyToFinalize);

    let report = finalize_review(&mut session, &FsDeleter::new(dir.path()));

    assert!(report.is_clean());
    assert_eq!(report.deleted, vec!["c.png"]);
    dir.child("c.png").assert(predicate::path::missing());
    dir.child("a.png").assert(predicate::path::exists());
    dir.child("b.png").assert(predicate::path::exists());
    dir.child("z.txt").assert("not a photo");
    assert!(session.is_empty());
}

#[test]
fn dry_run_deletes_nothing() {
    let dir = folder();
    let mut session = load_session(&dir);
    session.apply(ReviewAction::Trash);
    session.apply(ReviewAction::Trash);

    let report = finalize_review(&mut session, &FsDeleter::new(dir.path()).dry_run(true));

    assert_eq!(report.deleted.len(), 2);
    dir.child("a.png").assert(predicate::path::exists());
    dir.child("b.png").assert(predicate::path::exists());
}

#[test]
fn exported_script_lists_trashed_photos() {
    let dir = folder();
    let export = TempDir::new().unwrap();
    let mut session = load_session(&dir);
    session.apply(ReviewAction::Trash);
    session.apply(ReviewAction::Keep);
    session.apply(ReviewAction::Trash);

    let trash = session.trash_photos();
    DeleteScript::new(ScriptPlatform::Unix)
        .write(export.path(), &trash)
        .unwrap();

    export.child(FILE_LIST_NAME).assert("b.png\nc.png\n");
    export
        .child("delete-files.sh")
        .assert(predicate::str::starts_with("#!/bin/bash").and(predicate::str::contains(
            "files-to-delete.txt",
        )));
    dir.child("b.png").assert(predicate::path::exists());
}
