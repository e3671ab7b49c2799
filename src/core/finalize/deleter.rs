//! Removal of trashed photos, either to the system trash or for good.

use crate::core::photo::Photo;
use crate::error::DeleteError;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{info, warn};

/// Outcome of deleting a batch of photos
#[derive(Debug, Default)]
pub struct DeleteReport {
    /// Relative paths removed (or that would be, in a dry run)
    pub deleted: Vec<String>,
    pub failed: Vec<(String, DeleteError)>,
    pub bytes_freed: u64,
    pub dry_run: bool,
}

impl DeleteReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Removes photos from wherever they are stored
pub trait PhotoDeleter: Send + Sync {
    fn delete(&self, photo: &Photo) -> Result<(), DeleteError>;

    /// Whether `delete` only pretends
    fn is_dry_run(&self) -> bool {
        false
    }

    /// Delete every photo, carrying on past individual failures
    fn delete_all(&self, photos: &[&Photo]) -> DeleteReport {
        let mut report = DeleteReport {
            dry_run: self.is_dry_run(),
            ..DeleteReport::default()
        };

        for photo in photos {
            match self.delete(photo) {
                Ok(()) => {
                    report.deleted.push(photo.rel_path.clone());
                    report.bytes_freed += photo.size_bytes;
                }
                Err(e) => {
                    warn!(photo = %photo.rel_path, error = %e, "Failed to delete photo");
                    report.failed.push((photo.rel_path.clone(), e));
                }
            }
        }

        info!(
            deleted = report.deleted.len(),
            failed = report.failed.len(),
            bytes = report.bytes_freed,
            dry_run = report.dry_run,
            "Deletion finished"
        );
        report
    }
}

/// Full path for a relative photo path under `root`. Absolute paths and
/// `..` segments are refused so nothing outside the root can be touched.
fn resolve_under(root: &Path, rel_path: &str) -> Result<PathBuf, DeleteError> {
    let relative = Path::new(rel_path);
    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

    if rel_path.is_empty() || escapes {
        return Err(DeleteError::InvalidPath {
            rel_path: rel_path.to_string(),
        });
    }

    Ok(rel_path.split('/').fold(root.to_path_buf(), |path, part| path.join(part)))
}

/// Dry-run check: the file exists and is not read-only
fn check_removable(path: PathBuf) -> Result<(), DeleteError> {
    let metadata = fs::metadata(&path).map_err(|e| DeleteError::from_io(path.clone(), e))?;
    if metadata.permissions().readonly() {
        return Err(DeleteError::PermissionDenied { path });
    }
    Ok(())
}

/// Moves `root/rel_path` to the operating system's trash, so a cull can
/// be undone from the file manager.
#[derive(Debug, Clone)]
pub struct TrashDeleter {
    root: PathBuf,
    dry_run: bool,
}

impl TrashDeleter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dry_run: false,
        }
    }

    /// Check each file but leave it in place
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PhotoDeleter for TrashDeleter {
    fn delete(&self, photo: &Photo) -> Result<(), DeleteError> {
        let path = resolve_under(&self.root, &photo.rel_path)?;

        if self.dry_run {
            return check_removable(path);
        }

        if !path.exists() {
            return Err(DeleteError::NotFound { path });
        }

        trash::delete(&path).map_err(|e| DeleteError::Trash {
            reason: e.to_string(),
            path,
        })
    }

    fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

/// Permanently deletes `root/rel_path` from the local filesystem
#[derive(Debug, Clone)]
pub struct FsDeleter {
    root: PathBuf,
    dry_run: bool,
}

impl FsDeleter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dry_run: false,
        }
    }

    /// Check each file but leave it in place
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, rel_path: &str) -> Result<PathBuf, DeleteError> {
        resolve_under(&self.root, rel_path)
    }
}

impl PhotoDeleter for FsDeleter {
    fn delete(&self, photo: &Photo) -> Result<(), DeleteError> {
        let path = self.resolve(&photo.rel_path)?;

        if self.dry_run {
            return check_removable(path);
        }

        fs::remove_file(&path).map_err(|e| DeleteError::from_io(path, e))
    }

    fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}
