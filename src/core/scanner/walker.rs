//! Directory walking using walkdir.

use super::{filter::ImageFilter, PhotoScanner, ScanResult};
use crate::core::photo::{ImageSource, Photo};
use crate::error::ScanError;
use crate::events::{null_sender, Event, EventSender, ScanEvent};
use std::path::{Component, Path};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Configuration for the directory scanner
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    pub follow_symlinks: bool,
    /// Include hidden files and descend into hidden directories
    pub include_hidden: bool,
    /// Maximum directory depth (None = unlimited)
    pub max_depth: Option<usize>,
    /// Custom extensions (None = defaults)
    pub extensions: Option<Vec<String>>,
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = Some(extensions);
        self
    }
}

/// Scanner that walks a folder tree and collects photos as file sources
pub struct WalkDirScanner {
    config: ScanConfig,
    filter: ImageFilter,
}

impl WalkDirScanner {
    pub fn new(config: ScanConfig) -> Self {
        let mut filter = ImageFilter::new().with_hidden(config.include_hidden);
        if let Some(extensions) = &config.extensions {
            filter = filter.with_extensions(extensions.clone());
        }
        Self { config, filter }
    }

    fn walk(&self, root: &Path, events: &EventSender) -> ScanResult {
        let mut photos = Vec::new();
        let mut errors = Vec::new();

        let mut walker = WalkDir::new(root).follow_links(self.config.follow_symlinks);
        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        let entries = walker
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.filter.is_hidden(entry.path()));

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let error = walk_error(e);
                    warn!(error = %error, "Skipping unreadable entry");
                    events.send(Event::Scan(ScanEvent::Error {
                        path: error_path(&error),
                        message: error.to_string(),
                    }));
                    errors.push(error);
                    continue;
                }
            };

            if entry.file_type().is_dir() || !self.filter.should_include(entry.path()) {
                continue;
            }

            match photo_from_entry(root, &entry) {
                Ok(photo) => {
                    events.send(Event::Scan(ScanEvent::PhotoFound {
                        rel_path: photo.rel_path.clone(),
                    }));
                    photos.push(photo);
                }
                Err(error) => {
                    warn!(error = %error, "Skipping unreadable photo");
                    events.send(Event::Scan(ScanEvent::Error {
                        path: entry.path().to_path_buf(),
                        message: error.to_string(),
                    }));
                    errors.push(error);
                }
            }
        }

        photos.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));

        ScanResult {
            root: root.to_path_buf(),
            photos,
            errors,
        }
    }
}

impl PhotoScanner for WalkDirScanner {
    fn scan(&self, root: &Path) -> Result<ScanResult, ScanError> {
        self.scan_with_events(root, &null_sender())
    }

    fn scan_with_events(&self, root: &Path, events: &EventSender) -> Result<ScanResult, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        events.send(Event::Scan(ScanEvent::Started {
            root: root.to_path_buf(),
        }));

        let result = self.walk(root, events);

        debug!(
            root = %root.display(),
            photos = result.photos.len(),
            errors = result.errors.len(),
            "Scan finished"
        );
        events.send(Event::Scan(ScanEvent::Completed {
            total_photos: result.photos.len(),
        }));

        Ok(result)
    }
}

fn photo_from_entry(root: &Path, entry: &DirEntry) -> Result<Photo, ScanError> {
    let path = entry.path();
    let metadata = entry.metadata().map_err(walk_error)?;

    let name = entry.file_name().to_string_lossy().into_owned();
    let rel_path = relative_path(root, path);

    Ok(Photo::new(
        name,
        rel_path,
        metadata.len(),
        ImageSource::File(path.to_path_buf()),
    ))
}

/// `path` relative to `root`, joined with `/` on every platform
fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn walk_error(e: walkdir::Error) -> ScanError {
    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
    if e.io_error().map(|io| io.kind()) == Some(std::io::ErrorKind::PermissionDenied) {
        return ScanError::PermissionDenied { path };
    }
    let source = e
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
    ScanError::ReadDirectory { path, source }
}

fn error_path(error: &ScanError) -> std::path::PathBuf {
    match error {
        ScanError::DirectoryNotFound { path }
        | ScanError::PermissionDenied { path }
        | ScanError::ReadDirectory { path, .. } => path.clone(),
    }
}
