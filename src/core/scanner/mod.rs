//! # Scanner Module
//!
//! Turns a chosen folder into the ordered photo list a review starts from.
//!
//! ## Supported Formats
//! - JPEG (.jpg, .jpeg)
//! - PNG (.png)
//! - WebP (.webp)
//! - HEIC (.heic, .heif) - iPhone photos
//! - GIF (.gif)
//! - BMP (.bmp)
//! - TIFF (.tiff, .tif)
//!
//! ## Example
//! ```rust,ignore
//! use photo_cull::core::scanner::{PhotoScanner, ScanConfig, WalkDirScanner};
//!
//! let scanner = WalkDirScanner::new(ScanConfig::default());
//! let result = scanner.scan(Path::new("/Users/me/Pictures/2024"))?;
//! ```

mod filter;
mod walker;

pub use filter::{ImageFilter, DEFAULT_EXTENSIONS};
pub use walker::{ScanConfig, WalkDirScanner};

use crate::core::photo::Photo;
use crate::error::ScanError;
use crate::events::EventSender;
use std::path::{Path, PathBuf};

/// Result of scanning one folder
#[derive(Debug)]
pub struct ScanResult {
    pub root: PathBuf,
    /// Photos sorted by relative path
    pub photos: Vec<Photo>,
    /// Entries that could not be read (non-fatal)
    pub errors: Vec<ScanError>,
}

impl ScanResult {
    pub fn total_bytes(&self) -> u64 {
        self.photos.iter().map(|p| p.size_bytes).sum()
    }
}

/// Source of photos for a review.
///
/// Implement this trait to feed photos from elsewhere (e.g., for testing).
pub trait PhotoScanner: Send + Sync {
    /// Enumerate the photos under `root`
    fn scan(&self, root: &Path) -> Result<ScanResult, ScanError>;

    /// Scan with progress reporting via events
    fn scan_with_events(&self, root: &Path, events: &EventSender) -> Result<ScanResult, ScanError>;
}
