//! Which files count as photos.

use std::collections::HashSet;
use std::path::Path;

/// Extensions picked up by default (compared lowercase)
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "tiff", "tif", "heic", "heif",
];

/// Accepts supported image files, optionally skipping hidden ones
#[derive(Debug, Clone)]
pub struct ImageFilter {
    extensions: HashSet<String>,
    include_hidden: bool,
}

impl ImageFilter {
    pub fn new() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            include_hidden: false,
        }
    }

    /// Include names starting with `.`
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Replace the accepted extensions
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    pub fn is_hidden(&self, path: &Path) -> bool {
        !self.include_hidden
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| name.starts_with('.'))
    }

    pub fn should_include(&self, path: &Path) -> bool {
        if self.is_hidden(path) {
            return false;
        }

        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext.to_lowercase()))
    }
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_supported_extensions_in_any_case() {
        let filter = ImageFilter::new();
        assert!(filter.should_include(Path::new("/photos/image.jpg")));
        assert!(filter.should_include(Path::new("/photos/image.JPEG")));
        assert!(filter.should_include(Path::new("/photos/IMG_1234.HEIC")));
        assert!(filter.should_include(Path::new("/photos/scan.tif")));
    }

    #[test]
    fn rejects_other_files() {
        let filter = ImageFilter::new();
        assert!(!filter.should_include(Path::new("/photos/document.pdf")));
        assert!(!filter.should_include(Path::new("/photos/video.mp4")));
        assert!(!filter.should_include(Path::new("/photos/no_extension")));
    }

    #[test]
    fn hidden_files_are_skipped_unless_requested() {
        let hidden = Path::new("/photos/.thumb.jpg");
        assert!(!ImageFilter::new().should_include(hidden));
        assert!(ImageFilter::new().with_hidden(true).should_include(hidden));
    }

    #[test]
    fn custom_extensions_are_normalized() {
        let filter = ImageFilter::new().with_extensions(vec![".PNG".to_string()]);
        assert!(filter.should_include(Path::new("a.png")));
        assert!(!filter.should_include(Path::new("a.jpg")));
    }
}
