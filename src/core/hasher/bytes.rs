//! Raw encoded bytes of an image source.
//!
//! Large files are memory mapped, small files are read into a `Vec`,
//! in-memory sources are shared without copying. The handle is dropped
//! (and the mapping released) as soon as decoding finishes.

use crate::core::photo::ImageSource;
use crate::error::HashError;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

/// Minimum file size to use memory-mapped I/O (1MB)
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Encoded image bytes, owned, mapped or shared.
pub enum ImageBytes {
    Owned(Vec<u8>),
    Mapped(Mmap),
    Shared(Arc<[u8]>),
}

impl ImageBytes {
    /// Load the encoded bytes behind `source`.
    pub fn load(source: &ImageSource) -> Result<Self, HashError> {
        match source {
            ImageSource::File(path) => read_file(path),
            ImageSource::Memory(bytes) => Ok(ImageBytes::Shared(Arc::clone(bytes))),
        }
    }
}

impl AsRef<[u8]> for ImageBytes {
    fn as_ref(&self) -> &[u8] {
        match self {
            ImageBytes::Owned(v) => v,
            ImageBytes::Mapped(m) => m,
            ImageBytes::Shared(s) => s,
        }
    }
}

impl std::ops::Deref for ImageBytes {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_ref()
    }
}

fn read_file(path: &Path) -> Result<ImageBytes, HashError> {
    let io_error = |source| HashError::IoError {
        path: path.to_path_buf(),
        source,
    };

    let metadata = std::fs::metadata(path).map_err(io_error)?;

    if metadata.len() < MMAP_THRESHOLD {
        return std::fs::read(path).map(ImageBytes::Owned).map_err(io_error);
    }

    let file = File::open(path).map_err(io_error)?;
    // SAFETY: the mapping is read-only and lives no longer than this decode.
    let mmap = unsafe { Mmap::map(&file) }.map_err(io_error)?;
    Ok(ImageBytes::Mapped(mmap))
}

/// Container format as seen from the leading bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SniffedFormat {
    Jpeg,
    Heic,
    Other,
}

/// Identify the container from its magic bytes.
pub fn sniff_format(bytes: &[u8]) -> SniffedFormat {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return SniffedFormat::Jpeg;
    }

    if bytes.len() >= 12 && &bytes[4..8] == b"ftyp" {
        let brand = &bytes[8..12];
        if brand == b"heic" || brand == b"heix" || brand == b"mif1" || brand == b"hevc" {
            return SniffedFormat::Heic;
        }
    }

    SniffedFormat::Other
}
