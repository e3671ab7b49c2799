//! # Hasher Module
//!
//! Computes difference-hash (dHash) fingerprints for photos.
//!
//! ## How It Works
//! 1. Decode the image (JPEG via zune-jpeg, HEIC via conversion, others via `image`)
//! 2. Resample to (width+1) x height with a fixed bilinear filter
//! 3. Convert to luminance with `0.299R + 0.587G + 0.114B`
//! 4. Set a bit wherever a pixel is brighter than its right neighbour
//!
//! The default 9x8 grid gives a 72-bit fingerprint, stored in a `u128`.
//!
//! ## Example
//! ```rust,ignore
//! use photo_cull::core::hasher::{HashConfig, DifferenceHasher};
//!
//! let hasher = DifferenceHasher::new(&HashConfig::default())?;
//! let fingerprint = hasher.hash_photo(&photo)?;
//! println!("{}", fingerprint.to_hex());
//! ```

mod bytes;
mod decode;
mod difference;
mod fingerprint;
mod resize;

pub use bytes::{sniff_format, ImageBytes, SniffedFormat};
pub use decode::{FileDecoder, ImageDecoder};
pub use difference::DifferenceHasher;
pub use fingerprint::Fingerprint;
pub use resize::{luminance, LumaResizer};

use crate::core::photo::ImageSource;
use crate::error::{CompareError, CullError};

/// Default grid width (columns compared per row)
pub const DEFAULT_HASH_WIDTH: u32 = 9;
/// Default grid height (rows)
pub const DEFAULT_HASH_HEIGHT: u32 = 8;
/// Widest fingerprint a `u128` can hold
pub const MAX_HASH_BITS: u32 = 128;

/// Grid configuration for fingerprinting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashConfig {
    width: u32,
    height: u32,
}

impl HashConfig {
    /// Create a configuration with the default 9x8 grid
    pub fn new() -> Self {
        Self {
            width: DEFAULT_HASH_WIDTH,
            height: DEFAULT_HASH_HEIGHT,
        }
    }

    /// Set the grid width (bits per row)
    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set the grid height (rows)
    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn grid_width(&self) -> u32 {
        self.width
    }

    pub fn grid_height(&self) -> u32 {
        self.height
    }

    /// Total bits produced by this grid
    pub fn bit_count(&self) -> u32 {
        self.width * self.height
    }

    /// Reject grids that can't be packed into a fingerprint
    pub fn validate(&self) -> Result<(), CompareError> {
        let invalid = CompareError::InvalidGrid {
            width: self.width,
            height: self.height,
        };
        if self.width == 0 || self.height == 0 || self.width > 255 || self.height > 255 {
            return Err(invalid);
        }
        if self.bit_count() > MAX_HASH_BITS {
            return Err(invalid);
        }
        Ok(())
    }
}

impl Default for HashConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Fingerprint a single image source with the default decoder.
///
/// Fails with a hash error when the image can't be decoded; callers in a
/// batch should treat that as "no fingerprint available".
pub fn compute_hash(source: &ImageSource, config: &HashConfig) -> Result<Fingerprint, CullError> {
    let hasher = DifferenceHasher::new(config)?;
    let name = source
        .path()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "<memory>".to_string());
    Ok(hasher.hash_source(source, &name)?)
}
