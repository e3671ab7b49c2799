//! Difference Hash (dHash) implementation.
//!
//! dHash works by:
//! 1. Resampling the image to (width+1) x height
//! 2. Converting to luminance
//! 3. Comparing each pixel to the one to its right
//! 4. If the left pixel is brighter, setting bit `row * width + col`

use super::decode::{FileDecoder, ImageDecoder};
use super::fingerprint::Fingerprint;
use super::resize::LumaResizer;
use super::HashConfig;
use crate::core::photo::{ImageSource, Photo};
use crate::error::{CompareError, HashError};
use image::DynamicImage;
use std::sync::Arc;

/// Computes dHash fingerprints with a fixed grid
#[derive(Clone)]
pub struct DifferenceHasher {
    width: u8,
    height: u8,
    decoder: Arc<dyn ImageDecoder>,
}

impl DifferenceHasher {
    /// Create a hasher for `config` using the default file decoder
    pub fn new(config: &HashConfig) -> Result<Self, CompareError> {
        Self::with_decoder(config, Arc::new(FileDecoder::new()))
    }

    /// Create a hasher that decodes through `decoder`
    pub fn with_decoder(
        config: &HashConfig,
        decoder: Arc<dyn ImageDecoder>,
    ) -> Result<Self, CompareError> {
        config.validate()?;
        Ok(Self {
            width: config.grid_width() as u8,
            height: config.grid_height() as u8,
            decoder,
        })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether `fingerprint` was produced with this hasher's grid
    pub fn accepts(&self, fingerprint: &Fingerprint) -> bool {
        fingerprint.width() == self.width && fingerprint.height() == self.height
    }

    /// Fingerprint an already decoded image
    pub fn hash_image(&self, image: &DynamicImage, name: &str) -> Result<Fingerprint, HashError> {
        let width = u32::from(self.width);
        let height = u32::from(self.height);

        // One extra column so every cell has a right neighbour
        let gray = LumaResizer::new().resize_to_luma(image, width + 1, height, name)?;

        let mut bits: u128 = 0;
        for y in 0..height {
            for x in 0..width {
                let left = gray.get_pixel(x, y)[0];
                let right = gray.get_pixel(x + 1, y)[0];

                if left > right {
                    bits |= 1u128 << (y * width + x);
                }
            }
        }

        Ok(Fingerprint::from_grid_bits(bits, self.width, self.height))
    }

    /// Decode `source` and fingerprint it. The decoded bitmap is dropped
    /// before returning, on success and failure alike.
    pub fn hash_source(&self, source: &ImageSource, name: &str) -> Result<Fingerprint, HashError> {
        let image = self.decoder.decode(source, name)?;
        self.hash_image(&image, name)
    }

    /// Fingerprint a photo, reusing an attached fingerprint when it has
    /// the right grid
    pub fn hash_photo(&self, photo: &Photo) -> Result<Fingerprint, HashError> {
        match photo.fingerprint {
            Some(fingerprint) if self.accepts(&fingerprint) => Ok(fingerprint),
            _ => self.hash_source(&photo.source, &photo.name),
        }
    }
}

impl std::fmt::Debug for DifferenceHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DifferenceHasher")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
