//! Resampling and luminance conversion for fingerprinting.
//!
//! Resamples in RGB with fast_image_resize (SIMD accelerated) using a
//! fixed bilinear convolution, then converts each pixel to luminance with
//! `0.299R + 0.587G + 0.114B`, rounded to the nearest integer. The image
//! crate's own grayscale conversion uses different weights, so it is not
//! used here. Alpha is discarded.

use crate::error::HashError;
use fast_image_resize::{images::Image, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma};

/// Luminance of one RGB pixel, rounded like a browser canvas would.
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let value = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    value.round().clamp(0.0, 255.0) as u8
}

/// Reusable resizer
pub struct LumaResizer {
    resizer: Resizer,
}

impl LumaResizer {
    pub fn new() -> Self {
        Self {
            resizer: Resizer::new(),
        }
    }

    /// Resample `image` to `width` x `height` and convert to luminance.
    pub fn resize_to_luma(
        &mut self,
        image: &DynamicImage,
        width: u32,
        height: u32,
        name: &str,
    ) -> Result<GrayImage, HashError> {
        let resample_error = |reason: String| HashError::ResampleFailed {
            name: name.to_string(),
            reason,
        };

        let rgb = image.to_rgb8();
        let (src_width, src_height) = rgb.dimensions();

        if src_width == 0 || src_height == 0 {
            return Err(HashError::EmptyImage {
                name: name.to_string(),
            });
        }

        if width == 0 || height == 0 {
            return Err(resample_error("Invalid destination dimensions".to_string()));
        }

        let src_image = Image::from_vec_u8(src_width, src_height, rgb.into_raw(), PixelType::U8x3)
            .map_err(|e| resample_error(format!("Failed to create source image: {}", e)))?;

        let mut dst_image = Image::new(width, height, PixelType::U8x3);

        let options =
            ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear));

        self.resizer
            .resize(&src_image, &mut dst_image, &options)
            .map_err(|e| resample_error(format!("Resize failed: {}", e)))?;

        let luma: Vec<u8> = dst_image
            .buffer()
            .chunks_exact(3)
            .map(|px| luminance(px[0], px[1], px[2]))
            .collect();

        let result: ImageBuffer<Luma<u8>, Vec<u8>> = ImageBuffer::from_raw(width, height, luma)
            .ok_or_else(|| resample_error("Failed to create result buffer".to_string()))?;

        Ok(result)
    }
}

impl Default for LumaResizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn create_test_image(width: u32, height: u32) -> DynamicImage {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            let r = (x * 255 / width.max(1)) as u8;
            let g = (y * 255 / height.max(1)) as u8;
            let b = ((x + y) * 128 / (width + height).max(1)) as u8;
            Rgb([r, g, b])
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn luminance_uses_rec601_weights() {
        assert_eq!(luminance(0, 0, 0), 0);
        assert_eq!(luminance(255, 255, 255), 255);
        // 0.299 * 255 = 76.245
        assert_eq!(luminance(255, 0, 0), 76);
        // 0.587 * 255 = 149.685
        assert_eq!(luminance(0, 255, 0), 150);
        // 0.114 * 255 = 29.07
        assert_eq!(luminance(0, 0, 255), 29);
    }

    #[test]
    fn resize_produces_hash_grid_dimensions() {
        let mut resizer = LumaResizer::new();
        let resized = resizer
            .resize_to_luma(&create_test_image(200, 100), 10, 8, "test")
            .unwrap();

        assert_eq!(resized.width(), 10);
        assert_eq!(resized.height(), 8);
    }

    #[test]
    fn upsamples_tiny_images() {
        let mut resizer = LumaResizer::new();
        let resized = resizer
            .resize_to_luma(&create_test_image(2, 2), 10, 8, "tiny")
            .unwrap();

        assert_eq!(resized.dimensions(), (10, 8));
    }

    #[test]
    fn resampling_is_deterministic() {
        let mut resizer = LumaResizer::new();
        let image = create_test_image(64, 48);

        let first = resizer.resize_to_luma(&image, 10, 8, "a").unwrap();
        let second = resizer.resize_to_luma(&image, 10, 8, "a").unwrap();

        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn zero_destination_is_rejected() {
        let mut resizer = LumaResizer::new();
        let result = resizer.resize_to_luma(&create_test_image(8, 8), 0, 8, "zero");
        assert!(matches!(result, Err(HashError::ResampleFailed { .. })));
    }
}
