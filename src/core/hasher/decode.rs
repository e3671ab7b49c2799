//! Image decode provider.
//!
//! Uses zune-jpeg for JPEG content (1.5-2x faster than the image crate),
//! converts HEIC/HEIF through the platform converter, and falls back to
//! the image crate for everything else. A conversion failure is always
//! reported as an error; other content is never substituted.

use super::bytes::{sniff_format, ImageBytes, SniffedFormat};
use crate::core::photo::ImageSource;
use crate::error::HashError;
use image::{DynamicImage, ImageBuffer, Luma, Rgb, Rgba};
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

/// Turns an image source into a decoded bitmap.
///
/// Implement this to plug in another decoder (e.g. for tests or a GUI
/// that already holds decoded previews).
pub trait ImageDecoder: Send + Sync {
    /// Decode `source`. `name` is only used for error context.
    fn decode(&self, source: &ImageSource, name: &str) -> Result<DynamicImage, HashError>;
}

/// Default decoder for files and in-memory bytes
#[derive(Debug, Default, Clone, Copy)]
pub struct FileDecoder;

impl FileDecoder {
    pub fn new() -> Self {
        Self
    }

    fn decode_bytes(bytes: &[u8], name: &str) -> Result<DynamicImage, HashError> {
        if bytes.is_empty() {
            return Err(HashError::EmptyImage {
                name: name.to_string(),
            });
        }

        match sniff_format(bytes) {
            SniffedFormat::Jpeg => {
                Self::decode_jpeg(bytes, name).or_else(|_| Self::decode_fallback(bytes, name))
            }
            SniffedFormat::Heic => heic::decode(bytes, name),
            SniffedFormat::Other => Self::decode_fallback(bytes, name),
        }
    }

    fn decode_jpeg(bytes: &[u8], name: &str) -> Result<DynamicImage, HashError> {
        let decode_error = |reason: String| HashError::DecodeError {
            name: name.to_string(),
            reason,
        };

        let options = DecoderOptions::new_fast().jpeg_set_out_colorspace(ColorSpace::RGB);
        let mut decoder = JpegDecoder::new_with_options(bytes, options);

        let pixels = decoder
            .decode()
            .map_err(|e| decode_error(format!("zune-jpeg decode failed: {:?}", e)))?;

        let info = decoder
            .info()
            .ok_or_else(|| decode_error("Failed to get image info".to_string()))?;

        let width = info.width as u32;
        let height = info.height as u32;
        let out_colorspace = decoder.get_output_colorspace().unwrap_or(ColorSpace::RGB);

        let image = match out_colorspace {
            ColorSpace::RGB => {
                let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels)
                        .ok_or_else(|| decode_error("Failed to create RGB buffer".to_string()))?;
                DynamicImage::ImageRgb8(buffer)
            }
            ColorSpace::RGBA => {
                let buffer: ImageBuffer<Rgba<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels)
                        .ok_or_else(|| decode_error("Failed to create RGBA buffer".to_string()))?;
                DynamicImage::ImageRgba8(buffer)
            }
            ColorSpace::Luma => {
                let buffer: ImageBuffer<Luma<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels)
                        .ok_or_else(|| decode_error("Failed to create Luma buffer".to_string()))?;
                DynamicImage::ImageLuma8(buffer)
            }
            _ => return Self::decode_fallback(bytes, name),
        };

        Ok(image)
    }

    fn decode_fallback(bytes: &[u8], name: &str) -> Result<DynamicImage, HashError> {
        image::load_from_memory(bytes).map_err(|e| HashError::DecodeError {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }
}

impl ImageDecoder for FileDecoder {
    fn decode(&self, source: &ImageSource, name: &str) -> Result<DynamicImage, HashError> {
        let bytes = ImageBytes::load(source)?;
        let image = Self::decode_bytes(&bytes, name)?;
        if image.width() == 0 || image.height() == 0 {
            return Err(HashError::EmptyImage {
                name: name.to_string(),
            });
        }
        Ok(image)
    }
}

/// HEIC/HEIF conversion through the macOS `sips` tool.
#[cfg(target_os = "macos")]
mod heic {
    use super::*;
    use std::io::Write;
    use std::process::Command;

    pub fn decode(bytes: &[u8], name: &str) -> Result<DynamicImage, HashError> {
        let conversion_error = |reason: String| HashError::ConversionFailed {
            name: name.to_string(),
            reason,
        };

        // Both temp files are removed on drop, on every return path.
        let mut input = tempfile::Builder::new()
            .prefix("photo-cull-")
            .suffix(".heic")
            .tempfile()
            .map_err(|e| conversion_error(e.to_string()))?;
        input
            .write_all(bytes)
            .map_err(|e| conversion_error(e.to_string()))?;
        let output = tempfile::Builder::new()
            .prefix("photo-cull-")
            .suffix(".jpg")
            .tempfile()
            .map_err(|e| conversion_error(e.to_string()))?;

        let status = Command::new("sips")
            .arg("-s")
            .arg("format")
            .arg("jpeg")
            .arg(input.path())
            .arg("--out")
            .arg(output.path())
            .output()
            .map_err(|e| conversion_error(format!("Failed to run sips: {}", e)))?;

        if !status.status.success() {
            let stderr = String::from_utf8_lossy(&status.stderr);
            return Err(conversion_error(format!("sips conversion failed: {}", stderr)));
        }

        image::open(output.path())
            .map_err(|e| conversion_error(format!("Failed to read converted HEIC: {}", e)))
    }
}

#[cfg(not(target_os = "macos"))]
mod heic {
    use super::*;

    pub fn decode(_bytes: &[u8], name: &str) -> Result<DynamicImage, HashError> {
        Err(HashError::ConversionFailed {
            name: name.to_string(),
            reason: "HEIC conversion is only supported on macOS".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;
    use std::io::Cursor;

    fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, format).unwrap();
        buffer.into_inner()
    }

    fn sample_image() -> DynamicImage {
        DynamicImage::ImageRgb8(ImageBuffer::from_fn(32, 24, |x, y| {
            Rgb([(x * 8) as u8, (y * 10) as u8, 128])
        }))
    }

    #[test]
    fn decodes_png_from_memory() {
        let bytes = encode(&sample_image(), ImageFormat::Png);
        let decoded = FileDecoder::new()
            .decode(&ImageSource::from(bytes), "sample.png")
            .unwrap();

        assert_eq!(decoded.width(), 32);
        assert_eq!(decoded.height(), 24);
    }

    #[test]
    fn decodes_jpeg_from_memory() {
        let bytes = encode(&sample_image(), ImageFormat::Jpeg);
        let decoded = FileDecoder::new()
            .decode(&ImageSource::from(bytes), "sample.jpg")
            .unwrap();

        assert_eq!(decoded.width(), 32);
        assert_eq!(decoded.height(), 24);
    }

    #[test]
    fn garbage_bytes_fail_with_photo_name() {
        let source = ImageSource::from(b"this is not an image".to_vec());
        let error = FileDecoder::new().decode(&source, "garbage.jpg").unwrap_err();
        assert!(error.to_string().contains("garbage.jpg"));
    }

    #[test]
    fn empty_bytes_are_rejected() {
        let source = ImageSource::from(Vec::new());
        let error = FileDecoder::new().decode(&source, "empty.png").unwrap_err();
        assert!(matches!(error, HashError::EmptyImage { .. }));
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn heic_without_converter_is_a_failure_not_a_substitute() {
        let mut bytes = vec![0x00, 0x00, 0x00, 0x18];
        bytes.extend_from_slice(b"ftypheic");
        bytes.extend_from_slice(&[0u8; 32]);

        let error = FileDecoder::new()
            .decode(&ImageSource::from(bytes), "IMG_0001.HEIC")
            .unwrap_err();
        assert!(matches!(error, HashError::ConversionFailed { .. }));
    }
}
