//! The fixed-width perceptual fingerprint.

use super::MAX_HASH_BITS;
use crate::error::CompareError;

/// A dHash fingerprint: `width * height` bits packed into a `u128`.
///
/// Bit `row * width + col` is set when the pixel at `(col, row)` is
/// strictly brighter than its right neighbour. Fingerprints are only
/// comparable when both were produced with the same grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    bits: u128,
    width: u8,
    height: u8,
}

impl Fingerprint {
    /// Wrap raw bits for a `width` x `height` grid. Bits beyond
    /// `width * height` are cleared.
    ///
    /// Fails when the grid is empty or needs more than `MAX_HASH_BITS` bits.
    pub fn new(bits: u128, width: u8, height: u8) -> Result<Self, CompareError> {
        let count = u32::from(width) * u32::from(height);
        if count == 0 || count > MAX_HASH_BITS {
            return Err(CompareError::InvalidGrid {
                width: u32::from(width),
                height: u32::from(height),
            });
        }
        Ok(Self::from_grid_bits(bits, width, height))
    }

    /// Build from a grid already checked by `HashConfig::validate`.
    pub(crate) fn from_grid_bits(bits: u128, width: u8, height: u8) -> Self {
        let count = u32::from(width) * u32::from(height);
        let bits = if count >= MAX_HASH_BITS {
            bits
        } else {
            bits & ((1u128 << count) - 1)
        };
        Self {
            bits,
            width,
            height,
        }
    }

    pub fn bits(&self) -> u128 {
        self.bits
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Total number of bits in this fingerprint
    pub fn bit_count(&self) -> u32 {
        u32::from(self.width) * u32::from(self.height)
    }

    /// Whether `other` was produced with the same grid
    pub fn same_grid(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Number of differing bits.
    pub fn distance(&self, other: &Self) -> Result<u32, CompareError> {
        if !self.same_grid(other) {
            return Err(CompareError::MismatchedFingerprints {
                left_width: self.width,
                left_height: self.height,
                right_width: other.width,
                right_height: other.height,
            });
        }
        Ok((self.bits ^ other.bits).count_ones())
    }

    /// Zero-padded lowercase hex, one digit per four bits
    pub fn to_hex(&self) -> String {
        let digits = (self.bit_count() as usize).div_ceil(4);
        format!("{:0width$x}", self.bits, width = digits)
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
