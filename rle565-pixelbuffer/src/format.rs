//! RGB565 source colors and their expanded surface representation.
//!
//! This module defines [`Rgb565`], the packed 16-bit color carried by every RLE565
//! run record, and [`ExpandedPixel`], the two-word form written into the display
//! surface.
//!
//! # Expansion
//!
//! Each 5/6-bit channel is moved into the high bits of an 8-bit channel. The low
//! bits are left at zero (no bit replication):
//!
//! ```text
//! red8   = (color & 0xF800) >> 8
//! green8 = (color & 0x07E0) >> 3
//! blue8  = (color & 0x001F) << 3
//!
//! word0  = (red8 << 8) | green8
//! word1  = blue8
//! ```
//!
//! # Critical Note: Four Bytes per Pixel
//!
//! The destination stores each pixel as **two** 16-bit words, so one expanded pixel
//! occupies [`BYTES_PER_PIXEL`] (4) bytes even though the source color is 2 bytes.
//! Always use: `byte_length = pixels * BYTES_PER_PIXEL`
//!
//! # Example
//!
//! ```
//! use rle565_pixelbuffer::{ExpandedPixel, Rgb565};
//!
//! // Pure blue
//! let pixel = Rgb565(0x001F).expand();
//! assert_eq!(pixel, ExpandedPixel { word0: 0x0000, word1: 0x00F8 });
//! assert_eq!(pixel.to_le_bytes(), [0x00, 0x00, 0xF8, 0x00]);
//! ```

/// Storage size of one expanded pixel on the surface, in bytes.
pub const BYTES_PER_PIXEL: usize = 4;

/// A packed 5-6-5 RGB color as stored in an RLE565 run record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    const RED_MASK: u16 = 0xF800;
    const GREEN_MASK: u16 = 0x07E0;
    const BLUE_MASK: u16 = 0x001F;

    /// Red channel moved into the top 5 bits of a byte.
    pub const fn red8(self) -> u8 {
        ((self.0 & Self::RED_MASK) >> 8) as u8
    }

    /// Green channel moved into the top 6 bits of a byte.
    pub const fn green8(self) -> u8 {
        ((self.0 & Self::GREEN_MASK) >> 3) as u8
    }

    /// Blue channel moved into the top 5 bits of a byte.
    pub const fn blue8(self) -> u8 {
        ((self.0 & Self::BLUE_MASK) << 3) as u8
    }

    /// Converts this color into the surface's two-word pixel.
    ///
    /// Total over all 16-bit inputs and free of side effects; callers expand a
    /// color once and reuse the result for every repetition of a run.
    ///
    /// # Example
    ///
    /// ```
    /// use rle565_pixelbuffer::Rgb565;
    ///
    /// let white = Rgb565(0xFFFF).expand();
    /// assert_eq!(white.word0, 0xF8FC);
    /// assert_eq!(white.word1, 0x00F8);
    /// ```
    pub const fn expand(self) -> ExpandedPixel {
        let red = self.red8() as u16;
        let green = self.green8() as u16;
        let blue = self.blue8() as u16;

        ExpandedPixel {
            word0: (red << 8) | green,
            word1: blue,
        }
    }
}

impl From<u16> for Rgb565 {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

/// A pixel in the destination surface's representation.
///
/// `word0` carries red in its high byte and green in its low byte; `word1` carries
/// blue in its low byte with a zero high byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ExpandedPixel {
    pub word0: u16,
    pub word1: u16,
}

impl ExpandedPixel {
    /// Serializes the pixel as it lands in surface memory: `word0` then `word1`,
    /// each little-endian.
    pub const fn to_le_bytes(self) -> [u8; BYTES_PER_PIXEL] {
        let w0 = self.word0.to_le_bytes();
        let w1 = self.word1.to_le_bytes();
        [w0[0], w0[1], w1[0], w1[1]]
    }

    /// Reads a pixel back from its 4-byte surface representation.
    pub const fn from_le_bytes(bytes: [u8; BYTES_PER_PIXEL]) -> Self {
        Self {
            word0: u16::from_le_bytes([bytes[0], bytes[1]]),
            word1: u16::from_le_bytes([bytes[2], bytes[3]]),
        }
    }

    /// Returns the `[R, G, B]` channels carried by this pixel.
    pub const fn rgb(self) -> [u8; 3] {
        [(self.word0 >> 8) as u8, self.word0 as u8, self.word1 as u8]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_colors() {
        assert_eq!(
            Rgb565(0xF800).expand(),
            ExpandedPixel {
                word0: 0xF800,
                word1: 0x0000
            }
        );
        assert_eq!(
            Rgb565(0x07E0).expand(),
            ExpandedPixel {
                word0: 0x00FC,
                word1: 0x0000
            }
        );
        assert_eq!(
            Rgb565(0x001F).expand(),
            ExpandedPixel {
                word0: 0x0000,
                word1: 0x00F8
            }
        );
    }

    #[test]
    fn test_black() {
        assert_eq!(Rgb565(0).expand(), ExpandedPixel::default());
    }

    #[test]
    fn test_low_bits_not_replicated() {
        // 0x0841 = one LSB set in every channel
        let pixel = Rgb565(0x0841).expand();
        assert_eq!(pixel.rgb(), [0x08, 0x08, 0x08]);
    }

    #[test]
    fn test_blue_byte_layout() {
        let bytes = Rgb565(0x001F).expand().to_le_bytes();
        assert_eq!(bytes, [0x00, 0x00, 0xF8, 0x00]);
    }

    #[test]
    fn test_word1_high_byte_always_zero() {
        for raw in 0..=u16::MAX {
            let pixel = Rgb565(raw).expand();
            assert_eq!(pixel.word1 & 0xFF00, 0, "color {:#06x}", raw);
            assert_eq!(pixel.word1 & 0x0007, 0, "color {:#06x}", raw);
        }
    }

    #[test]
    fn test_channels_match_masks() {
        let color = Rgb565(0b10101_110011_01110);
        assert_eq!(color.red8(), 0b1010_1000);
        assert_eq!(color.green8(), 0b1100_1100);
        assert_eq!(color.blue8(), 0b0111_0000);
        assert_eq!(color.expand().rgb(), [0xA8, 0xCC, 0x70]);
    }

    #[test]
    fn test_from_le_bytes_inverse() {
        let pixel = ExpandedPixel {
            word0: 0xABCD,
            word1: 0x00EF,
        };
        assert_eq!(ExpandedPixel::from_le_bytes(pixel.to_le_bytes()), pixel);
    }
}
