//! Surface trait for linear display memory.
//!
//! A [`Surface`] is a bounded, cursor-tracked write sink over a linear block of
//! pixel memory (for example a framebuffer's `screen_base`). Decoders never see
//! raw pointers or byte offsets; they only append expanded pixels at the cursor.
//!
//! # Critical: Capacity is in Pixels, Offsets are in Bytes!
//!
//! **IMPORTANT**: [`Surface::capacity_pixels()`] and [`Surface::remaining_pixels()`]
//! count **pixels**, while [`Surface::cursor()`] is a **byte** offset from the
//! surface origin. One pixel is [`BYTES_PER_PIXEL`](crate::BYTES_PER_PIXEL) bytes:
//!
//! ```text
//! byte_extent = base_offset + capacity_pixels * BYTES_PER_PIXEL
//! cursor      = base_offset + written_pixels  * BYTES_PER_PIXEL
//! ```
//!
//! # Bounds
//!
//! Implementations must reject any write that would move the cursor past the byte
//! extent. Callers are expected to bound their output upstream (the RLE565 decoder
//! keeps a pixel budget), but a surface never wraps or aliases past its end.
//!
//! # Example
//!
//! ```
//! use rle565_pixelbuffer::{ManagedSurface, Rgb565, Surface};
//!
//! let mut surface = ManagedSurface::new(4, 2).unwrap();
//! let blue = Rgb565(0x001F).expand();
//! surface.fill_pixels(blue, 3).unwrap();
//!
//! assert_eq!(surface.cursor(), 12);
//! assert_eq!(surface.remaining_pixels(), 5);
//! ```

use crate::ExpandedPixel;
use anyhow::Result;
use rle565_common::Size;

/// Bounded, cursor-tracked pixel sink.
///
/// # Example
///
/// ```
/// use rle565_pixelbuffer::{ExpandedPixel, Surface};
///
/// fn paint_all<S: Surface + ?Sized>(surface: &mut S, pixel: ExpandedPixel) -> anyhow::Result<()> {
///     surface.rewind();
///     let n = surface.remaining_pixels();
///     surface.fill_pixels(pixel, n)
/// }
/// ```
pub trait Surface {
    /// Returns the surface dimensions in pixels.
    fn size(&self) -> Size;

    /// Returns the byte offset of the surface origin within its memory.
    fn base_offset(&self) -> usize;

    /// Returns the current write position as a byte offset into surface memory.
    fn cursor(&self) -> usize;

    /// Appends one pixel at the cursor and advances the cursor by 4 bytes.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving memory and cursor untouched, if the surface
    /// is already full.
    fn write_pixel(&mut self, pixel: ExpandedPixel) -> Result<()>;

    /// Moves the cursor back to the surface origin. Pixel memory is not cleared.
    fn rewind(&mut self);

    /// Claims the display before drawing.
    ///
    /// A surface backed by a device that can turn the caller away returns an
    /// error here, and the caller must then leave it untouched. Memory surfaces
    /// never refuse.
    fn acquire(&mut self) -> Result<()> {
        Ok(())
    }

    /// Returns the total pixel capacity (`width * height`).
    fn capacity_pixels(&self) -> usize {
        usize::try_from(self.size().area()).unwrap_or(usize::MAX)
    }

    /// Returns how many more pixels fit before the surface is full.
    fn remaining_pixels(&self) -> usize {
        let written = (self.cursor() - self.base_offset()) / crate::BYTES_PER_PIXEL;
        self.capacity_pixels().saturating_sub(written)
    }

    /// Appends `count` copies of `pixel`.
    ///
    /// The whole run is checked against [`remaining_pixels()`](Self::remaining_pixels)
    /// first, so a rejected run writes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if `count` exceeds the remaining room.
    fn fill_pixels(&mut self, pixel: ExpandedPixel, count: usize) -> Result<()> {
        let remaining = self.remaining_pixels();
        if count > remaining {
            anyhow::bail!(
                "Run of {} pixels exceeds surface room ({} pixels left, cursor at byte {})",
                count,
                remaining,
                self.cursor()
            );
        }
        for _ in 0..count {
            self.write_pixel(pixel)?;
        }
        Ok(())
    }
}
