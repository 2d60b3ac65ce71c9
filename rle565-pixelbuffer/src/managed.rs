//! Linear surface implementations.
//!
//! This module provides [`LinearSurface`], the concrete [`Surface`] over a block of
//! byte-addressable memory, in two flavours:
//!
//! - [`ManagedSurface`] owns its memory in a `Vec<u8>` (host tools and tests)
//! - [`MappedSurface`] borrows memory owned elsewhere, such as a mapped framebuffer
//!
//! # Example
//!
//! ```
//! use rle565_pixelbuffer::{MappedSurface, Rgb565, Surface};
//! use rle565_common::Size;
//!
//! let mut screen = vec![0u8; 2 * 2 * 4];
//! let mut surface = MappedSurface::with_memory(&mut screen[..], Size::new(2, 2), 0).unwrap();
//! surface.write_pixel(Rgb565(0xF800).expand()).unwrap();
//! drop(surface);
//!
//! assert_eq!(&screen[..4], &[0x00, 0xF8, 0x00, 0x00]);
//! ```

use crate::{ExpandedPixel, Surface, BYTES_PER_PIXEL};
use anyhow::{anyhow, Result};
use rle565_common::Size;

/// A surface over linear memory `M`.
///
/// # Memory Layout
///
/// Pixels are stored back to back starting at `base_offset`, with no row padding:
///
/// ```text
/// Pixel i starts at offset: base_offset + i * 4
/// Byte extent:              base_offset + width * height * 4
/// ```
///
/// Memory before `base_offset` and after the byte extent is never written.
#[derive(Debug, Clone)]
pub struct LinearSurface<M> {
    /// Backing memory (at least `extent` bytes long)
    memory: M,

    /// Surface dimensions in pixels
    size: Size,

    /// Byte offset of pixel 0
    base_offset: usize,

    /// One past the last writable byte
    extent: usize,

    /// Next write position in bytes
    cursor: usize,
}

/// A surface that owns its pixel memory.
pub type ManagedSurface = LinearSurface<Vec<u8>>;

/// A surface borrowing externally owned pixel memory.
pub type MappedSurface<'a> = LinearSurface<&'a mut [u8]>;

/// End of a `size` surface starting at `base_offset`, in bytes.
fn byte_extent(size: Size, base_offset: usize) -> Result<usize> {
    usize::try_from(size.area())
        .ok()
        .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
        .and_then(|bytes| bytes.checked_add(base_offset))
        .ok_or_else(|| anyhow!("Surface extent overflows: {:?} at offset {}", size, base_offset))
}

impl<M: AsRef<[u8]> + AsMut<[u8]>> LinearSurface<M> {
    /// Wraps `memory` as a surface of `size` pixels starting at `base_offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface's byte extent overflows or does not fit
    /// inside `memory`.
    pub fn with_memory(memory: M, size: Size, base_offset: usize) -> Result<Self> {
        let extent = byte_extent(size, base_offset)?;

        let available = memory.as_ref().len();
        if extent > available {
            return Err(anyhow!(
                "Surface {}x{} at offset {} needs {} bytes, memory has {}",
                size.width,
                size.height,
                base_offset,
                extent,
                available
            ));
        }

        Ok(Self {
            memory,
            size,
            base_offset,
            extent,
            cursor: base_offset,
        })
    }

    /// Returns the whole backing memory, including bytes outside the surface.
    pub fn data(&self) -> &[u8] {
        self.memory.as_ref()
    }

    /// Returns the surface's pixel bytes (`base_offset..extent`).
    pub fn pixels(&self) -> &[u8] {
        &self.memory.as_ref()[self.base_offset..self.extent]
    }

    /// Reads back the pixel at linear index `index`.
    pub fn pixel_at(&self, index: usize) -> Option<ExpandedPixel> {
        let start = index.checked_mul(BYTES_PER_PIXEL)?;
        let end = start.checked_add(BYTES_PER_PIXEL)?;
        let bytes = self.pixels().get(start..end)?;
        Some(ExpandedPixel::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3],
        ]))
    }

    /// Returns the number of pixels written since the last rewind.
    pub fn written_pixels(&self) -> usize {
        (self.cursor - self.base_offset) / BYTES_PER_PIXEL
    }

    /// Consumes the surface and returns its backing memory.
    pub fn into_inner(self) -> M {
        self.memory
    }
}

impl ManagedSurface {
    /// Creates a zero-filled surface of `width` x `height` pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface's byte size overflows or cannot be
    /// allocated.
    ///
    /// # Example
    ///
    /// ```
    /// use rle565_pixelbuffer::{ManagedSurface, Surface};
    ///
    /// let surface = ManagedSurface::new(320, 480)?;
    /// assert_eq!(surface.capacity_pixels(), 153_600);
    /// assert_eq!(surface.data().len(), 153_600 * 4);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let size = Size::new(width, height);
        let extent = byte_extent(size, 0)?;

        let mut memory = Vec::new();
        memory
            .try_reserve_exact(extent)
            .map_err(|e| anyhow!("Can not allocate {} bytes for a {}x{} surface: {}", extent, width, height, e))?;
        memory.resize(extent, 0);

        Self::with_memory(memory, size, 0)
    }
}

impl<'a> MappedSurface<'a> {
    /// Builds a surface directly over mapped display memory.
    ///
    /// # Safety
    ///
    /// `base` must point to at least `len` bytes of writable memory that stays
    /// valid, and is not accessed through any other path, for `'a`.
    ///
    /// # Errors
    ///
    /// Returns an error if a `size` surface does not fit in `len` bytes.
    pub unsafe fn from_raw_parts(base: *mut u8, len: usize, size: Size) -> Result<Self> {
        if base.is_null() {
            return Err(anyhow!("Display memory base address is null"));
        }
        // SAFETY: upheld by the caller.
        let memory = unsafe { std::slice::from_raw_parts_mut(base, len) };
        Self::with_memory(memory, size, 0)
    }
}

impl<M: AsRef<[u8]> + AsMut<[u8]>> Surface for LinearSurface<M> {
    fn size(&self) -> Size {
        self.size
    }

    fn base_offset(&self) -> usize {
        self.base_offset
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn write_pixel(&mut self, pixel: ExpandedPixel) -> Result<()> {
        let end = self.cursor + BYTES_PER_PIXEL;
        if end > self.extent {
            return Err(anyhow!(
                "Surface full: write at byte {} past extent {}",
                self.cursor,
                self.extent
            ));
        }
        self.memory.as_mut()[self.cursor..end].copy_from_slice(&pixel.to_le_bytes());
        self.cursor = end;
        Ok(())
    }

    fn rewind(&mut self) {
        self.cursor = self.base_offset;
    }

    fn capacity_pixels(&self) -> usize {
        (self.extent - self.base_offset) / BYTES_PER_PIXEL
    }

    fn fill_pixels(&mut self, pixel: ExpandedPixel, count: usize) -> Result<()> {
        let end = count
            .checked_mul(BYTES_PER_PIXEL)
            .and_then(|len| len.checked_add(self.cursor))
            .filter(|&end| end <= self.extent)
            .ok_or_else(|| {
                anyhow!(
                    "Run of {} pixels exceeds surface room ({} pixels left, cursor at byte {})",
                    count,
                    self.remaining_pixels(),
                    self.cursor
                )
            })?;

        let bytes = pixel.to_le_bytes();
        for chunk in self.memory.as_mut()[self.cursor..end].chunks_exact_mut(BYTES_PER_PIXEL) {
            chunk.copy_from_slice(&bytes);
        }
        self.cursor = end;
        Ok(())
    }
}
