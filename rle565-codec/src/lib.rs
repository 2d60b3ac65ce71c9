//! Decoding interfaces for RLE565 boot-logo images.
//!
//! This crate defines the [`Decoder`] trait and its single implementation,
//! [`Rle565Decoder`]. A decoder takes the complete encoded image as a byte slice,
//! expands each color into the surface's pixel representation, and appends pixels
//! to a [`Surface`] under a pixel budget.
//!
//! # Key Concepts
//!
//! - **Synchronous decoding**: the whole image is already in memory; there are no
//!   suspension points
//! - **Budgeted output**: the decoder never asks the surface for more pixels than it
//!   has room for
//! - **Best-effort fill**: truncated or oversized trailing records end decoding
//!   quietly, they are not errors
//!
//! # Example
//!
//! ```
//! use rle565_codec::{Decoder, Rle565Decoder, StopReason};
//! use rle565_pixelbuffer::{ManagedSurface, Surface};
//!
//! let mut surface = ManagedSurface::new(2, 1).unwrap();
//! // count = 2, color = 0x001F (blue)
//! let report = Rle565Decoder.decode(&[0x02, 0x00, 0x1F, 0x00], &mut surface).unwrap();
//!
//! assert_eq!(report.pixels_written, 2);
//! assert_eq!(report.stop, StopReason::EndOfStream);
//! assert_eq!(&surface.data()[..8], &[0x00, 0x00, 0xF8, 0x00, 0x00, 0x00, 0xF8, 0x00]);
//! ```
//!
//! # Wire Format
//!
//! See [`rle`] for the record layout.

use anyhow::Result;

pub use rle565_pixelbuffer::{ExpandedPixel, Rgb565, Surface};

pub mod rle;
pub use rle::{
    DecodeReport, PixelBudget, Rle565Decoder, RunRecord, RunRecords, StopReason, RECORD_SIZE,
};

mod proptest_bounds;

/// Core trait for image decoders that blit into a [`Surface`].
///
/// # Contract
///
/// Implementors must:
/// - Start writing at the surface's current cursor
/// - Never request more pixels than the surface has room for
/// - Report how and why decoding ended through [`DecodeReport`]
/// - Return `Err` only when the surface itself rejects a write
pub trait Decoder {
    /// Decodes `data` into `surface`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface rejects a write. Malformed input is never an
    /// error; it only shortens the output.
    fn decode(&self, data: &[u8], surface: &mut dyn Surface) -> Result<DecodeReport>;
}
