//! Pixel representation and bounded surfaces for RLE565 boot logos.
//!
//! This crate provides the color expansion used by the decoder and the
//! [`Surface`] abstraction that all display memory writes go through.

pub mod buffer;
pub mod format;
pub mod managed;

pub use buffer::Surface;
pub use format::{ExpandedPixel, Rgb565, BYTES_PER_PIXEL};
pub use managed::{LinearSurface, ManagedSurface, MappedSurface};
