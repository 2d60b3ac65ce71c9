//! RLE565 decoder - run-length encoded RGB565.
//!
//! An RLE565 image is a flat sequence of 4-byte run records with no header and no
//! terminator. Each record repeats one RGB565 color `count` times, filling the
//! surface left to right, top to bottom.
//!
//! # Wire Format
//!
//! ```text
//! +------------------+
//! | count            |  2 bytes (u16, little endian)
//! +------------------+
//! | color            |  2 bytes (u16 RGB565, little endian)
//! +------------------+
//! | Record 2         |
//! |   ...            |
//! +------------------+
//! ```
//!
//! # Termination
//!
//! Decoding ends, successfully, when:
//!
//! - fewer than 4 unread bytes remain (a 1-3 byte tail is ignored)
//! - a record's `count` exceeds the remaining pixel budget; decoding stops at that
//!   record and nothing of it is written (the run is **not** clamped to fit)
//! - the budget has reached zero
//!
//! # Example
//!
//! ```
//! use rle565_codec::{RunRecord, RunRecords};
//! use rle565_pixelbuffer::Rgb565;
//!
//! let data = [0x05, 0x00, 0xFF, 0xFF, 0xAA];
//! let mut records = RunRecords::new(&data);
//!
//! assert_eq!(records.next(), Some(RunRecord { count: 5, color: Rgb565(0xFFFF) }));
//! assert_eq!(records.next(), None);
//! assert_eq!(records.remainder(), 1);
//! ```

use crate::Decoder;
use anyhow::{Context, Result};
use bytes::Buf;
use rle565_pixelbuffer::{Rgb565, Surface};
use tracing::debug;

/// Size of one encoded run record in bytes.
pub const RECORD_SIZE: usize = 4;

/// One `(count, color)` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunRecord {
    /// Number of pixels the color is repeated for.
    pub count: u16,
    /// Packed 5-6-5 color.
    pub color: Rgb565,
}

impl RunRecord {
    /// Encodes the record in its 4-byte wire form.
    pub const fn to_le_bytes(self) -> [u8; RECORD_SIZE] {
        let count = self.count.to_le_bytes();
        let color = self.color.0.to_le_bytes();
        [count[0], count[1], color[0], color[1]]
    }
}

/// Lazy iterator over the complete run records in a byte slice.
///
/// Yields nothing for a trailing partial record; [`remainder()`](Self::remainder)
/// reports how many bytes were left over.
#[derive(Debug, Clone)]
pub struct RunRecords<'a> {
    buf: &'a [u8],
}

impl<'a> RunRecords<'a> {
    /// Creates an iterator over `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { buf: data }
    }

    /// Returns the number of unread bytes.
    pub fn remainder(&self) -> usize {
        self.buf.remaining()
    }
}

impl Iterator for RunRecords<'_> {
    type Item = RunRecord;

    fn next(&mut self) -> Option<RunRecord> {
        if self.buf.remaining() < RECORD_SIZE {
            return None;
        }
        let count = self.buf.get_u16_le();
        let color = Rgb565(self.buf.get_u16_le());
        Some(RunRecord { count, color })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.buf.remaining() / RECORD_SIZE;
        (n, Some(n))
    }
}

impl ExactSizeIterator for RunRecords<'_> {}

/// Remaining number of pixels the decoder may still write.
///
/// The budget only ever decreases and cannot go below zero: a request larger than
/// what is left is refused as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBudget {
    remaining: usize,
}

impl PixelBudget {
    /// Creates a budget of `pixels`.
    pub const fn new(pixels: usize) -> Self {
        Self { remaining: pixels }
    }

    /// Creates a budget covering the room left on `surface`.
    ///
    /// For a surface whose cursor is at its origin this is its full
    /// `capacity_pixels()`.
    pub fn for_surface<S: Surface + ?Sized>(surface: &S) -> Self {
        Self::new(surface.remaining_pixels())
    }

    /// Returns the number of pixels left.
    pub const fn remaining(&self) -> usize {
        self.remaining
    }

    /// Returns `true` once nothing more may be written.
    pub const fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Takes `count` pixels from the budget if they are all available.
    ///
    /// Returns `false`, leaving the budget unchanged, when `count` exceeds what is
    /// left.
    pub fn try_consume(&mut self, count: usize) -> bool {
        match self.remaining.checked_sub(count) {
            Some(left) => {
                self.remaining = left;
                true
            }
            None => false,
        }
    }
}

/// Why a decode ended. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every byte of the input was consumed.
    EndOfStream,
    /// 1-3 bytes were left over after the last complete record.
    PartialRecord { trailing: usize },
    /// A record asked for more pixels than the budget had left.
    OverBudget { count: u16, remaining: usize },
    /// The budget reached zero with records still unread.
    BudgetExhausted,
}

/// Decoder for RLE565 images.
///
/// # Example
///
/// ```
/// # use rle565_codec::{PixelBudget, Rle565Decoder, StopReason};
/// # use rle565_pixelbuffer::ManagedSurface;
/// let mut surface = ManagedSurface::new(4, 1).unwrap();
/// // Only 2 of the 4 pixels may be written; the 3-pixel run is refused whole
/// let report = Rle565Decoder
///     .decode_with_budget(&[0x03, 0x00, 0xFF, 0xFF], PixelBudget::new(2), &mut surface)
///     .unwrap();
/// assert_eq!(report.pixels_written, 0);
/// assert_eq!(report.stop, StopReason::OverBudget { count: 3, remaining: 2 });
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Rle565Decoder;

impl Rle565Decoder {
    /// Decodes `data` into `surface`, writing at most `budget` pixels.
    ///
    /// Each accepted record is expanded once and written `count` times; the budget
    /// is charged before the write.
    ///
    /// # Errors
    ///
    /// Returns an error only if the surface rejects a run, which cannot happen
    /// while `budget` does not exceed the surface's remaining room.
    pub fn decode_with_budget(
        &self,
        data: &[u8],
        mut budget: PixelBudget,
        surface: &mut dyn Surface,
    ) -> Result<DecodeReport> {
        let mut records = RunRecords::new(data);
        let mut records_applied = 0usize;
        let mut pixels_written = 0usize;

        let stop = loop {
            let Some(record) = records.next() else {
                break match records.remainder() {
                    0 => StopReason::EndOfStream,
                    trailing => StopReason::PartialRecord { trailing },
                };
            };

            if budget.is_exhausted() {
                break StopReason::BudgetExhausted;
            }

            let count = usize::from(record.count);
            if !budget.try_consume(count) {
                break StopReason::OverBudget {
                    count: record.count,
                    remaining: budget.remaining(),
                };
            }

            let pixel = record.color.expand();
            surface.fill_pixels(pixel, count).with_context(|| {
                format!(
                    "Failed to write RLE565 run {} ({} x {:#06x})",
                    records_applied, record.count, record.color.0
                )
            })?;

            records_applied += 1;
            pixels_written += count;
        };

        debug!(
            records = records_applied,
            pixels = pixels_written,
            budget_left = budget.remaining(),
            ?stop,
            "RLE565 decode finished"
        );

        Ok(DecodeReport {
            records_applied,
            pixels_written,
            budget_remaining: budget.remaining(),
            stop,
        })
    }
}

impl Decoder for Rle565Decoder {
    fn decode(&self, data: &[u8], surface: &mut dyn Surface) -> Result<DecodeReport> {
        let budget = PixelBudget::for_surface(surface);
        self.decode_with_budget(data, budget, surface)
    }
}

/// Outcome of a successful decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeReport {
    /// Number of records written to the surface.
    pub records_applied: usize,
    /// Total pixels written.
    pub pixels_written: usize,
    /// Budget left when decoding ended.
    pub budget_remaining: usize,
    /// Why decoding ended.
    pub stop: StopReason,
}

impl DecodeReport {
    /// Returns `true` if decoding ended before consuming the whole input.
    pub fn is_partial(&self) -> bool {
        self.stop != StopReason::EndOfStream
    }
}
