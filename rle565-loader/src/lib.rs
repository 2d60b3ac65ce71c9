//! Boot logo loader: decode an RLE565 image straight onto the primary display.
//!
//! This crate wires the pieces together:
//!
//! 1. resolve the primary surface from a [`DisplayRegistry`] and acquire it
//! 2. open the image and read it whole through a [`ByteSource`]
//! 3. run the [`Rle565Decoder`] over it with a pixel budget equal to the surface's
//!    capacity
//!
//! The file handle and the image buffer are dropped before the call returns, on
//! success and on every error path. A partially painted surface is a success, and
//! so is a display that refuses to be acquired: the logo is skipped.
//!
//! # Example
//!
//! ```no_run
//! use rle565_loader::{decode_and_blit, DisplayRegistry};
//! use rle565_pixelbuffer::ManagedSurface;
//!
//! let mut screen = ManagedSurface::new(320, 480).unwrap();
//! let mut displays = DisplayRegistry::new();
//! displays.register(&mut screen);
//!
//! let status = decode_and_blit(&mut displays, "/initlogo.rle", false);
//! if status != 0 {
//!     // Boot continues without a logo
//!     eprintln!("logo not shown: {}", status);
//! }
//! ```

pub mod config;
pub mod display;
pub mod errors;
pub mod source;

#[cfg(feature = "cli")]
pub mod args;

pub use config::LogoConfig;
pub use display::DisplayRegistry;
pub use errors::{status_code, ErrorKind, IoFailure, LoadError};
pub use rle565_codec::{DecodeReport, StopReason};
pub use source::ByteSource;

use rle565_codec::{Decoder, Rle565Decoder};
use rle565_pixelbuffer::Surface;
use std::io::{Read, Seek};
use std::path::Path;
use tracing::{debug, info, warn};

/// Paints RLE565 images onto display surfaces.
#[derive(Debug, Clone, Default)]
pub struct LogoLoader {
    decoder: Rle565Decoder,
    capability_flag: bool,
}

impl LogoLoader {
    /// Creates a loader.
    ///
    /// `capability_flag` is reserved: it is recorded and reported but does not
    /// change how images are decoded.
    pub fn new(capability_flag: bool) -> Self {
        Self {
            decoder: Rle565Decoder,
            capability_flag,
        }
    }

    /// Creates a loader from the `[image]` section of a configuration.
    pub fn from_config(config: &LogoConfig) -> Self {
        Self::new(config.image.capability_flag)
    }

    /// Returns the reserved capability flag.
    pub fn capability_flag(&self) -> bool {
        self.capability_flag
    }

    /// Decodes the image at `path` onto the primary display in `displays`.
    ///
    /// Returns `Ok(None)` without touching the file if the display refuses
    /// [`Surface::acquire()`].
    ///
    /// # Errors
    ///
    /// - [`LoadError::DeviceUnavailable`] if no display is registered
    /// - [`LoadError::FileNotFound`] if the image cannot be opened
    /// - [`LoadError::Io`] if the image is empty or cannot be read whole
    /// - [`LoadError::AllocationFailure`] if the image buffer cannot be allocated
    pub fn decode_and_blit(
        &self,
        displays: &mut DisplayRegistry<'_>,
        path: &Path,
    ) -> Result<Option<DecodeReport>, LoadError> {
        let surface = displays.primary_mut().ok_or(LoadError::DeviceUnavailable)?;

        if let Err(e) = surface.acquire() {
            info!("Display busy, skipping boot logo: {:#}", e);
            return Ok(None);
        }

        let source = ByteSource::open(path)?;
        self.blit_source(source, surface).map(Some)
    }

    /// Reads `source` whole and decodes it onto `surface` from its origin.
    ///
    /// # Errors
    ///
    /// See [`decode_and_blit()`](Self::decode_and_blit); a surface that rejects a
    /// write yields [`LoadError::Surface`].
    pub fn blit_source<R: Read + Seek>(
        &self,
        source: ByteSource<R>,
        surface: &mut dyn Surface,
    ) -> Result<DecodeReport, LoadError> {
        debug!(
            bytes = source.len(),
            capability_flag = self.capability_flag,
            "Reading logo image"
        );
        let data = source.read_all()?;

        surface.rewind();
        let report = self.decoder.decode(&data, surface)?;

        let size = surface.size();
        info!(
            "Logo painted: {} pixels of {}x{} ({:?})",
            report.pixels_written, size.width, size.height, report.stop
        );
        Ok(report)
    }
}

/// Decodes the RLE565 image at `path` onto the primary display and returns a
/// status code: `0` on success (including a partial fill or a display that
/// refused to be acquired), otherwise a negative errno value (`-ENODEV`, `-ENOENT`, `-EIO` or `-ENOMEM`).
///
/// `capability_flag` is accepted for compatibility and has no effect.
pub fn decode_and_blit(
    displays: &mut DisplayRegistry<'_>,
    path: impl AsRef<Path>,
    capability_flag: bool,
) -> i32 {
    let result = LogoLoader::new(capability_flag).decode_and_blit(displays, path.as_ref());
    if let Err(e) = &result {
        warn!("Boot logo not shown: {}", e);
    }
    status_code(&result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rle565_pixelbuffer::ManagedSurface;
    use std::io::Cursor;

    #[test]
    fn test_blit_source_from_origin() {
        let mut surface = ManagedSurface::new(2, 1).unwrap();
        surface.fill_pixels(rle565_pixelbuffer::Rgb565(0xFFFF).expand(), 2).unwrap();

        let source = ByteSource::new(Cursor::new(vec![0x02, 0x00, 0x1F, 0x00])).unwrap();
        let report = LogoLoader::default().blit_source(source, &mut surface).unwrap();

        assert_eq!(report.pixels_written, 2);
        assert_eq!(
            surface.data(),
            &[0x00, 0x00, 0xF8, 0x00, 0x00, 0x00, 0xF8, 0x00]
        );
    }

    #[test]
    fn test_no_display() {
        let mut displays = DisplayRegistry::new();
        let err = LogoLoader::default()
            .decode_and_blit(&mut displays, Path::new("/nonexistent/logo.rle"))
            .unwrap_err();
        // The display is checked before the file
        assert_eq!(err.kind(), ErrorKind::DeviceUnavailable);
    }

    #[test]
    fn test_status_no_display() {
        let mut displays = DisplayRegistry::new();
        assert_eq!(decode_and_blit(&mut displays, "/initlogo.rle", false), -19);
    }

    /// Display that turns every caller away.
    struct BusyDisplay(ManagedSurface);

    impl Surface for BusyDisplay {
        fn size(&self) -> rle565_common::Size {
            self.0.size()
        }

        fn base_offset(&self) -> usize {
            self.0.base_offset()
        }

        fn cursor(&self) -> usize {
            self.0.cursor()
        }

        fn write_pixel(&mut self, pixel: rle565_pixelbuffer::ExpandedPixel) -> anyhow::Result<()> {
            self.0.write_pixel(pixel)
        }

        fn rewind(&mut self) {
            self.0.rewind()
        }

        fn acquire(&mut self) -> anyhow::Result<()> {
            anyhow::bail!("display held by another client")
        }
    }

    #[test]
    fn test_refused_display_is_skipped() {
        let mut display = BusyDisplay(ManagedSurface::new(2, 1).unwrap());
        let mut displays = DisplayRegistry::new();
        displays.register(&mut display);

        // The file is never opened, so a missing one is not an error
        let outcome = LogoLoader::default()
            .decode_and_blit(&mut displays, Path::new("/nonexistent/logo.rle"))
            .unwrap();
        assert_eq!(outcome, None);
        assert_eq!(decode_and_blit(&mut displays, "/nonexistent/logo.rle", false), 0);
        drop(displays);

        assert_eq!(display.0.cursor(), 0);
        assert!(display.0.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_capability_flag_is_inert() {
        let data = vec![0x03, 0x00, 0xE0, 0x07];
        let mut plain = ManagedSurface::new(2, 2).unwrap();
        let mut flagged = ManagedSurface::new(2, 2).unwrap();

        let a = LogoLoader::new(false)
            .blit_source(ByteSource::new(Cursor::new(data.clone())).unwrap(), &mut plain)
            .unwrap();
        let b = LogoLoader::new(true)
            .blit_source(ByteSource::new(Cursor::new(data)).unwrap(), &mut flagged)
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(plain.data(), flagged.data());
    }

    #[test]
    fn test_from_config() {
        let config = LogoConfig::builder().capability_flag(true).build().unwrap();
        assert!(LogoLoader::from_config(&config).capability_flag());
    }
}
