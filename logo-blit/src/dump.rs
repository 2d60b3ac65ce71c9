//! Writing a decoded surface to disk.

use anyhow::{Context, Result};
use rle565_loader::args::DumpFormat;
use rle565_pixelbuffer::{ExpandedPixel, ManagedSurface, Surface, BYTES_PER_PIXEL};
use std::io::Write;
use std::path::Path;

/// Encodes the surface's pixels in `format`.
pub fn encode(surface: &ManagedSurface, format: DumpFormat) -> Vec<u8> {
    match format {
        DumpFormat::Raw => surface.pixels().to_vec(),
        DumpFormat::Ppm => encode_ppm(surface),
    }
}

/// Binary PPM (P6), one RGB triple per surface pixel.
fn encode_ppm(surface: &ManagedSurface) -> Vec<u8> {
    let size = surface.size();
    let header = format!("P6\n{} {}\n255\n", size.width, size.height);

    let pixels = surface.pixels();
    let mut out = Vec::with_capacity(header.len() + pixels.len() / BYTES_PER_PIXEL * 3);
    out.extend_from_slice(header.as_bytes());
    for chunk in pixels.chunks_exact(BYTES_PER_PIXEL) {
        let pixel = ExpandedPixel::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        out.extend_from_slice(&pixel.rgb());
    }
    out
}

/// Writes the surface to `path`.
pub fn write_to(surface: &ManagedSurface, format: DumpFormat, path: &Path) -> Result<()> {
    let bytes = encode(surface, format);
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(&bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
