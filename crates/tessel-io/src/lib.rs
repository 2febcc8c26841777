//! tessel-io - PNG I/O for pixel grids
//!
//! Reads any PNG into a 16-bit-per-channel [`PixelGrid<Rgba>`] and writes
//! gray16 or 8-bit RGBA grids back out.

mod error;
pub mod png;

pub use error::{IoError, IoResult};
pub use self::png::{read_png, write_gray16, write_rgba8};

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tessel_core::{PixelGrid, Rgba};

/// Read a PNG file from disk.
pub fn read_png_file<P: AsRef<Path>>(path: P) -> IoResult<PixelGrid<Rgba>> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading PNG");
    let file = File::open(path)?;
    read_png(BufReader::new(file))
}

/// Write a gray16 grid to a PNG file, replacing any existing file.
pub fn write_gray16_file<P: AsRef<Path>>(grid: &PixelGrid<u16>, path: P) -> IoResult<()> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "writing gray16 PNG");
    let mut writer = BufWriter::new(File::create(path)?);
    write_gray16(grid, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a color grid to an 8-bit RGBA PNG file, replacing any existing file.
pub fn write_rgba8_file<P: AsRef<Path>>(grid: &PixelGrid<Rgba>, path: P) -> IoResult<()> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "writing RGBA PNG");
    let mut writer = BufWriter::new(File::create(path)?);
    write_rgba8(grid, &mut writer)?;
    writer.flush()?;
    Ok(())
}
