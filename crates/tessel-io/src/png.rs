//! PNG image format support
//!
//! Decoding normalizes every PNG flavor (gray, gray+alpha, RGB, RGBA,
//! palette; 1 to 16 bits) into a [`PixelGrid<Rgba>`] with 16 bits per
//! channel. Encoding writes either single-channel 16-bit gray (filter
//! output, noise) or 8-bit RGBA (hue wheel).

use crate::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};
use tessel_core::{PixelGrid, Rgba, sample};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<PixelGrid<Rgba>> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let (color_type, bit_depth) = reader.output_color_type();

    let samples = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };
    let wide = match bit_depth {
        BitDepth::Eight => false,
        BitDepth::Sixteen => true,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG output depth: {:?} {:?}",
                color_type, other
            )));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let bytes_per_channel = if wide { 2 } else { 1 };

    let channel = |idx: usize| -> u16 {
        if wide {
            u16::from_be_bytes([data[idx], data[idx + 1]])
        } else {
            sample::widen(data[idx])
        }
    };

    let grid = PixelGrid::from_fn(width, height, |x, y| {
        let idx = y as usize * bytes_per_row + x as usize * samples * bytes_per_channel;
        let c = |i: usize| channel(idx + i * bytes_per_channel);
        match samples {
            1 => Rgba::gray(c(0)),
            2 => {
                let g = c(0);
                Rgba::new(g, g, g, c(1))
            }
            3 => Rgba::new(c(0), c(1), c(2), u16::MAX),
            _ => Rgba::new(c(0), c(1), c(2), c(3)),
        }
    })?;

    tracing::debug!(width, height, ?color_type, ?bit_depth, "decoded PNG");
    Ok(grid)
}

/// Write a gray16 grid as a single-channel 16-bit PNG
pub fn write_gray16<W: Write>(grid: &PixelGrid<u16>, writer: W) -> IoResult<()> {
    let mut data = Vec::with_capacity(grid.data().len() * 2);
    for v in grid.data() {
        data.extend_from_slice(&v.to_be_bytes());
    }
    encode(
        writer,
        grid.width(),
        grid.height(),
        ColorType::Grayscale,
        BitDepth::Sixteen,
        &data,
    )
}

/// Write a color grid as an 8-bit RGBA PNG
///
/// Channels are narrowed to their high byte.
pub fn write_rgba8<W: Write>(grid: &PixelGrid<Rgba>, writer: W) -> IoResult<()> {
    let data: Vec<u8> = grid.data().iter().flat_map(|c| c.to_rgba8()).collect();
    encode(
        writer,
        grid.width(),
        grid.height(),
        ColorType::Rgba,
        BitDepth::Eight,
        &data,
    )
}

fn encode<W: Write>(
    writer: W,
    width: u32,
    height: u32,
    color_type: ColorType,
    bit_depth: BitDepth,
    data: &[u8],
) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(bit_depth);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(data)
        .map_err(|e| IoError::EncodeError(format!("PNG data error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    tracing::debug!(width, height, ?color_type, ?bit_depth, "encoded PNG");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_raw(width: u32, height: u32, color: ColorType, depth: BitDepth, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        encode(&mut out, width, height, color, depth, data).unwrap();
        out
    }

    #[test]
    fn test_gray16_roundtrip() {
        let grid = PixelGrid::from_vec(3, 2, vec![0u16, 1, 255, 256, 40000, 65535]).unwrap();
        let mut bytes = Vec::new();
        write_gray16(&grid, &mut bytes).unwrap();

        let decoded = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(decoded.to_intensity(), grid);
        assert_eq!(decoded.get(2, 1), Rgba::gray(65535));
    }

    #[test]
    fn test_gray8_widened() {
        let bytes = encode_raw(2, 1, ColorType::Grayscale, BitDepth::Eight, &[0x80, 0xff]);
        let decoded = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(decoded.to_intensity().data(), &[0x8080, 0xffff]);
    }

    #[test]
    fn test_rgba8_roundtrip() {
        let grid = PixelGrid::from_vec(
            2,
            1,
            vec![Rgba::from_rgba8(255, 0, 0, 255), Rgba::from_rgba8(1, 2, 3, 4)],
        )
        .unwrap();
        let mut bytes = Vec::new();
        write_rgba8(&grid, &mut bytes).unwrap();

        let decoded = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(decoded, grid);
    }

    #[test]
    fn test_rgb16_channels() {
        let data = [0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc];
        let bytes = encode_raw(1, 1, ColorType::Rgb, BitDepth::Sixteen, &data);
        let decoded = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(decoded.get(0, 0), Rgba::new(0x1234, 0x5678, 0x9abc, u16::MAX));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let result = read_png(Cursor::new(b"not a png".to_vec()));
        assert!(matches!(result, Err(IoError::DecodeError(_))));
    }
}
