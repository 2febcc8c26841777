//! Synthetic pixel sources
//!
//! Generators for the inputs the filters are exercised on:
//!
//! - [`noise`] - uniform 16-bit gray noise
//! - [`hue_wheel`] - a horizontal sweep through every hue at full
//!   saturation and value

use crate::error::Result;
use crate::grid::PixelGrid;
use crate::sample::Rgba;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Side length of the generated icons, in pixels
pub const DEFAULT_SIZE: u32 = 1024;

/// Fill a `width x height` gray16 grid with uniform noise over `[0, 65535]`.
///
/// Samples are drawn in row-major order, so a seeded generator gives a
/// reproducible grid.
pub fn noise<R: Rng>(width: u32, height: u32, rng: &mut R) -> Result<PixelGrid<u16>> {
    PixelGrid::from_fn(width, height, |_, _| rng.gen_range(0..=u16::MAX))
}

/// Uniform noise from a generator seeded with `seed`.
pub fn noise_seeded(width: u32, height: u32, seed: u64) -> Result<PixelGrid<u16>> {
    let mut rng = StdRng::seed_from_u64(seed);
    noise(width, height, &mut rng)
}

/// Uniform noise from an entropy-seeded generator.
pub fn noise_from_entropy(width: u32, height: u32) -> Result<PixelGrid<u16>> {
    let mut rng = StdRng::from_entropy();
    noise(width, height, &mut rng)
}

/// Build a square hue-wheel icon.
///
/// Column `x` has hue `x / size` (in turns) at full saturation and value;
/// every row is identical. Column 0 is pure red.
pub fn hue_wheel(size: u32) -> Result<PixelGrid<Rgba>> {
    let columns: Vec<Rgba> = (0..size)
        .map(|x| {
            let (r, g, b) = hsv_to_rgb(f64::from(x) / f64::from(size), 1.0, 1.0);
            Rgba::from_rgba8(r, g, b, 255)
        })
        .collect();
    PixelGrid::from_fn(size, size, |x, _| columns[x as usize])
}

/// Convert HSV to 8-bit RGB.
///
/// `h` is in turns (`[0, 1)`, wrapping), `s` and `v` are in `[0, 1]`.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (u8, u8, u8) {
    let to_u8 = |c: f64| (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
    if s <= 0.0 {
        let g = to_u8(v);
        return (g, g, g);
    }

    let hf = h.rem_euclid(1.0) * 6.0;
    let i = hf.floor() as i32;
    let f = hf - f64::from(i);
    let x = v * (1.0 - s);
    let y = v * (1.0 - s * f);
    let z = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match i {
        0 => (v, z, x),
        1 => (y, v, x),
        2 => (x, v, z),
        3 => (x, y, v),
        4 => (z, x, v),
        _ => (v, x, y),
    };

    (to_u8(r), to_u8(g), to_u8(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Sample;

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), (255, 0, 0));
        assert_eq!(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0), (0, 255, 0));
        assert_eq!(hsv_to_rgb(2.0 / 3.0, 1.0, 1.0), (0, 0, 255));
        assert_eq!(hsv_to_rgb(1.0, 1.0, 1.0), (255, 0, 0));
    }

    #[test]
    fn test_hsv_gray() {
        assert_eq!(hsv_to_rgb(0.3, 0.0, 0.5), (128, 128, 128));
    }

    #[test]
    fn test_noise_seeded_is_reproducible() {
        let a = noise_seeded(16, 8, 42).unwrap();
        let b = noise_seeded(16, 8, 42).unwrap();
        let c = noise_seeded(16, 8, 43).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_hue_wheel_columns_constant() {
        let wheel = hue_wheel(12).unwrap();
        for x in 0..12 {
            let top = wheel.get(x, 0);
            assert!((0..12).all(|y| wheel.get(x, y) == top));
        }
        assert_eq!(wheel.get(0, 0).intensity(), u16::MAX);
        assert_eq!(wheel.get(0, 0).to_rgba8(), [255, 0, 0, 255]);
    }
}
