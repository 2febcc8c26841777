//! Pixel sample types and their projection onto one intensity channel
//!
//! Every filter in tessel works on a single 16-bit channel. A [`Sample`]
//! knows how to project itself onto that channel:
//!
//! - `u16` (16-bit gray) is its own intensity
//! - `u8` (8-bit gray) is widened by ×257, so `0xff` maps to `0xffff`
//! - [`Rgba`] projects onto its red channel premultiplied by alpha
//!   (`r * a / 65535`), which for opaque gray sources equals the luminance
//!
//! The sentinel returned for out-of-range reads is `Sample::default()`,
//! i.e. black with zero alpha.

/// Maximum 16-bit intensity (white)
pub const MAX_INTENSITY: u16 = u16::MAX;

/// A pixel value that can be stored in a [`PixelGrid`](crate::PixelGrid).
pub trait Sample: Copy + Default + PartialEq + Send + Sync + 'static {
    /// Project this sample onto the single 16-bit intensity channel.
    fn intensity(self) -> u16;
}

impl Sample for u16 {
    #[inline]
    fn intensity(self) -> u16 {
        self
    }
}

impl Sample for u8 {
    #[inline]
    fn intensity(self) -> u16 {
        widen(self)
    }
}

/// Widen an 8-bit channel to 16 bits (`v * 257`).
#[inline]
pub fn widen(v: u8) -> u16 {
    u16::from(v) * 257
}

/// Narrow a 16-bit channel to 8 bits by keeping the high byte.
#[inline]
pub fn narrow(v: u16) -> u8 {
    (v >> 8) as u8
}

/// 16-bit-per-channel color sample.
///
/// Decoded color and gray PNGs are both normalized to this type, whatever
/// their bit depth, so a single grid type can carry any input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub a: u16,
}

impl Rgba {
    /// Create a color from 16-bit channels.
    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque gray color from a 16-bit level.
    pub const fn gray(v: u16) -> Self {
        Self {
            r: v,
            g: v,
            b: v,
            a: MAX_INTENSITY,
        }
    }

    /// Create a color from 8-bit channels, widening each to 16 bits.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: widen(r),
            g: widen(g),
            b: widen(b),
            a: widen(a),
        }
    }

    /// Narrow each channel to 8 bits.
    pub fn to_rgba8(self) -> [u8; 4] {
        [narrow(self.r), narrow(self.g), narrow(self.b), narrow(self.a)]
    }
}

impl Sample for Rgba {
    #[inline]
    fn intensity(self) -> u16 {
        // Fits: r * a / 65535 <= r
        (u32::from(self.r) * u32::from(self.a) / u32::from(MAX_INTENSITY)) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray16_identity() {
        assert_eq!(0u16.intensity(), 0);
        assert_eq!(12345u16.intensity(), 12345);
        assert_eq!(u16::MAX.intensity(), MAX_INTENSITY);
    }

    #[test]
    fn test_gray8_widening() {
        assert_eq!(0u8.intensity(), 0);
        assert_eq!(0x80u8.intensity(), 0x8080);
        assert_eq!(0xffu8.intensity(), 0xffff);
    }

    #[test]
    fn test_rgba_projects_red() {
        let c = Rgba::new(1000, 2000, 3000, MAX_INTENSITY);
        assert_eq!(c.intensity(), 1000);
        assert_eq!(Rgba::gray(777).intensity(), 777);
        assert_eq!(Rgba::gray(MAX_INTENSITY).intensity(), MAX_INTENSITY);
    }

    #[test]
    fn test_rgba_premultiplies_alpha() {
        assert_eq!(Rgba::new(65535, 0, 0, 32768).intensity(), 32768);
        assert_eq!(Rgba::new(40000, 0, 0, 0).intensity(), 0);
        // 1000 * 4000 / 65535 = 61.03
        assert_eq!(Rgba::new(1000, 2000, 3000, 4000).intensity(), 61);
        assert_eq!(Rgba::from_rgba8(255, 255, 255, 128).intensity(), 0x8080);
    }

    #[test]
    fn test_rgba8_conversion() {
        let c = Rgba::from_rgba8(255, 128, 0, 255);
        assert_eq!(c.r, 0xffff);
        assert_eq!(c.g, 0x8080);
        assert_eq!(c.b, 0);
        assert_eq!(c.to_rgba8(), [255, 128, 0, 255]);
    }

    #[test]
    fn test_sentinel_is_black() {
        assert_eq!(Rgba::default().intensity(), 0);
        assert_eq!(u16::default().intensity(), 0);
        assert_eq!(u8::default().intensity(), 0);
    }
}
