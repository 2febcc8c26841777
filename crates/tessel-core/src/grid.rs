//! PixelGrid - The main image container
//!
//! A `PixelGrid` is a dense, row-major 2D buffer of [`Sample`]s.
//!
//! # Out-of-range policy
//!
//! Reads never fail: [`PixelGrid::get`] takes signed coordinates and returns
//! the sentinel (`P::default()`, black) for anything outside
//! `[0, width) x [0, height)`. Window filters rely on this to sample past the
//! border without clipping the window.
//!
//! Writes are different. The output domain of every filter is exactly the
//! grid bounds, so [`PixelGrid::set`] treats an out-of-range coordinate as a
//! programming error and panics.

use crate::error::{Error, Result};
use crate::rect::Rect;
use crate::sample::Sample;

/// Dense 2D buffer of samples with a black sentinel outside its bounds
///
/// # Examples
///
/// ```
/// use tessel_core::PixelGrid;
///
/// let mut grid = PixelGrid::<u16>::new(4, 3).unwrap();
/// grid.set(1, 2, 500);
/// assert_eq!(grid.get(1, 2), 500);
/// assert_eq!(grid.get(-1, 0), 0);
/// assert_eq!(grid.get(4, 0), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid<P: Sample> {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Row-major samples, `width * height` long
    data: Vec<P>,
}

impl<P: Sample> PixelGrid<P> {
    /// Create a new grid with every sample set to the sentinel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = Self::checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![P::default(); len],
        })
    }

    /// Adopt an existing row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, and
    /// [`Error::DimensionMismatch`] if `data.len() != width * height`.
    pub fn from_vec(width: u32, height: u32, data: Vec<P>) -> Result<Self> {
        let expected = Self::checked_len(width, height)?;
        if data.len() != expected {
            return Err(Error::DimensionMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a grid by evaluating `f(x, y)` at every coordinate in row-major
    /// order.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> P) -> Result<Self> {
        let len = Self::checked_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    fn checked_len(width: u32, height: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        (width as usize)
            .checked_mul(height as usize)
            .ok_or(Error::InvalidDimension { width, height })
    }

    /// Get the grid width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the grid height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the full coordinate domain of the grid.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Check whether a signed coordinate lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Read the sample at (x, y).
    ///
    /// Returns the sentinel (`P::default()`) if the coordinate is out of
    /// range. Never fails.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> P {
        if self.in_bounds(x, y) {
            self.data[self.index(x as u32, y as u32)]
        } else {
            P::default()
        }
    }

    /// Write the sample at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`. Writing outside the grid is a
    /// precondition violation, never a recoverable condition.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: P) {
        assert!(
            x < self.width && y < self.height,
            "write at ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Set every sample to `value`.
    pub fn fill(&mut self, value: P) {
        self.data.fill(value);
    }

    /// Get a row of samples.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[P] {
        let start = self.index(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// Get raw access to the row-major samples.
    #[inline]
    pub fn data(&self) -> &[P] {
        &self.data
    }

    /// Get mutable access to the row-major samples.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [P] {
        &mut self.data
    }

    /// Convert every sample with `f`, keeping the dimensions.
    pub fn map<Q: Sample>(&self, f: impl FnMut(P) -> Q) -> PixelGrid<Q> {
        PixelGrid {
            width: self.width,
            height: self.height,
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Project every sample onto the 16-bit intensity channel.
    pub fn to_intensity(&self) -> PixelGrid<u16> {
        self.map(Sample::intensity)
    }
}
