//! Per-pixel aggregate functions
//!
//! An [`AggregateFunction`] turns the input around one output coordinate
//! into a single 16-bit value:
//!
//! - [`AggregateFunction::Mean`] folds the square window of radius `r`
//!   with the incremental mean recurrence
//! - [`AggregateFunction::Threshold`] maps the single sample at the
//!   coordinate to black or white
//!
//! # Window sampling
//!
//! The window `[x-r, x+r] x [y-r, y+r]` always holds `(2r+1)^2` samples.
//! Samples past the grid border are read as the black sentinel rather than
//! dropped, so large radii darken the output near the edges.
//!
//! # Incremental mean
//!
//! The mean is not `sum / count`. Samples are folded one at a time in
//! row-major order (top to bottom, then left to right) with
//!
//! ```text
//! avg = floor((avg * count + s) / (count + 1)); count += 1
//! ```
//!
//! starting from `avg = 0, count = 0`. Truncating at every step makes the
//! result depend on the scan order; the order is fixed here, so the output
//! is identical however the domain is partitioned.

use crate::{FilterError, FilterResult};
use tessel_core::{MAX_INTENSITY, PixelGrid, Sample};

/// Largest accepted window radius
pub const MAX_RADIUS: u32 = 1023;

/// Threshold level used when none is given (`u16::MAX / 2`)
pub const DEFAULT_THRESHOLD: u16 = u16::MAX / 2;

/// Window radius, validated to `[0, 1023]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Radius(u32);

impl Radius {
    /// Create a radius.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidRadius`] if `r > 1023`.
    pub fn new(r: u32) -> FilterResult<Self> {
        if r > MAX_RADIUS {
            return Err(FilterError::InvalidRadius(r));
        }
        Ok(Self(r))
    }

    /// Get the radius in pixels.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Number of samples in a window of this radius, `(2r+1)^2`.
    #[inline]
    pub fn window_len(self) -> u64 {
        let side = 2 * u64::from(self.0) + 1;
        side * side
    }
}

impl TryFrom<u32> for Radius {
    type Error = FilterError;

    fn try_from(r: u32) -> FilterResult<Self> {
        Self::new(r)
    }
}

/// Running state of the incremental mean recurrence.
///
/// Carried in 64 bits so `avg * count` stays exact for the largest window
/// (`2047^2` samples of up to 65535).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IncrementalMean {
    avg: u64,
    count: u64,
}

impl IncrementalMean {
    /// Fold one sample into the mean.
    #[inline]
    pub fn push(&mut self, sample: u16) {
        self.avg = (self.avg * self.count + u64::from(sample)) / (self.count + 1);
        self.count += 1;
    }

    /// Number of samples folded so far.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Current value of the mean (0 before any sample).
    #[inline]
    pub fn value(&self) -> u16 {
        // avg never exceeds the largest sample pushed
        self.avg as u16
    }
}

impl Extend<u16> for IncrementalMean {
    fn extend<I: IntoIterator<Item = u16>>(&mut self, iter: I) {
        for s in iter {
            self.push(s);
        }
    }
}

/// Mean of the window of radius `radius` centered at (x, y).
pub fn window_mean<P: Sample>(input: &PixelGrid<P>, x: u32, y: u32, radius: Radius) -> u16 {
    let r = i64::from(radius.get());
    let (cx, cy) = (i64::from(x), i64::from(y));

    let mut mean = IncrementalMean::default();
    for sy in cy - r..=cy + r {
        for sx in cx - r..=cx + r {
            mean.push(input.get(sx, sy).intensity());
        }
    }
    debug_assert_eq!(mean.count(), radius.window_len());
    mean.value()
}

/// Map an intensity to black if it is at or below `level`, white otherwise.
#[inline]
pub fn threshold_value(intensity: u16, level: u16) -> u16 {
    if intensity <= level { 0 } else { MAX_INTENSITY }
}

/// Per-pixel reduction applied by the filter engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
    /// Incremental mean over the square window of the given radius
    Mean(Radius),
    /// Binary threshold of the sample at the coordinate
    Threshold(u16),
}

impl AggregateFunction {
    /// Windowed mean with radius `r`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidRadius`] if `r > 1023`.
    pub fn mean(r: u32) -> FilterResult<Self> {
        Ok(Self::Mean(Radius::new(r)?))
    }

    /// Binary threshold at `level`.
    pub fn threshold(level: u16) -> Self {
        Self::Threshold(level)
    }

    /// Evaluate the aggregate for output coordinate (x, y).
    #[inline]
    pub fn evaluate<P: Sample>(&self, input: &PixelGrid<P>, x: u32, y: u32) -> u16 {
        match *self {
            Self::Mean(radius) => window_mean(input, x, y, radius),
            Self::Threshold(level) => {
                threshold_value(input.get(i64::from(x), i64::from(y)).intensity(), level)
            }
        }
    }

    /// Short name used in logs and output file names.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mean(_) => "blur",
            Self::Threshold(_) => "threshold",
        }
    }
}

impl Default for AggregateFunction {
    fn default() -> Self {
        Self::Threshold(DEFAULT_THRESHOLD)
    }
}
