//! tessel-core - Basic data structures for spatial filtering
//!
//! This crate provides the fundamental data structures used throughout
//! tessel:
//!
//! - [`PixelGrid`] - Dense 2D sample buffer with a black out-of-range sentinel
//! - [`Sample`] / [`Rgba`] - Pixel types and their 16-bit intensity projection
//! - [`Rect`] - Rectangle regions of the pixel domain
//! - [`synth`] - Synthetic noise and hue-wheel sources

pub mod error;
pub mod grid;
pub mod rect;
pub mod sample;
pub mod synth;

pub use error::{Error, Result};
pub use grid::PixelGrid;
pub use rect::Rect;
pub use sample::{MAX_INTENSITY, Rgba, Sample};
