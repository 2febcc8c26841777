//! tessel - Concurrent spatial filters over pixel grids
//!
//! tessel computes a 16-bit output image from an input image by evaluating
//! a per-pixel aggregate (windowed mean or threshold) over an output domain
//! split into independently computed work units.
//!
//! # Overview
//!
//! - Pixel grids with a black sentinel outside their bounds
//! - PNG decoding of any flavor into 16-bit channels, gray16 and RGBA output
//! - Windowed incremental mean (blur) and binary threshold
//! - Sequential, row-band and quadrant partitioning on rayon
//! - Synthetic noise and hue-wheel sources
//!
//! The `noise`, `hue`, `blur` and `threshold` binaries wrap the functions in
//! [`commands`].
//!
//! # Example
//!
//! ```
//! use tessel::PixelGrid;
//! use tessel::filter::{AggregateFunction, FilterEngine, PartitionStrategy};
//!
//! let input = PixelGrid::from_vec(3, 1, vec![10000u16, 40000, 10000]).unwrap();
//! let engine = FilterEngine::new(AggregateFunction::threshold(32767), PartitionStrategy::Quadrants);
//! assert_eq!(engine.run(&input).unwrap().data(), &[0, 65535, 0]);
//! ```

pub mod commands;

// Re-export core types (primary data structures used everywhere)
pub use tessel_core::*;

// Re-export the other crates as modules to avoid name conflicts
pub use tessel_filter as filter;
pub use tessel_io as io;
