//! tessel-filter - Partitioned image filters
//!
//! This crate computes a 16-bit output grid from an input grid by
//! evaluating a per-pixel aggregate over a partitioned output domain:
//!
//! - **Aggregates**: windowed incremental mean (blur) and binary threshold
//! - **Partitioning**: sequential, vertical row bands, quadrants, or any
//!   custom [`Partitioner`]
//! - **Tiling**: disjoint per-unit `&mut` row slices of the output buffer
//! - **Progress**: coalesced `\rN%` reports from concurrent workers
//! - **Engine**: rayon fan-out with a join barrier at scope end
//!
//! The output is bit-identical for every partitioning of the domain.

pub mod aggregate;
pub mod engine;
mod error;
pub mod partition;
pub mod progress;
pub mod tiling;

pub use aggregate::{
    AggregateFunction, DEFAULT_THRESHOLD, IncrementalMean, MAX_RADIUS, Radius, threshold_value,
    window_mean,
};
pub use engine::{FilterEngine, FilterOptions};
pub use error::{FilterError, FilterResult};
pub use partition::{PartitionStrategy, Partitioner, WorkUnit};
pub use progress::ProgressTracker;
pub use tiling::{UnitRows, split_rows, verify_tiling};
