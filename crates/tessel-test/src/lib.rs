//! tessel-test - Regression test framework for tessel
//!
//! Every `tests/*_reg.rs` file drives its checks through a [`RegParams`],
//! which numbers each comparison, records failures instead of stopping at
//! the first one, and reports a summary on [`RegParams::cleanup`].
//!
//! Two modes are supported:
//!
//! - **Compare**: run the comparisons (default)
//! - **Display**: also write intermediate grids to `tests/regout` as PNG for
//!   visual inspection
//!
//! # Usage
//!
//! ```ignore
//! use tessel_test::RegParams;
//!
//! let mut rp = RegParams::new("blur");
//! rp.compare_values(65535.0, center as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use tessel_core::PixelGrid;

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // tessel-test is at crates/tessel-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// A gray16 grid with every sample set to `value`.
pub fn uniform_gray(width: u32, height: u32, value: u16) -> PixelGrid<u16> {
    let mut grid = PixelGrid::new(width, height).expect("uniform_gray dimensions");
    grid.fill(value);
    grid
}

/// A gray16 grid whose samples are distinct and vary in both directions.
///
/// Sample (x, y) is `(x * 131 + y * 977) * 53 mod 65536`, which keeps
/// neighbouring values far apart so partitioning mistakes show up.
pub fn pattern_gray(width: u32, height: u32) -> PixelGrid<u16> {
    PixelGrid::from_fn(width, height, |x, y| {
        ((u64::from(x) * 131 + u64::from(y) * 977) * 53 % 65536) as u16
    })
    .expect("pattern_gray dimensions")
}
