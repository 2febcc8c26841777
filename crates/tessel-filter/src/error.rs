//! Error types for tessel-filter

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] tessel_core::Error),

    /// Window radius outside `[0, 1023]`
    #[error("invalid radius: {0} is not in [0, {max}]", max = crate::aggregate::MAX_RADIUS)]
    InvalidRadius(u32),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Work units that do not tile the output domain exactly once
    #[error("work units violate the tiling invariant: {0}")]
    TilingViolation(String),

    /// Dedicated worker pool could not be built
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Progress sink failed
    #[error("progress report failed: {0}")]
    Progress(#[source] std::io::Error),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
