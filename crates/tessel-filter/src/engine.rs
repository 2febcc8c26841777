//! Partitioned filter engine
//!
//! [`FilterEngine`] computes one output sample per input coordinate by
//! evaluating an [`AggregateFunction`]. The output domain is split into
//! work units by a [`Partitioner`]; each non-empty unit becomes one rayon
//! task inside a scope, so the run returns only after every unit is done.
//!
//! Units write straight into disjoint row slices of the output buffer (see
//! [`crate::tiling`]), so no lock guards the output. The only shared state
//! is the [`ProgressTracker`].
//!
//! # Examples
//!
//! ```
//! use tessel_core::PixelGrid;
//! use tessel_filter::{AggregateFunction, FilterEngine, PartitionStrategy};
//!
//! let input = PixelGrid::from_vec(3, 1, vec![10000u16, 40000, 10000]).unwrap();
//! let engine = FilterEngine::new(AggregateFunction::threshold(32767), PartitionStrategy::Quadrants);
//! let output = engine.run(&input).unwrap();
//! assert_eq!(output.data(), &[0, 65535, 0]);
//! ```

use crate::aggregate::AggregateFunction;
use crate::partition::{PartitionStrategy, Partitioner};
use crate::progress::ProgressTracker;
use crate::tiling::{UnitRows, split_rows};
use crate::{FilterError, FilterResult};
use std::io::{self, Write};
use std::num::NonZeroUsize;
use tessel_core::{PixelGrid, Sample};

/// Options for a filter run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterOptions {
    /// How the output domain is split into work units
    pub strategy: PartitionStrategy,
    /// Size of a dedicated worker pool; `None` uses the global rayon pool
    pub threads: Option<NonZeroUsize>,
}

impl FilterOptions {
    /// Options with the given strategy on the global pool.
    pub fn with_strategy(strategy: PartitionStrategy) -> Self {
        Self {
            strategy,
            threads: None,
        }
    }

    /// Run on a dedicated pool of `n` threads.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] if `n` is 0.
    pub fn threads(mut self, n: usize) -> FilterResult<Self> {
        let n = NonZeroUsize::new(n).ok_or_else(|| {
            FilterError::InvalidParameters("thread count must be at least 1".into())
        })?;
        self.threads = Some(n);
        Ok(self)
    }
}

/// Applies one aggregate function over a partitioned output domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterEngine {
    aggregate: AggregateFunction,
    options: FilterOptions,
}

impl FilterEngine {
    /// Create an engine that runs on the global rayon pool.
    pub fn new(aggregate: AggregateFunction, strategy: PartitionStrategy) -> Self {
        Self::with_options(aggregate, FilterOptions::with_strategy(strategy))
    }

    /// Create an engine with explicit options.
    pub fn with_options(aggregate: AggregateFunction, options: FilterOptions) -> Self {
        Self { aggregate, options }
    }

    /// Filter `input` without reporting progress.
    pub fn run<P: Sample>(&self, input: &PixelGrid<P>) -> FilterResult<PixelGrid<u16>> {
        self.run_with_progress(input, io::sink()).map(|(output, _)| output)
    }

    /// Filter `input`, reporting progress to `sink`.
    ///
    /// The sink receives `\r{percent}%` each time the percentage changes and
    /// a single newline at the end. It is handed back with the output.
    pub fn run_with_progress<P, W>(
        &self,
        input: &PixelGrid<P>,
        sink: W,
    ) -> FilterResult<(PixelGrid<u16>, W)>
    where
        P: Sample,
        W: Write + Send,
    {
        tracing::debug!(strategy = %self.options.strategy, "partitioning with built-in strategy");
        self.run_partitioned(input, &self.options.strategy, sink)
    }

    /// Filter `input` with any partitioner.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::TilingViolation`] before any sample is computed
    /// if the partitioner does not cover the domain exactly once.
    pub fn run_partitioned<P, Q, W>(
        &self,
        input: &PixelGrid<P>,
        partitioner: &Q,
        sink: W,
    ) -> FilterResult<(PixelGrid<u16>, W)>
    where
        P: Sample,
        Q: Partitioner + ?Sized,
        W: Write + Send,
    {
        let (width, height) = (input.width(), input.height());
        let mut output = PixelGrid::<u16>::new(width, height)?;

        let units = partitioner.partition(width, height);
        let targets = split_rows(output.data_mut(), width, height, &units)?;
        let total_rows: u64 = targets.iter().map(|t| t.len() as u64).sum();
        let tracker = ProgressTracker::new(total_rows, sink);

        tracing::debug!(
            filter = self.aggregate.name(),
            width,
            height,
            units = targets.len(),
            "starting filter run"
        );

        let aggregate = self.aggregate;
        if targets.len() <= 1 {
            for target in targets {
                fill_unit(input, aggregate, target, &tracker);
            }
        } else if let Some(n) = self.options.threads {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n.get())
                .build()?;
            pool.scope(|s| spawn_units(s, input, aggregate, targets, &tracker));
        } else {
            rayon::scope(|s| spawn_units(s, input, aggregate, targets, &tracker));
        }

        let sink = tracker.finish().map_err(FilterError::Progress)?;
        Ok((output, sink))
    }
}

fn spawn_units<'scope, P, W>(
    scope: &rayon::Scope<'scope>,
    input: &'scope PixelGrid<P>,
    aggregate: AggregateFunction,
    targets: Vec<UnitRows<'scope, u16>>,
    tracker: &'scope ProgressTracker<W>,
) where
    P: Sample,
    W: Write + Send,
{
    for target in targets {
        scope.spawn(move |_| fill_unit(input, aggregate, target, tracker));
    }
}

/// Fill every row of one unit in row-major order.
fn fill_unit<P: Sample, W: Write>(
    input: &PixelGrid<P>,
    aggregate: AggregateFunction,
    mut target: UnitRows<'_, u16>,
    tracker: &ProgressTracker<W>,
) {
    let left = target.unit.rect.x;
    for (y, row) in target.rows_mut() {
        for (dx, cell) in row.iter_mut().enumerate() {
            *cell = aggregate.evaluate(input, left + dx as u32, y);
        }
        tracker.row_done();
    }
    tracing::trace!(unit = target.unit.index, rect = ?target.unit.rect, "unit complete");
}
