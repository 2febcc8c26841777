//! Partitioning of the output domain into work units
//!
//! A [`Partitioner`] splits the `width x height` output domain into
//! [`WorkUnit`]s, each of which is filled by exactly one task. Every
//! partitioner must tile the domain: each coordinate belongs to exactly one
//! unit. Units may be empty (for example the leading bands when there are
//! more bands than columns); empty units cover nothing and get no task.
//!
//! Three strategies are provided by [`PartitionStrategy`]:
//!
//! | strategy        | units | shape                                       |
//! |-----------------|-------|---------------------------------------------|
//! | `Sequential`    | 1     | the whole domain, filled on the caller      |
//! | `RowBands(n)`   | n     | full-height strips `floor(W/n)` wide        |
//! | `Quadrants`     | 4     | split at `floor(W/2)` and `floor(H/2)`      |

use crate::{FilterError, FilterResult};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use tessel_core::Rect;

/// A rectangular part of the output domain owned by one task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkUnit {
    /// Position of the unit in its partition
    pub index: usize,
    /// Coordinates covered by the unit
    pub rect: Rect,
}

impl WorkUnit {
    /// Create a work unit.
    pub fn new(index: usize, rect: Rect) -> Self {
        Self { index, rect }
    }

    /// Check if the unit covers no coordinates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rect.is_empty()
    }

    /// Check if the unit covers any coordinate of row `y`.
    #[inline]
    pub fn covers_row(&self, y: u32) -> bool {
        !self.is_empty() && y >= self.rect.y && y < self.rect.bottom()
    }
}

/// Splits an output domain into work units
pub trait Partitioner {
    /// Split the `width x height` domain into units that tile it exactly.
    fn partition(&self, width: u32, height: u32) -> Vec<WorkUnit>;
}

impl<T: Partitioner + ?Sized> Partitioner for &T {
    fn partition(&self, width: u32, height: u32) -> Vec<WorkUnit> {
        (**self).partition(width, height)
    }
}

/// Built-in partitioning strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PartitionStrategy {
    /// One unit covering the whole domain, run without concurrency
    Sequential,
    /// `n` full-height vertical strips, left to right
    RowBands(NonZeroU32),
    /// Four units split at the integer midpoints
    #[default]
    Quadrants,
}

impl PartitionStrategy {
    /// `n` vertical strips.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] if `n` is 0.
    pub fn row_bands(n: u32) -> FilterResult<Self> {
        NonZeroU32::new(n)
            .map(Self::RowBands)
            .ok_or_else(|| FilterError::InvalidParameters("band count must be at least 1".into()))
    }
}

impl Partitioner for PartitionStrategy {
    fn partition(&self, width: u32, height: u32) -> Vec<WorkUnit> {
        match *self {
            Self::Sequential => sequential(width, height),
            Self::RowBands(n) => row_bands(width, height, n),
            Self::Quadrants => quadrants(width, height),
        }
    }
}

fn sequential(width: u32, height: u32) -> Vec<WorkUnit> {
    vec![WorkUnit::new(0, Rect::new(0, 0, width, height))]
}

/// Bands are `floor(width / n)` wide; the last one is stretched to `width`
/// so the columns left over by the division are still covered.
fn row_bands(width: u32, height: u32, n: NonZeroU32) -> Vec<WorkUnit> {
    let n = n.get();
    let band = width / n;
    (0..n)
        .map(|i| {
            let left = i * band;
            let right = if i + 1 == n { width } else { left + band };
            WorkUnit::new(i as usize, Rect::from_edges(left, 0, right, height))
        })
        .collect()
}

/// Upper-left, upper-right, lower-left, lower-right.
fn quadrants(width: u32, height: u32) -> Vec<WorkUnit> {
    let (mx, my) = (width / 2, height / 2);
    [
        Rect::from_edges(0, 0, mx, my),
        Rect::from_edges(mx, 0, width, my),
        Rect::from_edges(0, my, mx, height),
        Rect::from_edges(mx, my, width, height),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, rect)| WorkUnit::new(i, rect))
    .collect()
}

impl fmt::Display for PartitionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => f.write_str("sequential"),
            Self::RowBands(n) => write!(f, "bands:{n}"),
            Self::Quadrants => f.write_str("quadrants"),
        }
    }
}

impl FromStr for PartitionStrategy {
    type Err = FilterError;

    /// Parse `sequential`, `quadrants` or `bands:N`.
    fn from_str(s: &str) -> FilterResult<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "sequential" => Ok(Self::Sequential),
            "quadrants" => Ok(Self::Quadrants),
            _ => {
                let n = s
                    .strip_prefix("bands:")
                    .ok_or_else(|| {
                        FilterError::InvalidParameters(format!(
                            "unknown strategy '{s}' (expected sequential, quadrants or bands:N)"
                        ))
                    })?
                    .parse::<u32>()
                    .map_err(|e| FilterError::InvalidParameters(format!("band count: {e}")))?;
                Self::row_bands(n)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiling::verify_tiling;
    use proptest::prelude::*;

    fn bands(n: u32) -> PartitionStrategy {
        PartitionStrategy::row_bands(n).unwrap()
    }

    /// Count how many units cover each coordinate.
    fn coverage(units: &[WorkUnit], width: u32, height: u32) -> Vec<u32> {
        let mut counts = vec![0u32; (width * height) as usize];
        for unit in units {
            for (x, y) in unit.rect.points() {
                assert!(x < width && y < height, "unit {unit:?} leaves the domain");
                counts[(y * width + x) as usize] += 1;
            }
        }
        counts
    }

    #[test]
    fn test_sequential_single_unit() {
        let units = PartitionStrategy::Sequential.partition(7, 5);
        assert_eq!(units, vec![WorkUnit::new(0, Rect::new(0, 0, 7, 5))]);
    }

    #[test]
    fn test_row_bands_clamps_last_band() {
        let units = bands(3).partition(10, 4);
        let rects: Vec<Rect> = units.iter().map(|u| u.rect).collect();
        assert_eq!(
            rects,
            vec![
                Rect::new(0, 0, 3, 4),
                Rect::new(3, 0, 3, 4),
                Rect::new(6, 0, 4, 4),
            ]
        );
    }

    #[test]
    fn test_row_bands_more_bands_than_columns() {
        let units = bands(5).partition(3, 2);
        assert_eq!(units.len(), 5);
        assert!(units[..4].iter().all(WorkUnit::is_empty));
        assert_eq!(units[4].rect, Rect::new(0, 0, 3, 2));
    }

    #[test]
    fn test_row_bands_zero_rejected() {
        assert!(matches!(
            PartitionStrategy::row_bands(0),
            Err(FilterError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_quadrants_odd_dimensions() {
        let units = PartitionStrategy::Quadrants.partition(5, 3);
        let rects: Vec<Rect> = units.iter().map(|u| u.rect).collect();
        assert_eq!(
            rects,
            vec![
                Rect::new(0, 0, 2, 1),
                Rect::new(2, 0, 3, 1),
                Rect::new(0, 1, 2, 2),
                Rect::new(2, 1, 3, 2),
            ]
        );
    }

    #[test]
    fn test_every_strategy_tiles_exactly_once() {
        let dims = [(1, 1), (1, 7), (7, 1), (2, 2), (3, 5), (16, 9), (33, 17), (64, 64)];
        for (w, h) in dims {
            let mut strategies = vec![PartitionStrategy::Sequential, PartitionStrategy::Quadrants];
            strategies.extend((1..=12).map(bands));
            for strategy in strategies {
                let units = strategy.partition(w, h);
                let counts = coverage(&units, w, h);
                assert!(
                    counts.iter().all(|&c| c == 1),
                    "{strategy} does not tile {w}x{h}"
                );
            }
        }
    }

    proptest! {
        #[test]
        fn test_strategies_tile_random_domains(w in 1u32..200, h in 1u32..200, n in 1u32..300) {
            for strategy in [PartitionStrategy::Sequential, PartitionStrategy::Quadrants, bands(n)] {
                let units = strategy.partition(w, h);
                let counts = coverage(&units, w, h);
                prop_assert!(counts.iter().all(|&c| c == 1), "{} does not tile {}x{}", strategy, w, h);
                prop_assert!(verify_tiling(&units, w, h).is_ok());
            }
        }
    }

    #[test]
    fn test_unit_indices_follow_order() {
        for strategy in [PartitionStrategy::Quadrants, bands(6)] {
            let units = strategy.partition(20, 20);
            assert!(units.iter().enumerate().all(|(i, u)| u.index == i));
        }
    }

    #[test]
    fn test_parse_strategy() {
        assert_eq!("sequential".parse::<PartitionStrategy>().unwrap(), PartitionStrategy::Sequential);
        assert_eq!("Quadrants".parse::<PartitionStrategy>().unwrap(), PartitionStrategy::Quadrants);
        assert_eq!("bands:4".parse::<PartitionStrategy>().unwrap(), bands(4));
        assert!("bands:0".parse::<PartitionStrategy>().is_err());
        assert!("bands:x".parse::<PartitionStrategy>().is_err());
        assert!("spiral".parse::<PartitionStrategy>().is_err());
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for strategy in [PartitionStrategy::Sequential, PartitionStrategy::Quadrants, bands(8)] {
            assert_eq!(strategy.to_string().parse::<PartitionStrategy>().unwrap(), strategy);
        }
    }
}
