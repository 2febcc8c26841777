//! Splitting the output buffer into disjoint per-unit row slices
//!
//! Work units write into one shared output grid. Instead of locking the
//! grid, [`split_rows`] carves the row-major buffer into `&mut` slices, one
//! per unit and row, and hands each unit its own set. Slices never alias,
//! so units can be filled from any number of threads.
//!
//! Carving the buffer walks every row from left to right, so it doubles as
//! the tiling check: a unit that starts past the cursor leaves a gap, one
//! that starts before it overlaps its neighbour. Either is reported as
//! [`FilterError::TilingViolation`] with the first offending coordinate.

use crate::partition::WorkUnit;
use crate::{FilterError, FilterResult};

/// The rows of the output buffer owned by one work unit
#[derive(Debug)]
pub struct UnitRows<'a, P> {
    /// Unit the rows belong to
    pub unit: WorkUnit,
    rows: Vec<&'a mut [P]>,
}

impl<'a, P> UnitRows<'a, P> {
    /// Number of rows, equal to the unit height.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the unit owns no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over `(y, row)` pairs, top to bottom.
    ///
    /// Each row is `unit.rect.w` long and starts at column `unit.rect.x`.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = (u32, &mut [P])> + '_ {
        let top = self.unit.rect.y;
        self.rows
            .iter_mut()
            .enumerate()
            .map(move |(i, row)| (top + i as u32, &mut **row))
    }
}

/// Split a `width x height` row-major buffer among `units`.
///
/// Returns one [`UnitRows`] per non-empty unit, in partition order.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if `data` is not
/// `width * height` long, and [`FilterError::TilingViolation`] if a unit
/// leaves the domain or the units do not cover every coordinate exactly
/// once.
pub fn split_rows<'a, P>(
    data: &'a mut [P],
    width: u32,
    height: u32,
    units: &[WorkUnit],
) -> FilterResult<Vec<UnitRows<'a, P>>> {
    let expected = width as usize * height as usize;
    if data.len() != expected {
        return Err(FilterError::InvalidParameters(format!(
            "buffer holds {} samples, {width}x{height} needs {expected}",
            data.len()
        )));
    }

    for unit in units.iter().filter(|u| !u.is_empty()) {
        let r = unit.rect;
        if u64::from(r.x) + u64::from(r.w) > u64::from(width)
            || u64::from(r.y) + u64::from(r.h) > u64::from(height)
        {
            return Err(FilterError::TilingViolation(format!(
                "unit {} at ({}, {}) size {}x{} leaves the {width}x{height} domain",
                unit.index, r.x, r.y, r.w, r.h
            )));
        }
    }

    // Non-empty units as positions into `units`, left to right
    let mut order: Vec<usize> = (0..units.len()).filter(|&i| !units[i].is_empty()).collect();
    order.sort_by_key(|&i| (units[i].rect.x, units[i].rect.y));

    let mut slot = vec![usize::MAX; units.len()];
    let mut targets = Vec::with_capacity(order.len());
    for (i, unit) in units.iter().enumerate().filter(|(_, u)| !u.is_empty()) {
        slot[i] = targets.len();
        targets.push(UnitRows {
            unit: *unit,
            rows: Vec::with_capacity(unit.rect.h as usize),
        });
    }

    if expected == 0 {
        return Ok(targets);
    }

    for (y, row) in data.chunks_exact_mut(width as usize).enumerate() {
        let y = y as u32;
        let mut rest = row;
        let mut cursor = 0u32;

        for &i in order.iter().filter(|&&i| units[i].covers_row(y)) {
            let rect = units[i].rect;
            if rect.x < cursor {
                return Err(FilterError::TilingViolation(format!(
                    "unit {} overlaps its neighbour at ({}, {y})",
                    units[i].index, rect.x
                )));
            }
            if rect.x > cursor {
                return Err(FilterError::TilingViolation(format!(
                    "coordinate ({cursor}, {y}) is not covered"
                )));
            }
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(rect.w as usize);
            targets[slot[i]].rows.push(head);
            rest = tail;
            cursor = rect.right();
        }

        if cursor < width {
            return Err(FilterError::TilingViolation(format!(
                "coordinate ({cursor}, {y}) is not covered"
            )));
        }
    }

    Ok(targets)
}

/// Check that `units` cover the `width x height` domain exactly once.
///
/// # Errors
///
/// Returns [`FilterError::TilingViolation`] describing the first gap or
/// overlap found.
pub fn verify_tiling(units: &[WorkUnit], width: u32, height: u32) -> FilterResult<()> {
    let mut cells = vec![(); width as usize * height as usize];
    split_rows(&mut cells, width, height, units).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_core::Rect;

    fn unit(index: usize, x: u32, y: u32, w: u32, h: u32) -> WorkUnit {
        WorkUnit::new(index, Rect::new(x, y, w, h))
    }

    #[test]
    fn test_split_gives_disjoint_rows() {
        let mut data: Vec<u32> = (0..12).collect();
        let units = [unit(0, 0, 0, 1, 3), unit(1, 1, 0, 3, 3)];
        let mut targets = split_rows(&mut data, 4, 3, &units).unwrap();
        assert_eq!(targets.len(), 2);

        let left: Vec<Vec<u32>> = targets[0].rows_mut().map(|(_, r)| r.to_vec()).collect();
        assert_eq!(left, vec![vec![0], vec![4], vec![8]]);

        let right: Vec<(u32, Vec<u32>)> =
            targets[1].rows_mut().map(|(y, r)| (y, r.to_vec())).collect();
        assert_eq!(
            right,
            vec![(0, vec![1, 2, 3]), (1, vec![5, 6, 7]), (2, vec![9, 10, 11])]
        );
    }

    #[test]
    fn test_writes_land_in_buffer() {
        let mut data = vec![0u16; 6];
        let units = [unit(0, 0, 0, 3, 1), unit(1, 0, 1, 3, 1)];
        for mut target in split_rows(&mut data, 3, 2, &units).unwrap() {
            let v = target.unit.index as u16 + 1;
            for (_, row) in target.rows_mut() {
                row.fill(v);
            }
        }
        assert_eq!(data, vec![1, 1, 1, 2, 2, 2]);
    }

    #[test]
    fn test_empty_units_are_skipped() {
        let mut data = vec![0u8; 4];
        let units = [unit(0, 0, 0, 0, 2), unit(1, 0, 0, 2, 2), unit(2, 2, 0, 0, 0)];
        let targets = split_rows(&mut data, 2, 2, &units).unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].unit.index, 1);
        assert_eq!(targets[0].len(), 2);
    }

    #[test]
    fn test_gap_reported() {
        let units = [unit(0, 0, 0, 2, 2), unit(1, 3, 0, 1, 2)];
        let err = verify_tiling(&units, 4, 2).unwrap_err();
        assert!(matches!(&err, FilterError::TilingViolation(m) if m.contains("(2, 0)")));

        let short = [unit(0, 0, 0, 4, 1)];
        let err = verify_tiling(&short, 4, 2).unwrap_err();
        assert!(matches!(&err, FilterError::TilingViolation(m) if m.contains("(0, 1)")));
    }

    #[test]
    fn test_overlap_reported() {
        let units = [unit(0, 0, 0, 3, 2), unit(1, 2, 0, 2, 2)];
        assert!(matches!(
            verify_tiling(&units, 4, 2),
            Err(FilterError::TilingViolation(_))
        ));

        let twice = [unit(0, 0, 0, 2, 2), unit(1, 0, 0, 2, 2)];
        assert!(verify_tiling(&twice, 2, 2).is_err());
    }

    #[test]
    fn test_unit_outside_domain_reported() {
        let units = [unit(0, 0, 0, 2, 2), unit(1, 2, 0, u32::MAX, 2)];
        assert!(matches!(
            verify_tiling(&units, 2, 2),
            Err(FilterError::TilingViolation(m)) if m.contains("leaves")
        ));
    }

    #[test]
    fn test_buffer_length_checked() {
        let mut data = vec![0u16; 5];
        let units = [unit(0, 0, 0, 3, 2)];
        assert!(matches!(
            split_rows(&mut data, 3, 2, &units),
            Err(FilterError::InvalidParameters(_))
        ));
    }
}
