// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shelf packing of equal-sized units into rows.

use alloc::vec::Vec;

use kurbo::Point;

/// Rows of units packed left to right, top to bottom, relative to the grid's origin.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct UnitGrid {
    pub(crate) cells: Vec<Point>,
    pub(crate) width: f64,
    pub(crate) height: f64,
    pub(crate) real_width: f64,
}

/// Smallest `r` with `r * r >= n`.
pub(crate) fn ceil_sqrt(n: usize) -> usize {
    let r = n.isqrt();
    if r * r < n { r + 1 } else { r }
}

/// Lay out `count` units of side `unit` with a gap of `padding` around each one.
///
/// A row wraps when the next unit would cross `width`. Every row holds at least one unit, and
/// the grid is widened if `width` cannot fit a single padded unit.
pub(crate) fn shelf_pack(count: usize, unit: f64, padding: f64, width: f64) -> UnitGrid {
    let width = width.max(unit + 2.0 * padding);
    let mut cells = Vec::with_capacity(count);
    let mut x = 0.0;
    let mut y = padding;
    let mut rows = 1;

    for i in 0..count {
        x += padding;
        cells.push(Point::new(x, y));
        x += unit;

        if x + padding + unit > width && i + 1 < count {
            x = 0.0;
            y += unit + padding;
            rows += 1;
        }
    }

    let real_width = if rows == 1 { x + padding } else { width };
    UnitGrid {
        cells,
        width,
        height: y + unit + padding,
        real_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn ceil_sqrt_rounds_up() {
        assert_eq!(ceil_sqrt(0), 0);
        assert_eq!(ceil_sqrt(1), 1);
        assert_eq!(ceil_sqrt(4), 2);
        assert_eq!(ceil_sqrt(5), 3);
        assert_eq!(ceil_sqrt(100), 10);
        assert_eq!(ceil_sqrt(101), 11);
    }

    #[test]
    fn four_units_make_two_rows() {
        let grid = shelf_pack(4, 10.0, 0.0, 20.0);
        assert_eq!(
            grid.cells,
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(0.0, 10.0),
                Point::new(10.0, 10.0),
            ]
        );
        assert_eq!(grid.width, 20.0);
        assert_eq!(grid.height, 20.0);
        assert_eq!(grid.real_width, 20.0);
    }

    #[test]
    fn padding_separates_units() {
        // Two units per row: 2 * (10 + 1) + 1 = 23.
        let grid = shelf_pack(3, 10.0, 1.0, 23.0);
        assert_eq!(
            grid.cells,
            vec![
                Point::new(1.0, 1.0),
                Point::new(12.0, 1.0),
                Point::new(1.0, 12.0),
            ]
        );
        assert_eq!(grid.height, 23.0);
    }

    #[test]
    fn single_row_reports_tight_width() {
        let grid = shelf_pack(2, 10.0, 1.0, 50.0);
        assert_eq!(grid.width, 50.0);
        assert_eq!(grid.real_width, 23.0);
        assert_eq!(grid.height, 12.0);
    }

    #[test]
    fn narrow_width_still_fits_one_unit() {
        let grid = shelf_pack(3, 10.0, 1.0, 4.0);
        assert_eq!(grid.width, 12.0);
        assert_eq!(grid.cells.len(), 3);
        assert!(grid.cells.iter().all(|c| c.x == 1.0));
        assert_eq!(grid.height, 34.0);
    }

    #[test]
    fn empty_grid_has_no_cells() {
        let grid = shelf_pack(0, 10.0, 0.0, 10.0);
        assert!(grid.cells.is_empty());
        assert_eq!(grid.real_width, 0.0);
    }
}
