//! Neighborhood counting over the flat grid.
//!
//! For every slot of an indexed set, counts reference-set points within the
//! search radius, visiting only the 3×3 cell window around the slot's cell.
//! The radius equals the cell side, so no in-radius point can lie outside
//! that window.

use super::FlatGrid;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Conditionally parallel iterator over a range.
macro_rules! maybe_par_range {
    ($range:expr) => {{
        #[cfg(feature = "parallel")]
        {
            ($range).into_par_iter()
        }
        #[cfg(not(feature = "parallel"))]
        {
            $range
        }
    }};
}

/// For every slot in `grid`, the number of points of the same set within
/// the search radius. Distance ties (`== radius`) are included, and every
/// point counts itself, so counts are always at least 1.
pub fn count_within(grid: &FlatGrid) -> Vec<u32> {
    count_against(grid, grid)
}

/// For every slot in `grid`, the number of `reference`-set points within
/// the search radius. Both grids must share the same `GridSpec`.
pub fn count_within_other(grid: &FlatGrid, reference: &FlatGrid) -> Vec<u32> {
    debug_assert_eq!(
        grid.spec(),
        reference.spec(),
        "cross-set counting requires a shared grid spec"
    );
    count_against(grid, reference)
}

/// Shared body of the two counting operations.
///
/// Cell rows are independent read-only work items; with the `parallel`
/// feature they run on rayon and are flattened back in row order, so the
/// output is identical to the sequential path. A row of cells covers a
/// contiguous slot range, so the flattened per-row vectors line up with the
/// grid's slot order.
fn count_against(grid: &FlatGrid, reference: &FlatGrid) -> Vec<u32> {
    let ny = grid.spec().ny;

    let rows: Vec<Vec<u32>> = maybe_par_range!(0..ny)
        .map(|row| count_row(grid, reference, row))
        .collect();

    let mut counts = Vec::with_capacity(grid.len());
    for row in rows {
        counts.extend_from_slice(&row);
    }
    debug_assert_eq!(counts.len(), grid.len());
    counts
}

fn count_row(grid: &FlatGrid, reference: &FlatGrid, row: usize) -> Vec<u32> {
    let spec = grid.spec();
    let r2 = spec.radius * spec.radius;

    let (row_start, row_end) = grid.row_run(row, 0, spec.nx - 1);
    let mut counts = Vec::with_capacity(row_end - row_start);

    for col in 0..spec.nx {
        let window = spec.window(col, row);
        let (start, end) = grid.row_run(row, col, col);

        for slot in start..end {
            let p = grid.point(slot);
            let mut count = 0u32;
            for wrow in window.row_min..=window.row_max {
                let (rstart, rend) = reference.row_run(wrow, window.col_min, window.col_max);
                for rslot in rstart..rend {
                    if reference.point(rslot).distance_squared(p) <= r2 {
                        count += 1;
                    }
                }
            }
            counts.push(count);
        }
    }
    counts
}
