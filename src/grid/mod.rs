//! Flat uniform grid over a 2D point set.
//!
//! Cells are squares with side equal to the search radius, so every point
//! within the radius of a query point lies inside the 3×3 cell window
//! around the query's cell. O(n) build, O(1) cell lookup.
//!
//! The grid stores its own reordered copy of the coordinates plus an
//! explicit permutation back to input order; the caller's slice is never
//! mutated.

mod build;
mod count;

pub use count::{count_within, count_within_other};

use crate::error::ScanError;
use crate::types::{BoundingBox, Point2};

/// Shared geometry of one scan: bounding box, search radius and the cell
/// grid derived from them.
///
/// Every grid participating in a scan must be built from the same spec;
/// cross-set queries assume identical cell numbering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub bounds: BoundingBox,
    pub radius: f64,
    /// Number of cells along X.
    pub nx: usize,
    /// Number of cells along Y.
    pub ny: usize,
}

impl GridSpec {
    /// Derive grid dimensions from a bounding box and search radius.
    ///
    /// `nx = ceil(width / radius)`, `ny = ceil(height / radius)`, each
    /// clamped to at least 1 so a degenerate (single-point or collinear)
    /// box still yields a usable grid.
    pub fn new(bounds: BoundingBox, radius: f64) -> Result<Self, ScanError> {
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(ScanError::InvalidRadius(radius));
        }
        if !bounds.is_valid() {
            return Err(ScanError::EmptyPointSet("bounding box"));
        }
        let nx = ((bounds.width() / radius).ceil() as usize).max(1);
        let ny = ((bounds.height() / radius).ceil() as usize).max(1);
        Ok(Self {
            bounds,
            radius,
            nx,
            ny,
        })
    }

    #[inline]
    pub fn num_cells(&self) -> usize {
        self.nx * self.ny
    }

    /// Cell (col, row) containing a point, clamped into grid bounds so
    /// points exactly on the max edge land in the last row/column.
    #[inline]
    pub fn cell_of(&self, x: f64, y: f64) -> (usize, usize) {
        // `as usize` saturates at 0, which also covers tiny negative
        // residues from the bounding-box subtraction.
        let col = (((x - self.bounds.x_min) / self.radius) as usize).min(self.nx - 1);
        let row = (((y - self.bounds.y_min) / self.radius) as usize).min(self.ny - 1);
        (col, row)
    }

    /// Row-major cell id.
    #[inline]
    pub fn cell_id(&self, col: usize, row: usize) -> usize {
        row * self.nx + col
    }
}

/// The 3×3 cell window around a cell, clamped at grid edges (not wrapped).
#[derive(Debug, Clone, Copy)]
pub(crate) struct CellWindow {
    pub row_min: usize,
    pub row_max: usize,
    pub col_min: usize,
    pub col_max: usize,
}

impl GridSpec {
    #[inline]
    pub(crate) fn window(&self, col: usize, row: usize) -> CellWindow {
        CellWindow {
            row_min: row.saturating_sub(1),
            row_max: (row + 1).min(self.ny - 1),
            col_min: col.saturating_sub(1),
            col_max: (col + 1).min(self.nx - 1),
        }
    }
}

/// CSR-style spatial index over one point set.
///
/// Points are held in structure-of-arrays form, sorted by row-major cell
/// id; `cell_offsets[c] .. cell_offsets[c + 1]` bounds cell `c`'s slots.
/// "Slot" below always means an index into this reordered layout;
/// `point_order` maps a slot back to the caller's original index.
pub struct FlatGrid {
    spec: GridSpec,
    /// Start slot per cell, plus final length. Length: nx * ny + 1.
    cell_offsets: Vec<u32>,
    /// Slot -> original input index. Length: n.
    point_order: Vec<u32>,
    /// Slot -> cell id. Length: n.
    point_cells: Vec<u32>,
    /// Reordered coordinates. Length: n each.
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl FlatGrid {
    #[inline]
    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.point_order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.point_order.is_empty()
    }

    #[inline]
    pub fn cell_offsets(&self) -> &[u32] {
        &self.cell_offsets
    }

    /// Permutation from slot to original input index.
    #[inline]
    pub fn point_order(&self) -> &[u32] {
        &self.point_order
    }

    #[inline]
    pub fn point_cells(&self) -> &[u32] {
        &self.point_cells
    }

    #[inline]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    #[inline]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    #[inline]
    pub fn point(&self, slot: usize) -> Point2 {
        Point2::new(self.xs[slot], self.ys[slot])
    }

    /// Reordered coordinates as an owned vector, aligned with the label and
    /// count vectors produced by the scan.
    pub fn points_vec(&self) -> Vec<Point2> {
        self.xs
            .iter()
            .zip(&self.ys)
            .map(|(&x, &y)| Point2::new(x, y))
            .collect()
    }

    /// Slot range covering `col_min ..= col_max` within one cell row.
    ///
    /// Cells of one row are contiguous in slot order, so the whole window
    /// row is a single run.
    #[inline]
    pub(crate) fn row_run(&self, row: usize, col_min: usize, col_max: usize) -> (usize, usize) {
        let base = row * self.spec.nx;
        let start = self.cell_offsets[base + col_min] as usize;
        let end = self.cell_offsets[base + col_max + 1] as usize;
        (start, end)
    }

    /// The clamped 3×3 window around a slot's cell.
    #[inline]
    pub(crate) fn window_of_slot(&self, slot: usize) -> CellWindow {
        let cell = self.point_cells[slot] as usize;
        let col = cell % self.spec.nx;
        let row = cell / self.spec.nx;
        self.spec.window(col, row)
    }

    /// The clamped 3×3 window around the cell containing a coordinate.
    #[inline]
    pub(crate) fn window_at(&self, p: Point2) -> CellWindow {
        let (col, row) = self.spec.cell_of(p.x, p.y);
        self.spec.window(col, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec_10x10() -> GridSpec {
        let bounds = BoundingBox {
            x_min: 0.0,
            y_min: 0.0,
            x_max: 10.0,
            y_max: 10.0,
        };
        GridSpec::new(bounds, 1.0).unwrap()
    }

    #[test]
    fn test_spec_dimensions() {
        let spec = spec_10x10();
        assert_eq!(spec.nx, 10);
        assert_eq!(spec.ny, 10);
        assert_eq!(spec.num_cells(), 100);
    }

    #[test]
    fn test_spec_rejects_bad_radius() {
        let bounds = BoundingBox::from_points(&[[0.0, 0.0], [1.0, 1.0]]);
        assert!(matches!(
            GridSpec::new(bounds, 0.0),
            Err(ScanError::InvalidRadius(_))
        ));
        assert!(matches!(
            GridSpec::new(bounds, -2.0),
            Err(ScanError::InvalidRadius(_))
        ));
        assert!(matches!(
            GridSpec::new(bounds, f64::NAN),
            Err(ScanError::InvalidRadius(_))
        ));
    }

    #[test]
    fn test_degenerate_box_gets_one_cell() {
        let bounds = BoundingBox::from_points(&[[3.0, 3.0]]);
        let spec = GridSpec::new(bounds, 1.0).unwrap();
        assert_eq!((spec.nx, spec.ny), (1, 1));
        assert_eq!(spec.cell_of(3.0, 3.0), (0, 0));
    }

    #[test]
    fn test_cell_of_clamps_max_edge() {
        let spec = spec_10x10();
        // Interior point.
        assert_eq!(spec.cell_of(2.5, 7.5), (2, 7));
        // Points exactly on the max edge belong to the last row/col.
        assert_eq!(spec.cell_of(10.0, 10.0), (9, 9));
        assert_eq!(spec.cell_of(0.0, 10.0), (0, 9));
    }

    #[test]
    fn test_window_clamps_at_edges() {
        let spec = spec_10x10();
        let w = spec.window(0, 0);
        assert_eq!((w.col_min, w.col_max, w.row_min, w.row_max), (0, 1, 0, 1));
        let w = spec.window(9, 9);
        assert_eq!((w.col_min, w.col_max, w.row_min, w.row_max), (8, 9, 8, 9));
        let w = spec.window(5, 5);
        assert_eq!((w.col_min, w.col_max, w.row_min, w.row_max), (4, 6, 4, 6));
    }
}
