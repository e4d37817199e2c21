//! Grid construction: counting sort by cell id.

use super::{FlatGrid, GridSpec};
use crate::types::Point2Like;

impl FlatGrid {
    /// Bucket a point set into the spec's cells.
    ///
    /// Counting sort: classify every point, count per cell, prefix-sum the
    /// counts into the offset table, then scatter in input order. The
    /// scatter is stable, so points sharing a cell keep their relative
    /// input order. O(n + cells) time and space.
    ///
    /// Points outside the spec's bounding box are clamped into the border
    /// cells; callers that built the spec from the union of their inputs
    /// never hit that path except on the max edges.
    pub fn build<P: Point2Like>(spec: &GridSpec, points: &[P]) -> Self {
        let n = points.len();
        let num_cells = spec.num_cells();

        // Pass 1: classify and count.
        let mut input_cells: Vec<u32> = Vec::with_capacity(n);
        let mut counts = vec![0u32; num_cells];
        for p in points {
            let (col, row) = spec.cell_of(p.x(), p.y());
            let cell = spec.cell_id(col, row) as u32;
            input_cells.push(cell);
            counts[cell as usize] += 1;
        }

        // Prefix sum -> offset table.
        let mut cell_offsets = Vec::with_capacity(num_cells + 1);
        cell_offsets.push(0u32);
        let mut sum = 0u32;
        for &count in &counts {
            sum += count;
            cell_offsets.push(sum);
        }
        debug_assert_eq!(cell_offsets[num_cells] as usize, n, "prefix sum mismatch");

        // Pass 2: stable scatter into slot order. `counts` is reused as the
        // per-cell write cursor.
        let mut cursor = counts;
        cursor.copy_from_slice(&cell_offsets[..num_cells]);

        let mut point_order = vec![0u32; n];
        let mut point_cells = vec![0u32; n];
        let mut xs = vec![0.0f64; n];
        let mut ys = vec![0.0f64; n];
        for (i, p) in points.iter().enumerate() {
            let cell = input_cells[i];
            let slot = cursor[cell as usize] as usize;
            cursor[cell as usize] += 1;
            point_order[slot] = i as u32;
            point_cells[slot] = cell;
            xs[slot] = p.x();
            ys[slot] = p.y();
        }

        FlatGrid {
            spec: *spec,
            cell_offsets,
            point_order,
            point_cells,
            xs,
            ys,
        }
    }
}
