/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct, the uniform-grid variant of
 * the neighbor index. It divides the simulation area into square cells so a
 * query only visits the cells its rectangle covers instead of every entry.
 *
 * Optimized for performance by:
 * - Using a flat cell vector indexed by row * columns + column
 * - Clamping cell coordinates instead of bounds-checking, so entries and
 *   queries outside the area fall into the edge cells and are still found
 *
 * Degrades when many entities crowd into one cell, since that cell is
 * scanned in full.
 */

use std::hash::Hash;

use crate::bounds::Bounds;
use crate::spatial_index::{dedup_in_place, SpatialIndex};

#[derive(Debug, Clone)]
pub struct SpatialGrid<T> {
    pub cell_size: f32,
    area: Bounds,
    columns: usize,
    rows: usize,
    grid: Vec<Vec<T>>,
    stored: usize,
}

impl<T: Copy + Eq + Hash> SpatialGrid<T> {
    /// `cell_size` must be positive; the area is rounded up to whole cells.
    /// Callers building from configuration go through
    /// `NeighborIndexKind::build`, which caps the cell count first.
    pub fn new(area: Bounds, cell_size: f32) -> Self {
        let (columns, rows) = grid_dimensions(&area, cell_size);
        let mut grid = Vec::with_capacity(columns * rows);

        // Initialize an empty grid
        for _ in 0..(columns * rows) {
            grid.push(Vec::new());
        }

        Self {
            cell_size,
            area,
            columns,
            rows,
            grid,
            stored: 0,
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    // Convert world coordinates to clamped (column, row)
    #[inline]
    fn cell_coords(&self, x: f32, y: f32) -> (usize, usize) {
        let column = ((x - self.area.min.x) / self.cell_size)
            .floor()
            .clamp(0.0, self.columns as f32 - 1.0) as usize;
        let row = ((y - self.area.min.y) / self.cell_size)
            .floor()
            .clamp(0.0, self.rows as f32 - 1.0) as usize;
        (column, row)
    }

    /// Inclusive column and row ranges covered by `bounds`.
    #[inline]
    fn cell_span(&self, bounds: &Bounds) -> ((usize, usize), (usize, usize)) {
        let (min_column, min_row) = self.cell_coords(bounds.min.x, bounds.min.y);
        let (max_column, max_row) = self.cell_coords(bounds.max.x, bounds.max.y);
        ((min_column, max_column), (min_row, max_row))
    }

    // Clear the grid
    pub fn clear(&mut self) {
        for cell in &mut self.grid {
            cell.clear();
        }
        self.stored = 0;
    }

    /// Store `item` in every cell `bounds` overlaps.
    pub fn insert(&mut self, bounds: Bounds, item: T) {
        let ((min_column, max_column), (min_row, max_row)) = self.cell_span(&bounds);

        for row in min_row..=max_row {
            let row_index = row * self.columns;
            for column in min_column..=max_column {
                self.grid[row_index + column].push(item);
                self.stored += 1;
            }
        }
    }

    /// Union of the cells `query` overlaps, deduplicated.
    pub fn retrieve(&self, query: &Bounds) -> Vec<T> {
        let ((min_column, max_column), (min_row, max_row)) = self.cell_span(query);
        let mut result = Vec::new();

        for row in min_row..=max_row {
            let row_index = row * self.columns;
            for column in min_column..=max_column {
                result.extend_from_slice(&self.grid[row_index + column]);
            }
        }

        dedup_in_place(&mut result);
        result
    }

    pub fn len(&self) -> usize {
        self.stored
    }

    pub fn is_empty(&self) -> bool {
        self.stored == 0
    }
}

fn grid_dimensions(area: &Bounds, cell_size: f32) -> (usize, usize) {
    let columns = ((area.width() / cell_size).ceil() as usize).max(1);
    let rows = ((area.height() / cell_size).ceil() as usize).max(1);
    (columns, rows)
}

/// Cells a grid over `area` would allocate, or `None` if the count is not
/// representable.
pub fn cell_count(area: &Bounds, cell_size: f32) -> Option<usize> {
    let columns = (area.width() / cell_size).ceil();
    let rows = (area.height() / cell_size).ceil();
    if !(columns.is_finite() && rows.is_finite()) {
        return None;
    }
    let (columns, rows) = grid_dimensions(area, cell_size);
    columns.checked_mul(rows)
}

impl<T: Copy + Eq + Hash> SpatialIndex<T> for SpatialGrid<T> {
    fn clear(&mut self) {
        SpatialGrid::clear(self);
    }

    fn insert(&mut self, bounds: Bounds, item: T) {
        SpatialGrid::insert(self, bounds, item);
    }

    fn retrieve(&self, query: &Bounds) -> Vec<T> {
        SpatialGrid::retrieve(self, query)
    }

    fn len(&self) -> usize {
        SpatialGrid::len(self)
    }

    fn name(&self) -> &'static str {
        "grid"
    }
}
