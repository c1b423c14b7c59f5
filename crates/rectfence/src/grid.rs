//! Grid discretization of the point set.
//!
//! A grid partitions the plane into `split × split` square cells of side
//! `cell_size` and aggregates the points binned into each cell. Only
//! non-empty cells are stored; the candidate regions built on top of the grid
//! may still occupy empty in-bounds cells (they contribute perimeter but no
//! weight or coverage).

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::point::Point;

/// Grid cell coordinates `(i, j)`.
pub type Cell = (i32, i32);

/// 4-neighborhood offsets.
pub const NEIGHBORS_4: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Returns the four edge-adjacent neighbors of a cell.
#[inline]
pub fn neighbors4(cell: Cell) -> [Cell; 4] {
    let (i, j) = cell;
    [(i + 1, j), (i - 1, j), (i, j + 1), (i, j - 1)]
}

/// Domain headroom over the maximum observed coordinate. Must exceed the
/// deepest jitter shrink the driver can draw (at most 0.2%).
const EXTENT_HEADROOM: f64 = 1.005;

/// Aggregated contents of one occupied cell.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellStats {
    /// Sum of weights of the points binned into the cell.
    pub weight: f64,
    /// Number of points binned into the cell.
    pub count: usize,
}

/// A jittered square grid with sparse per-cell aggregates.
#[derive(Debug, Clone)]
pub struct Grid {
    split: u32,
    cell_size: f64,
    cells: HashMap<Cell, CellStats>,
}

impl Grid {
    /// Bins `points` into a `split × split` grid.
    ///
    /// The cell size is `(max_coord / split) · jitter` where `max_coord` is
    /// the largest observed coordinate and `jitter ∈ (0, 1]` shrinks cells
    /// slightly to diversify bin assignments across trials. Points on the
    /// top/right domain boundary are clamped into the last cell. An instance
    /// whose maximum coordinate is zero falls back to a unit extent so that
    /// binning stays defined.
    pub fn build(points: &[Point], split: u32, jitter: f64) -> Self {
        debug_assert!(split >= 1);
        debug_assert!(jitter > 0.0 && jitter <= 1.0);

        let max_coord = points
            .iter()
            .map(|p| p.x.max(p.y))
            .fold(0.0_f64, f64::max);
        // The headroom keeps the jittered domain covering the extreme
        // points: without it a point at the maximum coordinate bins into the
        // last cell while lying outside that cell's world square, and the
        // emitted polygon would not contain it.
        let extent = if max_coord > 0.0 { max_coord } else { 1.0 } * EXTENT_HEADROOM;
        let cell_size = extent / split as f64 * jitter;

        let hi = split as i64 - 1;
        let mut cells: HashMap<Cell, CellStats> = HashMap::new();
        for p in points {
            let i = ((p.x / cell_size) as i64).clamp(0, hi) as i32;
            let j = ((p.y / cell_size) as i64).clamp(0, hi) as i32;
            let stats = cells.entry((i, j)).or_default();
            stats.weight += p.w;
            stats.count += 1;
        }

        Self {
            split,
            cell_size,
            cells,
        }
    }

    /// Number of cells per axis.
    pub fn split(&self) -> u32 {
        self.split
    }

    /// Side length of one cell in world coordinates.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Whether `cell` lies inside the `split × split` domain.
    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        let hi = self.split as i32;
        cell.0 >= 0 && cell.0 < hi && cell.1 >= 0 && cell.1 < hi
    }

    /// Aggregates for an occupied cell, `None` when the cell holds no points.
    pub fn get(&self, cell: Cell) -> Option<&CellStats> {
        self.cells.get(&cell)
    }

    /// Weight sum of `cell` (zero for empty cells).
    #[inline]
    pub fn weight(&self, cell: Cell) -> f64 {
        self.cells.get(&cell).map_or(0.0, |s| s.weight)
    }

    /// Point count of `cell` (zero for empty cells).
    #[inline]
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.get(&cell).map_or(0, |s| s.count)
    }

    /// Iterates over the occupied cells.
    pub fn occupied(&self) -> impl Iterator<Item = (Cell, &CellStats)> {
        self.cells.iter().map(|(&c, s)| (c, s))
    }

    /// Number of occupied cells.
    pub fn occupied_len(&self) -> usize {
        self.cells.len()
    }

    /// True when no point was binned (empty instance).
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Total number of in-bounds cells, occupied or not.
    pub fn domain_len(&self) -> usize {
        (self.split as usize).pow(2)
    }
}
