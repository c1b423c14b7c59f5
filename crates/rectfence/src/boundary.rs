//! Clockwise boundary extraction for a final cell set.
//!
//! Exposed unit edges are enumerated in exact integer cell-corner
//! coordinates, oriented clockwise around their owning cell, stitched into a
//! single closed polyline through a start-vertex map, and collapsed so that
//! every emitted edge spans a full straight run. World coordinates appear
//! only at emission, multiplying corner indices by the cell size.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::region::Region;

/// Tolerance for point-on-boundary classification.
const EDGE_EPS: f64 = 1e-9;

/// One axis-aligned polygon edge in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Edge {
    /// Length of the axis-aligned edge.
    pub fn length(&self) -> f64 {
        (self.x2 - self.x1).abs() + (self.y2 - self.y1).abs()
    }

    /// True for edges with equal y endpoints.
    pub fn is_horizontal(&self) -> bool {
        self.y1 == self.y2
    }
}

type Corner = (i64, i64);

/// Extracts the clockwise outer boundary of `region`.
///
/// The region must be non-empty, connected, and hole-free; under those
/// invariants every boundary vertex has exactly one outgoing exposed edge and
/// the walk closes into a single loop. Consecutive collinear edges are
/// collapsed, so the emitted edge count equals the polygon's vertex count and
/// every vertex is a right-angle corner.
pub fn extract_boundary(region: &Region, cell_size: f64) -> Vec<Edge> {
    debug_assert!(!region.is_empty());

    // Directed exposed edges, clockwise around the owning cell:
    // top left->right, right top->bottom, bottom right->left, left bottom->top.
    let mut next: HashMap<Corner, Corner> = HashMap::with_capacity(region.len() * 2 + 2);
    for (ci, cj) in region.iter() {
        let (i, j) = (ci as i64, cj as i64);
        if !region.contains((ci, cj + 1)) {
            next.insert((i, j + 1), (i + 1, j + 1));
        }
        if !region.contains((ci + 1, cj)) {
            next.insert((i + 1, j + 1), (i + 1, j));
        }
        if !region.contains((ci, cj - 1)) {
            next.insert((i + 1, j), (i, j));
        }
        if !region.contains((ci - 1, cj)) {
            next.insert((i, j), (i, j + 1));
        }
    }

    // The lexicographically smallest vertex is a convex corner, so the
    // collapse below never has to merge across the loop seam.
    let start = *next.keys().min().expect("non-empty region has a boundary");
    let mut vertices: Vec<Corner> = Vec::with_capacity(next.len());
    let mut cursor = start;
    for _ in 0..next.len() {
        vertices.push(cursor);
        cursor = next[&cursor];
        if cursor == start {
            break;
        }
    }
    debug_assert_eq!(vertices.len(), next.len());

    // Keep only corners: vertices whose incoming and outgoing directions
    // differ.
    let n = vertices.len();
    let mut corners: Vec<Corner> = Vec::new();
    for idx in 0..n {
        let prev = vertices[(idx + n - 1) % n];
        let cur = vertices[idx];
        let after = vertices[(idx + 1) % n];
        let incoming = ((cur.0 - prev.0).signum(), (cur.1 - prev.1).signum());
        let outgoing = ((after.0 - cur.0).signum(), (after.1 - cur.1).signum());
        if incoming != outgoing {
            corners.push(cur);
        }
    }

    let m = corners.len();
    (0..m)
        .map(|idx| {
            let a = corners[idx];
            let b = corners[(idx + 1) % m];
            Edge {
                x1: a.0 as f64 * cell_size,
                y1: a.1 as f64 * cell_size,
                x2: b.0 as f64 * cell_size,
                y2: b.1 as f64 * cell_size,
            }
        })
        .collect()
}

/// Sum of edge lengths.
pub fn perimeter_length(edges: &[Edge]) -> f64 {
    edges.iter().map(Edge::length).sum()
}

/// True when `(x, y)` lies inside the polygon or on its boundary.
///
/// On-boundary points are classified first with an exact segment test; the
/// interior test is an even-odd ray cast over the vertical edges.
pub fn contains_point(edges: &[Edge], x: f64, y: f64) -> bool {
    for e in edges {
        if e.is_horizontal() {
            let (lo, hi) = ordered(e.x1, e.x2);
            if (y - e.y1).abs() <= EDGE_EPS && x >= lo - EDGE_EPS && x <= hi + EDGE_EPS {
                return true;
            }
        } else {
            let (lo, hi) = ordered(e.y1, e.y2);
            if (x - e.x1).abs() <= EDGE_EPS && y >= lo - EDGE_EPS && y <= hi + EDGE_EPS {
                return true;
            }
        }
    }

    // Cast a ray towards +x; half-open spans count each crossing once.
    let mut inside = false;
    for e in edges {
        if e.is_horizontal() {
            continue;
        }
        let (lo, hi) = ordered(e.y1, e.y2);
        if e.x1 > x && y >= lo && y < hi {
            inside = !inside;
        }
    }
    inside
}

#[inline]
fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
