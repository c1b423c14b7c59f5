//! Weighted input points.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A weighted point in the plane.
///
/// Coordinates are non-negative; the weight may be negative, zero, or
/// positive. Negative weights make enclosure attractive, positive weights
/// make it costly.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Weight added to the cost when the point is enclosed.
    pub w: f64,
}

impl Point {
    /// Creates a new weighted point.
    pub fn new(x: f64, y: f64, w: f64) -> Self {
        Self { x, y, w }
    }
}
