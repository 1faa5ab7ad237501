//! Pixel-space geometry of matrix cells and the hit-tests built on it.

use serde::Serialize;

/// Axis selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// The drawable plot area inside the canvas, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ChartArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ChartArea {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// How a pointer position is matched against cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitMode {
    /// Pointer must be inside the cell rectangle.
    #[default]
    Point,
    /// Only the x coordinate matters (whole column).
    XAxis,
    /// Only the y coordinate matters (whole row).
    YAxis,
}

/// Centre position and size of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CellGeometry {
    /// Top-left corner, as Canvas 2D rect calls want it.
    pub fn origin(&self) -> (f64, f64) {
        (self.x - self.width / 2.0, self.y - self.height / 2.0)
    }

    /// Inclusive bounding-box containment.
    pub fn in_range(&self, px: f64, py: f64) -> bool {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        px >= self.x - half_w
            && px <= self.x + half_w
            && py >= self.y - half_h
            && py <= self.y + half_h
    }

    /// Column test: y is pinned to the cell's own centre.
    pub fn in_x_range(&self, px: f64) -> bool {
        self.in_range(px, self.y)
    }

    /// Row test: x is pinned to the cell's own centre.
    pub fn in_y_range(&self, py: f64) -> bool {
        self.in_range(self.x, py)
    }

    pub fn hit(&self, px: f64, py: f64, mode: HitMode) -> bool {
        match mode {
            HitMode::Point => self.in_range(px, py),
            HitMode::XAxis => self.in_x_range(px),
            HitMode::YAxis => self.in_y_range(py),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    const CELL: CellGeometry = CellGeometry {
        x: 100.0,
        y: 50.0,
        width: 40.0,
        height: 20.0,
    };

    #[test]
    fn test_centre_and_edges_inside() {
        assert!(CELL.in_range(100.0, 50.0));
        assert!(CELL.in_range(80.0, 40.0));
        assert!(CELL.in_range(120.0, 60.0));
    }

    #[test]
    fn test_just_outside() {
        let eps = 1e-6;
        assert!(!CELL.in_range(100.0 + 20.0 + eps, 50.0));
        assert!(!CELL.in_range(100.0 - 20.0 - eps, 50.0));
        assert!(!CELL.in_range(100.0, 50.0 + 10.0 + eps));
    }

    #[test]
    fn test_axis_ranges_ignore_orthogonal() {
        assert!(CELL.in_x_range(110.0));
        assert!(!CELL.in_x_range(130.0));
        assert!(CELL.in_y_range(45.0));
        assert!(!CELL.in_y_range(70.0));
        assert!(CELL.hit(110.0, 999.0, HitMode::XAxis));
        assert!(CELL.hit(999.0, 45.0, HitMode::YAxis));
        assert!(!CELL.hit(110.0, 999.0, HitMode::Point));
    }

    #[test]
    fn test_origin() {
        assert_eq!(CELL.origin(), (80.0, 40.0));
    }
}
