use crate::dom::BoundingBox;
use serde::{Deserialize, Serialize};

/// A viewport coordinate, in CSS pixels
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Normalized selection rectangle: `right >= left` and `bottom >= top` always hold
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SelectionRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl SelectionRect {
    /// Build the rectangle spanned by two corners given in any order
    pub fn from_points(start: Point, end: Point) -> Self {
        Self {
            left: start.x.min(end.x),
            top: start.y.min(end.y),
            right: start.x.max(end.x),
            bottom: start.y.max(end.y),
        }
    }

    /// Build from explicit edges, swapping them if given out of order
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::from_points(Point::new(left, top), Point::new(right, bottom))
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Both edges are at least `min` pixels long
    pub fn meets_minimum(&self, min: f64) -> bool {
        self.width() >= min && self.height() >= min
    }

    /// Axis-aligned overlap test; boxes that only touch an edge still overlap
    pub fn overlaps(&self, b: &BoundingBox) -> bool {
        !(b.right() < self.left || b.left() > self.right || b.bottom() < self.top || b.top() > self.bottom)
    }
}
