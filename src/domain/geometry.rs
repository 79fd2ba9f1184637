//! Geometric types for the ruler rectangle and the page it lives on

use serde::{Deserialize, Serialize};

/// Page-space rectangle described by its four edges
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Create a new rectangle from coordinates
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle spanning two arbitrary points, whichever way round they are
    pub fn from_points(a: Point, b: Point) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            right: a.x.max(b.x),
            bottom: a.y.max(b.y),
        }
    }

    /// Swap edges so that `left <= right` and `top <= bottom`
    pub fn normalized(self) -> Self {
        Self::from_points(
            Point::new(self.left, self.top),
            Point::new(self.right, self.bottom),
        )
    }

    /// Get the width of the rectangle
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Get the height of the rectangle
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// A ruler with no area has not been drawn yet
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Check if this rectangle contains a point
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Clamp every edge into the page, keeping the edges ordered
    pub fn clamp_to(self, page: PageBounds) -> Rect {
        let rect = self.normalized();
        let right = rect.right.clamp(0, page.width);
        let bottom = rect.bottom.clamp(0, page.height);
        Rect {
            left: rect.left.clamp(0, right),
            top: rect.top.clamp(0, bottom),
            right,
            bottom,
        }
    }

    /// Whether the rect satisfies the page invariants
    pub fn fits(&self, page: PageBounds) -> bool {
        0 <= self.left
            && self.left <= self.right
            && self.right <= page.width
            && 0 <= self.top
            && self.top <= self.bottom
            && self.bottom <= page.height
    }
}

/// Pointer position in page coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width and height of a guide or container
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Largest right/bottom values the ruler may take
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBounds {
    pub width: i32,
    pub height: i32,
}

impl PageBounds {
    /// Negative sizes from a confused host collapse to an empty page
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Snapshot published whenever the ruler or the page changes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    pub rect: Rect,
    pub page: PageBounds,
}
