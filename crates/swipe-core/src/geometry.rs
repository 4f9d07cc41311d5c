#![forbid(unsafe_code)]

//! Geometric primitives for swipe tracking.

use serde::{Deserialize, Serialize};

use crate::direction::SwipeAxis;

/// Pointer location relative to the item's resting top-left corner.
///
/// Moves and releases are expressed in the same frame as the touch-down
/// point, so the difference between two points is the drag displacement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Displacement `(dx, dy)` from `origin` to `self`.
    #[inline]
    #[must_use]
    pub fn delta_from(self, origin: Self) -> (f32, f32) {
        (self.x - origin.x, self.y - origin.y)
    }

    /// Whether both coordinates are finite.
    #[inline]
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f32, f32)> for TouchPoint {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Size of an item's visual representation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemExtent {
    pub width: f32,
    pub height: f32,
}

impl ItemExtent {
    /// Create a new extent.
    #[inline]
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Length of the item along `axis`.
    #[inline]
    #[must_use]
    pub const fn along(self, axis: SwipeAxis) -> f32 {
        match axis {
            SwipeAxis::Horizontal => self.width,
            SwipeAxis::Vertical => self.height,
        }
    }

    /// Whether the extent is non-degenerate.
    #[inline]
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Check if a point lies inside the item (right and bottom edges exclusive).
    #[inline]
    #[must_use]
    pub fn contains(self, point: TouchPoint) -> bool {
        point.x >= 0.0 && point.y >= 0.0 && point.x < self.width && point.y < self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let extent = ItemExtent::new(100.0, 40.0);
        assert!(extent.contains(TouchPoint::new(0.0, 0.0)));
        assert!(extent.contains(TouchPoint::new(99.5, 39.5)));
        assert!(!extent.contains(TouchPoint::new(100.0, 10.0)));
        assert!(!extent.contains(TouchPoint::new(10.0, 40.0)));
        assert!(!extent.contains(TouchPoint::new(-0.1, 10.0)));
        assert!(!extent.contains(TouchPoint::new(f32::NAN, 10.0)));
    }

    #[test]
    fn along_picks_dimension() {
        let extent = ItemExtent::new(320.0, 48.0);
        assert_eq!(extent.along(SwipeAxis::Horizontal), 320.0);
        assert_eq!(extent.along(SwipeAxis::Vertical), 48.0);
    }

    #[test]
    fn degenerate_extent_is_invalid() {
        assert!(ItemExtent::new(1.0, 1.0).is_valid());
        assert!(!ItemExtent::new(0.0, 10.0).is_valid());
        assert!(!ItemExtent::new(10.0, f32::INFINITY).is_valid());
        assert!(!ItemExtent::default().is_valid());
    }

    #[test]
    fn delta_from_subtracts() {
        let a = TouchPoint::new(10.0, 5.0);
        let b = TouchPoint::from((4.0, 8.0));
        assert_eq!(a.delta_from(b), (6.0, -3.0));
    }
}
