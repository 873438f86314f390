//! A rectangle.

use std::fmt;

use crate::Point;

/// A rectangle given by minimum and maximum coordinates.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// The minimum x coordinate (left edge).
    pub x0: f64,
    /// The minimum y coordinate.
    pub y0: f64,
    /// The maximum x coordinate (right edge).
    pub x1: f64,
    /// The maximum y coordinate.
    pub y1: f64,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Rect = Rect::new(0., 0., 0., 0.);

    /// A new rectangle from minimum and maximum coordinates.
    #[inline]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect { x0, y0, x1, y1 }
    }

    /// A new rectangle from an origin and a size.
    #[inline]
    pub fn from_origin_size(origin: impl Into<Point>, width: f64, height: f64) -> Rect {
        let origin = origin.into();
        Rect::new(origin.x, origin.y, origin.x + width, origin.y + height)
    }

    /// A new rectangle from two points, normalized so that `x0 <= x1` and
    /// `y0 <= y1`.
    #[inline]
    pub fn from_points(p0: impl Into<Point>, p1: impl Into<Point>) -> Rect {
        let p0 = p0.into();
        let p1 = p1.into();
        Rect::new(
            p0.x.min(p1.x),
            p0.y.min(p1.y),
            p0.x.max(p1.x),
            p0.y.max(p1.y),
        )
    }

    /// The width of the rectangle.
    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// The height of the rectangle.
    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// The origin (minimum corner) of the rectangle.
    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x0, self.y0)
    }

    /// The center point of the rectangle.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(0.5 * (self.x0 + self.x1), 0.5 * (self.y0 + self.y1))
    }

    /// Whether this rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// The smallest rectangle enclosing two rectangles.
    #[inline]
    pub fn union(&self, other: Rect) -> Rect {
        Rect::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }

    /// The smallest rectangle enclosing the rectangle and a point.
    #[inline]
    pub fn union_pt(&self, pt: Point) -> Rect {
        Rect::new(
            self.x0.min(pt.x),
            self.y0.min(pt.y),
            self.x1.max(pt.x),
            self.y1.max(pt.y),
        )
    }

    /// Whether the point lies within the rectangle.
    ///
    /// The minimum edges are inclusive, the maximum edges exclusive, so
    /// tiling rectangles partition the plane.
    #[inline]
    pub fn contains(&self, pt: Point) -> bool {
        self.x0 <= pt.x && pt.x < self.x1 && self.y0 <= pt.y && pt.y < self.y1
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Rect {{ origin: ({}, {}), size: ({}, {}) }}",
            self.x0,
            self.y0,
            self.width(),
            self.height()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_and_contains() {
        let a = Rect::new(0., 0., 10., 10.);
        let b = Rect::new(5., -5., 20., 5.);
        assert_eq!(a.union(b), Rect::new(0., -5., 20., 10.));
        assert!(a.contains(Point::new(0., 0.)));
        assert!(!a.contains(Point::new(10., 10.)));
    }

    #[test]
    fn from_points_normalizes() {
        let r = Rect::from_points((10., 0.), (0., 10.));
        assert_eq!(r, Rect::new(0., 0., 10., 10.));
    }
}
