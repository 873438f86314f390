//! Closeness predicates, angular ranges and parameter ranges.
//!
//! The whole engine works in f64 with a small set of named tolerances; every
//! approximate comparison in the crate goes through this module so the
//! thresholds stay in one place.

use std::f64::consts::PI;

use crate::{Point, Vec2};

/// Geometric closeness of points and coordinate values.
pub const POINT_CLOSE: f64 = 1e-10;

/// Threshold for ordering comparisons (angles, ray coordinates).
pub const TANGENT_CLOSE: f64 = 1e-12;

/// Slop for bounding-rectangle overlap tests.
pub const BOUNDS_CLOSE: f64 = 1e-9;

/// Closeness in parameter space; intersection parameters within this of 0
/// or 1 count as endpoint intersections.
pub const PARAM_CLOSE: f64 = 1e-4;

/// Slop used when stitching overlap runs together.
pub const OVERLAP_CLOSE: f64 = 1e-2;

/// Unit-tangent coincidence threshold for the tangency test. Deliberately
/// looser than `POINT_CLOSE`; the two are distinct thresholds, not typos of
/// one another.
pub const TANGENT_POINT_CLOSE: f64 = 1e-7;

const TWO_PI: f64 = 2.0 * PI;

/// Are two coordinate values within `threshold` of each other?
#[inline]
pub fn values_close_with_options(value1: f64, value2: f64, threshold: f64) -> bool {
    let delta = value1 - value2;
    delta <= threshold && delta >= -threshold
}

/// Are two coordinate values within `POINT_CLOSE` of each other?
#[inline]
pub fn values_close(value1: f64, value2: f64) -> bool {
    values_close_with_options(value1, value2, POINT_CLOSE)
}

/// Are two points within `threshold` of each other in both coordinates?
#[inline]
pub fn points_close_with_options(point1: Point, point2: Point, threshold: f64) -> bool {
    values_close_with_options(point1.x, point2.x, threshold)
        && values_close_with_options(point1.y, point2.y, threshold)
}

/// Are two points within `POINT_CLOSE` of each other in both coordinates?
#[inline]
pub fn points_close(point1: Point, point2: Point) -> bool {
    points_close_with_options(point1, point2, POINT_CLOSE)
}

fn value_greater_than_with_options(value: f64, minimum: f64, threshold: f64) -> bool {
    if values_close_with_options(value, minimum, threshold) {
        return false;
    }
    value > minimum
}

/// `value > minimum`, treating `TANGENT_CLOSE`-equal values as equal.
#[inline]
pub fn value_greater_than(value: f64, minimum: f64) -> bool {
    value_greater_than_with_options(value, minimum, TANGENT_CLOSE)
}

/// `value < maximum`, treating `TANGENT_CLOSE`-equal values as equal.
#[inline]
pub fn value_less_than(value: f64, maximum: f64) -> bool {
    if values_close_with_options(value, maximum, TANGENT_CLOSE) {
        return false;
    }
    value < maximum
}

/// `value >= minimum` under `TANGENT_CLOSE`.
#[inline]
pub fn value_greater_than_equal(value: f64, minimum: f64) -> bool {
    if values_close_with_options(value, minimum, TANGENT_CLOSE) {
        return true;
    }
    value >= minimum
}

fn value_less_than_equal_with_options(value: f64, maximum: f64, threshold: f64) -> bool {
    if values_close_with_options(value, maximum, threshold) {
        return true;
    }
    value <= maximum
}

/// `value <= maximum` under `TANGENT_CLOSE`.
#[inline]
pub fn value_less_than_equal(value: f64, maximum: f64) -> bool {
    value_less_than_equal_with_options(value, maximum, TANGENT_CLOSE)
}

/// Normalize an angle into `[0, 2π)`.
pub fn normalize_angle(mut value: f64) -> f64 {
    while value < 0.0 {
        value += TWO_PI;
    }
    while value >= TWO_PI {
        value -= TWO_PI;
    }
    value
}

/// Polar angle of a vector, normalized to `[0, 2π)`.
pub fn polar_angle(v: Vec2) -> f64 {
    normalize_angle(v.y.atan2(v.x))
}

/// An arc of polar angles, possibly wrapping around zero.
#[derive(Clone, Copy, Debug)]
pub struct AngleRange {
    /// The start angle of the arc.
    pub minimum: f64,
    /// The end angle of the arc.
    pub maximum: f64,
}

impl AngleRange {
    /// A new angular range.
    #[inline]
    pub fn new(minimum: f64, maximum: f64) -> AngleRange {
        AngleRange { minimum, maximum }
    }

    /// Does `angle` fall strictly inside the arc from `minimum` to
    /// `maximum` (going anticlockwise, wrapping through zero when
    /// `minimum > maximum`)?
    pub fn contains(&self, angle: f64) -> bool {
        if self.minimum <= self.maximum {
            return value_greater_than(angle, self.minimum) && value_less_than(angle, self.maximum);
        }

        // The range wraps around 0. See if the angle falls in the first half
        if value_greater_than(angle, self.minimum) && angle <= TWO_PI {
            return true;
        }

        angle >= 0.0 && value_less_than(angle, self.maximum)
    }
}

/// Do the two pairs of tangents interleave when sorted by polar angle?
///
/// Each pair of angles divides the circle in two arcs; the edges cross
/// exactly when each arc of one pair holds one angle of the other pair.
pub fn tangents_cross(edge1_tangents: [Vec2; 2], edge2_tangents: [Vec2; 2]) -> bool {
    let edge1_angles = [polar_angle(edge1_tangents[0]), polar_angle(edge1_tangents[1])];
    let edge2_angles = [polar_angle(edge2_tangents[0]), polar_angle(edge2_tangents[1])];

    let range1 = AngleRange::new(edge1_angles[0], edge1_angles[1]);
    let mut range_count1 = 0;
    if range1.contains(edge2_angles[0]) {
        range_count1 += 1;
    }
    if range1.contains(edge2_angles[1]) {
        range_count1 += 1;
    }

    let range2 = AngleRange::new(edge1_angles[1], edge1_angles[0]);
    let mut range_count2 = 0;
    if range2.contains(edge2_angles[0]) {
        range_count2 += 1;
    }
    if range2.contains(edge2_angles[1]) {
        range_count2 += 1;
    }

    range_count1 == 1 && range_count2 == 1
}

/// Are any of the unit tangents of the first pair indistinguishable from
/// one of the second pair?
pub fn tangents_ambiguous(edge1_tangents: [Vec2; 2], edge2_tangents: [Vec2; 2]) -> bool {
    let normal1 = [edge1_tangents[0].normalize(), edge1_tangents[1].normalize()];
    let normal2 = [edge2_tangents[0].normalize(), edge2_tangents[1].normalize()];

    let close = |a: Vec2, b: Vec2| {
        points_close_with_options(a.to_point(), b.to_point(), TANGENT_CLOSE)
    };

    close(normal1[0], normal2[0])
        || close(normal1[0], normal2[1])
        || close(normal1[1], normal2[0])
        || close(normal1[1], normal2[1])
}

/// An interval of curve parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamRange {
    /// The lower end of the interval.
    pub minimum: f64,
    /// The upper end of the interval.
    pub maximum: f64,
}

impl ParamRange {
    /// The full parameter range of a curve.
    pub const FULL: ParamRange = ParamRange {
        minimum: 0.0,
        maximum: 1.0,
    };

    /// A new parameter range.
    #[inline]
    pub fn new(minimum: f64, maximum: f64) -> ParamRange {
        ParamRange { minimum, maximum }
    }

    /// The width of the interval.
    #[inline]
    pub fn size(&self) -> f64 {
        self.maximum - self.minimum
    }

    /// The midpoint of the interval.
    #[inline]
    pub fn average(&self) -> f64 {
        0.5 * (self.minimum + self.maximum)
    }

    /// Map a normalized value in `[0, 1]` into this interval.
    #[inline]
    pub fn scale_normalized(&self, value: f64) -> f64 {
        (self.maximum - self.minimum) * value + self.minimum
    }

    /// Have both ends of the interval agreed on the given number of decimal
    /// places?
    pub fn has_converged(&self, places: u32) -> bool {
        let factor = 10.0f64.powi(places as i32);
        (self.minimum * factor) as i64 == (self.maximum * factor) as i64
    }

    /// The smallest interval containing both intervals.
    #[inline]
    pub fn union(&self, other: ParamRange) -> ParamRange {
        ParamRange::new(
            self.minimum.min(other.minimum),
            self.maximum.max(other.maximum),
        )
    }
}

/// Loose bounding-rect overlap test: rectangles that merely touch within
/// `BOUNDS_CLOSE` still count as overlapping.
pub fn rects_might_overlap(bounds1: crate::Rect, bounds2: crate::Rect) -> bool {
    let left = bounds1.x0.max(bounds2.x0);
    let right = bounds1.x1.min(bounds2.x1);
    if value_greater_than_with_options(left, right, BOUNDS_CLOSE) {
        return false; // no horizontal overlap
    }
    let top = bounds1.y0.max(bounds2.y0);
    let bottom = bounds1.y1.min(bounds2.y1);
    value_less_than_equal_with_options(top, bottom, BOUNDS_CLOSE)
}

/// Distance from a point to the infinite line through `line_start` and
/// `line_end`.
pub fn distance_point_to_line(point: Point, line_start: Point, line_end: Point) -> f64 {
    let line_length = line_start.distance(line_end);
    if line_length == 0.0 {
        return 0.0;
    }
    let u = (point - line_start).dot(line_end - line_start) / (line_length * line_length);
    let projection = line_start.lerp(line_end, u);
    point.distance(projection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closeness() {
        assert!(values_close(1.0, 1.0 + 1e-11));
        assert!(!values_close(1.0, 1.0 + 1e-9));
        assert!(points_close(Point::new(0., 0.), Point::new(1e-11, -1e-11)));
    }

    #[test]
    fn ordered_comparisons() {
        assert!(!value_greater_than(1.0, 1.0));
        assert!(value_greater_than(1.0 + 1e-9, 1.0));
        assert!(value_less_than_equal(1.0 + 1e-13, 1.0));
    }

    #[test]
    fn polar_angles() {
        assert!((polar_angle(Vec2::new(1., 0.)) - 0.0).abs() < 1e-12);
        assert!((polar_angle(Vec2::new(0., 1.)) - PI / 2.0).abs() < 1e-12);
        assert!((polar_angle(Vec2::new(-1., 0.)) - PI).abs() < 1e-12);
        assert!((polar_angle(Vec2::new(0., -1.)) - 3.0 * PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn angle_range_wraps() {
        let range = AngleRange::new(3.0 * PI / 2.0, PI / 2.0);
        assert!(range.contains(0.0));
        assert!(!range.contains(PI));
    }

    #[test]
    fn crossing_tangents_interleave() {
        // A plus sign: horizontal tangents vs vertical tangents.
        let horizontal = [Vec2::new(-1., 0.), Vec2::new(1., 0.)];
        let vertical = [Vec2::new(0., -1.), Vec2::new(0., 1.)];
        assert!(tangents_cross(horizontal, vertical));

        // A "T" touch: both of edge2's tangents on the same side.
        let same_side = [Vec2::new(0., 1.), Vec2::new(0.5, 1.)];
        assert!(!tangents_cross(horizontal, same_side));
    }

    #[test]
    fn range_convergence() {
        assert!(ParamRange::new(0.1234567, 0.1234569).has_converged(6));
        assert!(!ParamRange::new(0.123, 0.124).has_converged(6));
        assert_eq!(ParamRange::new(0.25, 0.75).average(), 0.5);
        assert_eq!(ParamRange::new(0.5, 1.0).scale_normalized(0.5), 0.75);
    }
}
