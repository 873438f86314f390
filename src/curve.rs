//! Cubic Bézier segments.
//!
//! `Curve` is one cubic 2D Bézier segment. Straight lines are represented as
//! degenerate cubics with the control points placed at the third points of
//! the segment, flagged `is_line` so they can be emitted as lines again.

use std::cell::Cell;
use std::fmt;

use arrayvec::ArrayVec;

use crate::common::{solve_quadratic, GAUSS_LEGENDRE_COEFFS_9};
use crate::geometry::{points_close_with_options, ParamRange};
use crate::{Point, Rect, Vec2};

/// Everything closer together than this collapses to a point curve.
const POINT_CURVE_CLOSE: f64 = 1e-5;

/// Arc length accuracy for the cached length.
const LENGTH_ACCURACY: f64 = 1e-9;

/// The parameter and distance of the closest point on a curve.
#[derive(Clone, Copy, Debug)]
pub struct CurveLocation {
    /// Parameter of the closest point.
    pub parameter: f64,
    /// Distance from the query point to the curve at `parameter`.
    pub distance: f64,
}

/// A single cubic Bézier segment.
#[derive(Clone)]
pub struct Curve {
    p0: Point,
    c1: Point,
    c2: Point,
    p3: Point,
    is_line: bool,
    // Lazily computed, a curve is immutable once built.
    length: Cell<Option<f64>>,
    bounds: Cell<Option<Rect>>,
    control_bounds: Cell<Option<Rect>>,
    is_point: Cell<Option<bool>>,
}

impl Curve {
    /// Create a new cubic Bézier segment.
    pub fn new(
        p0: impl Into<Point>,
        c1: impl Into<Point>,
        c2: impl Into<Point>,
        p3: impl Into<Point>,
    ) -> Curve {
        Curve {
            p0: p0.into(),
            c1: c1.into(),
            c2: c2.into(),
            p3: p3.into(),
            is_line: false,
            length: Cell::new(None),
            bounds: Cell::new(None),
            control_bounds: Cell::new(None),
            is_point: Cell::new(None),
        }
    }

    /// Create a straight-line segment as a degenerate cubic, with the
    /// control points placed at the third points of the line.
    pub fn line(start: impl Into<Point>, end: impl Into<Point>) -> Curve {
        let start = start.into();
        let end = end.into();
        let tangent = end - start;
        let mut curve = Curve::new(
            start,
            start + tangent * (1.0 / 3.0),
            start + tangent * (2.0 / 3.0),
            end,
        );
        curve.is_line = true;
        curve
    }

    /// The start point.
    #[inline]
    pub fn start(&self) -> Point {
        self.p0
    }

    /// The first control point.
    #[inline]
    pub fn control1(&self) -> Point {
        self.c1
    }

    /// The second control point.
    #[inline]
    pub fn control2(&self) -> Point {
        self.c2
    }

    /// The end point.
    #[inline]
    pub fn end(&self) -> Point {
        self.p3
    }

    /// Did this segment come from a straight line?
    #[inline]
    pub fn is_line(&self) -> bool {
        self.is_line
    }

    /// Does this segment have no extent?
    pub fn is_point(&self) -> bool {
        if let Some(value) = self.is_point.get() {
            return value;
        }
        let value = points_close_with_options(self.p0, self.p3, POINT_CURVE_CLOSE)
            && points_close_with_options(self.p0, self.c1, POINT_CURVE_CLOSE)
            && points_close_with_options(self.p0, self.c2, POINT_CURVE_CLOSE);
        self.is_point.set(Some(value));
        value
    }

    /// Evaluate the curve at parameter `t`.
    pub fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let v = self.p0.to_vec2() * (mt * mt * mt)
            + (self.c1.to_vec2() * (mt * mt * 3.0)
                + (self.c2.to_vec2() * (mt * 3.0) + self.p3.to_vec2() * t) * t)
                * t;
        v.to_point()
    }

    /// Evaluate the derivative at parameter `t`.
    pub fn derivative_at(&self, t: f64) -> Vec2 {
        let d0 = (self.c1 - self.p0) * 3.0;
        let d1 = (self.c2 - self.c1) * 3.0;
        let d2 = (self.p3 - self.c2) * 3.0;
        let mt = 1.0 - t;
        d0 * (mt * mt) + d1 * (2.0 * mt * t) + d2 * (t * t)
    }

    /// Split the curve at `t`, returning the point there and the two halves.
    pub fn point_at(&self, t: f64) -> (Point, Curve, Curve) {
        let q0 = self.p0.lerp(self.c1, t);
        let q1 = self.c1.lerp(self.c2, t);
        let q2 = self.c2.lerp(self.p3, t);
        let r0 = q0.lerp(q1, t);
        let r1 = q1.lerp(q2, t);
        let s = r0.lerp(r1, t);
        let mut left = Curve::new(self.p0, q0, r0, s);
        let mut right = Curve::new(s, r1, q2, self.p3);
        left.is_line = self.is_line;
        right.is_line = self.is_line;
        (s, left, right)
    }

    /// The sub-segment over the given parameter range. A subcurve of a line
    /// is still a line.
    pub fn subcurve(&self, range: ParamRange) -> Curve {
        if range.minimum == 0.0 && range.maximum == 1.0 {
            return self.clone();
        }

        // Start with the portion from the minimum to the end...
        let upper = if range.minimum == 1.0 {
            // Floating-point math can't get us closer than this.
            let (_, _, right) = self.point_at(1.0 - 1e-12);
            right
        } else {
            self.point_at(range.minimum).2
        };

        // ...then cut it down to the (remapped) maximum.
        let adjusted_maximum = (range.maximum - range.minimum) / (1.0 - range.minimum);
        upper.point_at(adjusted_maximum).1
    }

    /// Split the curve into the pieces before, inside, and after the range.
    pub fn split_subcurves(&self, range: ParamRange) -> (Curve, Curve, Curve) {
        (
            self.subcurve(ParamRange::new(0.0, range.minimum)),
            self.subcurve(range),
            self.subcurve(ParamRange::new(range.maximum, 1.0)),
        )
    }

    /// The curve traversed in the opposite direction.
    pub fn reversed(&self) -> Curve {
        let mut curve = Curve::new(self.p3, self.c2, self.c1, self.p0);
        curve.is_line = self.is_line;
        curve
    }

    /// Arc length of the segment.
    ///
    /// Adaptive subdivision with Legendre–Gauss quadrature in the base case.
    pub fn length(&self) -> f64 {
        if let Some(length) = self.length.get() {
            return length;
        }
        let length = self.arclen_rec(LENGTH_ACCURACY, 0);
        self.length.set(Some(length));
        length
    }

    fn gauss_arclen(&self) -> f64 {
        GAUSS_LEGENDRE_COEFFS_9
            .iter()
            .map(|(wi, xi)| wi * self.derivative_at(0.5 * (xi + 1.0)).hypot())
            .sum::<f64>()
            * 0.5
    }

    fn arclen_rec(&self, accuracy: f64, depth: usize) -> f64 {
        // Error estimate from the deviation of the control polygon from the
        // chord, in the style of adaptive Gauss–Legendre arc length.
        let chord = (self.p3 - self.p0).hypot();
        let polygon = (self.c1 - self.p0).hypot()
            + (self.c2 - self.c1).hypot()
            + (self.p3 - self.c2).hypot();
        if depth >= 16 || polygon - chord < accuracy {
            return self.gauss_arclen();
        }
        let (_, left, right) = self.point_at(0.5);
        left.arclen_rec(accuracy * 0.5, depth + 1) + right.arclen_rec(accuracy * 0.5, depth + 1)
    }

    /// Parameter values of the axis-aligned extrema, in `(0, 1)`.
    pub fn extrema(&self) -> ArrayVec<f64, 4> {
        fn one_coord(result: &mut ArrayVec<f64, 4>, d0: f64, d1: f64, d2: f64) {
            let a = d0 - 2.0 * d1 + d2;
            let b = 2.0 * (d1 - d0);
            let c = d0;
            for &t in &solve_quadratic(c, b, a) {
                if t > 0.0 && t < 1.0 {
                    result.push(t);
                }
            }
        }
        let mut result = ArrayVec::new();
        let d0 = self.c1 - self.p0;
        let d1 = self.c2 - self.c1;
        let d2 = self.p3 - self.c2;
        one_coord(&mut result, d0.x, d1.x, d2.x);
        one_coord(&mut result, d0.y, d1.y, d2.y);
        result.sort_by(|a, b| a.partial_cmp(b).unwrap());
        result
    }

    /// The tight bounding rectangle, through the curve's extrema.
    pub fn bounds(&self) -> Rect {
        if let Some(bounds) = self.bounds.get() {
            return bounds;
        }
        let mut bounds = Rect::from_points(self.p0, self.p3);
        for t in self.extrema() {
            bounds = bounds.union_pt(self.point_at(t).0);
        }
        self.bounds.set(Some(bounds));
        bounds
    }

    /// The bounding rectangle of the control polygon. Cheaper than
    /// [`bounds`](Curve::bounds) and never smaller than it.
    pub fn control_bounds(&self) -> Rect {
        if let Some(bounds) = self.control_bounds.get() {
            return bounds;
        }
        let bounds = Rect::from_points(self.p0, self.p3)
            .union_pt(self.c1)
            .union_pt(self.c2);
        self.control_bounds.set(Some(bounds));
        bounds
    }

    /// One Newton step of projecting `point` onto the curve, starting from
    /// `parameter`.
    ///
    /// Solves f(t) = (Q(t) - P) · Q'(t) = 0 by
    /// t ← t - f(t) / f'(t), with f'(t) = Q'·Q' + (Q - P)·Q''.
    pub fn refine_parameter(&self, parameter: f64, point: Point) -> f64 {
        let q = self.point_at(parameter).0;
        let qp = self.derivative_at(parameter);
        let qpp = self.second_derivative_at(parameter);

        let numerator = (q - point).dot(qp);
        let denominator = qp.dot(qp) + (q - point).dot(qpp);
        if denominator == 0.0 {
            return parameter;
        }
        (parameter - numerator / denominator).clamp(0.0, 1.0)
    }

    // Q'' of a cubic: 6 ((p2 - 2 p1 + p0)(1 - t) + (p3 - 2 p2 + p1) t)
    fn second_derivative_at(&self, t: f64) -> Vec2 {
        let a = (self.c2 - self.c1) - (self.c1 - self.p0);
        let b = (self.p3 - self.c2) - (self.c2 - self.c1);
        (a * (1.0 - t) + b * t) * 6.0
    }

    /// The closest location on the curve to `point`: a coarse scan refined
    /// with a few Newton steps.
    pub fn closest_location(&self, point: Point) -> CurveLocation {
        let mut best_t = 0.0;
        let mut best_distance = f64::MAX;
        const SAMPLES: usize = 32;
        for i in 0..=SAMPLES {
            let t = i as f64 / SAMPLES as f64;
            let distance = self.point_at(t).0.distance(point);
            if distance < best_distance {
                best_distance = distance;
                best_t = t;
            }
        }
        for _ in 0..4 {
            best_t = self.refine_parameter(best_t, point);
        }
        CurveLocation {
            parameter: best_t,
            distance: self.point_at(best_t).0.distance(point),
        }
    }

    /// The point the given arc-length from the start of the curve.
    pub fn point_from_left_offset(&self, offset: f64) -> Point {
        let length = self.length();
        if length == 0.0 {
            return self.p0;
        }
        let time = (offset / length).clamp(0.0, 1.0);
        self.point_at(time).0
    }

    /// The point the given arc-length before the end of the curve.
    pub fn point_from_right_offset(&self, offset: f64) -> Point {
        let length = self.length();
        if length == 0.0 {
            return self.p3;
        }
        let time = (1.0 - offset / length).clamp(0.0, 1.0);
        self.point_at(time).0
    }

    /// The tangent at the given arc-length from the start, pointing along
    /// the direction of travel.
    pub fn tangent_from_left_offset(&self, offset: f64) -> Vec2 {
        if offset == 0.0 && !self.is_point() {
            return self.c1 - self.p0;
        }
        let length = self.length();
        if length == 0.0 {
            return self.c1 - self.p0;
        }
        let time = (offset / length).clamp(0.0, 1.0);
        let (_, _, right) = self.point_at(time);
        right.c1 - right.p0
    }

    /// The tangent at the given arc-length before the end, pointing back
    /// against the direction of travel.
    pub fn tangent_from_right_offset(&self, offset: f64) -> Vec2 {
        if offset == 0.0 && !self.is_point() {
            return self.c2 - self.p3;
        }
        let length = self.length();
        if length == 0.0 {
            return self.c2 - self.p3;
        }
        let time = (1.0 - offset / length).clamp(0.0, 1.0);
        let (_, left, _) = self.point_at(time);
        left.c2 - left.p3
    }
}

impl PartialEq for Curve {
    fn eq(&self, other: &Curve) -> bool {
        self.p0 == other.p0
            && self.c1 == other.c1
            && self.c2 == other.c2
            && self.p3 == other.p3
            && self.is_line == other.is_line
    }
}

impl fmt::Debug for Curve {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_line {
            write!(f, "Line({:?} -> {:?})", self.p0, self.p3)
        } else {
            write!(
                f,
                "Curve({:?}, {:?}, {:?}, {:?})",
                self.p0, self.c1, self.c2, self.p3
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::points_close;

    #[test]
    fn line_controls_on_thirds() {
        let line = Curve::line((0., 0.), (3., 3.));
        assert!(line.is_line());
        assert!(points_close(line.control1(), Point::new(1., 1.)));
        assert!(points_close(line.control2(), Point::new(2., 2.)));
    }

    #[test]
    fn split_and_rejoin() {
        let c = Curve::new((0., 0.), (0., 1.), (1., 1.), (1., 0.));
        let (pt, left, right) = c.point_at(0.25);
        assert_eq!(left.end(), pt);
        assert_eq!(right.start(), pt);
        // The halves trace the same points as the original.
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let on_left = left.point_at(t).0;
            let on_original = c.point_at(0.25 * t).0;
            assert!(on_left.distance(on_original) < 1e-12);
        }
    }

    #[test]
    fn subcurve_endpoints() {
        let c = Curve::new((0., 0.), (1., 2.), (3., 2.), (4., 0.));
        let sub = c.subcurve(ParamRange::new(0.25, 0.75));
        assert!(sub.start().distance(c.point_at(0.25).0) < 1e-12);
        assert!(sub.end().distance(c.point_at(0.75).0) < 1e-12);
    }

    #[test]
    fn subcurve_of_line_is_line() {
        let line = Curve::line((0., 0.), (10., 0.));
        let sub = line.subcurve(ParamRange::new(0.2, 0.7));
        assert!(sub.is_line());
        assert!(points_close(sub.start(), Point::new(2., 0.)));
        assert!(points_close(sub.end(), Point::new(7., 0.)));
    }

    #[test]
    fn length_of_line() {
        let line = Curve::line((0., 0.), (3., 4.));
        assert!((line.length() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn length_of_parabola() {
        // y = x^2 over [0, 1].
        let c = Curve::new((0., 0.), (1. / 3., 0.), (2. / 3., 1. / 3.), (1., 1.));
        let true_arclen = 0.5 * 5.0f64.sqrt() + 0.25 * (2.0 + 5.0f64.sqrt()).ln();
        assert!((c.length() - true_arclen).abs() < 1e-6);
    }

    #[test]
    fn bounds_of_arch() {
        let c = Curve::new((0., 0.), (0., 2.), (2., 2.), (2., 0.));
        let bounds = c.bounds();
        assert!((bounds.y1 - 1.5).abs() < 1e-9);
        assert_eq!(bounds.y0, 0.0);
        assert_eq!(bounds.x0, 0.0);
        assert_eq!(bounds.x1, 2.0);
    }

    #[test]
    fn closest_location_on_line() {
        let line = Curve::line((0., 0.), (10., 0.));
        let loc = line.closest_location(Point::new(3., 4.));
        assert!((loc.parameter - 0.3).abs() < 1e-6);
        assert!((loc.distance - 4.0).abs() < 1e-6);
    }

    #[test]
    fn reversed_roundtrip() {
        let c = Curve::new((0., 0.), (1., 2.), (3., 2.), (4., 0.));
        let r = c.reversed();
        assert_eq!(r.start(), c.end());
        assert_eq!(r.reversed(), c);
    }

    #[test]
    fn point_curve_detection() {
        let p = Curve::new((1., 1.), (1., 1.), (1., 1.), (1., 1.));
        assert!(p.is_point());
        assert!(!Curve::line((0., 0.), (1., 0.)).is_point());
    }

    #[test]
    fn tangents_at_offsets() {
        let line = Curve::line((0., 0.), (10., 0.));
        let forward = line.tangent_from_left_offset(1.0).normalize();
        let backward = line.tangent_from_right_offset(1.0).normalize();
        assert!(points_close(forward.to_point(), Point::new(1., 0.)));
        assert!(points_close(backward.to_point(), Point::new(-1., 0.)));
    }
}
