//! Records describing where two curves meet.

use std::cell::OnceCell;
use std::fmt;

use crate::geometry::{
    points_close_with_options, values_close_with_options, ParamRange, PARAM_CLOSE,
    TANGENT_POINT_CLOSE,
};
use crate::{Curve, Point};

/// A single intersection of two curves: the two curves and the parameter of
/// the meeting point on each. Immutable; the location and the split halves
/// of each curve are computed lazily.
#[derive(Clone)]
pub struct Intersection {
    curve1: Curve,
    t1: f64,
    curve2: Curve,
    t2: f64,
    side1: OnceCell<(Point, Curve, Curve)>,
    side2: OnceCell<(Point, Curve, Curve)>,
}

impl Intersection {
    /// A new intersection of `curve1` at `t1` with `curve2` at `t2`.
    pub fn new(curve1: Curve, t1: f64, curve2: Curve, t2: f64) -> Intersection {
        Intersection {
            curve1,
            t1,
            curve2,
            t2,
            side1: OnceCell::new(),
            side2: OnceCell::new(),
        }
    }

    fn side1(&self) -> &(Point, Curve, Curve) {
        self.side1.get_or_init(|| self.curve1.point_at(self.t1))
    }

    fn side2(&self) -> &(Point, Curve, Curve) {
        self.side2.get_or_init(|| self.curve2.point_at(self.t2))
    }

    /// The first curve.
    #[inline]
    pub fn curve1(&self) -> &Curve {
        &self.curve1
    }

    /// The second curve.
    #[inline]
    pub fn curve2(&self) -> &Curve {
        &self.curve2
    }

    /// The parameter on the first curve.
    #[inline]
    pub fn parameter1(&self) -> f64 {
        self.t1
    }

    /// The parameter on the second curve.
    #[inline]
    pub fn parameter2(&self) -> f64 {
        self.t2
    }

    /// Where the intersection happens.
    pub fn location(&self) -> Point {
        self.side1().0
    }

    /// The part of curve 1 before the intersection.
    pub fn curve1_left_bezier(&self) -> &Curve {
        &self.side1().1
    }

    /// The part of curve 1 after the intersection.
    pub fn curve1_right_bezier(&self) -> &Curve {
        &self.side1().2
    }

    /// The part of curve 2 before the intersection.
    pub fn curve2_left_bezier(&self) -> &Curve {
        &self.side2().1
    }

    /// The part of curve 2 after the intersection.
    pub fn curve2_right_bezier(&self) -> &Curve {
        &self.side2().2
    }

    /// Is the intersection at the start of curve 1?
    pub fn at_start_of_curve1(&self) -> bool {
        values_close_with_options(self.t1, 0.0, PARAM_CLOSE) || self.curve1.is_point()
    }

    /// Is the intersection at the end of curve 1?
    pub fn at_stop_of_curve1(&self) -> bool {
        values_close_with_options(self.t1, 1.0, PARAM_CLOSE) || self.curve1.is_point()
    }

    /// Is the intersection at either end of curve 1?
    pub fn at_end_point_of_curve1(&self) -> bool {
        self.at_start_of_curve1() || self.at_stop_of_curve1()
    }

    /// Is the intersection at the start of curve 2?
    pub fn at_start_of_curve2(&self) -> bool {
        values_close_with_options(self.t2, 0.0, PARAM_CLOSE) || self.curve2.is_point()
    }

    /// Is the intersection at the end of curve 2?
    pub fn at_stop_of_curve2(&self) -> bool {
        values_close_with_options(self.t2, 1.0, PARAM_CLOSE) || self.curve2.is_point()
    }

    /// Is the intersection at either end of curve 2?
    pub fn at_end_point_of_curve2(&self) -> bool {
        self.at_start_of_curve2() || self.at_stop_of_curve2()
    }

    /// Is the intersection at an end of either curve?
    pub fn at_end_point(&self) -> bool {
        self.at_end_point_of_curve1() || self.at_end_point_of_curve2()
    }

    /// Do the two curves merely touch here, rather than pass through each
    /// other?
    ///
    /// The four unit tangents on either side of the split are compared; the
    /// intersection is tangent when at least one tangent of curve 1
    /// coincides with one of curve 2, within the (deliberately loose)
    /// `TANGENT_POINT_CLOSE` threshold.
    pub fn is_tangent(&self) -> bool {
        // At the end of a curve the split tangents degenerate, so endpoint
        // intersections are never classified as tangent here.
        if self.at_end_point() {
            return false;
        }

        let curve1_left = self.curve1_left_bezier();
        let curve1_right = self.curve1_right_bezier();
        let curve2_left = self.curve2_left_bezier();
        let curve2_right = self.curve2_right_bezier();

        let c1_left_tangent = (curve1_left.control2() - curve1_left.end()).normalize();
        let c1_right_tangent = (curve1_right.control1() - curve1_right.start()).normalize();
        let c2_left_tangent = (curve2_left.control2() - curve2_left.end()).normalize();
        let c2_right_tangent = (curve2_right.control1() - curve2_right.start()).normalize();

        let close = |a: crate::Vec2, b: crate::Vec2| {
            points_close_with_options(a.to_point(), b.to_point(), TANGENT_POINT_CLOSE)
        };

        close(c1_left_tangent, c2_left_tangent)
            || close(c1_left_tangent, c2_right_tangent)
            || close(c1_right_tangent, c2_left_tangent)
            || close(c1_right_tangent, c2_right_tangent)
    }
}

impl fmt::Debug for Intersection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Intersection(t1={}, t2={}, at={:?})",
            self.t1,
            self.t2,
            self.location()
        )
    }
}

/// A contiguous interval on which two curves coincide: the two curves, the
/// parameter range of the shared arc on each, and whether the second curve
/// traverses the arc in the opposite direction.
#[derive(Clone)]
pub struct IntersectRange {
    curve1: Curve,
    range1: ParamRange,
    curve2: Curve,
    range2: ParamRange,
    reversed: bool,
    splits1: OnceCell<(Curve, Curve, Curve)>,
    splits2: OnceCell<(Curve, Curve, Curve)>,
}

impl IntersectRange {
    /// A new overlap record.
    pub fn new(
        curve1: Curve,
        range1: ParamRange,
        curve2: Curve,
        range2: ParamRange,
        reversed: bool,
    ) -> IntersectRange {
        IntersectRange {
            curve1,
            range1,
            curve2,
            range2,
            reversed,
            splits1: OnceCell::new(),
            splits2: OnceCell::new(),
        }
    }

    fn splits1(&self) -> &(Curve, Curve, Curve) {
        self.splits1
            .get_or_init(|| self.curve1.split_subcurves(self.range1))
    }

    fn splits2(&self) -> &(Curve, Curve, Curve) {
        self.splits2
            .get_or_init(|| self.curve2.split_subcurves(self.range2))
    }

    /// The first curve.
    #[inline]
    pub fn curve1(&self) -> &Curve {
        &self.curve1
    }

    /// The second curve.
    #[inline]
    pub fn curve2(&self) -> &Curve {
        &self.curve2
    }

    /// The overlapping parameter range on the first curve.
    #[inline]
    pub fn parameter_range1(&self) -> ParamRange {
        self.range1
    }

    /// The overlapping parameter range on the second curve.
    #[inline]
    pub fn parameter_range2(&self) -> ParamRange {
        self.range2
    }

    /// Do the curves traverse the overlap in opposite directions?
    #[inline]
    pub fn reversed(&self) -> bool {
        self.reversed
    }

    /// The part of curve 1 before the overlap.
    pub fn curve1_left_bezier(&self) -> &Curve {
        &self.splits1().0
    }

    /// The overlapping part of curve 1.
    pub fn curve1_overlapping_bezier(&self) -> &Curve {
        &self.splits1().1
    }

    /// The part of curve 1 after the overlap.
    pub fn curve1_right_bezier(&self) -> &Curve {
        &self.splits1().2
    }

    /// The part of curve 2 before the overlap.
    pub fn curve2_left_bezier(&self) -> &Curve {
        &self.splits2().0
    }

    /// The overlapping part of curve 2.
    pub fn curve2_overlapping_bezier(&self) -> &Curve {
        &self.splits2().1
    }

    /// The part of curve 2 after the overlap.
    pub fn curve2_right_bezier(&self) -> &Curve {
        &self.splits2().2
    }

    /// Does the overlap start at the start of curve 1?
    pub fn at_start_of_curve1(&self) -> bool {
        values_close_with_options(self.range1.minimum, 0.0, PARAM_CLOSE)
    }

    /// Does the overlap run to the end of curve 1?
    pub fn at_stop_of_curve1(&self) -> bool {
        values_close_with_options(self.range1.maximum, 1.0, PARAM_CLOSE)
    }

    /// Does the overlap start at the start of curve 2?
    pub fn at_start_of_curve2(&self) -> bool {
        values_close_with_options(self.range2.minimum, 0.0, PARAM_CLOSE)
    }

    /// Does the overlap run to the end of curve 2?
    pub fn at_stop_of_curve2(&self) -> bool {
        values_close_with_options(self.range2.maximum, 1.0, PARAM_CLOSE)
    }

    /// A representative intersection in the middle of the overlap.
    pub fn middle_intersection(&self) -> Intersection {
        Intersection::new(
            self.curve1.clone(),
            self.range1.average(),
            self.curve2.clone(),
            self.range2.average(),
        )
    }

    /// Extend this overlap to also cover `other`, assumed to be between the
    /// same two curves.
    pub fn merge(&mut self, other: &IntersectRange) {
        *self = IntersectRange::new(
            self.curve1.clone(),
            self.range1.union(other.range1),
            self.curve2.clone(),
            self.range2.union(other.range2),
            self.reversed,
        );
    }
}

impl fmt::Debug for IntersectRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "IntersectRange([{}, {}] x [{}, {}]{})",
            self.range1.minimum,
            self.range1.maximum,
            self.range2.minimum,
            self.range2.maximum,
            if self.reversed { ", reversed" } else { "" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_predicates_snap() {
        let a = Curve::line((0., 0.), (10., 0.));
        let b = Curve::line((0., -5.), (0., 5.));
        let x = Intersection::new(a.clone(), 1e-5, b, 0.5);
        assert!(x.at_start_of_curve1());
        assert!(!x.at_stop_of_curve1());
        assert!(!x.at_end_point_of_curve2());
    }

    #[test]
    fn crossing_lines_are_not_tangent() {
        let a = Curve::line((0., 0.), (10., 0.));
        let b = Curve::line((5., -5.), (5., 5.));
        let x = Intersection::new(a, 0.5, b, 0.5);
        assert!(!x.is_tangent());
    }

    #[test]
    fn kissing_curves_are_tangent() {
        // Two parabolic arches meeting at their apex (0.5, 0.75) from
        // opposite sides.
        let a = Curve::new((0., 0.), (0., 1.), (1., 1.), (1., 0.));
        let b = Curve::new((0., 1.5), (0., 0.5), (1., 0.5), (1., 1.5));
        let x = Intersection::new(a, 0.5, b, 0.5);
        assert!(x.is_tangent());
    }

    #[test]
    fn middle_intersection_of_range() {
        let a = Curve::line((0., 0.), (10., 0.));
        let b = Curve::line((10., 0.), (0., 0.));
        let range = IntersectRange::new(
            a,
            ParamRange::new(0.0, 1.0),
            b,
            ParamRange::new(0.0, 1.0),
            true,
        );
        let middle = range.middle_intersection();
        assert_eq!(middle.parameter1(), 0.5);
        assert_eq!(middle.parameter2(), 0.5);
        assert!(middle.location().distance(Point::new(5., 0.)) < 1e-9);
    }
}
