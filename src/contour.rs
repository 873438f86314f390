//! Contours: closed cyclic sequences of edges.

use std::cell::Cell;
use std::fmt;

use crate::crossing::{CrossingId, IntersectionSide};
use crate::geometry::points_close;
use crate::intersect::curve_curve_intersections;
use crate::{tangents_ambiguous, tangents_cross};
use crate::{Curve, Intersection, IntersectRange, Point, Rect, Vec2};

/// Whether a contour bounds a filled region or cuts a hole in one.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ContourInside {
    /// The contour bounds a filled region.
    Filled,
    /// The contour sits inside a filled region and cuts a hole in it.
    Hole,
}

/// The winding direction of a contour.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ContourDirection {
    /// Positive shoelace sum over the edge endpoints.
    Clockwise,
    /// Negative shoelace sum.
    AntiClockwise,
}

/// A curve in its role as an element of a contour.
#[derive(Clone, Debug)]
pub(crate) struct Edge {
    pub curve: Curve,
    /// Crossing ids, kept sorted by parameter by the operation workspace.
    pub crossings: Vec<CrossingId>,
    /// Set when an intersection falls on this edge's start point.
    pub start_shared: bool,
}

impl Edge {
    fn new(curve: Curve) -> Edge {
        Edge {
            curve,
            crossings: Vec::new(),
            start_shared: false,
        }
    }
}

/// A closed, cyclic sequence of edges.
#[derive(Clone, Default)]
pub struct Contour {
    pub(crate) edges: Vec<Edge>,
    pub(crate) inside: Option<ContourInside>,
    /// Indices into the operation workspace's overlap store.
    pub(crate) overlaps: Vec<usize>,
    bounds: Cell<Option<Rect>>,
    control_bounds: Cell<Option<Rect>>,
}

impl Contour {
    /// A new, empty contour.
    pub fn new() -> Contour {
        Contour::default()
    }

    /// Append a curve as the contour's next edge.
    pub fn add_curve(&mut self, curve: Curve) {
        self.edges.push(Edge::new(curve));
        self.bounds.set(None);
        self.control_bounds.set(None);
    }

    /// Append a curve traversed in the opposite direction, so its start
    /// matches the previous edge's end.
    pub fn add_reverse_curve(&mut self, curve: &Curve) {
        self.add_curve(curve.reversed());
    }

    /// Connect the last point back to the first with a straight edge, if
    /// they don't already coincide.
    pub fn close(&mut self) {
        if self.edges.is_empty() {
            return;
        }
        let first = self.edges[0].curve.start();
        let last = self.edges[self.edges.len() - 1].curve.end();
        if !points_close(first, last) {
            self.add_curve(Curve::line(last, first));
        }
    }

    /// The curves of the contour, in traversal order.
    pub fn curves(&self) -> impl Iterator<Item = &Curve> + '_ {
        self.edges.iter().map(|edge| &edge.curve)
    }

    /// The number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Is the contour empty?
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Is this contour a filled region or a hole? Only meaningful after a
    /// Boolean operation has classified the graph's contours.
    pub fn inside(&self) -> Option<ContourInside> {
        self.inside
    }

    /// The first point of the contour.
    pub fn first_point(&self) -> Point {
        match self.edges.first() {
            Some(edge) => edge.curve.start(),
            None => Point::ZERO,
        }
    }

    /// The tight bounding rectangle of the contour's edges.
    pub fn bounds(&self) -> Rect {
        if let Some(bounds) = self.bounds.get() {
            return bounds;
        }
        let mut bounds: Option<Rect> = None;
        for edge in &self.edges {
            let edge_bounds = edge.curve.bounds();
            bounds = Some(match bounds {
                Some(so_far) => so_far.union(edge_bounds),
                None => edge_bounds,
            });
        }
        let bounds = bounds.unwrap_or(Rect::ZERO);
        self.bounds.set(Some(bounds));
        bounds
    }

    /// The bounding rectangle of the edges' control polygons.
    pub fn control_bounds(&self) -> Rect {
        if let Some(bounds) = self.control_bounds.get() {
            return bounds;
        }
        let mut bounds: Option<Rect> = None;
        for edge in &self.edges {
            let edge_bounds = edge.curve.control_bounds();
            bounds = Some(match bounds {
                Some(so_far) => so_far.union(edge_bounds),
                None => edge_bounds,
            });
        }
        let bounds = bounds.unwrap_or(Rect::ZERO);
        self.control_bounds.set(Some(bounds));
        bounds
    }

    pub(crate) fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.edges.len()
    }

    pub(crate) fn previous_index(&self, index: usize) -> usize {
        (index + self.edges.len() - 1) % self.edges.len()
    }

    pub(crate) fn next_nonpoint_index(&self, index: usize) -> usize {
        let mut next = self.next_index(index);
        while self.edges[next].curve.is_point() && next != index {
            next = self.next_index(next);
        }
        next
    }

    pub(crate) fn previous_nonpoint_index(&self, index: usize) -> usize {
        let mut previous = self.previous_index(index);
        while self.edges[previous].curve.is_point() && previous != index {
            previous = self.previous_index(previous);
        }
        previous
    }

    /// The first edge whose start point is not shared with the other graph,
    /// if there is one; marking needs to start somewhere unambiguous.
    pub(crate) fn start_edge_index(&self) -> usize {
        let mut index = 0;
        while self.edges[index].start_shared {
            index = self.next_index(index);
            if index == 0 {
                break; // every start is shared
            }
        }
        index
    }

    /// Winding direction by the sign of the shoelace sum over endpoints.
    pub fn direction(&self) -> ContourDirection {
        let mut area = 0.0;
        let mut last_point = Point::ZERO;
        let mut first = true;
        for edge in &self.edges {
            if first {
                last_point = edge.curve.start();
                first = false;
            } else {
                let current = edge.curve.end();
                area += last_point.x * current.y - current.x * last_point.y;
                last_point = current;
            }
        }
        if area >= 0.0 {
            ContourDirection::Clockwise
        } else {
            ContourDirection::AntiClockwise
        }
    }

    /// The same region traversed in the opposite direction.
    pub fn reversed(&self) -> Contour {
        let mut contour = Contour::new();
        for edge in self.edges.iter().rev() {
            contour.add_reverse_curve(&edge.curve);
        }
        contour
    }

    /// This contour if already clockwise, otherwise its reversal.
    pub fn made_clockwise_if_necessary(&self) -> Contour {
        match self.direction() {
            ContourDirection::Clockwise => self.clone(),
            ContourDirection::AntiClockwise => self.reversed(),
        }
    }

    /// Even–odd containment by ray casting: a horizontal test line is run
    /// from the point to well outside the contour, and proper crossings
    /// counted.
    pub fn contains_point(&self, point: Point) -> bool {
        if !self.control_bounds().contains(point) || !self.bounds().contains(point) {
            return false;
        }

        let bounds = self.bounds();
        let end_x = if point.x > bounds.x0 {
            bounds.x0 - 10.0
        } else {
            bounds.x1 + 10.0
        };
        let ray = Curve::line(point, Point::new(end_x, point.y));
        self.number_of_intersections_with_ray(&ray) & 1 == 1
    }

    /// The number of proper crossings of `ray` with this contour.
    pub(crate) fn number_of_intersections_with_ray(&self, ray: &Curve) -> usize {
        let mut count = 0;
        self.intersections_with_ray(ray, |_| count += 1);
        count
    }

    /// Walk all proper crossings of `ray` with the contour, taking care not
    /// to double-count a crossing at the joint between two edges.
    pub(crate) fn intersections_with_ray<F>(&self, ray: &Curve, mut visit: F)
    where
        F: FnMut(&Intersection),
    {
        let mut first: Option<(usize, Intersection)> = None;
        let mut previous: Option<(usize, Intersection)> = None;

        for index in 0..self.edges.len() {
            let edge_curve = &self.edges[index].curve;
            let mut overlap: Option<IntersectRange> = None;
            let mut hits: Vec<Intersection> = Vec::new();
            curve_curve_intersections(ray, edge_curve, &mut overlap, |intersection, _| {
                hits.push(intersection.clone());
            });

            for intersection in hits {
                if edge_curve.is_point() || !self.ray_crosses_edge(index, &intersection) {
                    continue; // tangents and touches don't count
                }

                // A crossing at the start of this edge was already seen as a
                // crossing at the end of the previous edge (and symmetrically
                // for the last-to-first wrap-around).
                if intersection.at_start_of_curve2() {
                    if let Some((previous_index, previous_intersection)) = &previous {
                        if previous_intersection.at_end_point_of_curve2()
                            && *previous_index == self.previous_index(index)
                        {
                            continue;
                        }
                    }
                } else if intersection.at_end_point_of_curve2() {
                    if let Some((first_index, first_intersection)) = &first {
                        if first_intersection.at_start_of_curve2()
                            && *first_index == self.next_index(index)
                        {
                            continue;
                        }
                    }
                }

                visit(&intersection);
                if first.is_none() {
                    first = Some((index, intersection.clone()));
                }
                previous = Some((index, intersection));
            }

            if let Some(range) = overlap {
                if self.ray_overlap_crosses(&range, index) {
                    visit(&range.middle_intersection());
                }
            }
        }
    }

    // Does the ray actually pass through the contour at this intersection?
    // The ray is curve 1 of the intersection, the edge curve 2.
    fn ray_crosses_edge(&self, index: usize, intersection: &Intersection) -> bool {
        intersection_crosses(None, Some((self, index)), intersection)
    }

    // The ray runs along this edge for a stretch; decide whether the shared
    // stretch amounts to a crossing of the contour.
    fn ray_overlap_crosses(&self, range: &IntersectRange, edge_index: usize) -> bool {
        let mut offset = 0.0;
        loop {
            let (ray_tangents, ray_length) = overlap_side1_tangents(range, offset);
            let (edge_tangents, edge_length) = self.overlap_side2_tangents(range, edge_index, offset);
            let max_offset = ray_length.min(edge_length);
            if !tangents_ambiguous(ray_tangents, edge_tangents) {
                if tangents_cross(ray_tangents, edge_tangents) {
                    return true;
                }
                break;
            }
            offset += 1.0;
            if offset >= max_offset {
                break;
            }
        }

        // Tangents gave no decision; probe a point just outside each end of
        // the shared stretch instead.
        let probes = overlap_side1_probe_points(range, 1.0);
        self.contains_point(probes[0]) != self.contains_point(probes[1])
    }

    // Tangents leaving the two ends of an overlap on the contour side,
    // looking across to the neighboring edges when the overlap reaches the
    // edge's ends.
    fn overlap_side2_tangents(
        &self,
        range: &IntersectRange,
        edge_index: usize,
        offset: f64,
    ) -> ([Vec2; 2], f64) {
        let mut lengths = [0.0f64; 2];
        let mut tangents = [Vec2::ZERO; 2];
        if !range.reversed() {
            if range.at_start_of_curve2() {
                let other_index = self.previous_nonpoint_index(edge_index);
                let other = &self.edges[other_index].curve;
                tangents[0] = other.tangent_from_right_offset(offset);
                lengths[0] = other.length();
            } else {
                let left = range.curve2_left_bezier();
                tangents[0] = left.tangent_from_right_offset(offset);
                lengths[0] = left.length();
            }
            if range.at_stop_of_curve2() {
                let other_index = self.next_nonpoint_index(edge_index);
                let other = &self.edges[other_index].curve;
                tangents[1] = other.tangent_from_left_offset(offset);
                lengths[1] = other.length();
            } else {
                let right = range.curve2_right_bezier();
                tangents[1] = right.tangent_from_left_offset(offset);
                lengths[1] = right.length();
            }
        } else {
            if range.at_stop_of_curve2() {
                let other_index = self.next_nonpoint_index(edge_index);
                let other = &self.edges[other_index].curve;
                tangents[0] = other.tangent_from_left_offset(offset);
                lengths[0] = other.length();
            } else {
                let right = range.curve2_right_bezier();
                tangents[0] = right.tangent_from_left_offset(offset);
                lengths[0] = right.length();
            }
            if range.at_start_of_curve2() {
                let other_index = self.previous_nonpoint_index(edge_index);
                let other = &self.edges[other_index].curve;
                tangents[1] = other.tangent_from_right_offset(offset);
                lengths[1] = other.length();
            } else {
                let left = range.curve2_left_bezier();
                tangents[1] = left.tangent_from_right_offset(offset);
                lengths[1] = left.length();
            }
        }
        (tangents, lengths[0].min(lengths[1]))
    }
}

impl fmt::Debug for Contour {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Contour(bounds={:?}, edges=[", self.bounds())?;
        for (i, edge) in self.edges.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", edge.curve)?;
        }
        write!(f, "])")
    }
}

// Tangents leaving the two ends of an overlap on the side of curve 1 of the
// range (the free curve, e.g. a test ray).
pub(crate) fn overlap_side1_tangents(range: &IntersectRange, offset: f64) -> ([Vec2; 2], f64) {
    let left = range.curve1_left_bezier();
    let right = range.curve1_right_bezier();
    let tangents = [
        left.tangent_from_right_offset(offset),
        right.tangent_from_left_offset(offset),
    ];
    (tangents, left.length().min(right.length()))
}

// Points just outside the two ends of an overlap on curve 1's side.
pub(crate) fn overlap_side1_probe_points(range: &IntersectRange, offset: f64) -> [Point; 2] {
    [
        range.curve1_left_bezier().point_from_right_offset(offset),
        range.curve1_right_bezier().point_from_left_offset(offset),
    ]
}

// The pair of tangents moving away from an intersection on one of its two
// curves. When the intersection is at the curve's end and the curve is part
// of a contour, the tangent is taken from the adjacent edge instead, so that
// the contour's actual corner geometry decides.
pub(crate) fn intersection_side_tangents(
    neighbors: Option<(&Contour, usize)>,
    side: IntersectionSide,
    intersection: &Intersection,
    offset: f64,
) -> ([Vec2; 2], f64) {
    let (at_start, at_stop, left, right) = match side {
        IntersectionSide::First => (
            intersection.at_start_of_curve1(),
            intersection.at_stop_of_curve1(),
            intersection.curve1_left_bezier(),
            intersection.curve1_right_bezier(),
        ),
        IntersectionSide::Second => (
            intersection.at_start_of_curve2(),
            intersection.at_stop_of_curve2(),
            intersection.curve2_left_bezier(),
            intersection.curve2_right_bezier(),
        ),
    };

    match (neighbors, at_start, at_stop) {
        (Some((contour, index)), true, _) => {
            let other = &contour.edges[contour.previous_nonpoint_index(index)].curve;
            let tangents = [
                other.tangent_from_right_offset(offset),
                right.tangent_from_left_offset(offset),
            ];
            (tangents, other.length().min(right.length()))
        }
        (Some((contour, index)), _, true) => {
            let other = &contour.edges[contour.next_nonpoint_index(index)].curve;
            let tangents = [
                left.tangent_from_right_offset(offset),
                other.tangent_from_left_offset(offset),
            ];
            (tangents, left.length().min(other.length()))
        }
        _ => {
            let tangents = [
                left.tangent_from_right_offset(offset),
                right.tangent_from_left_offset(offset),
            ];
            (tangents, left.length().min(right.length()))
        }
    }
}

/// Does the intersection actually pass one curve through the other?
///
/// Tangent intersections never cross. Otherwise the polar angles of the
/// tangents moving away from the intersection must interleave; at endpoints
/// the tangents are aggregated across the adjacent edges at growing
/// arc-length offsets until they become unambiguous (or the offsets run out
/// of edge, at which point the angular test decides on a best-effort basis).
pub(crate) fn intersection_crosses(
    side1: Option<(&Contour, usize)>,
    side2: Option<(&Contour, usize)>,
    intersection: &Intersection,
) -> bool {
    if intersection.is_tangent() {
        return false;
    }

    let mut offset = 0.0;
    let (mut tangents1, mut tangents2);
    loop {
        let (t1, length1) =
            intersection_side_tangents(side1, IntersectionSide::First, intersection, offset);
        let (t2, length2) =
            intersection_side_tangents(side2, IntersectionSide::Second, intersection, offset);
        tangents1 = t1;
        tangents2 = t2;
        let max_offset = length1.min(length2);
        offset += 1.0;
        if !(tangents_ambiguous(tangents1, tangents2) && offset < max_offset) {
            break;
        }
    }

    tangents_cross(tangents1, tangents2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ParamRange;

    fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Contour {
        let mut contour = Contour::new();
        contour.add_curve(Curve::line((x0, y0), (x1, y0)));
        contour.add_curve(Curve::line((x1, y0), (x1, y1)));
        contour.add_curve(Curve::line((x1, y1), (x0, y1)));
        contour.add_curve(Curve::line((x0, y1), (x0, y0)));
        contour
    }

    #[test]
    fn rectangle_contains_point() {
        let contour = rectangle(0., 0., 100., 100.);
        assert!(contour.contains_point(Point::new(50., 50.)));
        assert!(!contour.contains_point(Point::new(150., 50.)));
        assert!(!contour.contains_point(Point::new(-1., 50.)));
    }

    #[test]
    fn ray_through_corner_counts_once() {
        // A diamond: a horizontal ray through the left corner must count one
        // crossing there, not two.
        let mut diamond = Contour::new();
        diamond.add_curve(Curve::line((0., 50.), (50., 0.)));
        diamond.add_curve(Curve::line((50., 0.), (100., 50.)));
        diamond.add_curve(Curve::line((100., 50.), (50., 100.)));
        diamond.add_curve(Curve::line((50., 100.), (0., 50.)));
        assert!(diamond.contains_point(Point::new(50., 50.)));
    }

    #[test]
    fn direction_and_reversal() {
        let contour = rectangle(0., 0., 10., 10.);
        let reversed = contour.reversed();
        assert_ne!(contour.direction(), reversed.direction());
        // The reversal starts where the original's last edge ended.
        assert_eq!(reversed.first_point(), Point::new(0., 0.));
        assert_eq!(reversed.len(), contour.len());
        // Reversal round-trips the geometry.
        assert_eq!(reversed.reversed().first_point(), contour.first_point());
    }

    #[test]
    fn close_adds_missing_edge() {
        let mut contour = Contour::new();
        contour.add_curve(Curve::line((0., 0.), (10., 0.)));
        contour.add_curve(Curve::line((10., 0.), (10., 10.)));
        contour.close();
        assert_eq!(contour.len(), 3);
        let last = contour.edges.last().unwrap();
        assert_eq!(last.curve.end(), Point::new(0., 0.));

        // Closing an already closed contour is a no-op.
        let mut closed = rectangle(0., 0., 5., 5.);
        closed.close();
        assert_eq!(closed.len(), 4);
    }

    #[test]
    fn bounds_union_all_edges() {
        let contour = rectangle(2., 3., 12., 23.);
        assert_eq!(contour.bounds(), Rect::new(2., 3., 12., 23.));
    }

    #[test]
    fn contains_point_with_curved_edge() {
        // A half-disc: flat bottom, arched top.
        let mut contour = Contour::new();
        contour.add_curve(Curve::line((0., 0.), (100., 0.)));
        contour.add_curve(Curve::new(
            (100., 0.),
            (100., 80.),
            (0., 80.),
            (0., 0.),
        ));
        assert!(contour.contains_point(Point::new(50., 30.)));
        assert!(!contour.contains_point(Point::new(50., 70.)));
    }

    #[test]
    fn crossing_decision_for_plain_crossing() {
        let contour = rectangle(0., 0., 100., 100.);
        // A ray through the middle of the left edge.
        let ray = Curve::line((50., 50.), (-10., 50.));
        let mut overlap = None;
        let found = crate::intersect::curve_curve_intersection_list(
            &ray,
            &contour.edges[3].curve,
            &mut overlap,
        );
        assert_eq!(found.len(), 1);
        assert!(intersection_crosses(None, Some((&contour, 3)), &found[0]));
    }

    #[test]
    fn overlap_side1_helpers() {
        let ray = Curve::line((0., 0.), (100., 0.));
        let edge = Curve::line((40., 0.), (60., 0.));
        let range = IntersectRange::new(
            ray.clone(),
            ParamRange::new(0.4, 0.6),
            edge,
            ParamRange::new(0.0, 1.0),
            false,
        );
        let probes = overlap_side1_probe_points(&range, 1.0);
        assert!(probes[0].distance(Point::new(39., 0.)) < 1e-6);
        assert!(probes[1].distance(Point::new(61., 0.)) < 1e-6);
    }
}
