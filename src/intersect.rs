//! Curve–curve intersection.
//!
//! For each pair of segments this module produces either a set of proper
//! intersections (delivered through a visitor with a stop flag) or a single
//! contiguous overlap range, never both. Straight lines are solved in closed
//! form, a line against a cubic through the cubic's distance polynomial, and
//! the general case by recursive Bézier clipping against fat lines.

use crate::common::{min_max, solve_cubic};
use crate::geometry::{
    points_close, rects_might_overlap, values_close_with_options, ParamRange, PARAM_CLOSE,
};
use crate::{Curve, Intersection, IntersectRange, Point, Vec2};

/// Decimal places both parameter ranges must agree on before the clipping
/// loop reports an intersection.
const CONVERGED_PLACES: u32 = 6;
const MAX_ITERATIONS: usize = 500;
const MAX_DEPTH: usize = 10;
const MAX_CALLS: usize = 4096;
/// Each clipping pass must shrink a range by at least this fraction,
/// otherwise the longer curve is split and both halves are retried.
const MIN_RANGE_SHRINK: f64 = 0.20;
/// Two cubics can intersect at most this many times.
const MAX_INTERSECTIONS: usize = 9;
/// How close an endpoint must be to the other curve to count as lying on it.
const ON_CURVE_CLOSE: f64 = 1e-7;
/// How close the two curve points must be for a converged parameter pair to
/// be accepted as an intersection.
const ACCEPT_CLOSE: f64 = 1e-4;

/// Find all intersections between two curves.
///
/// Proper intersections are passed to `visitor` (set the `bool` to stop
/// early), in no particular order. If the curves are coincident over an
/// interval, `overlap` is filled in instead and no intersections are
/// reported.
pub fn curve_curve_intersections<F>(
    curve1: &Curve,
    curve2: &Curve,
    overlap: &mut Option<IntersectRange>,
    mut visitor: F,
) where
    F: FnMut(&Intersection, &mut bool),
{
    if !rects_might_overlap(curve1.control_bounds(), curve2.control_bounds())
        || !rects_might_overlap(curve1.bounds(), curve2.bounds())
    {
        return;
    }

    if curve1.is_point() || curve2.is_point() {
        if let Some(pair) = point_curve_intersection(curve1, curve2) {
            deliver(&[pair], curve1, curve2, &mut visitor);
        }
        return;
    }

    if curve1.is_line() && curve2.is_line() {
        match line_line_intersections(curve1, curve2) {
            LineLine::Crossings(pairs) => deliver(&pairs, curve1, curve2, &mut visitor),
            LineLine::Overlap(range) => *overlap = Some(range),
            LineLine::None => {}
        }
        return;
    }

    // Coincident arcs never also cross somewhere else, so checking once at
    // the top level is enough.
    if let Some(range) = check_for_overlap(curve1, curve2) {
        *overlap = Some(range);
        return;
    }

    let mut pairs = Vec::new();
    if curve1.is_line() {
        for (t_line, t_curve) in line_curve_intersections(curve1, curve2) {
            push_pair(&mut pairs, t_line, t_curve, curve1, curve2);
        }
    } else if curve2.is_line() {
        for (t_line, t_curve) in line_curve_intersections(curve2, curve1) {
            push_pair(&mut pairs, t_curve, t_line, curve1, curve2);
        }
    } else {
        let mut range1 = ParamRange::FULL;
        let mut range2 = ParamRange::FULL;
        let mut calls = 0;
        clip_recurse(
            curve1,
            curve2,
            &mut range1,
            &mut range2,
            0,
            &mut calls,
            &mut pairs,
        );
    }
    deliver(&pairs, curve1, curve2, &mut visitor);
}

/// Convenience wrapper collecting all intersections into a vector.
pub fn curve_curve_intersection_list(
    curve1: &Curve,
    curve2: &Curve,
    overlap: &mut Option<IntersectRange>,
) -> Vec<Intersection> {
    let mut result = Vec::new();
    curve_curve_intersections(curve1, curve2, overlap, |intersection, _| {
        result.push(intersection.clone());
    });
    result
}

fn deliver<F>(pairs: &[(f64, f64)], curve1: &Curve, curve2: &Curve, visitor: &mut F)
where
    F: FnMut(&Intersection, &mut bool),
{
    let mut stop = false;
    for &(t1, t2) in pairs {
        let intersection = Intersection::new(curve1.clone(), t1, curve2.clone(), t2);
        visitor(&intersection, &mut stop);
        if stop {
            return;
        }
    }
}

fn snap_parameter(t: f64) -> f64 {
    if values_close_with_options(t, 0.0, PARAM_CLOSE) {
        0.0
    } else if values_close_with_options(t, 1.0, PARAM_CLOSE) {
        1.0
    } else {
        t
    }
}

// Snap to the curve ends, deduplicate, and keep whichever duplicate sits
// closest to a true meeting point.
fn push_pair(pairs: &mut Vec<(f64, f64)>, t1: f64, t2: f64, curve1: &Curve, curve2: &Curve) {
    let t1 = snap_parameter(t1);
    let t2 = snap_parameter(t2);
    if !(0.0..=1.0).contains(&t1) || !(0.0..=1.0).contains(&t2) {
        return;
    }
    for existing in pairs.iter_mut() {
        let (old_t1, old_t2) = *existing;
        if (t1 - old_t1).abs() < PARAM_CLOSE && (t2 - old_t2).abs() < PARAM_CLOSE {
            let old_dist = curve1.eval(old_t1).distance(curve2.eval(old_t2));
            let new_dist = curve1.eval(t1).distance(curve2.eval(t2));
            if new_dist < old_dist {
                *existing = (t1, t2);
            }
            return;
        }
    }
    if pairs.len() < MAX_INTERSECTIONS {
        pairs.push((t1, t2));
    }
}

fn point_curve_intersection(curve1: &Curve, curve2: &Curve) -> Option<(f64, f64)> {
    let (point_curve, other, point_is_curve1) = if curve1.is_point() {
        (curve1, curve2, true)
    } else {
        (curve2, curve1, false)
    };

    let point = point_curve.eval(0.5);
    let location = other.closest_location(point);
    if !points_close(point, other.eval(location.parameter)) {
        return None;
    }

    let other_t = snap_parameter(location.parameter);
    if point_is_curve1 {
        Some((0.5, other_t))
    } else {
        Some((other_t, 0.5))
    }
}

enum LineLine {
    Crossings(Vec<(f64, f64)>),
    Overlap(IntersectRange),
    None,
}

// Closed-form intersection of two straight segments. The colinear case
// yields the overlap interval, or a single endpoint intersection when the
// segments only just touch.
fn line_line_intersections(line1: &Curve, line2: &Curve) -> LineLine {
    let p1 = line1.start();
    let d1 = line1.end() - p1;
    let p2 = line2.start();
    let d2 = line2.end() - p2;

    let denominator = d1.cross(d2);
    let scale = d1.hypot() * d2.hypot();
    if denominator.abs() <= 1e-12 * scale {
        // Parallel. Coincident only if line2's start sits on line1's
        // carrier line.
        if crate::geometry::distance_point_to_line(p2, line1.start(), line1.end()) > 1e-9 {
            return LineLine::None;
        }

        let project1 = |pt: Point| (pt - p1).dot(d1) / d1.hypot2();
        let project2 = |pt: Point| (pt - p2).dot(d2) / d2.hypot2();

        let a = project1(line2.start());
        let b = project1(line2.end());
        let reversed = a > b;
        let (lo, hi) = min_max(a, b);
        let minimum = lo.max(0.0);
        let maximum = hi.min(1.0);
        if minimum > maximum + PARAM_CLOSE {
            return LineLine::None; // disjoint pieces of the same carrier
        }
        if maximum - minimum <= PARAM_CLOSE {
            // Zero-length overlap: the segments only share a point.
            let t1 = snap_parameter(0.5 * (minimum + maximum));
            let t2 = snap_parameter(project2(line1.eval(t1)).clamp(0.0, 1.0));
            return LineLine::Crossings(vec![(t1.clamp(0.0, 1.0), t2)]);
        }

        let start2 = snap_parameter(project2(line1.eval(minimum)).clamp(0.0, 1.0));
        let stop2 = snap_parameter(project2(line1.eval(maximum)).clamp(0.0, 1.0));
        let (lo2, hi2) = min_max(start2, stop2);
        return LineLine::Overlap(IntersectRange::new(
            line1.clone(),
            ParamRange::new(snap_parameter(minimum), snap_parameter(maximum)),
            line2.clone(),
            ParamRange::new(lo2, hi2),
            reversed,
        ));
    }

    let t1 = (p2 - p1).cross(d2) / denominator;
    let t2 = (p2 - p1).cross(d1) / denominator;
    let t1 = snap_parameter(t1);
    let t2 = snap_parameter(t2);
    if (0.0..=1.0).contains(&t1) && (0.0..=1.0).contains(&t2) {
        LineLine::Crossings(vec![(t1, t2)])
    } else {
        LineLine::None
    }
}

// Intersections of a straight segment with a cubic, via the cubic's signed
// distance polynomial against the line. Returns (t on line, t on curve).
fn line_curve_intersections(line: &Curve, curve: &Curve) -> Vec<(f64, f64)> {
    let start = line.start();
    let direction = line.end() - start;

    let distance = |pt: Point| (pt - start).cross(direction);
    let d0 = distance(curve.start());
    let d1 = distance(curve.control1());
    let d2 = distance(curve.control2());
    let d3 = distance(curve.end());

    // Bernstein to power basis.
    let c0 = d0;
    let c1 = 3.0 * (d1 - d0);
    let c2 = 3.0 * (d0 - 2.0 * d1 + d2);
    let c3 = -d0 + 3.0 * (d1 - d2) + d3;

    let mut result = Vec::new();
    for t_curve in solve_cubic(c0, c1, c2, c3) {
        let t_curve = snap_parameter(t_curve);
        if !(0.0..=1.0).contains(&t_curve) {
            continue;
        }
        let pt = curve.eval(t_curve);
        let t_line = snap_parameter((pt - start).dot(direction) / direction.hypot2());
        if (0.0..=1.0).contains(&t_line) {
            result.push((t_line, t_curve));
        }
    }
    result
}

// If the two curves trace the same arc over some interval, work out the
// interval on each and the relative direction. Endpoints of each curve are
// projected onto the other; the candidate interval must verify as
// coincident at sampled interior points.
fn check_for_overlap(curve1: &Curve, curve2: &Curve) -> Option<IntersectRange> {
    // (parameter on curve1, parameter on curve2) for every endpoint that
    // lies on the other curve.
    let mut pairs: Vec<(f64, f64)> = Vec::with_capacity(4);
    let mut add_pair = |t1: f64, t2: f64| {
        let t1 = snap_parameter(t1);
        let t2 = snap_parameter(t2);
        if !pairs
            .iter()
            .any(|&(u1, u2)| (u1 - t1).abs() < PARAM_CLOSE && (u2 - t2).abs() < PARAM_CLOSE)
        {
            pairs.push((t1, t2));
        }
    };

    let location = curve1.closest_location(curve2.start());
    if location.distance <= ON_CURVE_CLOSE {
        add_pair(location.parameter, 0.0);
    }
    let location = curve1.closest_location(curve2.end());
    if location.distance <= ON_CURVE_CLOSE {
        add_pair(location.parameter, 1.0);
    }
    let location = curve2.closest_location(curve1.start());
    if location.distance <= ON_CURVE_CLOSE {
        add_pair(0.0, location.parameter);
    }
    let location = curve2.closest_location(curve1.end());
    if location.distance <= ON_CURVE_CLOSE {
        add_pair(1.0, location.parameter);
    }

    if pairs.len() < 2 {
        return None;
    }

    let &(u_min, v_at_min) = pairs
        .iter()
        .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap())?;
    let &(u_max, v_at_max) = pairs
        .iter()
        .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap())?;

    let range1 = ParamRange::new(u_min, u_max);
    let reversed = v_at_min > v_at_max;
    let (v_min, v_max) = min_max(v_at_min, v_at_max);
    let range2 = ParamRange::new(v_min, v_max);
    if range1.size() <= PARAM_CLOSE || range2.size() <= PARAM_CLOSE {
        return None;
    }

    // The interval only counts if the arcs genuinely coincide on it.
    for i in 1..8 {
        let t = range1.scale_normalized(i as f64 / 8.0);
        let sample = curve1.eval(t);
        if curve2.closest_location(sample).distance > ON_CURVE_CLOSE {
            return None;
        }
    }

    Some(IntersectRange::new(
        curve1.clone(),
        range1,
        curve2.clone(),
        range2,
        reversed,
    ))
}

fn shrinkage(previous: ParamRange, current: ParamRange) -> f64 {
    if previous.size() == 0.0 {
        return 1.0;
    }
    (previous.size() - current.size()) / previous.size()
}

// The recursive Bézier clipping loop. `range1`/`range2` track which part of
// the original curves the current iterates correspond to.
#[allow(clippy::too_many_arguments)]
fn clip_recurse(
    orig1: &Curve,
    orig2: &Curve,
    range1: &mut ParamRange,
    range2: &mut ParamRange,
    depth: usize,
    calls: &mut usize,
    out: &mut Vec<(f64, f64)>,
) {
    *calls += 1;
    if *calls > MAX_CALLS || out.len() >= MAX_INTERSECTIONS {
        return;
    }

    let mut us = orig1.subcurve(*range1);
    let mut them = orig2.subcurve(*range2);

    let mut iterations = 0;
    while iterations < MAX_ITERATIONS
        && !(range1.has_converged(CONVERGED_PLACES) && range2.has_converged(CONVERGED_PLACES))
    {
        let previous1 = *range1;
        let previous2 = *range2;

        if !clip_to_fat_line(&mut us, &them, orig1, range1) {
            return;
        }
        if !clip_to_fat_line(&mut them, &us, orig2, range2) {
            return;
        }

        let change1 = shrinkage(previous1, *range1);
        let change2 = shrinkage(previous2, *range2);
        if change1 < MIN_RANGE_SHRINK && change2 < MIN_RANGE_SHRINK {
            // Not converging fast enough; likely more than one intersection
            // in range. Split the curve with the larger remaining range and
            // conquer the halves separately.
            if depth < MAX_DEPTH {
                if range1.size() > range2.size() {
                    let middle = range1.average();
                    let mut low = ParamRange::new(range1.minimum, middle);
                    let mut low_other = *range2;
                    clip_recurse(orig1, orig2, &mut low, &mut low_other, depth + 1, calls, out);
                    let mut high = ParamRange::new(middle, range1.maximum);
                    let mut high_other = *range2;
                    clip_recurse(
                        orig1,
                        orig2,
                        &mut high,
                        &mut high_other,
                        depth + 1,
                        calls,
                        out,
                    );
                } else {
                    let middle = range2.average();
                    let mut low = *range1;
                    let mut low_other = ParamRange::new(range2.minimum, middle);
                    clip_recurse(orig1, orig2, &mut low, &mut low_other, depth + 1, calls, out);
                    let mut high = *range1;
                    let mut high_other = ParamRange::new(middle, range2.maximum);
                    clip_recurse(
                        orig1,
                        orig2,
                        &mut high,
                        &mut high_other,
                        depth + 1,
                        calls,
                        out,
                    );
                }
                return;
            }
            // Too deep to keep splitting; settle for the refinement below.
            break;
        }
        iterations += 1;
    }

    // One or both ranges may not have fully converged (the math gets wonky
    // once a subcurve collapses to a point). The converged side pins the
    // meeting point; Newton projection tightens the other.
    let mut t1 = range1.average();
    let mut t2 = range2.average();
    let converged1 = range1.has_converged(CONVERGED_PLACES);
    let converged2 = range2.has_converged(CONVERGED_PLACES);
    if converged1 && !converged2 {
        let pinned = orig1.eval(t1);
        for _ in 0..3 {
            t2 = orig2.refine_parameter(t2, pinned);
        }
    } else if !converged1 && converged2 {
        let pinned = orig2.eval(t2);
        for _ in 0..3 {
            t1 = orig1.refine_parameter(t1, pinned);
        }
    } else if !converged1 && !converged2 {
        for _ in 0..3 {
            let pinned2 = orig2.eval(t2);
            t1 = orig1.refine_parameter(t1, pinned2);
            let pinned1 = orig1.eval(t1);
            t2 = orig2.refine_parameter(t2, pinned1);
        }
    }

    if orig1.eval(t1).distance(orig2.eval(t2)) <= ACCEPT_CLOSE {
        push_pair(out, t1, t2, orig1, orig2);
    }
}

// Clip `us` to the fat line of `them`, shrinking `range` accordingly.
// Returns false when the curves can't intersect within the current ranges.
fn clip_to_fat_line(us: &mut Curve, them: &Curve, original: &Curve, range: &mut ParamRange) -> bool {
    let baseline = them.end() - them.start();
    if baseline.hypot2() < 1e-24 {
        // No usable baseline; let the caller's split logic take over.
        return true;
    }

    // The regular fat line...
    let (d_min, d_max) = fat_line_bounds(them);
    let range_regular = clip_with_fat_line(us, them.start(), baseline, d_min, d_max);
    // ...and the perpendicular one, in case it clips tighter.
    let perpendicular = baseline.normal();
    let (p_min, p_max) = perpendicular_fat_line_bounds(them, perpendicular);
    let range_perpendicular = clip_with_fat_line(us, them.start(), perpendicular, p_min, p_max);

    let (clip_min, clip_max) = match (range_regular, range_perpendicular) {
        (Some((a_min, a_max)), Some((b_min, b_max))) => (a_min.max(b_min), a_max.min(b_max)),
        _ => return false,
    };
    if clip_min > clip_max {
        return false;
    }

    *range = ParamRange::new(
        range.scale_normalized(clip_min),
        range.scale_normalized(clip_max),
    );
    // Resplit from the original so error doesn't accumulate.
    *us = original.subcurve(*range);
    true
}

#[inline]
fn signed_distance(anchor: Point, direction: Vec2, pt: Point) -> f64 {
    // Unnormalized distance from the line through `anchor` along
    // `direction`; consistent as long as the same line is used throughout.
    (pt - anchor).cross(direction)
}

// Distance envelope of a cubic around its own baseline, with the classic
// 3/4 and 4/9 tightening factors.
fn fat_line_bounds(curve: &Curve) -> (f64, f64) {
    let anchor = curve.start();
    let direction = curve.end() - curve.start();
    let (d1, d2) = min_max(
        signed_distance(anchor, direction, curve.control1()),
        signed_distance(anchor, direction, curve.control2()),
    );
    let factor = if d1 * d2 > 0.0 { 3.0 / 4.0 } else { 4.0 / 9.0 };
    (factor * d1.min(0.0), factor * d2.max(0.0))
}

fn perpendicular_fat_line_bounds(curve: &Curve, direction: Vec2) -> (f64, f64) {
    let anchor = curve.start();
    let mut lower = 0.0f64;
    let mut upper = 0.0f64;
    for pt in [
        curve.start(),
        curve.control1(),
        curve.control2(),
        curve.end(),
    ] {
        let d = signed_distance(anchor, direction, pt);
        lower = lower.min(d);
        upper = upper.max(d);
    }
    (lower, upper)
}

// Clip the distance polynomial of `us` (distances taken against the line
// through `anchor` along `direction`) to the band [d_min, d_max]. Returns
// the parameter interval of `us` that can lie inside the band.
fn clip_with_fat_line(
    us: &Curve,
    anchor: Point,
    direction: Vec2,
    d_min: f64,
    d_max: f64,
) -> Option<(f64, f64)> {
    let d0 = signed_distance(anchor, direction, us.start());
    let d1 = signed_distance(anchor, direction, us.control1());
    let d2 = signed_distance(anchor, direction, us.control2());
    let d3 = signed_distance(anchor, direction, us.end());

    let (mut top, mut bottom) = convex_hull_of_distances(d0, d1, d2, d3);
    clip_convex_hull_to_band(&mut top, &mut bottom, d_min, d_max)
}

// Convex hull of the distance polynomial's control points
// (0, d0), (1/3, d1), (2/3, d2), (1, d3), as top and bottom chains.
fn convex_hull_of_distances(d0: f64, d1: f64, d2: f64, d3: f64) -> (Vec<Point>, Vec<Point>) {
    let p0 = Point::new(0.0, d0);
    let p1 = Point::new(1.0 / 3.0, d1);
    let p2 = Point::new(2.0 / 3.0, d2);
    let p3 = Point::new(1.0, d3);
    // Vertical signed distances of p1 and p2 from the chord [p0, p3].
    let dist1 = d1 - (2.0 * d0 + d3) / 3.0;
    let dist2 = d2 - (d0 + 2.0 * d3) / 3.0;

    // Compute the hull assuming p1 is on top, flip later if needed.
    let mut hull = if dist1 * dist2 < 0.0 {
        // p1 and p2 on opposite sides of the chord: a quadrilateral.
        (vec![p0, p1, p3], vec![p0, p2, p3])
    } else {
        // Same side: triangle or quadrilateral, chord on the hull.
        let abs1 = dist1.abs();
        let abs2 = dist2.abs();
        if abs1 >= 2.0 * abs2 {
            (vec![p0, p1, p3], vec![p0, p3])
        } else if abs2 >= 2.0 * abs1 {
            (vec![p0, p2, p3], vec![p0, p3])
        } else {
            (vec![p0, p1, p2, p3], vec![p0, p3])
        }
    };

    if dist1 < 0.0 || (dist1 == 0.0 && dist2 < 0.0) {
        hull = (hull.1, hull.0);
    }
    hull
}

// The min and max parameters at which the hull enters the band.
fn clip_convex_hull_to_band(
    hull_top: &mut Vec<Point>,
    hull_bottom: &mut Vec<Point>,
    d_min: f64,
    d_max: f64,
) -> Option<(f64, f64)> {
    // Walk from the left corner of the hull until we enter the band...
    let t_min = walk_hull_start_to_band(hull_top, hull_bottom, d_min, d_max)?;

    // ...then from the right corner, by reversing the vertex order.
    hull_top.reverse();
    hull_bottom.reverse();
    let t_max = walk_hull_start_to_band(hull_top, hull_bottom, d_min, d_max)?;

    Some((t_min, t_max))
}

fn walk_hull_start_to_band(
    hull_top: &[Point],
    hull_bottom: &[Point],
    d_min: f64,
    d_max: f64,
) -> Option<f64> {
    let start_corner = hull_top[0];

    if start_corner.y < d_min {
        walk_hull_edges_to_band(hull_top, true, d_min)
    } else if start_corner.y > d_max {
        walk_hull_edges_to_band(hull_bottom, false, d_max)
    } else {
        Some(start_corner.x)
    }
}

fn walk_hull_edges_to_band(hull: &[Point], walking_up: bool, threshold: f64) -> Option<f64> {
    for i in 0..hull.len() - 1 {
        let p = hull[i];
        let q = hull[i + 1];
        if (walking_up && q.y >= threshold) || (!walking_up && q.y <= threshold) {
            return if (q.y - threshold).abs() < f64::EPSILON {
                Some(q.x)
            } else {
                Some(p.x + (threshold - p.y) * (q.x - p.x) / (q.y - p.y))
            };
        }
    }
    // The whole hull is outside the band.
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(curve1: &Curve, curve2: &Curve) -> usize {
        let mut overlap = None;
        let n = curve_curve_intersection_list(curve1, curve2, &mut overlap).len();
        assert!(overlap.is_none(), "unexpected overlap");
        n
    }

    #[test]
    fn crossing_lines() {
        let a = Curve::line((0., 0.), (10., 10.));
        let b = Curve::line((0., 10.), (10., 0.));
        let mut overlap = None;
        let found = curve_curve_intersection_list(&a, &b, &mut overlap);
        assert_eq!(found.len(), 1);
        assert!(found[0].location().distance(Point::new(5., 5.)) < 1e-9);
        assert!((found[0].parameter1() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn parallel_lines_miss() {
        let a = Curve::line((0., 0.), (10., 0.));
        let b = Curve::line((0., 1.), (10., 1.));
        assert_eq!(count(&a, &b), 0);
    }

    #[test]
    fn lines_meeting_at_endpoint() {
        let a = Curve::line((0., 0.), (10., 0.));
        let b = Curve::line((10., 0.), (10., 10.));
        let mut overlap = None;
        let found = curve_curve_intersection_list(&a, &b, &mut overlap);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].parameter1(), 1.0);
        assert_eq!(found[0].parameter2(), 0.0);
    }

    #[test]
    fn colinear_lines_overlap() {
        let a = Curve::line((0., 0.), (10., 0.));
        let b = Curve::line((15., 0.), (5., 0.));
        let mut overlap = None;
        let found = curve_curve_intersection_list(&a, &b, &mut overlap);
        assert!(found.is_empty());
        let range = overlap.expect("overlap expected");
        assert!(range.reversed());
        assert!((range.parameter_range1().minimum - 0.5).abs() < 1e-9);
        assert_eq!(range.parameter_range1().maximum, 1.0);
        assert!((range.parameter_range2().minimum - 0.5).abs() < 1e-9);
        assert_eq!(range.parameter_range2().maximum, 1.0);
    }

    #[test]
    fn colinear_lines_touching_endpoints() {
        let a = Curve::line((0., 0.), (10., 0.));
        let b = Curve::line((10., 0.), (20., 0.));
        let mut overlap = None;
        let found = curve_curve_intersection_list(&a, &b, &mut overlap);
        assert!(overlap.is_none());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].parameter1(), 1.0);
        assert_eq!(found[0].parameter2(), 0.0);
    }

    #[test]
    fn line_through_arch() {
        let arch = Curve::new((0., 0.), (0., 2.), (2., 2.), (2., 0.));
        let line = Curve::line((-1., 1.), (3., 1.));
        let mut overlap = None;
        let found = curve_curve_intersection_list(&line, &arch, &mut overlap);
        assert_eq!(found.len(), 2);
        for x in &found {
            assert!((x.location().y - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn line_missing_arch() {
        let arch = Curve::new((0., 0.), (0., 2.), (2., 2.), (2., 0.));
        let line = Curve::line((-1., 3.), (3., 3.));
        assert_eq!(count(&line, &arch), 0);
    }

    #[test]
    fn crossing_arches() {
        let a = Curve::new((0., 0.), (0.5, 1.), (0.5, 1.), (1., 0.));
        let b = Curve::new((0., 1.), (0.5, 0.), (0.5, 0.), (1., 1.));
        assert_eq!(count(&a, &b), 2);
    }

    #[test]
    fn corner_to_corner_curves() {
        let a = Curve::new((0., 0.), (0., 1.), (0., 1.), (1., 1.));
        let b = Curve::new((0., 1.), (1., 1.), (1., 1.), (1., 0.));
        assert_eq!(count(&a, &b), 1);
    }

    #[test]
    fn nine_intersections() {
        let a = Curve::new((0.2, 0.), (0.5, 3.), (0.5, -2.), (0.8, 1.));
        let b = Curve::new((0., 0.), (2.5, 0.5), (-1.5, 0.5), (1., 0.));
        assert_eq!(count(&a, &b), 9);
    }

    #[test]
    fn four_intersections() {
        let a = Curve::new((48., 84.), (104., 176.), (190., 37.), (121., 75.));
        let b = Curve::new((68., 145.), (74., 6.), (143., 197.), (138., 55.));
        assert_eq!(count(&a, &b), 4);
    }

    #[test]
    fn identical_curves_overlap_completely() {
        let a = Curve::new((0., 0.), (0.3, 1.), (0.7, 1.), (1., 0.));
        let mut overlap = None;
        let found = curve_curve_intersection_list(&a, &a.clone(), &mut overlap);
        assert!(found.is_empty());
        let range = overlap.expect("full overlap expected");
        assert!(!range.reversed());
        assert_eq!(range.parameter_range1().minimum, 0.0);
        assert_eq!(range.parameter_range1().maximum, 1.0);
    }

    #[test]
    fn reversed_curve_overlaps_reversed() {
        let a = Curve::new((0., 0.), (0.3, 1.), (0.7, 1.), (1., 0.));
        let b = a.reversed();
        let mut overlap = None;
        let found = curve_curve_intersection_list(&a, &b, &mut overlap);
        assert!(found.is_empty());
        let range = overlap.expect("full overlap expected");
        assert!(range.reversed());
    }

    #[test]
    fn point_on_curve() {
        let arch = Curve::new((0., 0.), (0., 2.), (2., 2.), (2., 0.));
        let apex = arch.eval(0.5);
        let point = Curve::new(apex, apex, apex, apex);
        let mut overlap = None;
        let found = curve_curve_intersection_list(&point, &arch, &mut overlap);
        assert_eq!(found.len(), 1);
        assert!((found[0].parameter2() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn disjoint_bounds_early_out() {
        let a = Curve::line((0., 0.), (1., 1.));
        let b = Curve::line((5., 5.), (6., 6.));
        assert_eq!(count(&a, &b), 0);
    }
}
