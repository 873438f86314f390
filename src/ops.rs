//! The machinery of one Boolean operation over two graphs.
//!
//! The workspace owns the crossing arena and the overlap store for the
//! duration of the operation; the graphs' edges only hold ids into them.
//! The overall flow, shared by all four operations: insert crossings where
//! the graphs genuinely cross (including self-crossings between contours of
//! the same graph), clean up duplicates and crossings swallowed by
//! overlaps, mark each crossing as entering or exiting the result, walk the
//! crossings to stitch the intersecting parts, then resolve the contours
//! that cross nothing at all by containment. Both operand graphs are left
//! free of crossings so they can be reused.

use crate::contour::{intersection_crosses, Edge};
use crate::crossing::{ContourRef, Crossing, CrossingId, EdgeRef, IntersectionSide};
use crate::geometry::{
    rects_might_overlap, value_greater_than, value_greater_than_equal, value_less_than,
    value_less_than_equal, values_close_with_options, ParamRange, OVERLAP_CLOSE,
};
use crate::intersect::curve_curve_intersections;
use crate::overlap::{ContourOverlap, EdgeOverlap, EdgeOverlapRun};
use crate::{
    tangents_ambiguous, tangents_cross, Contour, ContourInside, Curve, Graph, Intersection, Point,
    Vec2,
};

/// How far beyond the bounds the elimination rays reach.
const RAY_OVERLAP: f64 = 10.0;

/// Crossing parameters below/above these limits are never filtered by the
/// partial-edge marking passes.
const START_PARAMETER_NO_LIMIT: f64 = 0.0;
const STOP_PARAMETER_NO_LIMIT: f64 = 2.0;

// A ray hit on a candidate container, remembered by contour.
#[derive(Clone, Copy)]
struct RayHit {
    contour: usize,
    location: Point,
}

pub(crate) struct OpWorkspace<'a> {
    graphs: [&'a mut Graph; 2],
    crossings: Vec<Crossing>,
    overlaps: Vec<ContourOverlap>,
}

impl<'a> OpWorkspace<'a> {
    pub fn new(ours: &'a mut Graph, theirs: &'a mut Graph) -> OpWorkspace<'a> {
        OpWorkspace {
            graphs: [ours, theirs],
            crossings: Vec::new(),
            overlaps: Vec::new(),
        }
    }

    // MARK: accessors

    fn graph(&self, graph: usize) -> &Graph {
        &*self.graphs[graph]
    }

    fn contour(&self, contour: ContourRef) -> &Contour {
        &self.graphs[contour.graph].contours[contour.contour]
    }

    fn edge(&self, edge: EdgeRef) -> &Edge {
        &self.graphs[edge.graph].contours[edge.contour].edges[edge.edge]
    }

    fn edge_mut(&mut self, edge: EdgeRef) -> &mut Edge {
        &mut self.graphs[edge.graph].contours[edge.contour].edges[edge.edge]
    }

    fn next_edge_ref(&self, edge: EdgeRef) -> EdgeRef {
        let contour = self.contour(edge.contour_ref());
        EdgeRef {
            edge: contour.next_index(edge.edge),
            ..edge
        }
    }

    fn previous_edge_ref(&self, edge: EdgeRef) -> EdgeRef {
        let contour = self.contour(edge.contour_ref());
        EdgeRef {
            edge: contour.previous_index(edge.edge),
            ..edge
        }
    }

    // MARK: the four operations

    pub fn union(&mut self) -> Graph {
        self.insert_crossings();
        self.insert_self_crossings(0);
        self.insert_self_crossings(1);
        self.cleanup_crossings();

        // Mark the parts of each graph lying outside the other; walking
        // those parts yields the union of the intersecting contours.
        self.mark_crossings_entry_or_exit(0, false);
        self.mark_crossings_entry_or_exit(1, false);
        let mut result = self.graph_from_intersections();

        self.union_nonintersecting_into(&mut result);
        self.finish();
        result
    }

    pub fn intersect(&mut self) -> Graph {
        self.insert_crossings();
        self.insert_self_crossings(0);
        self.insert_self_crossings(1);
        self.cleanup_crossings();

        self.mark_crossings_entry_or_exit(0, true);
        self.mark_crossings_entry_or_exit(1, true);
        let mut result = self.graph_from_intersections();

        self.intersect_nonintersecting_into(&mut result);
        self.finish();
        result
    }

    pub fn difference(&mut self) -> Graph {
        self.insert_crossings();
        self.insert_self_crossings(0);
        self.insert_self_crossings(1);
        self.cleanup_crossings();

        // We're subtracting the other graph: keep our outside parts and
        // their inside parts.
        self.mark_crossings_entry_or_exit(0, false);
        self.mark_crossings_entry_or_exit(1, true);
        let mut result = self.graph_from_intersections();

        self.difference_nonintersecting_into(&mut result);
        self.finish();
        result
    }

    pub fn xor(&mut self) -> Graph {
        // Exclusive-or is the union minus the intersection. Both partial
        // results are computed from one round of crossings; the final
        // difference runs as its own operation on the results, which is why
        // every operation has to purge its crossings when it finishes.
        self.insert_crossings();
        self.insert_self_crossings(0);
        self.insert_self_crossings(1);
        self.cleanup_crossings();

        self.mark_crossings_entry_or_exit(0, false);
        self.mark_crossings_entry_or_exit(1, false);
        let mut all_parts = self.graph_from_intersections();
        self.union_nonintersecting_into(&mut all_parts);

        self.mark_all_crossings_unprocessed();

        self.mark_crossings_entry_or_exit(0, true);
        self.mark_crossings_entry_or_exit(1, true);
        let mut intersecting_parts = self.graph_from_intersections();
        self.intersect_nonintersecting_into(&mut intersecting_parts);

        self.finish();
        all_parts.difference(&mut intersecting_parts)
    }

    // MARK: crossing arena

    fn add_crossing_pair(
        &mut self,
        intersection: &Intersection,
        edge1: EdgeRef,
        edge2: EdgeRef,
        self_crossing: bool,
        from_overlap: bool,
    ) {
        let id1 = self.crossings.len();
        let id2 = id1 + 1;
        let mut crossing1 = Crossing::new(intersection.clone(), IntersectionSide::First, edge1);
        let mut crossing2 = Crossing::new(intersection.clone(), IntersectionSide::Second, edge2);
        crossing1.counterpart = Some(id2);
        crossing2.counterpart = Some(id1);
        crossing1.self_crossing = self_crossing;
        crossing2.self_crossing = self_crossing;
        crossing1.from_overlap = from_overlap;
        crossing2.from_overlap = from_overlap;
        self.crossings.push(crossing1);
        self.crossings.push(crossing2);
        self.attach_crossing(id1);
        self.attach_crossing(id2);
    }

    // Insert the crossing into its edge's list, keeping the list sorted by
    // parameter.
    fn attach_crossing(&mut self, id: CrossingId) {
        let edge_ref = self.crossings[id].edge;
        let parameter = self.crossings[id].parameter();
        let position = {
            let list = &self.edge(edge_ref).crossings;
            list.iter()
                .position(|&other| self.crossings[other].parameter() > parameter)
                .unwrap_or(list.len())
        };
        self.edge_mut(edge_ref).crossings.insert(position, id);
    }

    // Remove the crossing from its edge's list. The counterpart stays put;
    // callers remove it explicitly to keep the pairing symmetric.
    fn detach_crossing(&mut self, id: CrossingId) {
        let edge_ref = self.crossings[id].edge;
        let list = &mut self.edge_mut(edge_ref).crossings;
        if let Some(position) = list.iter().position(|&other| other == id) {
            list.remove(position);
        }
    }

    fn detach_crossing_and_counterpart(&mut self, id: CrossingId) {
        let counterpart = self.crossings[id].counterpart;
        self.detach_crossing(id);
        if let Some(counterpart) = counterpart {
            self.detach_crossing(counterpart);
        }
    }

    fn crossing_attached(&self, id: CrossingId) -> bool {
        self.edge(self.crossings[id].edge).crossings.contains(&id)
    }

    fn first_crossing(&self, edge: EdgeRef) -> Option<CrossingId> {
        self.edge(edge).crossings.first().copied()
    }

    fn last_crossing(&self, edge: EdgeRef) -> Option<CrossingId> {
        self.edge(edge).crossings.last().copied()
    }

    fn first_nonself_crossing(&self, edge: EdgeRef) -> Option<CrossingId> {
        self.edge(edge)
            .crossings
            .iter()
            .copied()
            .find(|&id| !self.crossings[id].self_crossing)
    }

    fn last_nonself_crossing(&self, edge: EdgeRef) -> Option<CrossingId> {
        self.edge(edge)
            .crossings
            .iter()
            .rev()
            .copied()
            .find(|&id| !self.crossings[id].self_crossing)
    }

    fn edge_has_nonself_crossings(&self, edge: EdgeRef) -> bool {
        self.first_nonself_crossing(edge).is_some()
    }

    fn next_crossing_on_edge(&self, id: CrossingId) -> Option<CrossingId> {
        let list = &self.edge(self.crossings[id].edge).crossings;
        let position = list.iter().position(|&other| other == id)?;
        list.get(position + 1).copied()
    }

    fn previous_crossing_on_edge(&self, id: CrossingId) -> Option<CrossingId> {
        let list = &self.edge(self.crossings[id].edge).crossings;
        let position = list.iter().position(|&other| other == id)?;
        position.checked_sub(1).map(|p| list[p])
    }

    fn next_nonself_crossing(&self, id: CrossingId) -> Option<CrossingId> {
        let mut next = self.next_crossing_on_edge(id);
        while let Some(candidate) = next {
            if !self.crossings[candidate].self_crossing {
                return Some(candidate);
            }
            next = self.next_crossing_on_edge(candidate);
        }
        None
    }

    fn previous_nonself_crossing(&self, id: CrossingId) -> Option<CrossingId> {
        let mut previous = self.previous_crossing_on_edge(id);
        while let Some(candidate) = previous {
            if !self.crossings[candidate].self_crossing {
                return Some(candidate);
            }
            previous = self.previous_crossing_on_edge(candidate);
        }
        None
    }

    // MARK: inserting crossings

    fn insert_crossings(&mut self) {
        let our_contours = self.graph(0).contours.len();
        let their_contours = self.graph(1).contours.len();
        for our_contour in 0..our_contours {
            for their_contour in 0..their_contours {
                self.insert_crossings_between(
                    ContourRef {
                        graph: 0,
                        contour: our_contour,
                    },
                    ContourRef {
                        graph: 1,
                        contour: their_contour,
                    },
                );
            }
        }
    }

    fn insert_crossings_between(&mut self, ours: ContourRef, theirs: ContourRef) {
        let mut overlap = ContourOverlap::default();

        let our_edges = self.contour(ours).edges.len();
        let their_edges = self.contour(theirs).edges.len();
        for our_edge in 0..our_edges {
            for their_edge in 0..their_edges {
                let our_ref = EdgeRef {
                    graph: ours.graph,
                    contour: ours.contour,
                    edge: our_edge,
                };
                let their_ref = EdgeRef {
                    graph: theirs.graph,
                    contour: theirs.contour,
                    edge: their_edge,
                };
                self.insert_edge_crossings(our_ref, their_ref, Some(&mut overlap), false);
            }
        }

        // The overlapping arcs between the two contours are in; decide what
        // they mean. A complete wrap-around means the contours are the same
        // shape, resolved later by equivalence; otherwise each overlap run
        // that truly crosses contributes a single crossing at its middle.
        if !self.overlap_is_complete(&overlap) {
            let mut middles: Vec<EdgeOverlap> = Vec::new();
            for run in &overlap.runs {
                if self.run_is_crossing(run) {
                    if let Some(middle) = run.middle_overlap() {
                        middles.push(middle.clone());
                    }
                }
            }
            for middle in middles {
                let intersection = middle.range.middle_intersection();
                self.add_crossing_pair(&intersection, middle.edge1, middle.edge2, false, true);
            }
        }

        if !overlap.is_empty() {
            let index = self.overlaps.len();
            self.overlaps.push(overlap);
            self.graphs[ours.graph].contours[ours.contour]
                .overlaps
                .push(index);
            self.graphs[theirs.graph].contours[theirs.contour]
                .overlaps
                .push(index);
        }
    }

    // Find the intersections of one edge pair; record shared endpoints,
    // insert crossings for genuine crossings, and collect any overlap.
    fn insert_edge_crossings(
        &mut self,
        edge1: EdgeRef,
        edge2: EdgeRef,
        mut overlap: Option<&mut ContourOverlap>,
        self_crossing: bool,
    ) {
        let curve1 = self.edge(edge1).curve.clone();
        let curve2 = self.edge(edge2).curve.clone();
        let mut range = None;
        let mut hits: Vec<Intersection> = Vec::new();
        curve_curve_intersections(&curve1, &curve2, &mut range, |intersection, _| {
            hits.push(intersection.clone());
        });

        for intersection in hits {
            // Mark intersections landing on edge starts whether or not they
            // become crossings; later stages need to know about shared end
            // points either way.
            if intersection.at_start_of_curve1() {
                self.edge_mut(edge1).start_shared = true;
            }
            if intersection.at_stop_of_curve1() {
                let next = self.next_edge_ref(edge1);
                self.edge_mut(next).start_shared = true;
            }
            if intersection.at_start_of_curve2() {
                self.edge_mut(edge2).start_shared = true;
            }
            if intersection.at_stop_of_curve2() {
                let next = self.next_edge_ref(edge2);
                self.edge_mut(next).start_shared = true;
            }

            // Only intersections where one edge passes through the other
            // become crossings.
            let crosses = {
                let contour1 = &self.graphs[edge1.graph].contours[edge1.contour];
                let contour2 = &self.graphs[edge2.graph].contours[edge2.contour];
                intersection_crosses(
                    Some((contour1, edge1.edge)),
                    Some((contour2, edge2.edge)),
                    &intersection,
                )
            };
            if !crosses {
                continue;
            }
            self.add_crossing_pair(&intersection, edge1, edge2, self_crossing, false);
        }

        if let (Some(range), Some(overlap)) = (range, overlap.as_deref_mut()) {
            self.append_overlap(overlap, range, edge1, edge2);
        }
    }

    fn insert_self_crossings(&mut self, graph: usize) {
        let contour_count = self.graph(graph).contours.len();
        for first in (0..contour_count).rev() {
            for second in 0..first {
                let might_touch = {
                    let contours = &self.graph(graph).contours;
                    rects_might_overlap(
                        contours[first].control_bounds(),
                        contours[second].control_bounds(),
                    ) && rects_might_overlap(contours[first].bounds(), contours[second].bounds())
                };
                if !might_touch {
                    continue;
                }

                let first_edges = self.graph(graph).contours[first].edges.len();
                let second_edges = self.graph(graph).contours[second].edges.len();
                for first_edge in 0..first_edges {
                    for second_edge in 0..second_edges {
                        let first_ref = EdgeRef {
                            graph,
                            contour: first,
                            edge: first_edge,
                        };
                        let second_ref = EdgeRef {
                            graph,
                            contour: second,
                            edge: second_edge,
                        };
                        self.insert_edge_crossings(first_ref, second_ref, None, true);
                    }
                }
            }
        }

        // With the self-crossings in place, decide which contours are
        // filled regions and which are holes.
        for contour in 0..contour_count {
            let inside = self.contour_insides(graph, contour);
            self.graphs[graph].contours[contour].inside = Some(inside);
        }
    }

    // Is this contour of its own graph a filled region or a hole? Cast a
    // ray to the outside of the whole graph and count, even-odd, the other
    // contours it passes through.
    fn contour_insides(&self, graph: usize, contour: usize) -> ContourInside {
        let test_contour = ContourRef { graph, contour };
        let test_point = self.test_point_for_containment(test_contour);
        let bounds = self.graph(graph).bounds();
        let end_x = if test_point.x > bounds.x0 {
            bounds.x0 - 10.0
        } else {
            bounds.x1 + 10.0
        };
        let ray = Curve::line(test_point, Point::new(end_x, test_point.y));

        let mut count = 0;
        for other in 0..self.graph(graph).contours.len() {
            let other_ref = ContourRef {
                graph,
                contour: other,
            };
            if other == contour || self.contours_cross_each_other(other_ref, test_contour) {
                continue; // self intersections don't count here
            }
            count += self.graph(graph).contours[other].number_of_intersections_with_ray(&ray);
        }
        if count & 1 == 1 {
            ContourInside::Hole
        } else {
            ContourInside::Filled
        }
    }

    // Do the two contours of one graph cross each other (per the inserted
    // self-crossings)?
    fn contours_cross_each_other(&self, contour: ContourRef, other: ContourRef) -> bool {
        for edge in &self.contour(contour).edges {
            for &id in &edge.crossings {
                if !self.crossings[id].self_crossing {
                    continue;
                }
                if let Some(counterpart) = self.crossings[id].counterpart {
                    if self.crossings[counterpart].edge.contour_ref() == other {
                        return true;
                    }
                }
            }
        }
        false
    }

    // MARK: overlaps

    fn append_overlap(
        &self,
        overlap: &mut ContourOverlap,
        range: crate::IntersectRange,
        edge1: EdgeRef,
        edge2: EdgeRef,
    ) {
        let edge_overlap = EdgeOverlap {
            edge1,
            edge2,
            range,
        };
        let create_new_run = if overlap.runs.is_empty() {
            true
        } else if overlap.runs.len() == 1 {
            !self.insert_overlap_into_run(overlap.runs.last_mut().unwrap(), &edge_overlap)
        } else {
            let inserted = self.insert_overlap_into_run(overlap.runs.last_mut().unwrap(), &edge_overlap)
                || self.insert_overlap_into_run(overlap.runs.first_mut().unwrap(), &edge_overlap);
            !inserted
        };
        if create_new_run {
            let mut run = EdgeOverlapRun::default();
            run.overlaps.push(edge_overlap);
            overlap.runs.push(run);
        }
    }

    fn insert_overlap_into_run(&self, run: &mut EdgeOverlapRun, overlap: &EdgeOverlap) -> bool {
        if run.overlaps.is_empty() {
            run.overlaps.push(overlap.clone());
            return true;
        }
        if self.overlap_fits_before(run.overlaps.last().unwrap(), overlap) {
            run.overlaps.push(overlap.clone());
            return true;
        }
        if self.overlap_fits_before(overlap, run.overlaps.first().unwrap()) {
            run.overlaps.insert(0, overlap.clone());
            return true;
        }
        false
    }

    // Does `next` continue the shared arc right after `overlap`? Either
    // they abut on the same edge, or `overlap` runs to the end of its edge
    // and `next` starts at the beginning of the successor edge.
    fn overlap_fits_before(&self, overlap: &EdgeOverlap, next: &EdgeOverlap) -> bool {
        let range1 = overlap.range.parameter_range1();
        if values_close_with_options(range1.maximum, 1.0, OVERLAP_CLOSE) {
            let next_edge = self.next_edge_ref(overlap.edge1);
            next.edge1 == next_edge
                && values_close_with_options(
                    next.range.parameter_range1().minimum,
                    0.0,
                    OVERLAP_CLOSE,
                )
        } else {
            next.edge1 == overlap.edge1
                && values_close_with_options(
                    next.range.parameter_range1().minimum,
                    range1.maximum,
                    OVERLAP_CLOSE,
                )
        }
    }

    fn run_is_complete(&self, run: &EdgeOverlapRun) -> bool {
        match (run.overlaps.last(), run.overlaps.first()) {
            (Some(last), Some(first)) => self.overlap_fits_before(last, first),
            _ => false,
        }
    }

    fn overlap_is_complete(&self, overlap: &ContourOverlap) -> bool {
        // To be complete there must be exactly one run, wrapping all the
        // way around both contours.
        overlap.runs.len() == 1 && self.run_is_complete(&overlap.runs[0])
    }

    fn contours_equivalent(&self, contour1: ContourRef, contour2: ContourRef) -> bool {
        self.contour(contour1).overlaps.iter().any(|&index| {
            let overlap = &self.overlaps[index];
            overlap.is_between(contour1, contour2) && self.overlap_is_complete(overlap)
        })
    }

    // Does the shared arc of this run actually pass one contour through the
    // other? The tangents moving away from the two ends of the run must
    // interleave; failing a tangent verdict, points probed just outside the
    // ends of the arc on contour 1 must differ in containment by contour 2.
    fn run_is_crossing(&self, run: &EdgeOverlapRun) -> bool {
        let (first, last) = match (run.overlaps.first(), run.overlaps.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return false,
        };

        let mut offset = 0.0;
        let (mut tangents1, mut tangents2);
        loop {
            let (t1, length1) = self.run_edge1_tangents(first, last, offset);
            let (t2, length2) = self.run_edge2_tangents(first, last, offset);
            tangents1 = t1;
            tangents2 = t2;
            let max_offset = length1.min(length2);
            offset += 1.0;
            if !(tangents_ambiguous(tangents1, tangents2) && offset < max_offset) {
                break;
            }
        }

        if tangents_cross(tangents1, tangents2) {
            return true;
        }

        // Tangents mostly work for overlaps: a yes is solid, but a no can
        // still be a crossing. The only way to tell is an actual point test.
        let probes = self.run_edge1_probe_points(first, last, 1.0);
        let contour2 = self.contour(first.edge2.contour_ref());
        contour2.contains_point(probes[0]) != contour2.contains_point(probes[1])
    }

    // Tangents moving away from the two ends of a run on the first
    // contour's side: before the start of the first overlap and after the
    // end of the last.
    fn run_edge1_tangents(
        &self,
        first: &EdgeOverlap,
        last: &EdgeOverlap,
        offset: f64,
    ) -> ([Vec2; 2], f64) {
        let mut tangents = [Vec2::ZERO; 2];
        let first_length;
        let last_length;
        if first.range.at_start_of_curve1() {
            let other = self.previous_nonpoint_curve(first.edge1);
            tangents[0] = other.tangent_from_right_offset(offset);
            first_length = other.length();
        } else {
            let left = first.range.curve1_left_bezier();
            tangents[0] = left.tangent_from_right_offset(offset);
            first_length = left.length();
        }
        if last.range.at_stop_of_curve1() {
            let other = self.next_nonpoint_curve(last.edge1);
            tangents[1] = other.tangent_from_left_offset(offset);
            last_length = other.length();
        } else {
            let right = last.range.curve1_right_bezier();
            tangents[1] = right.tangent_from_left_offset(offset);
            last_length = right.length();
        }
        (tangents, first_length.min(last_length))
    }

    // The same on the second contour's side, which traverses the arc
    // backwards when the overlap is reversed.
    fn run_edge2_tangents(
        &self,
        first: &EdgeOverlap,
        last: &EdgeOverlap,
        offset: f64,
    ) -> ([Vec2; 2], f64) {
        let mut tangents = [Vec2::ZERO; 2];
        let first_length;
        let last_length;
        if !first.range.reversed() {
            if first.range.at_start_of_curve2() {
                let other = self.previous_nonpoint_curve(first.edge2);
                tangents[0] = other.tangent_from_right_offset(offset);
                first_length = other.length();
            } else {
                let left = first.range.curve2_left_bezier();
                tangents[0] = left.tangent_from_right_offset(offset);
                first_length = left.length();
            }
            if last.range.at_stop_of_curve2() {
                let other = self.next_nonpoint_curve(last.edge2);
                tangents[1] = other.tangent_from_left_offset(offset);
                last_length = other.length();
            } else {
                let right = last.range.curve2_right_bezier();
                tangents[1] = right.tangent_from_left_offset(offset);
                last_length = right.length();
            }
        } else {
            if first.range.at_stop_of_curve2() {
                let other = self.next_nonpoint_curve(first.edge2);
                tangents[0] = other.tangent_from_left_offset(offset);
                first_length = other.length();
            } else {
                let right = first.range.curve2_right_bezier();
                tangents[0] = right.tangent_from_left_offset(offset);
                first_length = right.length();
            }
            if last.range.at_start_of_curve2() {
                let other = self.previous_nonpoint_curve(last.edge2);
                tangents[1] = other.tangent_from_right_offset(offset);
                last_length = other.length();
            } else {
                let left = last.range.curve2_left_bezier();
                tangents[1] = left.tangent_from_right_offset(offset);
                last_length = left.length();
            }
        }
        (tangents, first_length.min(last_length))
    }

    fn run_edge1_probe_points(
        &self,
        first: &EdgeOverlap,
        last: &EdgeOverlap,
        offset: f64,
    ) -> [Point; 2] {
        let before = if first.range.at_start_of_curve1() {
            self.previous_nonpoint_curve(first.edge1)
                .point_from_right_offset(offset)
        } else {
            first
                .range
                .curve1_left_bezier()
                .point_from_right_offset(offset)
        };
        let after = if last.range.at_stop_of_curve1() {
            self.next_nonpoint_curve(last.edge1)
                .point_from_left_offset(offset)
        } else {
            last.range
                .curve1_right_bezier()
                .point_from_left_offset(offset)
        };
        [before, after]
    }

    fn previous_nonpoint_curve(&self, edge: EdgeRef) -> &Curve {
        let contour = self.contour(edge.contour_ref());
        &contour.edges[contour.previous_nonpoint_index(edge.edge)].curve
    }

    fn next_nonpoint_curve(&self, edge: EdgeRef) -> &Curve {
        let contour = self.contour(edge.contour_ref());
        &contour.edges[contour.next_nonpoint_index(edge.edge)].curve
    }

    fn run_contains_parameter(&self, run: &EdgeOverlapRun, parameter: f64, edge: EdgeRef) -> bool {
        if run.overlaps.is_empty() {
            return false;
        }
        let position = match run
            .overlaps
            .iter()
            .position(|overlap| overlap.edge1 == edge || overlap.edge2 == edge)
        {
            Some(position) => position,
            None => return false, // the edge isn't part of this run at all
        };
        let containing = &run.overlaps[position];
        let wraps = self.run_is_complete(run);

        let at_the_start = position == 0;
        let extends_before_start = !at_the_start || wraps;
        let at_the_end = position == run.overlaps.len() - 1;
        let extends_after_end = !at_the_end || wraps;

        if extends_before_start && extends_after_end {
            // The overlap extends past this edge in both directions, so any
            // parameter on the edge is inside it.
            return true;
        }

        let range = if containing.edge1 == edge {
            containing.range.parameter_range1()
        } else {
            containing.range.parameter_range2()
        };
        let in_left_side = if extends_before_start {
            parameter >= 0.0
        } else {
            parameter > range.minimum
        };
        let in_right_side = if extends_after_end {
            parameter <= 1.0
        } else {
            parameter < range.maximum
        };
        in_left_side && in_right_side
    }

    fn does_overlap_contain_parameter(
        &self,
        contour: ContourRef,
        parameter: f64,
        edge: EdgeRef,
    ) -> bool {
        self.contour(contour).overlaps.iter().any(|&index| {
            self.overlaps[index]
                .runs
                .iter()
                .any(|run| self.run_contains_parameter(run, parameter, edge))
        })
    }

    // MARK: cleanup

    fn cleanup_crossings(&mut self) {
        self.remove_duplicate_crossings(0);
        self.remove_duplicate_crossings(1);
        self.remove_crossings_in_overlaps(0);
        self.remove_crossings_in_overlaps(1);
    }

    // A crossing at the very start of an edge describes the same joint as a
    // crossing at the very end of the previous edge; keep only the one at
    // the end.
    fn remove_duplicate_crossings(&mut self, graph: usize) {
        for contour in 0..self.graph(graph).contours.len() {
            for edge in 0..self.graph(graph).contours[contour].edges.len() {
                let edge_ref = EdgeRef {
                    graph,
                    contour,
                    edge,
                };
                let ids = self.edge(edge_ref).crossings.clone();
                for id in ids {
                    if !self.crossing_attached(id) {
                        continue;
                    }
                    if self.crossings[id].is_at_start() {
                        let previous = self.previous_edge_ref(edge_ref);
                        if let Some(last) = self.last_crossing(previous) {
                            if last != id && self.crossings[last].is_at_end() {
                                self.detach_crossing_and_counterpart(id);
                                continue;
                            }
                        }
                    }
                    if self.crossings[id].is_at_end() {
                        let next = self.next_edge_ref(edge_ref);
                        if let Some(first) = self.first_crossing(next) {
                            if first != id && self.crossings[first].is_at_start() {
                                self.detach_crossing_and_counterpart(first);
                            }
                        }
                    }
                }
            }
        }
    }

    // Crossings inside the span of an overlap run are artifacts of the two
    // contours tracing the same arc; only the run's own middle crossing may
    // stay.
    fn remove_crossings_in_overlaps(&mut self, graph: usize) {
        for contour in 0..self.graph(graph).contours.len() {
            let contour_ref = ContourRef { graph, contour };
            for edge in 0..self.graph(graph).contours[contour].edges.len() {
                let edge_ref = EdgeRef {
                    graph,
                    contour,
                    edge,
                };
                let ids = self.edge(edge_ref).crossings.clone();
                for id in ids {
                    if self.crossings[id].from_overlap || !self.crossing_attached(id) {
                        continue;
                    }
                    let parameter = self.crossings[id].parameter();
                    if self.does_overlap_contain_parameter(contour_ref, parameter, edge_ref) {
                        self.detach_crossing_and_counterpart(id);
                    }
                }
            }
        }
    }

    // MARK: entry/exit marking

    fn mark_crossings_entry_or_exit(&mut self, graph: usize, mark_inside: bool) {
        for contour in 0..self.graph(graph).contours.len() {
            let ours = ContourRef { graph, contour };
            for other in self.intersecting_contours(ours) {
                // A hole flips what inside means: unioning against a hole
                // cuts into it, so the inside of the hole is what survives.
                let mark = if self.contour(other).inside == Some(ContourInside::Hole) {
                    !mark_inside
                } else {
                    mark_inside
                };
                self.mark_crossings_with_contour(ours, other, mark);
            }
        }
    }

    // The contours of the other graph this contour has crossings with.
    fn intersecting_contours(&self, contour: ContourRef) -> Vec<ContourRef> {
        let mut result = Vec::new();
        for edge in &self.contour(contour).edges {
            for &id in &edge.crossings {
                if self.crossings[id].self_crossing {
                    continue;
                }
                if let Some(counterpart) = self.crossings[id].counterpart {
                    let other = self.crossings[counterpart].edge.contour_ref();
                    if !result.contains(&other) {
                        result.push(other);
                    }
                }
            }
        }
        result
    }

    // The contours of the same graph connected to this one through
    // self-crossings, transitively.
    fn self_intersecting_contours(&self, contour: ContourRef) -> Vec<ContourRef> {
        let mut result = Vec::new();
        let mut pending = vec![contour];
        while let Some(current) = pending.pop() {
            for edge in &self.contour(current).edges {
                for &id in &edge.crossings {
                    if !self.crossings[id].self_crossing {
                        continue;
                    }
                    if let Some(counterpart) = self.crossings[id].counterpart {
                        let other = self.crossings[counterpart].edge.contour_ref();
                        if other != contour && !result.contains(&other) {
                            result.push(other);
                            pending.push(other);
                        }
                    }
                }
            }
        }
        result
    }

    fn contour_and_self_intersecting_contours_contain_point(
        &self,
        contour: ContourRef,
        point: Point,
    ) -> bool {
        let mut containers = 0;
        if self.contour(contour).contains_point(point) {
            containers += 1;
        }
        for other in self.self_intersecting_contours(contour) {
            if self.contour(other).contains_point(point) {
                containers += 1;
            }
        }
        containers & 1 == 1
    }

    // A starting spot for marking: an edge start that isn't shared with the
    // other contour, or failing that a mid-edge parameter outside any
    // overlap.
    fn starting_edge(&self, contour_ref: ContourRef) -> (usize, Point, f64) {
        let contour = self.contour(contour_ref);
        if contour.edges.is_empty() {
            return (0, Point::ZERO, 0.0);
        }
        let start = contour.start_edge_index();
        if !contour.edges[start].start_shared {
            return (start, contour.edges[start].curve.start(), 0.0);
        }

        // Every endpoint is shared, so pick a point on an edge that isn't
        // overlapping.
        let parameter = 0.5;
        let mut index = start;
        loop {
            let edge_ref = EdgeRef {
                graph: contour_ref.graph,
                contour: contour_ref.contour,
                edge: index,
            };
            if !self.does_overlap_contain_parameter(contour_ref, parameter, edge_ref) {
                break;
            }
            index = contour.next_index(index);
            if index == start {
                break; // nowhere is safe; settle for where we are
            }
        }
        (index, contour.edges[index].curve.eval(parameter), parameter)
    }

    pub(crate) fn test_point_for_containment(&self, contour_ref: ContourRef) -> Point {
        let (_, point, _) = self.starting_edge(contour_ref);
        point
    }

    fn mark_crossings_with_contour(
        &mut self,
        ours: ContourRef,
        other: ContourRef,
        mark_inside: bool,
    ) {
        // Start from a point that is unambiguously inside or outside the
        // other contour, otherwise every crossing could get marked exactly
        // backwards.
        let (start_edge, start_point, start_parameter) = self.starting_edge(ours);

        let contains =
            self.contour_and_self_intersecting_contours_contain_point(other, start_point);
        let mut entry = if mark_inside { !contains } else { contains };

        let mut other_contours = self.self_intersecting_contours(other);
        other_contours.push(other);

        let edge_count = self.contour(ours).edges.len();
        let edge_ref = |index: usize| EdgeRef {
            graph: ours.graph,
            contour: ours.contour,
            edge: index,
        };

        entry = self.mark_crossings_on_edge(
            edge_ref(start_edge),
            start_parameter,
            STOP_PARAMETER_NO_LIMIT,
            &other_contours,
            entry,
        );
        let mut index = (start_edge + 1) % edge_count;
        while index != start_edge {
            entry = self.mark_crossings_on_edge(
                edge_ref(index),
                START_PARAMETER_NO_LIMIT,
                STOP_PARAMETER_NO_LIMIT,
                &other_contours,
                entry,
            );
            index = (index + 1) % edge_count;
        }
        self.mark_crossings_on_edge(
            edge_ref(start_edge),
            START_PARAMETER_NO_LIMIT,
            start_parameter,
            &other_contours,
            entry,
        );
    }

    fn mark_crossings_on_edge(
        &mut self,
        edge: EdgeRef,
        start_parameter: f64,
        stop_parameter: f64,
        other_contours: &[ContourRef],
        start_entry: bool,
    ) -> bool {
        let mut entry = start_entry;
        let ids = self.edge(edge).crossings.clone();
        for id in ids {
            let (self_crossing, parameter, counterpart) = {
                let crossing = &self.crossings[id];
                (crossing.self_crossing, crossing.parameter(), crossing.counterpart)
            };
            if self_crossing {
                continue;
            }
            let counterpart_contour = match counterpart {
                Some(counterpart) => self.crossings[counterpart].edge.contour_ref(),
                None => continue,
            };
            if !other_contours.contains(&counterpart_contour) {
                continue; // a crossing with some other contour entirely
            }
            if parameter < start_parameter || parameter >= stop_parameter {
                continue;
            }
            self.crossings[id].entry = entry;
            entry = !entry;
        }
        entry
    }

    // MARK: stitching the result

    fn mark_all_crossings_unprocessed(&mut self) {
        for crossing in &mut self.crossings {
            crossing.processed = false;
        }
    }

    fn first_unprocessed_crossing(&self) -> Option<CrossingId> {
        for contour in &self.graph(0).contours {
            for edge in &contour.edges {
                for &id in &edge.crossings {
                    let crossing = &self.crossings[id];
                    if !crossing.self_crossing && !crossing.processed {
                        return Some(id);
                    }
                }
            }
        }
        None
    }

    // Walk the marked crossings and output the contours of the parts of the
    // graphs that intersect. Starting at an unprocessed crossing: an entry
    // crossing walks the contour forward to the next crossing, an exit
    // crossing walks backward emitting reversed curves; then hop to the
    // counterpart in the other graph and continue until we come around to a
    // crossing we've already seen.
    fn graph_from_intersections(&mut self) -> Graph {
        let mut result = Graph::new();

        while let Some(start) = self.first_unprocessed_crossing() {
            let mut contour = Contour::new();
            let mut crossing_id = start;

            while !self.crossings[crossing_id].processed {
                self.crossings[crossing_id].processed = true;

                if self.crossings[crossing_id].entry {
                    match self.next_nonself_crossing(crossing_id) {
                        Some(next) => {
                            let piece = self.curve_between(crossing_id, next);
                            contour.add_curve(piece);
                            crossing_id = next;
                        }
                        None => {
                            // No further crossing on this edge: emit the
                            // rest of it, then whole edges until one with a
                            // crossing comes up.
                            if let Some(piece) = self.crossings[crossing_id].right_curve() {
                                contour.add_curve(piece);
                            }
                            let mut edge = self.next_edge_ref(self.crossings[crossing_id].edge);
                            while !self.edge_has_nonself_crossings(edge) {
                                contour.add_curve(self.edge(edge).curve.clone());
                                edge = self.next_edge_ref(edge);
                            }
                            crossing_id = match self.first_nonself_crossing(edge) {
                                Some(id) => id,
                                None => break,
                            };
                            if let Some(piece) = self.crossings[crossing_id].left_curve() {
                                contour.add_curve(piece);
                            }
                        }
                    }
                } else {
                    match self.previous_nonself_crossing(crossing_id) {
                        Some(previous) => {
                            let piece = self.curve_between(previous, crossing_id);
                            contour.add_reverse_curve(&piece);
                            crossing_id = previous;
                        }
                        None => {
                            if let Some(piece) = self.crossings[crossing_id].left_curve() {
                                contour.add_reverse_curve(&piece);
                            }
                            let mut edge = self.previous_edge_ref(self.crossings[crossing_id].edge);
                            while !self.edge_has_nonself_crossings(edge) {
                                let whole = self.edge(edge).curve.clone();
                                contour.add_reverse_curve(&whole);
                                edge = self.previous_edge_ref(edge);
                            }
                            crossing_id = match self.last_nonself_crossing(edge) {
                                Some(id) => id,
                                None => break,
                            };
                            if let Some(piece) = self.crossings[crossing_id].right_curve() {
                                contour.add_reverse_curve(&piece);
                            }
                        }
                    }
                }

                // Hop over to the other graph and keep walking there.
                self.crossings[crossing_id].processed = true;
                crossing_id = match self.crossings[crossing_id].counterpart {
                    Some(counterpart) => counterpart,
                    None => break,
                };
            }

            if !contour.is_empty() {
                result.add_contour(contour);
            }
        }

        result
    }

    // The piece of an edge between two of its crossings.
    fn curve_between(&self, from: CrossingId, to: CrossingId) -> Curve {
        let edge_curve = &self.edge(self.crossings[from].edge).curve;
        edge_curve.subcurve(ParamRange::new(
            self.crossings[from].parameter(),
            self.crossings[to].parameter(),
        ))
    }

    // MARK: contours that cross nothing

    fn nonintersecting_contours(&self, graph: usize) -> Vec<ContourRef> {
        (0..self.graph(graph).contours.len())
            .map(|contour| ContourRef { graph, contour })
            .filter(|&contour| self.intersecting_contours(contour).is_empty())
            .collect()
    }

    fn clone_contour(&self, contour: ContourRef) -> Contour {
        let source = self.contour(contour);
        let mut clone = Contour::new();
        for edge in &source.edges {
            clone.add_curve(edge.curve.clone());
        }
        clone.inside = source.inside;
        clone
    }

    fn union_nonintersecting_into(&self, result: &mut Graph) {
        let mut ours = self.nonintersecting_contours(0);
        let mut theirs = self.nonintersecting_contours(1);
        let mut finals: Vec<ContourRef> = ours.iter().chain(theirs.iter()).copied().collect();
        self.union_equivalent_contours(&mut ours, &mut theirs, &mut finals);

        // Everything survives a union unless another contour swallows it.
        for &contour in &ours {
            if self.contains_contour(1, contour) {
                finals.retain(|&c| c != contour);
            }
        }
        for &contour in &theirs {
            if self.contains_contour(0, contour) {
                finals.retain(|&c| c != contour);
            }
        }
        for contour in finals {
            result.add_contour(self.clone_contour(contour));
        }
    }

    fn union_equivalent_contours(
        &self,
        ours: &mut Vec<ContourRef>,
        theirs: &mut Vec<ContourRef>,
        finals: &mut Vec<ContourRef>,
    ) {
        let mut our_index = 0;
        while our_index < ours.len() {
            let our_contour = ours[our_index];
            let mut advanced = true;
            for their_index in 0..theirs.len() {
                let their_contour = theirs[their_index];
                if !self.contours_equivalent(our_contour, their_contour) {
                    continue;
                }
                if self.contour(our_contour).inside == self.contour(their_contour).inside {
                    // Redundant copies; drop one.
                    finals.retain(|&c| c != their_contour);
                } else {
                    // A hole and a fill cancel each other out.
                    finals.retain(|&c| c != their_contour && c != our_contour);
                }
                theirs.remove(their_index);
                ours.remove(our_index);
                advanced = false;
                break;
            }
            if advanced {
                our_index += 1;
            }
        }
    }

    fn intersect_nonintersecting_into(&self, result: &mut Graph) {
        let mut ours = self.nonintersecting_contours(0);
        let mut theirs = self.nonintersecting_contours(1);
        let mut finals: Vec<ContourRef> = Vec::new();
        self.intersect_equivalent_contours(&mut ours, &mut theirs, &mut finals);

        // Most non-crossing contours won't make it; only the ones inside
        // the other graph do.
        for &contour in &ours {
            if self.contains_contour(1, contour) {
                finals.push(contour);
            }
        }
        for &contour in &theirs {
            if self.contains_contour(0, contour) {
                finals.push(contour);
            }
        }
        for contour in finals {
            result.add_contour(self.clone_contour(contour));
        }
    }

    fn intersect_equivalent_contours(
        &self,
        ours: &mut Vec<ContourRef>,
        theirs: &mut Vec<ContourRef>,
        finals: &mut Vec<ContourRef>,
    ) {
        let mut our_index = 0;
        while our_index < ours.len() {
            let our_contour = ours[our_index];
            let mut advanced = true;
            for their_index in 0..theirs.len() {
                let their_contour = theirs[their_index];
                if !self.contours_equivalent(our_contour, their_contour) {
                    continue;
                }
                if self.contour(our_contour).inside == self.contour(their_contour).inside {
                    finals.push(our_contour);
                } else if self.contour(their_contour).inside == Some(ContourInside::Hole) {
                    // The hole cancels the fill; keep the hole.
                    finals.push(their_contour);
                } else {
                    finals.push(our_contour);
                }
                theirs.remove(their_index);
                ours.remove(our_index);
                advanced = false;
                break;
            }
            if advanced {
                our_index += 1;
            }
        }
    }

    fn difference_nonintersecting_into(&self, result: &mut Graph) {
        let mut ours = self.nonintersecting_contours(0);
        let mut theirs = self.nonintersecting_contours(1);
        let mut finals: Vec<ContourRef> = Vec::new();
        self.difference_equivalent_contours(&mut ours, &mut theirs, &mut finals);

        // Ours stay unless subtracted away; theirs only appear as holes
        // punched into us.
        for &contour in &ours {
            if !self.contains_contour(1, contour) {
                finals.push(contour);
            }
        }
        for &contour in &theirs {
            if self.contains_contour(0, contour) {
                finals.push(contour);
            }
        }
        for contour in finals {
            result.add_contour(self.clone_contour(contour));
        }
    }

    fn difference_equivalent_contours(
        &self,
        ours: &mut Vec<ContourRef>,
        theirs: &mut Vec<ContourRef>,
        finals: &mut Vec<ContourRef>,
    ) {
        let mut our_index = 0;
        while our_index < ours.len() {
            let our_contour = ours[our_index];
            let mut advanced = true;
            for their_index in 0..theirs.len() {
                let their_contour = theirs[their_index];
                if !self.contours_equivalent(our_contour, their_contour) {
                    continue;
                }
                let our_inside = self.contour(our_contour).inside;
                let their_inside = self.contour(their_contour).inside;
                if our_inside != their_inside {
                    // Subtracting a hole from a fill (or vice versa) does
                    // nothing.
                    finals.push(our_contour);
                } else if our_inside == Some(ContourInside::Hole) {
                    // Subtracting a hole from a hole is redundant.
                    finals.push(our_contour);
                }
                // Two fills annihilate; add neither.
                theirs.remove(their_index);
                ours.remove(our_index);
                advanced = false;
                break;
            }
            if advanced {
                our_index += 1;
            }
        }
    }

    // MARK: containment of whole contours

    // Which contour of the graph, if any, contains the test contour? Rays
    // are cast at ever finer subdivisions of the test contour, in both
    // directions, eliminating candidates by even-odd counts on either side
    // of the test contour, until at most one candidate survives. Rays that
    // graze a joint are inconclusive and simply retried elsewhere.
    fn contains_contour(&self, graph: usize, test: ContourRef) -> bool {
        let test_bounds = self.contour(test).bounds();
        if !rects_might_overlap(self.graph(graph).bounds(), test_bounds) {
            return false;
        }

        let mut containers: Vec<usize> = (0..self.graph(graph).contours.len()).collect();
        if containers.is_empty() {
            return false;
        }

        let count = test_bounds
            .width()
            .ceil()
            .max(test_bounds.height().ceil())
            .max(1.0) as usize;
        let graph_bounds = self.graph(graph).bounds();
        for fraction in 2..=(count * 2) {
            let mut did_eliminate = false;

            let vertical_spacing = test_bounds.height() / fraction as f64;
            if vertical_spacing > 0.0 {
                let mut y = test_bounds.y0 + vertical_spacing;
                while y < test_bounds.y1 {
                    let ray = Curve::line(
                        Point::new(graph_bounds.x0.min(test_bounds.x0) - RAY_OVERLAP, y),
                        Point::new(graph_bounds.x1.max(test_bounds.x1) + RAY_OVERLAP, y),
                    );
                    if self.eliminate_containers(&mut containers, graph, test, &ray) {
                        did_eliminate = true;
                    }
                    y += vertical_spacing;
                }
            }

            let horizontal_spacing = test_bounds.width() / fraction as f64;
            if horizontal_spacing > 0.0 {
                let mut x = test_bounds.x0 + horizontal_spacing;
                while x < test_bounds.x1 {
                    let ray = Curve::line(
                        Point::new(x, graph_bounds.y0.min(test_bounds.y0) - RAY_OVERLAP),
                        Point::new(x, graph_bounds.y1.max(test_bounds.y1) + RAY_OVERLAP),
                    );
                    if self.eliminate_containers(&mut containers, graph, test, &ray) {
                        did_eliminate = true;
                    }
                    x += horizontal_spacing;
                }
            }

            if containers.is_empty() {
                return false;
            }
            if did_eliminate {
                return containers.len() & 1 == 1;
            }
        }

        // Every ray grazed some joint or shared edge; the most likely
        // reason is that a container is the same shape as the test contour,
        // and equal doesn't contain.
        false
    }

    // One ray's worth of elimination. Returns false when the ray was
    // inconclusive (no hits on the test contour, or a graze of a joint).
    fn eliminate_containers(
        &self,
        containers: &mut Vec<usize>,
        graph: usize,
        test: ContourRef,
        ray: &Curve,
    ) -> bool {
        let (test_minimum, test_maximum) = match self.find_ray_bounds(test, ray) {
            Some(bounds) => bounds,
            None => return false,
        };

        let (mut before, mut after) =
            match self.find_crossings_on_containers(graph, containers, ray, test_minimum, test_maximum) {
                Some(crossings) => crossings,
                None => return false,
            };

        // Contours hit an even number of times on a side can't contain the
        // test contour; contours appearing on only one side can't either.
        prune_even_counts(&mut before);
        prune_even_counts(&mut after);
        let before_contours: Vec<usize> = before.iter().map(|hit| hit.contour).collect();
        let after_contours: Vec<usize> = after.iter().map(|hit| hit.contour).collect();
        before.retain(|hit| after_contours.contains(&hit.contour));
        after.retain(|hit| before_contours.contains(&hit.contour));

        // Both sides hold the same contours now; either works.
        containers.clear();
        for hit in &before {
            if !containers.contains(&hit.contour) {
                containers.push(hit.contour);
            }
        }
        true
    }

    // Where the ray enters and leaves the test contour: for a horizontal
    // ray the hits with the smallest and largest x, for a vertical ray y.
    fn find_ray_bounds(&self, test: ContourRef, ray: &Curve) -> Option<(Point, Point)> {
        let horizontal = ray.start().y == ray.end().y;

        let mut hits: Vec<Point> = Vec::new();
        for edge in &self.contour(test).edges {
            let mut overlap = None;
            curve_curve_intersections(ray, &edge.curve, &mut overlap, |intersection, _| {
                hits.push(intersection.location());
            });
        }
        let first = *hits.first()?;
        let mut minimum = first;
        let mut maximum = first;
        for hit in hits {
            if horizontal {
                if hit.x < minimum.x {
                    minimum = hit;
                }
                if hit.x > maximum.x {
                    maximum = hit;
                }
            } else {
                if hit.y < minimum.y {
                    minimum = hit;
                }
                if hit.y > maximum.y {
                    maximum = hit;
                }
            }
        }
        Some((minimum, maximum))
    }

    // The candidates' crossings with the ray, sorted to the near or far
    // side of the test contour. `None` when a graze makes the ray useless.
    fn find_crossings_on_containers(
        &self,
        graph: usize,
        containers: &[usize],
        ray: &Curve,
        test_minimum: Point,
        test_maximum: Point,
    ) -> Option<(Vec<RayHit>, Vec<RayHit>)> {
        let horizontal = ray.start().y == ray.end().y;

        let mut before: Vec<RayHit> = Vec::new();
        let mut after: Vec<RayHit> = Vec::new();
        let mut ambiguous: Vec<RayHit> = Vec::new();

        for &container in containers {
            for edge in &self.graph(graph).contours[container].edges {
                let mut overlap = None;
                let mut hits: Vec<Intersection> = Vec::new();
                curve_curve_intersections(ray, &edge.curve, &mut overlap, |intersection, _| {
                    hits.push(intersection.clone());
                });
                for intersection in hits {
                    if intersection.is_tangent() {
                        continue; // tangents don't count
                    }
                    // Hitting a joint between edges makes the even-odd
                    // count unreliable; give up on this ray.
                    if intersection.at_end_point_of_curve2() {
                        return None;
                    }

                    let location = intersection.location();
                    let (coordinate, minimum, maximum) = if horizontal {
                        (location.x, test_minimum.x, test_maximum.x)
                    } else {
                        (location.y, test_minimum.y, test_maximum.y)
                    };

                    // Only hits at or beyond the test contour's extent
                    // matter.
                    if value_less_than(coordinate, maximum) && value_greater_than(coordinate, minimum)
                    {
                        continue;
                    }

                    let hit = RayHit {
                        contour: container,
                        location,
                    };

                    // When the test bounds collapse to a point and the hit
                    // is exactly there, it could belong to either side;
                    // remember it and balance the sides afterwards.
                    if test_minimum == test_maximum && location == test_minimum {
                        ambiguous.push(hit);
                        continue;
                    }

                    if value_less_than_equal(coordinate, minimum) {
                        before.push(hit);
                    }
                    if value_greater_than_equal(coordinate, maximum) {
                        after.push(hit);
                    }
                }
            }
        }

        for hit in ambiguous {
            let before_count = before.iter().filter(|h| h.contour == hit.contour).count();
            let after_count = after.iter().filter(|h| h.contour == hit.contour).count();
            if before_count < after_count {
                before.push(hit);
            } else {
                after.push(hit);
            }
        }

        Some((before, after))
    }

    // MARK: teardown

    // Crossings only make sense for one specific pairing of graphs; purge
    // everything so both graphs can be used again.
    fn finish(&mut self) {
        for graph in self.graphs.iter_mut() {
            for contour in graph.contours.iter_mut() {
                contour.overlaps.clear();
                for edge in contour.edges.iter_mut() {
                    edge.crossings.clear();
                    edge.start_shared = false;
                }
            }
        }
        self.crossings.clear();
        self.overlaps.clear();
    }
}

// Drop the hits of every contour that appears an even number of times; by
// the even-odd rule those contours can't contain the test contour.
fn prune_even_counts(hits: &mut Vec<RayHit>) {
    let snapshot: Vec<usize> = hits.iter().map(|hit| hit.contour).collect();
    hits.retain(|hit| snapshot.iter().filter(|&&c| c == hit.contour).count() % 2 == 1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Path, Rect};

    fn rect_graph(x0: f64, y0: f64, x1: f64, y1: f64) -> Graph {
        Graph::from_path(&Path::rect(Rect::new(x0, y0, x1, y1)))
    }

    #[test]
    fn crossings_inserted_for_overlapping_rects() {
        let mut a = rect_graph(0., 0., 100., 100.);
        let mut b = rect_graph(50., 50., 150., 150.);
        let mut workspace = OpWorkspace::new(&mut a, &mut b);
        workspace.insert_crossings();
        workspace.insert_self_crossings(0);
        workspace.insert_self_crossings(1);
        workspace.cleanup_crossings();

        let mut attached = 0;
        for graph in 0..2 {
            for contour in &workspace.graph(graph).contours {
                for edge in &contour.edges {
                    attached += edge.crossings.len();
                }
            }
        }
        // Two genuine crossings, each marked on both graphs.
        assert_eq!(attached, 4);
    }

    #[test]
    fn no_crossings_for_touching_rects() {
        let mut a = rect_graph(0., 0., 100., 100.);
        let mut b = rect_graph(100., 0., 200., 100.);
        let mut workspace = OpWorkspace::new(&mut a, &mut b);
        workspace.insert_crossings();
        workspace.cleanup_crossings();

        for graph in 0..2 {
            for contour in &workspace.graph(graph).contours {
                for edge in &contour.edges {
                    assert!(edge.crossings.is_empty());
                }
            }
        }
        // The shared edge is recorded as an overlap instead.
        assert_eq!(workspace.overlaps.len(), 1);
    }

    #[test]
    fn insides_of_rect_with_hole() {
        let mut path = Path::rect(Rect::new(0., 0., 100., 100.));
        path.append(&Path::rect(Rect::new(25., 25., 75., 75.)));
        let mut a = Graph::from_path(&path);
        let mut b = Graph::new();
        let mut workspace = OpWorkspace::new(&mut a, &mut b);
        workspace.insert_self_crossings(0);
        assert_eq!(
            workspace.graph(0).contours[0].inside(),
            Some(ContourInside::Filled)
        );
        assert_eq!(
            workspace.graph(0).contours[1].inside(),
            Some(ContourInside::Hole)
        );
    }

    #[test]
    fn contains_contour_detects_nesting() {
        let mut outer = rect_graph(0., 0., 100., 100.);
        let mut inner = rect_graph(25., 25., 75., 75.);
        let mut workspace = OpWorkspace::new(&mut outer, &mut inner);
        let test = ContourRef {
            graph: 1,
            contour: 0,
        };
        assert!(workspace.contains_contour(0, test));

        let outer_ref = ContourRef {
            graph: 0,
            contour: 0,
        };
        assert!(!workspace.contains_contour(1, outer_ref));
        workspace.finish();
    }

    #[test]
    fn equivalent_contours_detected() {
        let mut a = rect_graph(0., 0., 100., 100.);
        let mut b = rect_graph(0., 0., 100., 100.);
        let mut workspace = OpWorkspace::new(&mut a, &mut b);
        workspace.insert_crossings();
        workspace.insert_self_crossings(0);
        workspace.insert_self_crossings(1);
        let ours = ContourRef {
            graph: 0,
            contour: 0,
        };
        let theirs = ContourRef {
            graph: 1,
            contour: 0,
        };
        assert!(workspace.contours_equivalent(ours, theirs));
    }
}
