//! The graph of contours a Boolean operation works on.

use std::cell::Cell;
use std::fmt;

use crate::geometry::points_close;
use crate::ops::OpWorkspace;
use crate::{Contour, Curve, Path, PathEl, Point, Rect};

/// A filled region: a collection of closed contours, interpreted with the
/// even–odd rule. Graphs host the Boolean operations; they are built from a
/// [`Path`] and turned back into one when the operation is done.
///
/// An operation needs exclusive access to both operand graphs while it
/// runs; afterwards both are free of crossings again and can be reused
/// (exclusive-or depends on that).
#[derive(Clone, Default)]
pub struct Graph {
    pub(crate) contours: Vec<Contour>,
    bounds: Cell<Option<Rect>>,
}

impl Graph {
    /// A new, empty graph.
    pub fn new() -> Graph {
        Graph::default()
    }

    /// Build a graph from a path: every subpath becomes one contour, lines
    /// become degenerate cubics, and degenerate elements are dropped.
    pub fn from_path(path: &Path) -> Graph {
        let mut graph = Graph::new();
        let mut contour: Option<Contour> = None;
        let mut last_point = Point::ZERO;
        let mut was_closed = false;

        fn finish_contour(graph: &mut Graph, contour: Option<Contour>, was_closed: bool) {
            if let Some(mut contour) = contour {
                if !was_closed {
                    contour.close();
                }
                graph.add_contour(contour);
            }
        }

        for element in path.elements() {
            match *element {
                PathEl::MoveTo(point) => {
                    finish_contour(&mut graph, contour.take(), was_closed);
                    was_closed = false;
                    contour = Some(Contour::new());
                    last_point = point;
                }
                PathEl::LineTo(point) => {
                    // Skip degenerate line segments.
                    if point != last_point {
                        if let Some(contour) = contour.as_mut() {
                            contour.add_curve(Curve::line(last_point, point));
                        }
                        last_point = point;
                    }
                }
                PathEl::CurveTo(control1, control2, point) => {
                    // Skip the degenerate case where all points are equal.
                    if point == last_point && point == control1 && point == control2 {
                        continue;
                    }
                    if let Some(contour) = contour.as_mut() {
                        contour.add_curve(Curve::new(last_point, control1, control2, point));
                    }
                    last_point = point;
                }
                PathEl::ClosePath(_) => {
                    if let Some(contour) = contour.as_mut() {
                        if !contour.is_empty() {
                            let first_point = contour.first_point();
                            if !points_close(last_point, first_point) {
                                contour.add_curve(Curve::line(last_point, first_point));
                                was_closed = true;
                            }
                        }
                    }
                    last_point = Point::ZERO;
                }
            }
        }
        finish_contour(&mut graph, contour.take(), was_closed);

        // Contours that picked up no edges have nothing to contribute.
        graph.contours.retain(|contour| !contour.is_empty());
        graph.bounds.set(None);
        graph
    }

    /// Convert the graph back to a path: a move per contour, then a line or
    /// curve per edge, then a close.
    pub fn to_path(&self) -> Path {
        let mut path = Path::new();
        for contour in &self.contours {
            let mut first_point = true;
            for curve in contour.curves() {
                if first_point {
                    path.move_to(curve.start());
                    first_point = false;
                }
                if curve.is_line() {
                    path.line_to(curve.end());
                } else {
                    path.curve_to(curve.control1(), curve.control2(), curve.end());
                }
            }
            path.close();
        }
        path
    }

    /// The contours making up the graph.
    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    /// The bounds of the graph: the union of the contour bounds.
    pub fn bounds(&self) -> Rect {
        if let Some(bounds) = self.bounds.get() {
            return bounds;
        }
        let mut bounds: Option<Rect> = None;
        for contour in &self.contours {
            let contour_bounds = contour.bounds();
            bounds = Some(match bounds {
                Some(so_far) => so_far.union(contour_bounds),
                None => contour_bounds,
            });
        }
        let bounds = bounds.unwrap_or(Rect::ZERO);
        self.bounds.set(Some(bounds));
        bounds
    }

    pub(crate) fn add_contour(&mut self, contour: Contour) {
        self.contours.push(contour);
        self.bounds.set(None);
    }

    /// The union of the regions of the two graphs.
    pub fn union(&mut self, other: &mut Graph) -> Graph {
        OpWorkspace::new(self, other).union()
    }

    /// The intersection of the regions of the two graphs.
    pub fn intersect(&mut self, other: &mut Graph) -> Graph {
        OpWorkspace::new(self, other).intersect()
    }

    /// The region of this graph minus the region of the other.
    pub fn difference(&mut self, other: &mut Graph) -> Graph {
        OpWorkspace::new(self, other).difference()
    }

    /// The exclusive-or of the two regions: their union minus their
    /// intersection.
    pub fn xor(&mut self, other: &mut Graph) -> Graph {
        OpWorkspace::new(self, other).xor()
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Graph(bounds={:?}, contours={:?})", self.bounds(), self.contours)
    }
}
