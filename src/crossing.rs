//! Crossings: the points where one edge actually passes through another.
//!
//! Crossings live in an arena owned by the Boolean operation in progress;
//! edges refer to them by id, and each crossing points back at its edge and
//! across at its counterpart on the other curve. All of the cyclic
//! bookkeeping of the algorithm is expressed through these ids, so nothing
//! here owns anything else.

use crate::Intersection;

/// Identifies a graph inside an operation (0 = ours, 1 = theirs).
pub(crate) type GraphId = usize;

/// Stable id of a crossing in the operation's arena.
pub(crate) type CrossingId = usize;

/// A contour within one of the two operand graphs.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct ContourRef {
    pub graph: GraphId,
    pub contour: usize,
}

/// An edge within one of the two operand graphs.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct EdgeRef {
    pub graph: GraphId,
    pub contour: usize,
    pub edge: usize,
}

impl EdgeRef {
    /// The contour this edge belongs to.
    #[inline]
    pub fn contour_ref(&self) -> ContourRef {
        ContourRef {
            graph: self.graph,
            contour: self.contour,
        }
    }
}

/// Which curve of the underlying intersection the owning edge is.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum IntersectionSide {
    First,
    Second,
}

/// A marker on an edge where it crosses another edge. The intersection is
/// owned by the crossing; the edge and counterpart links are plain ids.
#[derive(Clone, Debug)]
pub(crate) struct Crossing {
    pub intersection: Intersection,
    pub side: IntersectionSide,
    pub edge: EdgeRef,
    pub counterpart: Option<CrossingId>,
    pub entry: bool,
    pub processed: bool,
    pub self_crossing: bool,
    pub from_overlap: bool,
}

impl Crossing {
    pub fn new(intersection: Intersection, side: IntersectionSide, edge: EdgeRef) -> Crossing {
        Crossing {
            intersection,
            side,
            edge,
            counterpart: None,
            entry: false,
            processed: false,
            self_crossing: false,
            from_overlap: false,
        }
    }

    /// The parameter of the crossing on its own edge.
    pub fn parameter(&self) -> f64 {
        match self.side {
            IntersectionSide::First => self.intersection.parameter1(),
            IntersectionSide::Second => self.intersection.parameter2(),
        }
    }

    /// Is the crossing at the start of its edge?
    pub fn is_at_start(&self) -> bool {
        match self.side {
            IntersectionSide::First => self.intersection.at_start_of_curve1(),
            IntersectionSide::Second => self.intersection.at_start_of_curve2(),
        }
    }

    /// Is the crossing at the end of its edge?
    pub fn is_at_end(&self) -> bool {
        match self.side {
            IntersectionSide::First => self.intersection.at_stop_of_curve1(),
            IntersectionSide::Second => self.intersection.at_stop_of_curve2(),
        }
    }

    /// The piece of the edge before the crossing, or `None` when the
    /// crossing sits at the edge's start.
    pub fn left_curve(&self) -> Option<crate::Curve> {
        if self.is_at_start() {
            return None;
        }
        Some(match self.side {
            IntersectionSide::First => self.intersection.curve1_left_bezier().clone(),
            IntersectionSide::Second => self.intersection.curve2_left_bezier().clone(),
        })
    }

    /// The piece of the edge after the crossing, or `None` when the
    /// crossing sits at the edge's end.
    pub fn right_curve(&self) -> Option<crate::Curve> {
        if self.is_at_end() {
            return None;
        }
        Some(match self.side {
            IntersectionSide::First => self.intersection.curve1_right_bezier().clone(),
            IntersectionSide::Second => self.intersection.curve2_right_bezier().clone(),
        })
    }
}
