//! Bookkeeping for overlapping edges between two contours.
//!
//! When intersection finds that two edges coincide over an interval, the
//! interval is recorded as an [`EdgeOverlap`]. Abutting overlaps are chained
//! into runs; the runs of one contour pair make up a [`ContourOverlap`],
//! shared by both contours. Whether a run amounts to an actual crossing of
//! the contours (as opposed to a touch along the shared arc) is decided by
//! the operation workspace, which has access to the neighboring edges.

use crate::crossing::EdgeRef;
use crate::IntersectRange;

/// One overlapping interval between an edge of each contour.
#[derive(Clone, Debug)]
pub(crate) struct EdgeOverlap {
    pub edge1: EdgeRef,
    pub edge2: EdgeRef,
    pub range: IntersectRange,
}

/// A maximal chain of abutting edge overlaps: one contiguous shared arc.
#[derive(Clone, Debug, Default)]
pub(crate) struct EdgeOverlapRun {
    pub overlaps: Vec<EdgeOverlap>,
}

/// All the overlapping arcs between one pair of contours.
#[derive(Clone, Debug, Default)]
pub(crate) struct ContourOverlap {
    pub runs: Vec<EdgeOverlapRun>,
}

impl ContourOverlap {
    /// No overlapping edges recorded at all?
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// The pair of contours the overlap connects, if any overlap was
    /// recorded.
    pub fn contour_pair(
        &self,
    ) -> Option<(crate::crossing::ContourRef, crate::crossing::ContourRef)> {
        let overlap = self.runs.first()?.overlaps.first()?;
        Some((overlap.edge1.contour_ref(), overlap.edge2.contour_ref()))
    }

    /// Is this overlap between the two given contours (in either order)?
    pub fn is_between(
        &self,
        contour1: crate::crossing::ContourRef,
        contour2: crate::crossing::ContourRef,
    ) -> bool {
        match self.contour_pair() {
            Some((first, second)) => {
                (first == contour1 && second == contour2)
                    || (first == contour2 && second == contour1)
            }
            None => false,
        }
    }
}

impl EdgeOverlapRun {
    /// The middle overlap of the run, the one that contributes the run's
    /// crossing.
    pub fn middle_overlap(&self) -> Option<&EdgeOverlap> {
        if self.overlaps.is_empty() {
            return None;
        }
        Some(&self.overlaps[self.overlaps.len() / 2])
    }
}
