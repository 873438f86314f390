//! Boolean set operations on 2D regions bounded by cubic Bézier curves.
//!
//! The crate computes the union, intersection, difference and exclusive-or
//! of planar vector paths made of straight-line and cubic segments. Inputs
//! may self-intersect; outputs are paths to be filled with the even–odd
//! rule.
//!
//! ```
//! use pathbool::{Path, Rect};
//!
//! let square = Path::rect(Rect::new(0.0, 0.0, 100.0, 100.0));
//! let disc = Path::circle((100.0, 50.0), 40.0);
//! let merged = square.union(&disc);
//! println!("{}", merged.to_svg_path());
//! ```
//!
//! The engine works the way the classic marching algorithms do: it finds
//! where the two path boundaries genuinely cross each other (curve–curve
//! intersection by recursive Bézier clipping), marks every crossing as
//! entering or exiting the result region, then walks the crossings to
//! stitch the result contours together, handling coincident edges,
//! tangencies, and contours that don't intersect anything by containment.

#![forbid(unsafe_code)]

mod common;
mod contour;
mod crossing;
mod curve;
pub mod geometry;
mod graph;
mod intersect;
mod intersection;
mod ops;
mod overlap;
mod path;
mod point;
mod rect;
mod vec2;

pub use crate::contour::{Contour, ContourDirection, ContourInside};
pub use crate::curve::{Curve, CurveLocation};
pub use crate::geometry::{
    points_close, points_close_with_options, polar_angle, tangents_ambiguous, tangents_cross,
    values_close, values_close_with_options, AngleRange, ParamRange,
};
pub use crate::graph::Graph;
pub use crate::intersect::{curve_curve_intersection_list, curve_curve_intersections};
pub use crate::intersection::{IntersectRange, Intersection};
pub use crate::path::{Path, PathEl};
pub use crate::point::Point;
pub use crate::rect::Rect;
pub use crate::vec2::Vec2;
