//! The public path surface: building paths, converting them to SVG, and the
//! four Boolean operations.

use std::fmt;

use crate::{Graph, Point, Rect};

/// The ratio of a circle's radius at which the 4-cubic approximation places
/// its control points: 4(√2 − 1)/3 ≈ 0.55228475.
const CIRCLE_CONTROL_RATIO: f64 = 4.0 / 3.0 * (std::f64::consts::SQRT_2 - 1.0);

/// One element of a path.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathEl {
    /// Start a new subpath at the point.
    MoveTo(Point),
    /// A straight line from the current point.
    LineTo(Point),
    /// A cubic Bézier from the current point: two control points, then the
    /// end point.
    CurveTo(Point, Point, Point),
    /// Close the subpath back to its starting point (carried along).
    ClosePath(Point),
}

/// A path: a finite ordered sequence of move/line/curve/close elements.
///
/// Paths are the input and output of the Boolean operations; output paths
/// are to be filled with the even–odd rule.
#[derive(Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path(Vec<PathEl>);

impl Path {
    /// A new, empty path.
    pub fn new() -> Path {
        Path::default()
    }

    /// A path from a vector of elements.
    pub fn from_vec(elements: Vec<PathEl>) -> Path {
        Path(elements)
    }

    /// A closed rectangle path.
    pub fn rect(rect: Rect) -> Path {
        let mut path = Path::new();
        path.move_to((rect.x0, rect.y0));
        path.line_to((rect.x1, rect.y0));
        path.line_to((rect.x1, rect.y1));
        path.line_to((rect.x0, rect.y1));
        path.close();
        path
    }

    /// A circle as a closed 4-cubic approximation, starting at the leftmost
    /// point and sweeping through the topmost.
    pub fn circle(center: impl Into<Point>, radius: f64) -> Path {
        Path::oval(center, radius, radius)
    }

    /// An axis-aligned oval as a closed 4-cubic approximation.
    pub fn oval(center: impl Into<Point>, radius_x: f64, radius_y: f64) -> Path {
        let center = center.into();
        let control_x = radius_x * CIRCLE_CONTROL_RATIO;
        let control_y = radius_y * CIRCLE_CONTROL_RATIO;
        let mut path = Path::new();
        path.move_to((center.x - radius_x, center.y));
        path.curve_to(
            (center.x - radius_x, center.y + control_y),
            (center.x - control_x, center.y + radius_y),
            (center.x, center.y + radius_y),
        );
        path.curve_to(
            (center.x + control_x, center.y + radius_y),
            (center.x + radius_x, center.y + control_y),
            (center.x + radius_x, center.y),
        );
        path.curve_to(
            (center.x + radius_x, center.y - control_y),
            (center.x + control_x, center.y - radius_y),
            (center.x, center.y - radius_y),
        );
        path.curve_to(
            (center.x - control_x, center.y - radius_y),
            (center.x - radius_x, center.y - control_y),
            (center.x - radius_x, center.y),
        );
        path.close();
        path
    }

    /// Push a raw element onto the path.
    pub fn push(&mut self, element: PathEl) {
        self.0.push(element);
    }

    /// Start a new subpath at the point.
    pub fn move_to(&mut self, point: impl Into<Point>) {
        self.push(PathEl::MoveTo(point.into()));
    }

    /// Add a line from the current point.
    pub fn line_to(&mut self, point: impl Into<Point>) {
        self.push(PathEl::LineTo(point.into()));
    }

    /// Add a cubic Bézier from the current point.
    pub fn curve_to(
        &mut self,
        control1: impl Into<Point>,
        control2: impl Into<Point>,
        point: impl Into<Point>,
    ) {
        self.push(PathEl::CurveTo(control1.into(), control2.into(), point.into()));
    }

    /// Close the current subpath back to the point of its last move.
    pub fn close(&mut self) {
        if self.0.is_empty() {
            return;
        }
        let start = self
            .0
            .iter()
            .rev()
            .find_map(|element| match element {
                PathEl::MoveTo(point) => Some(*point),
                _ => None,
            })
            .unwrap_or_else(|| match self.0[0] {
                PathEl::MoveTo(point)
                | PathEl::LineTo(point)
                | PathEl::ClosePath(point)
                | PathEl::CurveTo(_, _, point) => point,
            });
        self.push(PathEl::ClosePath(start));
    }

    /// Append all elements of another path.
    pub fn append(&mut self, other: &Path) {
        self.0.extend_from_slice(&other.0);
    }

    /// The elements of the path.
    pub fn elements(&self) -> &[PathEl] {
        &self.0
    }

    /// An iterator over the path's elements.
    pub fn iter(&self) -> impl Iterator<Item = PathEl> + '_ {
        self.0.iter().copied()
    }

    /// Does the path contain no elements?
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The bounding rectangle over all element points (control points
    /// included).
    pub fn bounds(&self) -> Rect {
        let mut bounds: Option<Rect> = None;
        let mut add = |point: Point| {
            bounds = Some(match bounds {
                Some(so_far) => so_far.union_pt(point),
                None => Rect::from_points(point, point),
            });
        };
        for element in &self.0 {
            match *element {
                PathEl::MoveTo(point) | PathEl::LineTo(point) | PathEl::ClosePath(point) => {
                    add(point)
                }
                PathEl::CurveTo(control1, control2, point) => {
                    add(control1);
                    add(control2);
                    add(point);
                }
            }
        }
        bounds.unwrap_or(Rect::ZERO)
    }

    /// The SVG path data for this path: `M`, `L`, `C` and `Z` commands
    /// separated by single spaces.
    pub fn to_svg_path(&self) -> String {
        let mut result = String::new();
        for (index, element) in self.0.iter().enumerate() {
            match *element {
                PathEl::MoveTo(point) => {
                    result.push_str(&format!("M {} {}", point.x, point.y));
                }
                PathEl::LineTo(point) => {
                    result.push_str(&format!("L {} {}", point.x, point.y));
                }
                PathEl::CurveTo(control1, control2, point) => {
                    result.push_str(&format!(
                        "C {} {} {} {} {} {}",
                        control1.x, control1.y, control2.x, control2.y, point.x, point.y
                    ));
                }
                PathEl::ClosePath(_) => result.push('Z'),
            }
            if index != self.0.len() - 1 {
                result.push(' ');
            }
        }
        result
    }

    /// A complete SVG document containing just this path, with the view box
    /// set to the path's bounds.
    pub fn to_svg(&self) -> String {
        let bounds = self.bounds();
        format!(
            "<svg viewBox=\"{} {} {} {}\" xmlns=\"http://www.w3.org/2000/svg\">\n  <path fill-rule=\"evenodd\" d=\"{}\"/>\n</svg>",
            bounds.x0,
            bounds.y0,
            bounds.width(),
            bounds.height(),
            self.to_svg_path()
        )
    }

    /// The union of the regions bounded by the two paths.
    pub fn union(&self, other: &Path) -> Path {
        let mut ours = Graph::from_path(self);
        let mut theirs = Graph::from_path(other);
        ours.union(&mut theirs).to_path()
    }

    /// The intersection of the regions bounded by the two paths.
    pub fn intersect(&self, other: &Path) -> Path {
        let mut ours = Graph::from_path(self);
        let mut theirs = Graph::from_path(other);
        ours.intersect(&mut theirs).to_path()
    }

    /// The region bounded by this path minus the region bounded by the
    /// other.
    pub fn difference(&self, other: &Path) -> Path {
        let mut ours = Graph::from_path(self);
        let mut theirs = Graph::from_path(other);
        ours.difference(&mut theirs).to_path()
    }

    /// The exclusive-or of the regions bounded by the two paths.
    pub fn xor(&self, other: &Path) -> Path {
        let mut ours = Graph::from_path(self);
        let mut theirs = Graph::from_path(other);
        ours.xor(&mut theirs).to_path()
    }
}

impl FromIterator<PathEl> for Path {
    fn from_iter<T: IntoIterator<Item = PathEl>>(iter: T) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl IntoIterator for Path {
    type Item = PathEl;
    type IntoIter = std::vec::IntoIter<PathEl>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = PathEl;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, PathEl>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Path[")?;
        for (index, element) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            match element {
                PathEl::MoveTo(point) => write!(f, "move{}", point)?,
                PathEl::LineTo(point) => write!(f, "line{}", point)?,
                PathEl::CurveTo(control1, control2, point) => {
                    write!(f, "curve({}, {}, {})", control1, control2, point)?
                }
                PathEl::ClosePath(point) => write!(f, "close{}", point)?,
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_element_layout() {
        let path = Path::rect(Rect::new(0., 0., 100., 50.));
        let elements = path.elements();
        assert_eq!(elements.len(), 5);
        assert_eq!(elements[0], PathEl::MoveTo(Point::new(0., 0.)));
        assert_eq!(elements[1], PathEl::LineTo(Point::new(100., 0.)));
        assert_eq!(elements[4], PathEl::ClosePath(Point::new(0., 0.)));
    }

    #[test]
    fn circle_element_layout() {
        let path = Path::circle((100., 100.), 50.);
        let elements = path.elements();
        assert_eq!(elements.len(), 6);
        assert_eq!(elements[0], PathEl::MoveTo(Point::new(50., 100.)));
        match elements[1] {
            PathEl::CurveTo(control1, _, point) => {
                assert!((control1.x - 50.0).abs() < 1e-9);
                assert!((control1.y - 127.614).abs() < 1e-3);
                assert_eq!(point, Point::new(100., 150.));
            }
            _ => panic!("expected a curve"),
        }
    }

    #[test]
    fn close_targets_last_move() {
        let mut path = Path::new();
        path.move_to((0., 0.));
        path.line_to((10., 0.));
        path.close();
        path.move_to((20., 0.));
        path.line_to((30., 0.));
        path.close();
        assert_eq!(path.elements()[2], PathEl::ClosePath(Point::new(0., 0.)));
        assert_eq!(path.elements()[5], PathEl::ClosePath(Point::new(20., 0.)));
    }

    #[test]
    fn svg_path_format() {
        let mut path = Path::new();
        path.move_to((0., 0.));
        path.line_to((100., 0.));
        path.curve_to((100., 50.), (50., 100.), (0., 100.));
        path.close();
        assert_eq!(
            path.to_svg_path(),
            "M 0 0 L 100 0 C 100 50 50 100 0 100 Z"
        );
    }

    #[test]
    fn svg_document_wraps_bounds() {
        let path = Path::rect(Rect::new(10., 20., 30., 50.));
        let svg = path.to_svg();
        assert!(svg.starts_with("<svg viewBox=\"10 20 20 30\""));
        assert!(svg.contains("M 10 20"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn bounds_include_control_points() {
        let mut path = Path::new();
        path.move_to((0., 0.));
        path.curve_to((50., 100.), (100., 100.), (150., 0.));
        assert_eq!(path.bounds(), Rect::new(0., 0., 150., 100.));
    }
}
