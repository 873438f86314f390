//! Shared helpers for the Boolean operation tests.
#![allow(dead_code)] // not every test crate uses every helper

use pathbool::{Path, PathEl, Point, Rect};

pub const TOLERANCE: f64 = 1e-3;

fn point_matches(actual: Point, expected: (f64, f64)) -> bool {
    (actual.x - expected.0).abs() < TOLERANCE && (actual.y - expected.1).abs() < TOLERANCE
}

/// Check a path element-by-element against `(kind, points)` expectations,
/// where kind is one of "M", "L", "C", "Z".
pub fn assert_path(path: &Path, expected: &[(&str, &[(f64, f64)])]) {
    assert_eq!(
        path.elements().len(),
        expected.len(),
        "element count mismatch: {:?}",
        path
    );
    for (index, (&(kind, points), element)) in
        expected.iter().zip(path.elements()).enumerate()
    {
        let actual: Vec<Point> = match *element {
            PathEl::MoveTo(p) => {
                assert_eq!(kind, "M", "element {} of {:?}", index, path);
                vec![p]
            }
            PathEl::LineTo(p) => {
                assert_eq!(kind, "L", "element {} of {:?}", index, path);
                vec![p]
            }
            PathEl::CurveTo(c1, c2, p) => {
                assert_eq!(kind, "C", "element {} of {:?}", index, path);
                vec![c1, c2, p]
            }
            PathEl::ClosePath(p) => {
                assert_eq!(kind, "Z", "element {} of {:?}", index, path);
                vec![p]
            }
        };
        for (point_index, (&point, &expected_point)) in
            actual.iter().zip(points.iter()).enumerate()
        {
            assert!(
                point_matches(point, expected_point),
                "element {} point {}: got {:?}, expected {:?} in {:?}",
                index,
                point_index,
                point,
                expected_point,
                path
            );
        }
    }
}

/// Check just the element count and the leading elements of a path.
pub fn assert_path_prefix(path: &Path, count: usize, prefix: &[(&str, &[(f64, f64)])]) {
    assert_eq!(
        path.elements().len(),
        count,
        "element count mismatch: {:?}",
        path
    );
    let truncated = Path::from_vec(path.elements()[..prefix.len()].to_vec());
    assert_path(&truncated, prefix);
}

/// Two paths describe the same elements to within the test tolerance.
pub fn assert_paths_match(actual: &Path, expected: &Path) {
    assert_eq!(
        actual.elements().len(),
        expected.elements().len(),
        "element count mismatch: {:?} vs {:?}",
        actual,
        expected
    );
    for (index, (a, b)) in actual
        .elements()
        .iter()
        .zip(expected.elements())
        .enumerate()
    {
        let matches = match (*a, *b) {
            (PathEl::MoveTo(p), PathEl::MoveTo(q)) => point_matches(p, (q.x, q.y)),
            (PathEl::LineTo(p), PathEl::LineTo(q)) => point_matches(p, (q.x, q.y)),
            (PathEl::CurveTo(a1, a2, p), PathEl::CurveTo(b1, b2, q)) => {
                point_matches(a1, (b1.x, b1.y))
                    && point_matches(a2, (b2.x, b2.y))
                    && point_matches(p, (q.x, q.y))
            }
            (PathEl::ClosePath(p), PathEl::ClosePath(q)) => point_matches(p, (q.x, q.y)),
            _ => false,
        };
        assert!(
            matches,
            "element {} differs: {:?} vs {:?}",
            index, actual, expected
        );
    }
}

/// A rectangle whose far corner is replaced by a single cubic arc from the
/// end of the top edge over to the end of the left edge.
pub fn arc_shape(rect: Rect) -> Path {
    let mut path = Path::new();
    path.move_to((rect.x0, rect.y0));
    path.line_to((rect.x1, rect.y0));
    path.curve_to(
        (rect.x1, rect.y1 / 2.0),
        (rect.x1 / 2.0, rect.y1),
        (rect.x0, rect.y1),
    );
    path.close();
    path
}
