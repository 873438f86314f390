//! Two arc-capped shapes: rectangles with one corner swept by a single
//! cubic. Exercises curve–curve crossings between the two arcs.

mod common;

use common::{arc_shape, assert_path_prefix};
use pathbool::Rect;

fn shapes() -> (pathbool::Path, pathbool::Path) {
    (
        arc_shape(Rect::new(25.0, 0.0, 75.0, 100.0)),
        arc_shape(Rect::new(0.0, 25.0, 100.0, 75.0)),
    )
}

#[test]
fn union() {
    let (path1, path2) = shapes();
    let result = path1.union(&path2);
    assert_path_prefix(
        &result,
        12,
        &[
            ("M", &[(72.113, 25.0)]),
            (
                "C",
                &[(73.938, 16.825), (75.0, 8.413), (75.0, 0.0)],
            ),
            ("L", &[(25.0, 0.0)]),
        ],
    );
}

#[test]
fn intersect() {
    let (path1, path2) = shapes();
    let result = path1.intersect(&path2);
    assert_path_prefix(
        &result,
        6,
        &[
            ("M", &[(72.113, 25.0)]),
            (
                "C",
                &[(69.353, 37.360), (64.846, 49.175), (59.623, 59.623)],
            ),
        ],
    );
}

#[test]
fn difference() {
    let (path1, path2) = shapes();
    let result = path1.difference(&path2);
    assert_path_prefix(
        &result,
        11,
        &[
            ("M", &[(72.113, 25.0)]),
            (
                "C",
                &[(73.938, 16.825), (75.0, 8.413), (75.0, 0.0)],
            ),
        ],
    );
}

#[test]
fn xor() {
    let (path1, path2) = shapes();
    let result = path1.xor(&path2);
    assert_path_prefix(
        &result,
        18,
        &[
            ("M", &[(72.113, 25.0)]),
            (
                "C",
                &[(73.938, 16.825), (75.0, 8.413), (75.0, 0.0)],
            ),
        ],
    );
}
