//! A rectangle-with-a-circular-hole composite against a tall rectangle.
//! Exercises hole handling and multi-contour results.

mod common;

use common::assert_path_prefix;
use pathbool::{Graph, Path, Rect};

fn shapes() -> (Path, Path) {
    let mut path1 = Path::rect(Rect::new(50.0, 50.0, 400.0, 350.0));
    path1.append(&Path::circle((210.0, 200.0), 125.0));
    let path2 = Path::rect(Rect::new(180.0, 5.0, 280.0, 405.0));
    (path1, path2)
}

#[test]
fn union() {
    let (path1, path2) = shapes();
    let result = path1.union(&path2);
    assert_path_prefix(
        &result,
        24,
        &[
            ("M", &[(180.0, 50.0)]),
            ("L", &[(50.0, 50.0)]),
            ("L", &[(50.0, 350.0)]),
            ("L", &[(180.0, 350.0)]),
            ("L", &[(180.0, 405.0)]),
            ("L", &[(280.0, 405.0)]),
        ],
    );
    // One merged outer boundary plus the two lens-shaped remnants of the
    // circular hole on either side of the tall rectangle.
    let graph = Graph::from_path(&result);
    assert_eq!(graph.contours().len(), 3);
}

#[test]
fn intersect() {
    let (path1, path2) = shapes();
    let result = path1.intersect(&path2);
    assert_path_prefix(
        &result,
        14,
        &[("M", &[(180.0, 50.0)]), ("L", &[(280.0, 50.0)])],
    );
}

#[test]
fn difference() {
    let (path1, path2) = shapes();
    let result = path1.difference(&path2);
    assert_path_prefix(
        &result,
        18,
        &[("M", &[(180.0, 50.0)]), ("L", &[(50.0, 50.0)])],
    );
}

#[test]
fn xor() {
    let (path1, path2) = shapes();
    let result = path1.xor(&path2);
    assert_path_prefix(
        &result,
        38,
        &[("M", &[(180.0, 50.0)]), ("L", &[(50.0, 50.0)])],
    );
}
