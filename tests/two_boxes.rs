//! Two overlapping axis-aligned squares, checked element by element.

mod common;

use common::assert_path;
use pathbool::{Path, Rect};

fn boxes() -> (Path, Path) {
    (
        Path::rect(Rect::new(0.0, 0.0, 100.0, 100.0)),
        Path::rect(Rect::new(50.0, 50.0, 150.0, 150.0)),
    )
}

#[test]
fn union() {
    let (rect1, rect2) = boxes();
    let result = rect1.union(&rect2);
    assert_path(
        &result,
        &[
            ("M", &[(100.0, 50.0)]),
            ("L", &[(100.0, 0.0)]),
            ("L", &[(0.0, 0.0)]),
            ("L", &[(0.0, 100.0)]),
            ("L", &[(50.0, 100.0)]),
            ("L", &[(50.0, 150.0)]),
            ("L", &[(150.0, 150.0)]),
            ("L", &[(150.0, 50.0)]),
            ("L", &[(100.0, 50.0)]),
            ("Z", &[(100.0, 50.0)]),
        ],
    );
}

#[test]
fn intersect() {
    let (rect1, rect2) = boxes();
    let result = rect1.intersect(&rect2);
    assert_path(
        &result,
        &[
            ("M", &[(100.0, 50.0)]),
            ("L", &[(100.0, 100.0)]),
            ("L", &[(50.0, 100.0)]),
            ("L", &[(50.0, 50.0)]),
            ("L", &[(100.0, 50.0)]),
            ("Z", &[(100.0, 50.0)]),
        ],
    );
}

#[test]
fn difference() {
    let (rect1, rect2) = boxes();
    let result = rect1.difference(&rect2);
    assert_path(
        &result,
        &[
            ("M", &[(100.0, 50.0)]),
            ("L", &[(100.0, 0.0)]),
            ("L", &[(0.0, 0.0)]),
            ("L", &[(0.0, 100.0)]),
            ("L", &[(50.0, 100.0)]),
            ("L", &[(50.0, 50.0)]),
            ("L", &[(100.0, 50.0)]),
            ("Z", &[(100.0, 50.0)]),
        ],
    );
}

#[test]
fn xor() {
    let (rect1, rect2) = boxes();
    let result = rect1.xor(&rect2);
    assert_path(
        &result,
        &[
            ("M", &[(100.0, 50.0)]),
            ("L", &[(100.0, 0.0)]),
            ("L", &[(0.0, 0.0)]),
            ("L", &[(0.0, 100.0)]),
            ("L", &[(50.0, 100.0)]),
            ("L", &[(50.0, 150.0)]),
            ("L", &[(150.0, 150.0)]),
            ("L", &[(150.0, 50.0)]),
            ("L", &[(100.0, 50.0)]),
            ("Z", &[(100.0, 50.0)]),
            ("M", &[(100.0, 50.0)]),
            ("L", &[(100.0, 100.0)]),
            ("L", &[(50.0, 100.0)]),
            ("L", &[(50.0, 50.0)]),
            ("L", &[(100.0, 50.0)]),
            ("Z", &[(100.0, 50.0)]),
        ],
    );
}
