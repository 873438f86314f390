//! A rectangle against an overlapping circle (the 4-cubic approximation).

mod common;

use common::assert_path_prefix;
use pathbool::{Path, Rect};

fn shapes() -> (Path, Path) {
    (
        Path::rect(Rect::new(50.0, 50.0, 350.0, 250.0)),
        Path::circle((355.0, 240.0), 125.0),
    )
}

#[test]
fn union() {
    let (rect, circle) = shapes();
    let result = rect.union(&circle);
    assert_path_prefix(
        &result,
        10,
        &[
            ("M", &[(350.0, 115.098)]),
            ("L", &[(350.0, 50.0)]),
            ("L", &[(50.0, 50.0)]),
            ("L", &[(50.0, 250.0)]),
        ],
    );
}

#[test]
fn intersect() {
    let (rect, circle) = shapes();
    let result = rect.intersect(&circle);
    assert_path_prefix(
        &result,
        6,
        &[("M", &[(350.0, 115.098)]), ("L", &[(350.0, 250.0)])],
    );
}

#[test]
fn difference() {
    let (rect, circle) = shapes();
    let result = rect.difference(&circle);
    assert_path_prefix(
        &result,
        8,
        &[("M", &[(350.0, 115.098)]), ("L", &[(350.0, 50.0)])],
    );
}

#[test]
fn xor() {
    let (rect, circle) = shapes();
    let result = rect.xor(&circle);
    assert_path_prefix(
        &result,
        16,
        &[("M", &[(350.0, 115.098)]), ("L", &[(350.0, 50.0)])],
    );
}
