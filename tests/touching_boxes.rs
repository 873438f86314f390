//! Two squares sharing one full edge. A zero-area touch must not merge the
//! shapes topologically.

mod common;

use common::assert_path;
use pathbool::{Path, Rect};

fn boxes() -> (Path, Path) {
    (
        Path::rect(Rect::new(0.0, 0.0, 100.0, 100.0)),
        Path::rect(Rect::new(100.0, 0.0, 200.0, 100.0)),
    )
}

fn left_square() -> Vec<(&'static str, &'static [(f64, f64)])> {
    vec![
        ("M", &[(0.0, 0.0)]),
        ("L", &[(100.0, 0.0)]),
        ("L", &[(100.0, 100.0)]),
        ("L", &[(0.0, 100.0)]),
        ("L", &[(0.0, 0.0)]),
        ("Z", &[(0.0, 0.0)]),
    ]
}

fn right_square() -> Vec<(&'static str, &'static [(f64, f64)])> {
    vec![
        ("M", &[(100.0, 0.0)]),
        ("L", &[(200.0, 0.0)]),
        ("L", &[(200.0, 100.0)]),
        ("L", &[(100.0, 100.0)]),
        ("L", &[(100.0, 0.0)]),
        ("Z", &[(100.0, 0.0)]),
    ]
}

#[test]
fn union_keeps_both_squares() {
    let (rect1, rect2) = boxes();
    let result = rect1.union(&rect2);
    let mut expected = left_square();
    expected.extend(right_square());
    assert_path(&result, &expected);
}

#[test]
fn intersect_is_empty() {
    let (rect1, rect2) = boxes();
    let result = rect1.intersect(&rect2);
    assert_eq!(result.elements().len(), 0);
}

#[test]
fn difference_keeps_left_square() {
    let (rect1, rect2) = boxes();
    let result = rect1.difference(&rect2);
    assert_path(&result, &left_square());
}

#[test]
fn xor_keeps_both_squares() {
    let (rect1, rect2) = boxes();
    let result = rect1.xor(&rect2);
    let mut expected = left_square();
    expected.extend(right_square());
    assert_path(&result, &expected);
}
