//! Algebraic properties every Boolean engine has to satisfy.

mod common;

use common::assert_paths_match;
use pathbool::{ContourDirection, Graph, Path, Rect};

// Conversion through a graph closes subpaths and makes closing edges
// explicit, giving both sides of a comparison the same canonical form.
fn normalized(path: &Path) -> Path {
    Graph::from_path(path).to_path()
}

fn square() -> Path {
    Path::rect(Rect::new(0.0, 0.0, 100.0, 100.0))
}

fn disc() -> Path {
    Path::circle((50.0, 50.0), 40.0)
}

#[test]
fn union_is_idempotent() {
    let a = square();
    assert_paths_match(&a.union(&a), &normalized(&a));

    let c = disc();
    assert_paths_match(&c.union(&c), &normalized(&c));
}

#[test]
fn intersect_is_idempotent() {
    let a = square();
    assert_paths_match(&a.intersect(&a), &normalized(&a));

    let c = disc();
    assert_paths_match(&c.intersect(&c), &normalized(&c));
}

#[test]
fn union_and_intersect_commute() {
    let a = square();
    let b = Path::rect(Rect::new(50.0, 50.0, 150.0, 150.0));

    let ab = a.union(&b);
    let ba = b.union(&a);
    assert_eq!(ab.elements().len(), ba.elements().len());
    assert!((ab.bounds().x0 - ba.bounds().x0).abs() < 1e-9);
    assert!((ab.bounds().y1 - ba.bounds().y1).abs() < 1e-9);

    let ab = a.intersect(&b);
    let ba = b.intersect(&a);
    assert_eq!(ab.elements().len(), ba.elements().len());
    assert_eq!(ab.bounds(), Rect::new(50.0, 50.0, 100.0, 100.0));
    assert_eq!(ba.bounds(), Rect::new(50.0, 50.0, 100.0, 100.0));
}

#[test]
fn xor_is_union_minus_intersection() {
    let a = square();
    let b = Path::rect(Rect::new(50.0, 50.0, 150.0, 150.0));
    let explicit = a.union(&b).difference(&a.intersect(&b));
    assert_paths_match(&a.xor(&b), &explicit);
}

#[test]
fn self_difference_is_empty() {
    let a = square();
    assert!(a.difference(&a).is_empty());

    let c = disc();
    assert!(c.difference(&c).is_empty());
}

#[test]
fn self_xor_is_empty() {
    let a = square();
    assert!(a.xor(&a).is_empty());

    let c = disc();
    assert!(c.xor(&c).is_empty());
}

#[test]
fn empty_operand_identities() {
    let a = square();
    let empty = Path::new();
    assert!(a.intersect(&empty).is_empty());
    assert!(empty.intersect(&a).is_empty());
    assert_paths_match(&a.union(&empty), &normalized(&a));
    assert_paths_match(&empty.union(&a), &normalized(&a));
    assert_paths_match(&a.difference(&empty), &normalized(&a));
    assert!(empty.difference(&a).is_empty());
}

#[test]
fn containment_absorbs() {
    let big = square();
    let small = Path::rect(Rect::new(25.0, 25.0, 75.0, 75.0));
    assert_paths_match(&small.union(&big), &normalized(&big));
    assert_paths_match(&big.union(&small), &normalized(&big));
    assert_paths_match(&small.intersect(&big), &normalized(&small));
    assert_paths_match(&big.intersect(&small), &normalized(&small));
}

#[test]
fn graph_roundtrip_preserves_topology() {
    let mut path = square();
    path.append(&disc());
    let graph = Graph::from_path(&path);
    assert_eq!(graph.contours().len(), 2);

    let back = graph.to_path();
    let again = Graph::from_path(&back);
    assert_eq!(again.contours().len(), 2);
    assert_eq!(back.elements().len(), normalized(&back).elements().len());
    assert_eq!(graph.bounds(), again.bounds());
}

#[test]
fn output_contours_can_be_normalized_consistently() {
    let a = square();
    let b = Path::rect(Rect::new(50.0, 50.0, 150.0, 150.0));
    let result = Graph::from_path(&a.union(&b));
    for contour in result.contours() {
        let clockwise = contour.made_clockwise_if_necessary();
        assert_eq!(clockwise.direction(), ContourDirection::Clockwise);
    }
}
