#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn point_sub_is_componentwise() {
    let d = Point::new(10.0, 4.0).sub(Point::new(3.0, 9.0));
    assert_eq!(d, Point::new(7.0, -5.0));
}

#[test]
fn point_default_is_origin() {
    assert_eq!(Point::default(), Point::new(0.0, 0.0));
}

#[test]
fn clamped_raises_small_sizes_to_minimum() {
    let s = Size::new(10.0, 20.0).clamped();
    assert_eq!(s, Size::new(150.0, 100.0));
}

#[test]
fn clamped_keeps_large_sizes() {
    let s = Size::new(420.5, 333.0).clamped();
    assert_eq!(s, Size::new(420.5, 333.0));
}

#[test]
fn clamped_replaces_non_finite() {
    let s = Size::new(f64::NAN, f64::INFINITY).clamped();
    assert_eq!(s, Size::new(150.0, 100.0));
}

#[test]
fn resized_by_applies_delta_then_clamps() {
    let s = Size::new(300.0, 180.0);
    assert_eq!(s.resized_by(Point::new(25.0, -30.0)), Size::new(325.0, 150.0));
    assert_eq!(s.resized_by(Point::new(-500.0, -500.0)), Size::new(150.0, 100.0));
}

#[test]
fn rect_contains_is_inclusive() {
    let r = Rect::new(10.0, 10.0, 20.0, 20.0);
    assert!(r.contains(Point::new(10.0, 10.0)));
    assert!(r.contains(Point::new(30.0, 30.0)));
    assert!(r.contains(Point::new(15.0, 25.0)));
    assert!(!r.contains(Point::new(9.9, 15.0)));
    assert!(!r.contains(Point::new(15.0, 30.1)));
}

#[test]
fn size_serde_uses_width_height_keys() {
    let json = serde_json::to_value(Size::new(300.0, 180.0)).unwrap();
    assert_eq!(json, serde_json::json!({ "width": 300.0, "height": 180.0 }));
}
