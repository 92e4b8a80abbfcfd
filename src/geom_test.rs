#![allow(clippy::float_cmp)]

use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================
// Point
// =============================================================

#[test]
fn point_sub_is_componentwise() {
    let d = Point::new(10.0, 4.0) - Point::new(3.0, 6.0);
    assert_eq!(d, Point::new(7.0, -2.0));
}

#[test]
fn angle_of_axis_vectors() {
    assert!(approx(Point::new(1.0, 0.0).angle_deg(), 0.0));
    assert!(approx(Point::new(0.0, 1.0).angle_deg(), 90.0));
    assert!(approx(Point::new(-1.0, 0.0).angle_deg(), 180.0));
    assert!(approx(Point::new(0.0, -1.0).angle_deg(), -90.0));
}

// =============================================================
// Frame projection
// =============================================================

#[test]
fn local_frame_identity_at_zero_rotation() {
    let (x, y) = to_local_frame(12.0, -3.0, 0.0);
    assert!(approx(x, 12.0));
    assert!(approx(y, -3.0));
}

#[test]
fn local_frame_swaps_axes_at_ninety() {
    // A screen-down drag is a local "minus x" drag on an element rotated 90 degrees cw.
    let (x, y) = to_local_frame(0.0, 10.0, 90.0);
    assert!(approx(x, 10.0));
    assert!(approx(y, 0.0));
    let (x, y) = to_local_frame(10.0, 0.0, 90.0);
    assert!(approx(x, 0.0));
    assert!(approx(y, -10.0));
}

#[test]
fn screen_frame_inverts_local_frame() {
    let (lx, ly) = to_local_frame(7.0, 11.0, 37.0);
    let (sx, sy) = to_screen_frame(lx, ly, 37.0);
    assert!(approx(sx, 7.0));
    assert!(approx(sy, 11.0));
}

// =============================================================
// wrap_degrees
// =============================================================

#[test]
fn wrap_degrees_range() {
    assert_eq!(wrap_degrees(0.0), 0.0);
    assert_eq!(wrap_degrees(360.0), 0.0);
    assert_eq!(wrap_degrees(450.0), 90.0);
    assert_eq!(wrap_degrees(-90.0), 270.0);
    assert!(wrap_degrees(-1e-18) < 360.0);
}

#[test]
fn wrap_degrees_non_finite_is_zero() {
    assert_eq!(wrap_degrees(f64::NAN), 0.0);
    assert_eq!(wrap_degrees(f64::INFINITY), 0.0);
}

// =============================================================
// CardRect
// =============================================================

#[test]
fn degenerate_rects() {
    assert!(CardRect::sized(0.0, 213.0).is_degenerate());
    assert!(CardRect::sized(338.0, 0.0).is_degenerate());
    assert!(CardRect::sized(f64::NAN, 10.0).is_degenerate());
    assert!(!CardRect::sized(338.0, 213.0).is_degenerate());
}

#[test]
fn client_to_percent_chain() {
    let rect = CardRect::new(100.0, 50.0, 338.0, 213.0);
    let local = rect.client_to_local(Point::new(269.0, 156.5));
    assert_eq!(local, Point::new(169.0, 106.5));
    let pct = rect.local_to_percent(local);
    assert!(approx(pct.x, 50.0));
    assert!(approx(pct.y, 50.0));
    let back = rect.percent_to_local(pct);
    assert!(approx(back.x, 169.0));
    assert!(approx(back.y, 106.5));
}

#[test]
fn delta_to_percent() {
    let rect = CardRect::sized(200.0, 100.0);
    assert!(approx(rect.dx_to_percent(20.0), 10.0));
    assert!(approx(rect.dy_to_percent(5.0), 5.0));
}
