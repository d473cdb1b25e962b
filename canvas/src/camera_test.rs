#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_equality() {
    assert_eq!(Point::new(1.0, 2.0), Point::new(1.0, 2.0));
    assert_ne!(Point::new(1.0, 2.0), Point::new(1.0, 3.0));
}

#[test]
fn point_is_finite() {
    assert!(Point::new(1.0, -1.0).is_finite());
    assert!(!Point::new(f64::NAN, 0.0).is_finite());
    assert!(!Point::new(0.0, f64::INFINITY).is_finite());
}

// --- Camera defaults ---

#[test]
fn camera_default_center_is_origin() {
    let cam = Camera::default();
    assert_eq!(cam.center, Point::new(0.0, 0.0));
}

#[test]
fn camera_default_radius() {
    assert_eq!(Camera::default().r, DEFAULT_RADIUS);
}

// --- world_to_view / view_to_world ---

#[test]
fn world_to_view_scales_by_radius() {
    let cam = Camera { center: Point::new(0.0, 0.0), r: 0.5 };
    assert!(point_approx_eq(cam.world_to_view(Point::new(1.0, -1.0)), Point::new(0.5, -0.5)));
}

#[test]
fn world_to_view_applies_center() {
    let cam = Camera { center: Point::new(0.25, -0.1), r: 1.0 };
    assert!(point_approx_eq(cam.world_to_view(Point::new(0.0, 0.0)), Point::new(0.25, -0.1)));
}

#[test]
fn view_to_world_inverts_world_to_view() {
    let cam = Camera { center: Point::new(0.3, 0.7), r: 2.5 };
    let world = Point::new(-0.4, 0.9);
    assert!(point_approx_eq(cam.view_to_world(cam.world_to_view(world)), world));
}

// --- zoom ---

#[test]
fn zoom_at_center_keeps_center() {
    let mut cam = Camera::default();
    cam.zoom(0.5, Point::new(0.0, 0.0)).unwrap();
    assert!(approx_eq(cam.r, DEFAULT_RADIUS + 0.5));
    assert!(point_approx_eq(cam.center, Point::new(0.0, 0.0)));
}

#[test]
fn zoom_keeps_anchor_world_point_fixed() {
    let mut cam = Camera { center: Point::new(0.1, -0.2), r: 1.0 };
    let anchor = Point::new(0.6, 0.4);
    let world_before = cam.view_to_world(anchor);
    cam.zoom(1.5, anchor).unwrap();
    let world_after = cam.view_to_world(anchor);
    assert!(point_approx_eq(world_before, world_after));
}

#[test]
fn zoom_out_keeps_anchor_world_point_fixed() {
    let mut cam = Camera::default();
    let anchor = Point::new(-0.8, 0.3);
    let world_before = cam.view_to_world(anchor);
    cam.zoom(-0.4, anchor).unwrap();
    assert!(point_approx_eq(cam.view_to_world(anchor), world_before));
}

#[test]
fn zoom_zero_delta_is_noop() {
    let mut cam = Camera { center: Point::new(0.2, 0.2), r: 1.3 };
    let before = cam;
    cam.zoom(0.0, Point::new(0.9, -0.9)).unwrap();
    assert!(approx_eq(cam.r, before.r));
    assert!(point_approx_eq(cam.center, before.center));
}

#[test]
fn zoom_clamps_at_min_radius() {
    let mut cam = Camera::default();
    for _ in 0..100 {
        cam.zoom(-1e9, Point::new(0.3, 0.3)).unwrap();
        assert!(cam.r > 0.0);
    }
    assert_eq!(cam.r, MIN_RADIUS);
}

#[test]
fn zoom_clamps_at_max_radius() {
    let mut cam = Camera::default();
    for _ in 0..100 {
        cam.zoom(1e300, Point::new(0.0, 0.0)).unwrap();
        assert!(cam.r.is_finite());
    }
    assert_eq!(cam.r, MAX_RADIUS);
}

#[test]
fn zoom_rejects_nan_delta() {
    let mut cam = Camera::default();
    let err = cam.zoom(f64::NAN, Point::new(0.0, 0.0)).unwrap_err();
    assert!(matches!(err, CanvasError::InvalidArgument(_)));
    assert_eq!(cam, Camera::default());
}

#[test]
fn zoom_rejects_infinite_anchor() {
    let mut cam = Camera::default();
    assert!(cam.zoom(0.1, Point::new(f64::INFINITY, 0.0)).is_err());
    assert_eq!(cam, Camera::default());
}

// --- pan ---

#[test]
fn pan_translates_center() {
    let mut cam = Camera::default();
    cam.pan(0.1, -0.2).unwrap();
    assert!(point_approx_eq(cam.center, Point::new(0.1, -0.2)));
    assert_eq!(cam.r, DEFAULT_RADIUS);
}

#[test]
fn pan_accumulates() {
    let mut cam = Camera::default();
    cam.pan(0.1, 0.0).unwrap();
    cam.pan(0.1, 0.0).unwrap();
    assert!(point_approx_eq(cam.center, Point::new(0.2, 0.0)));
}

#[test]
fn pan_rejects_non_finite() {
    let mut cam = Camera::default();
    assert!(cam.pan(f64::NAN, 0.0).is_err());
    assert!(cam.pan(0.0, f64::NEG_INFINITY).is_err());
    assert_eq!(cam, Camera::default());
}

#[test]
fn pan_rejects_overflow() {
    let mut cam = Camera::default();
    cam.pan(f64::MAX, 0.0).unwrap();
    assert!(cam.pan(f64::MAX, 0.0).is_err());
    assert_eq!(cam.center.x, f64::MAX);
}

// --- reset ---

#[test]
fn reset_restores_default() {
    let mut cam = Camera::default();
    cam.pan(0.4, 0.4).unwrap();
    cam.zoom(3.0, Point::new(0.5, 0.5)).unwrap();
    cam.reset();
    assert_eq!(cam, Camera::default());
}

#[test]
fn reset_is_idempotent() {
    let mut cam = Camera::default();
    cam.reset();
    cam.reset();
    assert_eq!(cam.r, DEFAULT_RADIUS);
    assert_eq!(cam.center, Point::new(0.0, 0.0));
}

#[test]
fn pan_twice_then_reset_returns_to_origin() {
    let mut cam = Camera::default();
    cam.pan(0.1, 0.0).unwrap();
    cam.pan(0.1, 0.0).unwrap();
    cam.reset();
    assert_eq!(cam.center, Camera::default().center);
}
