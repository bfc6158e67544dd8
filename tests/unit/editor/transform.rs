use super::*;

fn frame() -> FrameRect {
    FrameRect::new(90.0, 90.0, 900.0, 900.0).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn cover_fit_landscape_photo_in_square_frame() {
    let t = TransformState::cover_fit(frame(), 1200, 800);
    assert_eq!(t.scale, 0.75);
    assert_eq!(t.offset_x, 90.0);
    assert_eq!(t.offset_y, 240.0);
    assert_eq!(t.rotation_degrees, 0.0);
}

#[test]
fn cover_fit_always_covers_with_one_exact_side_and_even_margins() {
    let frames = [
        frame(),
        FrameRect::new(0.0, 0.0, 300.0, 500.0).unwrap(),
        FrameRect::new(12.5, 40.0, 640.0, 360.0).unwrap(),
    ];
    let sizes = [(1200, 800), (800, 1200), (1, 1), (4000, 30), (333, 777), (900, 900)];
    for f in frames {
        for (w, h) in sizes {
            let t = TransformState::cover_fit(f, w, h);
            let (sw, sh) = t.scaled_size(w, h);
            assert!(sw >= f.w - 1e-9 && sh >= f.h - 1e-9, "{w}x{h} in {f:?}");
            assert!(approx(sw, f.w) || approx(sh, f.h), "{w}x{h} in {f:?}");

            let left = f.x - t.offset_x;
            let right = (t.offset_x + sw) - (f.x + f.w);
            let top = f.y - t.offset_y;
            let bottom = (t.offset_y + sh) - (f.y + f.h);
            assert!(approx(left, right), "{w}x{h} in {f:?}");
            assert!(approx(top, bottom), "{w}x{h} in {f:?}");
        }
    }
}

#[test]
fn reset_placement_pins_to_frame_origin() {
    let t = TransformState::at_frame_origin(frame());
    assert_eq!(
        t,
        TransformState {
            offset_x: 90.0,
            offset_y: 90.0,
            scale: 1.0,
            rotation_degrees: 0.0,
        }
    );
}

#[test]
fn scale_rejects_non_positive_and_non_finite() {
    let mut t = TransformState::at_frame_origin(frame());
    assert!(t.set_scale(1.5));
    assert!(!t.set_scale(0.0));
    assert!(!t.set_scale(-2.0));
    assert!(!t.set_scale(f64::NAN));
    assert!(!t.set_scale(f64::INFINITY));
    assert_eq!(t.scale, 1.5);
}

#[test]
fn rotation_is_normalized() {
    let mut t = TransformState::at_frame_origin(frame());
    assert!(t.set_rotation(370.0));
    assert!(approx(t.rotation_degrees, 10.0));
    assert!(t.set_rotation(-180.0));
    assert_eq!(t.rotation_degrees, 180.0);
    assert!(!t.set_rotation(f64::NAN));
    assert_eq!(t.rotation_degrees, 180.0);
}

#[test]
fn image_affine_maps_corners_around_center() {
    let t = TransformState {
        offset_x: 100.0,
        offset_y: 50.0,
        scale: 0.5,
        rotation_degrees: 0.0,
    };
    let a = t.image_affine(200, 100);
    assert_eq!(a * Point::new(0.0, 0.0), Point::new(100.0, 50.0));
    assert_eq!(a * Point::new(200.0, 100.0), Point::new(200.0, 100.0));
    assert_eq!(t.center(200, 100), Point::new(150.0, 75.0));

    // 90 degrees clockwise in y-down space sends the top-left corner to the top-right.
    let r = TransformState {
        rotation_degrees: 90.0,
        ..t
    };
    let p = r.image_affine(200, 100) * Point::new(0.0, 0.0);
    assert!(approx(p.x, 150.0 + 25.0));
    assert!(approx(p.y, 75.0 - 50.0));
    let c = r.image_affine(200, 100) * Point::new(100.0, 50.0);
    assert!(approx(c.x, 150.0) && approx(c.y, 75.0));
}

#[test]
fn drag_is_anchor_relative() {
    let mut t = TransformState::at_frame_origin(frame());
    let mut drag = DragTracker::default();

    assert!(!drag.update(&mut t, Point::new(500.0, 500.0)));
    assert_eq!(t.offset_x, 90.0);

    drag.begin(&t, Point::new(100.0, 120.0));
    assert!(drag.is_active());
    assert!(drag.update(&mut t, Point::new(100.0, 120.0)));
    assert_eq!((t.offset_x, t.offset_y), (90.0, 90.0));

    assert!(drag.update(&mut t, Point::new(150.0, 100.0)));
    assert_eq!((t.offset_x, t.offset_y), (140.0, 70.0));

    assert!(drag.end());
    assert!(!drag.end());
    assert!(!drag.update(&mut t, Point::new(0.0, 0.0)));
    assert_eq!((t.offset_x, t.offset_y), (140.0, 70.0));
}
