use super::*;

#[test]
fn card_canvas_is_fixed_square() {
    assert_eq!(Canvas::default(), Canvas::CARD);
    assert_eq!(Canvas::CARD.rect(), Rect::new(0.0, 0.0, 1080.0, 1080.0));
}

#[test]
fn display_mapping_scales_into_canvas_space() {
    let p = Canvas::CARD.map_from_display(540.0, 540.0, Point::new(100.0, 50.0));
    assert_eq!(p, Point::new(200.0, 100.0));

    let unchanged = Canvas::CARD.map_from_display(0.0, 540.0, Point::new(7.0, 9.0));
    assert_eq!(unchanged, Point::new(7.0, 9.0));
}

#[test]
fn frame_rect_validation() {
    assert!(FrameRect::new(90.0, 90.0, 900.0, 900.0).is_ok());
    assert!(FrameRect::new(0.0, 0.0, 0.0, 10.0).is_err());
    assert!(FrameRect::new(0.0, 0.0, 10.0, -1.0).is_err());
    assert!(FrameRect::new(f64::NAN, 0.0, 10.0, 10.0).is_err());
}

#[test]
fn frame_rect_geometry() {
    let f = FrameRect::new(90.0, 100.0, 900.0, 450.0).unwrap();
    assert_eq!(f.aspect(), 2.0);
    assert_eq!(f.origin(), Point::new(90.0, 100.0));
    assert_eq!(f.to_rect(), Rect::new(90.0, 100.0, 990.0, 550.0));
}
