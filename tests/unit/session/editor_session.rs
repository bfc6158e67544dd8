use super::*;
use crate::foundation::core::FrameRect;
use crate::text::layout::Alignment;

fn opts() -> EditorOpts {
    EditorOpts {
        text: TextMetrics::default(),
        fonts: FontBook::new(),
        clear_rgba: None,
        jpeg_quality: DEFAULT_JPEG_QUALITY,
    }
}

fn close(px: Option<[u8; 4]>, want: [u8; 4]) -> bool {
    px.is_some_and(|px| {
        px.iter()
            .zip(want.iter())
            .all(|(a, b)| (i16::from(*a) - i16::from(*b)).abs() <= 2)
    })
}

fn session() -> EditorSession {
    let art = PreparedImage::from_premul_rgba8(4, 4, vec![0; 4 * 4 * 4]).unwrap();
    let frame = FrameRect::new(90.0, 90.0, 900.0, 900.0).unwrap();
    let template = TemplateModel::from_parts("Birthday", frame, art).unwrap();
    EditorSession::new(template, opts()).unwrap()
}

fn png_bytes(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn starts_at_frame_origin_with_empty_history() {
    let s = session();
    assert_eq!(s.transform(), TransformState::at_frame_origin(s.template().frame()));
    assert_eq!(s.history_len(), 0);
    assert!(s.photo().is_none());
    assert!(s.font_families().is_empty());
}

#[test]
fn photo_load_cover_fits_and_commits() {
    let mut s = session();
    let out = s.dispatch(EditorEvent::ImageLoaded(png_bytes(1200, 800, [255, 0, 0, 255])));
    assert_eq!(out, EventOutcome::Rendered);
    let t = s.transform();
    assert_eq!(t.scale, 0.75);
    assert_eq!((t.offset_x, t.offset_y), (90.0, 240.0));
    assert_eq!(s.history_len(), 1);

    // Inside the frame and the photo box.
    assert!(close(s.frame().pixel(540, 540), [255, 0, 0, 255]));
    // Frame area above the photo box stays clear.
    assert!(close(s.frame().pixel(540, 150), [0, 0, 0, 0]));
}

#[test]
fn undecodable_photo_keeps_previous_state() {
    let mut s = session();
    s.dispatch(EditorEvent::ImageLoaded(png_bytes(20, 10, [0, 255, 0, 255])));
    let before = s.transform();

    let out = s.dispatch(EditorEvent::ImageLoaded(b"not an image".to_vec()));
    assert_eq!(out, EventOutcome::Ignored);
    assert_eq!(s.transform(), before);
    assert_eq!(s.photo().map(|p| (p.width, p.height)), Some((20, 10)));
    assert_eq!(s.history_len(), 1);
}

#[test]
fn drag_moves_photo_and_commits_once_on_release() {
    let mut s = session();
    s.dispatch(EditorEvent::ImageLoaded(png_bytes(100, 100, [0, 0, 255, 255])));
    let start = s.transform();

    assert_eq!(
        s.dispatch(EditorEvent::DragMove { x: 0.0, y: 0.0 }),
        EventOutcome::Ignored
    );
    s.dispatch(EditorEvent::DragStart { x: 500.0, y: 500.0 });
    s.dispatch(EditorEvent::DragMove { x: 510.0, y: 480.0 });
    s.dispatch(EditorEvent::DragMove { x: 520.0, y: 470.0 });
    assert_eq!(s.history_len(), 1);
    assert_eq!(s.dispatch(EditorEvent::DragEnd), EventOutcome::Rendered);
    assert_eq!(s.history_len(), 2);
    assert_eq!(s.dispatch(EditorEvent::DragEnd), EventOutcome::Ignored);
    assert_eq!(s.history_len(), 2);

    let t = s.transform();
    assert_eq!(t.offset_x, start.offset_x + 20.0);
    assert_eq!(t.offset_y, start.offset_y - 30.0);
}

#[test]
fn reset_restores_placement_clears_text_and_commits_once() {
    let mut s = session();
    s.dispatch(EditorEvent::ImageLoaded(png_bytes(1200, 800, [255, 0, 0, 255])));
    s.dispatch(EditorEvent::ZoomChanged(2.0));
    s.dispatch(EditorEvent::RotationChanged(45.0));
    s.dispatch(EditorEvent::TextChanged {
        slot: 0,
        text: "Happy".into(),
    });
    let n = s.history_len();

    assert_eq!(s.dispatch(EditorEvent::Reset), EventOutcome::Rendered);
    assert_eq!(s.history_len(), n + 1);
    assert_eq!(
        s.transform(),
        TransformState {
            offset_x: 90.0,
            offset_y: 90.0,
            scale: 1.0,
            rotation_degrees: 0.0,
        }
    );
    assert!(s.texts().iter().all(String::is_empty));
}

#[test]
fn undo_restores_previous_commit_and_underflow_is_a_no_op() {
    let mut s = session();
    assert_eq!(s.dispatch(EditorEvent::Undo), EventOutcome::Ignored);

    s.dispatch(EditorEvent::ImageLoaded(png_bytes(1200, 800, [255, 0, 0, 255])));
    let loaded = s.snapshot();
    assert_eq!(s.dispatch(EditorEvent::Undo), EventOutcome::Ignored);
    assert_eq!(s.history_len(), 1);

    s.dispatch(EditorEvent::TextChanged {
        slot: 2,
        text: "!".into(),
    });
    s.dispatch(EditorEvent::StyleChanged(StyleChange::Align(Alignment::End)));
    s.dispatch(EditorEvent::DragStart { x: 0.0, y: 0.0 });
    s.dispatch(EditorEvent::DragMove { x: 5.0, y: 5.0 });
    s.dispatch(EditorEvent::DragEnd);
    assert_eq!(s.history_len(), 2);

    assert_eq!(s.dispatch(EditorEvent::Undo), EventOutcome::Rendered);
    assert_eq!(s.history_len(), 1);
    assert_eq!(s.snapshot(), loaded);
}

#[test]
fn invalid_control_values_are_ignored() {
    let mut s = session();
    let before = s.snapshot();
    assert_eq!(s.dispatch(EditorEvent::ZoomChanged(0.0)), EventOutcome::Ignored);
    assert_eq!(
        s.dispatch(EditorEvent::RotationChanged(f64::NAN)),
        EventOutcome::Ignored
    );
    assert_eq!(
        s.dispatch(EditorEvent::TextChanged {
            slot: 3,
            text: "x".into()
        }),
        EventOutcome::Ignored
    );
    assert_eq!(
        s.dispatch(EditorEvent::StyleChanged(StyleChange::AnchorY(f64::INFINITY))),
        EventOutcome::Ignored
    );
    assert_eq!(s.snapshot(), before);
}

#[test]
fn banner_is_drawn_without_fonts() {
    let mut s = session();
    s.dispatch(EditorEvent::StyleChanged(StyleChange::Banner(true)));
    s.dispatch(EditorEvent::TextChanged {
        slot: 0,
        text: "Happy".into(),
    });
    let layout = s.text_layout();
    assert_eq!(layout.lines.len(), 1);
    // Default anchor 900: banner spans 850..1030.
    assert!(close(s.frame().pixel(10, 900), [0xc6, 0x28, 0x28, 255]));
    assert!(close(s.frame().pixel(10, 840), [0, 0, 0, 0]));
}

#[test]
fn export_renders_and_encodes() {
    let mut s = session();
    s.dispatch(EditorEvent::ImageLoaded(png_bytes(50, 50, [0, 128, 0, 255])));
    let EventOutcome::Exported(out) = s.dispatch(EditorEvent::Export {
        format: ExportFormat::Jpeg,
    }) else {
        panic!("expected an export");
    };
    assert_eq!(out.mime, "image/jpeg");
    assert_eq!(out.file_name, "photocard.jpg");
    assert_eq!(out.quality, Some(0.95));
    let decoded = image::load_from_memory(&out.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1080, 1080));
}

#[test]
fn bad_jpeg_quality_fails_session_construction() {
    let art = PreparedImage::from_premul_rgba8(1, 1, vec![0; 4]).unwrap();
    let frame = FrameRect::new(0.0, 0.0, 10.0, 10.0).unwrap();
    let template = TemplateModel::from_parts("t", frame, art).unwrap();
    let err = EditorSession::new(
        template,
        EditorOpts {
            jpeg_quality: 0.0,
            ..opts()
        },
    )
    .unwrap_err();
    assert!(matches!(err, crate::foundation::error::PhotocardError::Export(_)));
}
