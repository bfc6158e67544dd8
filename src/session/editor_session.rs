use crate::assets::decode::{PreparedImage, decode_image};
use crate::assets::fonts::FontBook;
use crate::editor::event::{EditorEvent, EventOutcome};
use crate::editor::history::{HistorySnapshot, HistoryStack};
use crate::editor::style::{StyleChange, TextStyle};
use crate::editor::transform::{DragTracker, TransformState};
use crate::encode::export::{
    DEFAULT_JPEG_QUALITY, ExportFormat, ExportedImage, export_frame, jpeg_quality_u8,
};
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::PhotocardResult;
use crate::render::backend::FrameRGBA;
use crate::render::compositor::{Compositor, ImagePaint, Scene, TextRun};
use crate::template::model::TemplateModel;
use crate::text::layout::{TextLayout, TextMetrics, layout_blocks};
use crate::text::shaping::TextLayoutEngine;
use crate::text::wrap::FixedAdvance;

/// Number of text inputs on a card.
pub const TEXT_SLOTS: usize = 3;

/// Session configuration.
#[derive(Clone, Debug)]
pub struct EditorOpts {
    /// Typographic constants.
    pub text: TextMetrics,
    /// Fonts available to the family picker. The first registered family is the default.
    pub fonts: FontBook,
    /// Surface clear color. `None` clears to transparent.
    pub clear_rgba: Option<[u8; 4]>,
    /// JPEG export quality in `(0, 1]`.
    pub jpeg_quality: f32,
}

impl Default for EditorOpts {
    fn default() -> Self {
        Self {
            text: TextMetrics::default(),
            fonts: FontBook::from_env(),
            clear_rgba: None,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

struct UserPhoto {
    image: PreparedImage,
    paint: ImagePaint,
}

/// Interactive photo-card editor bound to one template.
///
/// Mutating methods only change state; [`EditorSession::dispatch`] redraws after every event,
/// and [`EditorSession::export`] always redraws before encoding.
pub struct EditorSession {
    template: TemplateModel,
    art: ImagePaint,
    photo: Option<UserPhoto>,
    transform: TransformState,
    drag: DragTracker,
    texts: [String; TEXT_SLOTS],
    style: TextStyle,
    history: HistoryStack,
    metrics: TextMetrics,
    jpeg_quality: f32,
    text_engine: TextLayoutEngine,
    compositor: Compositor,
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("template", &self.template.name())
            .field("has_photo", &self.photo.is_some())
            .field("transform", &self.transform)
            .field("texts", &self.texts)
            .field("history_len", &self.history.len())
            .finish()
    }
}

impl EditorSession {
    /// Start a session on a loaded template and draw the first frame.
    #[tracing::instrument(skip_all, fields(template = template.name()))]
    pub fn new(template: TemplateModel, opts: EditorOpts) -> PhotocardResult<Self> {
        jpeg_quality_u8(opts.jpeg_quality)?;
        let art = ImagePaint::new(template.art())?;
        let compositor = Compositor::new(Canvas::CARD, opts.clear_rgba)?;
        let text_engine = TextLayoutEngine::new(&opts.fonts);
        if !text_engine.has_fonts() {
            tracing::warn!("no fonts registered; text will be laid out but not drawn");
        }

        let style = TextStyle {
            font_family: text_engine
                .family_names()
                .first()
                .map(|s| s.to_string())
                .unwrap_or_default(),
            ..TextStyle::default()
        };

        let mut session = Self {
            transform: TransformState::at_frame_origin(template.frame()),
            template,
            art,
            photo: None,
            drag: DragTracker::default(),
            texts: Default::default(),
            style,
            history: HistoryStack::new(),
            metrics: opts.text,
            jpeg_quality: opts.jpeg_quality,
            text_engine,
            compositor,
        };
        session.render()?;
        Ok(session)
    }

    /// Handle one UI event and redraw. Never fails; problems are logged and reported in the
    /// outcome.
    #[tracing::instrument(level = "debug", skip_all, fields(event = event_name(&event)))]
    pub fn dispatch(&mut self, event: EditorEvent) -> EventOutcome {
        let changed = match event {
            EditorEvent::DragStart { x, y } => {
                self.begin_drag(Point::new(x, y));
                true
            }
            EditorEvent::DragMove { x, y } => self.update_drag(Point::new(x, y)),
            EditorEvent::DragEnd => self.end_drag(),
            EditorEvent::ZoomChanged(v) => self.set_scale(v),
            EditorEvent::RotationChanged(deg) => self.set_rotation(deg),
            EditorEvent::TextChanged { slot, text } => self.set_text(slot, text),
            EditorEvent::StyleChanged(change) => self.apply_style(change),
            EditorEvent::Reset => {
                self.reset();
                true
            }
            EditorEvent::Undo => self.undo(),
            EditorEvent::Export { format } => {
                return match self.export(format) {
                    Ok(out) => EventOutcome::Exported(out),
                    Err(e) => {
                        tracing::warn!(error = %e, "export failed");
                        EventOutcome::Failed(e.to_string())
                    }
                };
            }
            EditorEvent::ImageLoaded(bytes) => match self.load_image_bytes(&bytes) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(error = %e, "photo did not decode; keeping previous photo");
                    false
                }
            },
        };

        if !changed {
            return EventOutcome::Ignored;
        }
        match self.render() {
            Ok(()) => EventOutcome::Rendered,
            Err(e) => {
                tracing::warn!(error = %e, "render failed");
                EventOutcome::Failed(e.to_string())
            }
        }
    }

    /// Decode and adopt a new photo, cover-fit it into the frame and commit a snapshot.
    ///
    /// On error the previous photo and placement are kept.
    pub fn load_image_bytes(&mut self, bytes: &[u8]) -> PhotocardResult<()> {
        let image = decode_image(bytes)?;
        let paint = ImagePaint::new(&image)?;
        self.transform =
            TransformState::cover_fit(self.template.frame(), image.width, image.height);
        tracing::debug!(
            width = image.width,
            height = image.height,
            scale = self.transform.scale,
            "photo loaded"
        );
        self.photo = Some(UserPhoto { image, paint });
        self.commit();
        Ok(())
    }

    /// Start dragging the photo from `pointer`.
    pub fn begin_drag(&mut self, pointer: Point) {
        self.drag.begin(&self.transform, pointer);
    }

    /// Follow the pointer. Returns `false` when no drag is active.
    pub fn update_drag(&mut self, pointer: Point) -> bool {
        self.drag.update(&mut self.transform, pointer)
    }

    /// Finish a drag and commit a snapshot. Returns `false` when no drag was active.
    pub fn end_drag(&mut self) -> bool {
        if !self.drag.end() {
            return false;
        }
        self.commit();
        true
    }

    /// Set the zoom factor, pivoting on the top-left of the photo box.
    pub fn set_scale(&mut self, scale: f64) -> bool {
        let ok = self.transform.set_scale(scale);
        if !ok {
            tracing::debug!(scale, "ignoring invalid zoom");
        }
        ok
    }

    /// Set the photo rotation in degrees.
    pub fn set_rotation(&mut self, degrees: f64) -> bool {
        let ok = self.transform.set_rotation(degrees);
        if !ok {
            tracing::debug!(degrees, "ignoring invalid rotation");
        }
        ok
    }

    /// Replace the contents of text slot `slot`.
    pub fn set_text(&mut self, slot: usize, text: impl Into<String>) -> bool {
        let Some(dst) = self.texts.get_mut(slot) else {
            tracing::debug!(slot, "ignoring text for unknown slot");
            return false;
        };
        *dst = text.into();
        true
    }

    /// Apply one style control change.
    pub fn apply_style(&mut self, change: StyleChange) -> bool {
        let ok = self.style.apply(change);
        if !ok {
            tracing::debug!("ignoring invalid style value");
        }
        ok
    }

    /// Put the photo back at the frame origin unscaled and unrotated, clear all text and commit.
    pub fn reset(&mut self) {
        self.transform = TransformState::at_frame_origin(self.template.frame());
        self.texts = Default::default();
        self.commit();
    }

    /// Restore the previous snapshot. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(prev) = self.history.undo().cloned() else {
            tracing::debug!(entries = self.history.len(), "nothing to undo");
            return false;
        };
        self.transform = prev.transform;
        self.texts = prev.texts;
        self.style = prev.style;
        true
    }

    /// Copy of every editable field.
    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            transform: self.transform,
            texts: self.texts.clone(),
            style: self.style.clone(),
        }
    }

    fn commit(&mut self) {
        self.history.commit(self.snapshot());
        tracing::debug!(entries = self.history.len(), "history commit");
    }

    /// Redraw and encode the card.
    pub fn export(&mut self, format: ExportFormat) -> PhotocardResult<ExportedImage> {
        self.render()?;
        export_frame(&self.compositor.readback(), format, self.jpeg_quality)
    }

    /// Lay out the text for the current state.
    pub fn text_layout(&mut self) -> TextLayout {
        let canvas_w = f64::from(self.compositor.canvas().width);
        match self
            .text_engine
            .measurer(&self.style.font_family, self.metrics.font_size)
        {
            Some(mut m) => layout_blocks(&self.texts, &self.style, &self.metrics, canvas_w, &mut m),
            None => {
                let mut m = FixedAdvance::approximate(self.metrics.font_size);
                layout_blocks(&self.texts, &self.style, &self.metrics, canvas_w, &mut m)
            }
        }
    }

    /// Redraw the surface from the current state.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn render(&mut self) -> PhotocardResult<()> {
        let layout = self.text_layout();
        let mut runs = Vec::with_capacity(layout.lines.len());
        for line in &layout.lines {
            let Some(shaped) =
                self.text_engine
                    .shape_line(&self.style.font_family, self.metrics.font_size, &line.text)
            else {
                break;
            };
            runs.push(TextRun {
                left: layout.line_left(line.anchor_x, shaped.width),
                baseline: line.baseline_y,
                line: shaped,
            });
        }

        let scene = Scene {
            frame: self.template.frame(),
            photo: self
                .photo
                .as_ref()
                .map(|p| (&p.paint, self.transform)),
            art: &self.art,
            banner: layout.banner.map(|r| (r, self.style.banner_color)),
            text: &runs,
            text_color: self.style.text_color,
        };
        self.compositor.render(&scene)
    }

    /// Last rendered surface.
    pub fn frame(&self) -> FrameRGBA {
        self.compositor.readback()
    }

    /// Bound template.
    pub fn template(&self) -> &TemplateModel {
        &self.template
    }

    /// Current photo placement.
    pub fn transform(&self) -> TransformState {
        self.transform
    }

    /// Current text slots.
    pub fn texts(&self) -> &[String; TEXT_SLOTS] {
        &self.texts
    }

    /// Current text style.
    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Decoded user photo, if one loaded.
    pub fn photo(&self) -> Option<&PreparedImage> {
        self.photo.as_ref().map(|p| &p.image)
    }

    /// Number of committed snapshots.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Registered font families, in picker order.
    pub fn font_families(&self) -> Vec<&str> {
        self.text_engine.family_names()
    }
}

fn event_name(event: &EditorEvent) -> &'static str {
    match event {
        EditorEvent::DragStart { .. } => "drag_start",
        EditorEvent::DragMove { .. } => "drag_move",
        EditorEvent::DragEnd => "drag_end",
        EditorEvent::ZoomChanged(_) => "zoom_changed",
        EditorEvent::RotationChanged(_) => "rotation_changed",
        EditorEvent::TextChanged { .. } => "text_changed",
        EditorEvent::StyleChanged(_) => "style_changed",
        EditorEvent::Reset => "reset",
        EditorEvent::Undo => "undo",
        EditorEvent::Export { .. } => "export",
        EditorEvent::ImageLoaded(_) => "image_loaded",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor_session.rs"]
mod tests;
