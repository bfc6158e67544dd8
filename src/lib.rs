//! Photocard is the compositing core of a photo-card editor.
//!
//! A session binds one decorative template to a user photo and up to three lines of wrapped
//! text, then renders the card on a fixed 1080x1080 surface:
//!
//! - Load a [`TemplateHandoff`] and its art into a [`TemplateModel`]
//! - Create an [`EditorSession`]
//! - Feed it [`EditorEvent`]s (drag, zoom, rotate, text, style, reset, undo)
//! - Export the card as PNG or JPEG
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod editor;
mod encode;
mod foundation;
mod render;
mod session;
mod template;
mod text;

pub use crate::foundation::core::{Affine, Canvas, FrameRect, Point, Rect, Vec2};
pub use crate::foundation::error::{PhotocardError, PhotocardResult};

pub use crate::assets::color::Color;
pub use crate::assets::decode::{PreparedImage, decode_image, parse_svg};
pub use crate::assets::fonts::{FONT_DIR_ENV, FontBook};
pub use crate::assets::svg_raster::rasterize_svg;
pub use crate::editor::event::{EditorEvent, EventOutcome};
pub use crate::editor::history::{HistorySnapshot, HistoryStack};
pub use crate::editor::style::{StyleChange, TextStyle};
pub use crate::editor::transform::{DragTracker, TransformState};
pub use crate::encode::export::{
    DEFAULT_JPEG_QUALITY, EXPORT_STEM, ExportFormat, ExportedImage, export_frame,
};
pub use crate::render::backend::FrameRGBA;
pub use crate::render::compositor::{Compositor, ImagePaint, Scene, TextRun};
pub use crate::session::editor_session::{EditorOpts, EditorSession, TEXT_SLOTS};
pub use crate::template::handoff::{TemplateHandoff, normalize_rel_path};
pub use crate::template::model::TemplateModel;
pub use crate::text::layout::{Alignment, PlacedLine, TextLayout, TextMetrics, layout_blocks};
pub use crate::text::shaping::{ParleyMeasure, ShapedLine, ShapedRun, TextLayoutEngine};
pub use crate::text::wrap::{FixedAdvance, TextMeasure, wrap_words};
