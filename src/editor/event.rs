use crate::editor::style::StyleChange;
use crate::encode::export::{ExportFormat, ExportedImage};

/// One user interaction, as delivered by the UI layer.
///
/// Pointer coordinates are in canvas space; map display coordinates with
/// [`crate::Canvas::map_from_display`] first. JSON uses serde's external tagging, for example
/// `"undo"`, `{"zoom_changed": 1.2}` or `{"style_changed": {"field": "align", "value": "left"}}`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorEvent {
    /// Pointer pressed on the canvas.
    DragStart {
        /// Canvas x.
        x: f64,
        /// Canvas y.
        y: f64,
    },
    /// Pointer moved.
    DragMove {
        /// Canvas x.
        x: f64,
        /// Canvas y.
        y: f64,
    },
    /// Pointer released.
    DragEnd,
    /// Zoom control moved.
    ZoomChanged(f64),
    /// Rotation control moved, in degrees.
    RotationChanged(f64),
    /// A text input changed.
    TextChanged {
        /// Slot index, `0..=2`.
        slot: usize,
        /// New contents.
        text: String,
    },
    /// A style control changed.
    StyleChanged(StyleChange),
    /// Reset button.
    Reset,
    /// Undo button.
    Undo,
    /// Download button.
    Export {
        /// Requested encoding.
        format: ExportFormat,
    },
    /// A photo file was picked. Carries the raw file bytes.
    ImageLoaded(Vec<u8>),
}

/// What handling an [`EditorEvent`] did.
#[derive(Clone, Debug, PartialEq)]
pub enum EventOutcome {
    /// State changed and the surface was redrawn.
    Rendered,
    /// Nothing changed: invalid value, undecodable photo, empty history, or no active drag.
    Ignored,
    /// Export produced a file.
    Exported(ExportedImage),
    /// State may have changed but drawing or encoding failed.
    Failed(String),
}

impl EventOutcome {
    /// Return `true` unless the event was ignored or failed.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Rendered | Self::Exported(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/event.rs"]
mod tests;
