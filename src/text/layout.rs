use crate::editor::style::TextStyle;
use crate::foundation::core::Rect;
use crate::text::wrap::{TextMeasure, wrap_words};

/// Horizontal anchor shared by every text line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Line starts at the anchor.
    #[serde(alias = "left")]
    Start,
    /// Line is centered on the anchor.
    #[default]
    Center,
    /// Line ends at the anchor.
    #[serde(alias = "right")]
    End,
}

impl std::str::FromStr for Alignment {
    type Err = crate::foundation::error::PhotocardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => Ok(Self::Start),
            "center" | "centre" => Ok(Self::Center),
            "right" | "end" => Ok(Self::End),
            other => Err(crate::foundation::error::PhotocardError::validation(format!(
                "unknown alignment '{other}'"
            ))),
        }
    }
}

/// Typographic constants for the card text.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextMetrics {
    /// Font size in pixels. Text is always set bold.
    pub font_size: f64,
    /// Distance between consecutive baselines.
    pub line_height: f64,
    /// Wrap width. Independent of alignment.
    pub max_width: f64,
    /// Banner top edge sits this far above the anchor baseline.
    pub banner_top_offset: f64,
    /// Banner height.
    pub banner_height: f64,
    /// Anchor x for [`Alignment::Start`].
    pub start_x: f64,
    /// Anchor x for [`Alignment::Center`].
    pub center_x: f64,
    /// Anchor x for [`Alignment::End`].
    pub end_x: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            font_size: 48.0,
            line_height: 56.0,
            max_width: 900.0,
            banner_top_offset: 50.0,
            banner_height: 180.0,
            start_x: 80.0,
            center_x: 540.0,
            end_x: 1000.0,
        }
    }
}

impl TextMetrics {
    /// Anchor x for `align`.
    pub fn anchor_x(&self, align: Alignment) -> f64 {
        match align {
            Alignment::Start => self.start_x,
            Alignment::Center => self.center_x,
            Alignment::End => self.end_x,
        }
    }
}

/// One wrapped line, positioned on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    /// Text slot the line came from.
    pub slot: usize,
    /// Line content without trailing separator.
    pub text: String,
    /// Horizontal anchor; interpret with the layout's alignment.
    pub anchor_x: f64,
    /// Alphabetic baseline.
    pub baseline_y: f64,
}

/// Pure geometry of the text overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayout {
    /// Lines in draw order.
    pub lines: Vec<PlacedLine>,
    /// Alignment every line is anchored with.
    pub align: Alignment,
    /// Banner strip, drawn beneath all lines.
    pub banner: Option<Rect>,
}

impl TextLayout {
    /// Vertical space consumed by all lines.
    pub fn total_height(&self, metrics: &TextMetrics) -> f64 {
        self.lines.len() as f64 * metrics.line_height
    }

    /// Left edge of a line of measured width `width` anchored at `anchor_x`.
    pub fn line_left(&self, anchor_x: f64, width: f64) -> f64 {
        match self.align {
            Alignment::Start => anchor_x,
            Alignment::Center => anchor_x - width / 2.0,
            Alignment::End => anchor_x - width,
        }
    }
}

/// Wrap and stack the three text blocks.
///
/// Empty blocks take no space. The banner spans `canvas_width` whenever the style enables it,
/// even with no text.
pub fn layout_blocks(
    texts: &[String; 3],
    style: &TextStyle,
    metrics: &TextMetrics,
    canvas_width: f64,
    measure: &mut dyn TextMeasure,
) -> TextLayout {
    let anchor_x = metrics.anchor_x(style.align);
    let mut lines = Vec::new();
    let mut offset = 0.0;

    for (slot, block) in texts.iter().enumerate() {
        if block.is_empty() {
            continue;
        }
        let wrapped = wrap_words(block, metrics.max_width, measure);
        let top = style.anchor_y + offset;
        offset += wrapped.len() as f64 * metrics.line_height;
        lines.extend(wrapped.into_iter().enumerate().map(|(i, text)| PlacedLine {
            slot,
            text,
            anchor_x,
            baseline_y: top + i as f64 * metrics.line_height,
        }));
    }

    let banner = style.banner.then(|| {
        let y0 = style.anchor_y - metrics.banner_top_offset;
        Rect::new(0.0, y0, canvas_width, y0 + metrics.banner_height)
    });

    TextLayout {
        lines,
        align: style.align,
        banner,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
