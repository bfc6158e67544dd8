use crate::assets::color::Color;
use crate::text::layout::Alignment;

/// Styling shared by all three text blocks.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Registered font family. Empty or unknown names fall back to the first registered family.
    pub font_family: String,
    /// Text fill.
    pub text_color: Color,
    /// Horizontal anchor of every line.
    pub align: Alignment,
    /// Draw the banner strip behind the text.
    pub banner: bool,
    /// Banner fill.
    pub banner_color: Color,
    /// Baseline of the first line of the first non-empty block.
    pub anchor_y: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: String::new(),
            text_color: Color::WHITE,
            align: Alignment::Center,
            banner: false,
            banner_color: Color::rgb(0xc6, 0x28, 0x28),
            anchor_y: 900.0,
        }
    }
}

/// One style control change.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "field", content = "value")]
pub enum StyleChange {
    /// Font family picker.
    FontFamily(String),
    /// Text color picker.
    TextColor(Color),
    /// Alignment selector.
    Align(Alignment),
    /// Banner checkbox.
    Banner(bool),
    /// Banner color picker.
    BannerColor(Color),
    /// Vertical text anchor.
    AnchorY(f64),
}

impl TextStyle {
    /// Apply one control change. Returns `false` (leaving the style untouched) for values that
    /// cannot be applied, such as a non-finite anchor.
    pub fn apply(&mut self, change: StyleChange) -> bool {
        match change {
            StyleChange::FontFamily(f) => self.font_family = f,
            StyleChange::TextColor(c) => self.text_color = c,
            StyleChange::Align(a) => self.align = a,
            StyleChange::Banner(b) => self.banner = b,
            StyleChange::BannerColor(c) => self.banner_color = c,
            StyleChange::AnchorY(y) => {
                if !y.is_finite() {
                    return false;
                }
                self.anchor_y = y;
            }
        }
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/style.rs"]
mod tests;
