use std::borrow::Cow;

use crate::assets::fonts::FontBook;
use crate::text::wrap::TextMeasure;

/// Glyphs from one font face.
#[derive(Clone)]
pub struct ShapedRun {
    /// Face the glyph ids index into, as chosen by the shaper.
    pub font: vello_cpu::peniko::FontData,
    /// Positioned glyphs.
    pub glyphs: Vec<vello_cpu::Glyph>,
}

impl std::fmt::Debug for ShapedRun {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapedRun")
            .field("font_index", &self.font.index)
            .field("glyphs", &self.glyphs.len())
            .finish()
    }
}

/// One line shaped and ready to fill.
///
/// Glyph positions are relative to the line's left edge (x) and alphabetic baseline (y).
#[derive(Clone, Debug)]
pub struct ShapedLine {
    /// Runs in visual order. A line splits into several runs when faces change.
    pub runs: Vec<ShapedRun>,
    /// Size the glyphs were shaped at.
    pub font_size: f32,
    /// Advance width, trailing whitespace included.
    pub width: f64,
}

impl ShapedLine {
    /// Return `true` when there is nothing to fill.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.glyphs.is_empty())
    }

    /// Total glyph count over all runs.
    pub fn glyph_count(&self) -> usize {
        self.runs.iter().map(|r| r.glyphs.len()).sum()
    }
}

/// Stateful helper for shaping card text with Parley from registered font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    families: Vec<String>,
}

impl std::fmt::Debug for TextLayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLayoutEngine")
            .field("families", &self.families)
            .finish()
    }
}

impl TextLayoutEngine {
    /// Register every source in `fonts` with fresh Parley contexts.
    ///
    /// Sources that yield no family are skipped with a warning.
    pub fn new(fonts: &FontBook) -> Self {
        let mut font_ctx = parley::FontContext::default();
        let mut families = Vec::new();

        for (i, bytes) in fonts.sources().iter().enumerate() {
            let registered = font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::from(bytes.as_ref().clone()), None);
            if registered.is_empty() {
                tracing::warn!(source = i, "font source registered no families");
                continue;
            }
            for (id, faces) in registered {
                let Some(name) = font_ctx.collection.family_name(id) else {
                    continue;
                };
                // Several files (or collection faces) can share one family.
                if families.iter().any(|f: &String| f.eq_ignore_ascii_case(name)) {
                    tracing::debug!(family = name, faces = faces.len(), "added faces to family");
                    continue;
                }
                tracing::debug!(family = name, faces = faces.len(), "registered font family");
                families.push(name.to_string());
            }
        }

        Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            families,
        }
    }

    /// Registered family names in registration order, each listed once.
    pub fn family_names(&self) -> Vec<&str> {
        self.families.iter().map(String::as_str).collect()
    }

    /// Return `true` when at least one family can draw text.
    pub fn has_fonts(&self) -> bool {
        !self.families.is_empty()
    }

    /// Resolve a requested family, falling back to the first registered one.
    pub fn resolve_family(&self, requested: &str) -> Option<&str> {
        self.resolve(requested).map(|i| self.families[i].as_str())
    }

    fn resolve(&self, requested: &str) -> Option<usize> {
        if self.families.is_empty() {
            return None;
        }
        let requested = requested.trim();
        match self
            .families
            .iter()
            .position(|f| f.eq_ignore_ascii_case(requested))
        {
            Some(i) => Some(i),
            None => {
                if !requested.is_empty() {
                    tracing::debug!(
                        requested,
                        fallback = %self.families[0],
                        "unknown font family"
                    );
                }
                Some(0)
            }
        }
    }

    /// Width oracle for `family` at `font_size`, or `None` when no font is registered.
    pub fn measurer(&mut self, family: &str, font_size: f64) -> Option<ParleyMeasure<'_>> {
        let family = self.resolve(family)?;
        Some(ParleyMeasure {
            engine: self,
            family,
            font_size: font_size as f32,
        })
    }

    /// Shape one line in bold at `font_size`. Returns `None` when no font is registered.
    ///
    /// Each run carries the face Parley matched, so a family registered from separate regular
    /// and bold files draws with the bold outlines.
    pub fn shape_line(&mut self, family: &str, font_size: f64, text: &str) -> Option<ShapedLine> {
        let family = self.resolve(family)?;
        let font_size = font_size as f32;
        let layout = self.build(family, font_size, text);

        let baseline = layout
            .lines()
            .next()
            .map(|l| l.metrics().baseline)
            .unwrap_or(0.0);
        let mut runs = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let mut x = run.offset();
                let y = run.baseline() - baseline;
                let glyphs = run
                    .glyphs()
                    .map(|g| {
                        let glyph = vello_cpu::Glyph {
                            id: g.id,
                            x: x + g.x,
                            y: y - g.y,
                        };
                        x += g.advance;
                        glyph
                    })
                    .collect();
                runs.push(ShapedRun {
                    font: run.run().font().clone(),
                    glyphs,
                });
            }
        }

        Some(ShapedLine {
            runs,
            font_size,
            width: f64::from(layout.full_width()),
        })
    }

    fn build(&mut self, family: usize, font_size: f32, text: &str) -> parley::Layout<()> {
        // Canvas text draws line breaks as plain spaces.
        let text = text.replace(['\n', '\r'], " ");
        let name = self.families[family].clone();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, &text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Single(parley::style::FontFamily::Named(Cow::Owned(name))),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font_size));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::BOLD,
        ));

        let mut layout: parley::Layout<()> = builder.build(&text);
        layout.break_all_lines(None);
        layout
    }
}

/// [`TextMeasure`] backed by Parley shaping.
pub struct ParleyMeasure<'a> {
    engine: &'a mut TextLayoutEngine,
    family: usize,
    font_size: f32,
}

impl TextMeasure for ParleyMeasure<'_> {
    fn measure(&mut self, text: &str) -> f64 {
        f64::from(
            self.engine
                .build(self.family, self.font_size, text)
                .full_width(),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/shaping.rs"]
mod tests;
