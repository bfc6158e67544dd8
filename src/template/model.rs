use std::path::Path;

use anyhow::Context;

use crate::assets::decode::{PreparedImage, decode_image, parse_svg};
use crate::assets::svg_raster::rasterize_svg;
use crate::foundation::core::{Canvas, FrameRect};
use crate::foundation::error::PhotocardResult;
use crate::template::handoff::{TemplateHandoff, normalize_rel_path};

/// A selected template with its art fully decoded.
///
/// Holding a `TemplateModel` means the background has finished loading, so any session built
/// from one can render immediately.
#[derive(Debug, Clone)]
pub struct TemplateModel {
    name: String,
    frame: FrameRect,
    art: PreparedImage,
}

impl TemplateModel {
    /// Load the handoff's art from `assets_root`.
    ///
    /// SVG art is rasterized at the canvas size; raster art is decoded at its own size and
    /// stretched over the canvas when drawn.
    #[tracing::instrument(skip(handoff, assets_root), fields(template = %handoff.name))]
    pub fn load(
        handoff: &TemplateHandoff,
        assets_root: impl AsRef<Path>,
        canvas: Canvas,
    ) -> PhotocardResult<Self> {
        handoff.validate()?;
        let rel = normalize_rel_path(&handoff.image)?;
        let path = assets_root.as_ref().join(Path::new(&rel));
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read template art '{}'", path.display()))?;

        let art = if handoff.is_svg() {
            let tree = parse_svg(&bytes)?;
            rasterize_svg(&tree, canvas.width, canvas.height)?
        } else {
            decode_image(&bytes)?
        };
        tracing::debug!(width = art.width, height = art.height, "template art ready");

        Ok(Self {
            name: handoff.name.clone(),
            frame: handoff.frame,
            art,
        })
    }

    /// Assemble a template from already-decoded art.
    pub fn from_parts(
        name: impl Into<String>,
        frame: FrameRect,
        art: PreparedImage,
    ) -> PhotocardResult<Self> {
        frame.validate()?;
        Ok(Self {
            name: name.into(),
            frame,
            art,
        })
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Photo window in canvas space.
    pub fn frame(&self) -> FrameRect {
        self.frame
    }

    /// Decoded background/foreground art.
    pub fn art(&self) -> &PreparedImage {
        &self.art
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/model.rs"]
mod tests;
