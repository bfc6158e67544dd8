use crate::assets::decode::PreparedImage;
use crate::foundation::error::{PhotocardError, PhotocardResult};

// Upper bound on either raster dimension.
const MAX_DIM: u32 = 16_384;

/// Rasterize an SVG tree stretched to exactly `width`x`height` pixels.
///
/// `tiny_skia` pixmaps are premultiplied RGBA8, so the bytes are used as-is.
pub fn rasterize_svg(tree: &usvg::Tree, width: u32, height: u32) -> PhotocardResult<PreparedImage> {
    if width > MAX_DIM || height > MAX_DIM {
        return Err(PhotocardError::decode(format!(
            "svg raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    let size = tree.size();
    if !(size.width().is_finite() && size.height().is_finite())
        || size.width() <= 0.0
        || size.height() <= 0.0
    {
        return Err(PhotocardError::decode("svg has invalid width/height"));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PhotocardError::decode("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    PreparedImage::from_premul_rgba8(width, height, pixmap.take())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_raster.rs"]
mod tests;
