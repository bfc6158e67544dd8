use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{PhotocardError, PhotocardResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Decoded raster in premultiplied RGBA8 form.
///
/// Shared by reference: the user photo and template art are never mutated after decode.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Wrap already-premultiplied pixels, checking the buffer length.
    pub fn from_premul_rgba8(
        width: u32,
        height: u32,
        rgba8_premul: Vec<u8>,
    ) -> PhotocardResult<Self> {
        check_dims(width, height)?;
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if rgba8_premul.len() != expected {
            return Err(PhotocardError::decode(format!(
                "rgba buffer length {} does not match {width}x{height}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Width over height.
    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Decode any raster format supported by the `image` crate into premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> PhotocardResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    check_dims(width, height)?;

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Parse SVG source into a `usvg` tree.
pub fn parse_svg(bytes: &[u8]) -> PhotocardResult<usvg::Tree> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(tree)
}

// The raster backend addresses pixmaps with u16 dimensions.
fn check_dims(width: u32, height: u32) -> PhotocardResult<()> {
    if width == 0 || height == 0 {
        return Err(PhotocardError::decode("image has zero width or height"));
    }
    if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
        return Err(PhotocardError::decode(format!(
            "image {width}x{height} exceeds {0}x{0}",
            u16::MAX
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
