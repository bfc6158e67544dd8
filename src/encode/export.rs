use std::io::Cursor;
use std::str::FromStr;

use anyhow::Context;
use image::ImageEncoder;

use crate::foundation::error::{PhotocardError, PhotocardResult};
use crate::foundation::math::mul_div255_u8;
use crate::render::backend::FrameRGBA;

/// Base name of every exported file.
pub const EXPORT_STEM: &str = "photocard";

/// Default JPEG quality, on the `(0, 1]` scale.
pub const DEFAULT_JPEG_QUALITY: f32 = 0.95;

/// Download encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ExportFormat {
    /// Lossless, keeps alpha.
    #[default]
    #[serde(rename = "png")]
    Png,
    /// Lossy, opaque.
    #[serde(rename = "jpg", alias = "jpeg")]
    Jpeg,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    /// MIME type of the encoded bytes.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// Suggested download name.
    pub fn file_name(self) -> String {
        format!("{EXPORT_STEM}.{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = PhotocardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            other => Err(PhotocardError::validation(format!(
                "unsupported export format '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Encoded download.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportedImage {
    /// Encoded file contents.
    pub bytes: Vec<u8>,
    /// MIME type of `bytes`.
    pub mime: &'static str,
    /// Suggested file name.
    pub file_name: String,
    /// Quality handed to the encoder, on the `(0, 1]` scale. `None` for lossless formats.
    pub quality: Option<f32>,
}

/// Encode a rendered frame.
///
/// `quality` applies to JPEG only and must lie in `(0, 1]`. JPEG has no alpha channel, so
/// translucent pixels are flattened over opaque black.
#[tracing::instrument(skip(frame), fields(width = frame.width, height = frame.height))]
pub fn export_frame(
    frame: &FrameRGBA,
    format: ExportFormat,
    quality: f32,
) -> PhotocardResult<ExportedImage> {
    let expected = (frame.width as usize)
        .saturating_mul(frame.height as usize)
        .saturating_mul(4);
    if frame.width == 0 || frame.height == 0 || frame.data.len() != expected {
        return Err(PhotocardError::export(format!(
            "frame buffer length {} does not match {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let mut out = Cursor::new(Vec::new());
    let used_quality = match format {
        ExportFormat::Png => {
            let mut rgba = frame.data.clone();
            if frame.premultiplied {
                crate::foundation::math::unpremultiply_rgba8_in_place(&mut rgba);
            }
            image::codecs::png::PngEncoder::new(&mut out)
                .write_image(
                    &rgba,
                    frame.width,
                    frame.height,
                    image::ExtendedColorType::Rgba8,
                )
                .context("encode png")?;
            None
        }
        ExportFormat::Jpeg => {
            let q = jpeg_quality_u8(quality)?;
            let rgb = flatten_over_black(&frame.data, frame.premultiplied);
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, q)
                .encode(
                    &rgb,
                    frame.width,
                    frame.height,
                    image::ExtendedColorType::Rgb8,
                )
                .context("encode jpeg")?;
            Some(quality)
        }
    };

    let bytes = out.into_inner();
    tracing::debug!(format = %format, bytes = bytes.len(), "exported frame");
    Ok(ExportedImage {
        bytes,
        mime: format.mime(),
        file_name: format.file_name(),
        quality: used_quality,
    })
}

/// Map a `(0, 1]` quality onto the encoder's `1..=100` scale.
pub(crate) fn jpeg_quality_u8(quality: f32) -> PhotocardResult<u8> {
    if !quality.is_finite() || quality <= 0.0 || quality > 1.0 {
        return Err(PhotocardError::export(format!(
            "jpeg quality must be in (0, 1], got {quality}"
        )));
    }
    Ok((quality * 100.0).round().clamp(1.0, 100.0) as u8)
}

fn flatten_over_black(rgba: &[u8], premultiplied: bool) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        if premultiplied {
            rgb.extend_from_slice(&px[..3]);
        } else {
            let a = u16::from(px[3]);
            rgb.extend(px[..3].iter().map(|&c| mul_div255_u8(u16::from(c), a)));
        }
    }
    rgb
}

#[cfg(test)]
#[path = "../../tests/unit/encode/export.rs"]
mod tests;
