use std::sync::Arc;

use vello_cpu::kurbo::Shape;

use crate::assets::color::Color;
use crate::assets::decode::PreparedImage;
use crate::editor::transform::TransformState;
use crate::foundation::core::{Affine, Canvas, FrameRect, Rect, Vec2};
use crate::foundation::error::{PhotocardError, PhotocardResult};
use crate::render::backend::FrameRGBA;
use crate::text::shaping::ShapedLine;

/// Decoded raster uploaded as a CPU image paint.
#[derive(Clone)]
pub struct ImagePaint {
    paint: vello_cpu::Image,
    width: u32,
    height: u32,
}

impl std::fmt::Debug for ImagePaint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePaint")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl ImagePaint {
    /// Upload `image` into a pixmap-backed paint.
    pub fn new(image: &PreparedImage) -> PhotocardResult<Self> {
        let pixmap = pixmap_from_premul_bytes(&image.rgba8_premul, image.width, image.height)?;
        Ok(Self {
            paint: vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            },
            width: image.width,
            height: image.height,
        })
    }

    /// Source width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Source height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
}

/// A shaped text line placed on the canvas.
#[derive(Clone, Debug)]
pub struct TextRun {
    /// Shaped glyphs.
    pub line: ShapedLine,
    /// Left edge after alignment.
    pub left: f64,
    /// Alphabetic baseline.
    pub baseline: f64,
}

/// Everything drawn in one pass, in draw order.
#[derive(Clone, Copy, Debug)]
pub struct Scene<'a> {
    /// Clip window for the photo.
    pub frame: FrameRect,
    /// User photo and its placement. Omitted until a photo decodes.
    pub photo: Option<(&'a ImagePaint, TransformState)>,
    /// Template art, stretched over the whole canvas.
    pub art: &'a ImagePaint,
    /// Banner strip and fill.
    pub banner: Option<(Rect, Color)>,
    /// Text lines and their shared fill.
    pub text: &'a [TextRun],
    /// Text fill.
    pub text_color: Color,
}

/// Owner of the card surface and its CPU render context.
pub struct Compositor {
    canvas: Canvas,
    clear_rgba: Option<[u8; 4]>,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("canvas", &self.canvas)
            .field("clear_rgba", &self.clear_rgba)
            .finish()
    }
}

impl Compositor {
    /// Allocate a surface for `canvas`, cleared to `clear_rgba` (transparent when `None`) before
    /// every render.
    pub fn new(canvas: Canvas, clear_rgba: Option<[u8; 4]>) -> PhotocardResult<Self> {
        let (w, h) = surface_dims(canvas)?;
        Ok(Self {
            canvas,
            clear_rgba,
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
        })
    }

    /// Surface dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Redraw the whole surface from `scene`.
    ///
    /// Order: clear, clipped photo, template art, banner, text. Only the photo is rotated.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn render(&mut self, scene: &Scene<'_>) -> PhotocardResult<()> {
        let ctx = &mut self.ctx;
        ctx.reset();
        let canvas_rect = to_cpu_rect(self.canvas.rect());

        if let Some([r, g, b, a]) = self.clear_rgba {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&canvas_rect);
        }

        if let Some((photo, transform)) = scene.photo {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            let clip = to_cpu_rect(scene.frame.to_rect()).to_path(0.1);
            ctx.push_clip_layer(&clip);
            ctx.set_transform(affine_to_cpu(
                transform.image_affine(photo.width, photo.height),
            ));
            ctx.set_paint(photo.paint.clone());
            ctx.fill_rect(&image_rect(photo));
            ctx.pop_layer();
        }

        let stretch = Affine::scale_non_uniform(
            f64::from(self.canvas.width) / f64::from(scene.art.width),
            f64::from(self.canvas.height) / f64::from(scene.art.height),
        );
        ctx.set_transform(affine_to_cpu(stretch));
        ctx.set_paint(scene.art.paint.clone());
        ctx.fill_rect(&image_rect(scene.art));

        if let Some((rect, color)) = scene.banner {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(to_cpu_color(color));
            ctx.fill_rect(&to_cpu_rect(rect));
        }

        for text in scene.text {
            if text.line.is_empty() {
                continue;
            }
            ctx.set_transform(affine_to_cpu(Affine::translate(Vec2::new(
                text.left,
                text.baseline,
            ))));
            ctx.set_paint(to_cpu_color(scene.text_color));
            for run in &text.line.runs {
                ctx.glyph_run(&run.font)
                    .font_size(text.line.font_size)
                    .fill_glyphs(run.glyphs.iter().copied());
            }
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
        Ok(())
    }

    /// Copy the surface out as premultiplied RGBA8.
    pub fn readback(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

fn surface_dims(canvas: Canvas) -> PhotocardResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| PhotocardError::render("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| PhotocardError::render("canvas height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(PhotocardError::render("canvas must be non-empty"));
    }
    Ok((w, h))
}

fn image_rect(p: &ImagePaint) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(0.0, 0.0, f64::from(p.width), f64::from(p.height))
}

fn to_cpu_rect(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn to_cpu_color(c: Color) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> PhotocardResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PhotocardError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PhotocardError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(PhotocardError::render("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
