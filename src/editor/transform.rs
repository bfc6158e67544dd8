use crate::foundation::core::{Affine, FrameRect, Point, Vec2};
use crate::foundation::math::normalize_degrees;

/// Placement of the user photo on the canvas.
///
/// `offset_x`/`offset_y` is the top-left of the scaled, unrotated image box; rotation pivots on
/// the box center. `scale` is always finite and > 0, rotation is kept in `(-180, 180]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransformState {
    /// Left edge of the scaled image box.
    pub offset_x: f64,
    /// Top edge of the scaled image box.
    pub offset_y: f64,
    /// Uniform scale factor.
    pub scale: f64,
    /// Clockwise rotation in degrees.
    pub rotation_degrees: f64,
}

impl TransformState {
    /// The reset placement: unscaled, unrotated, pinned to the frame's top-left corner.
    pub fn at_frame_origin(frame: FrameRect) -> Self {
        Self {
            offset_x: frame.x,
            offset_y: frame.y,
            scale: 1.0,
            rotation_degrees: 0.0,
        }
    }

    /// Cover-fit an `image_w`x`image_h` image into `frame` and center it.
    ///
    /// The constraining dimension matches the frame exactly; the other overflows evenly on both
    /// sides.
    pub fn cover_fit(frame: FrameRect, image_w: u32, image_h: u32) -> Self {
        let (iw, ih) = (f64::from(image_w.max(1)), f64::from(image_h.max(1)));
        let scale = if iw / ih > frame.aspect() {
            frame.w / iw
        } else {
            frame.h / ih
        };
        Self {
            offset_x: frame.x + (frame.w - iw * scale) / 2.0,
            offset_y: frame.y + (frame.h - ih * scale) / 2.0,
            scale,
            rotation_degrees: 0.0,
        }
    }

    /// Set the zoom factor. Non-finite or non-positive values are rejected.
    pub fn set_scale(&mut self, scale: f64) -> bool {
        if !scale.is_finite() || scale <= 0.0 {
            return false;
        }
        self.scale = scale;
        true
    }

    /// Set the rotation. Non-finite values are rejected.
    pub fn set_rotation(&mut self, degrees: f64) -> bool {
        if !degrees.is_finite() {
            return false;
        }
        self.rotation_degrees = normalize_degrees(degrees);
        true
    }

    /// Offset as a vector.
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.offset_x, self.offset_y)
    }

    /// Size of the image box after scaling.
    pub fn scaled_size(&self, image_w: u32, image_h: u32) -> (f64, f64) {
        (
            f64::from(image_w) * self.scale,
            f64::from(image_h) * self.scale,
        )
    }

    /// Center of the scaled image box, which is also the rotation pivot.
    pub fn center(&self, image_w: u32, image_h: u32) -> Point {
        let (sw, sh) = self.scaled_size(image_w, image_h);
        Point::new(self.offset_x + sw / 2.0, self.offset_y + sh / 2.0)
    }

    /// Map image pixel space to canvas space.
    ///
    /// Translate to the scaled center, rotate clockwise about it, then draw the scaled image
    /// centered on that point.
    pub fn image_affine(&self, image_w: u32, image_h: u32) -> Affine {
        let (sw, sh) = self.scaled_size(image_w, image_h);
        let center = self.center(image_w, image_h);
        Affine::translate(center.to_vec2())
            * Affine::rotate(self.rotation_degrees.to_radians())
            * Affine::translate(Vec2::new(-sw / 2.0, -sh / 2.0))
            * Affine::scale(self.scale)
    }
}

/// Pointer-drag bookkeeping for moving the photo.
///
/// The grab offset keeps drags anchor-relative: the photo never jumps to the pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragTracker {
    grab: Option<Vec2>,
}

impl DragTracker {
    /// Start a drag at `pointer`, remembering where it grabbed the photo.
    pub fn begin(&mut self, transform: &TransformState, pointer: Point) {
        self.grab = Some(pointer.to_vec2() - transform.offset());
    }

    /// Move the photo so the grabbed point follows `pointer`. Returns `false` when no drag is
    /// active.
    pub fn update(&self, transform: &mut TransformState, pointer: Point) -> bool {
        let Some(grab) = self.grab else {
            return false;
        };
        let offset = pointer.to_vec2() - grab;
        transform.offset_x = offset.x;
        transform.offset_y = offset.y;
        true
    }

    /// Finish the drag. Returns `true` when a drag was active.
    pub fn end(&mut self) -> bool {
        self.grab.take().is_some()
    }

    /// Return `true` while a drag is in progress.
    pub fn is_active(&self) -> bool {
        self.grab.is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/transform.rs"]
mod tests;
