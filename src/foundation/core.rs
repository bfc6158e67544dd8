use crate::foundation::error::{PhotocardError, PhotocardResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// The fixed working surface every card is composed on.
    pub const CARD: Canvas = Canvas {
        width: 1080,
        height: 1080,
    };

    /// Canvas bounds as a rectangle anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Map a pointer position from an on-screen display of the canvas into canvas space.
    ///
    /// `display_w`/`display_h` are the displayed size of the whole canvas. Degenerate display
    /// sizes map the point through unchanged.
    pub fn map_from_display(self, display_w: f64, display_h: f64, p: Point) -> Point {
        if !(display_w.is_finite() && display_h.is_finite()) || display_w <= 0.0 || display_h <= 0.0
        {
            return p;
        }
        Point::new(
            p.x * f64::from(self.width) / display_w,
            p.y * f64::from(self.height) / display_h,
        )
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::CARD
    }
}

/// Template-defined rectangle in canvas space.
///
/// Clips the user photo and is the target of the initial cover fit.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width, > 0.
    pub w: f64,
    /// Height, > 0.
    pub h: f64,
}

impl FrameRect {
    /// Create a validated frame rectangle.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> PhotocardResult<Self> {
        let f = Self { x, y, w, h };
        f.validate()?;
        Ok(f)
    }

    /// Check that all fields are finite and the size is positive.
    pub fn validate(&self) -> PhotocardResult<()> {
        if ![self.x, self.y, self.w, self.h].iter().all(|v| v.is_finite()) {
            return Err(PhotocardError::validation("frame fields must be finite"));
        }
        if self.w <= 0.0 || self.h <= 0.0 {
            return Err(PhotocardError::validation("frame w/h must be > 0"));
        }
        Ok(())
    }

    /// Width over height.
    pub fn aspect(&self) -> f64 {
        self.w / self.h
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The frame as a `kurbo` rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.w, self.y + self.h)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
