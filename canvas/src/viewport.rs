//! Aspect-ratio projection between the normalized view plane and the screen.
//!
//! The view plane is square: one unit is half of the shorter screen side, so
//! the unit circle always fits and is never stretched. Device coordinates are
//! WebGL clip space, `[-1, 1]` on both axes regardless of the canvas shape.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::camera::Point;
use crate::error::{CanvasError, Result};

/// Drawing-buffer size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1.0, height: 1.0 }
    }
}

impl Viewport {
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] unless both sides are finite and positive.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(CanvasError::invalid(format!("viewport must be positive and finite, got {width}x{height}")));
        }
        Ok(Self { width, height })
    }

    #[must_use]
    pub fn is_widescreen(&self) -> bool {
        self.width >= self.height
    }

    /// Per-axis factors from the view plane to clip space.
    #[must_use]
    pub fn aspect_scale(&self) -> (f64, f64) {
        if self.is_widescreen() {
            (self.height / self.width, 1.0)
        } else {
            (1.0, self.width / self.height)
        }
    }

    /// Map a view-plane point to clip space.
    #[must_use]
    pub fn to_device(&self, view: Point) -> Point {
        let (sx, sy) = self.aspect_scale();
        Point::new(view.x * sx, view.y * sy)
    }

    fn half_short_side(&self) -> f64 {
        self.width.min(self.height) * 0.5
    }

    /// Convert a pixel position (origin top-left, y down) to the view plane.
    #[must_use]
    pub fn pixel_to_normalized(&self, px: f64, py: f64) -> Point {
        let unit = self.half_short_side();
        Point::new((px - self.width * 0.5) / unit, (self.height * 0.5 - py) / unit)
    }

    /// Convert a pixel displacement to a view-plane displacement.
    #[must_use]
    pub fn pixel_delta_to_normalized(&self, dx: f64, dy: f64) -> Point {
        let unit = self.half_short_side();
        Point::new(dx / unit, -dy / unit)
    }
}
