#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{DEFAULT_RADIUS, MAX_RADIUS, MIN_RADIUS};
use crate::error::{CanvasError, Result};

/// A point in world, camera, or normalized device space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub(crate) fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Camera state for pan/zoom over the diagram.
///
/// `center` is where the world origin lands, in aspect-corrected normalized
/// units (1.0 = half the shorter screen side). `r` is the on-screen radius of
/// the unit circle in the same units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub center: Point,
    pub r: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { center: Point::new(0.0, 0.0), r: DEFAULT_RADIUS }
    }
}

impl Camera {
    /// Map a world point onto the aspect-corrected normalized plane.
    #[must_use]
    pub fn world_to_view(&self, world: Point) -> Point {
        Point {
            x: world.x * self.r + self.center.x,
            y: world.y * self.r + self.center.y,
        }
    }

    /// Inverse of [`Camera::world_to_view`].
    #[must_use]
    pub fn view_to_world(&self, view: Point) -> Point {
        Point {
            x: (view.x - self.center.x) / self.r,
            y: (view.y - self.center.y) / self.r,
        }
    }

    /// Grow or shrink the radius by `delta_r`, keeping the world point under
    /// `anchor` fixed on screen.
    ///
    /// The result is clamped to `[MIN_RADIUS, MAX_RADIUS]`.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] if any input is non-finite.
    pub fn zoom(&mut self, delta_r: f64, anchor: Point) -> Result<()> {
        if !delta_r.is_finite() || !anchor.is_finite() {
            return Err(CanvasError::invalid(format!(
                "zoom arguments must be finite, got delta {delta_r} at ({}, {})",
                anchor.x, anchor.y
            )));
        }
        let new_r = (self.r + delta_r).clamp(MIN_RADIUS, MAX_RADIUS);
        let scale = new_r / self.r;
        let center = Point {
            x: anchor.x - (anchor.x - self.center.x) * scale,
            y: anchor.y - (anchor.y - self.center.y) * scale,
        };
        if !center.is_finite() {
            return Err(CanvasError::invalid("zoom would move the camera out of range"));
        }
        self.center = center;
        self.r = new_r;
        Ok(())
    }

    /// Translate the camera by `(dx, dy)` normalized units.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] if either delta is non-finite.
    pub fn pan(&mut self, dx: f64, dy: f64) -> Result<()> {
        if !dx.is_finite() || !dy.is_finite() {
            return Err(CanvasError::invalid(format!("pan deltas must be finite, got ({dx}, {dy})")));
        }
        let moved = Point::new(self.center.x + dx, self.center.y + dy);
        if !moved.is_finite() {
            return Err(CanvasError::invalid("pan would move the camera out of range"));
        }
        self.center = moved;
        Ok(())
    }

    /// Restore the default center and radius.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
