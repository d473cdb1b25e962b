//! Startup configuration, supplied by the host as a JSON object.
//!
//! Every field is optional; missing fields fall back to [`crate::consts`].
//!
//! ```json
//! { "points": 200, "multiplier": 2.5, "background": { "r": 0, "g": 0, "b": 0 } }
//! ```

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BACKGROUND, DEFAULT_CANVAS_ID, DEFAULT_FOREGROUND, DEFAULT_MULTIPLIER, DEFAULT_POINT_SIZE, DEFAULT_POINTS,
    DEFAULT_RADIUS, MAX_POINTS, MAX_RADIUS, MIN_RADIUS,
};
use crate::error::{CanvasError, Result};

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components scaled to `[0, 1]` for GL uniforms.
    #[must_use]
    pub fn normalized(self) -> [f32; 3] {
        [f32::from(self.r) / 255.0, f32::from(self.g) / 255.0, f32::from(self.b) / 255.0]
    }

    /// `#rrggbb` form.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub points: i64,
    pub multiplier: f64,
    pub radius: f64,
    pub point_size: f32,
    pub foreground: Rgb,
    pub background: Rgb,
    pub canvas_id: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            points: i64::from(DEFAULT_POINTS),
            multiplier: DEFAULT_MULTIPLIER,
            radius: DEFAULT_RADIUS,
            point_size: DEFAULT_POINT_SIZE,
            foreground: DEFAULT_FOREGROUND.into(),
            background: DEFAULT_BACKGROUND.into(),
            canvas_id: DEFAULT_CANVAS_ID.to_owned(),
        }
    }
}

impl CanvasConfig {
    /// Parse and validate a (possibly partial) JSON object.
    ///
    /// # Errors
    ///
    /// [`CanvasError::Config`] for malformed JSON, [`CanvasError::InvalidArgument`]
    /// for values outside their valid range.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.points < 1 || self.points > i64::from(MAX_POINTS) {
            return Err(CanvasError::invalid(format!("points must be in 1..={MAX_POINTS}, got {}", self.points)));
        }
        if !self.multiplier.is_finite() || self.multiplier < 0.0 {
            return Err(CanvasError::invalid(format!(
                "multiplier must be finite and non-negative, got {}",
                self.multiplier
            )));
        }
        if !(MIN_RADIUS..=MAX_RADIUS).contains(&self.radius) {
            return Err(CanvasError::invalid(format!(
                "radius must be in {MIN_RADIUS}..={MAX_RADIUS}, got {}",
                self.radius
            )));
        }
        validate_point_size(self.point_size)?;
        if self.canvas_id.trim().is_empty() {
            return Err(CanvasError::invalid("canvas_id is empty"));
        }
        Ok(())
    }
}

pub(crate) fn validate_point_size(px: f32) -> Result<f32> {
    if px.is_finite() && px > 0.0 {
        Ok(px)
    } else {
        Err(CanvasError::invalid(format!("point size must be positive and finite, got {px}")))
    }
}
