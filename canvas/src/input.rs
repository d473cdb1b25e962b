//! Pointer gesture state.
//!
//! The host forwards raw pointer and wheel events in canvas pixels. Between
//! pointer-down and pointer-up the engine tracks the previous pointer position
//! so each move can be turned into an incremental pan.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;

/// Active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is dragging the diagram.
    Panning {
        /// Pixel position of the previous pointer event.
        last: Point,
    },
}

impl InputState {
    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }
}

/// Wheel direction mapped to a zoom step. Positive `delta_y` scrolls down,
/// which zooms out.
#[must_use]
pub fn wheel_zoom_sign(delta_y: f64) -> f64 {
    if delta_y < 0.0 {
        1.0
    } else if delta_y > 0.0 {
        -1.0
    } else {
        0.0
    }
}
