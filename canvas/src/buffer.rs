//! Render-ready vertex data derived from geometry, camera, and viewport.

#[cfg(test)]
#[path = "buffer_test.rs"]
mod buffer_test;

use crate::camera::Camera;
use crate::geometry::Geometry;
use crate::viewport::Viewport;

/// Flat arrays ready for upload.
///
/// `positions` holds two clip-space floats per point. `indices` holds two
/// entries per segment, referencing `positions`, for an indexed `LINES` draw.
#[derive(Debug, Clone, Default)]
pub struct GeometryBuffer {
    positions: Vec<f32>,
    indices: Vec<u32>,
}

impl GeometryBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Refill from the current state, reusing the existing allocations.
    #[allow(clippy::cast_possible_truncation)]
    pub fn rebuild(&mut self, geometry: &Geometry, camera: &Camera, viewport: &Viewport) {
        let n = geometry.point_count() as usize;

        self.positions.clear();
        self.positions.reserve(n * 2);
        for &world in geometry.positions() {
            let device = viewport.to_device(camera.world_to_view(world));
            self.positions.push(device.x as f32);
            self.positions.push(device.y as f32);
        }

        self.indices.clear();
        self.indices.reserve(n * 2);
        for seg in geometry.segments() {
            self.indices.push(seg.start);
            self.indices.push(seg.end);
        }
    }

    #[must_use]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 2
    }

    #[must_use]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
