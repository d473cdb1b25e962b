use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext};

use crate::buffer::GeometryBuffer;
use crate::camera::{Camera, Point};
use crate::config::{CanvasConfig, Rgb, validate_point_size};
use crate::consts::WHEEL_ZOOM_FRACTION;
use crate::error::{CanvasError, Result};
use crate::geometry::{Geometry, parse_multiplier, parse_point_count};
use crate::input::{InputState, wheel_zoom_sign};
use crate::render::Renderer;
use crate::viewport::Viewport;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Whether the cached [`GeometryBuffer`] matches the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferState {
    /// Buffer is up to date.
    Idle,
    /// Points, multiplier, camera, or viewport changed since the last rebuild.
    Dirty,
}

/// Core engine state: everything that doesn't depend on the canvas element.
///
/// Separated from `Canvas` so it can be tested without WASM/browser dependencies.
/// Mutations never draw; the host calls `clear` then `draw` afterwards.
#[derive(Debug, Clone)]
pub struct EngineCore {
    geometry: Geometry,
    camera: Camera,
    viewport: Viewport,
    buffer: GeometryBuffer,
    state: BufferState,
    rebuilds: u64,
    dpr: f64,
    pub input: InputState,
    pub foreground: Rgb,
    pub background: Rgb,
    pub point_size: f32,
}

impl Default for EngineCore {
    fn default() -> Self {
        let config = CanvasConfig::default();
        Self {
            geometry: Geometry::default(),
            camera: Camera { r: config.radius, ..Camera::default() },
            viewport: Viewport::default(),
            buffer: GeometryBuffer::new(),
            state: BufferState::Dirty,
            rebuilds: 0,
            dpr: 1.0,
            input: InputState::default(),
            foreground: config.foreground,
            background: config.background,
            point_size: config.point_size,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a host-supplied configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] if the configuration is out of range.
    pub fn with_config(config: &CanvasConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            geometry: Geometry::new(config.points, config.multiplier)?,
            camera: Camera { r: config.radius, ..Camera::default() },
            viewport: Viewport::default(),
            buffer: GeometryBuffer::new(),
            state: BufferState::Dirty,
            rebuilds: 0,
            dpr: 1.0,
            input: InputState::default(),
            foreground: config.foreground,
            background: config.background,
            point_size: config.point_size,
        })
    }

    fn mark_dirty(&mut self) {
        self.state = BufferState::Dirty;
    }

    /// Apply a camera mutation, dirtying the buffer only if the camera moved.
    fn update_camera(&mut self, op: impl FnOnce(&mut Camera) -> Result<()>) -> Result<()> {
        let before = self.camera;
        op(&mut self.camera).inspect_err(|err| log::warn!("camera update rejected: {err}"))?;
        if self.camera != before {
            self.mark_dirty();
        }
        Ok(())
    }

    // --- Geometry ---

    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] if `n` is out of range; the
    /// point set is unchanged.
    pub fn set_points(&mut self, n: i64) -> Result<()> {
        let before = self.geometry.point_count();
        self.geometry
            .set_point_count(n)
            .inspect_err(|err| log::warn!("set_points rejected: {err}"))?;
        if self.geometry.point_count() != before {
            self.mark_dirty();
        }
        Ok(())
    }

    /// Parse raw input text, then [`EngineCore::set_points`].
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] for malformed or out-of-range text.
    pub fn set_points_text(&mut self, text: &str) -> Result<()> {
        let n = parse_point_count(text).inspect_err(|err| log::warn!("set_points rejected: {err}"))?;
        self.set_points(n)
    }

    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] for negative or non-finite values.
    #[allow(clippy::float_cmp)]
    pub fn set_multiplier(&mut self, m: f64) -> Result<()> {
        let before = self.geometry.multiplier();
        self.geometry
            .set_multiplier(m)
            .inspect_err(|err| log::warn!("set_multiplier rejected: {err}"))?;
        if self.geometry.multiplier() != before {
            self.mark_dirty();
        }
        Ok(())
    }

    /// Parse raw input text, then [`EngineCore::set_multiplier`].
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] for malformed or out-of-range text.
    pub fn set_multiplier_text(&mut self, text: &str) -> Result<()> {
        let m = parse_multiplier(text).inspect_err(|err| log::warn!("set_multiplier rejected: {err}"))?;
        self.set_multiplier(m)
    }

    // --- Camera ---

    /// Zoom by `delta` around an anchor in normalized coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] for non-finite input.
    pub fn add_to_r(&mut self, delta: f64, anchor_x: f64, anchor_y: f64) -> Result<()> {
        self.update_camera(|camera| camera.zoom(delta, Point::new(anchor_x, anchor_y)))
    }

    #[must_use]
    pub fn get_r(&self) -> f64 {
        self.camera.r
    }

    /// Pan by `(dx, dy)` normalized units.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] for non-finite input.
    pub fn move_shape(&mut self, dx: f64, dy: f64) -> Result<()> {
        self.update_camera(|camera| camera.pan(dx, dy))
    }

    /// Restore the default camera. Idempotent.
    ///
    /// A configured starting radius is not remembered: reset always returns
    /// to [`crate::consts::DEFAULT_RADIUS`].
    pub fn reset(&mut self) {
        let before = self.camera;
        self.camera.reset();
        if self.camera != before {
            self.mark_dirty();
        }
    }

    /// Recompute the aspect projection for a new drawing-buffer size.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] for zero or non-finite sizes.
    pub fn adjust_for_viewport(&mut self, width: f64, height: f64) -> Result<()> {
        let viewport = Viewport::new(width, height).inspect_err(|err| log::warn!("viewport rejected: {err}"))?;
        if viewport != self.viewport {
            self.viewport = viewport;
            self.mark_dirty();
        }
        Ok(())
    }

    /// Set the ratio between drawing-buffer pixels and the CSS pixels that
    /// pointer events report. Never dirties the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] unless `dpr` is finite and positive.
    pub fn set_device_pixel_ratio(&mut self, dpr: f64) -> Result<()> {
        if !(dpr.is_finite() && dpr > 0.0) {
            let err = CanvasError::invalid(format!("device pixel ratio must be positive and finite, got {dpr}"));
            log::warn!("{err}");
            return Err(err);
        }
        self.dpr = dpr;
        Ok(())
    }

    #[must_use]
    pub fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    // --- Appearance ---

    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] for non-positive or non-finite sizes.
    pub fn set_point_size(&mut self, px: f32) -> Result<()> {
        self.point_size = validate_point_size(px)?;
        Ok(())
    }

    // --- Pointer input (CSS pixels, scaled by the device pixel ratio) ---

    /// Start a drag at pixel `(px, py)`.
    pub fn on_pointer_down(&mut self, px: f64, py: f64) -> bool {
        self.input = InputState::Panning { last: Point::new(px, py) };
        false
    }

    /// Continue a drag. Returns whether the camera moved.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] for non-finite coordinates.
    pub fn on_pointer_move(&mut self, px: f64, py: f64) -> Result<bool> {
        let InputState::Panning { last } = self.input else {
            return Ok(false);
        };
        let delta = self.viewport.pixel_delta_to_normalized((px - last.x) * self.dpr, (py - last.y) * self.dpr);
        let before = self.camera;
        self.move_shape(delta.x, delta.y)?;
        self.input = InputState::Panning { last: Point::new(px, py) };
        Ok(self.camera != before)
    }

    /// End a drag.
    pub fn on_pointer_up(&mut self) -> bool {
        self.input = InputState::Idle;
        false
    }

    /// Zoom one wheel notch around the pointer. Returns whether the camera changed.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidArgument`] for non-finite coordinates.
    #[allow(clippy::float_cmp)]
    pub fn on_wheel(&mut self, px: f64, py: f64, delta_y: f64) -> Result<bool> {
        let sign = wheel_zoom_sign(delta_y);
        if sign == 0.0 {
            return Ok(false);
        }
        let anchor = self.viewport.pixel_to_normalized(px * self.dpr, py * self.dpr);
        let before = self.camera;
        self.add_to_r(sign * WHEEL_ZOOM_FRACTION * self.camera.r, anchor.x, anchor.y)?;
        Ok(self.camera != before)
    }

    // --- Frame ---

    /// The buffer for the current state, rebuilt first if dirty.
    pub fn prepare_frame(&mut self) -> &GeometryBuffer {
        if self.state == BufferState::Dirty {
            self.buffer.rebuild(&self.geometry, &self.camera, &self.viewport);
            self.rebuilds += 1;
            self.state = BufferState::Idle;
            log::debug!(
                "rebuilt geometry buffer: {} points, multiplier {}, r {}",
                self.geometry.point_count(),
                self.geometry.multiplier(),
                self.camera.r
            );
        }
        &self.buffer
    }

    // --- Queries ---

    #[must_use]
    pub fn state(&self) -> BufferState {
        self.state
    }

    /// How many times the buffer has been rebuilt.
    #[must_use]
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    #[must_use]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

/// The browser-facing canvas. Wraps `EngineCore` and owns the WebGL2 renderer.
#[wasm_bindgen]
pub struct Canvas {
    element: HtmlCanvasElement,
    renderer: Renderer,
    core: EngineCore,
}

impl Canvas {
    fn create(config: &CanvasConfig) -> Result<Self> {
        let core = EngineCore::with_config(config)?;
        let element = find_canvas(&config.canvas_id)?;
        let gl: WebGl2RenderingContext = element
            .get_context("webgl2")
            .map_err(|err| CanvasError::Browser(format!("{err:?}")))?
            .ok_or(CanvasError::ContextLost)?
            .dyn_into()
            .map_err(|_| CanvasError::Browser("webgl2 context has an unexpected type".to_owned()))?;
        let renderer = Renderer::new(gl)?;

        let mut canvas = Self { element, renderer, core };
        canvas.resize_to_window()?;
        log::info!("canvas `{}` ready", config.canvas_id);
        Ok(canvas)
    }

    fn resize_to_window(&mut self) -> Result<()> {
        let window = web_sys::window().ok_or_else(|| CanvasError::Browser("no window".to_owned()))?;
        let dpr = window.device_pixel_ratio().max(1.0);
        let css_width = window_dimension(window.inner_width())?;
        let css_height = window_dimension(window.inner_height())?;

        let width = device_pixels(css_width, dpr);
        let height = device_pixels(css_height, dpr);
        self.element.set_width(width);
        self.element.set_height(height);
        self.renderer.set_viewport(width, height)?;
        self.core.set_device_pixel_ratio(dpr)?;
        self.core.adjust_for_viewport(f64::from(width), f64::from(height))
    }

    /// Borrow the browser-independent state.
    #[must_use]
    pub fn core(&self) -> &EngineCore {
        &self.core
    }
}

#[wasm_bindgen]
impl Canvas {
    /// Bind to `#webgl_canvas` with default settings.
    ///
    /// # Errors
    ///
    /// Fails if the element or a WebGL2 context is unavailable.
    #[wasm_bindgen(constructor)]
    pub fn new() -> std::result::Result<Canvas, JsValue> {
        Ok(Self::create(&CanvasConfig::default())?)
    }

    /// Bind using a JSON configuration object (see [`CanvasConfig`]).
    ///
    /// # Errors
    ///
    /// Fails on invalid configuration or when the browser setup fails.
    pub fn with_config(json: &str) -> std::result::Result<Canvas, JsValue> {
        Ok(Self::create(&CanvasConfig::from_json(json)?)?)
    }

    /// # Errors
    ///
    /// Rejects malformed or non-positive point counts.
    pub fn set_points(&mut self, value: &str) -> std::result::Result<(), JsValue> {
        Ok(self.core.set_points_text(value)?)
    }

    /// # Errors
    ///
    /// Rejects malformed, negative, or non-finite multipliers.
    pub fn set_multiplier(&mut self, value: &str) -> std::result::Result<(), JsValue> {
        Ok(self.core.set_multiplier_text(value)?)
    }

    /// # Errors
    ///
    /// Fails with a context-lost error if WebGL is gone.
    pub fn clear(&self) -> std::result::Result<(), JsValue> {
        Ok(self.renderer.clear(self.core.background)?)
    }

    /// Rebuild the buffer if needed and draw it.
    ///
    /// # Errors
    ///
    /// Fails with a context-lost error if WebGL is gone.
    pub fn draw(&mut self) -> std::result::Result<(), JsValue> {
        let (foreground, point_size) = (self.core.foreground, self.core.point_size);
        let buffer = self.core.prepare_frame();
        Ok(self.renderer.draw(buffer, foreground, point_size)?)
    }

    #[must_use]
    pub fn get_r(&self) -> f64 {
        self.core.get_r()
    }

    /// # Errors
    ///
    /// Rejects non-finite input.
    pub fn add_to_r(&mut self, delta: f64, anchor_x: f64, anchor_y: f64) -> std::result::Result<(), JsValue> {
        Ok(self.core.add_to_r(delta, anchor_x, anchor_y)?)
    }

    pub fn reset(&mut self) {
        self.core.reset();
    }

    /// Resize the canvas backing store to the window and update the projection.
    ///
    /// # Errors
    ///
    /// Fails if the window size can't be read or WebGL is gone.
    pub fn adjust_view(&mut self) -> std::result::Result<(), JsValue> {
        Ok(self.resize_to_window()?)
    }

    /// # Errors
    ///
    /// Rejects non-finite input.
    pub fn move_shape(&mut self, dx: f64, dy: f64) -> std::result::Result<(), JsValue> {
        Ok(self.core.move_shape(dx, dy)?)
    }

    pub fn set_color(&mut self, r: u8, g: u8, b: u8) {
        self.core.foreground = Rgb::new(r, g, b);
    }

    pub fn set_background(&mut self, r: u8, g: u8, b: u8) {
        self.core.background = Rgb::new(r, g, b);
    }

    /// # Errors
    ///
    /// Rejects non-positive or non-finite sizes.
    pub fn set_point_size(&mut self, px: f32) -> std::result::Result<(), JsValue> {
        Ok(self.core.set_point_size(px)?)
    }

    #[must_use]
    pub fn points(&self) -> u32 {
        self.core.geometry().point_count()
    }

    #[must_use]
    pub fn multiplier(&self) -> f64 {
        self.core.geometry().multiplier()
    }

    // --- Pointer input (CSS pixels, as in `offsetX`/`offsetY`) ---

    pub fn on_pointer_down(&mut self, px: f64, py: f64) -> bool {
        self.core.on_pointer_down(px, py)
    }

    /// # Errors
    ///
    /// Rejects non-finite coordinates.
    pub fn on_pointer_move(&mut self, px: f64, py: f64) -> std::result::Result<bool, JsValue> {
        Ok(self.core.on_pointer_move(px, py)?)
    }

    pub fn on_pointer_up(&mut self) -> bool {
        self.core.on_pointer_up()
    }

    /// # Errors
    ///
    /// Rejects non-finite coordinates.
    pub fn on_wheel(&mut self, px: f64, py: f64, delta_y: f64) -> std::result::Result<bool, JsValue> {
        Ok(self.core.on_wheel(px, py, delta_y)?)
    }
}

// =============================================================
// Browser helpers
// =============================================================

fn find_canvas(id: &str) -> Result<HtmlCanvasElement> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| CanvasError::Browser("no document".to_owned()))?;
    document
        .get_element_by_id(id)
        .ok_or_else(|| CanvasError::Browser(format!("no element with id `{id}`")))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| CanvasError::Browser(format!("element `{id}` is not a canvas")))
}

fn window_dimension(value: std::result::Result<JsValue, JsValue>) -> Result<f64> {
    value
        .map_err(|err| CanvasError::Browser(format!("{err:?}")))?
        .as_f64()
        .ok_or_else(|| CanvasError::Browser("window size is not a number".to_owned()))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn device_pixels(css: f64, dpr: f64) -> u32 {
    // Clamped to at least one pixel so the projection stays defined.
    (css * dpr).round().clamp(1.0, f64::from(u32::MAX)) as u32
}
