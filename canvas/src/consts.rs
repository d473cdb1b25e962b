//! Shared numeric constants for the canvas crate.

// ── Geometry ────────────────────────────────────────────────────

/// Point count used by a freshly constructed canvas.
pub const DEFAULT_POINTS: u32 = 500;

/// Multiplier used by a freshly constructed canvas.
pub const DEFAULT_MULTIPLIER: f64 = 72.0;

/// Upper bound on the point count; keeps geometry generation and uploads bounded.
pub const MAX_POINTS: u32 = 100_000;

// ── Camera ──────────────────────────────────────────────────────

/// Camera radius after construction or `reset`, in normalized device units.
pub const DEFAULT_RADIUS: f64 = 0.92;

/// Smallest radius zooming can reach.
pub const MIN_RADIUS: f64 = 1e-3;

/// Largest radius zooming can reach.
pub const MAX_RADIUS: f64 = 1e3;

/// Fraction of the current radius applied per wheel notch.
pub const WHEEL_ZOOM_FRACTION: f64 = 0.1;

// ── Rendering ───────────────────────────────────────────────────

/// Rasterized point size in device pixels.
pub const DEFAULT_POINT_SIZE: f32 = 2.0;

/// Default line and point color.
pub const DEFAULT_FOREGROUND: (u8, u8, u8) = (250, 250, 250);

/// Default clear color.
pub const DEFAULT_BACKGROUND: (u8, u8, u8) = (24, 24, 24);

/// DOM id of the `<canvas>` element the browser constructor binds to.
pub const DEFAULT_CANVAS_ID: &str = "webgl_canvas";

// ── SVG export ──────────────────────────────────────────────────

/// Side of the exported square image, in pixels.
pub const DEFAULT_SVG_SIZE: u32 = 800;

/// Gap between the circle and the image edge, in pixels. At the default size
/// this matches the canvas framing at [`DEFAULT_RADIUS`].
pub const DEFAULT_SVG_MARGIN: f64 = 32.0;
