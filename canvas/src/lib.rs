//! Drawing engine for the modular multiplication visualizer.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It places
//! `N` points on a circle, connects point `i` to point `i·M mod N`, and draws
//! the result with WebGL2 under a pan/zoom camera. The host JavaScript layer
//! only wires DOM inputs and events to the exported [`engine::Canvas`]; every
//! mutation is followed by an explicit `clear()` + `draw()` from the host.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Browser facade [`engine::Canvas`] and testable [`engine::EngineCore`] |
//! | [`geometry`] | Point set, multiplier, and segment derivation |
//! | [`camera`] | Pan/zoom camera |
//! | [`viewport`] | Aspect-ratio projection and pixel conversions |
//! | [`buffer`] | Cached, render-ready vertex and index arrays |
//! | [`render`] | WebGL2 renderer |
//! | [`input`] | Pointer gesture state |
//! | [`config`] | Host-supplied JSON configuration |
//! | [`svg`] | Static SVG export |
//! | [`error`] | [`error::CanvasError`] |
//! | [`consts`] | Shared numeric constants (defaults, zoom limits, etc.) |

use wasm_bindgen::prelude::*;

pub mod buffer;
pub mod camera;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod render;
pub mod svg;
pub mod viewport;

/// Module start: console logging and the panic hook.
#[wasm_bindgen(start)]
pub fn start() {
    logging::init_logging(logging::default_level());
}
