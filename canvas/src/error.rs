//! Error type shared by every fallible canvas operation.

use wasm_bindgen::JsValue;

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Errors surfaced to the platform adapter.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CanvasError {
    /// The input was rejected; the previous state is kept.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The WebGL context is lost or was never available.
    #[error("graphics context lost")]
    ContextLost,
    /// A shader failed to compile or the program failed to link.
    #[error("shader error: {0}")]
    Shader(String),
    /// A required browser object could not be obtained.
    #[error("browser error: {0}")]
    Browser(String),
    /// Configuration JSON could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CanvasError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Whether the renderer that produced this error is unusable from now on.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ContextLost | Self::Shader(_) | Self::Browser(_))
    }
}

impl From<serde_json::Error> for CanvasError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<CanvasError> for JsValue {
    fn from(err: CanvasError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Convenience alias used across the crate.
pub type Result<T, E = CanvasError> = std::result::Result<T, E>;
