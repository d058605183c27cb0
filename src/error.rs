//! Crate-level error types.

use std::fmt;

use crate::gesture::landmarks::LandmarkError;
use crate::gpu::render_context::RenderContextError;

/// Errors produced by the tinsel crate.
#[derive(Debug)]
pub enum TinselError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// An added photo could not be decoded into an image.
    PhotoDecode(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// WGSL composition or validation failure.
    Shader(String),
    /// Viewer event-loop failure.
    Viewer(String),
    /// Malformed landmark data handed over by the host.
    Landmarks(LandmarkError),
}

impl fmt::Display for TinselError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::PhotoDecode(msg) => write!(f, "photo decode error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Shader(msg) => write!(f, "shader error: {msg}"),
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
            Self::Landmarks(e) => write!(f, "landmark error: {e}"),
        }
    }
}

impl std::error::Error for TinselError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Landmarks(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for TinselError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for TinselError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<LandmarkError> for TinselError {
    fn from(e: LandmarkError) -> Self {
        Self::Landmarks(e)
    }
}
