//! The engine's complete interactive vocabulary.
//!
//! Key presses, mouse motion, and host calls all become a `SceneCommand`
//! passed to [`SceneEngine::execute`](super::SceneEngine::execute).

use glam::Vec2;

use crate::gesture::InteractionMode;

/// A discrete request to the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneCommand {
    /// Switch interaction mode.
    SetMode(InteractionMode),
    /// Latest pointer in normalized [0,1] coordinates, or none.
    Pointer(Option<Vec2>),
    /// Ask the host to pick a photo; the engine only records the request.
    RequestPhoto,
    /// Flip overlay chrome visibility.
    ToggleOverlay,
    /// Close the viewer. The engine ignores it; hosts act on it.
    Quit,
}
