//! Converts raw platform events into scene commands.
//!
//! The native viewer has no camera feed, so the mouse stands in for the
//! palm: its position, normalized to the window, becomes the pointer signal
//! and number keys force an interaction mode.

use glam::Vec2;

use super::event::InputEvent;
use super::keyboard::KeyAction;
use crate::engine::SceneCommand;
use crate::gesture::InteractionMode;
use crate::options::KeybindingOptions;

impl KeyAction {
    /// Convert to the corresponding [`SceneCommand`].
    #[must_use]
    pub fn to_command(self) -> SceneCommand {
        match self {
            Self::ModeTree => SceneCommand::SetMode(InteractionMode::Tree),
            Self::ModeScatter => {
                SceneCommand::SetMode(InteractionMode::Scatter)
            }
            Self::ModeFocus => SceneCommand::SetMode(InteractionMode::Focus),
            Self::AddPhoto => SceneCommand::RequestPhoto,
            Self::ToggleOverlay => SceneCommand::ToggleOverlay,
            Self::Quit => SceneCommand::Quit,
        }
    }
}

/// Converts raw window events into [`SceneCommand`]s.
pub struct InputProcessor {
    viewport: (u32, u32),
    bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Processor for a window of the given physical size.
    #[must_use]
    pub fn new(width: u32, height: u32, bindings: KeybindingOptions) -> Self {
        Self {
            viewport: (width, height),
            bindings,
        }
    }

    /// Replace the key binding map.
    pub fn set_bindings(&mut self, bindings: KeybindingOptions) {
        self.bindings = bindings;
    }

    /// Process a single event.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<SceneCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                let (w, h) = self.viewport;
                if w == 0 || h == 0 {
                    return None;
                }
                let pointer = Vec2::new(x / w as f32, y / h as f32)
                    .clamp(Vec2::ZERO, Vec2::ONE);
                Some(SceneCommand::Pointer(Some(pointer)))
            }
            InputEvent::CursorLeft => Some(SceneCommand::Pointer(None)),
            InputEvent::Resized { width, height } => {
                self.viewport = (width, height);
                None
            }
        }
    }

    /// Look up the command bound to a physical key string
    /// (`winit::keyboard::KeyCode` debug format, e.g. `"KeyH"`).
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<SceneCommand> {
        self.bindings.lookup(key).map(KeyAction::to_command)
    }
}
