use serde::{Deserialize, Serialize};

/// Scene actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// mode_focus = "Digit3"
/// toggle_overlay = "KeyH"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Force TREE mode.
    ModeTree,
    /// Force SCATTER mode.
    ModeScatter,
    /// Force FOCUS mode.
    ModeFocus,
    /// Ask the host to pick a photo to add.
    AddPhoto,
    /// Show or hide overlay chrome.
    ToggleOverlay,
    /// Close the viewer.
    Quit,
}
