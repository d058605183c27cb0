//! Centralized runtime options with TOML preset support.
//!
//! All tweakable settings (gesture thresholds, layout geometry, motion
//! rates, scene population, camera, colors, lighting, keybindings) are
//! consolidated here. Options serialize to/from TOML presets.

mod camera;
mod colors;
mod gesture;
mod keybindings;
mod layout;
mod lighting;
mod motion;
mod scene;

use std::path::Path;

pub use camera::CameraOptions;
pub use colors::ColorOptions;
pub use gesture::GestureOptions;
pub use keybindings::KeybindingOptions;
pub use layout::LayoutOptions;
pub use lighting::LightingOptions;
pub use motion::MotionOptions;
use schemars::JsonSchema;
pub use scene::SceneOptions;
use serde::{Deserialize, Serialize};

use crate::error::TinselError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[gesture]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Hand-pose classification thresholds.
    pub gesture: GestureOptions,
    /// Target arrangement geometry.
    pub layout: LayoutOptions,
    /// Per-frame easing and idle motion.
    pub motion: MotionOptions,
    /// Initial scene population.
    pub scene: SceneOptions,
    /// Camera projection and pointer rotation.
    pub camera: CameraOptions,
    /// Color palette.
    #[schemars(skip)]
    pub colors: ColorOptions,
    /// Lighting parameters.
    pub lighting: LightingOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, TinselError> {
        let mut opts: Self = toml::from_str(content)
            .map_err(|e| TinselError::OptionsParse(e.to_string()))?;
        opts.keybindings.rebuild_reverse_map();
        Ok(opts)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, TinselError> {
        let content = std::fs::read_to_string(path).map_err(TinselError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), TinselError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TinselError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(TinselError::Io)?;
        }
        std::fs::write(path, content).map_err(TinselError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
