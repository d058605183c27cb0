use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Fixed-function lighting for the particle pass.
pub struct LightingOptions {
    /// Key light intensity.
    #[schemars(title = "Key Light", range(min = 0.0, max = 3.5), extend("step" = 0.05))]
    pub key_intensity: f32,
    /// Ambient term.
    #[schemars(title = "Ambient", range(min = 0.0, max = 0.7), extend("step" = 0.01))]
    pub ambient: f32,
    /// Blinn-Phong specular strength.
    #[schemars(skip)]
    pub specular_intensity: f32,
    /// Blinn-Phong exponent.
    #[schemars(skip)]
    pub shininess: f32,
    /// World-space direction toward the key light.
    #[schemars(skip)]
    pub key_dir: [f32; 3],
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            key_intensity: 1.6,
            ambient: 0.35,
            specular_intensity: 0.6,
            shininess: 48.0,
            key_dir: [0.4, 0.8, 0.6],
        }
    }
}
