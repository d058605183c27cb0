use serde::{Deserialize, Serialize};

/// Palette for the ornament categories and the backdrop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// Cuboid ornament RGB.
    pub cuboid: [f32; 3],
    /// Spherical ornament RGB.
    pub sphere: [f32; 3],
    /// Cane base RGB.
    pub cane: [f32; 3],
    /// Cane stripe RGB.
    pub cane_stripe: [f32; 3],
    /// Photo frame border RGB.
    pub frame: [f32; 3],
    /// Dust point RGB.
    pub dust: [f32; 3],
    /// Clear color behind the scene.
    pub background: [f32; 3],
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            cuboid: [0.75, 0.08, 0.1],
            sphere: [0.95, 0.72, 0.2],
            cane: [0.95, 0.95, 0.92],
            cane_stripe: [0.8, 0.05, 0.08],
            frame: [0.83, 0.68, 0.21],
            dust: [1.0, 0.95, 0.8],
            background: [0.01, 0.03, 0.02],
        }
    }
}
