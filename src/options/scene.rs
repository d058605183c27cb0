use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Population of the scene at initialization.
pub struct SceneOptions {
    /// Number of ornament particles created at startup.
    #[schemars(title = "Ornaments", range(min = 0, max = 5000))]
    pub ornament_count: usize,
    /// Relative weight of cuboid ornaments.
    #[schemars(skip)]
    pub cuboid_weight: f32,
    /// Relative weight of spherical ornaments.
    #[schemars(skip)]
    pub sphere_weight: f32,
    /// Relative weight of cane ornaments.
    #[schemars(skip)]
    pub cane_weight: f32,
    /// Magnitude of each component of the per-particle drift vector.
    #[schemars(skip)]
    pub drift_magnitude: f32,
    /// Number of points in the ambient dust field.
    #[schemars(title = "Dust", range(min = 0, max = 10000))]
    pub dust_count: usize,
    /// Radius of the dust volume.
    #[schemars(skip)]
    pub dust_radius: f32,
    /// Fixed RNG seed for reproducible scenes. `None` seeds from the OS.
    #[schemars(skip)]
    pub seed: Option<u64>,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            ornament_count: 1500,
            cuboid_weight: 0.4,
            sphere_weight: 0.4,
            cane_weight: 0.2,
            drift_magnitude: 0.5,
            dust_count: 1200,
            dust_radius: 70.0,
            seed: None,
        }
    }
}
