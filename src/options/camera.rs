use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and pointer-to-rotation parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Distance of the eye from the origin along +Z.
    #[schemars(title = "Distance", range(min = 20.0, max = 200.0), extend("step" = 1.0))]
    pub distance: f32,
    /// Yaw (radians) reached when the pointer is at a horizontal edge,
    /// times two.
    #[schemars(title = "Yaw Gain", range(min = 0.0, max = 6.3), extend("step" = 0.05))]
    pub yaw_gain: f32,
    /// Pitch (radians) reached when the pointer is at a vertical edge,
    /// times two.
    #[schemars(title = "Pitch Gain", range(min = 0.0, max = 3.2), extend("step" = 0.05))]
    pub pitch_gain: f32,
    /// Fraction of the remaining rotation covered per pointer report.
    #[schemars(title = "Pointer Smoothing", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub pointer_smoothing: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.5,
            zfar: 500.0,
            distance: 60.0,
            yaw_gain: std::f32::consts::PI,
            pitch_gain: std::f32::consts::FRAC_PI_2,
            pointer_smoothing: 0.1,
        }
    }
}
