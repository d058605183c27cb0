use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Motion", inline)]
#[serde(default)]
/// Per-frame easing and idle-motion rates.
pub struct MotionOptions {
    /// Exponential approach rate (per second) toward targets.
    #[schemars(title = "Ease Rate", range(min = 0.1, max = 20.0), extend("step" = 0.1))]
    pub ease_rate: f32,
    /// Approach rate used while focusing; slower so the move reads as
    /// deliberate.
    #[schemars(title = "Focus Ease Rate", range(min = 0.1, max = 20.0), extend("step" = 0.1))]
    pub focus_ease_rate: f32,
    /// Multiplier on the drift vector for scatter-mode tumbling.
    #[schemars(title = "Scatter Spin", range(min = 0.0, max = 10.0), extend("step" = 0.1))]
    pub scatter_spin: f32,
    /// Fraction of the drift vector applied to the receded crowd.
    #[schemars(title = "Focus Drift", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub focus_drift: f32,
    /// Yaw rate of the ambient dust field, radians per second.
    #[schemars(title = "Dust Spin", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub dust_spin: f32,
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self {
            ease_rate: 3.0,
            focus_ease_rate: 1.2,
            scatter_spin: 2.0,
            focus_drift: 0.1,
            dust_spin: 0.05,
        }
    }
}
