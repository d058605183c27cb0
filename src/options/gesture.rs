use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Gesture", inline)]
#[serde(default)]
/// Classification thresholds, in normalized landmark units.
///
/// The checks run in a fixed order (pinch first, then fist/open), so only
/// the values are tunable, never the priority.
pub struct GestureOptions {
    /// Thumb-tip to index-tip distance below which the hand is pinching.
    #[schemars(title = "Pinch Distance", range(min = 0.01, max = 0.15), extend("step" = 0.005))]
    pub pinch_threshold: f32,
    /// Average fingertip-to-wrist distance below which the hand is a fist.
    #[schemars(title = "Fist Distance", range(min = 0.1, max = 0.4), extend("step" = 0.01))]
    pub fist_threshold: f32,
    /// Average fingertip-to-wrist distance above which the hand is open.
    #[schemars(title = "Open Distance", range(min = 0.2, max = 0.7), extend("step" = 0.01))]
    pub open_threshold: f32,
}

impl Default for GestureOptions {
    fn default() -> Self {
        Self {
            pinch_threshold: 0.05,
            fist_threshold: 0.25,
            open_threshold: 0.40,
        }
    }
}
