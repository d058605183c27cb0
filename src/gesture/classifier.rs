//! Hand-pose classification into a discrete interaction mode.
//!
//! Checks run in fixed priority order, first match wins:
//!
//! 1. pinch (thumb tip to index tip below the pinch threshold) → `Focus`
//! 2. mean fingertip-to-wrist spread below the fist threshold → `Tree`
//! 3. spread above the open threshold → `Scatter`
//! 4. anything in between → `Tree`

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::landmarks::HandLandmarks;
use crate::error::TinselError;
use crate::options::GestureOptions;

/// Process-wide interaction mode driving the scene layout.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    /// Particles stack into a conical spiral.
    #[default]
    Tree,
    /// Particles spread over a spherical shell and tumble.
    Scatter,
    /// One photo is presented up close; everything else recedes.
    Focus,
}

impl InteractionMode {
    /// Lowercase name, as sent to the host page.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Scatter => "scatter",
            Self::Focus => "focus",
        }
    }
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionMode {
    type Err = String;

    /// Case-insensitive mode name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tree" => Ok(Self::Tree),
            "scatter" => Ok(Self::Scatter),
            "focus" => Ok(Self::Focus),
            other => Err(format!("unknown interaction mode: {other}")),
        }
    }
}

/// Full per-frame classifier output. Each report replaces the previous one;
/// nothing is a delta.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GestureReport {
    /// Classified mode (`Tree` when no hand is visible).
    pub mode: InteractionMode,
    /// Palm-center position in normalized image space, if a hand is visible.
    pub pointer: Option<Vec2>,
}

impl GestureReport {
    /// Report for a frame with no hand in view.
    #[must_use]
    pub fn no_hand() -> Self {
        Self {
            mode: InteractionMode::Tree,
            pointer: None,
        }
    }
}

/// Classify one hand's pose.
#[must_use]
pub fn classify(hand: &HandLandmarks, opts: &GestureOptions) -> InteractionMode {
    if hand.pinch_distance() < opts.pinch_threshold {
        return InteractionMode::Focus;
    }

    let spread = hand.mean_fingertip_spread();
    if spread < opts.fist_threshold {
        InteractionMode::Tree
    } else if spread > opts.open_threshold {
        InteractionMode::Scatter
    } else {
        // Ambiguous half-open hand.
        InteractionMode::Tree
    }
}

/// Stateless classifier bound to a threshold set.
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    options: GestureOptions,
}

impl GestureClassifier {
    /// Classifier using the given thresholds.
    #[must_use]
    pub fn new(options: GestureOptions) -> Self {
        Self { options }
    }

    /// Replace the thresholds.
    pub fn set_options(&mut self, options: GestureOptions) {
        self.options = options;
    }

    /// Current thresholds.
    #[must_use]
    pub fn options(&self) -> &GestureOptions {
        &self.options
    }

    /// Produce the report for one frame's (optional) hand.
    #[must_use]
    pub fn process(&self, hand: Option<&HandLandmarks>) -> GestureReport {
        hand.map_or_else(GestureReport::no_hand, |hand| GestureReport {
            mode: classify(hand, &self.options),
            pointer: Some(hand.palm_center()),
        })
    }

    /// Classify landmarks pushed by a host that runs its own detector:
    /// `63 * k` floats for `k` hands, only the first of which is used.
    ///
    /// # Errors
    ///
    /// Returns [`TinselError::Landmarks`] if the data is not a whole number
    /// of finite hand sets.
    pub fn process_flat(
        &self,
        data: &[f32],
    ) -> Result<GestureReport, TinselError> {
        let hands = HandLandmarks::parse_hands(data)?;
        Ok(self.process(hands.first()))
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::gesture::landmarks::{
        LandmarkError, FINGERTIPS, INDEX_TIP, LANDMARK_COUNT, PALM_CENTER,
        THUMB_TIP, WRIST,
    };

    /// Hand with the wrist at (0.5, 0.5, 0), thumb well away from the index
    /// tip, and every measured fingertip `spread` to the right of the wrist.
    fn hand_with_spread(spread: f32) -> [Vec3; LANDMARK_COUNT] {
        let mut points = [Vec3::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        points[WRIST] = Vec3::new(0.5, 0.5, 0.0);
        for tip in FINGERTIPS {
            points[tip] = Vec3::new(0.5 + spread, 0.5, 0.0);
        }
        points[THUMB_TIP] = Vec3::new(0.5, 0.9, 0.0);
        points
    }

    fn mode_for(points: [Vec3; LANDMARK_COUNT]) -> InteractionMode {
        classify(&HandLandmarks::new(points), &GestureOptions::default())
    }

    #[test]
    fn pinch_scenario_focuses() {
        let mut points = hand_with_spread(0.3);
        points[THUMB_TIP] = Vec3::new(0.5, 0.5, 0.0);
        points[INDEX_TIP] = Vec3::new(0.52, 0.51, 0.0);
        let hand = HandLandmarks::new(points);
        assert!((hand.pinch_distance() - 0.0224).abs() < 1e-3);
        assert_eq!(mode_for(points), InteractionMode::Focus);
    }

    #[test]
    fn pinch_wins_over_open_hand() {
        let mut points = hand_with_spread(0.5);
        points[THUMB_TIP] = points[INDEX_TIP] + Vec3::new(0.0, 0.01, 0.01);
        assert_eq!(mode_for(points), InteractionMode::Focus);
    }

    #[test]
    fn pinch_wins_over_fist() {
        let mut points = hand_with_spread(0.05);
        points[THUMB_TIP] = points[INDEX_TIP];
        assert_eq!(mode_for(points), InteractionMode::Focus);
    }

    #[test]
    fn open_hand_scenario_scatters() {
        assert_eq!(mode_for(hand_with_spread(0.5)), InteractionMode::Scatter);
    }

    #[test]
    fn fist_is_tree() {
        assert_eq!(mode_for(hand_with_spread(0.1)), InteractionMode::Tree);
    }

    #[test]
    fn mid_range_falls_back_to_tree() {
        for spread in [0.25, 0.3, 0.35, 0.39] {
            assert_eq!(
                mode_for(hand_with_spread(spread)),
                InteractionMode::Tree,
                "spread {spread}"
            );
        }
    }

    #[test]
    fn just_past_open_threshold_scatters() {
        assert_eq!(mode_for(hand_with_spread(0.41)), InteractionMode::Scatter);
    }

    #[test]
    fn pinch_threshold_is_strict() {
        let mut points = hand_with_spread(0.5);
        points[THUMB_TIP] = points[INDEX_TIP] + Vec3::new(0.0, 0.06, 0.0);
        assert_eq!(mode_for(points), InteractionMode::Scatter);
    }

    #[test]
    fn depth_counts_toward_pinch_distance() {
        let mut points = hand_with_spread(0.5);
        // Close in image space, far apart in depth.
        points[THUMB_TIP] = points[INDEX_TIP] + Vec3::new(0.01, 0.0, 0.2);
        assert_eq!(mode_for(points), InteractionMode::Scatter);
    }

    #[test]
    fn no_hand_reports_tree_without_pointer() {
        let report = GestureClassifier::default().process(None);
        assert_eq!(report.mode, InteractionMode::Tree);
        assert_eq!(report.pointer, None);
    }

    #[test]
    fn hand_reports_palm_center_pointer() {
        let mut points = hand_with_spread(0.5);
        points[PALM_CENTER] = Vec3::new(0.25, 0.75, 0.1);
        let hand = HandLandmarks::new(points);
        let report = GestureClassifier::default().process(Some(&hand));
        assert_eq!(report.mode, InteractionMode::Scatter);
        assert_eq!(report.pointer, Some(Vec2::new(0.25, 0.75)));
    }

    #[test]
    fn custom_thresholds_apply() {
        let classifier = GestureClassifier::new(GestureOptions {
            open_threshold: 0.6,
            ..GestureOptions::default()
        });
        let hand = HandLandmarks::new(hand_with_spread(0.5));
        assert_eq!(classifier.process(Some(&hand)).mode, InteractionMode::Tree);
    }

    #[test]
    fn mode_serializes_lowercase() {
        let json = serde_json::to_string(&InteractionMode::Scatter).unwrap();
        assert_eq!(json, "\"scatter\"");
        assert_eq!(InteractionMode::Focus.to_string(), "focus");
    }

    #[test]
    fn mode_parses_any_case() {
        assert_eq!("FOCUS".parse(), Ok(InteractionMode::Focus));
        assert_eq!("Tree".parse(), Ok(InteractionMode::Tree));
        assert!("spin".parse::<InteractionMode>().is_err());
    }

    #[test]
    fn flat_landmarks_classify_first_hand() {
        let classifier = GestureClassifier::default();
        let open: Vec<f32> = hand_with_spread(0.5)
            .iter()
            .flat_map(|p| p.to_array())
            .collect();
        let report = classifier.process_flat(&open).unwrap();
        assert_eq!(report.mode, InteractionMode::Scatter);
        assert_eq!(
            classifier.process_flat(&[]).unwrap(),
            GestureReport::no_hand()
        );
    }

    #[test]
    fn malformed_flat_landmarks_are_landmark_errors() {
        let err = GestureClassifier::default()
            .process_flat(&[0.5; 10])
            .unwrap_err();
        assert!(matches!(
            err,
            TinselError::Landmarks(LandmarkError::Length(10))
        ));
    }
}
