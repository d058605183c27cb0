//! Hand-gesture input: landmark sets, pose classification, and the
//! per-frame detector polling loop.

/// Pinch / fist / open-hand classification.
pub mod classifier;
/// 21-point hand landmark sets.
pub mod landmarks;
/// Detector polling with retry and a single report listener.
pub mod tracker;

pub use classifier::{classify, GestureClassifier, GestureReport, InteractionMode};
pub use landmarks::{HandLandmarks, LandmarkError};
pub use tracker::{
    DetectorError, DetectorPoll, GestureListener, GestureTracker, HandDetector,
    TrackerStats,
};
