//! Per-frame polling of the external hand detector.
//!
//! The tracker is driven once per display frame by whatever scheduler the
//! host provides. A detector that is still loading, a video element with no
//! decodable frame, or a timestamp that has not advanced all skip the tick
//! quietly; the next tick simply tries again.

use std::fmt;

use super::classifier::{GestureClassifier, GestureReport};
use super::landmarks::HandLandmarks;

/// Outcome of asking the detector about the current video frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectorPoll {
    /// Model not loaded yet or no decodable frame. Not an error.
    NotReady,
    /// Detection ran. Empty when no hand is in view; only the first hand is
    /// consumed.
    Hands(Vec<HandLandmarks>),
}

/// Detector failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectorError {
    /// The detector cannot run at all (model failed to load, camera denied).
    Unavailable(String),
    /// A single detection call failed; the next frame may succeed.
    Transient(String),
}

impl fmt::Display for DetectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "detector unavailable: {msg}"),
            Self::Transient(msg) => write!(f, "detection failed: {msg}"),
        }
    }
}

impl std::error::Error for DetectorError {}

/// Black-box hand-landmark detector.
pub trait HandDetector {
    /// Run detection on the frame at `timestamp_ms` (monotonic).
    fn detect(
        &mut self,
        timestamp_ms: f64,
    ) -> Result<DetectorPoll, DetectorError>;
}

/// Receives every report the tracker produces.
pub type GestureListener = Box<dyn FnMut(GestureReport)>;

/// Counters for the debug overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerStats {
    /// Frames that produced a report.
    pub processed: u64,
    /// Ticks skipped because the detector or video was not ready.
    pub skipped: u64,
    /// Ticks where the detector returned an error.
    pub failed: u64,
}

/// Polls a [`HandDetector`] each tick, classifies the first hand, and hands
/// the report to a single listener.
pub struct GestureTracker<D> {
    detector: D,
    classifier: GestureClassifier,
    listener: Option<GestureListener>,
    last_timestamp: Option<f64>,
    unavailable_reported: bool,
    stats: TrackerStats,
}

impl<D: HandDetector> GestureTracker<D> {
    /// Tracker over `detector` with the given classifier.
    pub fn new(detector: D, classifier: GestureClassifier) -> Self {
        Self {
            detector,
            classifier,
            listener: None,
            last_timestamp: None,
            unavailable_reported: false,
            stats: TrackerStats::default(),
        }
    }

    /// Register the listener, replacing any previous one.
    pub fn set_listener(&mut self, listener: impl FnMut(GestureReport) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Drop the listener. Later reports are still returned from
    /// [`tick`](Self::tick).
    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    /// Classifier in use, e.g. to swap thresholds on a preset change.
    pub fn classifier_mut(&mut self) -> &mut GestureClassifier {
        &mut self.classifier
    }

    /// Tick counters.
    pub fn stats(&self) -> TrackerStats {
        self.stats
    }

    /// Poll the detector for the frame at `timestamp_ms`.
    ///
    /// Returns the report delivered to the listener, or `None` when the tick
    /// was skipped. Never fails: every problem is logged and retried on the
    /// next tick.
    pub fn tick(&mut self, timestamp_ms: f64) -> Option<GestureReport> {
        if self.last_timestamp.is_some_and(|last| timestamp_ms <= last) {
            log::trace!("frame at {timestamp_ms}ms already processed");
            self.stats.skipped += 1;
            return None;
        }

        let hands = match self.detector.detect(timestamp_ms) {
            Ok(DetectorPoll::Hands(hands)) => hands,
            Ok(DetectorPoll::NotReady) => {
                log::trace!("detector not ready at {timestamp_ms}ms");
                self.stats.skipped += 1;
                return None;
            }
            Err(err) => {
                self.note_failure(&err);
                return None;
            }
        };

        if std::mem::take(&mut self.unavailable_reported) {
            log::info!("hand detector recovered; gesture control enabled");
        }
        self.last_timestamp = Some(timestamp_ms);
        self.stats.processed += 1;
        let report = self.classifier.process(hands.first());
        if let Some(listener) = self.listener.as_mut() {
            listener(report);
        }
        Some(report)
    }

    fn note_failure(&mut self, err: &DetectorError) {
        self.stats.failed += 1;
        match err {
            DetectorError::Unavailable(_) if !self.unavailable_reported => {
                log::warn!("{err}; gesture control paused until it recovers");
                self.unavailable_reported = true;
            }
            _ => log::debug!("{err}"),
        }
    }
}
