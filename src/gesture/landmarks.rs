//! One hand's 21 anatomical landmarks in normalized image space.
//!
//! Coordinates arrive from the external hand-tracking model with `x` and `y`
//! in `[0, 1]` image space and `z` a relative depth on the same scale.

use std::fmt;

use glam::{Vec2, Vec3};

/// Number of landmarks in one hand set.
pub const LANDMARK_COUNT: usize = 21;

/// Number of floats in a flat `[x0, y0, z0, x1, ...]` hand set.
pub const FLAT_LEN: usize = LANDMARK_COUNT * 3;

/// Wrist.
pub const WRIST: usize = 0;
/// Thumb tip.
pub const THUMB_TIP: usize = 4;
/// Index fingertip.
pub const INDEX_TIP: usize = 8;
/// Middle-finger knuckle, used as the palm center.
pub const PALM_CENTER: usize = 9;
/// Middle fingertip.
pub const MIDDLE_TIP: usize = 12;
/// Ring fingertip.
pub const RING_TIP: usize = 16;
/// Pinky fingertip.
pub const PINKY_TIP: usize = 20;

/// The four fingertips measured against the wrist for fist/open checks.
pub const FINGERTIPS: [usize; 4] = [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// Malformed landmark input.
#[derive(Debug, Clone, PartialEq)]
pub enum LandmarkError {
    /// Flat array did not hold exactly [`FLAT_LEN`] values.
    Length(usize),
    /// A coordinate was NaN or infinite.
    NonFinite(usize),
}

impl fmt::Display for LandmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length(len) => write!(
                f,
                "invalid landmark data length: {len} (expected {FLAT_LEN})"
            ),
            Self::NonFinite(index) => {
                write!(f, "landmark {index} has a non-finite coordinate")
            }
        }
    }
}

impl std::error::Error for LandmarkError {}

/// A single hand's landmark set for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandLandmarks {
    points: [Vec3; LANDMARK_COUNT],
}

impl HandLandmarks {
    /// Wrap an already-validated point array.
    #[must_use]
    pub fn new(points: [Vec3; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Parse a flat `[x, y, z] * 21` slice as handed over by the host.
    pub fn from_flat(data: &[f32]) -> Result<Self, LandmarkError> {
        if data.len() != FLAT_LEN {
            return Err(LandmarkError::Length(data.len()));
        }
        let mut points = [Vec3::ZERO; LANDMARK_COUNT];
        for (i, chunk) in data.chunks_exact(3).enumerate() {
            let p = Vec3::new(chunk[0], chunk[1], chunk[2]);
            if !p.is_finite() {
                return Err(LandmarkError::NonFinite(i));
            }
            points[i] = p;
        }
        Ok(Self { points })
    }

    /// Parse several hands packed back to back, as a detector reporting
    /// `k` hands hands over `63 * k` floats. An empty slice is no hands.
    pub fn parse_hands(data: &[f32]) -> Result<Vec<Self>, LandmarkError> {
        if data.len() % FLAT_LEN != 0 {
            return Err(LandmarkError::Length(data.len()));
        }
        data.chunks_exact(FLAT_LEN).map(Self::from_flat).collect()
    }

    /// Landmark at an anatomical index. Out-of-range indices clamp to the
    /// last landmark.
    #[inline]
    #[must_use]
    pub fn point(&self, index: usize) -> Vec3 {
        self.points[index.min(LANDMARK_COUNT - 1)]
    }

    /// Full 3D distance between two landmarks.
    #[inline]
    #[must_use]
    pub fn distance(&self, a: usize, b: usize) -> f32 {
        self.point(a).distance(self.point(b))
    }

    /// Thumb-tip to index-tip distance.
    #[must_use]
    pub fn pinch_distance(&self) -> f32 {
        self.distance(THUMB_TIP, INDEX_TIP)
    }

    /// Mean distance from the four measured fingertips to the wrist.
    #[must_use]
    pub fn mean_fingertip_spread(&self) -> f32 {
        let total: f32 = FINGERTIPS
            .iter()
            .map(|&tip| self.distance(tip, WRIST))
            .sum();
        total / FINGERTIPS.len() as f32
    }

    /// Palm-center position in image space (the pointer signal).
    #[must_use]
    pub fn palm_center(&self) -> Vec2 {
        self.point(PALM_CENTER).truncate()
    }

    /// All landmarks in anatomical order.
    #[must_use]
    pub fn points(&self) -> &[Vec3; LANDMARK_COUNT] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_flat_reads_xyz_triples() {
        let data: Vec<f32> = (0..FLAT_LEN).map(|i| i as f32 * 0.01).collect();
        let hand = HandLandmarks::from_flat(&data).unwrap();
        assert_eq!(hand.point(0), Vec3::new(0.0, 0.01, 0.02));
        assert!((hand.point(20) - Vec3::new(0.6, 0.61, 0.62)).length() < 1e-6);
    }

    #[test]
    fn from_flat_rejects_wrong_length() {
        let err = HandLandmarks::from_flat(&[0.0; 99]).unwrap_err();
        assert_eq!(err, LandmarkError::Length(99));
    }

    #[test]
    fn from_flat_rejects_nan() {
        let mut data = [0.5; FLAT_LEN];
        data[3 * 7 + 1] = f32::NAN;
        let err = HandLandmarks::from_flat(&data).unwrap_err();
        assert_eq!(err, LandmarkError::NonFinite(7));
    }

    #[test]
    fn parse_hands_splits_packed_sets() {
        let mut data = vec![0.25; FLAT_LEN * 2];
        data[FLAT_LEN] = 0.75;
        let hands = HandLandmarks::parse_hands(&data).unwrap();
        assert_eq!(hands.len(), 2);
        assert_eq!(hands[0].point(WRIST).x, 0.25);
        assert_eq!(hands[1].point(WRIST).x, 0.75);
        assert!(HandLandmarks::parse_hands(&[]).unwrap().is_empty());
        assert_eq!(
            HandLandmarks::parse_hands(&data[..70]).unwrap_err(),
            LandmarkError::Length(70)
        );
    }

    #[test]
    fn palm_center_is_landmark_nine() {
        let mut points = [Vec3::ZERO; LANDMARK_COUNT];
        points[PALM_CENTER] = Vec3::new(0.3, 0.7, -0.1);
        let hand = HandLandmarks::new(points);
        assert_eq!(hand.palm_center(), Vec2::new(0.3, 0.7));
    }

    #[test]
    fn spread_uses_depth() {
        let mut points = [Vec3::ZERO; LANDMARK_COUNT];
        for tip in FINGERTIPS {
            points[tip] = Vec3::new(0.0, 0.0, 0.3);
        }
        let hand = HandLandmarks::new(points);
        assert!((hand.mean_fingertip_spread() - 0.3).abs() < 1e-6);
    }
}
