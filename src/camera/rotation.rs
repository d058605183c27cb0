//! Scene-wide rotation driven by the hand pointer.

use glam::{EulerRot, Mat4, Quat, Vec2};

use crate::options::CameraOptions;

/// Yaw/pitch applied to the whole particle group.
///
/// Each pointer report moves the rotation a fixed fraction of the way toward
/// the angle the pointer asks for, which filters detector noise without
/// lagging far behind deliberate motion. With no pointer the rotation holds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneRotation {
    yaw: f32,
    pitch: f32,
}

impl SceneRotation {
    /// Yaw and pitch the pointer asks for. Horizontal offset from the image
    /// center maps to yaw; vertical offset maps to pitch with the sign
    /// inverted.
    #[must_use]
    pub fn target_for(pointer: Vec2, opts: &CameraOptions) -> (f32, f32) {
        let offset = pointer - Vec2::splat(0.5);
        (offset.x * opts.yaw_gain, -offset.y * opts.pitch_gain)
    }

    /// Fold one pointer report into the rotation.
    pub fn update(&mut self, pointer: Option<Vec2>, opts: &CameraOptions) {
        let Some(pointer) = pointer else {
            return;
        };
        let (yaw, pitch) = Self::target_for(pointer, opts);
        let k = opts.pointer_smoothing.clamp(0.0, 1.0);
        self.yaw += (yaw - self.yaw) * k;
        self.pitch += (pitch - self.pitch) * k;
    }

    /// Current yaw in radians.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current pitch in radians.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Rotation as a quaternion (yaw about Y, then pitch about X).
    #[must_use]
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Rotation as a matrix.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_quat(self.quat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_pointer_targets_zero() {
        let opts = CameraOptions::default();
        assert_eq!(SceneRotation::target_for(Vec2::splat(0.5), &opts), (0.0, 0.0));
    }

    #[test]
    fn pointer_right_yaws_positive_and_down_pitches_negative() {
        let opts = CameraOptions::default();
        let (yaw, pitch) = SceneRotation::target_for(Vec2::new(1.0, 1.0), &opts);
        assert!((yaw - opts.yaw_gain * 0.5).abs() < 1e-6);
        assert!((pitch + opts.pitch_gain * 0.5).abs() < 1e-6);
    }

    #[test]
    fn update_is_smoothed_not_snapped() {
        let opts = CameraOptions::default();
        let mut rot = SceneRotation::default();
        rot.update(Some(Vec2::new(1.0, 0.5)), &opts);
        let target = opts.yaw_gain * 0.5;
        assert!((rot.yaw() - target * opts.pointer_smoothing).abs() < 1e-6);
        for _ in 0..200 {
            rot.update(Some(Vec2::new(1.0, 0.5)), &opts);
        }
        assert!((rot.yaw() - target).abs() < 1e-4);
    }

    #[test]
    fn missing_pointer_holds_rotation() {
        let opts = CameraOptions::default();
        let mut rot = SceneRotation::default();
        rot.update(Some(Vec2::new(0.9, 0.1)), &opts);
        let before = rot;
        rot.update(None, &opts);
        assert_eq!(rot, before);
    }

    #[test]
    fn alternating_noise_is_damped() {
        let opts = CameraOptions::default();
        let mut rot = SceneRotation::default();
        for i in 0..100 {
            let x = if i % 2 == 0 { 0.6 } else { 0.4 };
            rot.update(Some(Vec2::new(x, 0.5)), &opts);
        }
        // Raw targets swing by +-0.1 * yaw_gain; the smoothed value stays
        // well inside that.
        assert!(rot.yaw().abs() < 0.1 * opts.yaw_gain * 0.2);
    }
}
