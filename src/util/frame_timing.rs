//! Frame timing helpers: step clamping and FPS smoothing.

use web_time::Instant;

/// Longest step fed to the animation; a stalled tab or debugger pause
/// resumes smoothly instead of jumping.
pub const MAX_STEP: f32 = 0.1;

/// Exponential moving average of frames per second.
#[must_use]
pub fn smooth_fps(previous: f32, frame_time: f32, smoothing: f32) -> f32 {
    if frame_time > 0.0 {
        previous * (1.0 - smoothing) + smoothing / frame_time
    } else {
        previous
    }
}

/// Frame delta and smoothed FPS tracking.
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Timer starting now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Mark a new frame. Returns seconds since the previous one, clamped to
    /// [`MAX_STEP`].
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.smoothed_fps = smooth_fps(self.smoothed_fps, elapsed, self.smoothing);
        elapsed.min(MAX_STEP)
    }

    /// Current smoothed FPS.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothing_moves_toward_instant_rate() {
        let fps = smooth_fps(60.0, 1.0 / 30.0, 0.05);
        assert!(fps < 60.0 && fps > 30.0);
        assert!((fps - (60.0 * 0.95 + 30.0 * 0.05)).abs() < 1e-3);
    }

    #[test]
    fn zero_frame_time_keeps_previous() {
        assert_eq!(smooth_fps(42.0, 0.0, 0.05), 42.0);
    }

    #[test]
    fn tick_is_clamped() {
        let mut timing = FrameTiming::new();
        let dt = timing.tick();
        assert!((0.0..=MAX_STEP).contains(&dt));
    }
}
