//! Per-frame particle animation.
//!
//! Targets are only recomputed on mode changes and photo additions; every
//! frame just eases each particle toward its stored target and applies the
//! mode's idle motion using the particle's stored drift.

use glam::Quat;

use super::particle::Particle;
use crate::gesture::InteractionMode;
use crate::options::MotionOptions;

/// Fraction of the remaining distance covered in `dt` seconds by an
/// exponential approach at `rate` per second. Frame-rate independent.
#[inline]
#[must_use]
pub fn ease_factor(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt.max(0.0)).exp()
}

/// Advance one particle by `dt` seconds.
pub fn advance(
    particle: &mut Particle,
    mode: InteractionMode,
    is_focused: bool,
    dt: f32,
    opts: &MotionOptions,
) {
    let rate = if mode == InteractionMode::Focus {
        opts.focus_ease_rate
    } else {
        opts.ease_rate
    };
    let alpha = ease_factor(rate, dt);
    let target = particle.target;
    let drift = particle.drift();
    let current = &mut particle.current;

    current.position = current.position.lerp(target.position, alpha);
    current.scale += (target.scale - current.scale) * alpha;

    match mode {
        InteractionMode::Scatter => {
            let spin = Quat::from_scaled_axis(drift * opts.scatter_spin * dt);
            current.rotation = (current.rotation * spin).normalize();
        }
        InteractionMode::Focus if !is_focused => {
            let sway = drift * opts.focus_drift * dt;
            current.position += sway;
            current.rotation =
                (current.rotation * Quat::from_scaled_axis(sway)).normalize();
        }
        _ => {
            current.rotation = current.rotation.slerp(target.rotation, alpha);
        }
    }
}
