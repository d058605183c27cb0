//! Target transforms for each interaction mode.
//!
//! Every function here is pure: the same index, count, mode, jitter, and
//! focus flag always yield the same transform.

use std::f32::consts::{PI, TAU};

use glam::{Quat, Vec3};

use super::particle::{Jitter, Transform};
use crate::gesture::InteractionMode;
use crate::options::LayoutOptions;

/// Conical spiral: radius shrinks linearly from the base (`t = 0`) to the
/// apex (`t = 1`) while the angle sweeps `t * spiral_factor * PI`.
#[must_use]
pub fn tree(index: usize, count: usize, opts: &LayoutOptions) -> Transform {
    if count == 0 {
        return Transform::default();
    }
    let t = index as f32 / count as f32;
    let radius = opts.tree_max_radius * (1.0 - t);
    let angle = t * opts.spiral_factor * PI;
    let height = opts.tree_height;
    let position = Vec3::new(
        angle.cos() * radius,
        t * height - height / 2.0,
        angle.sin() * radius,
    );
    Transform::new(position, Quat::from_rotation_y(angle))
}

/// Spiral point distribution over a spherical shell, with each particle's
/// radius placed inside the shell band by its jitter.
#[must_use]
pub fn scatter(
    index: usize,
    count: usize,
    jitter: Jitter,
    opts: &LayoutOptions,
) -> Transform {
    if count == 0 {
        return Transform::default();
    }
    let n = count as f32;
    let phi = (-1.0 + 2.0 * index as f32 / n).clamp(-1.0, 1.0).acos();
    let theta = (n * PI).sqrt() * phi;
    let radius = opts.scatter_inner_radius
        + jitter.radial * (opts.scatter_outer_radius - opts.scatter_inner_radius);
    let position = Vec3::new(
        radius * theta.cos() * phi.sin(),
        radius * theta.sin() * phi.sin(),
        radius * phi.cos(),
    );
    Transform::new(position, Quat::IDENTITY)
}

/// The presentation slot in front of the camera.
#[must_use]
pub fn focused(opts: &LayoutOptions) -> Transform {
    Transform::new(Vec3::from_array(opts.focus_position), Quat::IDENTITY)
        .with_scale(opts.focus_scale)
}

/// A shrunken spot on the wide ring behind the focus plane.
#[must_use]
pub fn background(jitter: Jitter, opts: &LayoutOptions) -> Transform {
    let angle = jitter.angle * TAU;
    let radius = opts.ring_inner_radius
        + jitter.radial * (opts.ring_outer_radius - opts.ring_inner_radius);
    let z = -opts.ring_depth + (jitter.depth - 0.5) * opts.ring_thickness;
    let position = Vec3::new(angle.cos() * radius, angle.sin() * radius, z);
    Transform::new(position, Quat::from_rotation_z(angle))
        .with_scale(opts.background_scale)
}

/// Target transform for one particle.
#[must_use]
pub fn target_for(
    mode: InteractionMode,
    index: usize,
    count: usize,
    jitter: Jitter,
    is_focused: bool,
    opts: &LayoutOptions,
) -> Transform {
    match mode {
        InteractionMode::Tree => tree(index, count, opts),
        InteractionMode::Scatter => scatter(index, count, jitter, opts),
        InteractionMode::Focus if is_focused => focused(opts),
        InteractionMode::Focus => background(jitter, opts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> LayoutOptions {
        LayoutOptions::default()
    }

    #[test]
    fn tree_scenario_n4_i2() {
        let o = opts();
        let t = tree(2, 4, &o);
        let radius = o.tree_max_radius * 0.5;
        let angle = 22.5 * PI;
        let expected = Vec3::new(
            angle.cos() * radius,
            0.5 * o.tree_height - o.tree_height / 2.0,
            angle.sin() * radius,
        );
        assert!((t.position - expected).length() < 1e-4);
        assert!(t.position.y.abs() < 1e-6);
        assert_eq!(t.scale, 1.0);
    }

    #[test]
    fn tree_base_is_widest_and_lowest() {
        let o = opts();
        let base = tree(0, 100, &o);
        assert!((base.position - Vec3::new(o.tree_max_radius, -15.0, 0.0)).length() < 1e-5);
        let near_apex = tree(99, 100, &o);
        let r = near_apex.position.x.hypot(near_apex.position.z);
        assert!(r < o.tree_max_radius * 0.02);
        assert!(near_apex.position.y > 14.0);
    }

    #[test]
    fn tree_yaw_follows_spiral_angle() {
        let o = opts();
        let t = tree(1, 90, &o);
        let angle = (1.0 / 90.0) * 45.0 * PI;
        assert!(t.rotation.angle_between(Quat::from_rotation_y(angle)) < 1e-4);
    }

    #[test]
    fn scatter_radius_stays_in_band() {
        let o = opts();
        for i in 0..200 {
            let jitter = Jitter {
                radial: (i as f32 * 0.37) % 1.0,
                ..Jitter::default()
            };
            let r = scatter(i, 200, jitter, &o).position.length();
            assert!(r >= o.scatter_inner_radius - 1e-3);
            assert!(r <= o.scatter_outer_radius + 1e-3);
        }
    }

    #[test]
    fn scatter_first_point_is_at_south_pole() {
        let o = opts();
        let p = scatter(0, 10, Jitter::default(), &o).position;
        assert!((p - Vec3::new(0.0, 0.0, -o.scatter_inner_radius)).length() < 1e-4);
    }

    #[test]
    fn scatter_spreads_over_both_hemispheres() {
        let o = opts();
        let count = 500;
        let north = (0..count)
            .filter(|&i| scatter(i, count, Jitter::default(), &o).position.z > 0.0)
            .count();
        assert!((200..300).contains(&north), "north = {north}");
    }

    #[test]
    fn focused_sits_at_presentation_slot() {
        let o = opts();
        let t = target_for(InteractionMode::Focus, 3, 10, Jitter::default(), true, &o);
        assert_eq!(t.position, Vec3::new(0.0, 0.0, 35.0));
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.scale, o.focus_scale);
    }

    #[test]
    fn background_recedes_behind_focus_plane() {
        let o = opts();
        for k in 0..50 {
            let f = k as f32 / 50.0;
            let jitter = Jitter {
                radial: f,
                angle: 1.0 - f,
                depth: f,
            };
            let t = target_for(InteractionMode::Focus, k, 50, jitter, false, &o);
            assert!(t.position.z < o.focus_position[2]);
            let ring_r = t.position.truncate().length();
            assert!(ring_r >= o.ring_inner_radius - 1e-3);
            assert!(ring_r <= o.ring_outer_radius + 1e-3);
            assert!(t.scale < 1.0);
        }
    }

    #[test]
    fn layouts_are_pure() {
        let o = opts();
        let jitter = Jitter {
            radial: 0.3,
            angle: 0.6,
            depth: 0.9,
        };
        for mode in [
            InteractionMode::Tree,
            InteractionMode::Scatter,
            InteractionMode::Focus,
        ] {
            assert_eq!(
                target_for(mode, 5, 20, jitter, false, &o),
                target_for(mode, 5, 20, jitter, false, &o)
            );
        }
    }

    #[test]
    fn zero_count_does_not_divide_by_zero() {
        let o = opts();
        assert!(tree(0, 0, &o).position.is_finite());
        assert!(scatter(0, 0, Jitter::default(), &o).position.is_finite());
    }
}
