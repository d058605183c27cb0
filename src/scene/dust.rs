//! Decorative dust: a fixed point cloud that slowly turns, independent of
//! particles and mode.

use glam::{Mat4, Vec3};
use rand::Rng;

/// Ambient point cloud.
#[derive(Debug, Clone)]
pub struct DustField {
    points: Vec<Vec3>,
    yaw: f32,
}

impl DustField {
    /// `count` points spread uniformly through a ball of `radius`.
    pub fn new(count: usize, radius: f32, rng: &mut impl Rng) -> Self {
        let points = (0..count)
            .map(|_| {
                let dir = loop {
                    let v = Vec3::new(
                        rng.random_range(-1.0..=1.0),
                        rng.random_range(-1.0..=1.0),
                        rng.random_range(-1.0..=1.0),
                    );
                    let len_sq = v.length_squared();
                    if len_sq > 1e-6 && len_sq <= 1.0 {
                        break v / len_sq.sqrt();
                    }
                };
                // Cube root keeps the density uniform over the volume.
                let r = radius * rng.random::<f32>().cbrt();
                dir * r
            })
            .collect();
        Self { points, yaw: 0.0 }
    }

    /// Turn the field by `spin * dt` radians.
    pub fn advance(&mut self, dt: f32, spin: f32) {
        self.yaw = (self.yaw + spin * dt) % std::f32::consts::TAU;
    }

    /// Points in field space.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Current yaw of the field.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Field-to-world matrix.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.yaw)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn points_fill_the_ball() {
        let mut rng = StdRng::seed_from_u64(3);
        let dust = DustField::new(400, 10.0, &mut rng);
        assert_eq!(dust.points().len(), 400);
        assert!(dust.points().iter().all(|p| p.length() <= 10.0 + 1e-4));
        let inner = dust.points().iter().filter(|p| p.length() < 5.0).count();
        // A uniform ball keeps ~1/8 of its points inside half the radius.
        assert!((20..90).contains(&inner), "inner = {inner}");
    }

    #[test]
    fn advance_turns_the_field() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut dust = DustField::new(1, 1.0, &mut rng);
        dust.advance(2.0, 0.25);
        assert!((dust.yaw() - 0.5).abs() < 1e-6);
    }
}
