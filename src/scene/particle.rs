//! Particle data model.

use glam::{Mat4, Quat, Vec3};

/// Ordinal of a photo among all photos ever added (0 for the first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhotoId(pub u32);

/// Category tag; each kind has its own mesh and material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleKind {
    /// Box ornament.
    Cuboid,
    /// Bauble ornament.
    Sphere,
    /// Striped candy-cane ornament.
    Cane,
    /// Framed photo panel.
    Photo {
        /// Which uploaded photo this panel shows.
        id: PhotoId,
        /// Image width over height.
        aspect: f32,
    },
}

impl ParticleKind {
    /// Whether this is a photo panel.
    #[must_use]
    pub fn is_photo(self) -> bool {
        matches!(self, Self::Photo { .. })
    }
}

/// Position, orientation, and uniform scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World-space position (before the scene-wide rotation).
    pub position: Vec3,
    /// Orientation.
    pub rotation: Quat,
    /// Uniform scale.
    pub scale: f32,
}

impl Transform {
    /// Unit-scale transform at `position` with the given rotation.
    #[must_use]
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            scale: 1.0,
        }
    }

    /// Zero-scale transform at the origin. New particles start here and grow
    /// into place.
    #[must_use]
    pub fn collapsed() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 0.0,
        }
    }

    /// Same transform with a different scale.
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Model matrix (scale, then rotate, then translate).
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.rotation,
            self.position,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY)
    }
}

/// Per-particle random values in `[0, 1)`, fixed at creation.
///
/// Layouts that call for randomness (scatter shell depth, background ring
/// placement) read these instead of rolling fresh numbers, so a layout is a
/// pure function of index, count, mode, and the particle itself.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Jitter {
    /// Radial offset within a band.
    pub radial: f32,
    /// Angular placement around a ring.
    pub angle: f32,
    /// Offset along the band's thickness.
    pub depth: f32,
}

/// One independently animated scene object.
#[derive(Debug, Clone)]
pub struct Particle {
    index: usize,
    kind: ParticleKind,
    drift: Vec3,
    jitter: Jitter,
    /// Transform shown this frame.
    pub current: Transform,
    /// Transform being eased toward.
    pub target: Transform,
}

impl Particle {
    /// New particle, collapsed at the origin, with its target equal to its
    /// current transform until the first layout pass.
    #[must_use]
    pub fn new(
        index: usize,
        kind: ParticleKind,
        drift: Vec3,
        jitter: Jitter,
    ) -> Self {
        Self {
            index,
            kind,
            drift,
            jitter,
            current: Transform::collapsed(),
            target: Transform::collapsed(),
        }
    }

    /// Creation-order index; also the particle's identity.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Category tag.
    #[must_use]
    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    /// Fixed drift vector: spin axis (scaled by rate) and ambient velocity.
    #[must_use]
    pub fn drift(&self) -> Vec3 {
        self.drift
    }

    /// Fixed layout jitter.
    #[must_use]
    pub fn jitter(&self) -> Jitter {
        self.jitter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapsed_matrix_is_degenerate() {
        assert_eq!(Transform::collapsed().matrix(), Mat4::ZERO);
    }

    #[test]
    fn matrix_places_origin_at_position() {
        let t = Transform::new(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_y(1.0))
            .with_scale(2.0);
        let origin = t.matrix().transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
        let unit = t.matrix().transform_vector3(Vec3::Y);
        assert!((unit.length() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn new_particle_keeps_identity_fields() {
        let p = Particle::new(
            7,
            ParticleKind::Photo {
                id: PhotoId(2),
                aspect: 1.5,
            },
            Vec3::X,
            Jitter::default(),
        );
        assert_eq!(p.index(), 7);
        assert!(p.kind().is_photo());
        assert_eq!(p.drift(), Vec3::X);
        assert_eq!(p.current, p.target);
    }
}
