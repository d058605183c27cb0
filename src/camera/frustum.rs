//! View frustum for culling particle instances.

use glam::{Mat4, Vec3, Vec4};

/// Plane `normal · p + distance = 0`, normal pointing into the frustum.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Unit normal.
    pub normal: Vec3,
    /// Signed offset from the origin.
    pub distance: f32,
}

impl Plane {
    fn from_vec4(v: Vec4) -> Self {
        let len = v.truncate().length();
        if len > 0.0 {
            Self {
                normal: v.truncate() / len,
                distance: v.w / len,
            }
        } else {
            Self {
                normal: Vec3::ZERO,
                distance: 0.0,
            }
        }
    }

    /// Signed distance from `point` (positive = inside).
    #[inline]
    #[must_use]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
}

/// Six inward-facing clip planes: left, right, bottom, top, near, far.
#[derive(Debug, Clone)]
pub struct Frustum {
    /// Clip planes.
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extract planes from a view-projection matrix with [0,1] depth
    /// (Gribb/Hartmann).
    #[must_use]
    pub fn from_view_projection(vp: Mat4) -> Self {
        let m = vp.transpose();
        let (r0, r1, r2, r3) = (m.x_axis, m.y_axis, m.z_axis, m.w_axis);
        Self {
            planes: [r3 + r0, r3 - r0, r3 + r1, r3 - r1, r2, r3 - r2]
                .map(Plane::from_vec4),
        }
    }

    /// Whether a sphere touches or lies inside the frustum.
    #[inline]
    #[must_use]
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|p| p.distance_to_point(center) >= -radius)
    }
}
