//! Procedural meshes for each particle kind.
//!
//! All meshes are centered on the origin and fit inside a unit-radius
//! sphere, so a particle's scale is also its bounding radius.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

/// Vertex with position, normal, and texture coordinates.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space unit normal.
    pub normal: [f32; 3],
    /// Texture coordinates.
    pub uv: [f32; 2],
}

impl MeshVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x2,
    ];

    fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        }
    }

    /// Per-vertex buffer layout (locations 0..=2).
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Indexed triangle list.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Vertices.
    pub vertices: Vec<MeshVertex>,
    /// Triangle indices, counter-clockwise when viewed from outside.
    pub indices: Vec<u32>,
}

impl MeshData {
    fn push_quad(&mut self, corners: [Vec3; 4], normal: Vec3) {
        let base = self.vertices.len() as u32;
        let uvs = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        for (corner, uv) in corners.into_iter().zip(uvs) {
            self.vertices.push(MeshVertex::new(corner, normal, uv));
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Stitch a `rows x cols` vertex grid (appended row-major) into
    /// triangles.
    fn push_grid_indices(&mut self, base: u32, rows: u32, cols: u32) {
        for r in 0..rows - 1 {
            for c in 0..cols - 1 {
                let a = base + r * cols + c;
                let b = a + cols;
                self.indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
            }
        }
    }
}

/// Axis-aligned box with the given half extents, flat-shaded.
#[must_use]
pub fn cuboid(half: Vec3) -> MeshData {
    let mut mesh = MeshData::default();
    for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
        for sign in [1.0, -1.0] {
            let n = axis * sign;
            // Two tangents with u × v = n so winding faces outward.
            let reference = if axis == Vec3::Y { Vec3::Z } else { Vec3::Y };
            let u = reference.cross(n);
            let v = n.cross(u);
            let (c, du, dv) = (n * half, u * half, v * half);
            mesh.push_quad([c - du - dv, c + du - dv, c + du + dv, c - du + dv], n);
        }
    }
    mesh
}

/// UV sphere.
#[must_use]
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let (segments, rings) = (segments.max(3), rings.max(2));
    let mut mesh = MeshData::default();
    for r in 0..=rings {
        let v = r as f32 / rings as f32;
        let phi = v * PI;
        for s in 0..=segments {
            let u = s as f32 / segments as f32;
            let theta = u * TAU;
            let n = Vec3::new(phi.sin() * theta.cos(), phi.cos(), -phi.sin() * theta.sin());
            mesh.vertices
                .push(MeshVertex::new(n * radius, n, Vec2::new(u, v)));
        }
    }
    mesh.push_grid_indices(0, rings + 1, segments + 1);
    mesh
}

/// Candy cane: a tube swept along a straight shaft capped by a half-circle
/// hook. `uv.x` runs along the path, `uv.y` around the tube.
#[must_use]
pub fn cane(tube_radius: f32, shaft: f32, hook: f32, sides: u32, steps: u32) -> MeshData {
    let (sides, steps) = (sides.max(3), steps.max(2));
    let bottom = -0.5 * (shaft + hook);
    let top = bottom + shaft;
    let hook_len = PI * hook;
    let total = shaft + hook_len;

    // Path point and tangent at arc length `s`.
    let path = |s: f32| -> (Vec3, Vec3) {
        if s <= shaft {
            (Vec3::new(0.0, bottom + s, 0.0), Vec3::Y)
        } else {
            let a = (s - shaft) / hook;
            let center = Vec3::new(hook, top, 0.0);
            let pos = center + Vec3::new(-a.cos() * hook, a.sin() * hook, 0.0);
            (pos, Vec3::new(a.sin(), a.cos(), 0.0))
        }
    };

    let mut mesh = MeshData::default();
    for i in 0..=steps {
        let s = total * i as f32 / steps as f32;
        let (center, tangent) = path(s);
        // The path lies in the XY plane, so Z is always perpendicular.
        let side = Vec3::Z;
        let normal_axis = tangent.cross(side);
        for j in 0..=sides {
            let t = j as f32 / sides as f32;
            let angle = t * TAU;
            let n = normal_axis * angle.cos() + side * angle.sin();
            mesh.vertices.push(MeshVertex::new(
                center + n * tube_radius,
                n,
                Vec2::new(s / total, t),
            ));
        }
    }
    mesh.push_grid_indices(0, steps + 1, sides + 1);
    mesh
}

/// Unit quad in the XY plane facing +Z.
#[must_use]
pub fn quad() -> MeshData {
    let mut mesh = MeshData::default();
    mesh.push_quad(
        [
            Vec3::new(-0.5, -0.5, 0.0),
            Vec3::new(0.5, -0.5, 0.0),
            Vec3::new(0.5, 0.5, 0.0),
            Vec3::new(-0.5, 0.5, 0.0),
        ],
        Vec3::Z,
    );
    mesh
}
