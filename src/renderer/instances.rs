//! Per-frame instance assembly.
//!
//! Walks the scene once per frame and sorts particles into per-mesh instance
//! lists, applying the scene rotation and skipping particles that are
//! collapsed or outside the view frustum.

use glam::{Mat4, Vec3};

use crate::camera::Frustum;
use crate::options::ColorOptions;
use crate::scene::photo::{panel_size, FRAME_BORDER, PANEL_EXTENT};
use crate::scene::{ParticleKind, PhotoId, Scene};

/// Edge length of a cuboid ornament relative to the unit cube mesh.
pub const ORNAMENT_CUBE: f32 = 0.8;
/// Thickness of a photo frame.
pub const FRAME_DEPTH: f32 = 0.08;

/// Scales below this are treated as invisible.
const MIN_VISIBLE_SCALE: f32 = 1e-4;

/// GPU instance: model matrix, base color, and accent.
///
/// `accent.w > 0.5` turns on cane striping in `accent.rgb`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    /// Column-major model matrix.
    pub model: [[f32; 4]; 4],
    /// Base color (linear RGB, alpha unused).
    pub color: [f32; 4],
    /// Stripe color and flag.
    pub accent: [f32; 4],
}

impl ParticleInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
        7 => Float32x4,
        8 => Float32x4,
    ];

    fn new(model: Mat4, color: [f32; 3], accent: [f32; 4]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: [color[0], color[1], color[2], 1.0],
            accent,
        }
    }

    fn plain(model: Mat4, color: [f32; 3]) -> Self {
        Self::new(model, color, [0.0; 4])
    }

    /// Per-instance buffer layout (locations 3..=8).
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// World-space translation.
    #[must_use]
    pub fn translation(&self) -> Vec3 {
        Vec3::from_slice(&self.model[3][..3])
    }
}

/// Instances for one frame, grouped by mesh.
#[derive(Debug, Default)]
pub struct FrameInstances {
    /// Unit-cube instances: cuboid ornaments and photo frames.
    pub cubes: Vec<ParticleInstance>,
    /// Sphere ornaments.
    pub spheres: Vec<ParticleInstance>,
    /// Cane ornaments.
    pub canes: Vec<ParticleInstance>,
    /// Photo faces, each drawn with its own texture.
    pub photos: Vec<(PhotoId, ParticleInstance)>,
    /// Particles skipped by frustum culling.
    pub culled: usize,
}

impl FrameInstances {
    /// Gather instances for every visible particle.
    #[must_use]
    pub fn collect(
        scene: &Scene,
        colors: &ColorOptions,
        frustum: Option<&Frustum>,
    ) -> Self {
        let scene_rotation = scene.rotation().matrix();
        let focus = scene.focus_target();
        let mut out = Self::default();
        for particle in scene.particles() {
            let current = particle.current;
            if current.scale < MIN_VISIBLE_SCALE {
                continue;
            }
            // The focus target stays put in front of the camera.
            let rotation = if focus == Some(particle.index()) {
                Mat4::IDENTITY
            } else {
                scene_rotation
            };
            let bound = match particle.kind() {
                ParticleKind::Photo { .. } => PANEL_EXTENT,
                _ => 1.0,
            };
            let center = rotation.transform_point3(current.position);
            if frustum.is_some_and(|f| !f.intersects_sphere(center, bound * current.scale)) {
                out.culled += 1;
                continue;
            }
            let world = rotation * current.matrix();
            match particle.kind() {
                ParticleKind::Cuboid => out.cubes.push(ParticleInstance::plain(
                    world * Mat4::from_scale(Vec3::splat(ORNAMENT_CUBE)),
                    colors.cuboid,
                )),
                ParticleKind::Sphere => {
                    out.spheres.push(ParticleInstance::plain(world, colors.sphere));
                }
                ParticleKind::Cane => {
                    let s = colors.cane_stripe;
                    out.canes.push(ParticleInstance::new(
                        world,
                        colors.cane,
                        [s[0], s[1], s[2], 1.0],
                    ));
                }
                ParticleKind::Photo { id, aspect } => {
                    let (w, h) = panel_size(aspect);
                    let border = FRAME_BORDER * w.min(h);
                    out.cubes.push(ParticleInstance::plain(
                        world
                            * Mat4::from_scale(Vec3::new(
                                w + 2.0 * border,
                                h + 2.0 * border,
                                FRAME_DEPTH,
                            )),
                        colors.frame,
                    ));
                    // Face sits just proud of the frame's front.
                    let face = Mat4::from_translation(Vec3::new(
                        0.0,
                        0.0,
                        0.5 * FRAME_DEPTH + 1e-3,
                    )) * Mat4::from_scale(Vec3::new(w, h, 1.0));
                    out.photos
                        .push((id, ParticleInstance::plain(world * face, [1.0; 3])));
                }
            }
        }
        out
    }

    /// Total instances across all lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cubes.len() + self.spheres.len() + self.canes.len() + self.photos.len()
    }

    /// Whether nothing is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::camera::Camera;
    use crate::gesture::InteractionMode;
    use crate::options::{CameraOptions, Options};
    use crate::scene::PhotoImage;

    fn grown_scene(ornaments: usize, photos: usize) -> Scene {
        let mut o = Options::default();
        o.scene.ornament_count = ornaments;
        o.scene.dust_count = 0;
        o.scene.seed = Some(3);
        let mut scene = Scene::new(&o);
        for _ in 0..photos {
            let image = PhotoImage::from_rgba(3, 2, vec![128; 24]).unwrap();
            let _ = scene.add_photo(image);
        }
        for _ in 0..300 {
            scene.tick(1.0 / 30.0);
        }
        scene
    }

    #[test]
    fn collapsed_particles_are_skipped() {
        let mut o = Options::default();
        o.scene.ornament_count = 20;
        o.scene.seed = Some(1);
        let scene = Scene::new(&o);
        let frame = FrameInstances::collect(&scene, &ColorOptions::default(), None);
        assert!(frame.is_empty());
    }

    #[test]
    fn instances_grouped_by_kind() {
        let scene = grown_scene(60, 2);
        let frame = FrameInstances::collect(&scene, &ColorOptions::default(), None);
        let count = |k: fn(ParticleKind) -> bool| {
            scene.particles().iter().filter(|p| k(p.kind())).count()
        };
        let cuboids = count(|k| k == ParticleKind::Cuboid);
        assert_eq!(frame.cubes.len(), cuboids + 2);
        assert_eq!(frame.spheres.len(), count(|k| k == ParticleKind::Sphere));
        assert_eq!(frame.canes.len(), count(|k| k == ParticleKind::Cane));
        assert_eq!(frame.photos.len(), 2);
        assert_eq!(frame.photos[1].0, PhotoId(1));
        assert!(frame.canes.iter().all(|c| c.accent[3] == 1.0));
    }

    #[test]
    fn scene_rotation_is_applied() {
        let mut scene = grown_scene(10, 0);
        for _ in 0..50 {
            scene.update_interaction(Some(Vec2::new(1.0, 0.5)));
        }
        let rotation = scene.rotation().quat();
        let frame = FrameInstances::collect(&scene, &ColorOptions::default(), None);
        let expected: Vec<Vec3> = scene
            .particles()
            .iter()
            .filter(|p| p.kind() == ParticleKind::Sphere)
            .map(|p| rotation * p.current.position)
            .collect();
        for (inst, want) in frame.spheres.iter().zip(&expected) {
            assert!(inst.translation().distance(*want) < 1e-4);
        }
    }

    #[test]
    fn focused_photo_ignores_scene_rotation() {
        let mut scene = grown_scene(10, 1);
        let photo = scene.particles().len() - 1;
        let _ = scene.set_mode(InteractionMode::Focus);
        assert_eq!(scene.focus_target(), Some(photo));
        for _ in 0..600 {
            scene.update_interaction(Some(Vec2::new(0.95, 0.5)));
            scene.tick(1.0 / 60.0);
        }
        assert!(scene.rotation().yaw().abs() > 1.0);

        let frame = FrameInstances::collect(&scene, &ColorOptions::default(), None);
        let (_, face) = frame.photos[0];
        let slot = Vec3::from_array(scene.options().layout.focus_position);
        assert!(face.translation().distance(slot) < 0.5);
        let facing = Vec3::from_slice(&face.model[2][..3]).normalize();
        assert!(facing.dot(Vec3::Z) > 0.999);
    }

    #[test]
    fn leaving_focus_keeps_the_drawn_pose() {
        let mut scene = grown_scene(10, 1);
        let _ = scene.set_mode(InteractionMode::Focus);
        for _ in 0..200 {
            scene.update_interaction(Some(Vec2::new(0.9, 0.2)));
            scene.tick(1.0 / 60.0);
        }
        let colors = ColorOptions::default();
        let before = FrameInstances::collect(&scene, &colors, None).photos[0].1;
        let _ = scene.set_mode(InteractionMode::Tree);
        let after = FrameInstances::collect(&scene, &colors, None).photos[0].1;
        assert!(before.translation().distance(after.translation()) < 1e-3);
    }

    #[test]
    fn frustum_culls_offscreen_particles() {
        let scene = grown_scene(80, 0);
        let opts = CameraOptions::default();
        let camera = Camera::new(&opts, 1.0);
        let frustum = Frustum::from_view_projection(camera.build_matrix());
        let all = FrameInstances::collect(&scene, &ColorOptions::default(), None);
        let visible =
            FrameInstances::collect(&scene, &ColorOptions::default(), Some(&frustum));
        assert_eq!(visible.len() + visible.culled, all.len());

        // Looking away from the scene culls everything.
        let mut away = Camera::new(&opts, 1.0);
        away.target = away.eye + Vec3::Z;
        let behind = Frustum::from_view_projection(away.build_matrix());
        let none = FrameInstances::collect(&scene, &ColorOptions::default(), Some(&behind));
        assert!(none.is_empty());
        assert_eq!(none.culled, all.len());
    }

    #[test]
    fn instance_layout_stride() {
        assert_eq!(size_of::<ParticleInstance>(), 96);
    }
}
