//! Rendering for the particle scene.
//!
//! One forward pass: lit instanced ornaments and photo frames, textured
//! photo faces, then alpha-blended dust points, all against a solid clear
//! color.

pub mod dust_pass;
pub mod instances;
pub mod mesh;
pub mod particle_pass;

use crate::camera::{Camera, CameraUniform, Frustum};
use crate::error::TinselError;
use crate::gpu::lighting::LightingUniform;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::texture::DepthTexture;
use crate::gpu::uniform::UniformBinding;
use crate::options::{ColorOptions, Options};
use crate::scene::Scene;

use self::dust_pass::DustPass;
pub use self::instances::{FrameInstances, ParticleInstance};
use self::particle_pass::ParticlePass;

/// Owns every GPU resource needed to draw a [`Scene`].
pub struct SceneRenderer {
    camera: Camera,
    camera_binding: UniformBinding<CameraUniform>,
    lighting: UniformBinding<LightingUniform>,
    particles: ParticlePass,
    dust: DustPass,
    depth: DepthTexture,
    colors: ColorOptions,
    last_visible: usize,
}

impl SceneRenderer {
    /// Build pipelines for `scene`.
    ///
    /// # Errors
    ///
    /// Returns [`TinselError::Shader`] if shader composition fails.
    pub fn new(
        context: &RenderContext,
        scene: &Scene,
        options: &Options,
    ) -> Result<Self, TinselError> {
        let device = &context.device;
        let mut composer = ShaderComposer::new()?;
        let (width, height) = context.size();
        let mut camera = Camera::new(&options.camera, 1.0);
        camera.resize(width, height);
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera);
        let camera_binding = UniformBinding::new(
            device,
            "Camera",
            uniform,
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let lighting = UniformBinding::new(
            device,
            "Lighting",
            LightingUniform::from(&options.lighting),
            wgpu::ShaderStages::FRAGMENT,
        );
        let particles = ParticlePass::new(
            context,
            &mut composer,
            &camera_binding.layout,
            &lighting.layout,
        )?;
        let dust = DustPass::new(
            context,
            &mut composer,
            &camera_binding.layout,
            scene.dust(),
            options.colors.dust,
        )?;
        Ok(Self {
            camera,
            camera_binding,
            lighting,
            particles,
            dust,
            depth: DepthTexture::new(device, width, height),
            colors: options.colors.clone(),
            last_visible: 0,
        })
    }

    /// Recreate size-dependent resources.
    pub fn resize(&mut self, context: &RenderContext, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.camera.resize(width, height);
        self.depth = DepthTexture::new(&context.device, width, height);
    }

    /// Apply new camera, lighting, and color options.
    pub fn apply_options(&mut self, context: &RenderContext, options: &Options) {
        self.camera.apply_options(&options.camera);
        self.lighting.value = LightingUniform::from(&options.lighting);
        self.lighting.update(&context.queue);
        self.colors = options.colors.clone();
    }

    /// Upload new photos and this frame's instances and uniforms.
    pub fn prepare(&mut self, context: &RenderContext, scene: &mut Scene) {
        for (id, image) in scene.take_pending_photos() {
            self.particles.upload_photo(context, id, image);
        }

        self.camera_binding.value.update_view_proj(&self.camera);
        self.camera_binding.update(&context.queue);

        let frustum = Frustum::from_view_projection(self.camera.build_matrix());
        let frame = FrameInstances::collect(scene, &self.colors, Some(&frustum));
        self.last_visible = frame.len();
        self.particles.prepare(context, &frame);
        self.dust.prepare(&context.queue, scene.dust(), self.colors.dust);
    }

    /// Record the frame into `view`.
    #[must_use]
    pub fn render(
        &self,
        context: &RenderContext,
        view: &wgpu::TextureView,
    ) -> wgpu::CommandEncoder {
        let mut encoder = context.create_encoder();
        let [r, g, b] = self.colors.background.map(f64::from);
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color {
                                    r,
                                    g,
                                    b,
                                    a: 1.0,
                                }),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
            pass.set_bind_group(0, &self.camera_binding.bind_group, &[]);
            pass.set_bind_group(1, &self.lighting.bind_group, &[]);
            self.particles.draw(&mut pass);
            self.dust.draw(&mut pass);
        }
        encoder
    }

    /// Instances drawn last frame after culling.
    #[must_use]
    pub fn visible_instances(&self) -> usize {
        self.last_visible
    }
}
