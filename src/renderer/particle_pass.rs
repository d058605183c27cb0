//! Instanced ornament, frame, and photo-face drawing.

use rustc_hash::FxHashMap;
use wgpu::util::DeviceExt;

use super::instances::{FrameInstances, ParticleInstance};
use super::mesh::{self, MeshData, MeshVertex};
use crate::error::TinselError;
use crate::gpu::dynamic_buffer::TypedBuffer;
use crate::gpu::pipeline_helpers::{
    depth_stencil_state, filtering_sampler, linear_sampler, texture_2d,
};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{ShaderComposer, PARTICLES_WGSL};
use crate::gpu::texture::PhotoTexture;
use crate::scene::{PhotoId, PhotoImage};

/// Static mesh on the GPU.
struct MeshBuffers {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

impl MeshBuffers {
    fn new(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertices =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertices")),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let indices =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Indices")),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        Self {
            vertices,
            indices,
            index_count: mesh.indices.len() as u32,
        }
    }

    fn draw(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        instances: &TypedBuffer<ParticleInstance>,
    ) {
        if instances.is_empty() {
            return;
        }
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        pass.set_vertex_buffer(1, instances.buffer().slice(..));
        pass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..instances.count() as u32);
    }
}

/// One mesh plus its per-frame instances.
struct Batch {
    mesh: MeshBuffers,
    instances: TypedBuffer<ParticleInstance>,
}

impl Batch {
    fn new(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        Self {
            mesh: MeshBuffers::new(device, label, mesh),
            instances: TypedBuffer::with_capacity(
                device,
                &format!("{label} Instances"),
                256,
                wgpu::BufferUsages::VERTEX,
            ),
        }
    }
}

struct Photo {
    _texture: PhotoTexture,
    bind_group: wgpu::BindGroup,
}

/// Draws every particle kind with one lit pipeline and one textured
/// pipeline.
pub struct ParticlePass {
    lit_pipeline: wgpu::RenderPipeline,
    photo_pipeline: wgpu::RenderPipeline,
    cubes: Batch,
    spheres: Batch,
    canes: Batch,
    faces: Batch,
    face_order: Vec<PhotoId>,
    photo_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    photos: FxHashMap<PhotoId, Photo>,
}

fn create_pipeline(
    context: &RenderContext,
    label: &str,
    shader: &wgpu::ShaderModule,
    entry: (&str, &str),
    bind_group_layouts: &[&wgpu::BindGroupLayout],
) -> wgpu::RenderPipeline {
    let layout = context.device.create_pipeline_layout(
        &wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{label} Layout")),
            bind_group_layouts,
            push_constant_ranges: &[],
        },
    );
    context
        .device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some(entry.0),
                buffers: &[MeshVertex::layout(), ParticleInstance::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some(entry.1),
                targets: &[Some(wgpu::ColorTargetState {
                    format: context.format(),
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(depth_stencil_state(true)),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
}

impl ParticlePass {
    /// Build pipelines and upload the static meshes.
    ///
    /// # Errors
    ///
    /// Returns [`TinselError::Shader`] if the particle shader fails to
    /// compose.
    pub fn new(
        context: &RenderContext,
        composer: &mut ShaderComposer,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
    ) -> Result<Self, TinselError> {
        let device = &context.device;
        let shader = composer.compose(
            device,
            "Particle Shader",
            PARTICLES_WGSL,
            "particles.wgsl",
        )?;
        let photo_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Photo Texture Layout"),
                entries: &[texture_2d(0), filtering_sampler(1)],
            });
        let lit_pipeline = create_pipeline(
            context,
            "Ornament Pipeline",
            &shader,
            ("vs_main", "fs_lit"),
            &[camera_layout, lighting_layout],
        );
        let photo_pipeline = create_pipeline(
            context,
            "Photo Pipeline",
            &shader,
            ("vs_photo", "fs_photo"),
            &[camera_layout, lighting_layout, &photo_layout],
        );
        Ok(Self {
            lit_pipeline,
            photo_pipeline,
            cubes: Batch::new(device, "Cube", &mesh::cuboid(glam::Vec3::splat(0.5))),
            spheres: Batch::new(device, "Sphere", &mesh::uv_sphere(0.5, 24, 16)),
            canes: Batch::new(device, "Cane", &mesh::cane(0.09, 1.0, 0.25, 10, 40)),
            faces: Batch::new(device, "Photo Face", &mesh::quad()),
            face_order: Vec::new(),
            photo_layout,
            sampler: linear_sampler(device, "Photo Sampler"),
            photos: FxHashMap::default(),
        })
    }

    /// Upload a photo texture and its bind group, downscaling it first if
    /// it exceeds the device's 2D texture limit.
    pub fn upload_photo(
        &mut self,
        context: &RenderContext,
        id: PhotoId,
        image: PhotoImage,
    ) {
        let limit = context.device.limits().max_texture_dimension_2d;
        let image = image.fit_within(limit);
        let label = format!("Photo {}", id.0);
        let texture =
            PhotoTexture::upload(&context.device, &context.queue, &label, &image);
        let bind_group =
            context.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&label),
                layout: &self.photo_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(
                            &texture.view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&self.sampler),
                    },
                ],
            });
        let _ = self.photos.insert(
            id,
            Photo {
                _texture: texture,
                bind_group,
            },
        );
    }

    /// Write this frame's instances.
    pub fn prepare(&mut self, context: &RenderContext, frame: &FrameInstances) {
        let (device, queue) = (&context.device, &context.queue);
        let _ = self.cubes.instances.write(device, queue, &frame.cubes);
        let _ = self.spheres.instances.write(device, queue, &frame.spheres);
        let _ = self.canes.instances.write(device, queue, &frame.canes);
        let faces: Vec<ParticleInstance> =
            frame.photos.iter().map(|(_, inst)| *inst).collect();
        let _ = self.faces.instances.write(device, queue, &faces);
        self.face_order.clear();
        self.face_order.extend(frame.photos.iter().map(|(id, _)| *id));
    }

    /// Record draws. Groups 0 (camera) and 1 (lighting) must be bound.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.lit_pipeline);
        for batch in [&self.cubes, &self.spheres, &self.canes] {
            batch.mesh.draw(pass, &batch.instances);
        }

        if self.face_order.is_empty() {
            return;
        }
        let faces = &self.faces;
        pass.set_pipeline(&self.photo_pipeline);
        pass.set_vertex_buffer(0, faces.mesh.vertices.slice(..));
        pass.set_vertex_buffer(1, faces.instances.buffer().slice(..));
        pass.set_index_buffer(
            faces.mesh.indices.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        for (i, id) in self.face_order.iter().enumerate() {
            let Some(photo) = self.photos.get(id) else {
                continue;
            };
            let i = i as u32;
            pass.set_bind_group(2, &photo.bind_group, &[]);
            pass.draw_indexed(0..faces.mesh.index_count, 0, i..i + 1);
        }
    }
}
