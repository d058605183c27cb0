//! Ambient dust drawn as a point list.

use glam::Mat4;

use crate::error::TinselError;
use crate::gpu::dynamic_buffer::TypedBuffer;
use crate::gpu::pipeline_helpers::depth_stencil_state;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{ShaderComposer, DUST_WGSL};
use crate::gpu::uniform::UniformBinding;
use crate::scene::DustField;

/// Dust transform and tint. Must match the WGSL `Dust` struct (80 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DustUniform {
    /// Field rotation.
    pub model: [[f32; 4]; 4],
    /// RGB tint and alpha.
    pub color: [f32; 4],
}

/// Point-list pipeline for the dust field.
pub struct DustPass {
    pipeline: wgpu::RenderPipeline,
    points: TypedBuffer<[f32; 3]>,
    uniform: UniformBinding<DustUniform>,
}

const DUST_ALPHA: f32 = 0.7;

impl DustPass {
    /// Build the pipeline and upload the field's points.
    ///
    /// # Errors
    ///
    /// Returns [`TinselError::Shader`] if the dust shader fails to compose.
    pub fn new(
        context: &RenderContext,
        composer: &mut ShaderComposer,
        camera_layout: &wgpu::BindGroupLayout,
        dust: &DustField,
        color: [f32; 3],
    ) -> Result<Self, TinselError> {
        let device = &context.device;
        let shader =
            composer.compose(device, "Dust Shader", DUST_WGSL, "dust.wgsl")?;
        let uniform = UniformBinding::new(
            device,
            "Dust",
            DustUniform {
                model: Mat4::IDENTITY.to_cols_array_2d(),
                color: [color[0], color[1], color[2], DUST_ALPHA],
            },
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Dust Pipeline Layout"),
                bind_group_layouts: &[camera_layout, &uniform.layout],
                push_constant_ranges: &[],
            });
        let pipeline =
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Dust Pipeline"),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_dust"),
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: size_of::<[f32; 3]>()
                            as wgpu::BufferAddress,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                    }],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_dust"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.format(),
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::PointList,
                    ..Default::default()
                },
                depth_stencil: Some(depth_stencil_state(false)),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            });
        let points: Vec<[f32; 3]> =
            dust.points().iter().map(|p| p.to_array()).collect();
        Ok(Self {
            pipeline,
            points: TypedBuffer::new_with_data(
                device,
                &context.queue,
                "Dust Points",
                &points,
                wgpu::BufferUsages::VERTEX,
            ),
            uniform,
        })
    }

    /// Update rotation and tint.
    pub fn prepare(
        &mut self,
        queue: &wgpu::Queue,
        dust: &DustField,
        color: [f32; 3],
    ) {
        self.uniform.value.model = dust.matrix().to_cols_array_2d();
        self.uniform.value.color = [color[0], color[1], color[2], DUST_ALPHA];
        self.uniform.update(queue);
    }

    /// Record the draw. Group 0 (camera) must be bound.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.points.is_empty() {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(1, &self.uniform.bind_group, &[]);
        pass.set_vertex_buffer(0, self.points.buffer().slice(..));
        pass.draw(0..self.points.count() as u32, 0..1);
    }
}
