//! Single-value uniform buffers with their bind group.

use wgpu::util::DeviceExt;

use super::pipeline_helpers::uniform_buffer;

/// A `T` uniform at binding 0 of its own bind group.
pub struct UniformBinding<T> {
    /// CPU copy, uploaded by [`update`](Self::update).
    pub value: T,
    /// The GPU buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout (one uniform entry).
    pub layout: wgpu::BindGroupLayout,
    /// Bind group referencing `buffer`.
    pub bind_group: wgpu::BindGroup,
}

impl<T: bytemuck::Pod> UniformBinding<T> {
    /// Create the buffer, layout, and bind group for `value`.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        value: T,
        visibility: wgpu::ShaderStages,
    ) -> Self {
        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Buffer")),
                contents: bytemuck::bytes_of(&value),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(&format!("{label} Layout")),
                entries: &[uniform_buffer(0, visibility)],
            });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} Bind Group")),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self {
            value,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Upload the current CPU value.
    pub fn update(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&self.value));
    }
}
