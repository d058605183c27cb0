//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, growable buffers, uniform
//! bindings, textures, and shader composition.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// Lighting uniform layout.
pub mod lighting;
/// Shared wgpu boilerplate helpers.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Depth and photo textures.
pub mod texture;
/// Single-value uniform buffers.
pub mod uniform;
