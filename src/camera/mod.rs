//! Camera system for 3D scene viewing.
//!
//! A fixed perspective camera looking down -Z at the scene, a pointer-driven
//! rotation applied to the whole particle group, and frustum extraction for
//! culling.

/// Core camera struct and GPU uniform types.
pub mod core;
/// View frustum extraction and intersection tests.
pub mod frustum;
/// Pointer-driven scene rotation.
pub mod rotation;

pub use self::core::{Camera, CameraUniform};
pub use frustum::Frustum;
pub use rotation::SceneRotation;
