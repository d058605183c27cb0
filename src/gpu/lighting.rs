use crate::options::LightingOptions;

/// Lighting parameters shared by the lit particle shaders.
/// NOTE: Must match the WGSL `Lighting` struct layout exactly (32 bytes).
///
/// WGSL layout:
///   key_dir: vec3<f32>         (offset 0, align 16)
///   key_intensity: f32         (offset 12)
///   ambient: f32               (offset 16)
///   specular_intensity: f32    (offset 20)
///   shininess: f32             (offset 24)
///   _pad: f32                  (offset 28)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Direction toward the key light (normalized).
    pub key_dir: [f32; 3],
    /// Key light intensity.
    pub key_intensity: f32,
    /// Ambient term.
    pub ambient: f32,
    /// Specular intensity.
    pub specular_intensity: f32,
    /// Specular shininess exponent.
    pub shininess: f32,
    /// Padding to 16-byte alignment.
    pub _pad: f32,
}

impl From<&LightingOptions> for LightingUniform {
    fn from(opts: &LightingOptions) -> Self {
        let dir = glam::Vec3::from(opts.key_dir).normalize_or(glam::Vec3::Y);
        Self {
            key_dir: dir.to_array(),
            key_intensity: opts.key_intensity,
            ambient: opts.ambient,
            specular_intensity: opts.specular_intensity,
            shininess: opts.shininess,
            _pad: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_is_32_bytes() {
        assert_eq!(size_of::<LightingUniform>(), 32);
    }

    #[test]
    fn key_direction_is_normalized() {
        let u = LightingUniform::from(&LightingOptions::default());
        assert!((glam::Vec3::from(u.key_dir).length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_direction_falls_back_to_up() {
        let opts = LightingOptions {
            key_dir: [0.0; 3],
            ..LightingOptions::default()
        };
        assert_eq!(LightingUniform::from(&opts).key_dir, [0.0, 1.0, 0.0]);
    }
}
