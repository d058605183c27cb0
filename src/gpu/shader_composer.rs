use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

use crate::error::TinselError;

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Shared WGSL modules are registered at construction. Consuming shaders use
/// `#import tinsel::module_name` to pull them in, and the composer hands
/// `naga::Module` IR straight to wgpu.
pub struct ShaderComposer {
    composer: Composer,
}

/// Shared modules in dependency order: (source, file_path).
const MODULES: &[(&str, &str)] = &[
    (
        include_str!("../../assets/shaders/modules/camera.wgsl"),
        "modules/camera.wgsl",
    ),
    (
        include_str!("../../assets/shaders/modules/lighting.wgsl"),
        "modules/lighting.wgsl",
    ),
];

/// Ornament and photo entry points.
pub const PARTICLES_WGSL: &str =
    include_str!("../../assets/shaders/particles.wgsl");

/// Dust point entry points.
pub const DUST_WGSL: &str = include_str!("../../assets/shaders/dust.wgsl");

impl ShaderComposer {
    /// Composer with every shared module registered.
    ///
    /// # Errors
    ///
    /// Returns [`TinselError::Shader`] if a shared module fails to parse.
    pub fn new() -> Result<Self, TinselError> {
        let mut composer = Composer::default();
        for &(source, file_path) in MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source,
                    file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| {
                    TinselError::Shader(format!(
                        "registering '{file_path}': {e:?}"
                    ))
                })?;
        }
        Ok(Self { composer })
    }

    /// Compose a shader source (which may contain `#import` directives)
    /// into a `wgpu::ShaderModule`.
    ///
    /// # Errors
    ///
    /// Returns [`TinselError::Shader`] if composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        source: &str,
        file_path: &str,
    ) -> Result<wgpu::ShaderModule, TinselError> {
        let module = self.compose_naga(source, file_path)?;
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(module)),
        }))
    }

    /// Compose into a `naga::Module` without a device.
    ///
    /// # Errors
    ///
    /// Returns [`TinselError::Shader`] if composition fails.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, TinselError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| {
                TinselError::Shader(format!("composing '{file_path}': {e}"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_points(source: &str, file_path: &str) -> Vec<String> {
        let mut composer = ShaderComposer::new().unwrap();
        let module = composer.compose_naga(source, file_path).unwrap();
        module.entry_points.iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn particle_shader_composes() {
        let names = entry_points(PARTICLES_WGSL, "particles.wgsl");
        for entry in ["vs_main", "fs_lit", "vs_photo", "fs_photo"] {
            assert!(names.iter().any(|n| n == entry), "missing {entry}");
        }
    }

    #[test]
    fn dust_shader_composes() {
        let names = entry_points(DUST_WGSL, "dust.wgsl");
        assert_eq!(names.len(), 2);
        assert!(names.iter().any(|n| n == "vs_dust"));
        assert!(names.iter().any(|n| n == "fs_dust"));
    }

    #[test]
    fn broken_source_is_a_shader_error() {
        let mut composer = ShaderComposer::new().unwrap();
        let err = composer
            .compose_naga("fn broken( {", "broken.wgsl")
            .unwrap_err();
        assert!(matches!(err, TinselError::Shader(_)));
    }
}
