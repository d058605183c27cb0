//! The orchestrating layer: GPU context, scene, and renderer in one place.

pub mod command;

pub use command::SceneCommand;
use glam::Vec2;

use crate::error::TinselError;
use crate::gesture::{GestureReport, InteractionMode};
use crate::gpu::render_context::RenderContext;
use crate::options::Options;
use crate::renderer::SceneRenderer;
use crate::scene::{PhotoImage, Scene};
use crate::util::frame_timing::FrameTiming;

/// Renders and animates a [`Scene`], fed by gesture reports and commands.
///
/// # Frame loop
///
/// Call [`render`](Self::render) once per display refresh. It advances the
/// animation by the measured frame time, uploads instances, and presents.
/// Call [`resize`](Self::resize) when the surface size changes.
pub struct SceneEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    renderer: SceneRenderer,
    scene: Scene,
    options: Options,
    frame_timing: FrameTiming,
    overlay_visible: bool,
    photo_requested: bool,
}

impl SceneEngine {
    /// Engine drawing into a window or canvas surface.
    ///
    /// # Errors
    ///
    /// Returns [`TinselError`] if GPU initialization or shader composition
    /// fails.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, TinselError> {
        let context = RenderContext::new(target, size).await?;
        Self::new_from_context(context, options)
    }

    /// Engine from a pre-built [`RenderContext`].
    ///
    /// # Errors
    ///
    /// Returns [`TinselError::Shader`] if shader composition fails.
    pub fn new_from_context(
        context: RenderContext,
        options: Options,
    ) -> Result<Self, TinselError> {
        let scene = Scene::new(&options);
        let renderer = SceneRenderer::new(&context, &scene, &options)?;
        log::info!(
            "scene ready: {} ornaments, {} dust points",
            scene.particles().len(),
            scene.dust().points().len()
        );
        Ok(Self {
            context,
            renderer,
            scene,
            options,
            frame_timing: FrameTiming::new(),
            overlay_visible: true,
            photo_requested: false,
        })
    }

    /// Execute one command.
    pub fn execute(&mut self, command: SceneCommand) {
        match command {
            SceneCommand::SetMode(mode) => self.set_mode(mode),
            SceneCommand::Pointer(pointer) => self.update_interaction(pointer),
            SceneCommand::RequestPhoto => self.photo_requested = true,
            SceneCommand::ToggleOverlay => {
                self.overlay_visible = !self.overlay_visible;
            }
            SceneCommand::Quit => {}
        }
    }

    /// Apply one classifier report.
    pub fn apply_gesture(&mut self, report: GestureReport) {
        self.scene.apply_report(report);
    }

    /// Switch interaction mode.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        let _ = self.scene.set_mode(mode);
    }

    /// Feed the latest pointer.
    pub fn update_interaction(&mut self, pointer: Option<Vec2>) {
        self.scene.update_interaction(pointer);
    }

    /// Decode and add a photo. Returns the new particle's index.
    ///
    /// # Errors
    ///
    /// Returns [`TinselError::PhotoDecode`] if the bytes are not a
    /// supported image.
    pub fn add_photo(&mut self, bytes: &[u8]) -> Result<usize, TinselError> {
        let image = PhotoImage::decode(bytes)?;
        Ok(self.add_photo_image(image))
    }

    /// Add an already decoded photo.
    pub fn add_photo_image(&mut self, image: PhotoImage) -> usize {
        self.scene.add_photo(image)
    }

    /// Advance the animation by `dt` seconds without drawing.
    pub fn update(&mut self, dt: f32) {
        self.scene.tick(dt);
    }

    /// Animate, draw, and present one frame.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the next swapchain texture cannot be
    /// acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let dt = self.frame_timing.tick();
        self.update(dt);
        self.renderer.prepare(&self.context, &mut self.scene);

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self.renderer.render(&self.context, &view);
        self.context.submit(encoder);
        frame.present();
        Ok(())
    }

    /// Handle a surface resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        self.renderer.resize(&self.context, width, height);
    }

    /// Replace options and apply them to the scene and renderer.
    pub fn set_options(&mut self, options: Options) {
        self.scene.set_options(&options);
        self.renderer.apply_options(&self.context, &options);
        self.options = options;
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The choreographed scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Whether overlay chrome should be shown.
    #[must_use]
    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    /// Whether a photo was requested since the last call.
    pub fn take_photo_request(&mut self) -> bool {
        std::mem::take(&mut self.photo_requested)
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// Instances drawn last frame.
    #[must_use]
    pub fn visible_instances(&self) -> usize {
        self.renderer.visible_instances()
    }
}
