//! Standalone window backed by winit.
//!
//! With no camera feed on the desktop, the mouse plays the palm: its window
//! position is the pointer signal and number keys pick the mode. Photos are
//! added by dropping image files onto the window, or through a file dialog
//! when the `dialog` feature is enabled.
//!
//! ```no_run
//! # use tinsel::Viewer;
//! Viewer::builder()
//!     .with_title("Tinsel")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::engine::{SceneCommand, SceneEngine};
use crate::error::TinselError;
use crate::input::{InputEvent, InputProcessor};
use crate::options::Options;

/// How often the title bar overlay refreshes.
const TITLE_INTERVAL: Duration = Duration::from_millis(250);

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    photos: Vec<String>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: None,
            photos: Vec::new(),
            title: "Tinsel".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Add a photo file to load at startup.
    #[must_use]
    pub fn with_photo(mut self, path: impl Into<String>) -> Self {
        self.photos.push(path.into());
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            photos: self.photos,
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window showing the particle scene.
pub struct Viewer {
    options: Options,
    photos: Vec<String>,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`TinselError::Viewer`] if the event loop fails.
    pub fn run(self) -> Result<(), TinselError> {
        let event_loop =
            EventLoop::new().map_err(|e| TinselError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);
        let input = InputProcessor::new(1, 1, self.options.keybindings.clone());
        let mut app = ViewerApp {
            window: None,
            engine: None,
            input,
            options: Some(self.options),
            photos: self.photos,
            title: self.title,
            last_title: Instant::now(),
        };
        event_loop
            .run_app(&mut app)
            .map_err(|e| TinselError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<SceneEngine>,
    input: InputProcessor,
    /// Taken when the engine is created.
    options: Option<Options>,
    photos: Vec<String>,
    title: String,
    last_title: Instant,
}

fn load_photo(engine: &mut SceneEngine, path: &Path) {
    let result = std::fs::read(path)
        .map_err(TinselError::from)
        .and_then(|bytes| engine.add_photo(&bytes));
    if let Err(e) = result {
        log::warn!("could not add photo {}: {e}", path.display());
    }
}

#[cfg(feature = "dialog")]
fn pick_photos(engine: &mut SceneEngine) {
    let files = rfd::FileDialog::new()
        .add_filter("Images", &["png", "jpg", "jpeg", "gif", "bmp", "webp"])
        .pick_files()
        .unwrap_or_default();
    for path in files {
        load_photo(engine, &path);
    }
}

#[cfg(not(feature = "dialog"))]
fn pick_photos(_engine: &mut SceneEngine) {
    log::info!("drop an image file onto the window to add a photo");
}

impl ViewerApp {
    fn execute(&mut self, event_loop: &ActiveEventLoop, command: SceneCommand) {
        let Some(engine) = &mut self.engine else {
            return;
        };
        if command == SceneCommand::Quit {
            event_loop.exit();
            return;
        }
        engine.execute(command);
        if engine.take_photo_request() {
            pick_photos(engine);
        }
        if command == SceneCommand::ToggleOverlay {
            self.refresh_title(true);
        }
    }

    fn refresh_title(&mut self, force: bool) {
        let (Some(window), Some(engine)) = (&self.window, &self.engine) else {
            return;
        };
        if !force && self.last_title.elapsed() < TITLE_INTERVAL {
            return;
        }
        self.last_title = Instant::now();
        if engine.overlay_visible() {
            let scene = engine.scene();
            window.set_title(&format!(
                "{} | {} | {} photos | {:.0} fps",
                self.title,
                scene.mode(),
                scene.photo_count(),
                engine.fps()
            ));
        } else {
            window.set_title(&self.title);
        }
    }

    fn redraw(&mut self) {
        let (Some(window), Some(engine)) = (&self.window, &mut self.engine)
        else {
            return;
        };
        match engine.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                let inner = window.inner_size();
                engine.resize(inner.width, inner.height);
            }
            Err(e) => log::error!("render error: {e:?}"),
        }
        window.request_redraw();
        self.refresh_title(false);
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 800));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let options = self.options.take().unwrap_or_default();
        let engine = match pollster::block_on(SceneEngine::new(
            window.clone(),
            (size.width, size.height),
            options,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("failed to create engine: {e}");
                event_loop.exit();
                return;
            }
        };
        let _ = self.input.handle_event(InputEvent::Resized {
            width: size.width,
            height: size.height,
        });
        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);

        if let Some(engine) = &mut self.engine {
            for path in std::mem::take(&mut self.photos) {
                load_photo(engine, Path::new(&path));
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }
        if self.engine.is_none() {
            return;
        }

        let input_event = match event {
            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
                Some(InputEvent::Resized {
                    width: size.width,
                    height: size.height,
                })
            }
            WindowEvent::CursorMoved { position, .. } => {
                Some(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                })
            }
            WindowEvent::CursorLeft { .. } => Some(InputEvent::CursorLeft),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    if let PhysicalKey::Code(code) = event.physical_key {
                        let key = format!("{code:?}");
                        if let Some(cmd) = self.input.handle_key_press(&key) {
                            self.execute(event_loop, cmd);
                        }
                    }
                }
                None
            }
            WindowEvent::DroppedFile(path) => {
                if let Some(engine) = &mut self.engine {
                    load_photo(engine, &path);
                }
                None
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                None
            }
            _ => None,
        };

        if let Some(cmd) = input_event.and_then(|e| self.input.handle_event(e)) {
            self.execute(event_loop, cmd);
        }
    }
}
