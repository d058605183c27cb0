//! Browser entry points (feature `web`, wasm32 only).
//!
//! [`WebScene`] draws into a canvas and runs two independent loops on the
//! page's animation-frame callback: one polls the hand detector, the other
//! animates and renders. Each loop re-arms its next frame before doing any
//! work, so a failing frame never stalls it.
//!
//! ```js
//! const scene = await WebScene.create(canvas, null);
//! scene.set_listener((report) => console.log(report.mode));
//! scene.set_detector((ts) => landmarker.poll(ts));
//! // ...
//! scene.dispose();
//! ```

mod detector;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

pub use detector::JsHandDetector;
use glam::Vec2;
use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::engine::{SceneCommand, SceneEngine};
use crate::gesture::{
    GestureClassifier, GestureReport, GestureTracker, InteractionMode,
};
use crate::options::Options;
use crate::schedule::TaskState;

type FrameCallback = Closure<dyn FnMut(f64)>;
type FrameSlot = Rc<RefCell<Option<FrameCallback>>>;

static LOGGING: Once = Once::new();

fn init_logging() {
    LOGGING.call_once(|| {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    });
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[derive(Debug, Clone, Copy)]
enum Loop {
    Detect,
    Render,
}

struct Shared {
    engine: Option<SceneEngine>,
    tracker: Option<GestureTracker<JsHandDetector>>,
    listener: Option<Function>,
    canvas: HtmlCanvasElement,
    detect: TaskState,
    render: TaskState,
}

impl Shared {
    fn task(&mut self, which: Loop) -> &mut TaskState {
        match which {
            Loop::Detect => &mut self.detect,
            Loop::Render => &mut self.render,
        }
    }
}

fn request_frame(callback: &FrameCallback) -> Option<i32> {
    let window = web_sys::window()?;
    window
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .ok()
}

fn cancel_frame(handle: i32) {
    if let Some(window) = web_sys::window() {
        let _ = window.cancel_animation_frame(handle);
    }
}

/// Start `which` unless it is already running.
fn start_loop(shared: &Rc<RefCell<Shared>>, slot: &FrameSlot, which: Loop) {
    if !shared.borrow_mut().task(which).start() {
        return;
    }
    let weak_shared = Rc::downgrade(shared);
    let weak_slot = Rc::downgrade(slot);
    let callback = FrameCallback::new(move |timestamp: f64| {
        let Some(shared) = weak_shared.upgrade() else {
            return;
        };
        if !shared.borrow_mut().task(which).fire() {
            return;
        }
        let next = weak_slot
            .upgrade()
            .and_then(|slot| slot.borrow().as_ref().and_then(request_frame));
        match next {
            Some(handle) => shared.borrow_mut().task(which).arm(handle),
            None => stop_unscheduled(&shared, which),
        }
        match which {
            Loop::Detect => detect_frame(&shared, timestamp),
            Loop::Render => render_frame(&shared),
        }
    });
    let handle = request_frame(&callback);
    *slot.borrow_mut() = Some(callback);
    match handle {
        Some(handle) => shared.borrow_mut().task(which).arm(handle),
        None => stop_unscheduled(shared, which),
    }
}

/// Mark `which` stopped after the host refused to schedule it, so a later
/// [`start_loop`] can retry.
fn stop_unscheduled(shared: &Rc<RefCell<Shared>>, which: Loop) {
    let _ = shared.borrow_mut().task(which).cancel();
    log::warn!("no animation frame available; {which:?} loop stopped");
}

fn detect_frame(shared: &Rc<RefCell<Shared>>, timestamp: f64) {
    let report = shared
        .borrow_mut()
        .tracker
        .as_mut()
        .and_then(|tracker| tracker.tick(timestamp));
    let Some(report) = report else {
        return;
    };
    let listener = {
        let mut state = shared.borrow_mut();
        if let Some(engine) = state.engine.as_mut() {
            engine.apply_gesture(report);
        }
        state.listener.clone()
    };
    if let Some(listener) = listener {
        notify(&listener, &report);
    }
}

/// Hand `{ mode, pointer }` to the page. `pointer` is `[x, y]` or `null`.
fn notify(listener: &Function, report: &GestureReport) {
    let payload = serde_json::to_string(report)
        .ok()
        .and_then(|json| js_sys::JSON::parse(&json).ok());
    let Some(payload) = payload else {
        return;
    };
    if let Err(e) = listener.call1(&JsValue::NULL, &payload) {
        log::warn!("gesture listener threw: {e:?}");
    }
}

fn render_frame(shared: &Rc<RefCell<Shared>>) {
    let mut state = shared.borrow_mut();
    let size = (state.canvas.width(), state.canvas.height());
    let Some(engine) = state.engine.as_mut() else {
        return;
    };
    if engine.context.size() != size {
        engine.resize(size.0, size.1);
    }
    match engine.render() {
        Ok(()) => {}
        Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
            engine.resize(size.0, size.1);
        }
        Err(e) => log::error!("render error: {e:?}"),
    }
}

/// A particle scene bound to a canvas element.
#[wasm_bindgen]
pub struct WebScene {
    shared: Rc<RefCell<Shared>>,
    detect_slot: FrameSlot,
    render_slot: FrameSlot,
}

#[wasm_bindgen]
impl WebScene {
    /// Create the scene on `canvas` and start rendering. `options_toml`
    /// overrides any subset of the defaults.
    ///
    /// # Errors
    ///
    /// Rejects if the options do not parse or the GPU cannot be
    /// initialized.
    pub async fn create(
        canvas: HtmlCanvasElement,
        options_toml: Option<String>,
    ) -> Result<WebScene, JsValue> {
        init_logging();
        let options = match options_toml {
            Some(toml) => Options::from_toml(&toml).map_err(js_error)?,
            None => Options::default(),
        };
        let size = (canvas.width().max(1), canvas.height().max(1));
        let engine = SceneEngine::new(
            wgpu::SurfaceTarget::Canvas(canvas.clone()),
            size,
            options,
        )
        .await
        .map_err(js_error)?;

        let scene = WebScene {
            shared: Rc::new(RefCell::new(Shared {
                engine: Some(engine),
                tracker: None,
                listener: None,
                canvas,
                detect: TaskState::new(),
                render: TaskState::new(),
            })),
            detect_slot: Rc::default(),
            render_slot: Rc::default(),
        };
        start_loop(&scene.shared, &scene.render_slot, Loop::Render);
        Ok(scene)
    }

    /// Install the detection function (see [`JsHandDetector`]) and start
    /// the detection loop. Replaces any previous detector.
    pub fn set_detector(&self, detect: Function) {
        {
            let mut state = self.shared.borrow_mut();
            let Some(engine) = state.engine.as_ref() else {
                return;
            };
            let classifier =
                GestureClassifier::new(engine.options().gesture.clone());
            state.tracker =
                Some(GestureTracker::new(JsHandDetector::new(detect), classifier));
        }
        start_loop(&self.shared, &self.detect_slot, Loop::Detect);
    }

    /// Register the single gesture listener, replacing any previous one.
    pub fn set_listener(&self, listener: Function) {
        self.shared.borrow_mut().listener = Some(listener);
    }

    /// Remove the gesture listener.
    pub fn clear_listener(&self) {
        self.shared.borrow_mut().listener = None;
    }

    /// Replace the options from a TOML document. Gesture thresholds take
    /// effect on the next detection frame.
    ///
    /// # Errors
    ///
    /// Throws if the options do not parse.
    pub fn set_options(&self, options_toml: &str) -> Result<(), JsValue> {
        let options = Options::from_toml(options_toml).map_err(js_error)?;
        let mut state = self.shared.borrow_mut();
        if let Some(tracker) = state.tracker.as_mut() {
            tracker.classifier_mut().set_options(options.gesture.clone());
        }
        if let Some(engine) = state.engine.as_mut() {
            engine.set_options(options);
        }
        Ok(())
    }

    /// Classify landmarks from a page-driven detector and apply the result,
    /// for pages that run their own detection loop instead of
    /// [`set_detector`](Self::set_detector). `data` is packed like the
    /// detector's `Float32Array` output; only the first hand is used.
    ///
    /// # Errors
    ///
    /// Throws if `data` is not a whole number of hands.
    pub fn push_landmarks(&self, data: &[f32]) -> Result<(), JsValue> {
        let listener = {
            let mut state = self.shared.borrow_mut();
            let Some(engine) = state.engine.as_mut() else {
                return Ok(());
            };
            let classifier =
                GestureClassifier::new(engine.options().gesture.clone());
            let report = classifier.process_flat(data).map_err(js_error)?;
            engine.apply_gesture(report);
            state.listener.clone().map(|listener| (listener, report))
        };
        if let Some((listener, report)) = listener {
            notify(&listener, &report);
        }
        Ok(())
    }

    /// Decode an image and add it as a photo ornament. Returns the particle
    /// index, or `undefined` after [`dispose`](Self::dispose).
    ///
    /// # Errors
    ///
    /// Throws if the bytes are not a supported image.
    pub fn add_photo(&self, bytes: &[u8]) -> Result<Option<usize>, JsValue> {
        let mut state = self.shared.borrow_mut();
        let Some(engine) = state.engine.as_mut() else {
            return Ok(None);
        };
        engine.add_photo(bytes).map(Some).map_err(js_error)
    }

    /// Force a mode (`"tree"`, `"scatter"`, `"focus"`).
    ///
    /// # Errors
    ///
    /// Throws on an unknown mode name.
    pub fn set_mode(&self, mode: &str) -> Result<(), JsValue> {
        let mode: InteractionMode = mode.parse().map_err(js_error)?;
        self.execute(SceneCommand::SetMode(mode));
        Ok(())
    }

    /// Steer the rotation with a pointer in normalized `[0, 1]` space.
    pub fn set_pointer(&self, x: f32, y: f32) {
        self.execute(SceneCommand::Pointer(Some(Vec2::new(x, y))));
    }

    /// Stop steering; the rotation holds where it is.
    pub fn clear_pointer(&self) {
        self.execute(SceneCommand::Pointer(None));
    }

    /// Flip the overlay flag. Scene and classifier state are untouched.
    pub fn toggle_overlay(&self) {
        self.execute(SceneCommand::ToggleOverlay);
    }

    /// Whether the page should show its overlay chrome.
    #[must_use]
    pub fn overlay_visible(&self) -> bool {
        self.shared
            .borrow()
            .engine
            .as_ref()
            .is_some_and(SceneEngine::overlay_visible)
    }

    /// Current mode name.
    #[must_use]
    pub fn mode(&self) -> String {
        self.shared
            .borrow()
            .engine
            .as_ref()
            .map_or(InteractionMode::Tree, |e| e.scene().mode())
            .to_string()
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.shared
            .borrow()
            .engine
            .as_ref()
            .map_or(0.0, SceneEngine::fps)
    }

    /// Stop both loops and release the detector and GPU resources. Later
    /// calls on this scene do nothing.
    pub fn dispose(&self) {
        let Ok(mut state) = self.shared.try_borrow_mut() else {
            log::warn!("dispose called re-entrantly; ignored");
            return;
        };
        let handles = [state.detect.cancel(), state.render.cancel()];
        for handle in handles.into_iter().flatten() {
            cancel_frame(handle);
        }
        state.tracker = None;
        state.listener = None;
        if state.engine.take().is_some() {
            log::info!("scene disposed");
        }
    }
}

impl WebScene {
    fn execute(&self, command: SceneCommand) {
        if let Some(engine) = self.shared.borrow_mut().engine.as_mut() {
            engine.execute(command);
        }
    }
}

impl Drop for WebScene {
    fn drop(&mut self) {
        self.dispose();
    }
}
