//! Bridge from a JavaScript hand-landmark model to [`HandDetector`].

use js_sys::{Array, Float32Array, Function};
use wasm_bindgen::{JsCast, JsValue};

use crate::gesture::{DetectorError, DetectorPoll, HandDetector, HandLandmarks};

/// Calls a page-supplied `detect(timestampMs)` function every tick.
///
/// The function's return value is interpreted as:
///
/// - `undefined`: model still loading or no decodable video frame
/// - `null` or an empty array: no hand in view
/// - a `Float32Array` (or plain array) of `63 * k` numbers: `k` hands
/// - a string: the detector cannot run at all, with the reason
///
/// A thrown exception counts as a single failed frame. The function must not
/// call back into the owning scene.
pub struct JsHandDetector {
    detect: Function,
}

impl JsHandDetector {
    /// Wrap a JS detection function.
    #[must_use]
    pub fn new(detect: Function) -> Self {
        Self { detect }
    }
}

impl HandDetector for JsHandDetector {
    fn detect(
        &mut self,
        timestamp_ms: f64,
    ) -> Result<DetectorPoll, DetectorError> {
        let value = self
            .detect
            .call1(&JsValue::NULL, &JsValue::from_f64(timestamp_ms))
            .map_err(|e| DetectorError::Transient(describe(&e)))?;
        interpret(&value)
    }
}

fn interpret(value: &JsValue) -> Result<DetectorPoll, DetectorError> {
    if value.is_undefined() {
        return Ok(DetectorPoll::NotReady);
    }
    if value.is_null() {
        return Ok(DetectorPoll::Hands(Vec::new()));
    }
    if let Some(reason) = value.as_string() {
        return Err(DetectorError::Unavailable(reason));
    }
    let data = if let Some(array) = value.dyn_ref::<Float32Array>() {
        array.to_vec()
    } else if Array::is_array(value) {
        Float32Array::new(value).to_vec()
    } else {
        return Err(DetectorError::Transient(
            "detector returned an unsupported value".into(),
        ));
    };
    HandLandmarks::parse_hands(&data)
        .map(DetectorPoll::Hands)
        .map_err(|e| DetectorError::Transient(e.to_string()))
}

fn describe(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
