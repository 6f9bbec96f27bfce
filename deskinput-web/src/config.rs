use deskinput_core::TrackerOptions;
use js_sys::Reflect;
use wasm_bindgen::JsValue;

/// Read tracker options from a JS object. Current names win over the legacy
/// `lockPointer` / `updateRate` ones.
pub fn options_from_js(value: &JsValue) -> TrackerOptions {
    if !value.is_object() {
        return TrackerOptions::default();
    }
    let exclusive_capture = field(value, "exclusiveCapture")
        .or_else(|| field(value, "lockPointer"))
        .and_then(|v| v.as_bool());
    let sampling_interval_ms = field(value, "samplingIntervalMs")
        .or_else(|| field(value, "updateRate"))
        .and_then(|v| v.as_f64());
    TrackerOptions::with_overrides(exclusive_capture, sampling_interval_ms)
}

fn field(object: &JsValue, name: &str) -> Option<JsValue> {
    Reflect::get(object, &JsValue::from_str(name))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}
