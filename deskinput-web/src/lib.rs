//! deskinput WASM Web Runtime
//!
//! Binds the `deskinput-core` tracker to a DOM element: keyboard, mouse and
//! wheel listeners feed it, a `requestAnimationFrame` loop samples it, and
//! the optional pointer-lock gate turns tracking on and off. JavaScript reads
//! the sampled state through the [`Tracker`](tracker::Tracker) handle once per
//! frame.

#[cfg(target_arch = "wasm32")]
mod config;
#[cfg(target_arch = "wasm32")]
mod frame_loop;
#[cfg(target_arch = "wasm32")]
mod listeners;
#[cfg(target_arch = "wasm32")]
mod pointer_lock;
#[cfg(target_arch = "wasm32")]
pub mod tracker;

pub use deskinput_core::{InputSnapshot, KeyboardState, PointerState, TrackerOptions};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Entry point — called when the WASM module loads.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("deskinput web runtime initialized");
}

/// Start tracking input on the element with id `element_id`.
///
/// `options` is an optional plain object with `exclusiveCapture` and
/// `samplingIntervalMs`; anything missing or mistyped falls back to defaults.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = createTracker)]
pub fn create_tracker(element_id: &str, options: JsValue) -> Result<tracker::Tracker, JsValue> {
    let options = config::options_from_js(&options);
    tracker::Tracker::new(element_id, options)
}
