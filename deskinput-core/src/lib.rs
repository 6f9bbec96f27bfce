//! deskinput core — keyboard and pointer state for an interactive surface.
//!
//! Raw device events are folded into live fields immediately; a sampling
//! throttle copies them into a double-buffered snapshot (`x`/`last_x`, ...)
//! that a render loop polls once per frame. Nothing here touches a platform
//! API: the wasm runtime in `deskinput-web` feeds events and frame
//! timestamps in and applies the listener changes this crate asks for.

pub mod capture;
pub mod event;
pub mod keyboard;
pub mod options;
pub mod pointer;
pub mod sampler;
pub mod tracker;

pub use capture::{CaptureCapabilities, CaptureGate, CaptureHost, CaptureState, CaptureVariant};
pub use event::{InputEvent, PointerButton};
pub use keyboard::KeyboardState;
pub use options::{TrackerOptions, DEFAULT_SAMPLING_INTERVAL_MS};
pub use pointer::PointerState;
pub use sampler::Sampler;
pub use tracker::{InputSnapshot, InputTracker, ListenerChange};
