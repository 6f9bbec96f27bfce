use std::cell::{Cell, RefCell};
use std::rc::Rc;

use deskinput_core::InputTracker;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Self-rescheduling `requestAnimationFrame` loop that ticks the tracker.
///
/// The id of the pending frame is refreshed every time the callback re-arms,
/// so [`stop`](Self::stop) cancels exactly the frame that is queued.
pub struct FrameLoop {
    window: web_sys::Window,
    callback: Rc<RefCell<Option<FrameCallback>>>,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn new(window: web_sys::Window, state: Rc<RefCell<InputTracker>>) -> Self {
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let this_callback = Rc::downgrade(&callback);
        let this_pending = Rc::clone(&pending);
        let this_window = window.clone();
        let on_frame = Closure::wrap(Box::new(move |time: f64| {
            this_pending.set(None);
            state.borrow_mut().tick(time);

            // Re-arm whether or not this frame sampled.
            let Some(callback) = this_callback.upgrade() else {
                return;
            };
            let callback = callback.borrow();
            if let Some(cb) = callback.as_ref() {
                match this_window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => this_pending.set(Some(id)),
                    Err(err) => log::error!("failed to schedule sampling frame: {err:?}"),
                }
            }
        }) as Box<dyn FnMut(f64)>);
        *callback.borrow_mut() = Some(on_frame);

        Self {
            window,
            callback,
            pending,
        }
    }

    pub fn is_running(&self) -> bool {
        self.pending.get().is_some()
    }

    pub fn start(&self) -> Result<(), JsValue> {
        if self.is_running() {
            return Ok(());
        }
        let callback = self.callback.borrow();
        if let Some(cb) = callback.as_ref() {
            let id = self.window.request_animation_frame(cb.as_ref().unchecked_ref())?;
            self.pending.set(Some(id));
        }
        Ok(())
    }

    /// Cancel the queued frame. A no-op when nothing is queued.
    pub fn stop(&self) {
        if let Some(id) = self.pending.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::debug!("cancelAnimationFrame({id}) failed: {err:?}");
            }
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
