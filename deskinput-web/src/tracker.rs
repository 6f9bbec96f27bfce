use std::cell::RefCell;
use std::rc::{Rc, Weak};

use deskinput_core::{CaptureHost, InputTracker, ListenerChange, TrackerOptions};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement};

use crate::frame_loop::FrameLoop;
use crate::listeners::Listeners;
use crate::pointer_lock::PointerLock;

/// Input tracker bound to one DOM element.
///
/// Read the sampled state once per frame; `x - lastX` is the motion since the
/// previous sample.
#[wasm_bindgen]
pub struct Tracker {
    inner: Rc<Inner>,
}

struct Inner {
    element: HtmlElement,
    state: Rc<RefCell<InputTracker>>,
    listeners: RefCell<Listeners>,
    frame_loop: FrameLoop,
    capture: Option<CaptureBinding>,
}

/// Click-to-capture and capture-change handlers of a capture-gated tracker.
struct CaptureBinding {
    lock: PointerLock,
    on_click: Closure<dyn FnMut(Event)>,
    on_change: Closure<dyn FnMut(Event)>,
}

impl Tracker {
    /// Bind a tracker to the element with id `element_id`.
    pub fn new(element_id: &str, options: TrackerOptions) -> Result<Tracker, JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;
        let element = document
            .get_element_by_id(element_id)
            .ok_or("Element not found")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| "Element is not an HtmlElement")?;

        let state = Rc::new(RefCell::new(InputTracker::new(options)));
        let lock = if options.exclusive_capture {
            let lock = PointerLock::negotiate(&element, document);
            if lock.is_none() {
                log::warn!("pointer lock unavailable, input on #{element_id} will not be tracked");
            }
            lock
        } else {
            None
        };

        let inner = Rc::new_cyclic(|weak: &Weak<Inner>| Inner {
            listeners: RefCell::new(Listeners::new(element.clone().into(), &state)),
            frame_loop: FrameLoop::new(window, Rc::clone(&state)),
            capture: lock.map(|lock| CaptureBinding::new(lock, &element, weak.clone())),
            element,
            state,
        });

        if let Some(binding) = &inner.capture {
            binding.bind(&inner.element)?;
        } else if !options.exclusive_capture {
            make_focusable(&inner.element)?;
        }
        if inner.state.borrow().is_active() {
            inner.apply(ListenerChange::Attach)?;
        }

        log::info!(
            "tracking input on #{element_id} (exclusive capture: {}, sampling every {:.2}ms)",
            options.exclusive_capture,
            inner.state.borrow().options().sampling_interval_ms,
        );
        Ok(Tracker { inner })
    }

    fn with_state<R>(&self, read: impl FnOnce(&InputTracker) -> R) -> R {
        read(&*self.inner.state.borrow())
    }
}

#[wasm_bindgen]
impl Tracker {
    #[wasm_bindgen(js_name = isPressed)]
    pub fn is_pressed(&self, key: &str) -> bool {
        self.with_state(|s| s.keyboard().is_pressed(key))
    }

    /// Keys currently held.
    #[wasm_bindgen(js_name = pressedKeys)]
    pub fn pressed_keys(&self) -> js_sys::Array {
        self.with_state(|s| {
            s.keyboard()
                .pressed_keys()
                .into_iter()
                .map(JsValue::from_str)
                .collect()
        })
    }

    /// Release every key, e.g. after the page regains focus.
    #[wasm_bindgen(js_name = clearKeys)]
    pub fn clear_keys(&self) {
        self.inner.state.borrow_mut().clear_keys();
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.with_state(|s| s.pointer().x)
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.with_state(|s| s.pointer().y)
    }

    #[wasm_bindgen(getter = lastX)]
    pub fn last_x(&self) -> f64 {
        self.with_state(|s| s.pointer().last_x)
    }

    #[wasm_bindgen(getter = lastY)]
    pub fn last_y(&self) -> f64 {
        self.with_state(|s| s.pointer().last_y)
    }

    #[wasm_bindgen(getter = rawX)]
    pub fn raw_x(&self) -> f64 {
        self.with_state(|s| s.pointer().raw_x)
    }

    #[wasm_bindgen(getter = rawY)]
    pub fn raw_y(&self) -> f64 {
        self.with_state(|s| s.pointer().raw_y)
    }

    #[wasm_bindgen(getter = deltaX)]
    pub fn delta_x(&self) -> f64 {
        self.with_state(|s| s.pointer().delta().x)
    }

    #[wasm_bindgen(getter = deltaY)]
    pub fn delta_y(&self) -> f64 {
        self.with_state(|s| s.pointer().delta().y)
    }

    #[wasm_bindgen(getter)]
    pub fn dragging(&self) -> bool {
        self.with_state(|s| s.pointer().dragging)
    }

    #[wasm_bindgen(getter = wheelAccumulated)]
    pub fn wheel_accumulated(&self) -> f64 {
        self.with_state(|s| s.pointer().wheel_accumulated)
    }

    #[wasm_bindgen(getter = lastWheelAccumulated)]
    pub fn last_wheel_accumulated(&self) -> f64 {
        self.with_state(|s| s.pointer().last_wheel_accumulated)
    }

    #[wasm_bindgen(getter = wheelDelta)]
    pub fn wheel_delta(&self) -> f64 {
        self.with_state(|s| s.pointer().wheel_delta())
    }

    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.with_state(InputTracker::is_active)
    }

    #[wasm_bindgen(js_name = isCaptured)]
    pub fn is_captured(&self) -> bool {
        self.with_state(InputTracker::is_captured)
    }

    #[wasm_bindgen(js_name = isStopped)]
    pub fn is_stopped(&self) -> bool {
        self.with_state(InputTracker::is_stopped)
    }

    /// Stop tracking and release pointer lock if this element holds it.
    pub fn stop(&self) {
        self.inner.shutdown();
    }
}

impl Inner {
    fn apply(&self, change: ListenerChange) -> Result<(), JsValue> {
        match change {
            ListenerChange::Attach => {
                self.listeners.borrow_mut().attach()?;
                self.frame_loop.start()?;
            }
            ListenerChange::Detach => {
                self.listeners.borrow_mut().detach();
                self.frame_loop.stop();
            }
        }
        Ok(())
    }

    fn on_capture_change(&self) {
        let Some(binding) = &self.capture else {
            return;
        };
        let ours = binding.lock.holds_capture(&self.element);
        let change = self.state.borrow_mut().capture_changed(ours);
        if let Some(change) = change {
            if let Err(err) = self.apply(change) {
                log::error!("failed to apply {change:?}: {err:?}");
            }
        }
    }

    fn shutdown(&self) {
        let change = self.state.borrow_mut().stop();
        if let Some(change) = change {
            if let Err(err) = self.apply(change) {
                log::error!("failed to apply {change:?}: {err:?}");
            }
        }
        if let Some(binding) = &self.capture {
            binding.unbind(&self.element);
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl CaptureBinding {
    fn new(lock: PointerLock, element: &HtmlElement, owner: Weak<Inner>) -> Self {
        let click_lock = lock.clone();
        let click_target: Element = element.clone().into();
        let on_click = Closure::wrap(Box::new(move |_: Event| {
            click_lock.request_capture(&click_target);
        }) as Box<dyn FnMut(Event)>);

        // Capture changes are only announced document-wide.
        let on_change = Closure::wrap(Box::new(move |_: Event| {
            if let Some(inner) = owner.upgrade() {
                inner.on_capture_change();
            }
        }) as Box<dyn FnMut(Event)>);

        Self {
            lock,
            on_click,
            on_change,
        }
    }

    fn bind(&self, element: &HtmlElement) -> Result<(), JsValue> {
        element.add_event_listener_with_callback("click", self.on_click.as_ref().unchecked_ref())?;
        self.lock.document().add_event_listener_with_callback(
            self.lock.change_event(),
            self.on_change.as_ref().unchecked_ref(),
        )?;
        Ok(())
    }

    fn unbind(&self, element: &HtmlElement) {
        let click = element.remove_event_listener_with_callback("click", self.on_click.as_ref().unchecked_ref());
        let change = self.lock.document().remove_event_listener_with_callback(
            self.lock.change_event(),
            self.on_change.as_ref().unchecked_ref(),
        );
        if let Err(err) = click.and(change) {
            log::error!("failed to remove capture listeners: {err:?}");
        }
        if self.lock.holds_capture(element) {
            self.lock.exit_capture();
        }
    }
}

/// Let the element take keyboard focus without a caret or focus ring.
fn make_focusable(element: &HtmlElement) -> Result<(), JsValue> {
    element.set_content_editable("true");
    let style = element.style();
    style.set_property("cursor", "default")?;
    style.set_property("outline", "none")?;
    Ok(())
}
