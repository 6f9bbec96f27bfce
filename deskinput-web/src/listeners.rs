use std::cell::RefCell;
use std::rc::Rc;

use deskinput_core::{InputEvent, InputTracker, PointerButton};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, KeyboardEvent, MouseEvent, WheelEvent};

type Handler = Closure<dyn FnMut(Event)>;

/// The device listeners for one element, built once and attached or
/// detached as the tracker's lifecycle demands.
pub struct Listeners {
    target: EventTarget,
    handlers: Vec<(&'static str, Handler)>,
    attached: bool,
}

impl Listeners {
    pub fn new(target: EventTarget, state: &Rc<RefCell<InputTracker>>) -> Self {
        let handlers = vec![
            (
                "keydown",
                forward(state, |e| {
                    e.dyn_ref::<KeyboardEvent>()
                        .map(|k| InputEvent::KeyDown { key: k.key() })
                }),
            ),
            (
                "keyup",
                forward(state, |e| {
                    e.dyn_ref::<KeyboardEvent>()
                        .map(|k| InputEvent::KeyUp { key: k.key() })
                }),
            ),
            (
                "mousemove",
                forward(state, |e| {
                    e.dyn_ref::<MouseEvent>().map(|m| InputEvent::PointerMove {
                        x: f64::from(m.client_x()),
                        y: f64::from(m.client_y()),
                    })
                }),
            ),
            (
                "mousedown",
                forward(state, |e| {
                    e.dyn_ref::<MouseEvent>().map(|m| InputEvent::PointerDown {
                        button: PointerButton::from_dom(m.button()),
                    })
                }),
            ),
            (
                "mouseup",
                forward(state, |e| {
                    e.dyn_ref::<MouseEvent>().map(|m| InputEvent::PointerUp {
                        button: PointerButton::from_dom(m.button()),
                    })
                }),
            ),
            (
                "wheel",
                forward(state, |e| {
                    e.dyn_ref::<WheelEvent>()
                        .map(|w| InputEvent::Wheel { delta_y: w.delta_y() })
                }),
            ),
            ("blur", forward(state, |_| Some(InputEvent::FocusLost))),
        ];

        Self {
            target,
            handlers,
            attached: false,
        }
    }

    pub fn attach(&mut self) -> Result<(), JsValue> {
        if self.attached {
            return Ok(());
        }
        // Set first so a partial attach is still fully removed by detach.
        self.attached = true;
        for (name, handler) in &self.handlers {
            self.target
                .add_event_listener_with_callback(name, handler.as_ref().unchecked_ref())?;
        }
        log::debug!("input listeners attached");
        Ok(())
    }

    /// Remove every handler. Failures are logged; the rest are still removed.
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        for (name, handler) in &self.handlers {
            if let Err(err) = self
                .target
                .remove_event_listener_with_callback(name, handler.as_ref().unchecked_ref())
            {
                log::error!("failed to remove {name} listener: {err:?}");
            }
        }
        self.attached = false;
        log::debug!("input listeners detached");
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Wrap a DOM-to-`InputEvent` translation into a listener closure.
fn forward<F>(state: &Rc<RefCell<InputTracker>>, translate: F) -> Handler
where
    F: Fn(&Event) -> Option<InputEvent> + 'static,
{
    let state = Rc::clone(state);
    Closure::wrap(Box::new(move |event: Event| {
        if let Some(input) = translate(&event) {
            state.borrow_mut().handle_event(input);
        }
    }) as Box<dyn FnMut(Event)>)
}
