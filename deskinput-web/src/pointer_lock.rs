use deskinput_core::{CaptureCapabilities, CaptureHost, CaptureVariant};
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element};

/// Pointer lock through whichever API variant the browser exposes.
#[derive(Clone)]
pub struct PointerLock {
    variant: CaptureVariant,
    document: Document,
}

impl PointerLock {
    /// Probe `element` for the standard and `moz`-prefixed request methods.
    /// `None` when neither exists.
    pub fn negotiate(element: &Element, document: Document) -> Option<Self> {
        let capabilities = CaptureCapabilities {
            standard: has_method(element, CaptureVariant::Standard.request_method()),
            prefixed: has_method(element, CaptureVariant::MozPrefixed.request_method()),
        };
        let variant = capabilities.negotiate()?;
        log::debug!("using {variant:?} pointer lock API");
        Some(Self { variant, document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Name of the document-wide change notification.
    pub fn change_event(&self) -> &'static str {
        self.variant.change_event()
    }
}

impl CaptureHost for PointerLock {
    type Target = Element;

    fn request_capture(&self, target: &Element) {
        let Some(request) = method(target, self.variant.request_method()) else {
            return;
        };
        match request.call0(target) {
            // Newer browsers return a promise that rejects when the lock is refused.
            Ok(result) => {
                if let Ok(promise) = result.dyn_into::<Promise>() {
                    wasm_bindgen_futures::spawn_local(async move {
                        if let Err(err) = JsFuture::from(promise).await {
                            log::debug!("pointer lock request rejected: {err:?}");
                        }
                    });
                }
            }
            Err(err) => log::debug!("pointer lock request failed: {err:?}"),
        }
    }

    fn exit_capture(&self) {
        if let Some(exit) = method(&self.document, self.variant.exit_method()) {
            if let Err(err) = exit.call0(&self.document) {
                log::debug!("exiting pointer lock failed: {err:?}");
            }
        }
    }

    fn captured_target(&self) -> Option<Element> {
        Reflect::get(&self.document, &JsValue::from_str(self.variant.element_property()))
            .ok()?
            .dyn_into::<Element>()
            .ok()
    }
}

fn method(object: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(object, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

fn has_method(object: &JsValue, name: &str) -> bool {
    method(object, name).is_some()
}
