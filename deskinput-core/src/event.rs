/// Platform-agnostic input events fed into an
/// [`InputTracker`](crate::InputTracker).
///
/// The wasm runtime translates DOM events into these; native hosts and tests
/// construct them directly.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key went down. `key` is the DOM `KeyboardEvent.key` value.
    KeyDown { key: String },
    /// A key went up.
    KeyUp { key: String },
    /// Pointer moved to client coordinates.
    PointerMove { x: f64, y: f64 },
    /// Pointer button pressed.
    PointerDown { button: PointerButton },
    /// Pointer button released.
    PointerUp { button: PointerButton },
    /// Wheel scrolled by `delta_y` (DOM `WheelEvent.deltaY`).
    Wheel { delta_y: f64 },
    /// The surface lost keyboard focus; held keys will never see a key-up.
    FocusLost,
}

/// Pointer button identifier, numbered like DOM `MouseEvent.button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Main button, usually the left one.
    Primary,
    /// Wheel / middle button.
    Auxiliary,
    /// Usually the right button.
    Secondary,
    /// Back, forward, or anything past them.
    Other(i16),
}

impl PointerButton {
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            n => Self::Other(n),
        }
    }

    pub fn is_primary(self) -> bool {
        matches!(self, Self::Primary)
    }
}
