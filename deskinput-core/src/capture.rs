//! Exclusive pointer capture: API negotiation and the capture state machine.
//!
//! Hosts expose pointer capture either through the standard pointer-lock API
//! or a `moz`-prefixed copy of it. The platform layer probes once, picks a
//! [`CaptureVariant`], and implements [`CaptureHost`] on top of it; the
//! tracker itself only ever learns whether the captured target is its own.

/// Which flavour of the pointer-lock API the host provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureVariant {
    Standard,
    MozPrefixed,
}

impl CaptureVariant {
    /// Element method that asks for capture.
    pub const fn request_method(self) -> &'static str {
        match self {
            Self::Standard => "requestPointerLock",
            Self::MozPrefixed => "mozRequestPointerLock",
        }
    }

    /// Document method that releases capture.
    pub const fn exit_method(self) -> &'static str {
        match self {
            Self::Standard => "exitPointerLock",
            Self::MozPrefixed => "mozExitPointerLock",
        }
    }

    /// Document property naming the captured element, if any.
    pub const fn element_property(self) -> &'static str {
        match self {
            Self::Standard => "pointerLockElement",
            Self::MozPrefixed => "mozPointerLockElement",
        }
    }

    /// Document-wide event fired whenever capture changes hands.
    pub const fn change_event(self) -> &'static str {
        match self {
            Self::Standard => "pointerlockchange",
            Self::MozPrefixed => "mozpointerlockchange",
        }
    }
}

/// Result of probing the host for capture support.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureCapabilities {
    pub standard: bool,
    pub prefixed: bool,
}

impl CaptureCapabilities {
    /// Pick a variant, preferring the standard API. `None` means capture is
    /// unavailable and a capture-gated tracker will never activate.
    pub fn negotiate(self) -> Option<CaptureVariant> {
        if self.standard {
            Some(CaptureVariant::Standard)
        } else if self.prefixed {
            Some(CaptureVariant::MozPrefixed)
        } else {
            None
        }
    }
}

/// Platform collaborator providing exclusive pointer capture.
pub trait CaptureHost {
    type Target: PartialEq;

    /// Ask for capture on `target`. Best effort: the host may refuse.
    fn request_capture(&self, target: &Self::Target);

    /// Release capture, whoever holds it.
    fn exit_capture(&self);

    /// The target currently holding capture.
    fn captured_target(&self) -> Option<Self::Target>;

    fn holds_capture(&self, target: &Self::Target) -> bool {
        self.captured_target().as_ref() == Some(target)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Captured,
    Released,
}

/// Two-state capture machine driven by capture-change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureGate {
    state: CaptureState,
}

impl Default for CaptureGate {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureGate {
    pub fn new() -> Self {
        Self {
            state: CaptureState::Released,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_captured(&self) -> bool {
        self.state == CaptureState::Captured
    }

    /// Feed one notification. Returns the new state when it changed.
    pub fn observe(&mut self, captured_is_ours: bool) -> Option<CaptureState> {
        let next = if captured_is_ours {
            CaptureState::Captured
        } else {
            CaptureState::Released
        };
        if next == self.state {
            return None;
        }
        self.state = next;
        Some(next)
    }
}
