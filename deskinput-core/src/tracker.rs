use serde::{Deserialize, Serialize};

use crate::capture::{CaptureGate, CaptureState};
use crate::event::InputEvent;
use crate::keyboard::KeyboardState;
use crate::options::TrackerOptions;
use crate::pointer::PointerState;
use crate::sampler::Sampler;

/// Listener change the host must apply after a lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerChange {
    /// Register the device listeners and start the frame loop.
    Attach,
    /// Remove the device listeners and cancel the pending frame.
    Detach,
}

/// Copy of everything a frame consumer reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub keyboard: KeyboardState,
    pub pointer: PointerState,
}

/// Keyboard and pointer state tracker for one surface.
///
/// The host forwards device events through [`handle_event`](Self::handle_event),
/// frame timestamps through [`tick`](Self::tick) and capture notifications
/// through [`capture_changed`](Self::capture_changed). Whenever a call returns a
/// [`ListenerChange`] the host attaches or detaches its real listeners to match.
/// While inactive, events and ticks are dropped so the state stays frozen.
#[derive(Debug, Clone)]
pub struct InputTracker {
    options: TrackerOptions,
    keyboard: KeyboardState,
    pointer: PointerState,
    sampler: Sampler,
    /// `None` when tracking is unconditional.
    capture: Option<CaptureGate>,
    active: bool,
    stopped: bool,
}

impl InputTracker {
    /// Without exclusive capture the tracker starts active and the host must
    /// attach immediately; with it, nothing is tracked until capture arrives.
    pub fn new(options: TrackerOptions) -> Self {
        let options = options.sanitized();
        let capture = options.exclusive_capture.then(CaptureGate::new);
        Self {
            options,
            keyboard: KeyboardState::new(),
            pointer: PointerState::new(),
            sampler: Sampler::new(options.sampling_interval_ms),
            active: capture.is_none(),
            capture,
            stopped: false,
        }
    }

    pub fn options(&self) -> &TrackerOptions {
        &self.options
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            keyboard: self.keyboard.clone(),
            pointer: self.pointer,
        }
    }

    /// Whether listeners should currently be attached.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Capture state, or `None` in unconditional mode.
    pub fn capture_state(&self) -> Option<CaptureState> {
        self.capture.map(|gate| gate.state())
    }

    pub fn is_captured(&self) -> bool {
        self.capture.is_some_and(|gate| gate.is_captured())
    }

    /// Apply one device event to the live fields. Returns `false` if the
    /// tracker is inactive and the event was dropped.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        if !self.active {
            return false;
        }
        match event {
            InputEvent::KeyDown { key } => self.keyboard.press(key),
            InputEvent::KeyUp { key } => self.keyboard.release(key),
            InputEvent::PointerMove { x, y } => self.pointer.move_to(x, y),
            InputEvent::PointerDown { button } if button.is_primary() => self.pointer.dragging = true,
            InputEvent::PointerUp { button } if button.is_primary() => self.pointer.dragging = false,
            InputEvent::PointerDown { .. } | InputEvent::PointerUp { .. } => {}
            InputEvent::Wheel { delta_y } => self.pointer.scroll(delta_y),
            InputEvent::FocusLost => self.keyboard.clear_all(),
        }
        true
    }

    /// One refresh opportunity at `now_ms`. Returns `true` if a sample was
    /// applied.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if !self.active || !self.sampler.poll(now_ms) {
            return false;
        }
        self.pointer.sample();
        true
    }

    /// A capture-change notification arrived; `captured_is_ours` tells
    /// whether the captured target is this tracker's surface.
    pub fn capture_changed(&mut self, captured_is_ours: bool) -> Option<ListenerChange> {
        if self.stopped {
            return None;
        }
        let gate = self.capture.as_mut()?;
        match gate.observe(captured_is_ours)? {
            CaptureState::Captured => {
                log::debug!("pointer captured, tracking input");
                Some(self.activate())
            }
            CaptureState::Released => {
                log::debug!("pointer capture lost, freezing input state");
                Some(self.deactivate())
            }
        }
    }

    /// Mark every key released. Recovers from key-ups lost while unfocused.
    pub fn clear_keys(&mut self) {
        self.keyboard.clear_all();
    }

    /// Stop tracking for good. Works in both modes; later events, ticks and
    /// capture notifications are ignored.
    pub fn stop(&mut self) -> Option<ListenerChange> {
        if self.stopped {
            return None;
        }
        self.stopped = true;
        log::debug!("input tracker stopped");
        if self.active {
            Some(self.deactivate())
        } else {
            None
        }
    }

    fn activate(&mut self) -> ListenerChange {
        self.active = true;
        self.sampler.reset();
        ListenerChange::Attach
    }

    fn deactivate(&mut self) -> ListenerChange {
        self.active = false;
        ListenerChange::Detach
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::PointerButton;
    use glam::DVec2;

    fn tracker(interval: f64) -> InputTracker {
        InputTracker::new(TrackerOptions::with_overrides(Some(false), Some(interval)))
    }

    fn captured_tracker(interval: f64) -> InputTracker {
        InputTracker::new(TrackerOptions::with_overrides(Some(true), Some(interval)))
    }

    fn key_down(key: &str) -> InputEvent {
        InputEvent::KeyDown { key: key.into() }
    }

    fn key_up(key: &str) -> InputEvent {
        InputEvent::KeyUp { key: key.into() }
    }

    fn move_to(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerMove { x, y }
    }

    // ── Construction ──

    #[test]
    fn test_unconditional_mode_starts_active() {
        let t = tracker(10.0);
        assert!(t.is_active());
        assert_eq!(t.capture_state(), None);
        assert_eq!(t.snapshot(), InputSnapshot::default());
    }

    #[test]
    fn test_capture_mode_starts_released() {
        let t = captured_tracker(10.0);
        assert!(!t.is_active());
        assert_eq!(t.capture_state(), Some(CaptureState::Released));
    }

    #[test]
    fn test_bad_interval_sanitized_on_construction() {
        let t = InputTracker::new(TrackerOptions {
            exclusive_capture: false,
            sampling_interval_ms: f64::NAN,
        });
        assert_eq!(
            t.options().sampling_interval_ms,
            crate::options::DEFAULT_SAMPLING_INTERVAL_MS
        );
    }

    // ── Keyboard ──

    #[test]
    fn test_keyboard_reflects_latest_event() {
        let mut t = tracker(10.0);
        t.handle_event(key_down("a"));
        t.handle_event(key_down("b"));
        t.handle_event(key_up("a"));
        assert!(!t.keyboard().is_pressed("a"));
        assert!(t.keyboard().is_pressed("b"));
    }

    #[test]
    fn test_focus_lost_releases_held_keys() {
        let mut t = tracker(10.0);
        t.handle_event(key_down("Alt"));
        t.handle_event(key_down("Tab"));
        t.handle_event(InputEvent::FocusLost);
        assert!(t.keyboard().pressed_keys().is_empty());
    }

    #[test]
    fn test_clear_keys() {
        let mut t = tracker(10.0);
        t.handle_event(key_down("w"));
        t.clear_keys();
        assert!(!t.keyboard().is_pressed("w"));
    }

    // ── Pointer and sampling ──

    #[test]
    fn test_move_then_sample_scenario() {
        let mut t = tracker(10.0);
        t.handle_event(move_to(5.0, 5.0));
        assert!(!t.tick(0.0));
        let p = t.pointer();
        assert_eq!((p.raw_x, p.raw_y), (5.0, 5.0));
        assert_eq!((p.x, p.y), (0.0, 0.0));

        assert!(t.tick(11.0));
        let p = t.pointer();
        assert_eq!((p.x, p.y), (5.0, 5.0));
        assert_eq!((p.last_x, p.last_y), (0.0, 0.0));
    }

    #[test]
    fn test_raw_updates_every_move() {
        let mut t = tracker(1000.0);
        for i in 0..20 {
            let v = i as f64;
            t.handle_event(move_to(v, -v));
            assert_eq!(t.pointer().raw_position(), DVec2::new(v, -v));
        }
        assert_eq!(t.pointer().position(), DVec2::ZERO);
    }

    #[test]
    fn test_ticks_within_interval_leave_position() {
        let mut t = tracker(10.0);
        t.handle_event(move_to(1.0, 1.0));
        assert!(t.tick(11.0));
        t.handle_event(move_to(2.0, 2.0));
        for now in [12.0, 15.0, 20.0, 21.0] {
            assert!(!t.tick(now));
            assert_eq!(t.pointer().position(), DVec2::new(1.0, 1.0));
        }
        assert!(t.tick(21.5));
        assert_eq!(t.pointer().position(), DVec2::new(2.0, 2.0));
    }

    #[test]
    fn test_last_lags_one_applied_sample() {
        let mut t = tracker(10.0);
        let mut now = 0.0;
        let mut previous = t.pointer().position();
        for i in 1..=25 {
            t.handle_event(move_to(i as f64 * 3.0, i as f64 * 7.0));
            now += 16.0;
            if t.tick(now) {
                assert_eq!(t.pointer().last_position(), previous);
                previous = t.pointer().position();
            }
        }
        assert_eq!(t.pointer().position(), DVec2::new(75.0, 175.0));
    }

    #[test]
    fn test_wheel_sum_survives_sampling() {
        let mut t = tracker(10.0);
        for d in [3.0, -1.0, 0.5] {
            t.handle_event(InputEvent::Wheel { delta_y: d });
        }
        assert_eq!(t.pointer().wheel_accumulated, 2.5);
        assert!(t.tick(11.0));
        assert_eq!(t.pointer().wheel_accumulated, 2.5);
        assert_eq!(t.pointer().last_wheel_accumulated, 2.5);
        t.handle_event(InputEvent::Wheel { delta_y: 4.0 });
        assert_eq!(t.pointer().wheel_delta(), 4.0);
    }

    #[test]
    fn test_dragging_tracks_primary_button_only() {
        let mut t = tracker(1000.0);
        t.handle_event(InputEvent::PointerDown {
            button: PointerButton::Secondary,
        });
        assert!(!t.pointer().dragging);
        t.handle_event(InputEvent::PointerDown {
            button: PointerButton::Primary,
        });
        assert!(t.pointer().dragging);
        t.handle_event(InputEvent::PointerUp {
            button: PointerButton::Auxiliary,
        });
        assert!(t.pointer().dragging);
        t.handle_event(InputEvent::PointerUp {
            button: PointerButton::Primary,
        });
        assert!(!t.pointer().dragging);
    }

    // ── Capture gating ──

    #[test]
    fn test_events_ignored_before_capture() {
        let mut t = captured_tracker(10.0);
        assert!(!t.handle_event(key_down("a")));
        assert!(!t.handle_event(move_to(9.0, 9.0)));
        assert!(!t.tick(100.0));
        assert_eq!(t.snapshot(), InputSnapshot::default());
    }

    #[test]
    fn test_capture_attaches_and_tracks() {
        let mut t = captured_tracker(10.0);
        assert_eq!(t.capture_changed(true), Some(ListenerChange::Attach));
        assert!(t.is_captured());
        assert!(t.handle_event(move_to(4.0, 2.0)));
        assert!(t.tick(50.0));
        assert_eq!(t.pointer().position(), DVec2::new(4.0, 2.0));
    }

    #[test]
    fn test_release_detaches_and_freezes() {
        let mut t = captured_tracker(10.0);
        t.capture_changed(true);
        t.handle_event(key_down("w"));
        t.handle_event(move_to(4.0, 2.0));
        t.tick(50.0);

        assert_eq!(t.capture_changed(false), Some(ListenerChange::Detach));
        let frozen = t.snapshot();
        assert!(!t.handle_event(key_up("w")));
        assert!(!t.handle_event(move_to(100.0, 100.0)));
        assert!(!t.tick(500.0));
        assert_eq!(t.snapshot(), frozen);
        assert!(t.keyboard().is_pressed("w"));
    }

    #[test]
    fn test_repeated_notifications_do_not_reattach() {
        let mut t = captured_tracker(10.0);
        assert_eq!(t.capture_changed(false), None);
        assert_eq!(t.capture_changed(true), Some(ListenerChange::Attach));
        assert_eq!(t.capture_changed(true), None);
        assert_eq!(t.capture_changed(false), Some(ListenerChange::Detach));
        assert_eq!(t.capture_changed(false), None);
    }

    #[test]
    fn test_recapture_resets_sampler() {
        let mut t = captured_tracker(10.0);
        t.capture_changed(true);
        t.handle_event(move_to(1.0, 1.0));
        assert!(t.tick(1000.0));
        t.capture_changed(false);
        t.capture_changed(true);
        t.handle_event(move_to(2.0, 2.0));
        // Would be throttled against the old 1000ms sample.
        assert!(t.tick(1001.0));
        assert_eq!(t.pointer().position(), DVec2::new(2.0, 2.0));
        assert_eq!(t.pointer().last_position(), DVec2::new(1.0, 1.0));
    }

    #[test]
    fn test_capture_notifications_ignored_in_unconditional_mode() {
        let mut t = tracker(10.0);
        assert_eq!(t.capture_changed(true), None);
        assert_eq!(t.capture_changed(false), None);
        assert!(t.is_active());
    }

    // ── Stop ──

    #[test]
    fn test_stop_unconditional_mode() {
        let mut t = tracker(10.0);
        t.handle_event(move_to(3.0, 3.0));
        assert_eq!(t.stop(), Some(ListenerChange::Detach));
        assert!(t.is_stopped());
        assert!(!t.handle_event(move_to(8.0, 8.0)));
        assert!(!t.tick(100.0));
        assert_eq!(t.pointer().raw_position(), DVec2::new(3.0, 3.0));
        assert_eq!(t.stop(), None);
    }

    #[test]
    fn test_stop_while_released_needs_no_detach() {
        let mut t = captured_tracker(10.0);
        assert_eq!(t.stop(), None);
        assert!(t.is_stopped());
        assert_eq!(t.capture_changed(true), None);
        assert!(!t.is_active());
    }

    #[test]
    fn test_stop_while_captured_detaches() {
        let mut t = captured_tracker(10.0);
        t.capture_changed(true);
        assert_eq!(t.stop(), Some(ListenerChange::Detach));
        assert_eq!(t.capture_changed(false), None);
    }
}
