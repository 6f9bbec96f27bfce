use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Pointer position, drag flag and wheel sum, double-buffered by sampling.
///
/// `raw_*` and `dragging` are live. `x`, `y` and `wheel_accumulated` hold the
/// values of the most recent sample and `last_*` those of the sample before,
/// so per-tick motion is `current - last`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    pub raw_x: f64,
    pub raw_y: f64,
    pub x: f64,
    pub y: f64,
    pub last_x: f64,
    pub last_y: f64,
    pub dragging: bool,
    pub wheel_accumulated: f64,
    pub last_wheel_accumulated: f64,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.raw_x = x;
        self.raw_y = y;
    }

    pub fn scroll(&mut self, delta_y: f64) {
        self.wheel_accumulated += delta_y;
    }

    /// Shift current into last and live into current.
    ///
    /// The wheel sum is copied, never reset.
    pub fn sample(&mut self) {
        self.last_x = self.x;
        self.last_y = self.y;
        self.x = self.raw_x;
        self.y = self.raw_y;
        self.last_wheel_accumulated = self.wheel_accumulated;
    }

    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn last_position(&self) -> DVec2 {
        DVec2::new(self.last_x, self.last_y)
    }

    pub fn raw_position(&self) -> DVec2 {
        DVec2::new(self.raw_x, self.raw_y)
    }

    /// Motion between the last two samples.
    pub fn delta(&self) -> DVec2 {
        self.position() - self.last_position()
    }

    pub fn wheel_delta(&self) -> f64 {
        self.wheel_accumulated - self.last_wheel_accumulated
    }
}
