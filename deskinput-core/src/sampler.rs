/// Self-throttling sampling clock.
///
/// Polled once per refresh opportunity with the host's frame timestamp in
/// milliseconds. A sample is due only when strictly more than `interval_ms`
/// has passed since the last applied one, so the interval is a floor: the
/// effective period is the first frame spacing at or past it, and drift is
/// never corrected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampler {
    interval_ms: f64,
    last_applied_ms: f64,
}

impl Sampler {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_applied_ms: 0.0,
        }
    }

    /// Returns `true` and records `now_ms` when a sample is due.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        if now_ms - self.last_applied_ms > self.interval_ms {
            self.last_applied_ms = now_ms;
            true
        } else {
            false
        }
    }

    /// Forget the last applied sample. Called on every (re)attach.
    pub fn reset(&mut self) {
        self.last_applied_ms = 0.0;
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn last_applied_ms(&self) -> f64 {
        self.last_applied_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_due_within_interval() {
        let mut s = Sampler::new(10.0);
        assert!(!s.poll(0.0));
        assert!(!s.poll(5.0));
        assert!(!s.poll(10.0)); // strictly greater required
        assert_eq!(s.last_applied_ms(), 0.0);
    }

    #[test]
    fn test_due_past_interval_records_time() {
        let mut s = Sampler::new(10.0);
        assert!(s.poll(11.0));
        assert_eq!(s.last_applied_ms(), 11.0);
        assert!(!s.poll(20.0));
        assert!(s.poll(21.5));
        assert_eq!(s.last_applied_ms(), 21.5);
    }

    #[test]
    fn test_never_faster_than_interval() {
        // 60Hz refresh against a 20ms floor: every second frame at best.
        let mut s = Sampler::new(20.0);
        let frame = 1000.0 / 60.0;
        let applied: Vec<f64> = (1..=30)
            .map(|i| i as f64 * frame)
            .filter(|&t| s.poll(t))
            .collect();
        for pair in applied.windows(2) {
            assert!(pair[1] - pair[0] > 20.0);
        }
        assert!(!applied.is_empty());
    }

    #[test]
    fn test_zero_interval_samples_every_advancing_frame() {
        let mut s = Sampler::new(0.0);
        assert!(s.poll(1.0));
        assert!(s.poll(2.0));
        assert!(!s.poll(2.0));
    }

    #[test]
    fn test_reset_makes_next_frame_due() {
        let mut s = Sampler::new(10.0);
        assert!(s.poll(500.0));
        assert!(!s.poll(505.0));
        s.reset();
        assert!(s.poll(505.0));
    }
}
