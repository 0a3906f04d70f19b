use std::time::Duration;

/// Minimum host time between two executed steps (~30 Hz).
pub const FRAME_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 30);

/// Frame-rate ceiling for the redraw loop.
///
/// Timestamps are host time since the host's origin, as delivered with each
/// repaint callback. The clock starts at zero, so frames delivered in the
/// first interval after the origin are throttled too.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` and records `now` when a step may run.
    pub fn tick(&mut self, now: Duration) -> bool {
        if now.saturating_sub(self.last) < FRAME_INTERVAL {
            return false;
        }
        self.last = now;
        true
    }

    pub fn last(&self) -> Duration {
        self.last
    }
}
