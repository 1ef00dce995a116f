//! Simulation time for frame-stepped loops.

use std::time::Duration;

/// Millisecond game clock read by time-gated logic (fire rate, flashing UI).
pub trait Clock {
    /// Milliseconds since the clock started.
    fn now_ms(&self) -> u64;
}

/// Simulated time, advanced explicitly once per tick.
#[derive(Debug, Clone, Default)]
pub struct Time {
    delta: Duration,
    elapsed: Duration,
    ticks: u64,
}

impl Time {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.ticks += 1;
    }

    /// Advance by `dt` seconds. Negative steps count as zero.
    pub fn advance_seconds(&mut self, dt: f32) {
        self.advance(Duration::from_secs_f32(dt.max(0.0)));
    }

    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Clock for Time {
    fn now_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_moves_clock_in_milliseconds() {
        let mut time = Time::new();
        time.advance(Duration::from_millis(150));
        time.advance(Duration::from_millis(16));
        assert_eq!(time.now_ms(), 166);
        assert_eq!(time.ticks(), 2);
        assert!((time.delta_seconds() - 0.016).abs() < 1e-6);
    }

    #[test]
    fn negative_step_is_clamped() {
        let mut time = Time::new();
        time.advance_seconds(0.5);
        time.advance_seconds(-1.0);
        assert_eq!(time.now_ms(), 500);
        assert_eq!(time.delta_seconds(), 0.0);
    }
}
