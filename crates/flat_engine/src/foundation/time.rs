//! Time management utilities

use std::time::Instant;

/// High-precision frame timer
///
/// Produces the `(now, tick)` pair consumed by scene updates: `now` is the
/// elapsed wall-clock time in seconds since the timer was created, `tick`
/// counts completed frames.
pub struct Timer {
    start: Instant,
    last_frame: Instant,
    delta_time: f64,
    now: f64,
    tick: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer starting at `now == 0.0`, `tick == 0`
    pub fn new() -> Self {
        let start = Instant::now();
        Self {
            start,
            last_frame: start,
            delta_time: 0.0,
            now: 0.0,
            tick: 0,
        }
    }

    /// Advance the timer; call once per frame
    pub fn update(&mut self) {
        let frame = Instant::now();
        self.delta_time = frame.duration_since(self.last_frame).as_secs_f64();
        self.now = frame.duration_since(self.start).as_secs_f64();
        self.last_frame = frame;
        self.tick += 1;
    }

    /// Seconds elapsed since the timer was created, as of the last update
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Number of completed frames
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Seconds between the two most recent updates
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_starts_at_zero() {
        let timer = Timer::new();
        assert_eq!(timer.tick(), 0);
        assert_eq!(timer.now(), 0.0);
        assert_eq!(timer.delta_time(), 0.0);
    }

    #[test]
    fn test_timer_advances() {
        let mut timer = Timer::new();
        timer.update();
        timer.update();
        assert_eq!(timer.tick(), 2);
        assert!(timer.now() >= 0.0);
        assert!(timer.delta_time() >= 0.0);
    }
}
