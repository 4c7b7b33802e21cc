// src/core/clock.rs
// Time source for the polling loops. Real runs sleep the thread;
// tests step a manual clock instead.

use std::cell::Cell;
use std::thread;
use std::time::{Duration, Instant};

pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, d: Duration);
}

/// Wall clock + `thread::sleep`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant { Instant::now() }
    fn sleep(&self, d: Duration) { thread::sleep(d) }
}

/// Deterministic clock: `sleep` advances `now` without blocking.
#[derive(Debug)]
pub struct ManualClock {
    start: Instant,
    now: Cell<Instant>,
    slept: Cell<u32>,
}

impl ManualClock {
    pub fn new() -> Self {
        let start = Instant::now();
        Self { start, now: Cell::new(start), slept: Cell::new(0) }
    }

    pub fn advance(&self, d: Duration) {
        self.now.set(self.now.get() + d);
    }

    /// Time passed since construction.
    pub fn elapsed(&self) -> Duration {
        self.now.get() - self.start
    }

    /// Number of `sleep` calls so far.
    pub fn sleeps(&self) -> u32 {
        self.slept.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self { Self::new() }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant { self.now.get() }

    fn sleep(&self, d: Duration) {
        self.slept.set(self.slept.get() + 1);
        self.advance(d);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_only_moves_on_sleep() {
        let clock = ManualClock::new();
        let t0 = clock.now();
        clock.sleep(Duration::from_millis(250));
        clock.sleep(Duration::from_millis(250));
        assert_eq!(clock.now() - t0, Duration::from_millis(500));
        assert_eq!(clock.elapsed(), Duration::from_millis(500));
        assert_eq!(clock.sleeps(), 2);
    }
}
