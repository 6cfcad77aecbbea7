//! Clock Abstraction
//!
//! The convergence loop sleeps between passes through this trait so tests
//! can drive elapsed time deterministically instead of waiting on timers.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Time source and sleep primitive for the polling loop.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, period: Duration);
}

/// Real wall clock; sleeps block the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, period: Duration) {
        std::thread::sleep(period);
    }
}

/// Virtual clock: sleeping advances time instantly and counts the sleeps.
#[derive(Debug)]
pub struct ManualClock {
    start: Instant,
    elapsed: Cell<Duration>,
    sleeps: Cell<u32>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed: Cell::new(Duration::ZERO),
            sleeps: Cell::new(0),
        }
    }

    /// Virtual time passed since construction
    pub fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }

    /// Number of sleeps taken so far
    pub fn sleeps(&self) -> u32 {
        self.sleeps.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + self.elapsed.get()
    }

    fn sleep(&self, period: Duration) {
        self.elapsed.set(self.elapsed.get() + period);
        self.sleeps.set(self.sleeps.get() + 1);
    }
}
