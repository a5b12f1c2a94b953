//! Time sources for the orchestrator.
//!
//! Everything time-dependent reads `Clock::now`. The frame loop runs on
//! [`SystemClock`]; tests and simulations drive a [`ManualClock`] by hand so
//! that delay and duration arithmetic is exact.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Clone, Debug)]
pub struct ManualClock {
    origin: Instant,
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        let origin = Instant::now();
        Self {
            origin,
            now: Rc::new(Cell::new(origin)),
        }
    }

    /// Move time forward by `ms` milliseconds
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + Duration::from_millis(ms));
    }

    /// Jump to `ms` milliseconds after the clock's origin.
    /// Time never moves backwards; earlier targets are ignored.
    pub fn set_elapsed(&self, ms: u64) {
        let target = self.origin + Duration::from_millis(ms);
        if target > self.now.get() {
            self.now.set(target);
        }
    }

    /// Milliseconds since the clock's origin
    pub fn elapsed_ms(&self) -> u64 {
        (self.now.get() - self.origin).as_millis() as u64
    }

    pub fn origin(&self) -> Instant {
        self.origin
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}
