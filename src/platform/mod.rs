//! Platform abstraction layer
//!
//! What the simulation needs from the outside world:
//! - Time (monotonic seconds, plus a way to wait out the tick budget)
//! - Activation input (one edge per press)

use std::cell::Cell;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Monotonic time source
pub trait Clock {
    /// Seconds since an arbitrary fixed origin
    fn now(&self) -> f64;
    /// Yield for `seconds`
    fn sleep(&self, seconds: f64);
}

/// Wall clock backed by `Instant`
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn sleep(&self, seconds: f64) {
        if seconds > 0.0 {
            std::thread::sleep(Duration::from_secs_f64(seconds));
        }
    }
}

/// Clock that only moves when told to; sleeping advances it instantly
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }

    fn sleep(&self, seconds: f64) {
        self.advance(seconds.max(0.0));
    }
}

/// Source of flap/click activations
pub trait ActivationSource {
    /// True once per distinct activation since the previous poll
    fn poll_activation(&mut self) -> bool;
}

/// Turns a press counter into edges.
///
/// Windowing layers typically expose a running click count; an edge is
/// reported whenever that count differs from the one seen last, so a held
/// or already reported press never fires twice.
#[derive(Debug, Clone, Default)]
pub struct ClickEdge {
    last_count: u64,
}

impl ClickEdge {
    pub fn new(initial_count: u64) -> Self {
        Self {
            last_count: initial_count,
        }
    }

    pub fn observe(&mut self, count: u64) -> bool {
        if count != self.last_count {
            self.last_count = count;
            return true;
        }
        false
    }
}

/// Never activates; used with the autopilot
#[derive(Debug, Clone, Copy, Default)]
pub struct NoActivation;

impl ActivationSource for NoActivation {
    fn poll_activation(&mut self) -> bool {
        false
    }
}

/// Replays a fixed sequence of per-tick activations, then stays quiet
#[derive(Debug, Clone, Default)]
pub struct ScriptedActivation {
    script: VecDeque<bool>,
}

impl ScriptedActivation {
    pub fn new(script: impl IntoIterator<Item = bool>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl ActivationSource for ScriptedActivation {
    fn poll_activation(&mut self) -> bool {
        self.script.pop_front().unwrap_or(false)
    }
}
