//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (monotonic millisecond timestamps)
//! - Storage (LocalStorage on web, see `highscores`)
//! - The JS-facing game handle on wasm32

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Source of monotonically increasing timestamps in milliseconds
pub trait Clock {
    fn now_ms(&mut self) -> f64;
}

/// Wall clock backed by `std::time::Instant`
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_ms(&mut self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock that moves a fixed amount per reading (headless runs, tests)
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: f64,
    step_ms: f64,
}

impl ManualClock {
    pub fn new(step_ms: f64) -> Self {
        Self { now: 0.0, step_ms }
    }

    /// Clock ticking at a fixed frame rate
    pub fn at_fps(fps: u32) -> Self {
        Self::new(1000.0 / fps.max(1) as f64)
    }

    /// Jump ahead, e.g. to simulate a frame hitch
    pub fn skip(&mut self, ms: f64) {
        self.now += ms.max(0.0);
    }
}

impl Clock for ManualClock {
    fn now_ms(&mut self) -> f64 {
        let now = self.now;
        self.now += self.step_ms;
        now
    }
}
