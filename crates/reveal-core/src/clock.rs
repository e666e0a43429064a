#![forbid(unsafe_code)]

//! Wall-backed monotonic time for hosts that drive the widget in real time.
//!
//! Hosts stamp every callback with [`SystemClock::now`] and hand the value to
//! the controller; tests skip the clock and pass chosen `Duration`s instead.

use core::time::Duration;

use web_time::Instant;

/// Time elapsed since the clock was created.
///
/// Backed by `performance.now()` on `wasm32` and `std::time::Instant`
/// elsewhere, so it never runs backwards.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Monotonic time since [`SystemClock::new`].
    #[must_use]
    pub fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}
