#![forbid(unsafe_code)]

//! Trailing-edge debounce driven by an explicit clock.
//!
//! A debounced action runs only once `delay` has elapsed since the most
//! recent call. Every call pushes the deadline out again, so at most one
//! execution is ever pending. There is no leading-edge execution and no
//! cancel operation beyond superseding calls.
//!
//! Time is passed in by the caller (see [`crate::clock`]), which keeps the
//! behavior deterministic under test and lets hosts map the deadline onto
//! whatever timer facility they own.
//!
//! # Example
//!
//! ```
//! use core::time::Duration;
//! use reveal_core::debounce;
//!
//! let mut fired = 0;
//! let mut resize = debounce(|| fired += 1, Duration::from_millis(250));
//! for step in 0..10 {
//!     resize.call(Duration::from_millis(step * 10));
//! }
//! assert!(!resize.poll(Duration::from_millis(300)));
//! assert!(resize.poll(Duration::from_millis(340)));
//! drop(resize);
//! assert_eq!(fired, 1);
//! ```

use core::time::Duration;

/// Default quiet period used to coalesce viewport resize storms.
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 250;

/// Deadline tracker for one debounced action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Duration>,
}

impl Debouncer {
    /// Create an idle debouncer with the given quiet period.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Configured quiet period.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Pending deadline, if a call is waiting to fire.
    #[must_use]
    pub const fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Whether a call is waiting for its quiet period.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Record a call at `now`, superseding any pending one.
    pub fn call(&mut self, now: Duration) {
        self.deadline = Some(now.saturating_add(self.delay));
    }

    /// Time left until the pending deadline, or `None` when idle.
    #[must_use]
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.saturating_sub(now))
    }

    /// Returns `true` exactly once when the quiet period has elapsed.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// A callback wrapped with a [`Debouncer`].
pub struct Debounced<F> {
    action: F,
    timer: Debouncer,
}

impl<F: FnMut()> Debounced<F> {
    /// Record an invocation at `now`.
    pub fn call(&mut self, now: Duration) {
        self.timer.call(now);
    }

    /// Run the action if its quiet period has elapsed. Returns whether it ran.
    pub fn poll(&mut self, now: Duration) -> bool {
        if self.timer.poll(now) {
            (self.action)();
            true
        } else {
            false
        }
    }
}

impl<F> core::fmt::Debug for Debounced<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Debounced")
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}

/// Wrap `action` so it only runs after `delay` of inactivity.
#[must_use]
pub fn debounce<F: FnMut()>(action: F, delay: Duration) -> Debounced<F> {
    Debounced {
        action,
        timer: Debouncer::new(delay),
    }
}
