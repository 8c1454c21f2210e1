//! Time abstraction for testability
//!
//! Provides a settable [`Clock`] so "now"-based construction can be tested
//! deterministically without relying on the system clock.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use chronoval_common::testing::MockClock;
//! use chronoval_common::time::AbsoluteTime;
//!
//! let clock = MockClock::at(AbsoluteTime::from_parts(1_000, 0));
//! clock.advance(Duration::from_millis(1_500));
//! assert_eq!(AbsoluteTime::now_with(&clock).to_string(), "1001.500000s");
//! ```

// Test utility: panics on a poisoned mutex so failing tests surface early
#![allow(clippy::missing_panics_doc)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::time::{Clock, SystemClock, TimeVal};

/// Mock clock for deterministic testing
///
/// Clones share the same time, so a clone handed to code under test observes
/// every `advance`, `rewind` and `set` made through the original.
#[derive(Debug, Clone)]
pub struct MockClock {
    current: Arc<Mutex<TimeVal>>,
}

impl MockClock {
    /// Create a mock clock starting at the current system time
    pub fn new() -> Self {
        Self::at(SystemClock.now())
    }

    /// Create a mock clock frozen at `time`
    pub fn at<T: Into<TimeVal>>(time: T) -> Self {
        Self { current: Arc::new(Mutex::new(time.into())) }
    }

    /// Move the clock forward by `duration`, truncated to microseconds.
    pub fn advance(&self, duration: Duration) {
        let step = TimeVal::try_from(duration).expect("advance step out of range");
        let mut current = self.current.lock().expect("mutex poisoned");
        *current = current.checked_add(step).expect("mock clock overflow");
    }

    /// Move the clock backward by `duration`, modelling a wall-clock
    /// adjustment.
    pub fn rewind(&self, duration: Duration) {
        let step = TimeVal::try_from(duration).expect("rewind step out of range");
        let mut current = self.current.lock().expect("mutex poisoned");
        *current = current.checked_sub(step).expect("mock clock overflow");
    }

    /// Jump the clock to `time`.
    pub fn set<T: Into<TimeVal>>(&self, time: T) {
        *self.current.lock().expect("mutex poisoned") = time.into();
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> TimeVal {
        *self.current.lock().expect("mutex poisoned")
    }
}
